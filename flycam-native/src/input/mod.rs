pub mod camera_control;

use std::time::Instant;

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::Movement;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

// Touchpads report pixels; treat this many as one wheel notch.
const PIXELS_PER_LINE: f32 = 40.0;

//
// ──────────────────────────────────────────────────────────────
//   InputSession
//
//   Per-window input context owned by the app. Holds everything
//   the camera needs between events: last cursor sample, the
//   first-sample flag, held movement keys, the frame clock.
//
//   Look deltas come from one of two sources:
//     raw mouse motion (unbounded, preferred once it has been seen)
//     cursor positions (stops at the window edge when confined)
// ──────────────────────────────────────────────────────────────
//

pub struct InputSession
{
  last_cursor: Option<(f32, f32)>,
  relative_look: bool,
  look_dx: f32,
  look_dy: f32,

  scroll: f32,

  forward_held: bool,
  backward_held: bool,
  left_held: bool,
  right_held: bool,

  exit_requested: bool,

  last_frame: Option<Instant>,
  delta_time: f32,
}

impl InputSession
{
  pub fn new() -> Self
  {
    Self {
      last_cursor: None,
      relative_look: false,
      look_dx: 0.0,
      look_dy: 0.0,

      scroll: 0.0,

      forward_held: false,
      backward_held: false,
      left_held: false,
      right_held: false,

      exit_requested: false,

      last_frame: None,
      delta_time: 0.0,
    }
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        self.cursor_moved(position.x as f32, position.y as f32);
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.scrolled(*y),
        MouseScrollDelta::PixelDelta(p) => self.scrolled(p.y as f32 / PIXELS_PER_LINE),
      },

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.key_changed(code, event.state == ElementState::Pressed);
        }
      }

      WindowEvent::Focused(false) =>
      {
        self.release_all();
        self.reset_look();
      }

      _ =>
      {}
    }
  }

  /// Record a cursor sample in window pixels (y grows downward).
  /// The first sample after construction or `reset_look` produces no delta.
  /// Ignored for look once raw motion is arriving through `mouse_motion`.
  pub fn cursor_moved(&mut self, x: f32, y: f32)
  {
    if self.relative_look
    {
      self.last_cursor = Some((x, y));
      return;
    }

    if let Some((last_x, last_y)) = self.last_cursor
    {
      self.look_dx += x - last_x;
      self.look_dy += last_y - y;
    }

    self.last_cursor = Some((x, y));
  }

  /// Raw device motion in mouse counts (y grows downward). No first-sample
  /// suppression: these are already deltas.
  pub fn mouse_motion(&mut self, dx: f32, dy: f32)
  {
    self.relative_look = true;
    self.look_dx += dx;
    self.look_dy -= dy;
  }

  /// Vertical scroll in wheel lines, positive away from the user.
  pub fn scrolled(&mut self, lines: f32)
  {
    self.scroll += lines;
  }

  pub fn key_changed(&mut self, code: KeyCode, pressed: bool)
  {
    match code
    {
      KeyCode::KeyW => self.forward_held = pressed,
      KeyCode::KeyS => self.backward_held = pressed,
      KeyCode::KeyA => self.left_held = pressed,
      KeyCode::KeyD => self.right_held = pressed,
      KeyCode::Escape if pressed => self.exit_requested = true,
      _ =>
      {}
    }
  }

  /// Forget the last cursor sample so the next one is treated as the first.
  pub fn reset_look(&mut self)
  {
    self.last_cursor = None;
    self.look_dx = 0.0;
    self.look_dy = 0.0;
  }

  pub fn release_all(&mut self)
  {
    self.forward_held = false;
    self.backward_held = false;
    self.left_held = false;
    self.right_held = false;
  }

  /// Sample the clock. Call once per frame before reading `delta_time`.
  pub fn begin_frame(&mut self)
  {
    self.tick(Instant::now());
  }

  pub fn end_frame(&mut self)
  {
    self.look_dx = 0.0;
    self.look_dy = 0.0;
    self.scroll = 0.0;
  }

  pub fn held_movements(&self) -> impl Iterator<Item = Movement>
  {
    [
      (self.forward_held, Movement::Forward),
      (self.backward_held, Movement::Backward),
      (self.left_held, Movement::Left),
      (self.right_held, Movement::Right),
    ]
    .into_iter()
    .filter_map(|(held, movement)| held.then_some(movement))
  }

  pub fn look_delta(&self) -> (f32, f32)
  {
    (self.look_dx, self.look_dy)
  }

  pub fn scroll(&self) -> f32
  {
    self.scroll
  }

  /// Seconds between the two most recent `begin_frame` calls.
  pub fn delta_time(&self) -> f32
  {
    self.delta_time
  }

  pub fn exit_requested(&self) -> bool
  {
    self.exit_requested
  }

  fn tick(&mut self, now: Instant)
  {
    self.delta_time = match self.last_frame
    {
      Some(last) => now.saturating_duration_since(last).as_secs_f32(),
      None => 0.0,
    };

    self.last_frame = Some(now);
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use std::time::Duration;

  #[test]
  fn first_cursor_sample_is_swallowed()
  {
    let mut input = InputSession::new();

    input.cursor_moved(640.0, 360.0);
    assert_eq!(input.look_delta(), (0.0, 0.0));

    input.cursor_moved(650.0, 350.0);
    assert_eq!(input.look_delta(), (10.0, 10.0));
  }

  #[test]
  fn deltas_accumulate_until_end_frame()
  {
    let mut input = InputSession::new();

    input.cursor_moved(0.0, 0.0);
    input.cursor_moved(3.0, 4.0);
    input.cursor_moved(5.0, 10.0);
    assert_eq!(input.look_delta(), (5.0, -10.0));

    input.end_frame();
    assert_eq!(input.look_delta(), (0.0, 0.0));

    input.cursor_moved(6.0, 10.0);
    assert_eq!(input.look_delta(), (1.0, 0.0));
  }

  #[test]
  fn raw_motion_is_used_immediately_and_inverted()
  {
    let mut input = InputSession::new();

    input.mouse_motion(12.0, 5.0);
    assert_eq!(input.look_delta(), (12.0, -5.0));

    input.mouse_motion(3.0, -2.0);
    assert_eq!(input.look_delta(), (15.0, -3.0));
  }

  #[test]
  fn raw_motion_keeps_turning_past_the_window_edge()
  {
    let mut input = InputSession::new();

    // cursor pinned at the right edge of a confined 1280-wide window
    input.cursor_moved(1279.0, 360.0);
    for _ in 0..100
    {
      input.mouse_motion(20.0, 0.0);
      input.cursor_moved(1279.0, 360.0);
    }

    assert_eq!(input.look_delta(), (2000.0, 0.0));
  }

  #[test]
  fn cursor_positions_ignored_once_raw_motion_seen()
  {
    let mut input = InputSession::new();

    input.mouse_motion(1.0, 0.0);
    input.cursor_moved(0.0, 0.0);
    input.cursor_moved(300.0, 300.0);

    assert_eq!(input.look_delta(), (1.0, 0.0));
  }

  #[test]
  fn reset_look_rearms_first_sample()
  {
    let mut input = InputSession::new();

    input.cursor_moved(0.0, 0.0);
    input.reset_look();
    input.cursor_moved(500.0, 500.0);

    assert_eq!(input.look_delta(), (0.0, 0.0));
  }

  #[test]
  fn wasd_tracks_held_directions()
  {
    let mut input = InputSession::new();

    input.key_changed(KeyCode::KeyW, true);
    input.key_changed(KeyCode::KeyD, true);
    let held: Vec<_> = input.held_movements().collect();
    assert_eq!(held, vec![Movement::Forward, Movement::Right]);

    input.key_changed(KeyCode::KeyW, false);
    input.key_changed(KeyCode::KeyA, true);
    let held: Vec<_> = input.held_movements().collect();
    assert_eq!(held, vec![Movement::Left, Movement::Right]);

    input.release_all();
    assert_eq!(input.held_movements().count(), 0);
  }

  #[test]
  fn escape_requests_exit_on_press_only()
  {
    let mut input = InputSession::new();

    input.key_changed(KeyCode::Escape, false);
    assert!(!input.exit_requested());

    input.key_changed(KeyCode::Escape, true);
    assert!(input.exit_requested());
  }

  #[test]
  fn focus_loss_releases_keys()
  {
    let mut input = InputSession::new();

    input.key_changed(KeyCode::KeyS, true);
    input.cursor_moved(1.0, 1.0);
    input.handle_event(&WindowEvent::Focused(false));

    assert_eq!(input.held_movements().count(), 0);

    input.cursor_moved(100.0, 100.0);
    assert_eq!(input.look_delta(), (0.0, 0.0));
  }

  #[test]
  fn clock_reports_elapsed_seconds()
  {
    let mut input = InputSession::new();
    let start = Instant::now();

    input.tick(start);
    assert_eq!(input.delta_time(), 0.0);

    input.tick(start + Duration::from_millis(250));
    assert!((input.delta_time() - 0.25).abs() < 1e-6);

    input.tick(start + Duration::from_millis(266));
    assert!((input.delta_time() - 0.016).abs() < 1e-6);
  }
}
