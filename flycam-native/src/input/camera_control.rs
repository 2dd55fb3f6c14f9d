use crate::camera::Camera;
use crate::input::InputSession;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Feed one frame of input into the camera. Call after `begin_frame`
/// and before reading the view matrix or zoom.
pub fn apply_input_to_camera(input: &InputSession, camera: &mut Camera)
{
  apply_movement(input, camera);
  apply_look(input, camera);
  apply_zoom(input, camera);
}

//
// ──────────────────────────────────────────────────────────────
//   Input handlers
// ──────────────────────────────────────────────────────────────
//

fn apply_movement(input: &InputSession, camera: &mut Camera)
{
  let dt = input.delta_time();

  for direction in input.held_movements()
  {
    camera.move_by(direction, dt);
  }
}

fn apply_look(input: &InputSession, camera: &mut Camera)
{
  let (dx, dy) = input.look_delta();

  if dx == 0.0 && dy == 0.0
  {
    return;
  }

  camera.look(dx, dy);
}

fn apply_zoom(input: &InputSession, camera: &mut Camera)
{
  let scroll = input.scroll();

  if scroll == 0.0
  {
    return;
  }

  // Scroll up (positive) narrows the field of view
  camera.zoom_by(scroll);
}

#[cfg(test)]
mod tests
{
  use super::*;
  use glam::Vec3;
  use winit::keyboard::KeyCode;

  #[test]
  fn opposite_keys_cancel()
  {
    let mut input = InputSession::new();
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));

    input.key_changed(KeyCode::KeyW, true);
    input.key_changed(KeyCode::KeyS, true);
    input.begin_frame();
    input.begin_frame();

    apply_input_to_camera(&input, &mut camera);

    assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
  }

  #[test]
  fn look_and_scroll_reach_the_camera()
  {
    let mut input = InputSession::new();
    let mut camera = Camera::new(Vec3::ZERO);

    input.cursor_moved(100.0, 100.0);
    input.cursor_moved(200.0, 50.0);
    input.scrolled(2.0);

    apply_input_to_camera(&input, &mut camera);

    assert!((camera.yaw() - -80.0).abs() < 1e-5);
    assert!((camera.pitch() - 5.0).abs() < 1e-5);
    assert_eq!(camera.zoom(), 43.0);
  }

  #[test]
  fn idle_frame_leaves_camera_alone()
  {
    let mut input = InputSession::new();
    let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));

    input.begin_frame();
    apply_input_to_camera(&input, &mut camera);

    assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(camera.yaw(), -90.0);
    assert_eq!(camera.zoom(), 45.0);
  }
}
