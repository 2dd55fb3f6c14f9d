use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::{Mat4, Vec3};
use winit::{
  application::ApplicationHandler,
  event::{DeviceEvent, DeviceId, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, DeviceEvents, EventLoop},
  window::{CursorGrabMode, Window, WindowId},
};

use crate::camera::{Camera, Projection};
use crate::config::CameraSettings;
use crate::input::camera_control::apply_input_to_camera;
use crate::input::InputSession;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

pub fn run(settings: &CameraSettings) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new().context("creating event loop")?;
  let mut app = FlycamApp::new(settings);

  event_loop.run_app(&mut app).context("running event loop")?;

  match app.failure.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct FlycamApp
{
  window: Option<Arc<Window>>,
  camera: Camera,
  projection: Projection,
  input: InputSession,
  focused: bool,
  next_frame: Instant,

  // Pose last written to the log, to keep debug output to changes only
  last_pose: Option<(Vec3, f32, f32, f32)>,
  failure: Option<anyhow::Error>,
}

impl FlycamApp
{
  fn new(settings: &CameraSettings) -> Self
  {
    Self {
      window: None,
      camera: settings.build_camera(),
      projection: Projection::new(WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32),
      input: InputSession::new(),
      focused: false,
      next_frame: Instant::now(),
      last_pose: None,
      failure: None,
    }
  }

  fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title("flycam")
      .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

    capture_cursor(&window);

    let size = window.inner_size();
    if size.width > 0 && size.height > 0
    {
      self.projection.set_aspect(size.width as f32 / size.height as f32);
    }

    self.focused = true;
    log::info!("window created ({}x{})", size.width, size.height);
    log::info!(
      "camera at {} (world up {}), speed {}, sensitivity {}",
      self.camera.position,
      self.camera.world_up(),
      self.camera.movement_speed(),
      self.camera.mouse_sensitivity()
    );
    self.window = Some(window);
    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    match &self.window
    {
      Some(w) if w.id() == window_id =>
      {}
      _ => return,
    }

    self.input.handle_event(&event);

    if self.input.exit_requested()
    {
      log::info!("escape pressed, exiting");
      elwt.exit();
      return;
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        self.projection.set_aspect(size.width as f32 / size.height as f32);
        log::debug!("resized to {}x{}", size.width, size.height);
      }

      WindowEvent::Focused(focused) =>
      {
        self.focused = focused;

        if let (true, Some(window)) = (focused, &self.window)
        {
          capture_cursor(window);
        }
      }

      WindowEvent::RedrawRequested =>
      {
        self.frame();
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self)
  {
    if self.window.is_none()
    {
      return;
    }

    self.input.begin_frame();
    apply_input_to_camera(&self.input, &mut self.camera);

    let view_proj = self.camera.view_proj(&self.projection);
    self.log_pose(&view_proj);

    self.input.end_frame();
  }

  fn log_pose(&mut self, view_proj: &Mat4)
  {
    let cam = &self.camera;
    let pose = (cam.position, cam.yaw(), cam.pitch(), cam.zoom());

    if self.last_pose == Some(pose)
    {
      return;
    }

    log::debug!(
      "pos={} yaw={:.1} pitch={:.1} zoom={:.1} front={}",
      cam.position,
      cam.yaw(),
      cam.pitch(),
      cam.zoom(),
      cam.front()
    );
    log::trace!("right={} up={} view_proj={view_proj}", cam.right(), cam.up());

    self.last_pose = Some(pose);
  }
}

/// ~60 Hz pacing: when `now` has reached the deadline, returns the next
/// one. The loop sleeps until the deadline in between.
fn frame_due(now: Instant, deadline: Instant) -> Option<Instant>
{
  (now >= deadline).then(|| now + FRAME_INTERVAL)
}

/// Lock (or at least confine) and hide the cursor. Look itself comes from
/// raw device motion, so it is not bounded by the window edge.
fn capture_cursor(window: &Window)
{
  let grabbed = window
    .set_cursor_grab(CursorGrabMode::Locked)
    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

  if let Err(err) = grabbed
  {
    log::warn!("cursor grab unavailable: {err}");
  }

  window.set_cursor_visible(false);
}

impl ApplicationHandler for FlycamApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.listen_device_events(DeviceEvents::WhenFocused);

    if let Err(err) = self.init_window(event_loop)
    {
      log::error!("{err:#}");
      self.failure = Some(err);
      event_loop.exit();
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent)
  {
    if !self.focused
    {
      return;
    }

    if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event
    {
      self.input.mouse_motion(dx as f32, dy as f32);
    }
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    let window = match &self.window
    {
      Some(w) => w,
      None => return,
    };

    if let Some(next) = frame_due(Instant::now(), self.next_frame)
    {
      window.request_redraw();
      self.next_frame = next;
    }

    event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn redraw_only_requested_once_per_interval()
  {
    let start = Instant::now();

    let next = frame_due(start, start).unwrap();
    assert_eq!(next, start + FRAME_INTERVAL);

    // woken early by input events: no extra frame
    assert_eq!(frame_due(start + Duration::from_millis(5), next), None);
    assert_eq!(frame_due(next - Duration::from_micros(1), next), None);

    assert_eq!(frame_due(next, next), Some(next + FRAME_INTERVAL));
  }
}
