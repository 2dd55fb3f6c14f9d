use glam::{Mat4, Vec3};

use super::Projection;

//
// ──────────────────────────────────────────────────────────────
//   Camera (first-person fly camera, Y-up right-hand rule)
//
//   Coordinate system:
//     X → right
//     Y → up
//     -Z → forward at the default orientation
//
//   Orientation is stored as Euler angles in degrees:
//     yaw   = rotation about world up (unbounded)
//     pitch = angle above the horizontal plane (clamped)
//
//   `front`, `right` and `up` are derived from yaw/pitch and are
//   never set directly.
// ──────────────────────────────────────────────────────────────
//

pub struct Camera
{
  pub position: Vec3,

  front: Vec3,
  right: Vec3,
  up: Vec3,
  world_up: Vec3,

  yaw: f32,
  pitch: f32,

  movement_speed: f32,
  mouse_sensitivity: f32,
  zoom: f32,
}

/// Keyboard movement directions, relative to the camera's own axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement
{
  Forward,
  Backward,
  Left,
  Right,
}

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

// 89 rather than 90: at ±90 front is parallel to world up and `right`
// collapses to zero.
const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Camera
{
  /// Camera at `position` looking down -Z with a Y-up world.
  pub fn new(position: Vec3) -> Self
  {
    Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
  }

  /// Camera with an explicit world up and initial yaw/pitch (degrees).
  /// `pitch` is clamped to ±89°.
  pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self
  {
    let mut camera = Self {
      position,
      front: Vec3::NEG_Z,
      right: Vec3::X,
      up: Vec3::Y,
      world_up: world_up.normalize_or(Vec3::Y),
      yaw,
      pitch: clamp_pitch(pitch),
      movement_speed: DEFAULT_SPEED,
      mouse_sensitivity: DEFAULT_SENSITIVITY,
      zoom: DEFAULT_ZOOM,
    };

    camera.update_basis();
    camera
  }

  /// Translate along `front` or `right` by `movement_speed * elapsed_seconds`.
  /// Orientation is untouched.
  pub fn move_by(&mut self, direction: Movement, elapsed_seconds: f32)
  {
    let distance = self.movement_speed * elapsed_seconds;

    let offset = match direction
    {
      Movement::Forward => self.front * distance,
      Movement::Backward => -self.front * distance,
      Movement::Left => -self.right * distance,
      Movement::Right => self.right * distance,
    };

    self.position += offset;
  }

  /// Apply a pointer delta in pixels. `delta_y` is positive for upward motion.
  pub fn look(&mut self, delta_x: f32, delta_y: f32)
  {
    self.yaw += delta_x * self.mouse_sensitivity;
    self.pitch = clamp_pitch(self.pitch + delta_y * self.mouse_sensitivity);

    self.update_basis();
  }

  /// Narrow (positive `delta`) or widen the field of view.
  pub fn zoom_by(&mut self, delta: f32)
  {
    self.zoom = clamp_zoom(self.zoom - delta);
  }

  pub fn view_matrix(&self) -> Mat4
  {
    Mat4::look_at_rh(self.position, self.position + self.front, self.up)
  }

  /// Projection from the current zoom, multiplied with the view matrix.
  pub fn view_proj(&self, projection: &Projection) -> Mat4
  {
    projection.matrix(self.zoom) * self.view_matrix()
  }

  pub fn set_zoom(&mut self, zoom: f32)
  {
    self.zoom = clamp_zoom(zoom);
  }

  pub fn set_movement_speed(&mut self, speed: f32)
  {
    if !is_positive(speed)
    {
      log::warn!("ignoring non-positive movement speed {speed}");
      return;
    }

    self.movement_speed = speed;
  }

  pub fn set_mouse_sensitivity(&mut self, sensitivity: f32)
  {
    if !is_positive(sensitivity)
    {
      log::warn!("ignoring non-positive mouse sensitivity {sensitivity}");
      return;
    }

    self.mouse_sensitivity = sensitivity;
  }

  pub fn zoom(&self) -> f32
  {
    self.zoom
  }

  pub fn yaw(&self) -> f32
  {
    self.yaw
  }

  pub fn pitch(&self) -> f32
  {
    self.pitch
  }

  pub fn front(&self) -> Vec3
  {
    self.front
  }

  pub fn right(&self) -> Vec3
  {
    self.right
  }

  pub fn up(&self) -> Vec3
  {
    self.up
  }

  pub fn world_up(&self) -> Vec3
  {
    self.world_up
  }

  pub fn movement_speed(&self) -> f32
  {
    self.movement_speed
  }

  pub fn mouse_sensitivity(&self) -> f32
  {
    self.mouse_sensitivity
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Euler → basis helpers
// ──────────────────────────────────────────────────────────────
//

impl Camera
{
  fn update_basis(&mut self)
  {
    self.front = front_from_angles(self.yaw, self.pitch);
    // front parallel to world up (only possible with a non-Y world up)
    // leaves the cross product at zero; pick any perpendicular axis.
    self.right = self.front.cross(self.world_up).normalize_or(self.front.any_orthonormal_vector());
    self.up = self.right.cross(self.front).normalize();
  }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3
{
  let (sin_yaw, cos_yaw) = yaw.to_radians().sin_cos();
  let (sin_pitch, cos_pitch) = pitch.to_radians().sin_cos();

  Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
}

fn clamp_pitch(pitch: f32) -> f32
{
  pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn clamp_zoom(zoom: f32) -> f32
{
  zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

fn is_positive(value: f32) -> bool
{
  value.is_finite() && value > 0.0
}

//
// ──────────────────────────────────────────────────────────────
//   Tests
// ──────────────────────────────────────────────────────────────
//
