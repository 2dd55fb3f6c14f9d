use glam::Mat4;

//
// ──────────────────────────────────────────────────────────────
//   Perspective projection
//
//   The vertical field of view is not stored here; it comes from
//   the camera's zoom every frame.
// ──────────────────────────────────────────────────────────────
//

pub struct Projection
{
  pub aspect: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Projection
{
  pub fn new(aspect: f32) -> Self
  {
    Self { aspect, znear: 0.1, zfar: 100.0 }
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  /// Right-handed perspective matrix for a vertical FOV in degrees.
  pub fn matrix(&self, fovy_degrees: f32) -> Mat4
  {
    Mat4::perspective_rh(fovy_degrees.to_radians(), self.aspect, self.znear, self.zfar)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::Camera;
  use glam::Vec3;

  #[test]
  fn matrix_uses_zoom_as_vertical_fov()
  {
    let projection = Projection::new(16.0 / 9.0);
    let expected = Mat4::perspective_rh(45.0_f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);

    assert!(projection.matrix(45.0).abs_diff_eq(expected, 1e-6));
  }

  #[test]
  fn view_proj_follows_camera_zoom()
  {
    let projection = Projection::new(1.0);
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
    camera.zoom_by(15.0);

    let expected = projection.matrix(30.0) * camera.view_matrix();
    assert!(camera.view_proj(&projection).abs_diff_eq(expected, 1e-6));
  }
}
