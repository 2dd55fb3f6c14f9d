use std::path::Path;

use anyhow::{bail, Context};
use glam::Vec3;
use serde::Deserialize;

use crate::camera::{
  Camera, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM,
};

//
// ──────────────────────────────────────────────────────────────
//   Camera settings (optional JSON file)
//
//   Every field is optional; missing ones take the built-in
//   defaults. Example:
//     { "position": [0, 1, 5], "movement_speed": 4.0 }
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings
{
  pub position: [f32; 3],
  pub world_up: [f32; 3],
  pub yaw: f32,
  pub pitch: f32,
  pub movement_speed: f32,
  pub mouse_sensitivity: f32,
  pub zoom: f32,
}

impl Default for CameraSettings
{
  fn default() -> Self
  {
    Self {
      position: [0.0, 0.0, 3.0],
      world_up: [0.0, 1.0, 0.0],
      yaw: DEFAULT_YAW,
      pitch: DEFAULT_PITCH,
      movement_speed: DEFAULT_SPEED,
      mouse_sensitivity: DEFAULT_SENSITIVITY,
      zoom: DEFAULT_ZOOM,
    }
  }
}

impl CameraSettings
{
  pub fn load(path: &Path) -> anyhow::Result<Self>
  {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("reading camera settings from {}", path.display()))?;

    let settings = Self::from_json(&text)
      .with_context(|| format!("invalid camera settings in {}", path.display()))?;

    log::info!("loaded camera settings from {}", path.display());
    Ok(settings)
  }

  pub fn from_json(text: &str) -> anyhow::Result<Self>
  {
    let settings: Self = serde_json::from_str(text).context("parsing settings JSON")?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> anyhow::Result<()>
  {
    if !(self.movement_speed.is_finite() && self.movement_speed > 0.0)
    {
      bail!("movement_speed must be positive, got {}", self.movement_speed);
    }

    if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0)
    {
      bail!("mouse_sensitivity must be positive, got {}", self.mouse_sensitivity);
    }

    if !Vec3::from_array(self.position).is_finite()
    {
      bail!("position must be finite, got {:?}", self.position);
    }

    for (name, value) in [("yaw", self.yaw), ("pitch", self.pitch), ("zoom", self.zoom)]
    {
      if !value.is_finite()
      {
        bail!("{name} must be finite, got {value}");
      }
    }

    // Yaw/pitch are measured against the XZ ground plane, so only +Y
    // (at any length) is a usable world up.
    let up = Vec3::from_array(self.world_up);
    if !up.is_finite() || !up.normalize_or_zero().abs_diff_eq(Vec3::Y, 1e-6)
    {
      bail!("world_up must point along +Y, got {:?}", self.world_up);
    }

    Ok(())
  }

  pub fn build_camera(&self) -> Camera
  {
    let mut camera = Camera::with_orientation(
      Vec3::from_array(self.position),
      Vec3::from_array(self.world_up),
      self.yaw,
      self.pitch,
    );

    camera.set_movement_speed(self.movement_speed);
    camera.set_mouse_sensitivity(self.mouse_sensitivity);
    camera.set_zoom(self.zoom);
    camera
  }
}

/// Settings from the file named by the first command-line argument,
/// or the defaults when none is given.
pub fn from_args() -> anyhow::Result<CameraSettings>
{
  match std::env::args_os().nth(1)
  {
    Some(path) => CameraSettings::load(Path::new(&path)),
    None =>
    {
      log::info!("no settings file given, using default camera");
      Ok(CameraSettings::default())
    }
  }
}
