mod fly;
mod projection;

pub use fly::{
  Camera, Movement, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM,
};
pub use projection::Projection;
