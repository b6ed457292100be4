//! World-space geometry shared by fitting and picking.

mod bounds;
mod ray;

pub use bounds::BoundingVolume;
pub use ray::Ray;
