pub mod arclen;
pub mod interpolate;
pub mod segment;

pub use glam::{DVec2, DVec3, DVec4};
pub use segment::Segment3;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
