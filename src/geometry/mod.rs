mod face;
mod segment;

pub use face::RectFace;
pub use segment::Segment;
