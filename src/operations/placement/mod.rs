mod hole_placer;

pub use hole_placer::HolePlacer;
