pub mod ids;
pub mod placement;
pub mod run;
pub mod target;

pub use ids::{Category, ElementId, LinkId, ModelId};
pub use placement::{HostRef, PlacementBatch, PlacementRequest};
pub use run::{CrossSection, Envelope, Run, RunKind};
pub use target::{Crossing, RawCrossing, Target, TargetKey};
