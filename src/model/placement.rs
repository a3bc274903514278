use crate::math::Point3;

use super::ids::ElementId;

/// Host wall and reference level resolved for a crossing's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostRef {
    pub host: ElementId,
    pub level: ElementId,
}

/// A request to create one penetration instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub position: Point3,
    pub host: ElementId,
    pub level: ElementId,
    pub width: f64,
    pub height: f64,
}

/// All placements applied together in one atomic model change.
#[derive(Debug, Clone)]
pub struct PlacementBatch {
    /// Name of the change, shown in the host's undo history.
    pub label: String,
    /// Symbol to instantiate.
    pub symbol: ElementId,
    /// Instance parameter receiving the width.
    pub width_parameter: String,
    /// Instance parameter receiving the height.
    pub height_parameter: String,
    pub requests: Vec<PlacementRequest>,
}
