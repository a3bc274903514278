use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::host::RayCaster;
use crate::math::{Point3, Vector3};
use crate::model::{ElementId, RawCrossing, Target};

use super::store::ModelData;

/// Casts rays against the walls of one model as seen in one view.
///
/// Every face struck is reported separately, so a wall crossed through
/// shows up twice: once for its near face and once for its far face.
#[derive(Debug)]
pub struct WallRayCaster<'a> {
    model: &'a ModelData,
    hidden: &'a FxHashSet<ElementId>,
}

impl<'a> WallRayCaster<'a> {
    pub(super) fn new(model: &'a ModelData, hidden: &'a FxHashSet<ElementId>) -> Self {
        Self { model, hidden }
    }
}

impl RayCaster for WallRayCaster<'_> {
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Result<Vec<RawCrossing>> {
        let hits = self
            .model
            .walls
            .iter()
            .filter(|(id, _)| !self.hidden.contains(*id))
            .flat_map(|(&id, wall)| {
                let target = Target {
                    link: wall.link,
                    element: id,
                };
                wall.ray_hits(origin, direction)
                    .map(move |t| RawCrossing::new(target, t))
            })
            .collect();
        Ok(hits)
    }
}
