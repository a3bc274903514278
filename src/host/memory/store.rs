use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{GeometryError, PierceError, Result};
use crate::geometry::{RectFace, Segment};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::model::{Category, ElementId, LinkId, RunKind};

/// A straight wall: two vertical side faces offset half the thickness from
/// its base line.
#[derive(Debug, Clone)]
pub struct WallData {
    /// Level the wall is based on.
    pub level: ElementId,
    /// Link the wall is seen through, if it belongs to a linked model.
    pub link: Option<LinkId>,
    faces: [RectFace; 2],
}

impl WallData {
    /// Creates a wall along the base line `start`..`end`.
    ///
    /// The wall rises from `start.z`; any height difference between the two
    /// endpoints is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the base line is vertical or zero-length, or if
    /// the thickness or height is not positive.
    pub fn new(
        level: ElementId,
        start: Point3,
        end: Point3,
        thickness: f64,
        height: f64,
    ) -> Result<Self> {
        let run = end - start;
        let horizontal = Vector3::new(run.x, run.y, 0.0);
        if horizontal.norm() < TOLERANCE || thickness <= 0.0 || height <= 0.0 {
            return Err(GeometryError::Degenerate(
                "wall needs a horizontal base line, thickness and height".into(),
            )
            .into());
        }

        let side = horizontal.cross(&Vector3::z()).normalize() * (thickness / 2.0);
        let up = Vector3::z() * height;
        let faces = [
            RectFace::new(start + side, horizontal, up)?,
            RectFace::new(start - side, horizontal, up)?,
        ];

        Ok(Self {
            level,
            link: None,
            faces,
        })
    }

    /// Marks the wall as reached through `link`.
    #[must_use]
    pub fn through_link(mut self, link: LinkId) -> Self {
        self.link = Some(link);
        self
    }

    /// Distances at which a ray meets each side face.
    pub(super) fn ray_hits<'a>(
        &'a self,
        origin: &'a Point3,
        dir: &'a Vector3,
    ) -> impl Iterator<Item = f64> + 'a {
        self.faces.iter().filter_map(move |f| f.ray_hit(origin, dir))
    }
}

/// A building story datum.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub elevation: f64,
}

/// A linear mechanical element and its raw parameters.
#[derive(Debug, Clone)]
pub struct RunData {
    pub name: String,
    pub kind: RunKind,
    pub centerline: Segment,
    pub parameters: FxHashMap<String, f64>,
}

/// A placeable family type.
#[derive(Debug, Clone)]
pub struct SymbolData {
    pub category: Category,
    pub family: String,
    /// Instance parameters the family declares.
    pub parameters: Vec<String>,
}

/// A 3D view.
#[derive(Debug, Clone, Default)]
pub struct ViewData {
    pub name: String,
    pub is_template: bool,
    pub hidden: FxHashSet<ElementId>,
}

/// A placed opening.
#[derive(Debug, Clone)]
pub struct HoleInstance {
    pub id: ElementId,
    pub symbol: ElementId,
    pub position: Point3,
    pub host: ElementId,
    pub level: ElementId,
    pub parameters: FxHashMap<String, f64>,
}

/// Contents of one open model.
///
/// Element maps are keyed by ids allocated in increasing order, so iteration
/// follows insertion order.
#[derive(Debug, Default)]
pub struct ModelData {
    pub title: String,
    pub(super) walls: BTreeMap<ElementId, WallData>,
    pub(super) levels: BTreeMap<ElementId, LevelData>,
    pub(super) runs: BTreeMap<ElementId, RunData>,
    pub(super) symbols: BTreeMap<ElementId, SymbolData>,
    pub(super) views: BTreeMap<ElementId, ViewData>,
    pub(super) holes: Vec<HoleInstance>,
    pub(super) history: Vec<String>,
}

impl ModelData {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn wall(&self, id: ElementId) -> Result<&WallData> {
        self.walls
            .get(&id)
            .ok_or_else(|| PierceError::EntityNotFound(format!("wall {id}")))
    }

    /// Returns the level, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn level(&self, id: ElementId) -> Result<&LevelData> {
        self.levels
            .get(&id)
            .ok_or_else(|| PierceError::EntityNotFound(format!("level {id}")))
    }

    /// Returns the symbol, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn symbol(&self, id: ElementId) -> Result<&SymbolData> {
        self.symbols
            .get(&id)
            .ok_or_else(|| PierceError::EntityNotFound(format!("symbol {id}")))
    }

    /// Returns the view, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn view(&self, id: ElementId) -> Result<&ViewData> {
        self.views
            .get(&id)
            .ok_or_else(|| PierceError::EntityNotFound(format!("view {id}")))
    }

    /// Returns a mutable reference to the view, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn view_mut(&mut self, id: ElementId) -> Result<&mut ViewData> {
        self.views
            .get_mut(&id)
            .ok_or_else(|| PierceError::EntityNotFound(format!("view {id}")))
    }

    /// Placed openings, in creation order.
    #[must_use]
    pub fn holes(&self) -> &[HoleInstance] {
        &self.holes
    }

    /// Labels of committed changes, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}
