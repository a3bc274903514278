//! A self-contained host keeping every model in memory.
//!
//! Useful for driving a pass without a BIM application, and as the reference
//! behaviour of the collaborator contracts.

mod caster;
mod store;

pub use caster::WallRayCaster;
pub use store::{HoleInstance, LevelData, ModelData, RunData, SymbolData, ViewData, WallData};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{PierceError, Result, SetupError};
use crate::geometry::Segment;
use crate::model::{
    Category, CrossSection, ElementId, HostRef, ModelId, PlacementBatch, Run, RunKind, Target,
};

use super::{
    CasterSource, ModelLoader, ModelMutator, RunEnumerator, SymbolLookup, TargetLookup,
    ViewLookup,
};

/// Session of open models with one active (architectural) model.
///
/// Element ids are unique across the whole session.
#[derive(Debug)]
pub struct MemoryHost {
    models: SlotMap<ModelId, ModelData>,
    active: ModelId,
    next_id: u64,
}

impl MemoryHost {
    /// Creates a session whose active model is titled `active_title`.
    #[must_use]
    pub fn new(active_title: impl Into<String>) -> Self {
        let mut models = SlotMap::with_key();
        let active = models.insert(ModelData::new(active_title));
        Self {
            models,
            active,
            next_id: 1,
        }
    }

    /// Opens another, initially empty, model.
    pub fn open_model(&mut self, title: impl Into<String>) -> ModelId {
        self.models.insert(ModelData::new(title))
    }

    /// The model openings are placed into.
    #[must_use]
    pub fn active(&self) -> ModelId {
        self.active
    }

    /// Returns the model, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open.
    pub fn model(&self, id: ModelId) -> Result<&ModelData> {
        self.models
            .get(id)
            .ok_or_else(|| PierceError::EntityNotFound("model".into()))
    }

    fn model_mut(&mut self, id: ModelId) -> Result<&mut ModelData> {
        self.models
            .get_mut(id)
            .ok_or_else(|| PierceError::EntityNotFound("model".into()))
    }

    fn active_model(&self) -> Result<&ModelData> {
        self.model(self.active)
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a level.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open.
    pub fn add_level(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        elevation: f64,
    ) -> Result<ElementId> {
        self.model(model)?;
        let id = self.alloc_id();
        self.model_mut(model)?.levels.insert(
            id,
            LevelData {
                name: name.into(),
                elevation,
            },
        );
        Ok(id)
    }

    /// Adds a wall. Its level must already exist in the same model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open or the level is missing.
    pub fn add_wall(&mut self, model: ModelId, wall: WallData) -> Result<ElementId> {
        self.model(model)?.level(wall.level)?;
        let id = self.alloc_id();
        self.model_mut(model)?.walls.insert(id, wall);
        Ok(id)
    }

    /// Adds a run with the given raw parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open.
    pub fn add_run(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        kind: RunKind,
        centerline: Segment,
        parameters: &[(&str, f64)],
    ) -> Result<ElementId> {
        self.model(model)?;
        let id = self.alloc_id();
        let parameters: FxHashMap<String, f64> = parameters
            .iter()
            .map(|&(name, value)| (name.to_owned(), value))
            .collect();
        self.model_mut(model)?.runs.insert(
            id,
            RunData {
                name: name.into(),
                kind,
                centerline,
                parameters,
            },
        );
        Ok(id)
    }

    /// Adds a placeable symbol declaring the given instance parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open.
    pub fn add_symbol(
        &mut self,
        model: ModelId,
        category: Category,
        family: impl Into<String>,
        parameters: &[&str],
    ) -> Result<ElementId> {
        self.model(model)?;
        let id = self.alloc_id();
        self.model_mut(model)?.symbols.insert(
            id,
            SymbolData {
                category,
                family: family.into(),
                parameters: parameters.iter().map(|&p| p.to_owned()).collect(),
            },
        );
        Ok(id)
    }

    /// Adds a 3D view.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not open.
    pub fn add_view(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        is_template: bool,
    ) -> Result<ElementId> {
        self.model(model)?;
        let id = self.alloc_id();
        self.model_mut(model)?.views.insert(
            id,
            ViewData {
                name: name.into(),
                is_template,
                ..ViewData::default()
            },
        );
        Ok(id)
    }

    /// Hides `element` in `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or the view does not exist.
    pub fn hide_in_view(
        &mut self,
        model: ModelId,
        view: ElementId,
        element: ElementId,
    ) -> Result<()> {
        self.model_mut(model)?.view_mut(view)?.hidden.insert(element);
        Ok(())
    }

    /// Checks every request of `batch` against the active model.
    fn validate(&self, batch: &PlacementBatch) -> std::result::Result<(), String> {
        let model = self.active_model().map_err(|e| e.to_string())?;
        model.symbol(batch.symbol).map_err(|e| e.to_string())?;

        for (i, req) in batch.requests.iter().enumerate() {
            model
                .wall(req.host)
                .map_err(|e| format!("request {i}: {e}"))?;
            model
                .level(req.level)
                .map_err(|e| format!("request {i}: {e}"))?;
            let finite = req.position.coords.iter().all(|c| c.is_finite());
            if !finite {
                return Err(format!("request {i}: position is not finite"));
            }
            for (name, value) in [("width", req.width), ("height", req.height)] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(format!("request {i}: {name} {value} is not positive"));
                }
            }
        }
        Ok(())
    }
}

impl ModelLoader for MemoryHost {
    fn companion_model(&self, marker: &str) -> Result<ModelId> {
        self.models
            .iter()
            .find(|(id, model)| *id != self.active && model.title.contains(marker))
            .map(|(id, _)| id)
            .ok_or_else(|| {
                SetupError::ModelNotFound {
                    marker: marker.to_owned(),
                }
                .into()
            })
    }
}

impl SymbolLookup for MemoryHost {
    fn find_symbol(&self, category: Category, family: &str) -> Result<ElementId> {
        self.active_model()?
            .symbols
            .iter()
            .find(|(_, s)| s.category == category && s.family == family)
            .map(|(&id, _)| id)
            .ok_or_else(|| {
                SetupError::SymbolNotFound {
                    category: category.to_string(),
                    family: family.to_owned(),
                }
                .into()
            })
    }
}

impl ViewLookup for MemoryHost {
    fn default_3d_view(&self) -> Result<ElementId> {
        self.active_model()?
            .views
            .iter()
            .find(|(_, v)| !v.is_template)
            .map(|(&id, _)| id)
            .ok_or_else(|| SetupError::ViewNotFound.into())
    }
}

impl RunEnumerator for MemoryHost {
    fn runs(&self, model: ModelId, kind: RunKind) -> Result<Vec<Run>> {
        let runs = self
            .model(model)?
            .runs
            .iter()
            .filter(|(_, r)| r.kind == kind)
            .map(|(&id, r)| Run {
                id,
                name: r.name.clone(),
                kind,
                segment: r.centerline.clone(),
                section: CrossSection::read(kind, |name| r.parameters.get(name).copied()),
            })
            .collect();
        Ok(runs)
    }
}

impl CasterSource for MemoryHost {
    type Caster<'a> = WallRayCaster<'a>;

    fn ray_caster(&self, view: ElementId) -> Result<WallRayCaster<'_>> {
        let model = self.active_model()?;
        let view = model.view(view)?;
        Ok(WallRayCaster::new(model, &view.hidden))
    }
}

impl TargetLookup for MemoryHost {
    fn resolve_host(&self, target: &Target) -> Result<HostRef> {
        let model = self.active_model()?;
        let wall = model
            .walls
            .get(&target.element)
            .filter(|w| w.link == target.link)
            .ok_or_else(|| PierceError::TargetNotFound(format!("wall {}", target.element)))?;
        model
            .level(wall.level)
            .map_err(|_| PierceError::TargetNotFound(format!("level of wall {}", target.element)))?;
        Ok(HostRef {
            host: target.element,
            level: wall.level,
        })
    }
}

impl ModelMutator for MemoryHost {
    fn apply(&mut self, batch: &PlacementBatch) -> Result<usize> {
        if let Err(reason) = self.validate(batch) {
            tracing::warn!(label = %batch.label, %reason, "rolling back batch");
            return Err(PierceError::Mutation(format!("{}: {reason}", batch.label)));
        }

        let declared = self.active_model()?.symbol(batch.symbol)?.parameters.clone();
        let mut holes = Vec::with_capacity(batch.requests.len());
        for req in &batch.requests {
            let mut parameters = FxHashMap::default();
            for (name, value) in [
                (&batch.width_parameter, req.width),
                (&batch.height_parameter, req.height),
            ] {
                if declared.contains(name) {
                    parameters.insert(name.clone(), value);
                }
            }
            holes.push(HoleInstance {
                id: self.alloc_id(),
                symbol: batch.symbol,
                position: req.position,
                host: req.host,
                level: req.level,
                parameters,
            });
        }

        let created = holes.len();
        let active = self.active;
        let model = self.model_mut(active)?;
        model.holes.extend(holes);
        model.history.push(batch.label.clone());
        tracing::debug!(label = %batch.label, created, "batch committed");
        Ok(created)
    }
}
