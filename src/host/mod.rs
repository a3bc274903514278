//! Contracts of the building-model host the placement pass talks to.
//!
//! Everything outside ray-crossing deduplication and opening sizing lives
//! behind these traits: finding the companion model, the opening symbol and a
//! 3D view, enumerating runs, the host's ray primitive, resolving a wall's
//! level and committing the new openings.

pub mod memory;

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::model::{
    Category, ElementId, HostRef, ModelId, PlacementBatch, RawCrossing, Run, RunKind, Target,
};

/// The host's ray-intersection primitive, pre-filtered to penetrable targets.
///
/// Results come back in no particular order and may report one target
/// several times (once per face struck).
pub trait RayCaster {
    /// Casts an unbounded ray from `origin` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry kernel fails.
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Result<Vec<RawCrossing>>;
}

impl<F> RayCaster for F
where
    F: Fn(&Point3, &Vector3) -> Result<Vec<RawCrossing>>,
{
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Result<Vec<RawCrossing>> {
        self(origin, direction)
    }
}

/// Finds the companion model holding the runs.
pub trait ModelLoader {
    /// Returns the first open model, other than the active one, whose title
    /// contains `marker`.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::ModelNotFound` if there is none.
    fn companion_model(&self, marker: &str) -> Result<ModelId>;
}

/// Finds placeable symbols in the active model.
pub trait SymbolLookup {
    /// # Errors
    ///
    /// Returns `SetupError::SymbolNotFound` if no symbol matches.
    fn find_symbol(&self, category: Category, family: &str) -> Result<ElementId>;
}

/// Finds the view ray casts are evaluated in.
pub trait ViewLookup {
    /// Returns the first 3D view that is not a template.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::ViewNotFound` if there is none.
    fn default_3d_view(&self) -> Result<ElementId>;
}

/// Lists linear mechanical elements.
pub trait RunEnumerator {
    /// # Errors
    ///
    /// Returns an error if the model cannot be read or a run's centerline is
    /// not a straight segment.
    fn runs(&self, model: ModelId, kind: RunKind) -> Result<Vec<Run>>;
}

/// Produces ray casters bound to a view.
pub trait CasterSource {
    type Caster<'a>: RayCaster
    where
        Self: 'a;

    /// Returns a caster that only sees walls visible in `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the view does not exist.
    fn ray_caster(&self, view: ElementId) -> Result<Self::Caster<'_>>;
}

/// Resolves a crossed target to the wall hosting the opening.
pub trait TargetLookup {
    /// # Errors
    ///
    /// Returns `PierceError::TargetNotFound` if the wall or its level is gone.
    fn resolve_host(&self, target: &Target) -> Result<HostRef>;
}

/// Commits openings to the active model.
pub trait ModelMutator {
    /// Creates every request of `batch` in one atomic change and returns the
    /// number of instances created. On error nothing from the batch remains.
    ///
    /// # Errors
    ///
    /// Returns `PierceError::Mutation` if any request is rejected.
    fn apply(&mut self, batch: &PlacementBatch) -> Result<usize>;
}

/// Everything a full pass needs from the host.
pub trait Host:
    ModelLoader + SymbolLookup + ViewLookup + RunEnumerator + CasterSource + TargetLookup + ModelMutator
{
}

impl<T> Host for T where
    T: ModelLoader
        + SymbolLookup
        + ViewLookup
        + RunEnumerator
        + CasterSource
        + TargetLookup
        + ModelMutator
{
}
