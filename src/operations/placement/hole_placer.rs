use crate::config::Config;
use crate::error::{PierceError, Result};
use crate::model::{Crossing, HostRef, PlacementRequest, Run};

/// Sizes and positions an opening for one crossing.
///
/// The opening is the run's outer envelope plus `clearance`, added once to
/// the width and once to the height.
#[derive(Debug, Clone, Copy)]
pub struct HolePlacer {
    clearance: f64,
}

impl HolePlacer {
    /// Creates a placer adding `clearance` (in model units).
    #[must_use]
    pub fn new(clearance: f64) -> Self {
        Self { clearance }
    }

    /// Creates a placer using the configured clearance.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.clearance_internal())
    }

    #[must_use]
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Builds the placement request for `crossing` on `run`, hosted by `host`.
    ///
    /// # Errors
    ///
    /// Returns `PierceError::MissingDimension` if the run has neither a
    /// diameter nor both a width and a height.
    pub fn place(&self, crossing: &Crossing, run: &Run, host: HostRef) -> Result<PlacementRequest> {
        let envelope = run
            .section
            .envelope()
            .ok_or_else(|| PierceError::MissingDimension { run: run.label() })?;

        Ok(PlacementRequest {
            position: run.segment.point_at(crossing.proximity),
            host: host.host,
            level: host.level,
            width: envelope.width + self.clearance,
            height: envelope.height + self.clearance,
        })
    }
}
