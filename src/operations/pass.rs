use crate::config::Config;
use crate::error::Result;
use crate::host::Host;
use crate::model::{ElementId, ModelId, PlacementBatch, RunKind};

use super::placement::HolePlacer;
use super::query::IntersectionFinder;

/// Counts for one run kind of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindReport {
    pub kind: RunKind,
    /// Runs enumerated in the companion model.
    pub runs: usize,
    /// Distinct wall crossings found across those runs.
    pub crossings: usize,
    /// Openings the host reported as created.
    pub placed: usize,
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub kinds: Vec<KindReport>,
}

impl PassReport {
    /// Total openings created.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.kinds.iter().map(|k| k.placed).sum()
    }

    /// Counts for `kind`, if it was processed.
    #[must_use]
    pub fn kind(&self, kind: RunKind) -> Option<&KindReport> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}

/// Places an opening wherever a duct or pipe of the companion model crosses
/// a wall of the active model.
///
/// The companion model, opening symbol and 3D view are resolved before any
/// geometry is touched; if one is missing the pass aborts without changing
/// anything. Each run kind is then committed as its own atomic batch, ducts
/// first. An error while building a batch (a run without dimensions, an
/// unresolvable wall, a kernel failure) discards that batch and ends the
/// pass; batches of kinds already processed stay committed.
#[derive(Debug)]
pub struct HolePass<'a> {
    config: &'a Config,
}

impl<'a> HolePass<'a> {
    /// Creates a new pass with the given settings.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Runs the pass against `host`.
    ///
    /// # Errors
    ///
    /// Returns a `SetupError` if the companion model, the opening symbol or a
    /// 3D view cannot be found, and propagates the first error raised while
    /// building or applying a batch.
    pub fn execute<H: Host>(&self, host: &mut H) -> Result<PassReport> {
        let source = host.companion_model(&self.config.source_marker)?;
        let symbol = host.find_symbol(self.config.hole_category, &self.config.hole_family)?;
        let view = host.default_3d_view()?;
        tracing::info!(
            marker = %self.config.source_marker,
            family = %self.config.hole_family,
            symbol = %symbol,
            view = %view,
            "starting hole placement pass"
        );

        let placer = HolePlacer::from_config(self.config);
        let mut report = PassReport::default();

        for kind in RunKind::ALL {
            let (batch, runs, crossings) =
                self.build_batch(host, source, symbol, view, kind, placer)?;

            let placed = if batch.requests.is_empty() {
                tracing::debug!(%kind, runs, "no crossings, nothing to apply");
                0
            } else {
                host.apply(&batch)?
            };
            tracing::info!(%kind, runs, crossings, placed, "run kind done");

            report.kinds.push(KindReport {
                kind,
                runs,
                crossings,
                placed,
            });
        }

        Ok(report)
    }

    /// Casts every run of `kind` and collects its placements. Returns the
    /// batch with the number of runs and crossings seen.
    fn build_batch<H: Host>(
        &self,
        host: &H,
        source: ModelId,
        symbol: ElementId,
        view: ElementId,
        kind: RunKind,
        placer: HolePlacer,
    ) -> Result<(PlacementBatch, usize, usize)> {
        let caster = host.ray_caster(view)?;
        let runs = host.runs(source, kind)?;
        let mut requests = Vec::new();
        let mut crossings = 0;

        for run in &runs {
            let found = IntersectionFinder::new(&run.segment).find(&caster)?;
            tracing::debug!(run = %run.label(), crossings = found.len(), "run cast");
            crossings += found.len();

            for crossing in &found {
                let host_ref = host.resolve_host(&crossing.target)?;
                requests.push(placer.place(crossing, run, host_ref)?);
            }
        }

        let batch = PlacementBatch {
            label: format!("adding holes for {kind}"),
            symbol,
            width_parameter: self.config.width_parameter.clone(),
            height_parameter: self.config.height_parameter.clone(),
            requests,
        };
        Ok((batch, runs.len(), crossings))
    }
}
