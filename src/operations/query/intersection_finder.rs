use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::geometry::Segment;
use crate::host::RayCaster;
use crate::model::{Crossing, RawCrossing, TargetKey};

/// Finds the walls a run's centerline passes through.
///
/// The ray primitive reports every face it meets along an unbounded ray.
/// This query keeps only hits within the segment and collapses the reports
/// of one physical target (near face, far face, repeated links) into a
/// single crossing.
#[derive(Debug)]
pub struct IntersectionFinder<'a> {
    segment: &'a Segment,
}

impl<'a> IntersectionFinder<'a> {
    /// Creates a new query along `segment`.
    #[must_use]
    pub fn new(segment: &'a Segment) -> Self {
        Self { segment }
    }

    /// Casts along the segment and returns one crossing per distinct target,
    /// sorted by ascending proximity.
    ///
    /// Each target is represented by its nearest report, which is the face
    /// where the run enters it.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `caster` unchanged.
    pub fn find<C: RayCaster + ?Sized>(&self, caster: &C) -> Result<Vec<Crossing>> {
        let length = self.segment.length();
        if length <= 0.0 {
            return Ok(Vec::new());
        }

        let raw = caster.cast(self.segment.origin(), self.segment.direction())?;
        let raw_count = raw.len();

        let crossings = dedup_nearest(raw.into_iter().filter(|hit| in_range(hit, length)));

        tracing::trace!(
            raw = raw_count,
            distinct = crossings.len(),
            length,
            "ray cast along segment"
        );
        Ok(crossings)
    }
}

/// `0 <= proximity <= length`; NaN never passes.
fn in_range(hit: &RawCrossing, length: f64) -> bool {
    (0.0..=length).contains(&hit.proximity)
}

/// Groups hits by target key, keeps the minimum-proximity hit of each group
/// and sorts the survivors by proximity, then key.
fn dedup_nearest(hits: impl IntoIterator<Item = RawCrossing>) -> Vec<Crossing> {
    let mut nearest: FxHashMap<TargetKey, RawCrossing> = FxHashMap::default();
    for hit in hits {
        nearest
            .entry(hit.target.key())
            .and_modify(|kept| {
                if hit.proximity < kept.proximity {
                    *kept = hit;
                }
            })
            .or_insert(hit);
    }

    let mut crossings: Vec<Crossing> = nearest
        .into_values()
        .map(|hit| Crossing {
            target: hit.target,
            proximity: hit.proximity,
        })
        .collect();
    crossings.sort_by(|a, b| {
        a.proximity
            .total_cmp(&b.proximity)
            .then_with(|| a.target.key().cmp(&b.target.key()))
    });
    crossings
}
