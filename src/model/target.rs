use super::ids::{ElementId, LinkId};

/// A penetrable surface as reported by the host's ray primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    /// Linked container the element was reached through, if any.
    pub link: Option<LinkId>,
    /// The element itself.
    pub element: ElementId,
}

/// Identity of a physical target. Reports from different faces of the same
/// element share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetKey {
    pub link: Option<LinkId>,
    pub element: ElementId,
}

impl Target {
    /// Creates a target in the host model itself.
    #[must_use]
    pub fn local(element: ElementId) -> Self {
        Self { link: None, element }
    }

    /// Creates a target reached through `link`.
    #[must_use]
    pub fn linked(link: LinkId, element: ElementId) -> Self {
        Self {
            link: Some(link),
            element,
        }
    }

    /// Returns the grouping key used for deduplication.
    #[must_use]
    pub fn key(&self) -> TargetKey {
        TargetKey {
            link: self.link,
            element: self.element,
        }
    }
}

/// One raw intersection record: the ray met `target` at `proximity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCrossing {
    pub target: Target,
    pub proximity: f64,
}

impl RawCrossing {
    #[must_use]
    pub fn new(target: Target, proximity: f64) -> Self {
        Self { target, proximity }
    }
}

/// A validated, deduplicated crossing of a run through a target.
///
/// `proximity` lies within `[0, length]` of the segment it was found on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub target: Target,
    pub proximity: f64,
}
