use std::fmt;

slotmap::new_key_type! {
    /// Handle of an open model (document) in the host session.
    pub struct ModelId;
}

/// Host-stable identifier of an element inside one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Identifier of a linked container model instance.
///
/// Elements reached through a link are distinguished from elements of the
/// host model (and from the same element seen through another link) by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// Element categories the placement pass filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Walls,
    GenericModel,
    DuctCurves,
    PipeCurves,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Walls => "Walls",
            Self::GenericModel => "Generic Model",
            Self::DuctCurves => "Duct Curves",
            Self::PipeCurves => "Pipe Curves",
        };
        f.write_str(name)
    }
}
