use std::fmt;

use crate::geometry::Segment;

use super::ids::{Category, ElementId};

pub const CURVE_DIAMETER_PARAM: &str = "RBS_CURVE_DIAMETER_PARAM";
pub const PIPE_DIAMETER_PARAM: &str = "RBS_PIPE_DIAMETER_PARAM";
pub const CURVE_WIDTH_PARAM: &str = "RBS_CURVE_WIDTH_PARAM";
pub const CURVE_HEIGHT_PARAM: &str = "RBS_CURVE_HEIGHT_PARAM";

/// The kinds of linear mechanical element a pass scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    /// Round or rectangular duct.
    Duct,
    /// Pipe (always round).
    Pipe,
}

impl RunKind {
    /// All kinds, in the order a pass processes them.
    pub const ALL: [RunKind; 2] = [RunKind::Duct, RunKind::Pipe];

    /// Host category holding elements of this kind.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Duct => Category::DuctCurves,
            Self::Pipe => Category::PipeCurves,
        }
    }

    /// Name of the diameter parameter.
    #[must_use]
    pub fn diameter_parameter(self) -> &'static str {
        match self {
            Self::Duct => CURVE_DIAMETER_PARAM,
            Self::Pipe => PIPE_DIAMETER_PARAM,
        }
    }

    /// Names of the width and height parameters, for kinds that can be
    /// rectangular.
    #[must_use]
    pub fn rectangular_parameters(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Duct => Some((CURVE_WIDTH_PARAM, CURVE_HEIGHT_PARAM)),
            Self::Pipe => None,
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duct => f.write_str("duct"),
            Self::Pipe => f.write_str("pipe"),
        }
    }
}

/// Sizing data read from a run's parameters.
///
/// A diameter wins when present; otherwise both width and height are needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossSection {
    pub diameter: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Outer width and height of a cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub width: f64,
    pub height: f64,
}

impl CrossSection {
    #[must_use]
    pub fn round(diameter: f64) -> Self {
        Self {
            diameter: Some(diameter),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self {
            diameter: None,
            width: Some(width),
            height: Some(height),
        }
    }

    /// A section with no sizing data at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads the section of a `kind` run through a parameter getter.
    #[must_use]
    pub fn read(kind: RunKind, param: impl Fn(&str) -> Option<f64>) -> Self {
        let diameter = param(kind.diameter_parameter());
        let (width, height) = kind
            .rectangular_parameters()
            .map_or((None, None), |(w, h)| (param(w), param(h)));
        Self {
            diameter,
            width,
            height,
        }
    }

    /// Returns the outer envelope, or `None` when the data is incomplete.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        if let Some(d) = self.diameter {
            return Some(Envelope {
                width: d,
                height: d,
            });
        }
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Envelope { width, height }),
            _ => None,
        }
    }
}

/// One linear mechanical element, ready to be cast.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: ElementId,
    pub name: String,
    pub kind: RunKind,
    pub segment: Segment,
    pub section: CrossSection,
}

impl Run {
    /// Label used in diagnostics: the name and id.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.id)
    }
}
