use crate::math::units::LengthUnit;
use crate::model::Category;

/// Settings of a placement pass.
///
/// The defaults reproduce the conventions of the projects the tool was
/// written for: the mechanical model carries "ОВ" in its title and the
/// opening family is a generic model named "Отверстие" with "Ширина" and
/// "Высота" size parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Substring identifying the companion (mechanical) model by title.
    pub source_marker: String,
    /// Category of the opening symbol.
    pub hole_category: Category,
    /// Family name of the opening symbol.
    pub hole_family: String,
    /// Instance parameter receiving the opening width.
    pub width_parameter: String,
    /// Instance parameter receiving the opening height.
    pub height_parameter: String,
    /// Margin added once to each opening dimension, in `clearance_unit`.
    pub clearance: f64,
    pub clearance_unit: LengthUnit,
    /// Unit of model coordinates.
    pub internal_unit: LengthUnit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_marker: "ОВ".to_owned(),
            hole_category: Category::GenericModel,
            hole_family: "Отверстие".to_owned(),
            width_parameter: "Ширина".to_owned(),
            height_parameter: "Высота".to_owned(),
            clearance: 50.0,
            clearance_unit: LengthUnit::Millimeters,
            internal_unit: LengthUnit::Feet,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_source_marker(mut self, marker: impl Into<String>) -> Self {
        self.source_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_hole_family(mut self, family: impl Into<String>) -> Self {
        self.hole_family = family.into();
        self
    }

    #[must_use]
    pub fn with_size_parameters(
        mut self,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        self.width_parameter = width.into();
        self.height_parameter = height.into();
        self
    }

    #[must_use]
    pub fn with_clearance(mut self, clearance: f64, unit: LengthUnit) -> Self {
        self.clearance = clearance;
        self.clearance_unit = unit;
        self
    }

    #[must_use]
    pub fn with_internal_unit(mut self, unit: LengthUnit) -> Self {
        self.internal_unit = unit;
        self
    }

    /// Clearance expressed in model units.
    #[must_use]
    pub fn clearance_internal(&self) -> f64 {
        self.clearance_unit.convert(self.clearance, self.internal_unit)
    }
}
