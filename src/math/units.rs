/// Length units understood by [`LengthUnit::convert`].
///
/// Model coordinates are stored in an internal unit (decimal feet for the
/// common BIM hosts); user-facing sizes such as the clearance are written in
/// millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeters,
    Meters,
    Feet,
}

impl LengthUnit {
    /// Length of one unit expressed in millimeters.
    #[must_use]
    pub fn in_millimeters(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Meters => 1000.0,
            Self::Feet => 304.8,
        }
    }

    /// Converts `value` from `self` into `target`.
    #[must_use]
    pub fn convert(self, value: f64, target: LengthUnit) -> f64 {
        if self == target {
            return value;
        }
        value * self.in_millimeters() / target.in_millimeters()
    }
}
