//! Alcohol calculator trait

/// Errors reported by the alcohol calculator
///
/// Any of these means "no estimate right now"; the display blanks the
/// field instead of showing a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalcError {
    /// Temperature outside the range covered by the lookup tables
    OutOfRange,
    /// Estimate not available for the current configuration
    Unsupported,
}

/// Estimates alcohol content from boiling and vapour temperatures
///
/// The formulas live with the controller; the front panel only consumes
/// the results.
pub trait AlcoholCalculator {
    /// ABV (%) of the vapour at the still head
    fn abv_from_head_vapour_temperature(&self, temp_c: f32) -> Result<f32, CalcError>;

    /// Alcohol left in the wash (litres) for a tank of `tank_size_l` litres
    fn alcohol_volume_from_wash_boiling_temperature(
        &self,
        temp_c: f32,
        tank_size_l: f32,
    ) -> Result<f32, CalcError>;
}

impl<T: AlcoholCalculator + ?Sized> AlcoholCalculator for &T {
    fn abv_from_head_vapour_temperature(&self, temp_c: f32) -> Result<f32, CalcError> {
        (**self).abv_from_head_vapour_temperature(temp_c)
    }

    fn alcohol_volume_from_wash_boiling_temperature(
        &self,
        temp_c: f32,
        tank_size_l: f32,
    ) -> Result<f32, CalcError> {
        (**self).alcohol_volume_from_wash_boiling_temperature(temp_c, tank_size_l)
    }
}
