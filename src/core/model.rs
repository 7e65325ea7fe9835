use serde::{Deserialize, Serialize};

use crate::{
    core::{error::ScheduleError, fleet::UnitId},
    quantity::{
        temperature::{Degrees, DegreesPerHour},
        time::Minutes,
    },
};

/// Linear warm-up rate model: `rate = slope × outside temperature + intercept`.
///
/// The slope and intercept are calibration constants supplied by configuration
/// or fitted from observations, never hard-coded.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarmupModel {
    /// Warm-up rate gained per degree of outside temperature, in °F/h per °F.
    pub slope: f64,

    /// Warm-up rate at 0 °F outside.
    pub intercept: DegreesPerHour,
}

impl WarmupModel {
    /// Warm-up rate at the given outside temperature.
    pub fn warmup_rate(&self, outside_temp: Degrees) -> DegreesPerHour {
        DegreesPerHour(self.slope * outside_temp.0 + self.intercept.0)
    }

    /// Time needed for the unit to achieve the desired temperature rise.
    ///
    /// Pure and deterministic. The unit identifier is only used for error context.
    pub fn warmup_time(
        &self,
        unit_id: UnitId,
        desired_rise: Degrees,
        outside_temp: Degrees,
    ) -> Result<Minutes, ScheduleError> {
        let warmup_rate = self.warmup_rate(outside_temp);
        // The quantities order NaN above zero, so finiteness needs its own check:
        if !desired_rise.0.is_finite()
            || desired_rise <= Degrees::ZERO
            || !warmup_rate.0.is_finite()
            || warmup_rate <= DegreesPerHour::ZERO
        {
            return Err(ScheduleError::InvalidModelInput { unit_id, desired_rise, warmup_rate });
        }
        Ok(Minutes::from(desired_rise / warmup_rate))
    }
}
