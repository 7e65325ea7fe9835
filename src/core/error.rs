use crate::{
    core::fleet::UnitId,
    quantity::{
        power::Kilowatts,
        temperature::{Degrees, DegreesPerHour},
    },
};

/// Scheduling failure.
///
/// Every variant is fatal to the current run: the optimizer is deterministic and pure,
/// so nothing is retried and there is no partial-success mode. Each variant carries
/// enough context to diagnose the offending configuration.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ScheduleError {
    /// The warm-up model cannot produce a positive, finite duration:
    /// either the desired rise is not positive, or the calibration constants
    /// yield a non-positive warm-up rate at the given outside temperature.
    #[display(
        "invalid model input for unit {unit_id}: desired rise {desired_rise}, warm-up rate {warmup_rate}"
    )]
    InvalidModelInput { unit_id: UnitId, desired_rise: Degrees, warmup_rate: DegreesPerHour },

    /// The unit specification carries a non-positive power draw.
    #[display("invalid specification for unit {unit_id}: power draw {power_draw} is not positive")]
    InvalidUnitSpec { unit_id: UnitId, power_draw: Kilowatts },

    /// The configured budgets would require an unreasonably large grid.
    /// Raised by the pre-check, before any fill work is done.
    #[display("feasibility grid of {n_cells} cells exceeds the {max_cells}-cell bound")]
    GridTooLarge { n_cells: usize, max_cells: usize },

    /// The baseline load already exceeds the peak-power cap.
    #[display("baseline load {baseline} exceeds the power cap {power_cap}")]
    InvalidWindow { baseline: Kilowatts, power_cap: Kilowatts },
}
