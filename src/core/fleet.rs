use serde::{Deserialize, Serialize};

use crate::{
    core::{
        error::ScheduleError,
        level::{PowerLevel, TimeLevel},
        model::WarmupModel,
    },
    prelude::*,
    quantity::{power::Kilowatts, temperature::Degrees, time::Minutes},
};

/// Stable unit identifier assigned at registration.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
pub struct UnitId(pub u32);

/// Raw unit specification as supplied by configuration or generation.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: UnitId,

    /// Power drawn while warming, in kilowatts.
    pub power_draw: Kilowatts,

    /// Temperature rise the unit must achieve, in °F.
    pub desired_rise: Degrees,
}

/// Fully-populated schedulable unit. Read-only for the remainder of a run.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub power_draw: Kilowatts,
    pub desired_rise: Degrees,

    /// Derived once from the desired rise and the ambient outside temperature.
    pub warmup_time: Minutes,
}

impl Unit {
    /// Whole minutes of the time axis this unit consumes.
    pub fn time_level(&self) -> TimeLevel {
        TimeLevel::floor_from(self.warmup_time)
    }

    /// Whole kilowatts of the power axis this unit consumes.
    pub fn power_level(&self) -> PowerLevel {
        PowerLevel::ceil_from(self.power_draw)
    }
}

/// The set of schedulable units for one run.
#[must_use]
#[derive(Debug)]
pub struct Fleet {
    units: Vec<Unit>,
}

impl Fleet {
    /// Validate the specifications and derive each unit's warm-up time.
    ///
    /// Fails on the first offending unit: silently skipping a unit would change the
    /// optimization semantics, so the whole run is aborted instead.
    pub fn try_new(
        specs: &[UnitSpec],
        outside_temp: Degrees,
        model: &WarmupModel,
    ) -> Result<Self, ScheduleError> {
        let units = specs
            .iter()
            .map(|spec| {
                if !spec.power_draw.0.is_finite() || spec.power_draw <= Kilowatts::ZERO {
                    return Err(ScheduleError::InvalidUnitSpec {
                        unit_id: spec.id,
                        power_draw: spec.power_draw,
                    });
                }
                let warmup_time = model.warmup_time(spec.id, spec.desired_rise, outside_temp)?;
                Ok(Unit {
                    id: spec.id,
                    power_draw: spec.power_draw,
                    desired_rise: spec.desired_rise,
                    warmup_time,
                })
            })
            .collect::<Result<Vec<Unit>, ScheduleError>>()?;
        debug!(n_units = units.len(), "fleet registered");
        Ok(Self { units })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::quantity::temperature::DegreesPerHour;

    /// With a zero slope and a 60 °F/h intercept, the warm-up time in minutes equals
    /// the desired rise in degrees, which keeps the arithmetic obvious.
    fn minute_per_degree_model() -> WarmupModel {
        WarmupModel { slope: 0.0, intercept: DegreesPerHour(60.0) }
    }

    #[test]
    fn registration_derives_warmup_times() {
        let specs = [
            UnitSpec { id: UnitId(1), power_draw: Kilowatts(3.0), desired_rise: Degrees(10.0) },
            UnitSpec { id: UnitId(2), power_draw: Kilowatts(6.0), desired_rise: Degrees(20.0) },
        ];
        let fleet = Fleet::try_new(&specs, Degrees(20.0), &minute_per_degree_model()).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_relative_eq!(fleet.units()[0].warmup_time.0, 10.0);
        assert_relative_eq!(fleet.units()[1].warmup_time.0, 20.0);
    }

    /// NaN orders above zero through `OrderedFloat`, so a plain `<=` check would let a
    /// NaN draw through and the grid would then charge it as zero kilowatts.
    #[test]
    fn non_finite_power_draw_fails() {
        for power_draw in [f64::NAN, f64::INFINITY] {
            let specs = [UnitSpec {
                id: UnitId(7),
                power_draw: Kilowatts(power_draw),
                desired_rise: Degrees(10.0),
            }];
            let error =
                Fleet::try_new(&specs, Degrees(20.0), &minute_per_degree_model()).unwrap_err();
            assert!(matches!(error, ScheduleError::InvalidUnitSpec { unit_id: UnitId(7), .. }));
        }
    }

    #[test]
    fn non_positive_power_draw_fails() {
        let specs =
            [UnitSpec { id: UnitId(7), power_draw: Kilowatts(0.0), desired_rise: Degrees(10.0) }];
        let error =
            Fleet::try_new(&specs, Degrees(20.0), &minute_per_degree_model()).unwrap_err();
        assert!(matches!(error, ScheduleError::InvalidUnitSpec { unit_id: UnitId(7), .. }));
    }
}
