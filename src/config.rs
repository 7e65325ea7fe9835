use std::path::Path;

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{
    core::{fleet::UnitSpec, model::WarmupModel},
    prelude::*,
    quantity::{power::Kilowatts, temperature::Degrees, time::Minutes},
};

/// One scheduling problem: the model constants, the window, and the fleet.
#[derive(Serialize, Deserialize)]
pub struct Config {
    /// Ambient outside temperature shared by all units, in °F.
    pub outside_temp: Degrees,

    pub model: WarmupModel,
    pub window: WindowConfig,
    pub units: Vec<UnitSpec>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read the problem file `{}`", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse the problem file `{}`", path.display()))
    }

    pub fn store(&self, path: &Path) -> Result {
        let raw = toml::to_string_pretty(self).context("failed to serialize the problem")?;
        std::fs::write(path, raw)
            .with_context(|| format!("failed to write the problem file `{}`", path.display()))
    }
}

/// The scheduling window and the facility power limits.
#[derive(Copy, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Earliest moment a unit may be released.
    pub earliest_start: NaiveTime,

    /// Hard deadline by which warmed units must be ready.
    pub deadline: NaiveTime,

    /// Facility peak-power cap, baseline included.
    pub power_cap: Kilowatts,

    /// Pre-existing facility load.
    pub baseline: Kilowatts,
}

impl WindowConfig {
    /// Span between the earliest allowed start and the deadline.
    ///
    /// A deadline at or before the earliest start is taken to mean the next day.
    pub fn time_budget(&self) -> Minutes {
        let span = self.deadline.signed_duration_since(self.earliest_start);
        if span > TimeDelta::zero() { span.into() } else { (span + TimeDelta::days(1)).into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fleet::UnitId;

    const PROBLEM: &str = r#"
        outside_temp = 20.0

        [model]
        slope = 0.026
        intercept = 7.25

        [window]
        earliest_start = "03:00:00"
        deadline = "07:00:00"
        power_cap = 250.0
        baseline = 50.0

        [[units]]
        id = 1
        power_draw = 6.0
        desired_rise = 12.5

        [[units]]
        id = 2
        power_draw = 3.0
        desired_rise = 8.0
    "#;

    #[test]
    fn parses_a_problem_file() {
        let config: Config = toml::from_str(PROBLEM).unwrap();
        assert_eq!(config.outside_temp, Degrees(20.0));
        assert_eq!(config.model.slope, 0.026);
        assert_eq!(config.window.time_budget(), Minutes(240.0));
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[1].id, UnitId(2));
        assert_eq!(config.units[1].power_draw, Kilowatts(3.0));
    }

    #[test]
    fn overnight_window_wraps() {
        let window = WindowConfig {
            earliest_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            deadline: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            power_cap: Kilowatts(100.0),
            baseline: Kilowatts(0.0),
        };
        assert_eq!(window.time_budget(), Minutes(480.0));
    }
}
