//! Discretization of the two resource axes.
//!
//! The feasibility grid is indexed on whole minutes and whole kilowatts, so every
//! continuous quantity must pass through one of the named conversions below. The
//! rounding direction is part of the contract:
//!
//! - Warm-up durations are **truncated** to whole minutes: a 12.8-minute warm-up
//!   consumes 12 minutes of the time axis. This reproduces the original calibration
//!   tooling and is a documented source of approximation.
//! - Unit power draws are **rounded up** to whole kilowatts, so the grid never
//!   understates a draw against the cap. The cap itself is rounded down and the
//!   baseline load up, both on the conservative side.

use std::fmt::{Debug, Formatter};

use crate::quantity::{power::Kilowatts, time::Minutes};

/// Discrete position on the time axis of the feasibility grid, in whole minutes.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct TimeLevel(pub usize);

impl Debug for TimeLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.0)
    }
}

impl TimeLevel {
    /// Truncate the duration to whole minutes.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    pub fn floor_from(minutes: Minutes) -> Self {
        debug_assert!(minutes >= Minutes::ZERO);
        Self(minutes.0.floor() as usize)
    }

    /// Convert the grid position back to conventional minutes.
    #[expect(clippy::cast_precision_loss)]
    pub fn to_minutes(self) -> Minutes {
        Minutes(self.0 as f64)
    }
}

/// Discrete position on the power axis of the feasibility grid, in whole kilowatts.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct PowerLevel(pub usize);

impl Debug for PowerLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kW", self.0)
    }
}

impl PowerLevel {
    /// Round the power down to whole kilowatts.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    pub fn floor_from(power: Kilowatts) -> Self {
        debug_assert!(power >= Kilowatts::ZERO);
        Self(power.0.floor() as usize)
    }

    /// Round the power up to whole kilowatts.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    pub fn ceil_from(power: Kilowatts) -> Self {
        debug_assert!(power >= Kilowatts::ZERO);
        Self(power.0.ceil() as usize)
    }

    /// Convert the grid position back to conventional kilowatts.
    #[expect(clippy::cast_precision_loss)]
    pub fn to_kilowatts(self) -> Kilowatts {
        Kilowatts(self.0 as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_truncate() {
        assert_eq!(TimeLevel::floor_from(Minutes(12.8)), TimeLevel(12));
        assert_eq!(TimeLevel::floor_from(Minutes(12.0)), TimeLevel(12));
    }

    #[test]
    fn draws_round_up() {
        assert_eq!(PowerLevel::ceil_from(Kilowatts(3.0)), PowerLevel(3));
        assert_eq!(PowerLevel::ceil_from(Kilowatts(3.2)), PowerLevel(4));
    }

    #[test]
    fn caps_round_down() {
        assert_eq!(PowerLevel::floor_from(Kilowatts(9.9)), PowerLevel(9));
    }
}
