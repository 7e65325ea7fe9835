use rand::{Rng, seq::IndexedRandom};

use crate::{
    core::fleet::{UnitId, UnitSpec},
    quantity::{power::Kilowatts, temperature::Degrees},
};

/// Power ratings the generated units draw from.
const POWER_CHOICES: [Kilowatts; 2] = [Kilowatts(3.0), Kilowatts(6.0)];

/// Desired temperature rises are drawn uniformly from this range, in °F.
const RISE_RANGE: std::ops::Range<f64> = 5.0..15.0;

/// Generate a randomized fleet of unit specifications.
///
/// The random source is injected by the caller, so a fixed seed always produces the
/// same fleet and no process-wide state is involved.
pub fn generate_specs(rng: &mut impl Rng, n_units: u32) -> Vec<UnitSpec> {
    (1..=n_units)
        .map(|id| UnitSpec {
            id: UnitId(id),
            power_draw: *POWER_CHOICES.choose(rng).unwrap_or(&POWER_CHOICES[0]),
            desired_rise: Degrees(rng.random_range(RISE_RANGE)),
        })
        .collect()
}
