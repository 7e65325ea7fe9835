use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    config::{Config, WindowConfig},
    core::{generate::generate_specs, model::WarmupModel},
    prelude::*,
    quantity::{
        power::Kilowatts,
        temperature::{Degrees, DegreesPerHour},
    },
};

#[derive(Parser)]
pub struct GenerateArgs {
    /// Number of units to generate.
    #[clap(long, default_value = "60", env = "STAGGER_N_UNITS")]
    pub n_units: u32,

    /// Seed for the unit generator: the same seed always yields the same fleet.
    #[clap(long, default_value = "42", env = "STAGGER_SEED")]
    pub seed: u64,

    /// Ambient outside temperature, in °F.
    #[clap(long = "outside-temp", default_value = "20.0", env = "STAGGER_OUTSIDE_TEMP")]
    pub outside_temp: Degrees,

    /// Warm-up model slope, in °F/h gained per °F outside.
    #[clap(long, default_value = "0.026", env = "STAGGER_MODEL_SLOPE")]
    pub slope: f64,

    /// Warm-up model intercept: the rate at 0 °F outside, in °F/h.
    #[clap(long, default_value = "7.25", env = "STAGGER_MODEL_INTERCEPT")]
    pub intercept: DegreesPerHour,

    /// Earliest moment a unit may be released.
    #[clap(long = "earliest-start", default_value = "03:00:00", env = "STAGGER_EARLIEST_START")]
    pub earliest_start: NaiveTime,

    /// Hard deadline by which warmed units must be ready.
    #[clap(long, default_value = "07:00:00", env = "STAGGER_DEADLINE")]
    pub deadline: NaiveTime,

    /// Facility peak-power cap, baseline included, in kilowatts.
    #[clap(long = "power-cap", default_value = "250.0", env = "STAGGER_POWER_CAP")]
    pub power_cap: Kilowatts,

    /// Pre-existing facility load, in kilowatts.
    #[clap(long, default_value = "50.0", env = "STAGGER_BASELINE")]
    pub baseline: Kilowatts,

    /// Where to write the problem file.
    #[clap(long, default_value = "problem.toml", env = "STAGGER_PROBLEM")]
    pub output: PathBuf,
}

#[instrument(skip_all)]
pub fn generate(args: &GenerateArgs) -> Result {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let config = Config {
        outside_temp: args.outside_temp,
        model: WarmupModel { slope: args.slope, intercept: args.intercept },
        window: WindowConfig {
            earliest_start: args.earliest_start,
            deadline: args.deadline,
            power_cap: args.power_cap,
            baseline: args.baseline,
        },
        units: generate_specs(&mut rng, args.n_units),
    };
    config.store(&args.output)?;
    info!(n_units = args.n_units, seed = args.seed, output = %args.output.display(), "generated");
    Ok(())
}
