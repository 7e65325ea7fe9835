use std::path::PathBuf;

use clap::Parser;

use crate::{
    calibration::{self, SampleSet},
    prelude::*,
};

#[derive(Parser)]
pub struct CalibrateArgs {
    /// TOML file with observed warm-up cycles.
    #[clap(long, env = "STAGGER_SAMPLES", default_value = "samples.toml")]
    pub samples: PathBuf,
}

#[instrument(skip_all)]
pub fn calibrate(args: &CalibrateArgs) -> Result {
    let raw = std::fs::read_to_string(&args.samples)
        .with_context(|| format!("failed to read the sample file `{}`", args.samples.display()))?;
    let sample_set: SampleSet = toml::from_str(&raw)
        .with_context(|| format!("failed to parse the sample file `{}`", args.samples.display()))?;

    let model = calibration::fit(&sample_set)?;
    info!(slope = model.slope, intercept = %model.intercept, "fitted");

    // Print a snippet ready to paste into a problem file:
    println!("[model]");
    println!("slope = {}", model.slope);
    println!("intercept = {}", model.intercept.0);
    Ok(())
}
