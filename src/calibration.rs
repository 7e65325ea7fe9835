use std::time::Instant;

use linfa::traits::Fit;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::{
    core::model::WarmupModel,
    prelude::*,
    quantity::{
        temperature::{Degrees, DegreesPerHour},
        time::{Hours, Minutes},
    },
};

/// One observed warm-up cycle.
#[derive(Copy, Clone, Deserialize)]
pub struct Sample {
    pub outside_temp: Degrees,
    pub desired_rise: Degrees,
    pub warmup_minutes: Minutes,
}

impl Sample {
    /// Observed warm-up rate of this cycle.
    fn warmup_rate(self) -> DegreesPerHour {
        DegreesPerHour(self.desired_rise.0 / Hours::from(self.warmup_minutes).0)
    }
}

/// Observed warm-up cycles to fit the model against.
#[derive(Deserialize)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
}

/// Fit the warm-up model's slope and intercept with least squares,
/// regressing the observed warm-up rate on the outside temperature.
#[instrument(skip_all)]
pub fn fit(sample_set: &SampleSet) -> Result<WarmupModel> {
    if sample_set.samples.len() < 2 {
        bail!("at least two samples are needed, collect more cycles first");
    }
    for (index, sample) in sample_set.samples.iter().enumerate() {
        ensure!(
            sample.desired_rise > Degrees::ZERO && sample.warmup_minutes > Minutes::ZERO,
            "sample #{index} has a non-positive rise or duration",
        );
    }

    let records = Array2::from_shape_vec(
        (sample_set.samples.len(), 1),
        sample_set.samples.iter().map(|sample| sample.outside_temp.0).collect(),
    )?;
    let targets =
        Array1::from_iter(sample_set.samples.iter().map(|sample| sample.warmup_rate().0));
    let dataset = linfa::Dataset::new(records, targets);

    info!(n_samples = sample_set.samples.len(), "fitting the warm-up model…");
    let start_time = Instant::now();
    let regression = LinearRegression::new()
        .with_intercept(true)
        .fit(&dataset)
        .context("failed to fit a regression, try again with more varied samples")?;
    info!(elapsed = ?start_time.elapsed(), "regression has been fit");

    let model =
        WarmupModel { slope: regression.params()[0], intercept: DegreesPerHour(regression.intercept()) };
    ensure!(
        model.slope.is_finite() && model.intercept.0.is_finite(),
        "degenerate fit: slope {}, intercept {}",
        model.slope,
        model.intercept,
    );
    Ok(model)
}
