use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::Config,
    core::{fleet::Fleet, solver::Solver},
    prelude::*,
    tables::{build_schedule_table, build_summary_table},
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Problem file with the model constants, the window, and the fleet.
    #[clap(long, env = "STAGGER_PROBLEM", default_value = "problem.toml")]
    pub problem: PathBuf,

    /// Also write the schedule as JSON to the given path.
    #[clap(long, env = "STAGGER_OUTPUT")]
    pub output: Option<PathBuf>,
}

#[instrument(skip_all)]
pub fn plan(args: &PlanArgs) -> Result {
    let config = Config::load(&args.problem)?;
    let fleet = Fleet::try_new(&config.units, config.outside_temp, &config.model)?;
    if fleet.is_empty() {
        warn!("the problem file lists no units");
    }
    info!(
        n_units = fleet.len(),
        outside_temp = %config.outside_temp,
        time_budget = %config.window.time_budget(),
        "loaded the problem",
    );

    let schedule = Solver::builder()
        .fleet(&fleet)
        .time_budget(config.window.time_budget())
        .power_cap(config.window.power_cap)
        .baseline(config.window.baseline)
        .build()
        .solve()?;
    schedule.trace();

    println!("{}", build_schedule_table(&schedule, &fleet, &config.window));
    println!("{}", build_summary_table(&schedule, &fleet, &config.window));

    if let Some(output) = &args.output {
        let json =
            serde_json::to_string_pretty(&schedule).context("failed to serialize the schedule")?;
        std::fs::write(output, json)
            .with_context(|| format!("failed to write the schedule to `{}`", output.display()))?;
        info!(output = %output.display(), "schedule written");
    }

    Ok(())
}
