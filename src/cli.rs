mod calibrate;
mod generate;
mod plan;

use clap::{Parser, Subcommand};

pub use self::{
    calibrate::{CalibrateArgs, calibrate},
    generate::{GenerateArgs, generate},
    plan::{PlanArgs, plan},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: load the problem, optimize the warm-up schedule, and print it.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Write a randomized problem file for a given seed.
    #[clap(name = "generate")]
    Generate(Box<GenerateArgs>),

    /// Fit the warm-up model constants from observed warm-up cycles.
    #[clap(name = "calibrate")]
    Calibrate(Box<CalibrateArgs>),
}
