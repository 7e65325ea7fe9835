#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod calibration;
mod cli;
mod config;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Plan(args) => cli::plan(&args)?,
        Command::Generate(args) => cli::generate(&args)?,
        Command::Calibrate(args) => cli::calibrate(&args)?,
    }

    info!("done!");
    Ok(())
}
