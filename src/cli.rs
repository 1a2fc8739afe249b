//! Command-line argument parsing for the scenario replayer

use clap::Parser;
use std::path::PathBuf;

use crate::config::{SettingsStore, YamlSettingsStore};
use crate::replay::Scenario;

/// Replay hover scenarios against a simulated host
#[derive(Parser, Debug)]
#[command(
    name = "hoverdock-replay",
    version,
    about = "Replay a hover scenario against a simulated host"
)]
pub struct CliArgs {
    /// Scenario file (YAML)
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Settings file to use instead of the scenario's inline settings
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Override the surface width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<f64>,

    /// Print panel state after every step
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Load the scenario and apply command-line overrides
    pub fn into_scenario(self) -> anyhow::Result<Scenario> {
        let mut scenario = Scenario::load(&self.scenario)?;

        if let Some(path) = self.settings {
            // Read-only: the replay never writes back to a user's settings
            scenario.settings = YamlSettingsStore::new(path).load()?;
        }
        if let Some(width) = self.width {
            scenario.width = Some(width);
        }

        Ok(scenario)
    }
}
