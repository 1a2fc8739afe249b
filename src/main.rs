use anyhow::Result;
use clap::Parser;

use hoverdock::cli::CliArgs;
use hoverdock::panel::{Side, SideMap};
use hoverdock::replay::{self, PanelReport};

fn describe(panels: &SideMap<Option<PanelReport>>) -> String {
    Side::ALL
        .iter()
        .map(|&side| match panels.get(side) {
            Some(report) => format!("{}: {}", side, report),
            None => format!("{}: unbound", side),
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn main() -> Result<()> {
    hoverdock::tracing::init();

    let args = CliArgs::parse();
    let verbose = args.verbose;
    let scenario = args.into_scenario()?;

    let report = replay::run(&scenario);

    if verbose {
        for step in &report.steps {
            println!("t={:>6}ms  {:<13} {}", step.at, step.event, describe(&step.panels));
        }
    }
    println!(
        "t={:>6}ms  {:<13} {}",
        report.end_ms,
        "end",
        describe(&report.final_panels)
    );
    if report.reinitializations > 0 {
        println!("reinitialized {} time(s)", report.reinitializations);
    }

    Ok(())
}
