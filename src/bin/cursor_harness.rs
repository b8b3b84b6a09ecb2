//! Headless cursor harness CLI.
//! Usage: cargo run --bin cursor_harness -- --scenario data/scenarios/hover_select.json

use anyhow::{Context, Result};
use clap::Parser;
use gaze_cursor::cursor::visual::{CursorVisual, FlagVisual, ObjectCursor};
use gaze_cursor::cursor::{Cursor, CursorConfig, CursorHooks, CursorId, telemetry};
use gaze_cursor::data::configs::{cursor as cursor_cfg, telemetry as telemetry_cfg};
use gaze_cursor::data::scenario::{Scenario, load_scenario};
use gaze_cursor::harness::{FrameReport, run_scenario};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Replay a scripted gaze cursor scenario", long_about = None)]
struct Cli {
    /// Scenario JSON (absolute, or relative to data/)
    #[arg(long)]
    scenario: PathBuf,
    /// Only print the final frame
    #[arg(long)]
    quiet: bool,
    /// Pretty multi-line logs
    #[arg(long)]
    pretty: bool,
    /// Required final state; overrides the scenario's own `expect_final`
    #[arg(long)]
    expect: Option<String>,
}

fn print_report(r: &FrameReport) {
    let p = r.pose.translation;
    let f = r.pose.forward();
    println!(
        "[cursor] frame {:>3} state={:<11} pos=({:.3}, {:.3}, {:.3}) facing=({:.3}, {:.3}, {:.3}) scale={:.3}",
        r.index, r.state, p.x, p.y, p.z, f.x, f.y, f.z, r.pose.scale.x
    );
}

fn replay<H: CursorHooks>(scen: &Scenario, cursor: Cursor<H>, quiet: bool) -> Result<()> {
    let (reports, _harness) = run_scenario(scen, cursor)?;
    let shown = if quiet {
        reports.last().into_iter().collect::<Vec<_>>()
    } else {
        reports.iter().collect()
    };
    for r in shown {
        print_report(r);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let tcfg = telemetry_cfg::load_default()?;
    telemetry::init_telemetry(&tcfg, cli.pretty);

    let raw = cursor_cfg::load_default()?;
    let cfg = CursorConfig::from_cfg(&raw);
    cfg.validate().context("cursor config")?;
    let mut scen = load_scenario(&cli.scenario)
        .with_context(|| format!("scenario {}", cli.scenario.display()))?;
    if let Some(state) = cli.expect {
        scen.expect_final = Some(state);
    }
    println!("[cursor] scenario '{}' ({} frames)", scen.name, scen.frames.len());

    let id = CursorId(1);
    if raw.visuals.is_empty() {
        replay(&scen, Cursor::plain(id, cfg), cli.quiet)?;
    } else {
        let hooks = ObjectCursor::from_cfg(&raw.visuals, |_| {
            Box::new(FlagVisual::default()) as Box<dyn CursorVisual>
        })?;
        replay(&scen, Cursor::new(id, cfg, hooks), cli.quiet)?;
    }
    println!("[cursor] ok");
    Ok(())
}
