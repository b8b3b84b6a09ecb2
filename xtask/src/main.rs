use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cursor_core::CursorConfig;
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(author, version, about = "Workspace automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// fmt + clippy -D warnings + tests + schema check (workspace)
    Ci,
    /// Validate data/config and data/scenarios against serde models
    SchemaCheck,
    /// Replay every bundled scenario through the cursor harness
    Scenarios,
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("spawn")?;
    if !status.success() {
        bail!("command failed: {:?}", cmd);
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let mut c = Command::new("cargo");
    c.args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run(&mut c)
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["test", "--workspace"])?;
    schema_check()?;
    Ok(())
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

fn scenario_files() -> Result<Vec<PathBuf>> {
    let dir = data_dir().join("scenarios");
    let mut out = Vec::new();
    if dir.is_dir() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                out.push(path);
            }
        }
    }
    // Sort entries for determinism
    out.sort();
    Ok(out)
}

fn schema_check() -> Result<()> {
    // Config: parse + validate the merged cursor tuning.
    CursorConfig::load_default().context("validate data/config/cursor.toml")?;
    data_runtime::configs::telemetry::load_default()
        .context("validate data/config/telemetry.toml")?;
    // Scenarios: serde model + frame sanity.
    let files = scenario_files()?;
    for path in &files {
        data_runtime::scenario::load_scenario(path)
            .with_context(|| format!("validate scenario: {}", path.display()))?;
    }
    println!("xtask: schema ok (config + {} scenarios)", files.len());
    Ok(())
}

fn scenarios() -> Result<()> {
    for path in scenario_files()? {
        let p = path.to_string_lossy().to_string();
        cargo(&[
            "run",
            "--quiet",
            "--bin",
            "cursor_harness",
            "--",
            "--scenario",
            p.as_str(),
            "--quiet",
        ])?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::SchemaCheck => schema_check(),
        Cmd::Scenarios => scenarios(),
    }
}
