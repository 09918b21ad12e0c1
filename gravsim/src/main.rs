use gravsim::{ScenarioConfig, Scenario};
use gravsim::{bench_forces, bench_advance};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless driver for the gravsim point-mass simulation")]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is an existing path
    #[arg(short, long, default_value = "two_body.yaml")]
    file_name: String,

    /// Override `run.ticks` from the scenario
    #[arg(long)]
    ticks: Option<u64>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

/// Drive the world tick by tick, reading the body enumerator between ticks
/// the way a renderer would
fn run<const D: usize>(cfg: ScenarioConfig, ticks: Option<u64>) -> Result<()> {
    let mut scenario = Scenario::<D>::build(cfg)?;
    let ticks = ticks.unwrap_or(scenario.run.ticks);
    let report_every = scenario.run.report_every.max(1);

    for _ in 0..ticks {
        let report = scenario.world.step()?;
        for merge in &report.merges {
            info!("tick {}: {:?} -> {} (mass {:.3})", report.tick, merge.absorbed, merge.product, merge.mass);
        }

        if report.tick % report_every == 0 {
            info!("tick {} t = {:.2}: {} bodies", report.tick, scenario.world.time(), scenario.world.len());
            for view in scenario.world.bodies() {
                info!("  {} at {} r = {:.3}", view.id, view.position, view.radius);
            }
        }
    }

    info!(
        "finished {} ticks: {} bodies, mass {:.3}, kinetic energy {:.4}",
        scenario.world.tick_count(),
        scenario.world.len(),
        scenario.world.total_mass(),
        scenario.world.kinetic_energy()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_forces()?;
        bench_advance(10)?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    match scenario_cfg.world.dimension {
        2 => run::<2>(scenario_cfg, args.ticks),
        3 => run::<3>(scenario_cfg, args.ticks),
        d => bail!("unsupported dimension {d}, expected 2 or 3"),
    }
}
