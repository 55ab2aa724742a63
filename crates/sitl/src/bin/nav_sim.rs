//! Fleet navigation simulator.
//!
//! Runs a scenario of shuttles sharing one gateway until every vehicle has
//! reached all of its targets.
//!
//! Usage:
//!   cargo run -p sortic_nav_sitl --bin nav_sim -- --config <FILE> [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>    Scenario TOML file (required)
//!   --max-ticks <N>        Override simulation.max_ticks
//!   --json                 Print one JSON status record per transition
//!   --realtime             Pace steps at simulation.tick_rate_hz

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use sortic_nav_sitl::{Fleet, FleetReport, ScenarioConfig, SimulatorError, StatusRecord};
use tracing::{error, info};

struct Args {
    config: PathBuf,
    max_ticks: Option<u64>,
    json: bool,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut config = None;
    let mut max_ticks = None;
    let mut json = false;
    let mut realtime = false;

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                config = Some(PathBuf::from(arg_value(&raw, i, "config")));
            }
            "--max-ticks" => {
                i += 1;
                max_ticks = Some(arg_value(&raw, i, "max-ticks").parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid value for --max-ticks");
                    process::exit(1);
                }));
            }
            "--json" => json = true,
            "--realtime" => realtime = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(config) = config else {
        eprintln!("Error: --config is required");
        print_usage();
        process::exit(1);
    };

    Args {
        config,
        max_ticks,
        json,
        realtime,
    }
}

fn arg_value<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: nav_sim --config <FILE> [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -c, --config <FILE>  Scenario TOML file\n\
         \x20 --max-ticks <N>      Override simulation.max_ticks\n\
         \x20 --json               Print one JSON status record per transition\n\
         \x20 --realtime           Pace steps at simulation.tick_rate_hz\n\
         \x20 -h, --help           Show this help"
    );
}

fn emit(records: &[StatusRecord], json: bool) -> sortic_nav_sitl::Result<()> {
    if json {
        for record in records {
            println!("{}", record.to_json_line()?);
        }
    }
    Ok(())
}

/// Step the fleet on a wall-clock interval until finished or interrupted.
async fn run_realtime(
    fleet: &mut Fleet,
    tick_rate_hz: u32,
    max_ticks: u64,
    json: bool,
) -> sortic_nav_sitl::Result<Option<FleetReport>> {
    let period = Duration::from_secs_f64(1.0 / f64::from(tick_rate_hz));
    let mut interval = tokio::time::interval(period);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while !fleet.is_finished() {
        if fleet.tick() >= max_ticks {
            return Err(SimulatorError::Stalled {
                ticks: fleet.tick(),
                pending: fleet.pending_targets(),
            });
        }
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Shutdown requested at tick {}", fleet.tick());
                return Ok(None);
            }
            _ = interval.tick() => {
                let records = fleet.step()?;
                emit(&records, json)?;
            }
        }
    }
    Ok(Some(fleet.report()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = parse_args();

    let config = match ScenarioConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}", args.config.display(), e);
            process::exit(1);
        }
    };
    let max_ticks = args.max_ticks.unwrap_or(config.simulation.max_ticks);

    info!(
        "Scenario {}: {} vehicles, {} targets, max {} ticks",
        args.config.display(),
        config.vehicles.len(),
        config.target_count(),
        max_ticks
    );

    let mut fleet = match Fleet::from_config(&config) {
        Ok(fleet) => fleet,
        Err(e) => {
            error!("Failed to build fleet: {}", e);
            process::exit(1);
        }
    };

    let result = if args.realtime {
        run_realtime(&mut fleet, config.simulation.tick_rate_hz, max_ticks, args.json).await
    } else {
        fleet
            .run_with(max_ticks, |records| emit(records, args.json))
            .map(Some)
    };

    match result {
        Ok(Some(report)) => {
            for v in &report.vehicles {
                info!(
                    "{}: {} paths, {} faults, {} resets, at {} line {}",
                    v.id, v.completed_paths, v.faults, v.resets, v.sector, v.line
                );
            }
            info!(
                "Finished after {} ticks, {} gateway grants",
                report.ticks, report.gateway_grants
            );
            if args.json {
                match serde_json::to_string(&report) {
                    Ok(line) => println!("{line}"),
                    Err(e) => error!("Failed to encode report: {}", e),
                }
            }
        }
        Ok(None) => {}
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    }
}
