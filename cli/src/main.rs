//! Command-line driver for the economy simulator.
//!
//! Runs the engine for a number of ticks and prints reporter rows as JSON
//! lines on stdout, for downstream plotting or export.

use std::env;
use std::fs;
use std::process;

use econ_simulator_core_rs::{HouseholdRecord, Orchestrator, OrchestratorConfig};

const DEFAULT_TICKS: usize = 50;
const DEFAULT_SEED: u64 = 0;

#[derive(Debug, Clone, Copy)]
enum Command {
    Run,
    Agents,
    Events,
}

impl Command {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "run" => Ok(Command::Run),
            "agents" => Ok(Command::Agents),
            "events" => Ok(Command::Events),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

fn print_usage() {
    println!("econ-sim <command> [ticks] [seed] [config.json]");
    println!("commands:");
    println!("  run      print one model snapshot per tick");
    println!("  agents   print household records after the last tick");
    println!("  events   print the event log");
    println!("defaults: ticks={DEFAULT_TICKS}, seed={DEFAULT_SEED}, built-in parameters");
}

fn parse_or<T: std::str::FromStr>(
    value: Option<&String>,
    label: &str,
    default: T,
) -> Result<T, String> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("invalid {}: {}", label, raw)),
        None => Ok(default),
    }
}

fn load_config(path: Option<&String>, seed: u64) -> Result<OrchestratorConfig, String> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path, e))?;
            OrchestratorConfig::from_json(&raw).map_err(|e| e.to_string())?
        }
        None => OrchestratorConfig::default(),
    };
    config.rng_seed = seed;
    Ok(config)
}

fn to_json_line<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn run(args: &[String]) -> Result<(), String> {
    let command = Command::parse(args.get(1).map(String::as_str).unwrap_or("run"))?;
    let ticks = parse_or(args.get(2), "ticks", DEFAULT_TICKS)?;
    let seed = parse_or(args.get(3), "seed", DEFAULT_SEED)?;
    let config = load_config(args.get(4), seed)?;

    let mut model = Orchestrator::new(config).map_err(|e| e.to_string())?;
    model.run(ticks).map_err(|e| e.to_string())?;

    match command {
        Command::Run => {
            for snapshot in model.collector().model_vars() {
                println!("{}", to_json_line(snapshot)?);
            }
        }
        Command::Agents => {
            for household in model.state().households() {
                let record = HouseholdRecord::from(household);
                println!("{}", to_json_line(&record)?);
            }
        }
        Command::Events => {
            for event in model.event_log().events() {
                println!("{}", to_json_line(event)?);
            }
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if matches!(args.get(1).map(String::as_str), Some("-h" | "--help" | "help")) {
        print_usage();
        return;
    }

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        print_usage();
        process::exit(1);
    }
}
