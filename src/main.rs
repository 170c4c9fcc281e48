//! Gate Ledger - residential gate-entry log
//!
//! A guard selects a gate, an IN/OUT action and a vehicle type, then
//! types (or speaks) a vehicle number; each movement is appended to the
//! gate's text log with the flat looked up from the resident directory.
//!
//! Module structure:
//! - `domain/` - Core business types (LogEntry, GateId, VehicleType)
//! - `io/` - File-backed storage (Directory, GateLogStore)
//! - `services/` - Business logic (Ledger, Summary, Session, Auth, Voice)
//! - `infra/` - Infrastructure (Config)

use anyhow::bail;
use clap::{Parser, Subcommand};
use gate_ledger::domain::types::{Action, GateId, VehicleType};
use gate_ledger::infra::Config;
use gate_ledger::services::{auth, voice, Ledger};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Gate Ledger - per-gate vehicle movement log
#[derive(Parser, Debug)]
#[command(name = "gate-ledger", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record one vehicle movement
    Log {
        /// Gate the movement happened at
        #[arg(short, long)]
        gate: GateId,
        /// IN or OUT
        #[arg(short, long)]
        action: Action,
        /// Car, Bike, Scooty, Taxi or EV
        #[arg(short = 't', long)]
        vehicle_type: VehicleType,
        /// Vehicle number as typed; normalized before logging
        #[arg(short, long)]
        number: String,
        /// Guard recording the movement
        #[arg(short, long)]
        user: Option<String>,
        /// Guard's password; required when the site configures users
        #[arg(short, long)]
        secret: Option<String>,
    },
    /// Print a gate's log, oldest first
    Show {
        #[arg(short, long)]
        gate: GateId,
    },
    /// Tally a gate's log by vehicle type
    Summary {
        #[arg(short, long)]
        gate: GateId,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Truncate a gate's log
    Clear {
        #[arg(short, long)]
        gate: GateId,
        /// User requesting the clear; checked against the authorization
        /// list when one is configured
        #[arg(short, long)]
        user: Option<String>,
        /// User's password; required when the site configures users
        #[arg(short, long)]
        secret: Option<String>,
    },
    /// Look up the flat for a vehicle number (or the vehicle for a flat)
    Lookup {
        /// Vehicle number, or flat number with --flat
        value: String,
        /// Treat the value as a flat and find its vehicle
        #[arg(long)]
        flat: bool,
    },
    /// Parse a speech transcript and record the movement it describes
    Voice {
        /// Transcript text from the speech-to-text stage
        transcript: String,
        #[arg(short, long)]
        gate: GateId,
        #[arg(short, long)]
        user: Option<String>,
        /// Guard's password; required when the site configures users
        #[arg(short, long)]
        secret: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Structured logging, level via RUST_LOG (default INFO)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site = %config.site_name(),
        directory_file = %config.directory_file(),
        log_dir = %config.log_dir(),
        gates = ?config.gate_ids(),
        "config_loaded"
    );

    run(&config, args.command)
}

fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Log { gate, action, vehicle_type, number, user, secret } => {
            check_gate(config, gate)?;
            verify_operator(config, user.as_deref(), secret.as_deref())?;
            let ledger = Ledger::from_config(config)?;
            let submission =
                ledger.submit(gate, user.as_deref(), vehicle_type, &number, action)?;

            println!("{}", submission.line);
            if !submission.flat_known {
                println!(
                    "Note: this vehicle is not in the {} list; ask the owner for the flat number.",
                    config.site_name()
                );
            }
        }
        Command::Show { gate } => {
            check_gate(config, gate)?;
            let ledger = Ledger::from_config(config)?;
            let lines = ledger.store().read(gate)?;
            if lines.is_empty() {
                println!("No logs yet for gate {gate}.");
            }
            for line in lines {
                println!("{line}");
            }
        }
        Command::Summary { gate, json } => {
            check_gate(config, gate)?;
            let ledger = Ledger::from_config(config)?;
            let summary = ledger.summarize(gate)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }
        }
        Command::Clear { gate, user, secret } => {
            check_gate(config, gate)?;
            verify_operator(config, user.as_deref(), secret.as_deref())?;
            if !config.can_clear(user.as_deref()) {
                bail!("user is not authorized to clear logs");
            }
            let ledger = Ledger::from_config(config)?;
            ledger.store().clear(gate)?;
            println!("Logs for gate {gate} cleared.");
        }
        Command::Lookup { value, flat } => {
            let ledger = Ledger::from_config(config)?;
            if flat {
                let (flat_id, vehicle) = ledger.lookup_vehicle(&value);
                match vehicle {
                    Some(vehicle) => println!("Vehicle for flat {flat_id} is {vehicle}"),
                    None => println!("Flat {flat_id} not found"),
                }
            } else {
                let (vehicle_id, flat_id) = ledger.lookup_flat(&value);
                match flat_id {
                    Some(flat_id) => println!("Flat for vehicle {vehicle_id} is {flat_id}"),
                    None => println!("Vehicle {vehicle_id} not found"),
                }
            }
        }
        Command::Voice { transcript, gate, user, secret } => {
            check_gate(config, gate)?;
            verify_operator(config, user.as_deref(), secret.as_deref())?;
            let Some(command) = voice::parse_transcript(&transcript) else {
                bail!("could not parse vehicle type, action and number from the transcript");
            };
            let ledger = Ledger::from_config(config)?;
            let submission = ledger.submit(
                gate,
                user.as_deref(),
                command.vehicle_type,
                &command.vehicle_number,
                command.action,
            )?;

            println!("{}", submission.line);
            if !submission.flat_known {
                println!(
                    "Note: this vehicle is not in the {} list; ask the owner for the flat number.",
                    config.site_name()
                );
            }
        }
    }

    Ok(())
}

fn check_gate(config: &Config, gate: GateId) -> anyhow::Result<()> {
    if !config.is_known_gate(gate) {
        bail!("unknown gate {gate}; configured gates: {:?}", config.gate_ids());
    }
    Ok(())
}

/// Verify the recording user when the site configures a user table
fn verify_operator(
    config: &Config,
    user: Option<&str>,
    secret: Option<&str>,
) -> anyhow::Result<()> {
    let role = auth::verify_operator(config, user, secret)?;
    if let (Some(name), Some(role)) = (user, role) {
        info!(user = %name, role = role.as_str(), "operator_verified");
    }
    Ok(())
}
