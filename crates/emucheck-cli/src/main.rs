//! CLI for emucheck: is this device real hardware, or an emulator?

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "emucheck")]
#[command(about = "emucheck: is this device real hardware, or an emulator?")]
#[command(version = emucheck_core::VERSION)]
struct Cli {
    /// Log every signal read and weight applied (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// JSON file with live probe settings (command timeout, tool paths)
    #[arg(long, global = true)]
    probe_config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full emulator check and print the evidence report.
    /// Exits with status 2 when the device is classified as an emulator.
    Check {
        /// Replay a recorded device snapshot (JSON) instead of the live system
        #[arg(long)]
        fixture: Option<String>,

        /// Scoring policy JSON (defaults to the built-in policy)
        #[arg(long)]
        policy: Option<String>,

        /// Override the policy's suspicion threshold
        #[arg(long)]
        threshold: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<String>,
    },

    /// List every signal with its source and reliability
    Signals,

    /// Read and classify a single signal
    Probe {
        /// Signal name (run `signals` to list them)
        category: String,

        /// Replay a recorded device snapshot (JSON) instead of the live system
        #[arg(long)]
        fixture: Option<String>,

        /// Scoring policy JSON used to weigh the reading
        #[arg(long)]
        policy: Option<String>,
    },

    /// Check whether the device is rooted (`su -v`)
    Root {
        /// Replay a recorded device snapshot (JSON) instead of the live system
        #[arg(long)]
        fixture: Option<String>,
    },

    /// Print the effective scoring policy as JSON
    Policy {
        /// Scoring policy JSON to validate and print
        #[arg(long)]
        policy: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);
    let probe_config = cli.probe_config.as_deref();

    match cli.command {
        Commands::Check {
            fixture,
            policy,
            threshold,
            json,
            output,
        } => commands::check::run(commands::check::CheckCommandConfig {
            fixture_path: fixture.as_deref(),
            probe_config_path: probe_config,
            policy_path: policy.as_deref(),
            threshold,
            json,
            output_path: output.as_deref(),
        }),
        Commands::Signals => commands::signals::run(),
        Commands::Probe {
            category,
            fixture,
            policy,
        } => commands::probe::run(
            &category,
            fixture.as_deref(),
            probe_config,
            policy.as_deref(),
        ),
        Commands::Root { fixture } => commands::root::run(fixture.as_deref(), probe_config),
        Commands::Policy { policy } => commands::policy::run(policy.as_deref()),
    }
}
