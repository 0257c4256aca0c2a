use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "timerfriend", version, about = "TimerFriend CLI")]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log core state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a countdown in the terminal
    Countdown {
        /// Duration in minutes (defaults to countdown.default_minutes)
        #[arg(short, long)]
        minutes: Option<i64>,
        /// Real-time spacing between ticks in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Replay a scripted session through the overlay and print its events
    Simulate {
        /// JSON script file, or "-" for stdin
        #[arg(default_value = "-")]
        script: String,
        /// Also print every presenter call
        #[arg(long)]
        calls: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TIMERFRIEND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Countdown { minutes, tick_ms } => {
            commands::countdown::run(config_path, minutes, tick_ms)
        }
        Commands::Simulate { script, calls } => commands::simulate::run(config_path, &script, calls),
        Commands::Config { action } => commands::config::run(config_path, action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "timerfriend", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
