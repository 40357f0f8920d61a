use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use odometer_core::{AppConfig, DigitFontKind};

mod commands;

#[derive(Parser)]
#[command(name = "odometer")]
#[command(author, version, about = "Odometer-style rolling digit counter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive counter
    Run(RunArgs),
    /// Show how each digit rolls between two values
    Diff {
        from: u64,
        to: u64,
        /// Print slots as JSON
        #[arg(long)]
        json: bool,
        /// Trailing digits rendered without animation
        #[arg(long, default_value_t = 0)]
        never_animate: usize,
    },
    /// Show or initialize the configuration file
    Config {
        /// Print the configuration file path
        #[arg(long, conflicts_with = "init")]
        path: bool,
        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// Starting value
    #[arg(long)]
    value: Option<u64>,
    /// Amount added or subtracted per key press
    #[arg(long)]
    step: Option<u64>,
    /// Digit font
    #[arg(long, value_enum)]
    font: Option<FontArg>,
    /// Roll duration in milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,
    /// Wait before a roll starts, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FontArg {
    Plain,
    Block,
}

impl From<FontArg> for DigitFontKind {
    fn from(font: FontArg) -> Self {
        match font {
            FontArg::Plain => DigitFontKind::Plain,
            FontArg::Block => DigitFontKind::Block,
        }
    }
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(value) = self.value {
            config.ui.initial_value = value;
        }
        if let Some(step) = self.step {
            config.ui.initial_step = step;
        }
        if let Some(font) = self.font {
            config.counter.font = font.into();
        }
        if let Some(ms) = self.duration_ms {
            config.counter.animation_duration_ms = ms;
        }
        if let Some(ms) = self.delay_ms {
            config.counter.animation_delay_ms = ms;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    match cli.command {
        Some(Commands::Run(args)) => run(config, args, filter),
        None => run(config, RunArgs::default(), filter),
        Some(Commands::Diff {
            from,
            to,
            json,
            never_animate,
        }) => {
            init_stderr_logging(filter);
            config.counter.never_animate_digits = never_animate;
            commands::diff::run(&config, from, to, json)
        }
        Some(Commands::Config { path, init }) => {
            init_stderr_logging(filter);
            commands::config::run(&config, path, init)
        }
    }
}

fn run(mut config: AppConfig, args: RunArgs, filter: EnvFilter) -> Result<()> {
    args.apply(&mut config);

    // The full-screen UI owns the terminal, so logs go to a file
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    commands::run::run(Arc::new(config))
}

fn init_stderr_logging(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
