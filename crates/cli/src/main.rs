//! Competition Leaderboard CLI
//!
//! Command-line interface for encoding the ground truth, scoring prediction
//! files offline and managing the local leaderboard.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use leaderboard_cli::commands::{config, leaderboard, score, secret, submit, CommandContext};
use leaderboard_cli::output::OutputFormat;
use leaderboard_common::init_cli_tracing;
use leaderboard_domain::MetricKind;

/// Metric override for offline scoring
#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliMetric {
    /// F1 score
    F1,
    /// Root-mean-squared error
    Rmse,
}

impl From<CliMetric> for MetricKind {
    fn from(m: CliMetric) -> Self {
        match m {
            CliMetric::F1 => MetricKind::F1,
            CliMetric::Rmse => MetricKind::Rmse,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "leaderboard")]
#[command(author, version, about = "Competition leaderboard CLI")]
#[command(long_about = "Command-line interface for the competition leaderboard.\n\n\
    Encode the ground truth for deployment, score prediction files offline, \
    submit to the local leaderboard and inspect the standings.")]
#[command(propagate_version = true)]
struct Cli {
    /// Extra configuration file layered over config/
    #[arg(short, long, global = true, env = "LEADERBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ground-truth secret commands
    Secret {
        #[command(subcommand)]
        command: SecretCommands,
    },

    /// Score a prediction file offline without recording it
    Score {
        /// Ground-truth CSV
        #[arg(short, long)]
        ground_truth: PathBuf,

        /// Prediction CSV
        #[arg(short, long)]
        submission: PathBuf,

        /// Override the configured metric
        #[arg(short, long, value_enum)]
        metric: Option<CliMetric>,
    },

    /// Score a prediction file and record it on the leaderboard
    #[command(alias = "s")]
    Submit {
        /// Team name
        #[arg(short, long)]
        team: String,

        /// Prediction CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Leaderboard commands
    #[command(alias = "lb")]
    Leaderboard {
        #[command(subcommand)]
        command: LeaderboardCommands,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum SecretCommands {
    /// Encode a ground-truth CSV for the [secrets] table
    Encode {
        /// Ground-truth CSV
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Secret key (defaults to the configured ground_truth.secret_key)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Decode a secret value back to CSV
    Decode {
        /// Encoded value
        #[arg(value_name = "VALUE", conflicts_with = "file")]
        value: Option<String>,

        /// Read the encoded value from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum LeaderboardCommands {
    /// Show the ranked leaderboard
    Show {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the score distribution
    Distribution,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "leaderboard", &mut std::io::stdout());
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::load(cli.config.as_deref(), cli.format)?;

    match cli.command {
        Commands::Secret { command } => match command {
            SecretCommands::Encode { file, key } => secret::encode(&ctx, file, key),
            SecretCommands::Decode { value, file } => secret::decode(&ctx, value, file),
        },
        Commands::Score {
            ground_truth,
            submission,
            metric,
        } => score::score(&ctx, ground_truth, submission, metric.map(MetricKind::from)),
        Commands::Submit { team, file } => submit::submit(&ctx, team, file).await,
        Commands::Leaderboard { command } => match command {
            LeaderboardCommands::Show { limit } => leaderboard::show(&ctx, limit).await,
            LeaderboardCommands::Distribution => leaderboard::distribution(&ctx).await,
        },
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => config::show(&ctx),
        },
        // Handled before configuration is loaded
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_cli_tracing(cli.verbose)?;

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Caused by:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
