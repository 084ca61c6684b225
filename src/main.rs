use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use spiffboard::Result;
use std::io;

#[derive(Parser)]
#[command(name = "spiffboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SPIFF Puzzle Challenge tracker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive contest board
    Board,

    /// Toggle one metric for a manager
    Toggle {
        /// Manager id (manager1..manager4)
        manager: String,

        /// Metric to flip (sqo, progression, meetings, mql)
        metric: String,
    },

    /// Show every manager's pieces and progress
    Status {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Show the sorted standings
    Leaderboard {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Clear saved data back to an all-locked board
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Board => {
            spiffboard::cli::board::run().await?;
        }

        Commands::Toggle { manager, metric } => {
            spiffboard::cli::toggle::run(&manager, &metric)?;
        }

        Commands::Status { json } => {
            spiffboard::cli::status::run(json)?;
        }

        Commands::Leaderboard { json } => {
            spiffboard::cli::leaderboard::run(json)?;
        }

        Commands::Reset { force } => {
            spiffboard::cli::reset::run(force)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "spiffboard", &mut io::stdout());
        }
    }

    Ok(())
}
