//! Morpho CLI - one-shot file conversions from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "morpho")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file with one of the supported conversions
    Convert {
        /// Input file path
        input: String,

        /// Conversion tag (see `morpho formats`)
        #[arg(short, long)]
        tag: String,

        /// Output file path (defaults to the derived filename next to the input)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the supported conversion tags
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "morpho_cli=debug,morpho_core=debug"
    } else {
        "morpho_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Convert { input, tag, output } => {
            commands::convert(&input, &tag, output.as_deref())
        }

        Commands::Formats => commands::formats(),
    }
}
