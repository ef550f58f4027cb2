pub mod completions;
pub mod generate;
pub mod init;
pub mod input;
pub mod list;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// mdgen - Generate project files from markdown
#[derive(Parser, Debug)]
#[command(name = "mdgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate files and directories from a markdown document
    Generate(generate::GenerateArgs),

    /// List the file blocks found in a markdown document
    List(list::ListArgs),

    /// Initialize a project (generates mdgen.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),

    /// Print the version number
    Version,
}

/// Initialise tracing-based logging on stderr.
///
/// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("mdgen=debug")
    } else {
        EnvFilter::new("warn")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the version line.
pub fn print_version() {
    println!("mdgen {}", env!("CARGO_PKG_VERSION"));
}
