//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Generate a spoken presentation script from a slide deck
#[derive(Parser)]
#[command(name = "slidescript", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts and pipelines
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, aggregate and generate a speaker script for a deck
    Generate(GenerateArgs),
    /// Print the slide context that would be sent to the backend
    Context {
        /// Deck to read (.pptx, or .json extractor output)
        deck: PathBuf,
    },
    /// Inspect generation backends
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Deck to read (.pptx, or .json extractor output)
    pub deck: PathBuf,

    /// File to write the script to
    #[arg(short, long, default_value = "ppt_script.md")]
    pub output: PathBuf,

    /// Backend to use (groq, openai). Uses SLIDESCRIPT_PROVIDER or the configured key if not set.
    #[arg(long)]
    pub provider: Option<String>,

    /// Model to use (e.g. llama-3.3-70b-versatile). Uses SLIDESCRIPT_MODEL if not set.
    #[arg(long)]
    pub model: Option<String>,

    /// Give up on the backend call after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Also print the script after writing it
    #[arg(long)]
    pub print: bool,
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List known backends and whether a key is configured
    List,
    /// Test backend connectivity
    Test {
        /// Provider ID
        provider: String,
    },
    /// List models the backend offers
    Models {
        /// Provider ID
        provider: String,
    },
}
