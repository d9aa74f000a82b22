//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Spreadsheet path used when none is given.
pub(crate) const DEFAULT_INPUT: &str = "sources/death_and_co_raw.csv";

/// Catalog path used when none is given.
pub(crate) const DEFAULT_OUTPUT: &str = "catalog.json";

#[derive(Parser)]
#[command(name = "barback")]
#[command(about = "Convert cocktail spreadsheets into a JSON catalog", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Settings file to use instead of ~/.config/barback/settings.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[convert]` settings.
#[derive(Args, Clone, Default)]
pub(crate) struct ConvertOverrides {
    /// Namespace prepended to every cocktail id (e.g., deathandco)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Creator recorded for cocktails without a creator column ("" for none)
    #[arg(long)]
    pub creator: Option<String>,

    /// Unit assumed for bare numbers (e.g., oz, ml, none)
    #[arg(long)]
    pub default_unit: Option<String>,

    /// Keep ounces and centiliters instead of converting to milliliters
    #[arg(long)]
    pub no_ml: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert a spreadsheet export into a JSON catalog
    Convert {
        /// CSV export to read
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Where to write the catalog
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the catalog to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Generation date to record (YYYY-MM-DD, default: today)
        #[arg(long)]
        generated_at: Option<String>,

        /// Fail without writing if any row produced a warning
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        overrides: ConvertOverrides,
    },

    /// Show how each spreadsheet row is classified
    Inspect {
        /// CSV export to read
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Only list rows of these kinds (e.g., noise,note)
        #[arg(long, value_delimiter = ',')]
        only: Option<Vec<String>>,
    },

    /// Validate an existing catalog
    Check {
        /// Catalog JSON to validate
        #[arg(default_value = DEFAULT_OUTPUT)]
        catalog: PathBuf,
    },

    /// Summarize an existing catalog
    Stats {
        /// Catalog JSON to summarize
        #[arg(default_value = DEFAULT_OUTPUT)]
        catalog: PathBuf,

        /// Number of glasses to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Manage converter settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
