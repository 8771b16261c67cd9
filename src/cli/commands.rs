use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "comp-intake")]
#[command(about = "Victim compensation intake: case data reconciliation and eligibility screening")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = victim_comp_intake::config::DEFAULT_CONFIG_PATH)]
    pub config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and show the effective configuration
    Init {
        /// Write the effective configuration as TOML to this path
        #[arg(long)]
        write_config: Option<String>,
    },

    /// Evaluate eligibility answers
    Evaluate {
        /// JSON file with the answers ("-" reads stdin)
        #[arg(default_value = "-")]
        answers: String,

        /// Attach the screening to this case
        #[arg(long)]
        case: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show which rules fired
        #[arg(short, long)]
        verbose: bool,
    },

    /// Deep-merge JSON documents and print the result
    Merge {
        /// Base document (the defaults when --stored is given)
        base: String,

        /// Patch document
        patch: String,

        /// Stored record layered between base and patch
        #[arg(long)]
        stored: Option<String>,
    },

    /// Manage cases
    Case {
        #[command(subcommand)]
        command: CaseCommands,
    },

    /// Show screening statistics and recent history
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum CaseCommands {
    /// Open a new case filled with the defaults
    New {
        id: String,
    },

    /// Print a case as JSON
    Show {
        id: String,
    },

    /// Merge a JSON patch into a case (creates it if missing)
    Patch {
        id: String,

        /// JSON file with the patch ("-" reads stdin)
        #[arg(default_value = "-")]
        patch: String,
    },

    /// List stored cases
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Delete a case and its screenings
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
