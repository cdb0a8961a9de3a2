use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "vng")]
#[command(version)]
#[command(about = "Compare VNG test reports across sessions", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Upper bound on files per run, overriding the config file
    #[arg(long, global = true, value_name = "N")]
    pub max_files: Option<usize>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse reports and print their structured form
    Parse {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Compare reports and print the analysis
    Analyze {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Report title for markdown output
        #[arg(long)]
        title: Option<String>,

        /// Interpretation text to append to markdown output
        #[arg(long, value_name = "FILE")]
        interpretation: Option<PathBuf>,
    },

    /// Print the payload for an interpretation model
    Interpret {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Print the system prompt and structured prompt text instead of JSON
        #[arg(long)]
        prompt: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Summary,
}
