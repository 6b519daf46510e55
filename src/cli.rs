use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// SQL Literal Inliner - Scan MySQL command text and inline bind parameters
#[derive(Parser, Debug)]
#[command(name = "sql-literal-inliner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log scanner and inliner decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the lexical state map of each input
    Scan {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs
    },

    /// Split each input into statements at top-level separators
    Split {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs
    },

    /// Replace LIMIT/OFFSET and string parameters with literals
    Inline {
        #[command(flatten)]
        input: InputArgs,

        /// Parameters file (TOML or JSON, `[[parameters]]` entries)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Keep LIMIT/OFFSET parameters bound
        #[arg(long)]
        no_limit: bool,

        /// Keep string parameters bound
        #[arg(long)]
        no_strings: bool,

        #[command(flatten)]
        output: OutputArgs
    }
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// SQL files to process (use - for stdin)
    #[arg(short, long, required = true, num_args = 1..)]
    pub queries: Vec<PathBuf>
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub output_format: Option<Format>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
