//! # SQL Literal Inliner
//!
//! Lexical scanning and literal inlining for parameterised MySQL commands.
//!
//! `sql-literal-inliner` reads MySQL command text and classifies every byte
//! as plain SQL, string content, comment, bind-parameter marker, session
//! variable marker or statement separator. On top of that scan it can split
//! scripts into statements and rewrite a parameterised command so that
//! `LIMIT`/`OFFSET` parameters and string parameters become literals.
//!
//! # Quick Start
//!
//! ```bash
//! # Show the lexical state map
//! sql-literal-inliner scan -q query.sql
//!
//! # Split a script into statements
//! sql-literal-inliner split -q script.sql -f json
//!
//! # Inline parameters from a TOML file
//! sql-literal-inliner inline -q query.sql -p params.toml
//!
//! # Read from stdin
//! echo "SELECT * FROM t LIMIT @n" | sql-literal-inliner inline -q - -p params.toml
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_INLINER_FORMAT`, `SQL_INLINER_NO_COLOR`)
//! 3. `.sql-inliner.toml` in current directory
//! 4. `~/.config/sql-inliner/config.toml`
//!
//! ```toml
//! [inline]
//! limit = true
//! strings = false
//!
//! [output]
//! format = "text"
//! colored = true
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - An input ended inside an unterminated quote or block comment
//!   (`scan` only), or the command failed
//!
//! # Logging
//!
//! Diagnostics go to stderr. `--verbose` enables debug events from the
//! scanner and inliner; `RUST_LOG` overrides the filter entirely.

use std::process;

use clap::Parser;
use sql_literal_inliner::{app::run, cli::Cli, config::Config, logging::init_logging};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match Config::load().and_then(|config| run(cli, &config)) {
        Ok(result) => {
            print!("{}", result.output);
            process::exit(result.exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
