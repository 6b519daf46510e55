//! Application logic for the SQL Literal Inliner CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing. Inputs are processed in parallel with
//! [`rayon`]; each `inline` input works on its own copy of the parameter
//! collection, so one file's removals never affect another's.

pub mod params;

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf}
};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    cli::{Cli, Commands, Format, OutputArgs},
    config::{Config, InlineConfig, OutputConfig},
    error::{AppResult, config_error, file_read_error},
    inliner::{InlineOptions, Inliner},
    output::{
        InlineReport, OutputFormat, OutputOptions, ScanReport, SplitReport, format_inline_reports,
        format_scan_reports, format_split_reports
    },
    parameters::ParameterCollection,
    scanner::{scan, split_statements}
};

/// SQL text read from a file or stdin
#[derive(Debug, Clone)]
pub struct Input {
    /// File path, or `stdin`
    pub source: String,
    pub sql:    String
}

/// Rendered command result and the process exit code
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub output:    String
}

/// Read SQL from a file, or from stdin for `-`
pub fn read_input(path: &Path) -> AppResult<Input> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        return Ok(Input {
            source: "stdin".to_string(),
            sql:    buffer
        });
    }
    let source = path.display().to_string();
    let sql = read_to_string(path).map_err(|e| file_read_error(&source, e))?;
    Ok(Input {
        source,
        sql
    })
}

/// Read every input, stopping at the first unreadable one
pub fn read_inputs(paths: &[PathBuf]) -> AppResult<Vec<Input>> {
    paths.iter().map(|path| read_input(path)).collect()
}

/// Scan each input
pub fn scan_inputs(inputs: &[Input]) -> Vec<ScanReport> {
    inputs
        .par_iter()
        .map(|input| ScanReport::new(&input.source, &input.sql, &scan(&input.sql)))
        .collect()
}

/// Split each input into statements
pub fn split_inputs(inputs: &[Input]) -> Vec<SplitReport> {
    inputs
        .par_iter()
        .map(|input| SplitReport {
            source:     input.source.clone(),
            statements: split_statements(&input.sql)
                .into_iter()
                .map(String::from)
                .collect()
        })
        .collect()
}

/// Inline each input against its own copy of `params`
pub fn inline_inputs(
    inputs: &[Input],
    params: &ParameterCollection,
    options: InlineOptions
) -> Vec<InlineReport> {
    let inliner = Inliner::new().options(options);
    inputs
        .par_iter()
        .map(|input| {
            let mut params = params.clone();
            let rewrite = inliner.rewrite(&input.sql, &mut params);
            debug!(
                source = %input.source,
                substitutions = rewrite.substitutions.len(),
                "rewrote input"
            );
            InlineReport::new(&input.source, rewrite, &params)
        })
        .collect()
}

/// `1` when any input ends inside an open quote or block comment
pub fn scan_exit_code(reports: &[ScanReport]) -> i32 {
    if reports.iter().any(|r| r.unterminated.is_some()) {
        1
    } else {
        0
    }
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Combine command-line output flags with configured defaults
pub fn resolve_output_options(
    args: &OutputArgs,
    config: &OutputConfig
) -> AppResult<OutputOptions> {
    let format = match (args.output_format, config.format.as_deref()) {
        (Some(format), _) => convert_format(format),
        (None, Some(name)) => OutputFormat::from_name(name)
            .ok_or_else(|| config_error(format!("Unknown output format '{}'", name)))?,
        (None, None) => OutputFormat::Text
    };
    Ok(OutputOptions {
        format,
        colored: config.colored && !args.no_color
    })
}

/// Combine `--no-limit`/`--no-strings` with configured defaults
pub fn resolve_inline_options(
    no_limit: bool,
    no_strings: bool,
    config: &InlineConfig
) -> InlineOptions {
    let configured = InlineOptions::from(config);
    InlineOptions {
        limit:   configured.limit && !no_limit,
        strings: configured.strings && !no_strings
    }
}

/// Run a parsed command line
pub fn run(cli: Cli, config: &Config) -> AppResult<CommandOutput> {
    let (exit_code, output) = match cli.command {
        Commands::Scan {
            input,
            output
        } => {
            let opts = resolve_output_options(&output, &config.output)?;
            let reports = scan_inputs(&read_inputs(&input.queries)?);
            (scan_exit_code(&reports), format_scan_reports(&reports, &opts))
        }
        Commands::Split {
            input,
            output
        } => {
            let opts = resolve_output_options(&output, &config.output)?;
            let reports = split_inputs(&read_inputs(&input.queries)?);
            (0, format_split_reports(&reports, &opts))
        }
        Commands::Inline {
            input,
            params: params_path,
            no_limit,
            no_strings,
            output
        } => {
            let opts = resolve_output_options(&output, &config.output)?;
            let options = resolve_inline_options(no_limit, no_strings, &config.inline);
            let params = match params_path {
                Some(path) => params::load_parameters(&path)?,
                None => ParameterCollection::new()
            };
            debug!(parameters = params.len(), ?options, "loaded parameters");
            let reports = inline_inputs(&read_inputs(&input.queries)?, &params, options);
            (0, format_inline_reports(&reports, &opts))
        }
    };
    Ok(CommandOutput {
        exit_code,
        output: terminate_line(output)
    })
}

fn terminate_line(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
