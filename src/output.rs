use colored::Colorize;
use serde::Serialize;

use crate::{
    inliner::{Rewrite, Substitution},
    parameters::ParameterCollection,
    scanner::{LexicalState, StateTrack}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

impl OutputFormat {
    /// Parse a format name from configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None
        }
    }
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Lexical scan of one input
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source:               String,
    pub sql:                  String,
    pub length:               usize,
    /// One tag character per byte, see [`LexicalState::as_char`]
    pub map:                  String,
    pub parameter_markers:    Vec<usize>,
    pub statement_separators: Vec<usize>,
    pub unterminated:         Option<LexicalState>
}

impl ScanReport {
    pub fn new(source: &str, sql: &str, track: &StateTrack) -> Self {
        let separators = track
            .iter()
            .enumerate()
            .filter(|(_, state)| *state == LexicalState::StatementSeparator)
            .map(|(i, _)| i)
            .collect();
        Self {
            source:               source.to_string(),
            sql:                  sql.to_string(),
            length:               track.len(),
            map:                  track.iter().map(LexicalState::as_char).collect(),
            parameter_markers:    track.parameter_markers(),
            statement_separators: separators,
            unterminated:         track.unterminated()
        }
    }
}

/// Statements of one input
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source:     String,
    pub statements: Vec<String>
}

/// Inlining result for one input
#[derive(Debug, Clone, Serialize)]
pub struct InlineReport {
    pub source:        String,
    pub sql:           String,
    pub substitutions: Vec<Substitution>,
    pub removed:       Vec<String>,
    /// Parameters still bound after inlining
    pub remaining:     Vec<String>
}

impl InlineReport {
    pub fn new(source: &str, rewrite: Rewrite, params: &ParameterCollection) -> Self {
        Self {
            source:        source.to_string(),
            sql:           rewrite.sql,
            substitutions: rewrite.substitutions,
            removed:       rewrite.removed,
            remaining:     params.names().into_iter().map(String::from).collect()
        }
    }
}

/// Format scan reports based on output options
pub fn format_scan_reports(reports: &[ScanReport], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => {
            let sections: Vec<String> = reports
                .iter()
                .map(|report| format_scan_text(report, opts))
                .collect();
            sections.join("\n")
        }
    }
}

/// Format split reports based on output options
pub fn format_split_reports(reports: &[SplitReport], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for report in reports {
                output.push_str(&header(&report.source, opts));
                for (i, statement) in report.statements.iter().enumerate() {
                    let label = format!("Statement #{}:", i + 1);
                    if opts.colored {
                        output.push_str(&label.bold().to_string());
                    } else {
                        output.push_str(&label);
                    }
                    output.push('\n');
                    output.push_str(statement);
                    output.push('\n');
                }
                if report.statements.is_empty() {
                    output.push_str("(no statements)\n");
                }
            }
            output
        }
    }
}

/// Format inline reports based on output options
pub fn format_inline_reports(reports: &[InlineReport], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for report in reports {
                output.push_str(&header(&report.source, opts));
                output.push_str(&report.sql);
                output.push('\n');
                for substitution in &report.substitutions {
                    let line = format!(
                        "  @{} at {} -> {}",
                        substitution.name, substitution.position, substitution.literal
                    );
                    if opts.colored {
                        output.push_str(&line.green().to_string());
                    } else {
                        output.push_str(&line);
                    }
                    output.push('\n');
                }
                if !report.removed.is_empty() {
                    output.push_str(&format!("Removed: {}\n", report.removed.join(", ")));
                }
                if !report.remaining.is_empty() {
                    output.push_str(&format!("Still bound: {}\n", report.remaining.join(", ")));
                }
            }
            output
        }
    }
}

fn header(source: &str, opts: &OutputOptions) -> String {
    let title = format!("=== {} ===", source);
    if opts.colored {
        format!("{}\n", title.cyan().bold())
    } else {
        format!("{}\n", title)
    }
}

fn format_scan_text(report: &ScanReport, opts: &OutputOptions) -> String {
    let mut output = header(&report.source, opts);
    let tags = report.map.as_bytes();

    for (offset, line) in line_offsets(&report.sql) {
        let marks: String = line
            .char_indices()
            .map(|(i, _)| paint(char::from(tags[offset + i]), opts.colored))
            .collect();
        output.push_str(line);
        output.push('\n');
        output.push_str(&marks);
        output.push('\n');
    }

    output.push_str(&format!("Length: {} bytes\n", report.length));
    if !report.parameter_markers.is_empty() {
        output.push_str(&format!(
            "Parameter markers at: {}\n",
            join_positions(&report.parameter_markers)
        ));
    }
    if !report.statement_separators.is_empty() {
        output.push_str(&format!(
            "Statement separators at: {}\n",
            join_positions(&report.statement_separators)
        ));
    }
    if let Some(state) = report.unterminated {
        let warning = format!("Unterminated {} at end of input", state);
        if opts.colored {
            output.push_str(&warning.red().bold().to_string());
        } else {
            output.push_str(&warning);
        }
        output.push('\n');
    }
    output
}

/// Lines of `sql` without their terminators, each with its byte offset.
fn line_offsets(sql: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in sql.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        lines.push((offset, content));
        offset += line.len();
    }
    lines
}

fn paint(tag: char, colored: bool) -> String {
    if !colored {
        return tag.to_string();
    }
    let text = tag.to_string();
    match tag {
        '\'' | '"' | '`' => text.green().to_string(),
        '-' | '#' | '/' => text.dimmed().to_string(),
        '@' | '$' => text.yellow().bold().to_string(),
        ';' => text.magenta().bold().to_string(),
        _ => text
    }
}

fn join_positions(positions: &[usize]) -> String {
    let parts: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    parts.join(", ")
}
