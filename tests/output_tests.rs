// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_literal_inliner::{
    inliner::Inliner,
    output::{
        InlineReport, OutputFormat, OutputOptions, ScanReport, SplitReport, format_inline_reports,
        format_scan_reports, format_split_reports
    },
    parameters::ParameterCollection,
    scanner::{scan, split_statements}
};

fn opts(format: OutputFormat) -> OutputOptions {
    OutputOptions {
        format,
        colored: false
    }
}

fn scan_report(sql: &str) -> ScanReport {
    ScanReport::new("query.sql", sql, &scan(sql))
}

fn inline_report(sql: &str) -> InlineReport {
    let mut params = ParameterCollection::new();
    params.insert("name", "O'Brien");
    params.insert("n", 10);
    let rewrite = Inliner::new().rewrite(sql, &mut params);
    InlineReport::new("query.sql", rewrite, &params)
}

#[test]
fn test_output_format_default() {
    let options = OutputOptions::default();
    assert_eq!(options.format, OutputFormat::Text);
    assert!(options.colored);
}

#[test]
fn test_scan_text_output() {
    let output = format_scan_reports(
        &[scan_report("SELECT @a; -- x\nSELECT 2")],
        &opts(OutputFormat::Text)
    );
    assert!(output.contains("=== query.sql ==="));
    assert!(output.contains("SELECT @a; -- x\n.......@.;.----\n"));
    assert!(output.contains("Parameter markers at: 7"));
    assert!(output.contains("Statement separators at: 9"));
    assert!(!output.contains("Unterminated"));
}

#[test]
fn test_scan_yaml_output() {
    let output = format_scan_reports(&[scan_report("SELECT /* x")], &opts(OutputFormat::Yaml));
    assert!(output.contains("unterminated: BlockComment"));
    assert!(output.contains("source: query.sql"));
}

#[test]
fn test_scan_multiple_reports_json_array() {
    let output = format_scan_reports(
        &[scan_report("SELECT 1"), scan_report("SELECT 2")],
        &opts(OutputFormat::Json)
    );
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_colored_output_keeps_content() {
    let options = OutputOptions {
        format:  OutputFormat::Text,
        colored: true
    };
    let output = format_scan_reports(&[scan_report("SELECT 'x")], &options);
    assert!(output.contains("query.sql"));
    assert!(output.contains("Unterminated single-quoted string"));
}

#[test]
fn test_split_json_output() {
    let report = SplitReport {
        source:     "query.sql".to_string(),
        statements: split_statements("SELECT 1; SELECT 2;")
            .into_iter()
            .map(String::from)
            .collect()
    };
    let output = format_split_reports(&[report], &opts(OutputFormat::Json));
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[0]["statements"][1], "SELECT 2");
}

#[test]
fn test_split_text_empty_input() {
    let report = SplitReport {
        source:     "empty.sql".to_string(),
        statements: Vec::new()
    };
    let output = format_split_reports(&[report], &opts(OutputFormat::Text));
    assert!(output.contains("(no statements)"));
}

#[test]
fn test_inline_json_output() {
    let report = inline_report("SELECT * FROM t WHERE name = @name LIMIT @n");
    let output = format_inline_reports(&[report], &opts(OutputFormat::Json));
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        json[0]["sql"],
        "SELECT * FROM t WHERE name = 'O''Brien' LIMIT 10"
    );
    assert_eq!(json[0]["substitutions"][0]["literal"], "'O''Brien'");
    assert_eq!(json[0]["removed"], serde_json::json!(["name", "n"]));
    assert_eq!(json[0]["remaining"], serde_json::json!([]));
}

#[test]
fn test_inline_text_untouched_command() {
    let report = inline_report("SELECT 1");
    let output = format_inline_reports(&[report], &opts(OutputFormat::Text));
    assert!(output.contains("SELECT 1\n"));
    assert!(output.contains("Still bound: name, n"));
    assert!(!output.contains("Removed"));
}
