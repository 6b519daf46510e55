// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use clap::Parser;
use sql_literal_inliner::cli::{Cli, Commands, Format};

#[test]
fn test_scan_command() {
    let cli = Cli::try_parse_from(["sql-literal-inliner", "scan", "-q", "a.sql", "b.sql"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Scan {
            input,
            output
        } => {
            assert_eq!(input.queries.len(), 2);
            assert!(output.output_format.is_none());
            assert!(!output.no_color);
        }
        _ => panic!("expected scan")
    }
}

#[test]
fn test_inline_command_flags() {
    let cli = Cli::try_parse_from([
        "sql-literal-inliner",
        "inline",
        "-q",
        "-",
        "-p",
        "params.toml",
        "--no-strings",
        "-f",
        "json",
        "--no-color",
        "-v"
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Inline {
            input,
            params,
            no_limit,
            no_strings,
            output
        } => {
            assert_eq!(input.queries[0].to_str(), Some("-"));
            assert_eq!(params.unwrap().to_str(), Some("params.toml"));
            assert!(!no_limit);
            assert!(no_strings);
            assert_eq!(output.output_format, Some(Format::Json));
            assert!(output.no_color);
        }
        _ => panic!("expected inline")
    }
}

#[test]
fn test_queries_required() {
    assert!(Cli::try_parse_from(["sql-literal-inliner", "split"]).is_err());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(
        Cli::try_parse_from(["sql-literal-inliner", "scan", "-q", "a.sql", "-f", "sarif"])
            .is_err()
    );
}

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
}
