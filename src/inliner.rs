//! Rewriting parameterised commands into literal commands.
//!
//! Some bind parameters cannot stay bound: MySQL rejects placeholders in a
//! `LIMIT`/`OFFSET` clause on some execution paths, and diagnostic output
//! wants string values visible in the SQL. The [`Inliner`] replaces those
//! placeholders with SQL literals and drops parameters that are no longer
//! referenced from the collection.
//!
//! # Candidate Selection
//!
//! 1. No bound parameters: the text is returned untouched, without scanning.
//! 2. `@name` operands of `LIMIT`/`OFFSET` clauses that name a bound
//!    parameter are inlined.
//! 3. Every reference to a parameter whose value is a string is inlined.
//!
//! Only markers the [`scanner`](crate::scanner) tagged as real parameter
//! markers are considered, so placeholders inside strings and comments are
//! never touched. Substitution runs from the end of the text backwards so
//! earlier positions stay valid.
//!
//! A parameter is removed from the collection only when every reference to
//! it was inlined. One used both in `LIMIT` and in `WHERE` keeps its binding
//! for the `WHERE` reference.
//!
//! # Example
//!
//! ```
//! use sql_literal_inliner::{inliner::inline_literals, parameters::ParameterCollection};
//!
//! let mut params = ParameterCollection::new();
//! params.insert("p2", 7);
//! params.insert("p3", 10);
//!
//! let sql = inline_literals("SELECT * FROM t WHERE id = @p2 LIMIT @p3", &mut params);
//!
//! assert_eq!(sql, "SELECT * FROM t WHERE id = @p2 LIMIT 10");
//! assert!(params.contains("p2"));
//! assert!(!params.contains("p3"));
//! ```

pub mod limit;

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
    sync::LazyLock
};

use compact_str::CompactString;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    literal::{LiteralRenderer, MySqlLiteralRenderer},
    parameters::{ParameterBinding, ParameterCollection, normalize_name},
    scanner::scan
};

/// Regex for the parameter name following a marker.
static PARAMETER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A@([A-Za-z0-9_$]+)").expect("valid regex"));

/// Which kinds of placeholders get inlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineOptions {
    /// Parameters used as `LIMIT`/`OFFSET` operands
    pub limit:   bool,
    /// Parameters holding string values
    pub strings: bool
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            limit:   true,
            strings: true
        }
    }
}

/// One placeholder replaced by a literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Parameter name as bound
    pub name:     String,
    /// Byte offset of the `@` in the original text
    pub position: usize,
    /// SQL literal spliced in place of the placeholder
    pub literal:  String
}

/// Result of rewriting one command
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Rewrite {
    pub sql:           String,
    /// Substitutions in text order
    pub substitutions: Vec<Substitution>,
    /// Parameters removed from the collection
    pub removed:       Vec<String>
}

impl Rewrite {
    fn unchanged(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            ..Default::default()
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.substitutions.is_empty()
    }
}

/// A parameter marker resolved to the name that follows it.
struct Marker {
    range: Range<usize>,
    key:   CompactString
}

/// Literal inliner for parameterised MySQL commands
#[derive(Debug, Clone, Default)]
pub struct Inliner<R = MySqlLiteralRenderer> {
    renderer: R,
    options:  InlineOptions
}

impl Inliner {
    /// Inliner using MySQL literal syntax and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: LiteralRenderer> Inliner<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            options: InlineOptions::default()
        }
    }

    #[must_use]
    pub fn options(mut self, options: InlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Rewrite `sql`, returning only the new text.
    pub fn inline(&self, sql: &str, params: &mut ParameterCollection) -> String {
        self.rewrite(sql, params).sql
    }

    /// Rewrite `sql` and report what was substituted and removed.
    pub fn rewrite(&self, sql: &str, params: &mut ParameterCollection) -> Rewrite {
        if params.is_empty() || sql.is_empty() {
            return Rewrite::unchanged(sql);
        }

        let track = scan(sql);
        let limit_spans = if self.options.limit {
            limit::parameter_spans(sql, &track)
        } else {
            limit::SpanVec::new()
        };
        let textual: HashSet<CompactString> = if self.options.strings {
            params
                .iter()
                .filter(|binding| binding.is_textual())
                .map(|binding| normalize_name(&binding.name))
                .collect()
        } else {
            HashSet::new()
        };
        debug!(
            limit_operands = limit_spans.len(),
            string_parameters = textual.len(),
            "collected inline candidates"
        );
        if limit_spans.is_empty() && textual.is_empty() {
            return Rewrite::unchanged(sql);
        }

        let markers: Vec<Marker> = track
            .parameter_markers()
            .into_iter()
            .filter_map(|position| resolve_marker(sql, position))
            .collect();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for marker in &markers {
            *occurrences.entry(marker.key.as_str()).or_default() += 1;
        }

        let selected = markers.iter().rev().filter(|marker| {
            let in_limit = limit_spans
                .iter()
                .any(|span| span.contains(&marker.range.start));
            (in_limit && params.contains(&marker.key)) || textual.contains(&marker.key)
        });

        let mut text = sql.to_string();
        let mut consumed: HashMap<&str, usize> = HashMap::new();
        let mut substitutions = Vec::new();
        for marker in selected {
            let Some(binding) = params.get(&marker.key) else {
                continue;
            };
            let literal = self.render(binding);
            text.replace_range(marker.range.clone(), &literal);
            *consumed.entry(marker.key.as_str()).or_default() += 1;
            debug!(
                parameter = %binding.name,
                position = marker.range.start,
                "inlined parameter"
            );
            substitutions.push(Substitution {
                name: binding.name.to_string(),
                position: marker.range.start,
                literal
            });
        }
        substitutions.reverse();

        let exhausted: Vec<CompactString> = params
            .iter()
            .map(|binding| normalize_name(&binding.name))
            .filter(|key| {
                consumed
                    .get(key.as_str())
                    .is_some_and(|count| occurrences.get(key.as_str()) == Some(count))
            })
            .collect();
        let mut removed = Vec::with_capacity(exhausted.len());
        for key in exhausted {
            if let Some(binding) = params.remove(&key) {
                debug!(parameter = %binding.name, "removed fully inlined parameter");
                removed.push(binding.name.to_string());
            }
        }

        Rewrite {
            sql: text,
            substitutions,
            removed
        }
    }

    fn render(&self, binding: &ParameterBinding) -> String {
        if binding.value.is_null() {
            return "NULL".to_string();
        }
        self.renderer
            .render(&binding.value, binding.db_type)
            .unwrap_or_else(|| binding.value.to_string())
    }
}

/// Inline with MySQL literal syntax and default options.
pub fn inline_literals(sql: &str, params: &mut ParameterCollection) -> String {
    Inliner::new().inline(sql, params)
}

fn resolve_marker(sql: &str, position: usize) -> Option<Marker> {
    let captures = PARAMETER_NAME_REGEX.captures(&sql[position..])?;
    let token = captures.get(0)?;
    let name = captures.get(1)?;
    Some(Marker {
        range: position..position + token.end(),
        key:   normalize_name(name.as_str())
    })
}
