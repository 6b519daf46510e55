//! # SQL Literal Inliner Library
//!
//! Lexical scanning of MySQL command text and inlining of bind parameters as
//! SQL literals.
//!
//! - [`scanner`] - Per-byte lexical state tracking
//! - [`inliner`] - Rewriting `LIMIT`/`OFFSET` and string parameters
//! - [`parameters`] - Bound parameter values and collections
//! - [`literal`] - Rendering values as MySQL literals
//!
//! # Example
//!
//! ```
//! use sql_literal_inliner::{Inliner, ParameterCollection};
//!
//! let mut params = ParameterCollection::new();
//! params.insert("p0", 5);
//!
//! let sql = Inliner::new().inline("SELECT * FROM t LIMIT @p0", &mut params);
//!
//! assert_eq!(sql, "SELECT * FROM t LIMIT 5");
//! assert!(params.is_empty());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod inliner;
pub mod literal;
pub mod logging;
pub mod output;
pub mod parameters;
pub mod scanner;

pub use inliner::{InlineOptions, Inliner, Rewrite, Substitution, inline_literals};
pub use literal::{LiteralRenderer, MySqlLiteralRenderer};
pub use parameters::{DbType, ParameterBinding, ParameterCollection, ParameterValue};
pub use scanner::{LexicalState, StateTrack, scan, split_statements};
