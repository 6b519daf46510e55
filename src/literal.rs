//! Rendering bind-parameter values as SQL literals.
//!
//! A [`LiteralRenderer`] turns a value and its declared [`DbType`] into the
//! literal text that can stand in for the placeholder. Returning `None`
//! means the renderer has no mapping for that combination; the caller then
//! falls back to the value's plain `Display` text.
//!
//! [`MySqlLiteralRenderer`] is the default and follows MySQL literal syntax.
//!
//! # Example
//!
//! ```
//! use sql_literal_inliner::{
//!     literal::{LiteralRenderer, MySqlLiteralRenderer},
//!     parameters::{DbType, ParameterValue}
//! };
//!
//! let value = ParameterValue::from("O'Brien");
//! let literal = MySqlLiteralRenderer.render(&value, DbType::String);
//!
//! assert_eq!(literal.as_deref(), Some("'O''Brien'"));
//! ```

use chrono::Timelike;

use crate::parameters::{DbType, ParameterValue};

/// Converts a parameter value to SQL literal text.
pub trait LiteralRenderer {
    /// Literal for `value` declared as `db_type`, or `None` when unmapped.
    fn render(&self, value: &ParameterValue, db_type: DbType) -> Option<String>;
}

impl<F> LiteralRenderer for F
where
    F: Fn(&ParameterValue, DbType) -> Option<String>
{
    fn render(&self, value: &ParameterValue, db_type: DbType) -> Option<String> {
        self(value, db_type)
    }
}

/// Literal renderer for MySQL syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlLiteralRenderer;

impl LiteralRenderer for MySqlLiteralRenderer {
    fn render(&self, value: &ParameterValue, db_type: DbType) -> Option<String> {
        let literal = match (value, db_type) {
            (ParameterValue::Null, _) => "NULL".to_string(),
            (ParameterValue::Bool(v), _) => if *v { "TRUE" } else { "FALSE" }.to_string(),
            (ParameterValue::Int(v), _) => v.to_string(),
            (ParameterValue::UInt(v), _) => v.to_string(),
            (ParameterValue::Float(v), _) if v.is_finite() => v.to_string(),
            (ParameterValue::Float(_), _) => return None,
            (ParameterValue::Decimal(v), _) => v.clone(),
            (ParameterValue::Text(v), DbType::Binary) => hex_literal(v.as_bytes()),
            (ParameterValue::Text(v), _) => quote_string(v),
            (ParameterValue::Bytes(v), DbType::String | DbType::Json) => {
                quote_string(std::str::from_utf8(v).ok()?)
            }
            (ParameterValue::Bytes(v), _) => hex_literal(v),
            (ParameterValue::Guid(v), DbType::Binary) => hex_literal(v.as_bytes()),
            (ParameterValue::Guid(v), _) => format!("'{}'", v.hyphenated()),
            (ParameterValue::Date(v), _) => format!("'{}'", v.format("%Y-%m-%d")),
            (ParameterValue::DateTime(v), DbType::Date) => format!("'{}'", v.format("%Y-%m-%d")),
            (ParameterValue::DateTime(v), DbType::Time) => {
                let format = time_format(v.nanosecond());
                format!("'{}'", v.format(format))
            }
            (ParameterValue::DateTime(v), _) => {
                let format = datetime_format(v.nanosecond());
                format!("'{}'", v.format(format))
            }
            (ParameterValue::Time(v), _) => {
                let format = time_format(v.nanosecond());
                format!("'{}'", v.format(format))
            }
        };
        Some(literal)
    }
}

/// Quote a string literal, doubling quotes and backslashes.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

fn hex_literal(bytes: &[u8]) -> String {
    format!("X'{}'", hex::encode_upper(bytes))
}

fn datetime_format(nanos: u32) -> &'static str {
    if nanos == 0 {
        "%Y-%m-%d %H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M:%S%.6f"
    }
}

fn time_format(nanos: u32) -> &'static str {
    if nanos == 0 { "%H:%M:%S" } else { "%H:%M:%S%.6f" }
}
