//! Parameter files for the `inline` command.
//!
//! Parameters are listed as `[[parameters]]` tables in TOML, or as a
//! `parameters` array in JSON. `type` is optional and inferred from the
//! value when omitted.
//!
//! ```toml
//! [[parameters]]
//! name = "p0"
//! value = 10
//!
//! [[parameters]]
//! name = "created"
//! type = "datetime"
//! value = "2024-02-29 13:05:09"
//!
//! [[parameters]]
//! name = "digest"
//! type = "binary"
//! value = "deadbeef"
//! ```
//!
//! Temporal values, GUIDs and binary values are written as strings and
//! parsed according to the declared type.

use std::{fs::read_to_string, path::Path};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppResult, config_error, file_read_error, parameter_error},
    parameters::{DbType, ParameterBinding, ParameterCollection, ParameterValue}
};

/// Key the `toml` crate uses when a native TOML datetime is read as a map.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Syntax of a parameters file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsFormat {
    Toml,
    Json
}

impl ParamsFormat {
    /// JSON for `.json` files, TOML otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParametersFile {
    #[serde(default)]
    parameters: Vec<ParameterSpec>
}

#[derive(Debug, Deserialize)]
struct ParameterSpec {
    name:    String,
    #[serde(rename = "type")]
    db_type: Option<DbType>,
    #[serde(default)]
    value:   Value
}

/// Read a parameters file, choosing the syntax from its extension.
pub fn load_parameters(path: &Path) -> AppResult<ParameterCollection> {
    let display = path.display().to_string();
    let content = read_to_string(path).map_err(|e| file_read_error(&display, e))?;
    parse_parameters(&content, ParamsFormat::from_path(path))
}

/// Parse a parameters document into a collection, in file order.
pub fn parse_parameters(content: &str, format: ParamsFormat) -> AppResult<ParameterCollection> {
    let file: ParametersFile = match format {
        ParamsFormat::Toml => toml::from_str(content)
            .map_err(|e| config_error(format!("Invalid parameters file: {}", e)))?,
        ParamsFormat::Json => serde_json::from_str(content)
            .map_err(|e| config_error(format!("Invalid parameters file: {}", e)))?
    };
    file.parameters
        .into_iter()
        .map(into_binding)
        .collect::<AppResult<Vec<_>>>()
        .map(|bindings| bindings.into_iter().collect())
}

fn into_binding(spec: ParameterSpec) -> AppResult<ParameterBinding> {
    let name = spec.name.as_str();
    if name.trim_start_matches(['@', '?']).is_empty() {
        return Err(parameter_error(name, "name is empty"));
    }
    let value = unwrap_toml_datetime(spec.value);
    match spec.db_type {
        Some(db_type) => {
            let value = typed_value(name, db_type, value)?;
            Ok(ParameterBinding::with_type(name, db_type, value))
        }
        None => Ok(ParameterBinding::new(name, inferred_value(name, value)?))
    }
}

fn unwrap_toml_datetime(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(TOML_DATETIME_KEY) => {
            map.remove(TOML_DATETIME_KEY).unwrap_or(Value::Null)
        }
        other => other
    }
}

fn inferred_value(name: &str, value: Value) -> AppResult<ParameterValue> {
    match value {
        Value::Null => Ok(ParameterValue::Null),
        Value::Bool(v) => Ok(ParameterValue::Bool(v)),
        Value::Number(n) => number_value(name, &n),
        Value::String(s) => Ok(ParameterValue::Text(s)),
        Value::Array(_) | Value::Object(_) => Err(parameter_error(
            name,
            "arrays and tables need an explicit type"
        ))
    }
}

fn number_value(name: &str, n: &serde_json::Number) -> AppResult<ParameterValue> {
    if let Some(v) = n.as_i64() {
        Ok(ParameterValue::Int(v))
    } else if let Some(v) = n.as_u64() {
        Ok(ParameterValue::UInt(v))
    } else if let Some(v) = n.as_f64() {
        Ok(ParameterValue::Float(v))
    } else {
        Err(parameter_error(name, format!("unsupported number {}", n)))
    }
}

fn typed_value(name: &str, db_type: DbType, value: Value) -> AppResult<ParameterValue> {
    if value.is_null() {
        return Ok(ParameterValue::Null);
    }
    let mismatch = || parameter_error(name, format!("expected a {} value", db_type));
    match db_type {
        DbType::Bool => value
            .as_bool()
            .map(ParameterValue::Bool)
            .ok_or_else(mismatch),
        DbType::Int => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => number_value(name, &n),
            Value::String(s) => parse_integer(&s).ok_or_else(mismatch),
            _ => Err(mismatch())
        },
        DbType::Float => match value {
            Value::Number(n) => n.as_f64().map(ParameterValue::Float).ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse()
                .map(ParameterValue::Float)
                .map_err(|_| mismatch()),
            _ => Err(mismatch())
        },
        DbType::Decimal => match value {
            Value::Number(n) => Ok(ParameterValue::Decimal(n.to_string())),
            Value::String(s) if is_decimal(&s) => Ok(ParameterValue::Decimal(s.trim().to_string())),
            _ => Err(mismatch())
        },
        DbType::String => match value {
            Value::String(s) => Ok(ParameterValue::Text(s)),
            Value::Number(_) | Value::Bool(_) => Ok(ParameterValue::Text(value.to_string())),
            _ => Err(mismatch())
        },
        DbType::Json => match value {
            Value::String(s) => Ok(ParameterValue::Text(s)),
            other => Ok(ParameterValue::Text(other.to_string()))
        },
        DbType::Binary => match value {
            Value::String(s) => hex::decode(s.trim())
                .map(ParameterValue::Bytes)
                .map_err(|e| parameter_error(name, format!("invalid hex: {}", e))),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(ParameterValue::Bytes)
                .ok_or_else(mismatch),
            _ => Err(mismatch())
        },
        DbType::Guid => {
            let text = value.as_str().ok_or_else(mismatch)?;
            Uuid::parse_str(text.trim())
                .map(ParameterValue::Guid)
                .map_err(|e| parameter_error(name, format!("invalid guid: {}", e)))
        }
        DbType::Date => {
            let text = value.as_str().ok_or_else(mismatch)?;
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(ParameterValue::Date)
                .map_err(|e| parameter_error(name, format!("invalid date: {}", e)))
        }
        DbType::DateTime => {
            let text = value.as_str().ok_or_else(mismatch)?;
            parse_datetime(text.trim())
                .map(ParameterValue::DateTime)
                .ok_or_else(|| parameter_error(name, format!("invalid datetime '{}'", text)))
        }
        DbType::Time => {
            let text = value.as_str().ok_or_else(mismatch)?;
            NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f")
                .map(ParameterValue::Time)
                .map_err(|e| parameter_error(name, format!("invalid time: {}", e)))
        }
    }
}

fn parse_integer(text: &str) -> Option<ParameterValue> {
    let text = text.trim();
    text.parse::<i64>()
        .map(ParameterValue::Int)
        .or_else(|_| text.parse::<u64>().map(ParameterValue::UInt))
        .ok()
}

fn is_decimal(text: &str) -> bool {
    let digits = text.trim().trim_start_matches(['-', '+']);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
