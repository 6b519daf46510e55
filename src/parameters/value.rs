use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Runtime value of a bind parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Exact numeric kept as text to preserve precision
    Decimal(String),
    Text(String),
    Bytes(Vec<u8>),
    Guid(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime)
}

impl ParameterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is string-typed.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Decimal(v) | Self::Text(v) => write!(f, "{}", v),
            Self::Bytes(v) => write!(f, "{}", hex::encode(v)),
            Self::Guid(v) => write!(f, "{}", v.hyphenated()),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f"))
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for ParameterValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for ParameterValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Uuid> for ParameterValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<NaiveDate> for ParameterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ParameterValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveTime> for ParameterValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Declared database type of a bind parameter.
///
/// Usually inferred from the value; set explicitly when the column type
/// differs from the runtime type (a date-only column fed a timestamp, a
/// binary column fed text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    Bool,
    Int,
    Float,
    Decimal,
    String,
    Json,
    Binary,
    Guid,
    Date,
    DateTime,
    Time
}

impl DbType {
    /// Declared type a parameter gets when none is given.
    pub fn infer(value: &ParameterValue) -> Self {
        match value {
            ParameterValue::Null | ParameterValue::Text(_) => Self::String,
            ParameterValue::Bool(_) => Self::Bool,
            ParameterValue::Int(_) | ParameterValue::UInt(_) => Self::Int,
            ParameterValue::Float(_) => Self::Float,
            ParameterValue::Decimal(_) => Self::Decimal,
            ParameterValue::Bytes(_) => Self::Binary,
            ParameterValue::Guid(_) => Self::Guid,
            ParameterValue::Date(_) => Self::Date,
            ParameterValue::DateTime(_) => Self::DateTime,
            ParameterValue::Time(_) => Self::Time
        }
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Decimal => write!(f, "decimal"),
            Self::String => write!(f, "string"),
            Self::Json => write!(f, "json"),
            Self::Binary => write!(f, "binary"),
            Self::Guid => write!(f, "guid"),
            Self::Date => write!(f, "date"),
            Self::DateTime => write!(f, "datetime"),
            Self::Time => write!(f, "time")
        }
    }
}
