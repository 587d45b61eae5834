//! Parameter values and their fixed-width text form
//!
//! The simulator reads integers as bare digits, reals from an 8-character
//! field with 3 decimals, and logicals as a single `T`/`F`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ParamKind;
use crate::error::ValueError;

/// A scalar parameter value as given by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Bool(_) | ParamValue::Str(_) => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, ParamValue::Float(f) if f.is_nan())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

fn mismatch(kind: ParamKind, value: &ParamValue) -> ValueError {
    ValueError::KindMismatch {
        kind,
        value: value.to_string(),
    }
}

fn finite(v: f64) -> Result<f64, ValueError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValueError::NonFinite(v))
    }
}

/// Write a value the way the simulator expects a field of `kind`.
///
/// Reals given to an integer field are truncated toward zero and integers
/// given to a real field are widened.
pub fn format_value(kind: ParamKind, value: &ParamValue) -> Result<String, ValueError> {
    match kind {
        ParamKind::Int => {
            let i = match value {
                ParamValue::Int(i) => *i,
                ParamValue::Float(f) => {
                    let t = finite(*f)?.trunc();
                    // `as` would saturate
                    if t < i64::MIN as f64 || t >= i64::MAX as f64 {
                        return Err(mismatch(kind, value));
                    }
                    t as i64
                }
                ParamValue::Str(s) => s.trim().parse().map_err(|_| mismatch(kind, value))?,
                ParamValue::Bool(_) => return Err(mismatch(kind, value)),
            };
            Ok(i.to_string())
        }
        ParamKind::Float => {
            let f = match value {
                ParamValue::Float(f) => finite(*f)?,
                ParamValue::Int(i) => *i as f64,
                ParamValue::Str(s) => {
                    finite(s.trim().parse().map_err(|_| mismatch(kind, value))?)?
                }
                ParamValue::Bool(_) => return Err(mismatch(kind, value)),
            };
            Ok(format!("{f:8.3}"))
        }
        ParamKind::Bool => match value {
            ParamValue::Bool(true) => Ok("T".to_string()),
            ParamValue::Bool(false) => Ok("F".to_string()),
            // "T", "F", "True" and "False" all reduce to their first letter
            ParamValue::Str(s) if s.starts_with('T') || s.starts_with('F') => {
                Ok(s[..1].to_string())
            }
            _ => Err(mismatch(kind, value)),
        },
        ParamKind::Str => {
            let text = match value {
                ParamValue::Str(s) => s.clone(),
                ParamValue::Int(i) => i.to_string(),
                _ => return Err(mismatch(kind, value)),
            };
            // Fields are whitespace separated, so a value must be one token
            if text.is_empty() || text.contains(char::is_whitespace) {
                return Err(mismatch(kind, value));
            }
            Ok(text)
        }
    }
}

/// Read field text back the way the simulator would
pub fn parse_value(kind: ParamKind, text: &str) -> Result<ParamValue, ValueError> {
    let trimmed = text.trim();
    let unparseable = || ValueError::Unparseable {
        kind,
        text: text.to_string(),
    };
    match kind {
        ParamKind::Int => trimmed.parse().map(ParamValue::Int).map_err(|_| unparseable()),
        ParamKind::Float => trimmed
            .parse()
            .map(ParamValue::Float)
            .map_err(|_| unparseable()),
        ParamKind::Bool => match trimmed {
            "T" => Ok(ParamValue::Bool(true)),
            "F" => Ok(ParamValue::Bool(false)),
            _ => Err(unparseable()),
        },
        ParamKind::Str if trimmed.is_empty() => Err(unparseable()),
        ParamKind::Str => Ok(ParamValue::Str(trimmed.to_string())),
    }
}
