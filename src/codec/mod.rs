//! Value codec for typed variables
//!
//! Supported types:
//! - string: arbitrary UTF-8 text
//! - integer: 64-bit signed integer
//! - float: 64-bit floating point
//! - boolean: true/false
//! - color: three integers in 0-255, ordered (R, G, B)
//! - vector: three floats, ordered (X, Y, Z)
//!
//! Every value enters the system as raw text. [`parse`] turns text into a
//! [`VarValue`] for a declared [`VarType`]; [`format`] renders it back.
//! The two round-trip: `parse(ty, format(v)) == v` for every valid `v`.

mod errors;

pub use errors::{CodecError, CodecResult};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Supported variable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    String,
    Integer,
    Float,
    Boolean,
    Color,
    Vector,
}

impl VarType {
    /// Returns the type name used in persisted records and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Integer => "integer",
            VarType::Float => "float",
            VarType::Boolean => "boolean",
            VarType::Color => "color",
            VarType::Vector => "vector",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for VarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(VarType::String),
            "integer" => Ok(VarType::Integer),
            "float" => Ok(VarType::Float),
            "boolean" => Ok(VarType::Boolean),
            "color" => Ok(VarType::Color),
            "vector" => Ok(VarType::Vector),
            other => Err(format!(
                "unknown type '{}' (expected string, integer, float, boolean, color or vector)",
                other
            )),
        }
    }
}

/// A typed variable value
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Color([u8; 3]),
    Vector([f64; 3]),
}

impl VarValue {
    /// Returns the type this value belongs to
    pub fn var_type(&self) -> VarType {
        match self {
            VarValue::String(_) => VarType::String,
            VarValue::Integer(_) => VarType::Integer,
            VarValue::Float(_) => VarType::Float,
            VarValue::Boolean(_) => VarType::Boolean,
            VarValue::Color(_) => VarType::Color,
            VarValue::Vector(_) => VarType::Vector,
        }
    }

    /// Renders the value in its persisted JSON form.
    ///
    /// Color and vector become 3-element numeric arrays; the scalar types
    /// serialize as their native JSON scalars.
    pub fn to_json(&self) -> Value {
        match self {
            VarValue::String(s) => Value::String(s.clone()),
            VarValue::Integer(n) => json!(n),
            VarValue::Float(x) => json!(x),
            VarValue::Boolean(b) => Value::Bool(*b),
            VarValue::Color([r, g, b]) => json!([r, g, b]),
            VarValue::Vector([x, y, z]) => json!([x, y, z]),
        }
    }

    /// Decodes a persisted JSON value against a declared type.
    ///
    /// String-typed values are permissive: a non-string scalar is kept as
    /// its textual rendering rather than rejected.
    pub fn from_json(ty: VarType, value: &Value) -> CodecResult<Self> {
        match ty {
            VarType::String => Ok(match value {
                Value::String(s) => VarValue::String(s.clone()),
                other => VarValue::String(other.to_string()),
            }),
            VarType::Integer => value
                .as_i64()
                .map(VarValue::Integer)
                .ok_or_else(|| CodecError::InvalidNumber(value.to_string())),
            VarType::Float => value
                .as_f64()
                .map(VarValue::Float)
                .ok_or_else(|| CodecError::InvalidNumber(value.to_string())),
            VarType::Boolean => value
                .as_bool()
                .map(VarValue::Boolean)
                .ok_or_else(|| CodecError::InvalidBoolean(value.to_string())),
            VarType::Color => {
                let parts = value
                    .as_array()
                    .filter(|a| a.len() == 3)
                    .ok_or_else(|| CodecError::InvalidColor(value.to_string()))?;
                let mut rgb = [0u8; 3];
                for (slot, part) in rgb.iter_mut().zip(parts) {
                    let n = part
                        .as_i64()
                        .ok_or_else(|| CodecError::InvalidColor(value.to_string()))?;
                    if !(0..=255).contains(&n) {
                        return Err(CodecError::ColorComponentOutOfRange(n));
                    }
                    *slot = n as u8;
                }
                Ok(VarValue::Color(rgb))
            }
            VarType::Vector => {
                let parts = value
                    .as_array()
                    .filter(|a| a.len() == 3)
                    .ok_or_else(|| CodecError::InvalidVector(value.to_string()))?;
                let mut xyz = [0f64; 3];
                for (slot, part) in xyz.iter_mut().zip(parts) {
                    *slot = part
                        .as_f64()
                        .ok_or_else(|| CodecError::InvalidVector(value.to_string()))?;
                }
                Ok(VarValue::Vector(xyz))
            }
        }
    }
}

/// Parses raw text into a value of the given type.
pub fn parse(ty: VarType, raw: &str) -> CodecResult<VarValue> {
    let text = raw.trim();
    match ty {
        VarType::String => Ok(VarValue::String(raw.to_string())),
        VarType::Integer => text
            .parse::<i64>()
            .map(VarValue::Integer)
            .map_err(|_| CodecError::InvalidNumber(raw.to_string())),
        // Non-finite floats are rejected: the persisted form is JSON, which
        // has no representation for nan or infinity.
        VarType::Float => match text.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(VarValue::Float(x)),
            _ => Err(CodecError::InvalidNumber(raw.to_string())),
        },
        VarType::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Ok(VarValue::Boolean(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(VarValue::Boolean(false))
            } else {
                Err(CodecError::InvalidBoolean(raw.to_string()))
            }
        }
        VarType::Color => parse_color(raw),
        VarType::Vector => parse_vector(raw),
    }
}

/// Renders a value back to its textual form.
///
/// Color and vector render as a bracketed comma-joined list, the scalar
/// types as their natural text.
pub fn format(value: &VarValue) -> String {
    match value {
        VarValue::String(s) => s.clone(),
        VarValue::Integer(n) => n.to_string(),
        VarValue::Float(x) => x.to_string(),
        VarValue::Boolean(b) => b.to_string(),
        VarValue::Color([r, g, b]) => format!("[{}, {}, {}]", r, g, b),
        VarValue::Vector([x, y, z]) => format!("[{}, {}, {}]", x, y, z),
    }
}

/// Checks that a value conforms to the given type.
pub fn validate(ty: VarType, value: &VarValue) -> bool {
    value.var_type() == ty
}

/// Splits a comma-separated component list, dropping any bracket or
/// parenthesis characters first ("[255, 0, 0]" and "(255, 0, 0)" are both
/// accepted alongside "255, 0, 0").
fn split_components(raw: &str) -> Vec<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']'))
        .collect();
    stripped.split(',').map(|t| t.trim().to_string()).collect()
}

fn parse_color(raw: &str) -> CodecResult<VarValue> {
    let tokens = split_components(raw);
    if tokens.len() != 3 {
        return Err(CodecError::InvalidColor(raw.to_string()));
    }
    let mut rgb = [0u8; 3];
    for (slot, token) in rgb.iter_mut().zip(&tokens) {
        let n: i64 = token
            .parse()
            .map_err(|_| CodecError::InvalidColor(raw.to_string()))?;
        if !(0..=255).contains(&n) {
            return Err(CodecError::ColorComponentOutOfRange(n));
        }
        *slot = n as u8;
    }
    Ok(VarValue::Color(rgb))
}

fn parse_vector(raw: &str) -> CodecResult<VarValue> {
    let tokens = split_components(raw);
    if tokens.len() != 3 {
        return Err(CodecError::InvalidVector(raw.to_string()));
    }
    let mut xyz = [0f64; 3];
    for (slot, token) in xyz.iter_mut().zip(&tokens) {
        let component: f64 = token
            .parse()
            .map_err(|_| CodecError::InvalidVector(raw.to_string()))?;
        if !component.is_finite() {
            return Err(CodecError::InvalidVector(raw.to_string()));
        }
        *slot = component;
    }
    Ok(VarValue::Vector(xyz))
}
