//! Scalar cell values

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A scalar cell value of any supported kind
#[derive(Debug, Clone, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Anything else, kept in its structured form
    Json(serde_json::Value),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            // Bitwise so that Eq and Hash agree, NaN included
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::UInt(u) => u.hash(state),
            Value::Float32(f) => f.to_bits().hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::Json(j) => j.to_string().hash(state),
        }
    }
}

impl Value {
    /// Wrap any serializable value; serialization failures become `Null`
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value)
            .map(Value::Json)
            .unwrap_or(Value::Null)
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical text form
    ///
    /// Floats use the shortest representation that round-trips, never an
    /// exponent. Null and structured values render as JSON.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::UInt(u) => Cow::Owned(u.to_string()),
            Value::Float32(f) => Cow::Owned(f.to_string()),
            Value::Float64(f) => Cow::Owned(f.to_string()),
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Bytes(b) => String::from_utf8_lossy(b),
            Value::Json(j) => Cow::Owned(j.to_string()),
        }
    }

    /// Integer form, zero when the value cannot be read as one
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::UInt(u) => *u as i64,
            Value::Float32(f) => *f as i64,
            Value::Float64(f) => *f as i64,
            Value::String(s) => s.parse().unwrap_or(0),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            Value::Null | Value::Json(_) => 0,
        }
    }

    /// Single-precision form, zero when the value cannot be read as one
    pub fn as_f32(&self) -> f32 {
        match self {
            Value::Bool(b) => f32::from(u8::from(*b)),
            Value::Int(i) => *i as f32,
            Value::UInt(u) => *u as f32,
            Value::Float32(f) => *f,
            Value::Float64(f) => *f as f32,
            Value::String(s) => s.parse().unwrap_or(0.0),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            Value::Null | Value::Json(_) => 0.0,
        }
    }

    /// Double-precision form, zero when the value cannot be read as one
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::UInt(u) => *u as f64,
            Value::Float32(f) => f64::from(*f),
            Value::Float64(f) => *f,
            Value::String(s) => s.parse().unwrap_or(0.0),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            Value::Null | Value::Json(_) => 0.0,
        }
    }

    /// Boolean form; text follows the lenient `t`/`1`/`TRUE` grammar
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::UInt(u) => *u != 0,
            Value::Float32(f) => *f != 0.0,
            Value::Float64(f) => *f != 0.0,
            Value::String(s) => parse_bool(s).unwrap_or(false),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(parse_bool)
                .unwrap_or(false),
            Value::Null | Value::Json(_) => false,
        }
    }
}

/// Parse the boolean spellings accepted in CSV cells
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Conversion of field and cell types into a [`Value`]
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::Json(self.clone())
    }
}

macro_rules! scalar_value {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl ToValue for $source {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }

            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

scalar_value!(Int(i64): i8, i16, i32, i64, isize);
scalar_value!(UInt(u64): u8, u16, u32, u64, usize);
scalar_value!(Float32(f32): f32);
scalar_value!(Float64(f64): f64);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<serde_json::Value> for Value {
    fn from(j: serde_json::Value) -> Self {
        Value::Json(j)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
