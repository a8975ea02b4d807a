//! Best-effort scalar conversions
//!
//! Every function is total: values that cannot be read as the target type
//! produce the zero value instead of an error.

use super::value::ToValue;

/// Text form of any scalar
pub fn to_string(value: impl ToValue) -> String {
    value.to_value().as_text().into_owned()
}

/// Integer form of any scalar, `0` on failure
pub fn to_int(value: impl ToValue) -> i64 {
    value.to_value().as_int()
}

/// `f32` form of any scalar, `0.0` on failure
pub fn to_float32(value: impl ToValue) -> f32 {
    value.to_value().as_f32()
}

/// `f64` form of any scalar, `0.0` on failure
pub fn to_float64(value: impl ToValue) -> f64 {
    value.to_value().as_f64()
}

/// Boolean form of any scalar, `false` on failure
pub fn to_bool(value: impl ToValue) -> bool {
    value.to_value().as_bool()
}
