//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. Missing keys and
//! wrongly-typed values yield the default, so effect construction never fails
//! on a sloppy params object.

use crate::color::Rgba;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`; integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`. Only non-negative integers qualify.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts an owned string from `params[name]`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a hex color from `params[name]`.
///
/// A present but unparseable string logs a warning and yields the default.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    match params.get(name).and_then(Value::as_str) {
        Some(s) => Rgba::from_hex(s).unwrap_or_else(|e| {
            log::warn!("param '{name}': {e}, using {}", default.to_hex());
            default
        }),
        None => default,
    }
}

/// Extracts a list of strings from `params[name]`, skipping non-string items.
pub fn param_strings(params: &Value, name: &str, default: &[&str]) -> Vec<String> {
    match params.get(name).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        None => default.iter().map(|s| (*s).to_owned()).collect(),
    }
}
