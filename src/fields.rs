//! Field resolution for loosely-shaped upstream JSON.
//!
//! The upstream API renames fields between endpoint versions (`title` vs
//! `name`, `balance` vs `available_balance`, ...). Each logical field is
//! described by a [`FieldChain`]: an ordered list of candidate keys where the
//! first present, non-null value wins.
//!
//! The coercions mirror what the dashboard displays: numbers may arrive as
//! strings, display text may arrive as numbers, and flags may arrive as any
//! JSON value.

use serde_json::Value;

/// Placeholder rendered for a missing display value.
pub const DASH: &str = "—";

/// Ordered candidate keys for one logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChain {
    candidates: &'static [&'static str],
}

impl FieldChain {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// Returns the first candidate that is present and not `null`.
    ///
    /// Anything other than an object resolves to `None`.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let obj = value.as_object()?;
        self.candidates
            .iter()
            .filter_map(|key| obj.get(*key))
            .find(|v| !v.is_null())
    }

    /// Resolves against `value` first, then against `fallback` when present.
    pub fn resolve_or<'a>(
        &self,
        value: &'a Value,
        fallback: Option<(&FieldChain, &'a Value)>,
    ) -> Option<&'a Value> {
        self.resolve(value)
            .or_else(|| fallback.and_then(|(chain, nested)| chain.resolve(nested)))
    }

    /// Resolved value as a number, `None` when absent or not numeric.
    pub fn number(&self, value: &Value) -> Option<f64> {
        self.resolve(value).and_then(to_number)
    }

    /// Resolved value as display text, `None` when absent.
    pub fn text(&self, value: &Value) -> Option<String> {
        self.resolve(value).and_then(to_text)
    }

    /// Resolved display text, or `default` when absent.
    pub fn text_or(&self, value: &Value, default: &str) -> String {
        self.text(value).unwrap_or_else(|| default.to_string())
    }
}

/// Numeric coercion with the dashboard's loose rules.
///
/// Numbers pass through, numeric strings are parsed (blank counts as zero),
/// booleans are 1/0 and `null` is zero. Arrays, objects and unparseable
/// strings are not numbers.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Integer coercion for ids and durations: only whole numbers, given as a
/// JSON number or a numeric string, qualify. Booleans and `null` do not.
pub fn to_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    if !value.is_number() && !value.is_string() {
        return None;
    }
    let n = to_number(value)?;
    if n.fract() != 0.0 || n.abs() > i64::MAX as f64 {
        return None;
    }
    Some(n as i64)
}

/// Display text for a scalar value.
///
/// Whole floats render without a fraction (`499.0` shows as `499`).
/// `null`, arrays and objects have no display text.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// Display text that treats an empty string as missing.
pub fn non_empty_text(value: &Value) -> Option<String> {
    to_text(value).filter(|s| !s.is_empty())
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The array held at `key`, if the value is an object and `key` holds an array.
pub fn array_at<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}
