//! Datasets and numeric coercion.
//!
//! A dataset is an ordered list of loosely typed rows. Charts only read the
//! fields their series name, and every read goes through [`to_number`],
//! which never fails: anything that is not a finite number becomes `0`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::series::SeriesDescriptor;

/// One bucket of the dataset: field name to arbitrary value.
pub type Datum = Map<String, Value>;

/// Ordered rows. Row order is the horizontal axis order and is never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Datum>,
}

impl Dataset {
    /// Wrap already-parsed rows.
    #[must_use]
    pub const fn new(rows: Vec<Datum>) -> Self {
        Self { rows }
    }

    /// Parse rows from JSON text. See [`Dataset::from_value`].
    ///
    /// Number literals too large for an `f64`, such as `1e400`, are read as
    /// strings so that only their own cell coerces to zero.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(&quote_overflowing_numbers(text))?;
        Self::from_value(value)
    }

    /// Build a dataset from a JSON array of rows, or from a timeseries
    /// envelope whose `buckets` field holds the rows.
    ///
    /// Entries that are not objects become empty rows so that every entry
    /// keeps its horizontal position.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut envelope) => match envelope.remove("buckets") {
                Some(Value::Array(items)) => items,
                _ => return Err(DataError::UnexpectedShape("object without 'buckets' array")),
            },
            Value::Null => return Err(DataError::UnexpectedShape("null")),
            Value::Bool(_) => return Err(DataError::UnexpectedShape("boolean")),
            Value::Number(_) => return Err(DataError::UnexpectedShape("number")),
            Value::String(_) => return Err(DataError::UnexpectedShape("string")),
        };

        let rows = items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => row,
                _ => Datum::new(),
            })
            .collect();
        Ok(Self { rows })
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Datum] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Datum> {
        self.rows.get(index)
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Datum> {
        self.rows.iter()
    }

    /// Coerced values of one field, one per row.
    #[must_use]
    pub fn column(&self, key: &str) -> Vec<f64> {
        self.rows.iter().map(|row| field_number(row, key)).collect()
    }
}

/// Wrap every number literal outside a string that overflows `f64` in quotes.
fn quote_overflowing_numbers(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                while i < bytes.len()
                    && matches!(bytes[i], b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
                {
                    i += 1;
                }
                let literal = &text[start..i];
                if literal.parse::<f64>().is_ok_and(f64::is_infinite) {
                    let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 8));
                    buf.push_str(&text[copied..start]);
                    buf.push('"');
                    buf.push_str(literal);
                    buf.push('"');
                    copied = i;
                }
            }
            _ => i += 1,
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

impl FromIterator<Datum> for Dataset {
    fn from_iter<T: IntoIterator<Item = Datum>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Datum;
    type IntoIter = std::slice::Iter<'a, Datum>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// How a field value turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// The value was numeric (number, numeric string or boolean).
    Exact,
    /// The field was absent, null or a blank string.
    Missing,
    /// The field held something non-numeric and was replaced by zero.
    Defaulted,
}

/// Coerce a field value to a finite number, reporting how.
#[must_use]
pub fn coerce(value: Option<&Value>) -> (f64, Coercion) {
    let Some(value) = value else {
        return (0.0, Coercion::Missing);
    };

    match value {
        Value::Null => (0.0, Coercion::Missing),
        Value::Bool(b) => (f64::from(u8::from(*b)), Coercion::Exact),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.is_finite() => (v, Coercion::Exact),
            _ => (0.0, Coercion::Defaulted),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return (0.0, Coercion::Missing);
            }
            match parse_numeric(trimmed) {
                Some(v) if v.is_finite() => (v, Coercion::Exact),
                _ => (0.0, Coercion::Defaulted),
            }
        }
        Value::Array(_) | Value::Object(_) => (0.0, Coercion::Defaulted),
    }
}

/// Decimal text, or unsigned `0x`/`0o`/`0b` integer literals.
fn parse_numeric(text: &str) -> Option<f64> {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return text.parse().ok(),
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
}

/// Convert any value to a finite number, defaulting to `0`.
///
/// ```
/// use plotline_charts::to_number;
/// use serde_json::json;
///
/// assert_eq!(to_number(&json!(12.5)), 12.5);
/// assert_eq!(to_number(&json!(" 7 ")), 7.0);
/// assert_eq!(to_number(&json!("0x10")), 16.0);
/// assert_eq!(to_number(&json!("N/A")), 0.0);
/// assert_eq!(to_number(&json!(null)), 0.0);
/// ```
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    coerce(Some(value)).0
}

/// Read and coerce one field of a row.
#[must_use]
pub fn field_number(datum: &Datum, key: &str) -> f64 {
    coerce(datum.get(key)).0
}

/// Per-series count of values the coercion had to paper over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionAudit {
    /// Field the series reads
    pub data_key: String,
    /// Rows where the field was absent or null
    pub missing: usize,
    /// Rows where the field was present but not numeric
    pub defaulted: usize,
}

impl CoercionAudit {
    /// Whether every row held a usable number.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.missing == 0 && self.defaulted == 0
    }
}

/// Report, without changing anything that is drawn, which series read
/// missing or non-numeric values.
#[must_use]
pub fn audit_series(dataset: &Dataset, series: &[SeriesDescriptor]) -> Vec<CoercionAudit> {
    series
        .iter()
        .map(|s| {
            let mut audit = CoercionAudit {
                data_key: s.data_key.clone(),
                missing: 0,
                defaulted: 0,
            };
            for row in dataset {
                match coerce(row.get(&s.data_key)).1 {
                    Coercion::Exact => {}
                    Coercion::Missing => audit.missing += 1,
                    Coercion::Defaulted => audit.defaulted += 1,
                }
            }
            audit
        })
        .collect()
}
