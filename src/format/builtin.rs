//! Built-in formatters, consulted after any custom formatter

use super::{Formatter, Value};
use time::macros::format_description;

pub struct StringFormatter;

impl Formatter for StringFormatter {
    fn is_supported(&self, value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn format(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            _ => String::new(),
        }
    }
}

/// Integral numbers without decimals, everything else with two
pub struct NumberFormatter;

impl NumberFormatter {
    pub fn format_number(n: f64) -> String {
        if n.is_nan() {
            "NaN".to_string()
        } else if n == f64::INFINITY {
            "Infinity".to_string()
        } else if n == f64::NEG_INFINITY {
            "-Infinity".to_string()
        } else if n == 0.0 {
            // also covers -0
            "0".to_string()
        } else if n.fract() == 0.0 {
            format!("{n:.0}")
        } else {
            format!("{n:.2}")
        }
    }
}

impl Formatter for NumberFormatter {
    fn is_supported(&self, value: &Value) -> bool {
        matches!(value, Value::Number(_))
    }

    fn format(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => Self::format_number(*n),
            _ => String::new(),
        }
    }
}

/// `DD/MM/YYYY`, regardless of locale
pub struct DateFormatter;

impl Formatter for DateFormatter {
    fn is_supported(&self, value: &Value) -> bool {
        matches!(value, Value::Date(_) | Value::DateTime(_))
    }

    fn format(&self, value: &Value) -> String {
        let date = match value {
            Value::Date(date) => *date,
            Value::DateTime(dt) => dt.date(),
            _ => return String::new(),
        };
        date.format(format_description!("[day]/[month]/[year]"))
            .unwrap_or_else(|_| date.to_string())
    }
}

pub struct BooleanFormatter;

impl Formatter for BooleanFormatter {
    fn is_supported(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn format(&self, value: &Value) -> String {
        match value {
            Value::Bool(true) => "Yes".to_string(),
            _ => "No".to_string(),
        }
    }
}

pub struct NullFormatter;

impl Formatter for NullFormatter {
    fn is_supported(&self, value: &Value) -> bool {
        value.is_null()
    }

    fn format(&self, _value: &Value) -> String {
        "-".to_string()
    }
}
