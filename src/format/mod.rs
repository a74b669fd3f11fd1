//! Multi-type value formatting
//!
//! A [`FormatterChain`] turns a [`Value`] into display text by asking each
//! formatter in turn whether it supports the value. Custom formatters are
//! consulted first, in registration order, followed by the built-ins:
//!
//! | Built-in             | Accepts                 | Output                  |
//! |----------------------|-------------------------|-------------------------|
//! | [`StringFormatter`]  | `Value::String`         | the text unchanged      |
//! | [`NumberFormatter`]  | `Value::Number`         | `3`, `3.50`             |
//! | [`DateFormatter`]    | `Value::Date[Time]`     | `01/09/2024`            |
//! | [`BooleanFormatter`] | `Value::Bool`           | `Yes` / `No`            |
//! | [`NullFormatter`]    | `Value::Null`           | `-`                     |
//!
//! The first formatter whose `is_supported` returns `true` wins. A value no
//! formatter accepts fails with [`Error::Format`].
//!
//! ```
//! use easy_pdf::format::{FormatterChain, TypedFormatter, Value};
//!
//! struct Point { x: i32, y: i32 }
//!
//! let mut chain = FormatterChain::new();
//! chain.push(TypedFormatter::new(|p: &Point| format!("({}, {})", p.x, p.y)));
//!
//! assert_eq!(chain.format(&Value::from(3.5)).unwrap(), "3.50");
//! assert_eq!(chain.format(&Value::custom(Point { x: 1, y: 2 })).unwrap(), "(1, 2)");
//! ```

mod builtin;
mod custom;
mod value;

pub use builtin::{BooleanFormatter, DateFormatter, NullFormatter, NumberFormatter, StringFormatter};
pub use custom::{FnFormatter, PredicateFormatter, TypedFormatter};
pub use value::{CustomValue, Value};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Converts supported values to display text
pub trait Formatter: Send + Sync {
    /// Whether this formatter handles `value`
    fn is_supported(&self, value: &Value) -> bool;

    /// Text for `value`; only called when [`is_supported`](Self::is_supported) returned `true`
    fn format(&self, value: &Value) -> String;
}

static BUILTIN_FORMATTERS: [&dyn Formatter; 5] = [
    &StringFormatter,
    &NumberFormatter,
    &DateFormatter,
    &BooleanFormatter,
    &NullFormatter,
];

/// Ordered list of formatters: custom ones first, then the built-ins
#[derive(Clone, Default)]
pub struct FormatterChain {
    custom: Vec<Arc<dyn Formatter>>,
}

impl FormatterChain {
    /// Chain with only the built-in formatters
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a custom formatter, ahead of the built-ins
    pub fn push<F: Formatter + 'static>(&mut self, formatter: F) {
        self.custom.push(Arc::new(formatter));
    }

    #[must_use]
    pub fn with<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.push(formatter);
        self
    }

    /// Number of custom formatters
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// First formatter that supports `value`
    pub fn resolve(&self, value: &Value) -> Result<&dyn Formatter> {
        if let Some(formatter) = self.custom.iter().find(|f| f.is_supported(value)) {
            return Ok(formatter.as_ref());
        }
        BUILTIN_FORMATTERS
            .iter()
            .copied()
            .find(|f| f.is_supported(value))
            .ok_or_else(|| Error::format(value.describe()))
    }

    pub fn format(&self, value: &Value) -> Result<String> {
        let formatter = self.resolve(value)?;
        Ok(formatter.format(value))
    }
}

impl fmt::Debug for FormatterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterChain")
            .field("custom", &self.custom.len())
            .field("builtin", &BUILTIN_FORMATTERS.len())
            .finish()
    }
}
