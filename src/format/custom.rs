//! Adapters for caller-supplied formatters

use super::{Formatter, Value};
use std::any::Any;
use std::marker::PhantomData;

/// Formatter from a closure that returns `None` for values it does not handle
pub struct FnFormatter<F> {
    f: F,
}

impl<F> FnFormatter<F>
where
    F: Fn(&Value) -> Option<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&Value) -> Option<String> + Send + Sync,
{
    fn is_supported(&self, value: &Value) -> bool {
        (self.f)(value).is_some()
    }

    fn format(&self, value: &Value) -> String {
        (self.f)(value).unwrap_or_default()
    }
}

/// Formatter from a predicate and a conversion
pub struct PredicateFormatter<P, F> {
    predicate: P,
    format: F,
}

impl<P, F> PredicateFormatter<P, F>
where
    P: Fn(&Value) -> bool + Send + Sync,
    F: Fn(&Value) -> String + Send + Sync,
{
    pub fn new(predicate: P, format: F) -> Self {
        Self { predicate, format }
    }
}

impl<P, F> Formatter for PredicateFormatter<P, F>
where
    P: Fn(&Value) -> bool + Send + Sync,
    F: Fn(&Value) -> String + Send + Sync,
{
    fn is_supported(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn format(&self, value: &Value) -> String {
        (self.format)(value)
    }
}

/// Formatter for [`Value::Custom`] values holding a `T`
pub struct TypedFormatter<T, F> {
    format: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedFormatter<T, F>
where
    T: Any,
    F: Fn(&T) -> String + Send + Sync,
{
    pub fn new(format: F) -> Self {
        Self {
            format,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Formatter for TypedFormatter<T, F>
where
    T: Any,
    F: Fn(&T) -> String + Send + Sync,
{
    fn is_supported(&self, value: &Value) -> bool {
        value.downcast_ref::<T>().is_some()
    }

    fn format(&self, value: &Value) -> String {
        value
            .downcast_ref::<T>()
            .map(|v| (self.format)(v))
            .unwrap_or_default()
    }
}
