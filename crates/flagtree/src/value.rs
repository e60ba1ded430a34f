//! Typed flag values.
//!
//! A [`Value`] owns the state of one flag and knows how to set it from a raw
//! string and render it back. The rendered form doubles as the frozen default
//! shown in usage text.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ValueError;

/// A settable, renderable unit of flag state.
///
/// Implement this for custom flag types; the built-in variants cover the
/// primitive types.
pub trait Value: fmt::Debug {
    /// Replace the current state with the parsed form of `raw`.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Stable textual form of the current state.
    ///
    /// The rendering taken at definition is the default shown in usage text,
    /// so it should be something `set` accepts: a user copying it onto the
    /// command line expects the same state back. Back-fill itself does not
    /// depend on this; it restores a clone of the defined state.
    fn render(&self) -> String;

    /// Whether presence alone fully specifies the value (`--flag` means true).
    fn is_bool_flag(&self) -> bool {
        false
    }

    /// The typed state, for read-back through [`FlagSet::get`](crate::FlagSet::get).
    fn as_any(&self) -> &dyn Any;

    fn boxed_clone(&self) -> Box<dyn Value>;
}

impl Clone for Box<dyn Value> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Boolean state; the only built-in variant satisfiable by presence alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Value for Bool {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => {
                return Err(ValueError::new(raw, "boolean", "unrecognized literal"));
            }
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.0.to_string()
    }

    fn is_bool_flag(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn boxed_clone(&self) -> Box<dyn Value> {
        Box::new(*self)
    }
}

/// Numeric state backed by any primitive that round-trips through
/// `FromStr`/`Display` (`i32`, `i64`, `u32`, `u64`, `f64`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Number<T>(pub T);

impl<T> Value for Number<T>
where
    T: FromStr + fmt::Display + fmt::Debug + Clone + 'static,
    T::Err: fmt::Display,
{
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = raw
            .parse::<T>()
            .map_err(|e| ValueError::new(raw, std::any::type_name::<T>(), e))?;
        Ok(())
    }

    fn render(&self) -> String {
        self.0.to_string()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn boxed_clone(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
}

/// Free-form string state. Every input is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(pub String);

impl Value for Text {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = raw.to_string();
        Ok(())
    }

    fn render(&self) -> String {
        self.0.clone()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn boxed_clone(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
}

/// Duration state written in human form, e.g. `90s`, `1h 30m`, `250ms`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span(pub Duration);

impl Value for Span {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = humantime::parse_duration(raw).map_err(|e| ValueError::new(raw, "duration", e))?;
        Ok(())
    }

    fn render(&self) -> String {
        humantime::format_duration(self.0).to_string()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn boxed_clone(&self) -> Box<dyn Value> {
        Box::new(*self)
    }
}
