// quill-embed - Embedding API for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type conversion between Rust and Quill values.
//!
//! This module provides the [`IntoValue`] and [`FromValue`] traits for
//! converting between host types and [`Value`].
//!
//! # Built-in Conversions
//!
//! | Rust Type | Quill Type |
//! |-----------|------------|
//! | `bool` | `bool` |
//! | `i32`, `i64`, `usize` | `int` |
//! | `i8` | `char` |
//! | `String`, `&str` | `str` |
//!
//! # Custom Conversions
//!
//! Implement the traits for your own types:
//!
//! ```rust
//! use quill_embed::{Error, FromValue, IntoValue, Value};
//!
//! struct Flag(bool);
//!
//! impl IntoValue for Flag {
//!     fn into_value(self) -> Value {
//!         Value::Bool(self.0)
//!     }
//! }
//!
//! impl FromValue for Flag {
//!     fn from_value(value: &Value) -> quill_embed::Result<Self> {
//!         match value {
//!             Value::Bool(b) => Ok(Flag(*b)),
//!             other => Err(Error::conversion("bool", other.type_name())),
//!         }
//!     }
//! }
//! ```

use quill_vm::value::Value;

use crate::error::{Error, Result};

/// Convert a host type into a `Value`.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Convert a `Value` into a host type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

// ============================================================================
// IntoValue implementations
// ============================================================================

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i8 {
    fn into_value(self) -> Value {
        Value::Char(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

// ============================================================================
// FromValue implementations
// ============================================================================

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::conversion("bool", other.type_name())),
        }
    }
}

impl FromValue for i8 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Char(c) => Ok(*c),
            other => Err(Error::conversion("char", other.type_name())),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(n) => Ok(*n),
            other => Err(Error::conversion("int", other.type_name())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(Error::conversion("str", other.type_name())),
        }
    }
}
