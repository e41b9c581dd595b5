// quill-embed - Embedding API for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Aggregate error type for the embedding API.

use std::fmt;

use quill_vm::{CompileError, RuntimeError};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by the [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub enum Error {
    /// Lexing or compilation failed; no bytecode was produced.
    Compile(CompileError),
    /// Execution failed; the VM's stacks have been cleared.
    Runtime(RuntimeError),
    /// A host-side value conversion failed.
    Conversion {
        expected: &'static str,
        got: &'static str,
    },
}

impl Error {
    /// Create a conversion error.
    pub fn conversion(expected: &'static str, got: &'static str) -> Self {
        Error::Conversion { expected, got }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile(err) => write!(f, "Compile error: {}", err),
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::Conversion { expected, got } => {
                write!(f, "Conversion error: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Compile(err) => Some(err),
            Error::Runtime(err) => Some(err),
            Error::Conversion { .. } => None,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Error::Compile(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}
