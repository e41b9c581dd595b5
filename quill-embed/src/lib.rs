// quill-embed - Embedding API for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # quill-embed
//!
//! A high-level embedding API for the Quill programming language.
//!
//! This crate wraps the compiler and VM behind a single [`Engine`] type
//! that handles compilation, execution, native function registration and
//! value conversion.
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_embed::Engine;
//!
//! let mut engine = Engine::new();
//! engine.interpret("print 1 + 2 * 3;").unwrap();
//! assert_eq!(engine.output_log(), "7");
//! ```
//!
//! ## Registering Native Functions
//!
//! ```rust
//! use quill_embed::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! engine.define_native("double", 1, |args| {
//!     args[0].add(&args[0])
//! });
//! engine.interpret("print double(21);").unwrap();
//! assert_eq!(engine.output_log(), "42");
//! ```

mod convert;
mod engine;
mod error;

pub use convert::{FromValue, IntoValue};
pub use engine::Engine;
pub use error::{Error, Result};

// Re-export the core types for convenience.
pub use quill_vm::{Closure, CompileError, RuntimeError, Value};
