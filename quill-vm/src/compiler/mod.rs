// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Single-pass bytecode compiler.
//!
//! The compiler walks the token stream once, emitting bytecode directly via
//! a Pratt-style parse-rule table; no AST is built. A stack of per-function
//! contexts tracks local slots, scope depth and upvalue captures.

pub mod codegen;
pub mod rules;
pub mod types;

pub use codegen::{Compiler, compile};
pub use rules::{ParseRule, Precedence};
pub use types::{CompileError, FunctionInfo, FunctionKind, Local, Result, UpvalueRef};
