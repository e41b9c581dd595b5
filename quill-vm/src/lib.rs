// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # quill-vm
//!
//! Bytecode compiler and stack-based virtual machine for Quill.
//!
//! Source text is tokenised by `quill-lexer`, compiled in a single pass to
//! bytecode (no persisted AST), and executed by a stack VM with call frames,
//! a globals table and closure upvalue cells.

pub mod chunk;
pub mod compiler;
pub mod debug;
pub mod opcode;
pub mod value;
pub mod vm;

pub use chunk::{Chunk, Closure, Function, NativeFunction, UpvalueCell};
pub use compiler::{CompileError, compile};
pub use opcode::OpCode;
pub use value::Value;
pub use vm::{RuntimeError, Vm};
