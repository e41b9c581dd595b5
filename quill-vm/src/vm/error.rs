// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime errors for the VM.

/// Runtime error during VM execution.
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// Value stack overflow or too many nested call frames.
    StackOverflow,
    /// Value stack underflow.
    StackUnderflow,
    /// Undefined global variable.
    UndefinedGlobal(String),
    /// Wrong number of arguments in a call.
    ArityMismatch {
        name: String,
        expected: u8,
        got: u8,
    },
    /// Attempted to call a value that is not callable.
    NotCallable(&'static str),
    /// Operand type error in arithmetic or a conversion.
    TypeError(String),
    /// Values that cannot be ordered or tested for equality.
    NotComparable(String),
    /// Division or modulus by zero.
    DivisionByZero,
    /// A closure tried to capture a slot that holds no value yet. Reachable
    /// when a local function captures its own name.
    UninitializedCapture,
    /// Unknown opcode byte (corrupt bytecode).
    InvalidOpcode(u8),
    /// Internal invariant violation.
    Internal(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::StackOverflow => write!(f, "Stack overflow"),
            RuntimeError::StackUnderflow => write!(f, "Stack underflow"),
            RuntimeError::UndefinedGlobal(name) => {
                write!(f, "Undefined variable '{}'", name)
            }
            RuntimeError::ArityMismatch {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Wrong number of arguments to '{}': expected {}, got {}",
                    name, expected, got
                )
            }
            RuntimeError::NotCallable(type_name) => {
                write!(f, "Can only call functions; {} is not callable", type_name)
            }
            RuntimeError::TypeError(msg) => write!(f, "Type error: {}", msg),
            RuntimeError::NotComparable(msg) => write!(f, "{}", msg),
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
            RuntimeError::UninitializedCapture => {
                write!(f, "Can't capture a variable before it is initialized")
            }
            RuntimeError::InvalidOpcode(byte) => {
                write!(f, "Unknown opcode {:#04x}", byte)
            }
            RuntimeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for VM operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
