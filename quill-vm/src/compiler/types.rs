// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared types for the bytecode compiler.

use quill_lexer::{LexError, Token};

use crate::chunk::Function;

/// Maximum locals per function, including the reserved slot 0.
pub const MAX_LOCALS: usize = 16;

/// Maximum upvalues per function.
pub const MAX_UPVALUES: usize = 16;

/// Maximum parameters per function.
pub const MAX_PARAMS: u8 = 32;

/// Maximum depth of nested function declarations.
pub const MAX_FUNCTION_NESTING: usize = 32;

/// Error during compilation.
#[derive(Debug, Clone)]
pub enum CompileError {
    /// Tokenisation failed.
    Lex(LexError),
    /// The parser found something other than what the grammar requires.
    UnexpectedToken {
        message: String,
        lexeme: String,
        line: u16,
    },
    /// The left-hand side of `=` is not a variable reference.
    InvalidAssignmentTarget { line: u16 },
    /// Two locals with the same name in one scope.
    DuplicateLocal { name: String, line: u16 },
    /// A local read inside its own initializer.
    UninitializedLocal { name: String, line: u16 },
    /// Local slot budget exhausted.
    TooManyLocals { line: u16 },
    /// Upvalue budget exhausted.
    TooManyUpvalues { line: u16 },
    /// Parameter budget exhausted.
    TooManyParams { line: u16 },
    /// Argument count does not fit the call operand byte.
    TooManyArguments { line: u16 },
    /// Constant pool full.
    TooManyConstants { line: u16 },
    /// Function declarations nested too deeply.
    NestingTooDeep { line: u16 },
    /// A forward jump spans more than `u16::MAX` bytes.
    JumpTooFar { line: u16 },
    /// A loop body spans more than `u16::MAX` bytes.
    LoopBodyTooLarge { line: u16 },
    /// `return` at the top level of a script.
    ReturnAtTopLevel { line: u16 },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(err) => write!(f, "{}", err),
            CompileError::UnexpectedToken {
                message,
                lexeme,
                line,
            } => {
                write!(f, "line {}: {}, got '{}'", line, message, lexeme)
            }
            CompileError::InvalidAssignmentTarget { line } => {
                write!(f, "line {}: Invalid assignment target", line)
            }
            CompileError::DuplicateLocal { name, line } => {
                write!(
                    f,
                    "line {}: Already a variable named '{}' in this scope",
                    line, name
                )
            }
            CompileError::UninitializedLocal { name, line } => {
                write!(
                    f,
                    "line {}: Can't read local variable '{}' in its own initializer",
                    line, name
                )
            }
            CompileError::TooManyLocals { line } => {
                write!(f, "line {}: Too many local variables in function", line)
            }
            CompileError::TooManyUpvalues { line } => {
                write!(f, "line {}: Too many captured variables in function", line)
            }
            CompileError::TooManyParams { line } => {
                write!(f, "line {}: Too many parameters", line)
            }
            CompileError::TooManyArguments { line } => {
                write!(f, "line {}: Can't have more than 255 arguments", line)
            }
            CompileError::TooManyConstants { line } => {
                write!(f, "line {}: Exceeded maximum number of constants", line)
            }
            CompileError::NestingTooDeep { line } => {
                write!(f, "line {}: Functions nested too deeply", line)
            }
            CompileError::JumpTooFar { line } => {
                write!(f, "line {}: Too much code to jump over", line)
            }
            CompileError::LoopBodyTooLarge { line } => {
                write!(f, "line {}: Loop body too large", line)
            }
            CompileError::ReturnAtTopLevel { line } => {
                write!(f, "line {}: Top level code may not return", line)
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// What kind of function a compilation context belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// The implicit top-level function.
    Script,
    /// A `fun` declaration.
    Function,
}

/// A local variable during compilation.
///
/// `depth` is `-1` between declaration and initialization; reading such a
/// local is a compile error.
#[derive(Debug, Clone, Copy)]
pub struct Local<'src> {
    pub token: Token<'src>,
    pub depth: i8,
    pub is_initialized: bool,
}

/// A captured variable recorded during compilation.
///
/// `is_local` distinguishes capture of the enclosing function's local
/// (`true`) from re-capture of the enclosing function's upvalue (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpvalueRef {
    pub index: u8,
    pub is_local: bool,
}

/// Per-function compilation context.
///
/// One of these is open for every function the compiler is inside of, with
/// the implicit script function at the bottom of the stack.
#[derive(Debug)]
pub struct FunctionInfo<'src> {
    /// The prototype being built.
    pub function: Function,

    /// Script or declared function.
    pub kind: FunctionKind,

    /// Active locals, in declaration order. Slot 0 is reserved for the VM
    /// (the callee occupies it at runtime) and is nameless.
    pub locals: Vec<Local<'src>>,

    /// Captures recorded for this function, in capture order.
    pub upvalues: Vec<UpvalueRef>,

    /// Current block nesting depth; 0 is the global scope.
    pub scope_depth: u8,
}

impl<'src> FunctionInfo<'src> {
    /// Open a fresh context.
    pub fn new(kind: FunctionKind, name: impl Into<String>) -> Self {
        let reserved = Local {
            token: Token::synthetic(""),
            depth: 0,
            is_initialized: true,
        };
        Self {
            function: Function::new(name),
            kind,
            locals: vec![reserved],
            upvalues: Vec::new(),
            scope_depth: 0,
        }
    }

    /// Declare a new local in the current scope, initially uninitialized.
    ///
    /// Fails when the local budget is exhausted or the name already exists
    /// in the current scope.
    pub fn add_local(&mut self, token: Token<'src>) -> Result<()> {
        if self.locals.len() >= MAX_LOCALS {
            return Err(CompileError::TooManyLocals { line: token.line });
        }

        // Check for duplicates in the current scope only.
        for local in self.locals.iter().rev() {
            if local.depth != -1 && (local.depth as u8) < self.scope_depth {
                break;
            }
            if local.token.lexeme == token.lexeme {
                return Err(CompileError::DuplicateLocal {
                    name: token.lexeme.to_string(),
                    line: token.line,
                });
            }
        }

        self.locals.push(Local {
            token,
            depth: -1,
            is_initialized: false,
        });
        Ok(())
    }

    /// Mark the most recent local as initialized at the current depth.
    /// A no-op at global scope, where there is no local to mark.
    pub fn mark_initialized(&mut self) {
        if self.scope_depth == 0 {
            return;
        }
        let depth = self.scope_depth as i8;
        if let Some(local) = self.locals.last_mut() {
            local.depth = depth;
            local.is_initialized = true;
        }
    }

    /// Find a local by name, innermost first. Returns its slot, `None` if
    /// the name is not a local, or an error for a declared-but-uninitialized
    /// local.
    pub fn resolve_local(&self, name: &str, line: u16) -> Result<Option<u8>> {
        for (slot, local) in self.locals.iter().enumerate().rev() {
            if local.token.lexeme == name {
                if !local.is_initialized {
                    return Err(CompileError::UninitializedLocal {
                        name: name.to_string(),
                        line,
                    });
                }
                return Ok(Some(slot as u8));
            }
        }
        Ok(None)
    }

    /// Record a capture, deduplicating repeats, and return its upvalue
    /// index.
    pub fn add_upvalue(&mut self, index: u8, is_local: bool, line: u16) -> Result<u8> {
        let upvalue = UpvalueRef { index, is_local };
        if let Some(existing) = self.upvalues.iter().position(|u| *u == upvalue) {
            return Ok(existing as u8);
        }

        if self.upvalues.len() >= MAX_UPVALUES {
            return Err(CompileError::TooManyUpvalues { line });
        }
        self.upvalues.push(upvalue);
        self.function.upvalue_count = self.upvalues.len() as u8;
        Ok((self.upvalues.len() - 1) as u8)
    }
}
