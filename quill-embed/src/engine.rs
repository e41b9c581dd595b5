// quill-embed - Embedding API for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The Engine struct - main entry point for embedding Quill.

use std::rc::Rc;

use quill_vm::chunk::Closure;
use quill_vm::value::Value;
use quill_vm::vm::{Result as VmResult, Vm};
use quill_vm::{compile, debug};

use crate::convert::{FromValue, IntoValue};
use crate::error::Result;

/// The Quill scripting engine.
///
/// `Engine` owns a VM instance and provides the embedding surface:
/// compiling and running source text, registering native functions,
/// reading the output log and exchanging values with the host.
///
/// # Thread Safety
///
/// **`Engine` is NOT thread-safe.** The VM uses `Rc` and `RefCell`
/// internally for closure upvalue cells. Create one engine per thread if
/// you need concurrent evaluation; two engines are fully independent.
///
/// # Example
///
/// ```rust
/// use quill_embed::Engine;
///
/// let mut engine = Engine::new();
/// engine.interpret("int x = 40; print x + 2;").unwrap();
/// assert_eq!(engine.output_log(), "42");
/// ```
pub struct Engine {
    vm: Vm,
}

impl Engine {
    /// Create a new engine with the built-in natives registered.
    pub fn new() -> Self {
        Engine { vm: Vm::new() }
    }

    /// Compile source text into an executable top-level closure without
    /// running it.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenisation or compilation fails; a partial
    /// chunk is never returned.
    pub fn compile(&self, source: &str) -> Result<Closure> {
        let function = compile(source)?;
        Ok(Closure::new(Rc::new(function)))
    }

    /// Compile and run source text.
    ///
    /// Returns the final value of the program: the value carried by the
    /// root `Return`. Output printed by `print` statements is echoed to
    /// stdout and accumulated in the [output log](Engine::output_log).
    ///
    /// # Errors
    ///
    /// Returns a compile error or the first runtime error; execution is
    /// never retried.
    pub fn interpret(&mut self, source: &str) -> Result<Value> {
        let closure = self.compile(source)?;
        Ok(self.vm.run(closure)?)
    }

    /// Compile source text and return its bytecode disassembly instead of
    /// running it. A debug aid for the CLI's `--disassemble` flag.
    pub fn disassemble(&self, source: &str) -> Result<String> {
        let function = compile(source)?;
        Ok(debug::disassemble(&function.chunk, &function.name))
    }

    /// Register a native Rust function callable from scripts.
    ///
    /// The callback receives the argument values as a slice that is only
    /// valid for the duration of the call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quill_embed::{Engine, Value};
    ///
    /// let mut engine = Engine::new();
    /// engine.define_native("greet", 1, |args| {
    ///     Ok(Value::Str(format!("Hello, {}!", args[0])))
    /// });
    /// engine.interpret("print greet(\"world\");").unwrap();
    /// assert_eq!(engine.output_log(), "Hello, world!");
    /// ```
    pub fn define_native(
        &mut self,
        name: &str,
        arity: u8,
        callback: impl Fn(&[Value]) -> VmResult<Value> + 'static,
    ) {
        self.vm.define_native(name, arity, callback);
    }

    /// Text accumulated by `print` statements, lines joined by `\n`.
    pub fn output_log(&self) -> String {
        self.vm.output_log()
    }

    /// Lines accumulated by `print` statements.
    pub fn output_lines(&self) -> &[String] {
        self.vm.output_lines()
    }

    /// Clear all state. Globals, stacks and the output log are emptied;
    /// the built-in natives are re-registered.
    pub fn reset(&mut self) {
        self.vm.reset();
    }

    /// Get a global by name.
    ///
    /// Returns `None` if no such global is defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.vm.get_global(name)
    }

    /// Get a typed global.
    ///
    /// Returns `None` if the global is not defined or cannot be converted.
    #[must_use]
    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| T::from_value(&v).ok())
    }

    /// Get a typed global with error details.
    ///
    /// Unlike [`get_as`](Engine::get_as), this distinguishes an undefined
    /// global (`Ok(None)`) from a failed conversion (`Err(..)`).
    pub fn try_get_as<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            Some(value) => T::from_value(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Define or overwrite a global from a host value.
    pub fn set(&mut self, name: &str, value: impl IntoValue) {
        self.vm.set_global(name, value.into_value());
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
