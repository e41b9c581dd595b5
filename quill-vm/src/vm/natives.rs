// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in native functions installed into every VM's globals.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use crate::chunk::NativeFunction;
use crate::value::Value;

use super::error::Result;

/// Install the built-in natives into a globals table.
///
/// `started` anchors `clock()`; readings are monotonic and non-negative.
pub fn install(globals: &mut HashMap<String, Value>, started: Instant) {
    define(globals, "clock", 0, move |_args| {
        Ok(Value::Int(started.elapsed().as_micros() as i64))
    });

    define(globals, "square", 1, |args| args[0].multiply(&args[0]));

    define(globals, "genre", 0, |_args| {
        Ok(Value::Str("Rock".to_string()))
    });
}

fn define(
    globals: &mut HashMap<String, Value>,
    name: &str,
    arity: u8,
    callback: impl Fn(&[Value]) -> Result<Value> + 'static,
) {
    globals.insert(
        name.to_string(),
        Value::Native(Rc::new(NativeFunction::new(name, arity, callback))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(name: &str) -> Rc<NativeFunction> {
        let mut globals = HashMap::new();
        install(&mut globals, Instant::now());
        match globals.get(name) {
            Some(Value::Native(native)) => Rc::clone(native),
            other => panic!("expected native '{}', got {:?}", name, other),
        }
    }

    #[test]
    fn test_square() {
        let square = builtin("square");
        let result = square.invoke(&[Value::Int(9)]).unwrap();
        assert!(matches!(result, Value::Int(81)));
    }

    #[test]
    fn test_genre() {
        let genre = builtin("genre");
        let result = genre.invoke(&[]).unwrap();
        assert!(matches!(result, Value::Str(ref s) if s == "Rock"));
    }

    #[test]
    fn test_clock_is_monotonic_and_non_negative() {
        let clock = builtin("clock");
        let a = match clock.invoke(&[]).unwrap() {
            Value::Int(n) => n,
            other => panic!("expected int, got {:?}", other),
        };
        let b = match clock.invoke(&[]).unwrap() {
            Value::Int(n) => n,
            other => panic!("expected int, got {:?}", other),
        };
        assert!(a >= 0);
        assert!(b >= a);
    }
}
