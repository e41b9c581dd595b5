// quill-vm - Property tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property tests over the pipeline:
//! - printed integer arithmetic matches two's-complement 64-bit arithmetic,
//! - constant pool deduplication is idempotent,
//! - the instruction stream decodes cleanly from start to end for all
//!   branch shapes (jump round-trip).

use std::rc::Rc;

use proptest::prelude::*;

use quill_vm::chunk::{Chunk, Closure};
use quill_vm::debug;
use quill_vm::value::Value;
use quill_vm::{Vm, compile};

fn run_one(src: &str) -> String {
    let function = compile(src).expect("compile error");
    let mut vm = Vm::new();
    vm.run(Closure::new(Rc::new(function)))
        .unwrap_or_else(|e| panic!("runtime error: {} for source: {}", e, src));
    vm.output_lines().join("\n")
}

/// Walk a chunk instruction by instruction, checking every decoded
/// instruction starts where the previous one ended and the walk lands
/// exactly on the chunk's end.
fn assert_decodes_cleanly(chunk: &Chunk) {
    let mut scratch = String::new();
    let mut offset = 0;
    while offset < chunk.code.len() {
        let next = debug::disassemble_instruction(chunk, offset, &mut scratch);
        assert!(next > offset, "decoder did not advance at offset {}", offset);
        offset = next;
    }
    assert_eq!(offset, chunk.code.len(), "decoder overran the chunk");
}

proptest! {
    // i64::MIN is unrepresentable as a literal (the magnitude overflows
    // before negation), so the generators stay one above it.
    #[test]
    fn printed_sum_is_wrapping_64_bit(
        a in (i64::MIN + 1)..=i64::MAX,
        b in (i64::MIN + 1)..=i64::MAX,
    ) {
        let src = format!("print ({}) + ({});", a, b);
        prop_assert_eq!(run_one(&src), a.wrapping_add(b).to_string());
    }

    #[test]
    fn printed_product_is_wrapping_64_bit(
        a in (i64::MIN + 1)..=i64::MAX,
        b in (i64::MIN + 1)..=i64::MAX,
    ) {
        let src = format!("print ({}) * ({});", a, b);
        prop_assert_eq!(run_one(&src), a.wrapping_mul(b).to_string());
    }

    #[test]
    fn constant_dedup_is_idempotent(value in any::<i64>(), repeats in 1usize..20) {
        let mut chunk = Chunk::new();
        let first = chunk.add_constant(Value::Int(value)).expect("pool empty");
        for _ in 0..repeats {
            prop_assert_eq!(chunk.add_constant(Value::Int(value)), Some(first));
        }
        prop_assert_eq!(chunk.constants.len(), 1);
    }

    #[test]
    fn string_constants_dedup_too(s in "[a-z]{0,8}", repeats in 1usize..10) {
        let mut chunk = Chunk::new();
        let first = chunk.add_constant(Value::Str(s.clone()));
        for _ in 0..repeats {
            prop_assert_eq!(chunk.add_constant(Value::Str(s.clone())), first);
        }
        prop_assert_eq!(chunk.constants.len(), 1);
    }

    #[test]
    fn branches_decode_cleanly_for_all_shapes(condition in any::<bool>(), body in 0i64..100) {
        let src = format!(
            "int n = 0;\n\
             if ({}) n = {}; else n = n - 1;\n\
             while (n > 0) n = n - 1;\n\
             for (int i = 0; i < 2; i = i + 1) n = n + i;\n\
             print n;",
            condition, body
        );
        let function = compile(&src).expect("compile error");
        assert_decodes_cleanly(&function.chunk);

        // The program must also actually terminate and print.
        let mut vm = Vm::new();
        vm.run(Closure::new(Rc::new(function))).expect("runtime error");
        prop_assert_eq!(vm.output_lines().len(), 1);
    }

    #[test]
    fn lexing_arbitrary_ascii_never_panics(src in "[ -~\n\t]{0,64}") {
        // Tokenisation either succeeds or reports an error; it never panics.
        let _ = quill_lexer::Lexer::new(&src).tokenize();
    }

    #[test]
    fn scope_pops_balance_declarations(locals in 1usize..8) {
        let mut body = String::new();
        for i in 0..locals {
            body.push_str(&format!("int v{} = {}; ", i, i));
        }
        let src = format!("{{ {} }} print 1;", body);
        // An unbalanced scope would leave values under the print and
        // corrupt the result.
        prop_assert_eq!(run_one(&src), "1");
    }
}

#[test]
fn function_chunks_decode_cleanly() {
    let function = compile(
        "fun outer(int a) {\n\
             int b = a + 1;\n\
             fun inner() { return b; }\n\
             if (a > 0) return inner();\n\
             return 0;\n\
         }\n\
         print outer(1);",
    )
    .expect("compile error");

    assert_decodes_cleanly(&function.chunk);
    for constant in &function.chunk.constants {
        if let Value::Closure(closure) = constant {
            assert_decodes_cleanly(&closure.function.chunk);
        }
    }
}
