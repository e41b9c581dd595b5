// quill-vm - Expression and control flow tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! End-to-end tests for expressions, variables and control flow: each
//! program is compiled, executed, and its print output compared.

use std::rc::Rc;

use quill_vm::chunk::Closure;
use quill_vm::{Vm, compile};

/// Compile and run a program, returning its print output lines.
fn run(src: &str) -> Vec<String> {
    let function = compile(src).expect("compile error");
    let mut vm = Vm::new();
    vm.run(Closure::new(Rc::new(function)))
        .unwrap_or_else(|e| panic!("runtime error: {} for source: {}", e, src));
    vm.output_lines().to_vec()
}

/// Run a program that prints exactly one line.
fn run_one(src: &str) -> String {
    let lines = run(src);
    assert_eq!(lines.len(), 1, "expected one output line from: {}", src);
    lines.into_iter().next().expect("one line")
}

// =============================================================================
// Literals and arithmetic
// =============================================================================

#[test]
fn prints_literals() {
    assert_eq!(run_one("print 42;"), "42");
    assert_eq!(run_one("print true;"), "true");
    assert_eq!(run_one("print false;"), "false");
    assert_eq!(run_one("print \"hello\";"), "hello");
    assert_eq!(run_one("print 'x';"), "x");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(run_one("print 1 + 2 * 3;"), "7");
    assert_eq!(run_one("print 2 * 3 + 1;"), "7");
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(run_one("print (1 + 2) * 3;"), "9");
}

#[test]
fn division_and_modulus() {
    assert_eq!(run_one("print 7 / 2;"), "3");
    assert_eq!(run_one("print 7 % 2;"), "1");
}

#[test]
fn unary_negation() {
    assert_eq!(run_one("print -5;"), "-5");
    assert_eq!(run_one("print --5;"), "5");
    assert_eq!(run_one("print -\"up\";"), "-up");
}

#[test]
fn logical_not() {
    assert_eq!(run_one("print !true;"), "false");
    assert_eq!(run_one("print not false;"), "true");
    assert_eq!(run_one("print !0;"), "true");
    assert_eq!(run_one("print !\"\";"), "true");
}

#[test]
fn string_concatenation_stringifies_rhs() {
    assert_eq!(run_one("print \"n = \" + 42;"), "n = 42");
    assert_eq!(run_one("print \"a\" + \"b\";"), "ab");
    assert_eq!(run_one("print \"flag: \" + true;"), "flag: true");
}

#[test]
fn bool_promotes_to_int_in_arithmetic() {
    assert_eq!(run_one("print true + 41;"), "42");
    assert_eq!(run_one("print false * 9;"), "0");
}

#[test]
fn numeric_literal_truncates_at_decimal_point() {
    assert_eq!(run_one("print 3.75;"), "3");
    assert_eq!(run_one("print 3.75 + 1;"), "4");
}

// =============================================================================
// Comparison and equality
// =============================================================================

#[test]
fn comparisons() {
    assert_eq!(run_one("print 1 < 2;"), "true");
    assert_eq!(run_one("print 2 <= 2;"), "true");
    assert_eq!(run_one("print 3 > 4;"), "false");
    assert_eq!(run_one("print 4 >= 5;"), "false");
}

#[test]
fn equality() {
    assert_eq!(run_one("print 1 == 1;"), "true");
    assert_eq!(run_one("print 1 != 2;"), "true");
    assert_eq!(run_one("print \"a\" == \"a\";"), "true");
    assert_eq!(run_one("print \"a\" == \"b\";"), "false");
}

#[test]
fn cross_type_equality_is_false() {
    assert_eq!(run_one("print 1 == \"1\";"), "false");
    assert_eq!(run_one("print true == 1;"), "false");
}

// =============================================================================
// Variables and assignment
// =============================================================================

#[test]
fn global_declaration_and_assignment() {
    assert_eq!(run_one("int x = 10; x = x + 5; print x;"), "15");
}

#[test]
fn declarations_default_to_type_zero_values() {
    assert_eq!(run_one("int i; print i;"), "0");
    assert_eq!(run_one("bool b; print b;"), "false");
    assert_eq!(run_one("str s; print s == \"\";"), "true");
    assert_eq!(run_one("char c; print c == '\u{0}';"), "false");
    assert_eq!(run_one("char c; print c + 65;"), "A");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(run_one("int x = 1; int y = 2; print x = y = 9;"), "9");
}

#[test]
fn locals_shadow_and_unwind() {
    assert_eq!(
        run("{ int a = 1; { int b = 2; print a + b; } print a; }"),
        vec!["3", "1"]
    );
}

#[test]
fn sibling_scopes_reuse_slots() {
    assert_eq!(
        run("{ int a = 1; print a; } { int b = 2; print b; }"),
        vec!["1", "2"]
    );
}

// =============================================================================
// If / else
// =============================================================================

#[test]
fn if_takes_the_true_branch() {
    assert_eq!(
        run_one("if (1 < 2) print \"yes\"; else print \"no\";"),
        "yes"
    );
}

#[test]
fn if_takes_the_false_branch() {
    assert_eq!(
        run_one("if (2 < 1) print \"yes\"; else print \"no\";"),
        "no"
    );
}

#[test]
fn if_without_else() {
    assert_eq!(run("if (false) print \"skipped\";"), Vec::<String>::new());
    assert_eq!(run_one("if (3) print \"truthy int\";"), "truthy int");
}

// =============================================================================
// While and for
// =============================================================================

#[test]
fn while_loop_counts() {
    assert_eq!(
        run("int i = 0; while (i < 3) { print i; i = i + 1; }"),
        vec!["0", "1", "2"]
    );
}

#[test]
fn while_loop_may_never_run() {
    assert_eq!(run("while (false) print \"never\";"), Vec::<String>::new());
}

#[test]
fn for_loop_accumulates() {
    assert_eq!(
        run_one("int n = 0; for (int i = 0; i < 3; i = i + 1) { n = n + i; } print n;"),
        "3"
    );
}

#[test]
fn for_loop_with_existing_variable_and_no_increment() {
    assert_eq!(
        run("int i = 0; for (; i < 2;) { print i; i = i + 1; }"),
        vec!["0", "1"]
    );
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    // The loop variable disappears with the loop; a global of the same name
    // is untouched.
    assert_eq!(
        run_one("int i = 99; for (int i = 0; i < 3; i = i + 1) {} print i;"),
        "99"
    );
}

#[test]
fn nested_loops() {
    assert_eq!(
        run_one(
            "int n = 0;\n\
             for (int i = 0; i < 3; i = i + 1) {\n\
                 for (int j = 0; j < 3; j = j + 1) {\n\
                     n = n + 1;\n\
                 }\n\
             }\n\
             print n;"
        ),
        "9"
    );
}

// =============================================================================
// Short-circuit operators
// =============================================================================

#[test]
fn and_short_circuits_without_evaluating_rhs() {
    // `crash` is undefined; evaluating the rhs would be a runtime error.
    assert_eq!(run_one("false and crash(); print \"ok\";"), "ok");
}

#[test]
fn or_short_circuits_without_evaluating_rhs() {
    assert_eq!(run_one("true or crash(); print \"ok\";"), "ok");
}

#[test]
fn and_yields_lhs_when_false_and_rhs_otherwise() {
    assert_eq!(run_one("print 0 and 5;"), "0");
    assert_eq!(run_one("print 1 and 5;"), "5");
    assert_eq!(run_one("print \"\" and \"x\";"), "");
}

#[test]
fn or_yields_lhs_when_true_and_rhs_otherwise() {
    assert_eq!(run_one("print 2 or 9;"), "2");
    assert_eq!(run_one("print 0 or 7;"), "7");
}

#[test]
fn logical_operators_chain() {
    assert_eq!(run_one("print 1 and 2 and 3;"), "3");
    assert_eq!(run_one("print 0 or 0 or 8;"), "8");
    assert_eq!(run_one("print 0 and 1 or 4;"), "4");
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn comments_are_ignored() {
    assert_eq!(
        run_one("// leading comment\nprint 1; // trailing comment"),
        "1"
    );
}
