// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Textual disassembler for bytecode chunks.
//!
//! A debug aid: renders one instruction per line with its byte offset,
//! decoded operands and, for jumps, the resolved target offset.

use std::fmt::Write;
use std::rc::Rc;

use crate::chunk::Chunk;
use crate::opcode::OpCode;
use crate::value::Value;

/// Disassemble a whole chunk under a heading.
pub fn disassemble(chunk: &Chunk, name: &str) -> String {
    let heading = if name.is_empty() { "<script>" } else { name };
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", heading);
    let mut offset = 0;
    while offset < chunk.code.len() {
        offset = disassemble_instruction(chunk, offset, &mut out);
    }
    for constant in &chunk.constants {
        if let Value::Closure(closure) = constant {
            out.push_str(&disassemble_function(&closure.function));
        }
    }
    out
}

fn disassemble_function(function: &Rc<crate::chunk::Function>) -> String {
    disassemble(&function.chunk, &function.name)
}

/// Disassemble the instruction at `offset`, appending one or more lines to
/// `out`. Returns the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    let _ = write!(out, "{:04} ", offset);

    let byte = chunk.code[offset];
    let op = match OpCode::try_from(byte) {
        Ok(op) => op,
        Err(byte) => {
            let _ = writeln!(out, "Unknown opcode {:#04x}", byte);
            return offset + 1;
        }
    };

    match op {
        OpCode::Constant | OpCode::GetGlobal | OpCode::DefineGlobal | OpCode::SetGlobal => {
            constant_instruction(chunk, op, offset, out)
        }

        OpCode::GetLocal | OpCode::SetLocal | OpCode::GetUpvalue | OpCode::SetUpvalue => {
            slot_instruction(chunk, op, offset, out)
        }

        OpCode::True
        | OpCode::False
        | OpCode::Empty
        | OpCode::Pop
        | OpCode::IsEqual
        | OpCode::Greater
        | OpCode::Less
        | OpCode::Add
        | OpCode::Subtract
        | OpCode::Multiply
        | OpCode::Divide
        | OpCode::Modulus
        | OpCode::Negate
        | OpCode::Not
        | OpCode::Print
        | OpCode::Return => {
            let _ = writeln!(out, "{}", op.name());
            offset + 1
        }

        OpCode::Jump | OpCode::JumpIfFalse => jump_instruction(chunk, op, offset, 1, out),
        OpCode::Loop => jump_instruction(chunk, op, offset, -1, out),

        OpCode::Call => {
            let arg_count = chunk.code[offset + 1];
            let _ = writeln!(out, "{} args={}", op.name(), arg_count);
            offset + 2
        }

        OpCode::Closure => closure_instruction(chunk, op, offset, out),
    }
}

fn constant_instruction(chunk: &Chunk, op: OpCode, offset: usize, out: &mut String) -> usize {
    let index = chunk.code[offset + 1];
    match chunk.constants.get(index as usize) {
        Some(value) => {
            let _ = writeln!(out, "{} {}", op.name(), value);
        }
        None => {
            let _ = writeln!(out, "{} [bad constant {}]", op.name(), index);
        }
    }
    offset + 2
}

fn slot_instruction(chunk: &Chunk, op: OpCode, offset: usize, out: &mut String) -> usize {
    let slot = chunk.code[offset + 1];
    let _ = writeln!(out, "{} [{}]", op.name(), slot);
    offset + 2
}

fn jump_instruction(
    chunk: &Chunk,
    op: OpCode,
    offset: usize,
    sign: i32,
    out: &mut String,
) -> usize {
    let hi = chunk.code[offset + 1] as u16;
    let lo = chunk.code[offset + 2] as u16;
    let distance = ((hi << 8) | lo) as i32;
    let target = offset as i32 + 3 + sign * distance;
    let _ = writeln!(out, "{} -> {}", op.name(), target);
    offset + 3
}

fn closure_instruction(chunk: &Chunk, op: OpCode, offset: usize, out: &mut String) -> usize {
    let index = chunk.code[offset + 1];
    let mut next = offset + 2;
    match chunk.constants.get(index as usize) {
        Some(value @ Value::Closure(closure)) => {
            let _ = writeln!(out, "{} {}", op.name(), value);
            for _ in 0..closure.function.upvalue_count {
                let is_local = chunk.code[next] != 0;
                let capture_index = chunk.code[next + 1];
                let _ = writeln!(
                    out,
                    "     capture [{}] {}",
                    capture_index,
                    if is_local { "local" } else { "upvalue" }
                );
                next += 2;
            }
        }
        _ => {
            let _ = writeln!(out, "{} [bad closure constant {}]", op.name(), index);
        }
    }
    next
}
