// quill - A small scripting language with a bytecode compiler and stack VM
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, bail};
use quill_embed::Engine;

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // Handle --version flag
    if args.len() == 1 && (args[0] == "--version" || args[0] == "-v") {
        println!("Quill v0.1.0");
        return;
    }

    let disassemble = if let Some(pos) = args.iter().position(|a| a == "--disassemble") {
        args.remove(pos);
        true
    } else {
        false
    };

    // If files provided, run them; otherwise start the REPL
    if !args.is_empty() {
        run_files(&args, disassemble);
    } else {
        run_repl();
    }
}

/// Run a sequence of source files in one engine.
fn run_files(files: &[String], disassemble: bool) {
    let mut engine = Engine::new();
    for file_path in files {
        if let Err(e) = run_file(&mut engine, file_path, disassemble) {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Run a single source file.
fn run_file(engine: &mut Engine, file_path: &str, disassemble: bool) -> anyhow::Result<()> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("quill") => {}
        Some(ext) => bail!(
            "unsupported file extension '.{}' for '{}' (expected .quill)",
            ext,
            file_path
        ),
        None => bail!("file '{}' has no extension (expected .quill)", file_path),
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", file_path))?;

    if disassemble {
        let listing = engine
            .disassemble(&source)
            .with_context(|| format!("error in '{}'", file_path))?;
        print!("{}", listing);
        return Ok(());
    }

    engine
        .interpret(&source)
        .with_context(|| format!("error in '{}'", file_path))?;
    Ok(())
}

/// Run the interactive REPL.
fn run_repl() {
    println!("Quill v0.1.0");
    let mut engine = Engine::new();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                match engine.interpret(input) {
                    Ok(value) => println!("{}", value),
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(e) => {
                eprintln!("Failed to read line: {}", e);
                break;
            }
        }
    }
}
