// xtask - Build automation for Quill
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, exit};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("install") => install(&args[1..]),
        Some("uninstall") => uninstall(&args[1..]),
        Some("help") | Some("-h") | Some("--help") | None => help(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            help();
            exit(1);
        }
    }
}

fn help() {
    println!(
        r#"quill xtask - Build automation

USAGE:
    cargo xtask <COMMAND>

COMMANDS:
    install [--prefix <PATH>]   Build release and install to ~/.cargo/bin (or PREFIX/bin)
    uninstall [--prefix <PATH>] Remove installed files
    help                        Show this message
"#
    );
}

fn get_bin_dir(args: &[String]) -> PathBuf {
    let prefix = if let Some(pos) = args.iter().position(|a| a == "--prefix") {
        args.get(pos + 1).map(PathBuf::from).unwrap_or_else(|| {
            eprintln!("--prefix requires a path argument");
            exit(1);
        })
    } else {
        dirs_home().join(".cargo")
    };
    prefix.join("bin")
}

fn dirs_home() -> PathBuf {
    env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| {
        eprintln!("Could not determine home directory");
        exit(1);
    })
}

fn project_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            eprintln!("Could not determine project root");
            exit(1);
        })
}

fn install(args: &[String]) {
    let bin_dir = get_bin_dir(args);
    let root = project_root();

    println!("Building release...");
    let status = Command::new("cargo")
        .args(["build", "--release", "--bin", "quill"])
        .current_dir(&root)
        .status()
        .unwrap_or_else(|e| {
            eprintln!("Failed to run cargo: {}", e);
            exit(1);
        });
    if !status.success() {
        eprintln!("Build failed");
        exit(1);
    }

    if let Err(e) = fs::create_dir_all(&bin_dir) {
        eprintln!("Failed to create {}: {}", bin_dir.display(), e);
        exit(1);
    }

    let built = root.join("target/release/quill");
    let target = bin_dir.join("quill");
    match fs::copy(&built, &target) {
        Ok(_) => println!("Installed {}", target.display()),
        Err(e) => {
            eprintln!("Failed to install {}: {}", target.display(), e);
            exit(1);
        }
    }
}

fn uninstall(args: &[String]) {
    let bin_dir = get_bin_dir(args);
    let target = bin_dir.join("quill");

    match fs::remove_file(&target) {
        Ok(_) => println!("Removed {}", target.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("Nothing to remove at {}", target.display());
        }
        Err(e) => {
            eprintln!("Failed to remove {}: {}", target.display(), e);
            exit(1);
        }
    }
}
