//! Build script for riffgrade.
//!
//! Copies the `.env.example` template into the user's local data directory,
//! next to where `config::load_env` looks for `.env`, so a fresh install has
//! a ready-to-edit configuration file.
//!
//! - Linux: `~/.local/share/riffgrade/.env.example`
//! - macOS: `~/Library/Application Support/riffgrade/.env.example`
//! - Windows: `%LOCALAPPDATA%/riffgrade/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("riffgrade");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // read-only home directories (sandboxed builds) must not fail the build
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
    {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
