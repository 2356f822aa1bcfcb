use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

pub fn run(out: &Path) -> Result<()> {
    println!();
    println!("{}", "🔊 Starting playback emulator...".cyan().bold());
    println!();

    // Inherit stdio: the emulator prints its own progress.
    let status = Command::new("cargo")
        .args(["run", "-p", "firmware", "--example", "playback_emulator", "--features", "emulator", "--"])
        .arg(out)
        .status()
        .context("Failed to start the emulator")?;

    if !status.success() {
        anyhow::bail!("Emulator exited with {status}");
    }

    println!();
    println!("{}", format!("✓ Capture written to {}", out.display()).green());
    println!();

    Ok(())
}
