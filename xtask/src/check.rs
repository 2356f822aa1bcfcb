use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{step, OnFailure};

/// Embedded target for the no_std crates (Cortex-M4F, as on the nRF52).
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    step("Checking workspace (host)", &["check", "--workspace", "--all-targets"], OnFailure::Fail)?;

    step(
        "Checking emulator (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--all-targets"],
        OnFailure::Fail,
    )?;

    for crate_name in ["platform", "playback"] {
        step(
            &format!("Checking {crate_name} (no_std, {EMBEDDED_TARGET})"),
            &["check", "-p", crate_name, "--target", EMBEDDED_TARGET, "--features", "defmt"],
            OnFailure::Fail,
        )?;
    }

    // Lints and formatting are reported, never fatal.
    step(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    if !step("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)? {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
