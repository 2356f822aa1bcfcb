use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// How a failed step is treated.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Abort the task.
    Fail,
    /// Print the output and carry on.
    Warn,
}

/// Run one `cargo` invocation as a named step, timing it and printing its
/// stderr on failure. Returns whether the step passed.
pub fn step(label: &str, args: &[&str], on_failure: OnFailure) -> Result<bool> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(true);
    }

    match on_failure {
        OnFailure::Fail => eprintln!("{}", format!("  ✗ {label} failed").red().bold()),
        OnFailure::Warn => eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold()),
    }
    eprintln!();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        eprintln!("  {line}");
    }
    eprintln!("{}", String::from_utf8_lossy(&output.stderr));

    if on_failure == OnFailure::Fail {
        anyhow::bail!("{label} failed");
    }
    println!();
    Ok(false)
}
