//! External command execution.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

/// Runs external programs on behalf of the extractor.
///
/// The extractor never spawns processes directly; it goes through this
/// trait so tests can substitute canned output for a real repository.
pub trait CommandRunner {
    /// Runs `program` with `args` inside `dir` and returns its trimmed
    /// standard output.
    ///
    /// # Errors
    ///
    /// Returns error if the program cannot be launched or exits with a
    /// non-zero status.
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String>;
}

/// Runner backed by [`std::process::Command`].
///
/// Blocks until the child exits. There is no timeout: a hung child hangs
/// the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let command_line = format_command(program, args);
        tracing::debug!(dir = %dir.display(), command = %command_line, "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Failed to launch `{}` in {}", command_line, dir.display()))?;

        if !output.status.success() {
            bail!(
                "`{}` failed in {} ({}): {}",
                command_line,
                dir.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
