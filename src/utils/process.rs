//! Subprocess execution with captured output.

use std::process::Command;

use crate::error::{Error, Result};

/// Captured output from a finished subprocess.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

impl CapturedOutput {
    /// Error text for reporting.
    ///
    /// Prefers stderr, falls back to stdout if stderr is empty.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            stderr.to_string()
        } else {
            self.stdout.trim().to_string()
        }
    }
}

/// Run a command and capture stdout/stderr as text.
///
/// The command is executed directly, without a shell. A non-zero exit is
/// NOT an error here; callers decide what failure means. Only a spawn
/// failure (program missing, permissions) errors out.
pub fn run_captured(program: &str, args: &[String], context: &str) -> Result<CapturedOutput> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        Error::internal_io(
            format!("Failed to run {}: {}", context, e),
            Some(context.to_string()),
        )
    })?;

    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
        success: output.status.success(),
    })
}
