//! Result reporting into the CI environment file.
//!
//! The CI system consumes `key=value` lines from an append-only file. The
//! file may already carry entries from earlier workflow steps; it is never
//! truncated or rewritten.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Append the deployment id and final status to the CI environment file.
pub fn append_result(path: &Path, deployment_id: &str, status: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("open {}", path.display())),
            )
        })?;

    writeln!(file, "deploy-id={}", deployment_id)
        .and_then(|_| writeln!(file, "deploy-status={}", status))
        .map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("write {}", path.display())),
            )
        })
}
