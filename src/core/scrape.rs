//! Identifier extraction from deployment CLI output.
//!
//! The CLI prints a table whose cells are separated by box-drawing bars.
//! The deployment id is mandatory for everything downstream; the build id
//! is informational only.

use crate::error::{Error, Result};
use crate::utils::parser;

const DEPLOYMENT_ID_PATTERN: &str = r"Deployment ID\s+│\s+([\w-]+)";
const BUILD_ID_PATTERN: &str = r"Build ID\s+│\s+([\w-]+)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedIds {
    pub deployment_id: String,
    pub build_id: Option<String>,
}

/// Pull the deployment id (required) and build id (optional) out of the
/// captured CLI output.
pub fn scrape_ids(output: &str) -> Result<ScrapedIds> {
    let deployment_id = parser::extract_first(output, DEPLOYMENT_ID_PATTERN)
        .ok_or_else(Error::deploy_id_not_found)?;

    let build_id = parser::extract_first(output, BUILD_ID_PATTERN);
    if build_id.is_none() {
        eprintln!("[scrape] Build ID not found in the command output");
    }

    Ok(ScrapedIds {
        deployment_id,
        build_id,
    })
}
