//! Build selection by tag.
//!
//! When no explicit build id is configured, the latest successful build
//! carrying the requested tags is deployed instead.

use crate::client::{BuildRecord, PlatformApi};
use crate::error::{Error, Result};

const SUCCESSFUL: &str = "SUCCESSFUL";

/// Pick the most recently created successful build matching the tags.
///
/// Fails the run when the tags match nothing, or when every matching build
/// is unsuccessful. On equal creation timestamps the later entry in the
/// platform's listing wins.
pub fn resolve_latest_successful(
    api: &dyn PlatformApi,
    model_id: &str,
    tags: &[String],
) -> Result<BuildRecord> {
    let builds = api.list_builds(model_id, tags)?;

    if builds.is_empty() {
        return Err(Error::build_not_found(
            model_id,
            tags.to_vec(),
            format!("no builds matched tags [{}]", tags.join(", ")),
        ));
    }

    builds
        .into_iter()
        .filter(|build| build.status == SUCCESSFUL)
        .max_by_key(|build| build.created_at)
        .ok_or_else(|| {
            Error::build_not_found(
                model_id,
                tags.to_vec(),
                format!(
                    "builds matched tags [{}] but none finished successfully",
                    tags.join(", ")
                ),
            )
        })
}
