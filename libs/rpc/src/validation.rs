//! Request validation rules referenced from the generated message types.
//!
//! The generated structs derive [`validator::Validate`]; field rules point at
//! the patterns below and `Project` carries a schema-level check on its
//! timestamps.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

use crate::tasks::v1::Project;

/// Short resource id: lowercase alphanumerics and inner hyphens.
pub static RESOURCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

/// Empty, or a `#RRGGBB` hex color.
pub static COLOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#[0-9A-Fa-f]{6})?$").unwrap());

/// `updated_at` must not precede `created_at` when both are present.
pub fn validate_project_timestamps(project: &Project) -> Result<(), ValidationError> {
    if let (Some(created), Some(updated)) = (&project.created_at, &project.updated_at) {
        if (updated.seconds, updated.nanos) < (created.seconds, created.nanos) {
            let mut err = ValidationError::new("updated_before_created");
            err.message = Some("updated_at must not precede created_at".into());
            return Err(err);
        }
    }
    Ok(())
}
