//! Canonical resource names.

/// Collection segment of every project resource name.
pub const PROJECT_COLLECTION: &str = "project";

/// Canonical resource name for a short project id: `project/{id}`.
pub fn project_name(project_id: &str) -> String {
    format!("{PROJECT_COLLECTION}/{project_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("abc"), "project/abc");
        assert_eq!(project_name(""), "project/");
    }
}
