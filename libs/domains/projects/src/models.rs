use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default number of projects returned by a list call
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Upper bound on a single page
pub const MAX_PAGE_SIZE: usize = 1000;

/// Project lifecycle state
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectState {
    /// Never persisted
    #[default]
    Unspecified,
    Active,
    Archived,
    /// Tombstone: the record is kept
    Deleted,
}

impl ProjectState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectState::Deleted)
    }

    /// Whether a persisted project may move from `self` to `target`.
    ///
    /// Staying in the same live state is allowed (plain field updates).
    /// `Unspecified` is never a valid target and nothing leaves `Deleted`.
    pub fn can_transition_to(self, target: ProjectState) -> bool {
        use ProjectState::*;

        match (self, target) {
            (_, Unspecified) | (Deleted, _) => false,
            (Active, Archived) | (Active, Deleted) | (Archived, Deleted) => true,
            (from, to) => from == to,
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Canonical resource name, `project/{id}`. Server-assigned.
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// `#RRGGBB` or empty
    pub color_tag: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: ProjectState,
}

impl Project {
    /// Create an unnamed project; the name is assigned on create.
    pub fn new(display_name: impl Into<String>, state: ProjectState) -> Self {
        let now = Utc::now();
        Self {
            name: String::new(),
            display_name: display_name.into(),
            description: String::new(),
            color_tag: String::new(),
            created_at: now,
            updated_at: now,
            state,
        }
    }

    /// Apply the fields present in `update` and bump `updated_at`.
    ///
    /// State transitions are checked by the service before this is called.
    pub fn apply_update(&mut self, update: ProjectUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color_tag) = update.color_tag {
            self.color_tag = color_tag;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        self.touch();
    }

    /// Set `updated_at` to now, never earlier than `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Partial update: only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub color_tag: Option<String>,
    pub state: Option<ProjectState>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.description.is_none()
            && self.color_tag.is_none()
            && self.state.is_none()
    }
}

/// Query filters for listing projects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectFilter {
    /// Only projects in this state
    pub state: Option<ProjectState>,
    /// Include tombstones when no state is given
    #[serde(default)]
    pub show_deleted: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Resource name to resume after, as returned in
    /// [`ProjectPage::next_page_token`]
    pub page_token: Option<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            state: None,
            show_deleted: false,
            page_size: default_page_size(),
            page_token: None,
        }
    }
}

impl ProjectFilter {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`; zero means the default.
    pub fn effective_page_size(&self) -> usize {
        match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self.state {
            Some(state) => project.state == state,
            None => self.show_deleted || !project.state.is_terminal(),
        }
    }
}

/// One page of a list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    /// Name of the last project in `projects`; `None` on the last page
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_state_machine() {
        use ProjectState::*;

        assert!(Active.can_transition_to(Archived));
        assert!(Active.can_transition_to(Deleted));
        assert!(Archived.can_transition_to(Deleted));
        assert!(Active.can_transition_to(Active));

        assert!(!Archived.can_transition_to(Active));
        assert!(!Active.can_transition_to(Unspecified));
        for target in [Unspecified, Active, Archived, Deleted] {
            assert!(!Deleted.can_transition_to(target));
        }
    }

    #[test]
    fn test_state_string_forms() {
        assert_eq!(ProjectState::Archived.to_string(), "archived");
        assert_eq!(ProjectState::from_str("deleted").unwrap(), ProjectState::Deleted);
        assert_eq!(
            serde_json::to_string(&ProjectState::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn test_apply_update_only_touches_given_fields() {
        let mut project = Project::new("Todo", ProjectState::Active);
        project.description = "keep me".to_string();
        let before = project.updated_at;

        project.apply_update(ProjectUpdate {
            display_name: Some("Groceries".to_string()),
            ..Default::default()
        });

        assert_eq!(project.display_name, "Groceries");
        assert_eq!(project.description, "keep me");
        assert_eq!(project.state, ProjectState::Active);
        assert!(project.updated_at >= before);
        assert!(project.updated_at >= project.created_at);
    }

    #[test]
    fn test_filter_hides_tombstones_by_default() {
        let live = Project::new("a", ProjectState::Archived);
        let gone = Project::new("b", ProjectState::Deleted);

        let filter = ProjectFilter::default();
        assert!(filter.matches(&live));
        assert!(!filter.matches(&gone));

        let with_deleted = ProjectFilter {
            show_deleted: true,
            ..Default::default()
        };
        assert!(with_deleted.matches(&gone));

        let only_deleted = ProjectFilter {
            state: Some(ProjectState::Deleted),
            ..Default::default()
        };
        assert!(only_deleted.matches(&gone));
        assert!(!only_deleted.matches(&live));
    }

    #[test]
    fn test_effective_page_size() {
        let mut filter = ProjectFilter::default();
        assert_eq!(filter.effective_page_size(), DEFAULT_PAGE_SIZE);

        filter.page_size = 0;
        assert_eq!(filter.effective_page_size(), DEFAULT_PAGE_SIZE);

        filter.page_size = 5000;
        assert_eq!(filter.effective_page_size(), MAX_PAGE_SIZE);
    }
}
