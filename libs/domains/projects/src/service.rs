use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectFilter, ProjectPage, ProjectState, ProjectUpdate};
use crate::naming::project_name;
use crate::repository::ProjectRepository;

/// Domain arguments of a create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProject {
    /// Short id; becomes the last segment of the resource name
    pub project_id: String,
    pub project: Project,
}

/// Service layer for Project business logic
///
/// Owns name assignment and state transitions. Repository errors are returned
/// unchanged.
#[derive(Clone)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a project under `project/{project_id}`.
    ///
    /// Any client-supplied name is overwritten and both timestamps are set to
    /// now.
    #[instrument(skip(self, input), fields(project_id = %input.project_id))]
    pub async fn create_project(&self, input: CreateProject) -> ProjectResult<Project> {
        let CreateProject {
            project_id,
            mut project,
        } = input;

        if project.state == ProjectState::Unspecified {
            return Err(ProjectError::Validation(
                "project state must be specified".to_string(),
            ));
        }

        project.name = project_name(&project_id);
        let now = Utc::now();
        project.created_at = now;
        project.updated_at = now;

        self.repository.create(project).await
    }

    /// Get a project by resource name
    pub async fn get_project(&self, name: &str) -> ProjectResult<Project> {
        self.repository.get(name).await
    }

    /// List projects with filters
    pub async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
        self.repository.list(filter).await
    }

    /// Apply a partial update.
    ///
    /// Tombstones cannot be modified and a state change must be a permitted
    /// transition; both fail with `FailedPrecondition`.
    #[instrument(skip(self, update))]
    pub async fn update_project(&self, name: &str, update: ProjectUpdate) -> ProjectResult<Project> {
        let mut project = self.repository.get(name).await?;

        let target = update.state.unwrap_or(project.state);
        if !project.state.can_transition_to(target) {
            return Err(ProjectError::InvalidTransition {
                from: project.state,
                to: target,
            });
        }

        if update.is_empty() {
            return Ok(project);
        }

        project.apply_update(update);
        self.repository.update(project).await
    }

    /// Tombstone a project.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, name: &str) -> ProjectResult<Project> {
        let project = self.repository.get(name).await?;

        if !project.state.can_transition_to(ProjectState::Deleted) {
            return Err(ProjectError::InvalidTransition {
                from: project.state,
                to: ProjectState::Deleted,
            });
        }

        self.repository.delete(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProjectRepository, MockProjectRepository};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use tonic::Code;

    fn input(project_id: &str, state: ProjectState) -> CreateProject {
        CreateProject {
            project_id: project_id.to_string(),
            project: Project::new("Todo", state),
        }
    }

    fn stored(name: &str, state: ProjectState) -> Project {
        Project {
            name: name.to_string(),
            ..Project::new("Todo", state)
        }
    }

    #[tokio::test]
    async fn test_create_assigns_canonical_name() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_create()
            .withf(|p| p.name == "project/abc" && p.updated_at == p.created_at)
            .times(1)
            .returning(|p| Ok(p));

        let service = ProjectService::new(mock_repo);
        let mut args = input("abc", ProjectState::Active);
        args.project.name = "project/client-chosen".to_string();

        let project = service.create_project(args).await.unwrap();
        assert_eq!(project.name, "project/abc");
        assert_eq!(project.display_name, "Todo");
        assert_eq!(project.state, ProjectState::Active);
    }

    #[tokio::test]
    async fn test_create_returns_repository_error_unchanged() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_create()
            .returning(|p| Err(ProjectError::AlreadyExists(p.name)));

        let service = ProjectService::new(mock_repo);
        let err = service
            .create_project(input("abc", ProjectState::Active))
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::AlreadyExists(name) if name == "project/abc"));
    }

    #[tokio::test]
    async fn test_create_rejects_unspecified_state() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_create().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .create_project(input("abc", ProjectState::Unspecified))
            .await
            .unwrap_err();

        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_get_delegates_to_repository() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .with(eq("project/abc"))
            .returning(|name| Ok(stored(name, ProjectState::Active)));

        let service = ProjectService::new(mock_repo);
        let project = service.get_project("project/abc").await.unwrap();
        assert_eq!(project.name, "project/abc");
    }

    #[tokio::test]
    async fn test_update_rejects_transition_out_of_deleted() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .returning(|name| Ok(stored(name, ProjectState::Deleted)));
        mock_repo.expect_update().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .update_project(
                "project/abc",
                ProjectUpdate {
                    state: Some(ProjectState::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_update_rejects_field_changes_on_tombstone() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .returning(|name| Ok(stored(name, ProjectState::Deleted)));
        mock_repo.expect_update().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .update_project(
                "project/abc",
                ProjectUpdate {
                    display_name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_unspecified_target() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .returning(|name| Ok(stored(name, ProjectState::Active)));
        mock_repo.expect_update().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .update_project(
                "project/abc",
                ProjectUpdate {
                    state: Some(ProjectState::Unspecified),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_update_archives_active_project() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .returning(|name| Ok(stored(name, ProjectState::Active)));
        mock_repo
            .expect_update()
            .withf(|p| p.state == ProjectState::Archived && p.description == "done")
            .times(1)
            .returning(|p| Ok(p));

        let service = ProjectService::new(mock_repo);
        let project = service
            .update_project(
                "project/abc",
                ProjectUpdate {
                    description: Some("done".to_string()),
                    state: Some(ProjectState::Archived),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(project.state, ProjectState::Archived);
        assert_eq!(project.display_name, "Todo");
    }

    #[tokio::test]
    async fn test_empty_update_skips_write() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_get()
            .returning(|name| Ok(stored(name, ProjectState::Archived)));
        mock_repo.expect_update().never();

        let service = ProjectService::new(mock_repo);
        let project = service
            .update_project("project/abc", ProjectUpdate::default())
            .await
            .unwrap();
        assert_eq!(project.state, ProjectState::Archived);
    }

    #[tokio::test]
    async fn test_delete_twice_is_failed_precondition() {
        let service = ProjectService::new(InMemoryProjectRepository::new());
        service
            .create_project(input("abc", ProjectState::Archived))
            .await
            .unwrap();

        let tombstone = service.delete_project("project/abc").await.unwrap();
        assert_eq!(tombstone.state, ProjectState::Deleted);

        let err = service.delete_project("project/abc").await.unwrap_err();
        assert_eq!(err.code(), Code::FailedPrecondition);

        // record is retained
        let project = service.get_project("project/abc").await.unwrap();
        assert_eq!(project.state, ProjectState::Deleted);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let service = ProjectService::new(InMemoryProjectRepository::new());
        let err = service.delete_project("project/missing").await.unwrap_err();
        assert_eq!(err.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_list_passes_filter_through() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_list()
            .withf(|f| f.state == Some(ProjectState::Archived) && f.page_size == 10)
            .returning(|_| Ok(ProjectPage::default()));

        let service = ProjectService::new(mock_repo);
        let page = service
            .list_projects(ProjectFilter {
                state: Some(ProjectState::Archived),
                page_size: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(page.projects.is_empty());
    }

    /// Tombstones the record right after handing out a live snapshot, so the
    /// write lands on a project deleted in between.
    struct DeleteAfterRead {
        inner: InMemoryProjectRepository,
    }

    #[async_trait]
    impl ProjectRepository for DeleteAfterRead {
        async fn create(&self, project: Project) -> ProjectResult<Project> {
            self.inner.create(project).await
        }

        async fn get(&self, name: &str) -> ProjectResult<Project> {
            let snapshot = self.inner.get(name).await?;
            self.inner.delete(name).await?;
            Ok(snapshot)
        }

        async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
            self.inner.list(filter).await
        }

        async fn update(&self, project: Project) -> ProjectResult<Project> {
            self.inner.update(project).await
        }

        async fn delete(&self, name: &str) -> ProjectResult<Project> {
            self.inner.delete(name).await
        }
    }

    #[tokio::test]
    async fn test_update_racing_delete_keeps_tombstone() {
        let inner = InMemoryProjectRepository::new();
        let service = ProjectService::new(DeleteAfterRead {
            inner: inner.clone(),
        });
        service
            .create_project(input("abc", ProjectState::Active))
            .await
            .unwrap();

        let err = service
            .update_project(
                "project/abc",
                ProjectUpdate {
                    display_name: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::FailedPrecondition);

        let stored = inner.get("project/abc").await.unwrap();
        assert_eq!(stored.state, ProjectState::Deleted);
        assert_eq!(stored.display_name, "Todo");
    }

    #[tokio::test]
    async fn test_delete_racing_delete_is_failed_precondition() {
        let service = ProjectService::new(DeleteAfterRead {
            inner: InMemoryProjectRepository::new(),
        });
        service
            .create_project(input("abc", ProjectState::Active))
            .await
            .unwrap();

        let err = service.delete_project("project/abc").await.unwrap_err();
        assert!(matches!(err, ProjectError::InvalidTransition { .. }));
    }
}
