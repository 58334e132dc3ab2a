use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectFilter, ProjectPage, ProjectState};

/// Repository trait for Project persistence
///
/// Every method reports failure through [`ProjectError`]; its
/// [`code`](ProjectError::code) is the status callers act on. A name
/// conflict on create is `FailedPrecondition`, anything unexpected is
/// `Internal`. Implementations own their locking, and `update`/`delete` check
/// [`ProjectState::can_transition_to`] against the stored state inside the
/// same critical section as the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project under its (already assigned) name
    async fn create(&self, project: Project) -> ProjectResult<Project>;

    /// Get a project by resource name
    async fn get(&self, name: &str) -> ProjectResult<Project>;

    /// List projects ordered by name
    async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage>;

    /// Replace an existing project; `InvalidTransition` if the stored state
    /// cannot move to `project.state`
    async fn update(&self, project: Project) -> ProjectResult<Project>;

    /// Turn a project into a tombstone; the record is kept.
    /// `InvalidTransition` if it already is one.
    async fn delete(&self, name: &str) -> ProjectResult<Project>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<BTreeMap<String, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> ProjectResult<Project> {
        let mut projects = self.projects.write().await;

        if projects.contains_key(&project.name) {
            return Err(ProjectError::AlreadyExists(project.name));
        }

        projects.insert(project.name.clone(), project.clone());

        tracing::info!(name = %project.name, "Created project");
        Ok(project)
    }

    async fn get(&self, name: &str) -> ProjectResult<Project> {
        let projects = self.projects.read().await;
        projects
            .get(name)
            .cloned()
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
        let projects = self.projects.read().await;
        let page_size = filter.effective_page_size();

        let start = match &filter.page_token {
            Some(token) => Bound::Excluded(token.clone()),
            None => Bound::Unbounded,
        };

        let mut matching = projects
            .range((start, Bound::Unbounded))
            .map(|(_, project)| project)
            .filter(|project| filter.matches(project));

        let page: Vec<Project> = matching.by_ref().take(page_size).cloned().collect();
        let next_page_token = match (matching.next(), page.last()) {
            (Some(_), Some(last)) => Some(last.name.clone()),
            _ => None,
        };

        Ok(ProjectPage {
            projects: page,
            next_page_token,
        })
    }

    async fn update(&self, project: Project) -> ProjectResult<Project> {
        let mut projects = self.projects.write().await;

        let stored = projects
            .get_mut(&project.name)
            .ok_or_else(|| ProjectError::NotFound(project.name.clone()))?;
        if !stored.state.can_transition_to(project.state) {
            return Err(ProjectError::InvalidTransition {
                from: stored.state,
                to: project.state,
            });
        }
        *stored = project.clone();

        tracing::info!(name = %project.name, state = %project.state, "Updated project");
        Ok(project)
    }

    async fn delete(&self, name: &str) -> ProjectResult<Project> {
        let mut projects = self.projects.write().await;

        let stored = projects
            .get_mut(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;
        if !stored.state.can_transition_to(ProjectState::Deleted) {
            return Err(ProjectError::InvalidTransition {
                from: stored.state,
                to: ProjectState::Deleted,
            });
        }
        stored.state = ProjectState::Deleted;
        stored.touch();

        tracing::info!(name = %name, "Deleted project (tombstone)");
        Ok(stored.clone())
    }
}
