//! Projects Domain
//!
//! Domain model, naming, wire conversions and persistence seam for the
//! `tasks.v1.ProjectService` resource.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Transport  │  ← gRPC adapter (apps/zerg/projects)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Name assignment, state transitions
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Storage port (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Project, ProjectState, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{CreateProject, InMemoryProjectRepository, Project, ProjectService, ProjectState};
//!
//! # async fn run() -> domain_projects::ProjectResult<()> {
//! let service = ProjectService::new(InMemoryProjectRepository::new());
//!
//! let project = service
//!     .create_project(CreateProject {
//!         project_id: "groceries".to_string(),
//!         project: Project::new("Groceries", ProjectState::Active),
//!     })
//!     .await?;
//! assert_eq!(project.name, "project/groceries");
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod models;
pub mod naming;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use conversions::{decode_project, encode_project};
pub use error::{ProjectError, ProjectResult};
pub use models::{Project, ProjectFilter, ProjectPage, ProjectState, ProjectUpdate};
pub use naming::project_name;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::{CreateProject, ProjectService};
