//! Project-specific proto ↔ domain conversions
//!
//! - ProjectState ↔ protobuf `Project.State` (partial inbound, total outbound)
//! - Project ↔ protobuf `Project`
//!
//! Timestamp helpers come from `grpc_server::conversions` and are shared
//! across domains.

use grpc_server::conversions::{datetime_to_timestamp, opt_timestamp_to_datetime};
use rpc::tasks::v1::{self as proto, project::State};

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectState};

// ============================================================================
// State Conversions
// ============================================================================

impl From<ProjectState> for i32 {
    fn from(state: ProjectState) -> Self {
        match state {
            ProjectState::Active => State::Active as i32,
            ProjectState::Archived => State::Archived as i32,
            ProjectState::Deleted => State::Deleted as i32,
            ProjectState::Unspecified => State::Unspecified as i32,
        }
    }
}

/// Only `ACTIVE`, `ARCHIVED` and `DELETED` are accepted from the wire.
impl TryFrom<i32> for ProjectState {
    type Error = ProjectError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match State::try_from(value) {
            Ok(State::Active) => Ok(ProjectState::Active),
            Ok(State::Archived) => Ok(ProjectState::Archived),
            Ok(State::Deleted) => Ok(ProjectState::Deleted),
            Ok(State::Unspecified) | Err(_) => Err(ProjectError::InvalidState(value)),
        }
    }
}

// ============================================================================
// Project Conversions
// ============================================================================

/// Absent timestamps decode to the Unix epoch.
impl TryFrom<proto::Project> for Project {
    type Error = ProjectError;

    fn try_from(wire: proto::Project) -> Result<Self, Self::Error> {
        let state = ProjectState::try_from(wire.state)?;

        let created_at = opt_timestamp_to_datetime(wire.created_at.as_ref())
            .map_err(|reason| ProjectError::InvalidTimestamp {
                field: "created_at",
                reason,
            })?;
        let updated_at = opt_timestamp_to_datetime(wire.updated_at.as_ref())
            .map_err(|reason| ProjectError::InvalidTimestamp {
                field: "updated_at",
                reason,
            })?;

        Ok(Project {
            name: wire.name,
            display_name: wire.display_name,
            description: wire.description,
            color_tag: wire.color_tag,
            created_at,
            updated_at,
            state,
        })
    }
}

impl From<Project> for proto::Project {
    fn from(project: Project) -> Self {
        proto::Project {
            name: project.name,
            display_name: project.display_name,
            description: project.description,
            color_tag: project.color_tag,
            created_at: Some(datetime_to_timestamp(project.created_at)),
            updated_at: Some(datetime_to_timestamp(project.updated_at)),
            state: project.state.into(),
        }
    }
}

/// Decode an optional wire project; absence is not an error.
pub fn decode_project(wire: Option<proto::Project>) -> ProjectResult<Option<Project>> {
    wire.map(Project::try_from).transpose()
}

/// Encode an optional domain project; never fails.
pub fn encode_project(project: Option<Project>) -> Option<proto::Project> {
    project.map(proto::Project::from)
}
