//! Projects gRPC service implementation
//!
//! `ProjectServiceImpl` runs every create through the same pipeline:
//! validate the wire request, convert it to domain arguments, call the domain
//! service, then map the outcome to a response or a status. RPCs without a
//! domain implementation yet are delegated to [`UnimplementedProjectService`].

use std::sync::Arc;

use domain_projects::{
    CreateProject, ProjectError, ProjectRepository, ProjectService, decode_project,
};
use grpc_server::{RequestId, ToTonicOption, ToTonicResult};
use rpc::tasks::v1::{
    self as proto, CreateProjectRequest, DeleteProjectRequest, GetProjectRequest,
    ListProjectsRequest, ListProjectsResponse, UpdateProjectRequest,
    project_service_server::ProjectService as ProjectRpc,
};
use tonic::{Code, Request, Response, Status};
use tracing::{Instrument, error, info, info_span, warn};
use validator::Validate;

/// Answers `Unimplemented` for every RPC.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnimplementedProjectService;

#[tonic::async_trait]
impl ProjectRpc for UnimplementedProjectService {
    async fn create_project(
        &self,
        _request: Request<CreateProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        Err(Status::unimplemented("CreateProject is not implemented"))
    }

    async fn get_project(
        &self,
        _request: Request<GetProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        Err(Status::unimplemented("GetProject is not implemented"))
    }

    async fn list_projects(
        &self,
        _request: Request<ListProjectsRequest>,
    ) -> Result<Response<ListProjectsResponse>, Status> {
        Err(Status::unimplemented("ListProjects is not implemented"))
    }

    async fn update_project(
        &self,
        _request: Request<UpdateProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        Err(Status::unimplemented("UpdateProject is not implemented"))
    }

    async fn delete_project(
        &self,
        _request: Request<DeleteProjectRequest>,
    ) -> Result<Response<()>, Status> {
        Err(Status::unimplemented("DeleteProject is not implemented"))
    }
}

/// gRPC service implementation for projects
///
/// Wraps the domain ProjectService. Generic over the repository type for
/// testability.
pub struct ProjectServiceImpl<R>
where
    R: ProjectRepository + 'static,
{
    service: Arc<ProjectService<R>>,
    fallback: UnimplementedProjectService,
}

impl<R> ProjectServiceImpl<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(service: ProjectService<R>) -> Self {
        Self {
            service: Arc::new(service),
            fallback: UnimplementedProjectService,
        }
    }

    async fn create(&self, request: CreateProjectRequest) -> Result<proto::Project, Status> {
        request.validate().to_tonic()?;

        let project = decode_project(request.project)
            .to_tonic()?
            .ok_or_invalid("project is required")?;

        let project = self
            .service
            .create_project(CreateProject {
                project_id: request.project_id,
                project,
            })
            .await
            .map_err(|e| create_status(&e))?;

        info!(name = %project.name, state = %project.state, "Project created");
        Ok(project.into())
    }
}

/// Only `FailedPrecondition` is passed to the caller; every other failure
/// becomes a generic `Internal` and its detail stays in the log.
fn create_status(err: &ProjectError) -> Status {
    match err.code() {
        Code::FailedPrecondition => {
            warn!(error = %err, "Project create rejected");
            Status::failed_precondition(err.to_string())
        }
        _ => {
            error!(error = %err, "Project create failed");
            Status::internal("cannot create project")
        }
    }
}

#[tonic::async_trait]
impl<R> ProjectRpc for ProjectServiceImpl<R>
where
    R: ProjectRepository + 'static,
{
    async fn create_project(
        &self,
        request: Request<CreateProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        let span = info_span!("create_project", request_id = %RequestId::of(&request));
        self.create(request.into_inner())
            .instrument(span)
            .await
            .map(Response::new)
    }

    async fn get_project(
        &self,
        request: Request<GetProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        self.fallback.get_project(request).await
    }

    async fn list_projects(
        &self,
        request: Request<ListProjectsRequest>,
    ) -> Result<Response<ListProjectsResponse>, Status> {
        self.fallback.list_projects(request).await
    }

    async fn update_project(
        &self,
        request: Request<UpdateProjectRequest>,
    ) -> Result<Response<proto::Project>, Status> {
        self.fallback.update_project(request).await
    }

    async fn delete_project(
        &self,
        request: Request<DeleteProjectRequest>,
    ) -> Result<Response<()>, Status> {
        self.fallback.delete_project(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_projects::{Project, ProjectFilter, ProjectPage, ProjectResult};
    use rpc::tasks::v1::project::State;
    use std::sync::Mutex;

    type Failure = fn(&Project) -> ProjectError;

    /// Repository that records create calls and optionally fails them
    #[derive(Clone, Default)]
    struct RecordingRepository {
        created: Arc<Mutex<Vec<Project>>>,
        failure: Option<Failure>,
    }

    impl RecordingRepository {
        fn failing(failure: Failure) -> Self {
            Self {
                failure: Some(failure),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.created.lock().unwrap().len()
        }
    }

    #[tonic::async_trait]
    impl ProjectRepository for RecordingRepository {
        async fn create(&self, project: Project) -> ProjectResult<Project> {
            self.created.lock().unwrap().push(project.clone());
            match self.failure {
                Some(failure) => Err(failure(&project)),
                None => Ok(project),
            }
        }

        async fn get(&self, name: &str) -> ProjectResult<Project> {
            Err(ProjectError::NotFound(name.to_string()))
        }

        async fn list(&self, _filter: ProjectFilter) -> ProjectResult<ProjectPage> {
            Ok(ProjectPage::default())
        }

        async fn update(&self, project: Project) -> ProjectResult<Project> {
            Err(ProjectError::NotFound(project.name))
        }

        async fn delete(&self, name: &str) -> ProjectResult<Project> {
            Err(ProjectError::NotFound(name.to_string()))
        }
    }

    fn create_test_service(repository: RecordingRepository) -> ProjectServiceImpl<RecordingRepository> {
        ProjectServiceImpl::new(ProjectService::new(repository))
    }

    fn create_request(project_id: &str, state: i32) -> Request<CreateProjectRequest> {
        Request::new(CreateProjectRequest {
            project_id: project_id.to_string(),
            project: Some(proto::Project {
                display_name: "Todo".to_string(),
                state,
                ..Default::default()
            }),
        })
    }

    #[tokio::test]
    async fn test_create_project_success() {
        let repository = RecordingRepository::default();
        let service = create_test_service(repository.clone());

        let response = service
            .create_project(create_request("abc", State::Active as i32))
            .await
            .unwrap();

        let project = response.into_inner();
        assert_eq!(project.name, "project/abc");
        assert_eq!(project.display_name, "Todo");
        assert_eq!(project.state, State::Active as i32);
        assert!(project.created_at.is_some());
        assert_eq!(repository.calls(), 1);
    }

    #[tokio::test]
    async fn test_client_supplied_name_is_replaced() {
        let repository = RecordingRepository::default();
        let service = create_test_service(repository.clone());

        let mut request = create_request("abc", State::Archived as i32);
        if let Some(project) = request.get_mut().project.as_mut() {
            project.name = "project/other".to_string();
        }

        let project = service.create_project(request).await.unwrap().into_inner();
        assert_eq!(project.name, "project/abc");
        assert_eq!(repository.created.lock().unwrap()[0].name, "project/abc");
    }

    #[tokio::test]
    async fn test_invalid_project_id_is_invalid_argument() {
        let repository = RecordingRepository::default();
        let service = create_test_service(repository.clone());

        let status = service
            .create_project(create_request("projectID", State::Active as i32))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_project_is_invalid_argument() {
        let repository = RecordingRepository::default();
        let service = create_test_service(repository.clone());

        let status = service
            .create_project(Request::new(CreateProjectRequest {
                project_id: "abc".to_string(),
                project: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_state_is_invalid_argument() {
        let repository = RecordingRepository::default();
        let service = create_test_service(repository.clone());

        for state in [1000, State::Unspecified as i32] {
            let status = service
                .create_project(create_request("abc", state))
                .await
                .unwrap_err();
            assert_eq!(status.code(), Code::InvalidArgument);
        }
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_conflict_is_failed_precondition() {
        let repository =
            RecordingRepository::failing(|p| ProjectError::AlreadyExists(p.name.clone()));
        let service = create_test_service(repository);

        let status = service
            .create_project(create_request("abc", State::Active as i32))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
        assert!(status.message().contains("project/abc"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_without_detail() {
        let repository =
            RecordingRepository::failing(|_| ProjectError::Internal("disk quota exceeded".into()));
        let service = create_test_service(repository);

        let status = service
            .create_project(create_request("abc", State::Active as i32))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("disk quota"));
    }

    #[tokio::test]
    async fn test_not_found_from_storage_is_internal() {
        let repository =
            RecordingRepository::failing(|p| ProjectError::NotFound(p.name.clone()));
        let service = create_test_service(repository);

        let status = service
            .create_project(create_request("abc", State::Active as i32))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_other_rpcs_are_unimplemented() {
        let service = create_test_service(RecordingRepository::default());

        let get = service
            .get_project(Request::new(GetProjectRequest {
                name: "project/abc".to_string(),
            }))
            .await
            .unwrap_err();
        let list = service
            .list_projects(Request::new(ListProjectsRequest::default()))
            .await
            .unwrap_err();
        let update = service
            .update_project(Request::new(UpdateProjectRequest::default()))
            .await
            .unwrap_err();
        let delete = service
            .delete_project(Request::new(DeleteProjectRequest {
                name: "project/abc".to_string(),
            }))
            .await
            .unwrap_err();

        for status in [get, list, update, delete] {
            assert_eq!(status.code(), Code::Unimplemented);
        }
    }

    #[tokio::test]
    async fn test_fallback_rejects_create_too() {
        let status = UnimplementedProjectService
            .create_project(create_request("abc", State::Active as i32))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unimplemented);
    }
}
