// @generated
// This file is @generated by prost-build.
#[derive(::validator::Validate)]
#[validate(schema(function = "crate::validation::validate_project_timestamps"))]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Project {
    /// Resource name, "project/{project_id}". Assigned by the server.
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    #[validate(length(min = 1, max = 256))]
    pub display_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    #[validate(length(max = 2048))]
    pub description: ::prost::alloc::string::String,
    /// Hex color, "#RRGGBB".
    #[prost(string, tag = "4")]
    #[validate(regex(path = *crate::validation::COLOR_TAG))]
    pub color_tag: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub created_at: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "6")]
    pub updated_at: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(enumeration = "project::State", tag = "7")]
    pub state: i32,
}
/// Nested message and enum types in `Project`.
pub mod project {
    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        ::prost::Enumeration
    )]
    #[repr(i32)]
    pub enum State {
        Unspecified = 0,
        Active = 1,
        Archived = 2,
        Deleted = 3,
    }
    impl State {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Unspecified => "STATE_UNSPECIFIED",
                Self::Active => "ACTIVE",
                Self::Archived => "ARCHIVED",
                Self::Deleted => "DELETED",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "STATE_UNSPECIFIED" => Some(Self::Unspecified),
                "ACTIVE" => Some(Self::Active),
                "ARCHIVED" => Some(Self::Archived),
                "DELETED" => Some(Self::Deleted),
                _ => None,
            }
        }
    }
}
#[derive(::validator::Validate)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateProjectRequest {
    /// Short id, becomes the last segment of the resource name.
    #[prost(string, tag = "1")]
    #[validate(
        length(min = 1, max = 63),
        regex(path = *crate::validation::RESOURCE_ID)
    )]
    pub project_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    #[validate(nested)]
    pub project: ::core::option::Option<Project>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetProjectRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListProjectsRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(string, tag = "2")]
    pub page_token: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub filter: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProjectsResponse {
    #[prost(message, repeated, tag = "1")]
    pub projects: ::prost::alloc::vec::Vec<Project>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateProjectRequest {
    #[prost(message, optional, tag = "1")]
    pub project: ::core::option::Option<Project>,
    #[prost(message, optional, tag = "2")]
    pub update_mask: ::core::option::Option<::prost_types::FieldMask>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DeleteProjectRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}
include!("tasks.v1.tonic.rs");
// @@protoc_insertion_point(module)
