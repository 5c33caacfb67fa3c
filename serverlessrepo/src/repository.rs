use async_trait::async_trait;

pub const CREATE_APPLICATION_OPERATION: &str = "CreateApplication";
pub const UPDATE_APPLICATION_OPERATION: &str = "UpdateApplication";
pub const CREATE_APPLICATION_VERSION_OPERATION: &str = "CreateApplicationVersion";

pub const BAD_REQUEST_EXCEPTION: &str = "BadRequestException";
pub const CONFLICT_EXCEPTION: &str = "ConflictException";

/// The remote operations needed to publish an application.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Creates a new application and returns its id.
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<String, RepositoryError>;

    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> Result<(), RepositoryError>;

    async fn create_application_version(
        &self,
        request: CreateApplicationVersionRequest,
    ) -> Result<(), RepositoryError>;
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CreateApplicationRequest {
    pub author: String,
    pub description: String,
    pub name: String,
    pub home_page_url: Option<String>,
    pub labels: Option<Vec<String>>,
    pub license_url: Option<String>,
    pub readme_url: Option<String>,
    pub semantic_version: Option<String>,
    pub source_code_url: Option<String>,
    pub spdx_license_id: Option<String>,
    pub template_body: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UpdateApplicationRequest {
    pub application_id: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub home_page_url: Option<String>,
    pub labels: Option<Vec<String>>,
    pub readme_url: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CreateApplicationVersionRequest {
    pub application_id: String,
    pub semantic_version: String,
    pub source_code_url: Option<String>,
    pub template_body: String,
}

/// An error response of the remote service.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("An error occurred ({code}) when calling the {operation} operation: {message}")]
pub struct ServiceError {
    pub operation: &'static str,
    pub code: String,
    pub message: String,
}

impl ServiceError {
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.code == CONFLICT_EXCEPTION
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum RepositoryError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Failed to call the {operation} operation: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
    #[error("Unexpected response from the {operation} operation: {message}")]
    InvalidResponse {
        operation: &'static str,
        message: String,
    },
}

impl RepositoryError {
    #[must_use]
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            RepositoryError::Service(service_error) => Some(service_error),
            RepositoryError::Transport { .. } | RepositoryError::InvalidResponse { .. } => None,
        }
    }
}
