use crate::repository::{
    ApplicationRepository, CreateApplicationRequest, CreateApplicationVersionRequest,
    RepositoryError, ServiceError, UpdateApplicationRequest, CREATE_APPLICATION_OPERATION,
    CREATE_APPLICATION_VERSION_OPERATION, UPDATE_APPLICATION_OPERATION,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_serverlessapplicationrepository::config::Region;
use aws_sdk_serverlessapplicationrepository::error::{
    DisplayErrorContext, ProvideErrorMetadata, SdkError,
};
use aws_sdk_serverlessapplicationrepository::Client;
use std::fmt::Debug;
use tokio::sync::OnceCell;

/// [`ApplicationRepository`] backed by the AWS Serverless Application Repository API.
///
/// The AWS configuration is only loaded when the client is first used.
#[derive(Debug)]
pub struct ServerlessRepoClient {
    region: Option<String>,
    profile: Option<String>,
    client: OnceCell<Client>,
}

impl ServerlessRepoClient {
    /// Creates a client for the default AWS configuration chain, optionally overriding the
    /// region and the shared config profile.
    #[must_use]
    pub fn new(region: Option<String>, profile: Option<String>) -> Self {
        Self {
            region,
            profile,
            client: OnceCell::new(),
        }
    }

    /// The region requests are sent to, as configured or resolved by the AWS configuration
    /// chain.
    pub async fn region(&self) -> Option<String> {
        self.client()
            .await
            .config()
            .region()
            .map(ToString::to_string)
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                Client::new(&load_sdk_config(self.region.clone(), self.profile.clone()).await)
            })
            .await
    }
}

// Explicit values take precedence over the environment and shared config files.
async fn load_sdk_config(region: Option<String>, profile: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    loader.load().await
}

#[async_trait]
impl ApplicationRepository for ServerlessRepoClient {
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<String, RepositoryError> {
        let output = self
            .client()
            .await
            .create_application()
            .author(request.author)
            .description(request.description)
            .name(request.name)
            .set_home_page_url(request.home_page_url)
            .set_labels(request.labels)
            .set_license_url(request.license_url)
            .set_readme_url(request.readme_url)
            .set_semantic_version(request.semantic_version)
            .set_source_code_url(request.source_code_url)
            .set_spdx_license_id(request.spdx_license_id)
            .template_body(request.template_body)
            .send()
            .await
            .map_err(|error| into_repository_error(CREATE_APPLICATION_OPERATION, &error))?;

        output
            .application_id()
            .map(ToString::to_string)
            .ok_or_else(|| RepositoryError::InvalidResponse {
                operation: CREATE_APPLICATION_OPERATION,
                message: String::from("response did not contain an application id"),
            })
    }

    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> Result<(), RepositoryError> {
        self.client()
            .await
            .update_application()
            .application_id(request.application_id)
            .set_author(request.author)
            .set_description(request.description)
            .set_home_page_url(request.home_page_url)
            .set_labels(request.labels)
            .set_readme_url(request.readme_url)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| into_repository_error(UPDATE_APPLICATION_OPERATION, &error))
    }

    async fn create_application_version(
        &self,
        request: CreateApplicationVersionRequest,
    ) -> Result<(), RepositoryError> {
        self.client()
            .await
            .create_application_version()
            .application_id(request.application_id)
            .semantic_version(request.semantic_version)
            .set_source_code_url(request.source_code_url)
            .template_body(request.template_body)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| into_repository_error(CREATE_APPLICATION_VERSION_OPERATION, &error))
    }
}

fn into_repository_error<E, R>(operation: &'static str, error: &SdkError<E, R>) -> RepositoryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    match error.as_service_error() {
        Some(service_error) if service_error.code().is_some() => {
            RepositoryError::Service(ServiceError {
                operation,
                code: service_error.code().unwrap_or_default().to_string(),
                message: service_error.message().unwrap_or_default().to_string(),
            })
        }
        _ => RepositoryError::Transport {
            operation,
            message: DisplayErrorContext(error).to_string(),
        },
    }
}
