use crate::error::{ApplicationError, PublishError};
use crate::metadata::{
    application_metadata_details, parse_application_metadata, strip_application_metadata,
    ApplicationMetadata, AUTHOR, DESCRIPTION, NAME, UPDATABLE_PROPERTIES, VERSION_PROPERTIES,
};
use crate::repository::{
    ApplicationRepository, CreateApplicationRequest, CreateApplicationVersionRequest,
    RepositoryError, UpdateApplicationRequest, BAD_REQUEST_EXCEPTION,
};
use crate::template::TemplateDocument;
use log::debug;
use std::fmt;

const S3_ACCESS_DENIED_MESSAGE: &str = "Failed to copy S3 object. Access denied:";

/// A remote action performed while publishing an application.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PublishAction {
    CreateApplication,
    UpdateApplication,
    CreateApplicationVersion,
}

impl fmt::Display for PublishAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PublishAction::CreateApplication => "CREATE_APPLICATION",
            PublishAction::UpdateApplication => "UPDATE_APPLICATION",
            PublishAction::CreateApplicationVersion => "CREATE_APPLICATION_VERSION",
        })
    }
}

/// The outcome of [`publish_application`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub application_id: String,
    /// The application metadata that was created or changed, in template order.
    pub details: serde_json::Map<String, serde_json::Value>,
    pub actions: Vec<PublishAction>,
}

/// Publishes the application described by the given template.
///
/// A new application is created first. If the repository reports that the application already
/// exists, its metadata is updated instead and, when the template specifies a
/// `SemanticVersion`, a new application version is created. Creating a version that already
/// exists is not treated as an error.
///
/// The application descriptor is stripped from the template before it is uploaded.
///
/// # Errors
///
/// Will return [`PublishError::Application`] if the template's application metadata is invalid
/// or the repository cannot read the application artifacts, and [`PublishError::Client`] for
/// any other failed remote call.
pub async fn publish_application<R>(
    repository: &R,
    template: &TemplateDocument,
) -> Result<PublishResult, PublishError>
where
    R: ApplicationRepository + ?Sized,
{
    let app_metadata = parse_application_metadata(template)?;

    let template_body = strip_application_metadata(template)
        .to_yaml_string()
        .map_err(ApplicationError::SerializeTemplateBody)?;

    let request = create_application_request(&app_metadata, &template_body)?;
    debug!("Creating application {}", request.name);

    let (application_id, actions) = match repository.create_application(request).await {
        Ok(application_id) => (application_id, vec![PublishAction::CreateApplication]),
        Err(RepositoryError::Service(error)) if error.is_conflict() => {
            let application_id = parse_application_id(&error.message)
                .ok_or_else(|| ApplicationError::ApplicationIdNotFound {
                    message: error.message.clone(),
                })?
                .to_string();

            let actions =
                update_application(repository, &app_metadata, &application_id, &template_body)
                    .await?;

            (application_id, actions)
        }
        Err(error) => return Err(wrap_client_error(error)),
    };

    Ok(PublishResult {
        details: publish_details(template, &actions)?,
        application_id,
        actions,
    })
}

async fn update_application<R>(
    repository: &R,
    app_metadata: &ApplicationMetadata,
    application_id: &str,
    template_body: &str,
) -> Result<Vec<PublishAction>, PublishError>
where
    R: ApplicationRepository + ?Sized,
{
    debug!("Application {application_id} already exists, updating it");

    repository
        .update_application(UpdateApplicationRequest {
            application_id: application_id.to_string(),
            author: non_empty(app_metadata.author.as_ref()),
            description: non_empty(app_metadata.description.as_ref()),
            home_page_url: non_empty(app_metadata.home_page_url.as_ref()),
            labels: non_empty_labels(app_metadata.labels.as_ref()),
            readme_url: non_empty(app_metadata.readme_url.as_ref()),
        })
        .await
        .map_err(wrap_client_error)?;

    let mut actions = vec![PublishAction::UpdateApplication];

    if let Some(semantic_version) = app_metadata
        .semantic_version
        .as_ref()
        .filter(|version| !version.is_empty())
    {
        debug!("Creating version {semantic_version} of application {application_id}");

        let result = repository
            .create_application_version(CreateApplicationVersionRequest {
                application_id: application_id.to_string(),
                semantic_version: semantic_version.clone(),
                source_code_url: non_empty(app_metadata.source_code_url.as_ref()),
                template_body: template_body.to_string(),
            })
            .await;

        match result {
            Ok(()) => actions.push(PublishAction::CreateApplicationVersion),
            Err(RepositoryError::Service(error)) if error.is_conflict() => {
                debug!("Version {semantic_version} already exists: {}", error.message);
            }
            Err(error) => return Err(wrap_client_error(error)),
        }
    }

    Ok(actions)
}

fn create_application_request(
    app_metadata: &ApplicationMetadata,
    template_body: &str,
) -> Result<CreateApplicationRequest, ApplicationError> {
    app_metadata.validate(&[AUTHOR, DESCRIPTION, NAME])?;

    Ok(CreateApplicationRequest {
        author: app_metadata.author.clone().unwrap_or_default(),
        description: app_metadata.description.clone().unwrap_or_default(),
        name: app_metadata.name.clone().unwrap_or_default(),
        home_page_url: non_empty(app_metadata.home_page_url.as_ref()),
        labels: non_empty_labels(app_metadata.labels.as_ref()),
        license_url: non_empty(app_metadata.license_url.as_ref()),
        readme_url: non_empty(app_metadata.readme_url.as_ref()),
        semantic_version: non_empty(app_metadata.semantic_version.as_ref()),
        source_code_url: non_empty(app_metadata.source_code_url.as_ref()),
        spdx_license_id: non_empty(app_metadata.spdx_license_id.as_ref()),
        template_body: template_body.to_string(),
    })
}

// Empty metadata values are left out of requests, the same as missing ones.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.is_empty()).cloned()
}

fn non_empty_labels(labels: Option<&Vec<String>>) -> Option<Vec<String>> {
    labels.filter(|labels| !labels.is_empty()).cloned()
}

fn publish_details(
    template: &TemplateDocument,
    actions: &[PublishAction],
) -> Result<serde_json::Map<String, serde_json::Value>, ApplicationError> {
    if actions.contains(&PublishAction::CreateApplication) {
        return application_metadata_details(template, None);
    }

    let mut properties = UPDATABLE_PROPERTIES.to_vec();
    if actions.contains(&PublishAction::CreateApplicationVersion) {
        properties.extend(VERSION_PROPERTIES);
    }

    application_metadata_details(template, Some(&properties))
}

fn wrap_client_error(error: RepositoryError) -> PublishError {
    let access_denied = error
        .service_error()
        .filter(|service_error| service_error.code == BAD_REQUEST_EXCEPTION)
        .and_then(|service_error| parse_s3_access_denied(&service_error.message));

    match access_denied {
        Some((bucket, key)) => ApplicationError::S3PermissionsRequired { bucket, key }.into(),
        None => PublishError::Client(error),
    }
}

// Messages look like "Failed to copy S3 object. Access denied: bucket=<bucket>, key=<key>"
fn parse_s3_access_denied(message: &str) -> Option<(String, String)> {
    let (_, location) = message.split_once(S3_ACCESS_DENIED_MESSAGE)?;
    let (_, location) = location.split_once("bucket=")?;
    let (bucket, key) = location.split_once(", key=")?;

    Some((bucket.to_string(), key.trim_end().to_string())).filter(|(bucket, key)| {
        !bucket.is_empty() && !key.is_empty()
    })
}

/// Finds an application ARN such as
/// `arn:aws:serverlessrepo:us-east-1:123456789012:applications/hello` in the given text.
#[must_use]
pub fn parse_application_id(text: &str) -> Option<&str> {
    text.split_whitespace().find_map(|word| {
        let candidate = &word[word.find("arn:")?..];
        is_application_arn(candidate).then_some(candidate)
    })
}

fn is_application_arn(candidate: &str) -> bool {
    let is_word = |value: &str| {
        !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    };

    match candidate.splitn(6, ':').collect::<Vec<_>>().as_slice() {
        ["arn", partition, "serverlessrepo", region, account_id, resource] => {
            is_word(partition)
                && is_word(region)
                && !account_id.is_empty()
                && account_id.chars().all(|c| c.is_ascii_digit())
                && resource
                    .strip_prefix("applications/")
                    .is_some_and(|name| !name.is_empty())
        }
        _ => false,
    }
}
