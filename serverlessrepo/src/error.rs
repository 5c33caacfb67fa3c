use crate::repository::RepositoryError;

/// Errors raised by this library itself, for example because the template's application
/// metadata is incomplete or the repository rejected the application artifacts.
#[derive(thiserror::Error, Debug)]
pub enum ApplicationError {
    #[error(
        "Application metadata not found in the SAM template: 'Metadata' section with \
         'AWS::ServerlessRepo::Application' is missing"
    )]
    ApplicationMetadataNotFound,
    #[error("Invalid application metadata: '{}' properties not provided", .properties.join(", "))]
    InvalidApplicationMetadata { properties: Vec<&'static str> },
    #[error("Invalid application metadata: {0}")]
    InvalidMetadataValue(#[source] serde_yaml::Error),
    #[error("Failed to convert application metadata to JSON: {0}")]
    MetadataToJson(#[source] serde_json::Error),
    #[error("Failed to serialize the template body: {0}")]
    SerializeTemplateBody(#[source] serde_yaml::Error),
    #[error(
        "AWS Serverless Application Repository doesn't have read permissions to bucket \
         '{bucket}', key '{key}'. Please update your Amazon S3 bucket policy to grant the service \
         read permissions to the application artifacts you have uploaded to your S3 bucket. See \
         https://docs.aws.amazon.com/serverlessrepo/latest/devguide/serverless-app-publishing-applications.html \
         for more details."
    )]
    S3PermissionsRequired { bucket: String, key: String },
    #[error("Unable to find the application id in the error message: {message}")]
    ApplicationIdNotFound { message: String },
}

/// An error for [`crate::publish::publish_application`].
///
/// [`PublishError::Client`] carries remote failures this library doesn't know how to handle,
/// unchanged, so callers can tell them apart from [`ApplicationError`]s.
#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Client(#[from] RepositoryError),
}
