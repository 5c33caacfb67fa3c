use crate::exit_code;
use serverlessrepo::repository::{RepositoryError, ServiceError, BAD_REQUEST_EXCEPTION};
use serverlessrepo::{ApplicationError, PublishError, TemplateError};

const SAM_PUBLISH_DOC: &str =
    "https://docs.aws.amazon.com/serverless-application-model/latest/developerguide/serverless-sam-template-publishing-applications.html";

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("{0}")]
    ReadTemplate(#[source] TemplateError),
    #[error("{0}")]
    OverrideSemanticVersion(#[source] ApplicationError),
    #[error("{0}")]
    WriteTemplate(#[source] TemplateError),
    #[error("{0}")]
    Application(#[source] ApplicationError),
    #[error("{guidance}\n{1}", guidance = .0.guidance())]
    KnownRejection(KnownRejection, #[source] ServiceError),
    #[error(transparent)]
    Unhandled(RepositoryError),
}

impl Error {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Error::Unhandled(_) => exit_code::UNHANDLED_ERROR,
            _ => exit_code::USER_ERROR,
        }
    }
}

impl From<PublishError> for Error {
    fn from(error: PublishError) -> Self {
        match error {
            PublishError::Application(error) => Error::Application(error),
            PublishError::Client(RepositoryError::Service(service_error)) => {
                match KnownRejection::classify(&service_error) {
                    Some(rejection) => Error::KnownRejection(rejection, service_error),
                    None => Error::Unhandled(RepositoryError::Service(service_error)),
                }
            }
            PublishError::Client(error) => Error::Unhandled(error),
        }
    }
}

/// A rejection by the remote service with a known cause the user can fix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum KnownRejection {
    InvalidS3Uri,
    InvalidSemanticVersion,
}

// Evaluated in order, the first rule whose error code and message substring match wins.
const KNOWN_REJECTION_RULES: [(&str, &str, KnownRejection); 2] = [
    (
        BAD_REQUEST_EXCEPTION,
        "Invalid S3 URI",
        KnownRejection::InvalidS3Uri,
    ),
    (
        BAD_REQUEST_EXCEPTION,
        "not a valid SemVer",
        KnownRejection::InvalidSemanticVersion,
    ),
];

impl KnownRejection {
    pub(crate) fn classify(error: &ServiceError) -> Option<KnownRejection> {
        KNOWN_REJECTION_RULES
            .iter()
            .find(|(code, pattern, _)| error.code == *code && error.message.contains(pattern))
            .map(|(_, _, rejection)| *rejection)
    }

    fn guidance(self) -> String {
        match self {
            KnownRejection::InvalidS3Uri => format!(
                "Your SAM template contains invalid S3 URIs. Please make sure that you have \
                 uploaded application artifacts to S3 by packaging the template, and that the \
                 template references the packaged artifacts. See more details in {SAM_PUBLISH_DOC}"
            ),
            KnownRejection::InvalidSemanticVersion => String::from(
                "The provided SemanticVersion is not a valid version number. Please follow the \
                 Semantic Versioning scheme proposed in https://semver.org/",
            ),
        }
    }
}
