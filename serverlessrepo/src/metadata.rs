use crate::error::ApplicationError;
use crate::template::TemplateDocument;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// Top-level template key holding the metadata section.
pub const METADATA: &str = "Metadata";
/// Key of the application descriptor inside the metadata section.
pub const SERVERLESS_REPO_APPLICATION: &str = "AWS::ServerlessRepo::Application";

pub const NAME: &str = "Name";
pub const DESCRIPTION: &str = "Description";
pub const AUTHOR: &str = "Author";
pub const SPDX_LICENSE_ID: &str = "SpdxLicenseId";
pub const LICENSE_URL: &str = "LicenseUrl";
pub const README_URL: &str = "ReadmeUrl";
pub const LABELS: &str = "Labels";
pub const HOME_PAGE_URL: &str = "HomePageUrl";
pub const SEMANTIC_VERSION: &str = "SemanticVersion";
pub const SOURCE_CODE_URL: &str = "SourceCodeUrl";

/// Properties that can be changed on an existing application.
pub const UPDATABLE_PROPERTIES: [&str; 5] = [AUTHOR, DESCRIPTION, HOME_PAGE_URL, LABELS, README_URL];

/// Properties that can only be changed by creating a new application version.
pub const VERSION_PROPERTIES: [&str; 2] = [SEMANTIC_VERSION, SOURCE_CODE_URL];

/// The `AWS::ServerlessRepo::Application` section of a SAM template.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub spdx_license_id: Option<String>,
    pub license_url: Option<String>,
    pub readme_url: Option<String>,
    pub labels: Option<Vec<String>>,
    pub home_page_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_version")]
    pub semantic_version: Option<String>,
    pub source_code_url: Option<String>,
}

impl ApplicationMetadata {
    /// Returns the names of the given properties that are missing or empty.
    #[must_use]
    pub fn missing_properties(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|property| !self.has_property(property))
            .collect()
    }

    /// # Errors
    ///
    /// Will return `Err` listing every required property that is missing or empty.
    pub fn validate(&self, required: &[&'static str]) -> Result<(), ApplicationError> {
        let properties = self.missing_properties(required);

        if properties.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::InvalidApplicationMetadata { properties })
        }
    }

    fn has_property(&self, property: &str) -> bool {
        let value = match property {
            NAME => &self.name,
            DESCRIPTION => &self.description,
            AUTHOR => &self.author,
            SPDX_LICENSE_ID => &self.spdx_license_id,
            LICENSE_URL => &self.license_url,
            README_URL => &self.readme_url,
            HOME_PAGE_URL => &self.home_page_url,
            SEMANTIC_VERSION => &self.semantic_version,
            SOURCE_CODE_URL => &self.source_code_url,
            LABELS => return self.labels.as_ref().is_some_and(|labels| !labels.is_empty()),
            _ => return false,
        };

        value.as_ref().is_some_and(|value| !value.is_empty())
    }
}

// YAML reads `SemanticVersion: 1.0` as a number.
fn deserialize_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(version)) => Ok(Some(version)),
        Some(Value::Number(version)) => Ok(Some(version.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a version string, found {other:?}"
        ))),
    }
}

/// Returns the raw application descriptor of the given template, if present.
#[must_use]
pub fn application_metadata_section(template: &TemplateDocument) -> Option<&Mapping> {
    template
        .get(METADATA)?
        .as_mapping()?
        .get(SERVERLESS_REPO_APPLICATION)?
        .as_mapping()
}

/// Parses the application descriptor of the given template.
///
/// # Errors
///
/// Will return `Err` if the template has no application descriptor or it contains values of
/// the wrong type.
pub fn parse_application_metadata(
    template: &TemplateDocument,
) -> Result<ApplicationMetadata, ApplicationError> {
    let section = application_metadata_section(template)
        .ok_or(ApplicationError::ApplicationMetadataNotFound)?;

    serde_yaml::from_value(Value::Mapping(section.clone()))
        .map_err(ApplicationError::InvalidMetadataValue)
}

/// Creates a new [`TemplateDocument`] with the application's `SemanticVersion` set to the
/// given version.
///
/// The metadata section and the application descriptor must already exist, this function never
/// creates them.
///
/// # Errors
///
/// Will return `Err` if the template has no application descriptor.
pub fn with_semantic_version(
    template: &TemplateDocument,
    semantic_version: &str,
) -> Result<TemplateDocument, ApplicationError> {
    let mut patched = template.clone();

    let section = patched
        .content_mut()
        .get_mut(METADATA)
        .and_then(Value::as_mapping_mut)
        .and_then(|metadata| metadata.get_mut(SERVERLESS_REPO_APPLICATION))
        .and_then(Value::as_mapping_mut)
        .ok_or(ApplicationError::ApplicationMetadataNotFound)?;

    section.insert(
        Value::from(SEMANTIC_VERSION),
        Value::from(semantic_version),
    );

    Ok(patched)
}

/// Creates a new [`TemplateDocument`] without the application descriptor.
///
/// The metadata section is removed entirely when the application descriptor was its only entry.
#[must_use]
pub fn strip_application_metadata(template: &TemplateDocument) -> TemplateDocument {
    let mut stripped = template.clone();
    let content = stripped.content_mut();

    let metadata_is_empty = match content.get_mut(METADATA).and_then(Value::as_mapping_mut) {
        Some(metadata) => {
            metadata.remove(SERVERLESS_REPO_APPLICATION);
            metadata.is_empty()
        }
        None => false,
    };

    if metadata_is_empty {
        content.remove(METADATA);
    }

    stripped
}

/// Collects the non-empty application properties of the given template as JSON, in template
/// order. When `properties` is `None`, every property is included.
///
/// # Errors
///
/// Will return `Err` if the template has no application descriptor or one of its values cannot
/// be represented as JSON.
pub fn application_metadata_details(
    template: &TemplateDocument,
    properties: Option<&[&str]>,
) -> Result<serde_json::Map<String, serde_json::Value>, ApplicationError> {
    let section = application_metadata_section(template)
        .ok_or(ApplicationError::ApplicationMetadataNotFound)?;

    section
        .iter()
        .filter_map(|(key, value)| key.as_str().map(|key| (key, value)))
        .filter(|(key, _)| properties.map_or(true, |properties| properties.contains(key)))
        .filter(|(_, value)| !is_empty_value(value))
        .map(|(key, value)| {
            serde_json::to_value(value)
                .map(|value| (key.to_string(), value))
                .map_err(ApplicationError::MetadataToJson)
        })
        .collect()
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(value) => value.is_empty(),
        Value::Sequence(value) => value.is_empty(),
        Value::Mapping(value) => value.is_empty(),
        _ => false,
    }
}
