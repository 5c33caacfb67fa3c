use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The serialization format a template was read from.
///
/// Templates are written back in the same format, so that overriding a single field does not
/// turn a JSON template into YAML.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    fn detect(contents: &str) -> Self {
        if contents
            .trim_start_matches('\u{feff}')
            .trim_start()
            .starts_with('{')
        {
            TemplateFormat::Json
        } else {
            TemplateFormat::Yaml
        }
    }
}

/// A parsed SAM template.
///
/// The top-level keys keep their order from the source file. CloudFormation short-form intrinsic
/// functions such as `!Ref` are kept as tagged values and survive a read/write cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    content: Mapping,
    format: TemplateFormat,
}

impl TemplateDocument {
    #[must_use]
    pub fn new(content: Mapping, format: TemplateFormat) -> Self {
        Self { content, format }
    }

    /// Parses a template from a YAML or JSON string.
    ///
    /// An empty document is treated as a template without any keys.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the string is not valid YAML/JSON or its top level is not a mapping.
    pub fn parse(contents: &str) -> Result<Self, TemplateError> {
        let format = TemplateFormat::detect(contents);

        match serde_yaml::from_str(contents).map_err(TemplateError::Parse)? {
            Value::Mapping(content) => Ok(Self::new(content, format)),
            Value::Null => Ok(Self::new(Mapping::new(), format)),
            _ => Err(TemplateError::NotAMapping),
        }
    }

    #[must_use]
    pub fn content(&self) -> &Mapping {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Mapping {
        &mut self.content
    }

    #[must_use]
    pub fn format(&self) -> TemplateFormat {
        self.format
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    /// Serializes the template as YAML, regardless of the format it was read from.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the template contains values that cannot be represented as YAML.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.content)
    }

    /// Serializes the template in the format it was originally read from.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the template contains values that cannot be represented in its format.
    pub fn to_source_string(&self) -> Result<String, TemplateError> {
        match self.format {
            TemplateFormat::Yaml => self.to_yaml_string().map_err(TemplateError::SerializeYaml),
            TemplateFormat::Json => serde_json::to_string_pretty(&self.content)
                .map(|json| json + "\n")
                .map_err(TemplateError::SerializeJson),
        }
    }
}

/// Reads and parses the template at the given path.
///
/// # Errors
///
/// Will return `Err` if the file does not exist, couldn't be read or couldn't be parsed.
pub fn read_template(path: impl AsRef<Path>) -> Result<TemplateDocument, TemplateError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => TemplateError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TemplateError::Read {
            path: path.to_path_buf(),
            source: error,
        },
    })?;

    TemplateDocument::parse(&contents)
}

/// Serializes the given template in its original format and writes it to the given path,
/// replacing any existing file.
///
/// # Errors
///
/// Will return `Err` if the template couldn't be serialized or the file couldn't be written.
pub fn write_template(
    template: &TemplateDocument,
    path: impl AsRef<Path>,
) -> Result<(), TemplateError> {
    let path = path.as_ref();

    fs::write(path, template.to_source_string()?).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// An error that occurred during reading or writing a template file.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("Template file not found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to read template file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse template: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("Template must be a mapping of top-level keys")]
    NotAMapping,
    #[error("Failed to serialize template as YAML: {0}")]
    SerializeYaml(#[source] serde_yaml::Error),
    #[error("Failed to serialize template as JSON: {0}")]
    SerializeJson(#[source] serde_json::Error),
    #[error("Failed to write template file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
