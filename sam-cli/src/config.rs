use serde::Deserialize;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub(crate) const DEFAULT_CONFIG_FILE_NAME: &str = "samconfig.toml";

const GLOBAL_SECTION: &str = "global";
const PUBLISH_SECTION: &str = "publish";
const PARAMETERS_TABLE: &str = "parameters";

/// Default parameter values of the publish command, read from `samconfig.toml`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub(crate) struct PublishParameters {
    pub(crate) template: Option<PathBuf>,
    pub(crate) semantic_version: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) profile: Option<String>,
}

impl PublishParameters {
    /// Values from `overrides` take precedence over the values of `self`.
    #[must_use]
    pub(crate) fn merge(self, overrides: PublishParameters) -> PublishParameters {
        PublishParameters {
            template: overrides.template.or(self.template),
            semantic_version: overrides.semantic_version.or(self.semantic_version),
            region: overrides.region.or(self.region),
            profile: overrides.profile.or(self.profile),
        }
    }
}

/// Loads the publish parameters of the given environment.
///
/// Without an explicit `config_file`, `samconfig.toml` in the current directory is used if it
/// exists.
pub(crate) fn load_publish_parameters(
    config_file: Option<&Path>,
    config_env: &str,
) -> Result<PublishParameters, ConfigError> {
    match config_file {
        Some(path) => read_publish_parameters(path, config_env),
        None if Path::new(DEFAULT_CONFIG_FILE_NAME).exists() => {
            read_publish_parameters(DEFAULT_CONFIG_FILE_NAME, config_env)
        }
        None => Ok(PublishParameters::default()),
    }
}

/// Reads the `[<env>.global.parameters]` and `[<env>.publish.parameters]` tables of the given
/// config file, the latter taking precedence.
pub(crate) fn read_publish_parameters(
    path: impl AsRef<Path>,
    config_env: &str,
) -> Result<PublishParameters, ConfigError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let table: Table = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(environment) = table.get(config_env).and_then(Value::as_table) else {
        log::debug!(
            "Environment '{config_env}' not found in {}, using no default parameters",
            path.display()
        );
        return Ok(PublishParameters::default());
    };

    let parameters = |section: &str| {
        environment
            .get(section)
            .and_then(Value::as_table)
            .and_then(|section| section.get(PARAMETERS_TABLE))
            .cloned()
            .map_or(Ok(PublishParameters::default()), |parameters| parameters.try_into())
            .map_err(|source| ConfigError::InvalidParameters {
                path: path.to_path_buf(),
                section: format!("{config_env}.{section}.{PARAMETERS_TABLE}"),
                source,
            })
    };

    Ok(parameters(GLOBAL_SECTION)?.merge(parameters(PUBLISH_SECTION)?))
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid parameters in [{section}] of config file {}: {source}", .path.display())]
    InvalidParameters {
        path: PathBuf,
        section: String,
        source: toml::de::Error,
    },
}
