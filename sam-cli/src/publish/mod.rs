use crate::cli::PublishArgs;
use crate::config::{load_publish_parameters, PublishParameters};
use crate::console::{Console, TerminalConsole};
use crate::exit_code;
use crate::logging::log_error;
use crate::publish::command::PublishRequest;
use crate::publish::format::PUBLISH_FAILED;
use serverlessrepo::aws::ServerlessRepoClient;
use std::path::{Path, PathBuf};
use termcolor::Color;

mod command;
mod error;
mod format;

const DEFAULT_TEMPLATE_FILE_NAME: &str = "template.yaml";
const ALTERNATIVE_TEMPLATE_FILE_NAME: &str = "template.yml";

/// Runs `sam publish` and returns the process exit code.
pub(crate) async fn run_publish_command(args: &PublishArgs) -> i32 {
    let mut console = TerminalConsole::stdout();

    // CLI flags override values from the config file.
    let parameters = match load_publish_parameters(
        args.config.config_file.as_deref(),
        &args.config.config_env,
    ) {
        Ok(parameters) => parameters.merge(PublishParameters {
            template: args.template.clone(),
            semantic_version: args.semantic_version.clone(),
            region: args.aws.region.clone(),
            profile: args.aws.profile.clone(),
        }),
        Err(error) => {
            console.secho(PUBLISH_FAILED, Some(Color::Red));
            log_error(error.to_string());
            return exit_code::USER_ERROR;
        }
    };

    log::debug!("Using publish parameters {parameters:?}");

    let request = PublishRequest {
        template_path: parameters
            .template
            .unwrap_or_else(|| default_template_path(Path::new("."))),
        semantic_version: parameters.semantic_version,
        region: parameters.region.clone(),
    };

    // Also resolves the console link region when none is configured.
    let client = ServerlessRepoClient::new(parameters.region, parameters.profile);

    match command::execute(&request, &client, &client, &mut console).await {
        Ok(()) => exit_code::SUCCESS,
        Err(error) => {
            log_error(error.to_string());
            error.exit_code()
        }
    }
}

fn default_template_path(dir: &Path) -> PathBuf {
    let template_path = dir.join(DEFAULT_TEMPLATE_FILE_NAME);
    let alternative_template_path = dir.join(ALTERNATIVE_TEMPLATE_FILE_NAME);

    if !template_path.exists() && alternative_template_path.exists() {
        alternative_template_path
    } else {
        template_path
    }
}
