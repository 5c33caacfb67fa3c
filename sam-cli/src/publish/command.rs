use crate::console::Console;
use crate::publish::error::Error;
use crate::publish::format::{console_link, publish_message, PUBLISH_FAILED, PUBLISH_SUCCEEDED};
use crate::region::RegionResolver;
use serverlessrepo::metadata::with_semantic_version;
use serverlessrepo::repository::ApplicationRepository;
use serverlessrepo::{publish_application, read_template, write_template, PublishResult};
use std::path::PathBuf;
use termcolor::Color;

type Result<T> = std::result::Result<T, Error>;

// Used for the console link when neither the command nor the environment configures a region.
const FALLBACK_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct PublishRequest {
    pub(crate) template_path: PathBuf,
    pub(crate) semantic_version: Option<String>,
    pub(crate) region: Option<String>,
}

/// Publishes the template and reports the outcome to the console.
///
/// `Publish Failed` is emitted once before any error is returned.
pub(crate) async fn execute<R>(
    request: &PublishRequest,
    repository: &R,
    region_resolver: &dyn RegionResolver,
    console: &mut dyn Console,
) -> Result<()>
where
    R: ApplicationRepository + ?Sized,
{
    match publish(request, repository).await {
        Ok(result) => {
            let region = match &request.region {
                Some(region) => region.clone(),
                None => resolve_region(region_resolver).await,
            };

            console.secho(PUBLISH_SUCCEEDED, Some(Color::Green));
            console.secho(&publish_message(&result), None);
            console.secho(
                &console_link(&region, &result.application_id),
                Some(Color::Yellow),
            );

            Ok(())
        }
        Err(error) => {
            console.secho(PUBLISH_FAILED, Some(Color::Red));
            Err(error)
        }
    }
}

async fn publish<R>(request: &PublishRequest, repository: &R) -> Result<PublishResult>
where
    R: ApplicationRepository + ?Sized,
{
    let mut template = read_template(&request.template_path).map_err(Error::ReadTemplate)?;

    // An empty version is treated like no version.
    if let Some(semantic_version) = request
        .semantic_version
        .as_deref()
        .filter(|semantic_version| !semantic_version.is_empty())
    {
        template = with_semantic_version(&template, semantic_version)
            .map_err(Error::OverrideSemanticVersion)?;

        write_template(&template, &request.template_path).map_err(Error::WriteTemplate)?;
        log::debug!(
            "Wrote SemanticVersion {semantic_version} to {}",
            request.template_path.display()
        );
    }

    let result = publish_application(repository, &template).await?;
    log::debug!(
        "Published application {} ({})",
        result.application_id,
        result
            .actions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(result)
}

async fn resolve_region(region_resolver: &dyn RegionResolver) -> String {
    if let Some(region) = region_resolver.resolve_region().await {
        region
    } else {
        log::warn!("Unable to determine the AWS region, using {FALLBACK_REGION} for the console link");
        String::from(FALLBACK_REGION)
    }
}
