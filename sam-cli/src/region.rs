use async_trait::async_trait;
use serverlessrepo::aws::ServerlessRepoClient;

/// Resolves the AWS region when none was configured explicitly.
#[async_trait]
pub(crate) trait RegionResolver: Send + Sync {
    async fn resolve_region(&self) -> Option<String>;
}

// The region the client resolved from the environment, the shared config file of the selected
// profile, or the instance metadata service.
#[async_trait]
impl RegionResolver for ServerlessRepoClient {
    async fn resolve_region(&self) -> Option<String> {
        self.region().await
    }
}
