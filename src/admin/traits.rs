use async_trait::async_trait;
use std::time::Duration;

use crate::admin::endpoint::{AdminRoute, Endpoint};
use crate::error::AppResult;

/// Boundary to the provider admin API.
///
/// Implementations return the raw response body on any 2xx status. The body
/// is opaque to the caller and only ever logged.
#[async_trait]
pub trait AdminApi: Send + Sync {
    fn endpoint(&self) -> &Endpoint;

    async fn call(&self, route: AdminRoute, timeout: Duration) -> AppResult<String>;

    async fn version(&self, timeout: Duration) -> AppResult<String> {
        self.call(AdminRoute::Version, timeout).await
    }

    async fn trigger_claims(&self, timeout: Duration) -> AppResult<String> {
        self.call(AdminRoute::ProviderClaims, timeout).await
    }

    async fn contracts_summary(&self, timeout: Duration) -> AppResult<String> {
        self.call(AdminRoute::ContractsSummary, timeout).await
    }
}
