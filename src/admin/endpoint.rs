use std::fmt;

/// Routes of the provider admin API this daemon talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRoute {
    /// Liveness probe
    Version,
    /// Triggers provider claim settlement
    ProviderClaims,
    /// Read-style contracts report
    ContractsSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

impl AdminRoute {
    pub fn name(&self) -> &'static str {
        match self {
            AdminRoute::Version => "version",
            AdminRoute::ProviderClaims => "provider-claims",
            AdminRoute::ContractsSummary => "provider-contracts-summary",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AdminRoute::Version => "/api/version",
            AdminRoute::ProviderClaims => "/api/provider-claims",
            AdminRoute::ContractsSummary => "/api/provider-contracts-summary",
        }
    }

    pub fn method(&self) -> RouteMethod {
        match self {
            AdminRoute::Version => RouteMethod::Get,
            AdminRoute::ProviderClaims | AdminRoute::ContractsSummary => RouteMethod::Post,
        }
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Base URL of the admin API. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Admin API bound on the loopback interface
    pub fn local(port: u16) -> Self {
        Self::new(format!("http://127.0.0.1:{}", port))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, route: AdminRoute) -> String {
        format!("{}{}", self.base_url, route.path())
    }
}
