use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, info};

use crate::admin::AdminRoute;

/// Outcome of one admin API call, after any retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    pub timestamp: DateTime<Utc>,
    pub route: AdminRoute,
    pub success: bool,
    /// Response body on success, error detail on failure
    pub detail: String,
    pub attempts: u32,
}

impl AttemptResult {
    pub fn succeeded(
        route: AdminRoute,
        timestamp: DateTime<Utc>,
        body: String,
        attempts: u32,
    ) -> Self {
        Self {
            timestamp,
            route,
            success: true,
            detail: body,
            attempts,
        }
    }

    pub fn failed(
        route: AdminRoute,
        timestamp: DateTime<Utc>,
        detail: String,
        attempts: u32,
    ) -> Self {
        Self {
            timestamp,
            route,
            success: false,
            detail,
            attempts,
        }
    }

    /// `<route> response: <body>` or `<route> failed: <detail>`
    pub fn message(&self) -> String {
        if self.success {
            format!("{} response: {}", self.route, self.detail.trim())
        } else {
            format!("{} failed: {}", self.route, self.detail)
        }
    }

    pub fn log(&self, cycle: u64) {
        let at = self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);

        if self.success {
            info!(cycle, at = %at, attempts = self.attempts, "{}", self.message());
        } else {
            error!(cycle, at = %at, attempts = self.attempts, "{}", self.message());
        }
    }
}

/// Both results of one claim cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    pub claims: AttemptResult,
    pub summary: AttemptResult,
}
