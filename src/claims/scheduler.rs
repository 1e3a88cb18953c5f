// Claim trigger supervisor - keeps provider claims settling on a steady cadence
//
// Cycle:
// - Trigger claims (retried, fixed delay)
// - Wait for the resulting transactions to land
// - Fetch the contracts summary (single attempt)
// - Sleep for the configured interval
//
// Summary freshness matters less than claims, so only the claims call retries.

use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::admin::{AdminApi, AdminRoute, Endpoint};
use crate::claims::attempt::{AttemptResult, CycleReport};
use crate::claims::sleeper::Sleeper;

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

/// Claim schedule configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimScheduleConfig {
    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,
    pub probe_timeout: Duration,
    pub probe_retry: RetryPolicy,
    pub claims_timeout: Duration,
    pub claims_retry: RetryPolicy,
    /// Pause after triggering claims so settlement txs get included
    pub settle_delay: Duration,
    pub summary_timeout: Duration,
}

impl Default for ClaimScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(5),
            probe_retry: RetryPolicy {
                max_attempts: 20,
                delay: Duration::from_secs(3),
            },
            claims_timeout: Duration::from_secs(60),
            claims_retry: RetryPolicy {
                max_attempts: 3,
                delay: Duration::from_secs(3),
            },
            settle_delay: Duration::from_secs(10),
            summary_timeout: Duration::from_secs(60),
        }
    }
}

/// Process-wide supervisor state. Never persisted.
#[derive(Debug, Clone)]
pub struct SupervisorState {
    pub interval: Duration,
    pub endpoint: Endpoint,
    /// Set once any readiness probe succeeds. Informational only.
    pub ready: bool,
    pub cycles: u64,
}

/// Claim trigger supervisor - one strictly sequential loop
pub struct ClaimTriggerSupervisor<A, S> {
    config: ClaimScheduleConfig,
    api: A,
    sleeper: S,
    state: SupervisorState,
}

impl<A: AdminApi, S: Sleeper> ClaimTriggerSupervisor<A, S> {
    pub fn new(config: ClaimScheduleConfig, api: A, sleeper: S) -> Self {
        let state = SupervisorState {
            interval: config.interval,
            endpoint: api.endpoint().clone(),
            ready: false,
            cycles: 0,
        };

        Self {
            config,
            api,
            sleeper,
            state,
        }
    }

    pub fn state(&self) -> &SupervisorState {
        &self.state
    }

    /// Run forever: readiness wait, then claim cycles separated by the interval
    pub async fn run(&mut self) {
        info!(
            endpoint = %self.state.endpoint.base_url(),
            interval_secs = self.state.interval.as_secs(),
            "⏰ Claim trigger supervisor started"
        );

        self.wait_until_ready().await;
        info!(ready = self.state().ready, "Entering claim loop");

        loop {
            self.run_cycle().await;

            debug!(
                interval_secs = self.state.interval.as_secs(),
                "Sleeping until next claim cycle"
            );
            self.sleeper.sleep(self.state.interval).await;
        }
    }

    /// Readiness wait followed by a single cycle, without the trailing interval sleep
    pub async fn run_once(&mut self) -> CycleReport {
        self.wait_until_ready().await;
        self.run_cycle().await
    }

    /// Probe the version endpoint until it answers or the attempt bound is hit.
    ///
    /// Exhausting the bound is not fatal; the main loop retries on its own.
    pub async fn wait_until_ready(&mut self) -> bool {
        let policy = self.config.probe_retry;

        for attempt in 1..=policy.max_attempts {
            match self.api.version(self.config.probe_timeout).await {
                Ok(version) => {
                    self.state.ready = true;
                    info!(
                        attempt,
                        version = %version.trim(),
                        "✅ Admin API is reachable"
                    );
                    return true;
                }
                Err(e) => {
                    debug!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %e.detail(),
                        "Admin API not ready yet"
                    );
                }
            }

            if attempt < policy.max_attempts {
                self.sleeper.sleep(policy.delay).await;
            }
        }

        warn!(
            attempts = policy.max_attempts,
            "⚠️ Admin API did not become ready, starting claim loop anyway"
        );
        false
    }

    /// Steps 1-4 of a cycle: claims, settle delay, summary
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.state.cycles += 1;
        let cycle = self.state.cycles;
        info!(cycle, "🔄 Starting claim cycle");

        let claims = self.trigger_claims().await;
        claims.log(cycle);

        // Runs whether or not the claims call went through
        self.sleeper.sleep(self.config.settle_delay).await;

        let summary = self.fetch_contracts_summary().await;
        summary.log(cycle);

        CycleReport {
            cycle,
            claims,
            summary,
        }
    }

    /// POST provider-claims with the fixed-delay retry policy
    pub async fn trigger_claims(&self) -> AttemptResult {
        let timestamp = Utc::now();
        let policy = self.config.claims_retry;
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.api.trigger_claims(self.config.claims_timeout).await {
                Ok(body) => {
                    return AttemptResult::succeeded(
                        AdminRoute::ProviderClaims,
                        timestamp,
                        body,
                        attempt,
                    );
                }
                Err(e) if attempt >= max_attempts => {
                    return AttemptResult::failed(
                        AdminRoute::ProviderClaims,
                        timestamp,
                        format!("claim trigger failed after {} attempts: {}", attempt, e.detail()),
                        attempt,
                    );
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e.detail(),
                        "Claim trigger attempt failed, retrying in {}s",
                        policy.delay.as_secs()
                    );
                    self.sleeper.sleep(policy.delay).await;
                }
            }
        }
    }

    /// POST provider-contracts-summary exactly once
    pub async fn fetch_contracts_summary(&self) -> AttemptResult {
        let timestamp = Utc::now();

        match self.api.contracts_summary(self.config.summary_timeout).await {
            Ok(body) => AttemptResult::succeeded(AdminRoute::ContractsSummary, timestamp, body, 1),
            Err(e) => AttemptResult::failed(AdminRoute::ContractsSummary, timestamp, e.detail(), 1),
        }
    }
}
