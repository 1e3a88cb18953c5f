// Periodic provider claim triggering
pub mod attempt;
pub mod scheduler;
pub mod sleeper;

pub use scheduler::{ClaimScheduleConfig, ClaimTriggerSupervisor, RetryPolicy};
pub use sleeper::TokioSleeper;
