// Break invocation handler: state mutation plus the penalty delay

use crate::state::ServerState;
use std::sync::Arc;
use std::time::Duration;

/// Suspension applied to a response when the boss was already at maximum
/// alert before the break. The sole penalty mechanism in the system.
pub const PENALTY_DELAY: Duration = Duration::from_secs(20);

/// What a tool needs to format its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakReport {
    pub stress: u8,
    pub alert: u8,
    pub delay_applied: bool,
}

/// Request-side entry point shared by every break tool.
pub struct BreakHandler {
    state: Arc<ServerState>,
}

impl BreakHandler {
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }

    /// Record one break and, if the boss was already at maximum alert,
    /// suspend for the penalty duration before returning. The sleep happens
    /// after the lock is released; the penalty delays the response, not the
    /// state change.
    pub async fn record_break(&self) -> BreakReport {
        let outcome = self.state.apply_break();

        if outcome.delay_required {
            tracing::warn!(
                delay_secs = PENALTY_DELAY.as_secs(),
                "boss alert at maximum, delaying response"
            );
            tokio::time::sleep(PENALTY_DELAY).await;
        }

        BreakReport {
            stress: outcome.stress,
            alert: outcome.alert,
            delay_applied: outcome.delay_required,
        }
    }
}
