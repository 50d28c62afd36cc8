// Shared server state: the two bounded counters behind one lock

use crate::config::ChillConfig;
use crate::random::{RandomSource, StdRandomSource};
use std::sync::Mutex;
use std::time::Duration;

pub const STRESS_MAX: u8 = 100;
pub const ALERT_MIN: u8 = 0;
pub const ALERT_MAX: u8 = 5;

const INITIAL_STRESS: u8 = 50;

/// Result of one `apply_break` call: the post-mutation metrics plus whether
/// the caller owes the 20-second penalty (decided from the pre-mutation
/// alert level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakOutcome {
    pub stress: u8,
    pub alert: u8,
    pub delay_required: bool,
}

/// Current metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub stress: u8,
    pub alert: u8,
}

struct Inner {
    stress_level: u8,
    alert_level: u8,
    rng: Box<dyn RandomSource>,
}

/// Process-wide break-server state.
///
/// The mutable counters (and the RNG feeding them) live behind a single
/// `Mutex`; every operation runs to completion under the lock, and the lock
/// is never held across an await point. Shared via `Arc` between the MCP
/// request path and both background ticker loops.
pub struct ServerState {
    inner: Mutex<Inner>,
    alert_probability: f64,
    alert_cooldown: Duration,
}

impl ServerState {
    pub fn new(config: ChillConfig) -> Self {
        Self::with_random_source(config, Box::new(StdRandomSource::new()))
    }

    pub fn with_random_source(config: ChillConfig, rng: Box<dyn RandomSource>) -> Self {
        tracing::info!(
            alert_probability = config.alert_probability,
            alert_cooldown_secs = config.alert_cooldown.as_secs(),
            "server state initialized"
        );
        Self {
            inner: Mutex::new(Inner {
                stress_level: INITIAL_STRESS,
                alert_level: ALERT_MIN,
                rng,
            }),
            alert_probability: config.alert_probability,
            alert_cooldown: config.alert_cooldown,
        }
    }

    /// Record one break: snapshot whether the alert level was already at
    /// maximum (that decides the penalty), then apply a random stress
    /// reduction in 1..=100 and a probabilistic alert increment.
    pub fn apply_break(&self) -> BreakOutcome {
        let mut inner = self.inner.lock().unwrap();

        // Penalty is decided before this call's own mutation: being at
        // maximum alert when the break starts is what triggers it.
        let delay_required = inner.alert_level == ALERT_MAX;

        let reduction = inner.rng.stress_reduction();
        inner.stress_level = inner.stress_level.saturating_sub(reduction);

        if inner.rng.alert_draw() < self.alert_probability {
            inner.alert_level = (inner.alert_level + 1).min(ALERT_MAX);
            tracing::debug!(alert = inner.alert_level, "boss alert raised");
        }

        BreakOutcome {
            stress: inner.stress_level,
            alert: inner.alert_level,
            delay_required,
        }
    }

    /// Background stress growth: +1 unless already at the ceiling.
    pub fn tick_stress_growth(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.stress_level < STRESS_MAX {
            inner.stress_level += 1;
            tracing::debug!(stress = inner.stress_level, "stress grew");
        }
    }

    /// Background alert decay: -1 unless already at the floor.
    pub fn tick_alert_decay(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.alert_level > ALERT_MIN {
            inner.alert_level -= 1;
            tracing::debug!(alert = inner.alert_level, "boss alert cooled down");
        }
    }

    /// Snapshot of the current metrics.
    pub fn metrics(&self) -> Metrics {
        let inner = self.inner.lock().unwrap();
        Metrics {
            stress: inner.stress_level,
            alert: inner.alert_level,
        }
    }

    pub fn alert_cooldown(&self) -> Duration {
        self.alert_cooldown
    }
}
