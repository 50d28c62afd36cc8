// Background loops: stress growth and boss-alert decay

use crate::state::ServerState;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Fixed period of the stress-growth loop. Deliberately not configurable,
/// unlike the alert-decay cooldown.
pub const STRESS_GROWTH_PERIOD: Duration = Duration::from_secs(60);

/// Spawns the two periodic mutation tasks and carries their stop signal.
///
/// Both loops are daemon-style: `stop` requests shutdown and moves on, the
/// tasks exit at their next wake and are never joined.
pub struct BackgroundTicker {
    token: CancellationToken,
}

impl BackgroundTicker {
    /// Start both loops against the given state.
    pub fn start(state: Arc<ServerState>) -> Self {
        let token = CancellationToken::new();

        tracing::info!("starting background state loops");

        let growth_state = state.clone();
        let growth_token = token.clone();
        tokio::spawn(async move {
            run_periodic(growth_token, STRESS_GROWTH_PERIOD, move || {
                growth_state.tick_stress_growth();
            })
            .await;
            tracing::debug!("stress growth loop exited");
        });

        let decay_period = state.alert_cooldown();
        let decay_token = token.clone();
        tokio::spawn(async move {
            run_periodic(decay_token, decay_period, move || {
                state.tick_alert_decay();
            })
            .await;
            tracing::debug!("alert decay loop exited");
        });

        Self { token }
    }

    /// Request shutdown. Loops observe the token at their next wake;
    /// nothing is joined or interrupted mid-sleep.
    pub fn stop(&self) {
        tracing::info!("shutdown requested, background loops will exit at next wake");
        self.token.cancel();
    }
}

/// Sleep `period`, then tick — unless a stop was requested during the
/// sleep. The token is re-checked after waking so a stop that lands
/// mid-sleep never produces one more mutation.
async fn run_periodic(token: CancellationToken, period: Duration, tick: impl Fn()) {
    loop {
        if token.is_cancelled() {
            break;
        }
        tokio::time::sleep(period).await;
        if token.is_cancelled() {
            break;
        }
        tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChillConfig;
    use crate::random::ScriptedRandomSource;

    fn paused_state(cooldown_secs: i64) -> Arc<ServerState> {
        let config = ChillConfig::new(100, cooldown_secs).unwrap();
        Arc::new(ServerState::with_random_source(
            config,
            Box::new(ScriptedRandomSource::new(vec![1; 16], vec![0.0; 16])),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_stress_grows_once_per_minute() {
        let state = paused_state(3600);
        let ticker = BackgroundTicker::start(state.clone());

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(state.metrics().stress, 51);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(state.metrics().stress, 53);

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_decays_on_cooldown_interval() {
        let state = paused_state(30);
        // Raise the alert twice before starting the loops.
        state.apply_break();
        state.apply_break();
        assert_eq!(state.metrics().alert, 2);

        let ticker = BackgroundTicker::start(state.clone());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(state.metrics().alert, 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.metrics().alert, 0);

        // Decay is a no-op at the floor.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(state.metrics().alert, 0);

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_sleep_suppresses_final_tick() {
        let state = paused_state(3600);
        let ticker = BackgroundTicker::start(state.clone());

        // Stop lands mid-sleep; the loop must re-check after waking and
        // exit without one more mutation.
        tokio::time::sleep(Duration::from_secs(30)).await;
        ticker.stop();
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(state.metrics().stress, 50);
    }
}
