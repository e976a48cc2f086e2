use std::time::Instant;

use tokio::time::sleep;
use tracing::info;

use crate::web::AppState;

/// Periodically drops site sessions that have been idle past the configured limit.
pub fn spawn(state: AppState) {
    tokio::spawn(async move {
        let interval = state.config().sweep_interval;
        loop {
            sleep(interval).await;
            run_sweep_cycle(&state).await;
        }
    });
}

async fn run_sweep_cycle(state: &AppState) -> usize {
    let removed = state
        .sessions()
        .sweep_idle(Instant::now(), state.config().session_idle)
        .await;

    if removed > 0 {
        let remaining = state.sessions().len().await;
        info!(removed, remaining, "idle site sessions dropped");
    }

    removed
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SiteConfig;

    #[tokio::test]
    async fn sweep_cycle_keeps_recent_sessions() {
        let config = SiteConfig {
            session_idle: Duration::from_secs(60),
            ..SiteConfig::default()
        };
        let state = AppState::new(config).unwrap();
        state.sessions().create().await;

        assert_eq!(run_sweep_cycle(&state).await, 0);
        assert_eq!(state.sessions().len().await, 1);
    }

    #[tokio::test]
    async fn zero_idle_limit_drops_untouched_sessions() {
        let config = SiteConfig {
            session_idle: Duration::ZERO,
            ..SiteConfig::default()
        };
        let state = AppState::new(config).unwrap();
        state.sessions().create().await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(run_sweep_cycle(&state).await, 1);
        assert_eq!(state.sessions().len().await, 0);
    }
}
