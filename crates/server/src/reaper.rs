use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use savory_core::config::SessionConfig;
use savory_fulfillment::CartStore;

/// Spawns the idle-session sweep when eviction is enabled. With
/// `idle_timeout_secs = 0` no task is spawned and abandoned carts live for
/// the process lifetime.
pub fn spawn(store: Arc<CartStore>, session: &SessionConfig) -> Option<JoinHandle<()>> {
    if session.idle_timeout_secs == 0 {
        return None;
    }

    let max_idle = Duration::from_secs(session.idle_timeout_secs);
    let sweep_every = Duration::from_secs(session.sweep_interval_secs);

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        // the first tick completes immediately; skip it
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(max_idle);
            if !evicted.is_empty() {
                info!(
                    event_name = "session.reaper.evicted",
                    count = evicted.len(),
                    "idle order sessions evicted"
                );
            }
        }
    }))
}
