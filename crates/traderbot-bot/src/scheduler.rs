//! Periodic symbol scan.
//!
//! Fires on a fixed interval (first firing one full interval after start) and
//! runs the job once per configured symbol. The job is observation-only today;
//! it is the seam where a per-symbol pipeline trigger plugs in.

use crate::config::SchedulerConfig;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;
use traderbot_telemetry::Metrics;

/// Fixed-interval scheduler over a fixed symbol set.
pub struct Scheduler {
    interval: Duration,
    symbols: Vec<String>,
    shutdown: CancellationToken,
}

impl Scheduler {
    pub fn new(interval: Duration, symbols: Vec<String>, shutdown: CancellationToken) -> Self {
        Self {
            interval,
            symbols,
            shutdown,
        }
    }

    pub fn from_config(config: &SchedulerConfig, shutdown: CancellationToken) -> Self {
        Self::new(
            Duration::from_secs(config.interval_secs),
            config.symbols.clone(),
            shutdown,
        )
    }

    /// Run until the shutdown token is cancelled.
    pub async fn run<F, Fut>(self, job: F)
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = ()>,
    {
        info!(
            interval_secs = self.interval.as_secs(),
            symbols = ?self.symbols,
            "Scheduler started"
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => {
                    info!("Scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {
                    Metrics::scheduler_run();
                    for symbol in &self.symbols {
                        job(symbol.clone()).await;
                    }
                }
            }
        }
    }
}

/// Default job: log the symbol being checked.
pub async fn log_symbol_check(symbol: String) {
    info!(symbol = %symbol, "Cron: checking signals");
}
