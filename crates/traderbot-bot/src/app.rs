//! Main application orchestration.
//!
//! Builds the pipeline from configuration, spawns the scheduler and serves
//! the HTTP surface until Ctrl-C.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::pipeline::TradePipeline;
use crate::scheduler::{log_symbol_check, Scheduler};
use crate::server::run_server;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use traderbot_signal::SignalEngine;

/// Main application.
pub struct Application {
    config: AppConfig,
    pipeline: Arc<TradePipeline>,
    shutdown: CancellationToken,
}

impl Application {
    /// Create a new application with an OS-seeded signal engine.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Self::with_engine(config, SignalEngine::default())
    }

    pub fn with_engine(config: AppConfig, engine: SignalEngine) -> AppResult<Self> {
        let pipeline = Arc::new(TradePipeline::from_config(&config, engine)?);
        Ok(Self {
            config,
            pipeline,
            shutdown: CancellationToken::new(),
        })
    }

    /// Token that stops the scheduler and the server when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run until Ctrl-C or the shutdown token is cancelled.
    pub async fn run(self) -> AppResult<()> {
        if self.config.scheduler.enabled {
            let scheduler = Scheduler::from_config(&self.config.scheduler, self.shutdown.clone());
            tokio::spawn(scheduler.run(log_symbol_check));
        } else {
            info!("Scheduler disabled");
        }

        let signal_token = self.shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!(?e, "Failed to listen for shutdown signal"),
            }
            signal_token.cancel();
        });

        let result = run_server(
            self.pipeline.clone(),
            self.config.server.clone(),
            self.shutdown.clone(),
        )
        .await;

        self.shutdown.cancel();
        info!("Shutting down");
        result
    }
}
