//! Live reload of the pattern catalog.
//!
//! # Data Flow
//! ```text
//! SIGUSR1
//!     → tokio signal stream (nothing runs in signal context)
//!     → ReloadCoordinator task:
//!         pause flag set (watch channel)
//!         → grace period (advisory, lets in-flight matches finish)
//!         → config reloaded on a blocking task
//!         → new PatternCatalog published via atomic swap
//!         pause flag cleared (blocked workers woken once)
//! ```
//!
//! # Design Decisions
//! - Reloads are serialized by the signal loop; only one runs at a time
//! - A failed reload keeps the current catalog generation and logs the
//!   error; the engine never runs without a complete catalog
//! - Workers wait on the watch channel while paused, not a poll loop

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::catalog::{PatternCatalog, SharedCatalog};
use crate::config::load_config;
use crate::error::EngineError;

/// Grace period between pausing the workers and rebuilding the catalog.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Worker-side view of the pause flag.
#[derive(Clone)]
pub struct PauseGate {
    rx: watch::Receiver<bool>,
}

impl PauseGate {
    /// A gate with no coordinator attached: never paused.
    pub fn open() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Wait until no reload is in progress. Returns immediately when not
    /// paused; otherwise suspends until the coordinator clears the flag.
    pub async fn wait_until_resumed(&mut self) {
        while *self.rx.borrow() {
            // Sender gone means no coordinator is running: never paused.
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Pause-reload-resume protocol, driven by an external signal.
pub struct ReloadCoordinator {
    catalog: SharedCatalog,
    config_path: PathBuf,
    pause_tx: watch::Sender<bool>,
    grace_period: Duration,
}

impl ReloadCoordinator {
    pub fn new(catalog: SharedCatalog, config_path: PathBuf) -> (Self, PauseGate) {
        let (pause_tx, pause_rx) = watch::channel(false);
        (
            Self {
                catalog,
                config_path,
                pause_tx,
                grace_period: DEFAULT_GRACE_PERIOD,
            },
            PauseGate { rx: pause_rx },
        )
    }

    /// Override the grace period (tests use a short one).
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Run one complete pause-reload-resume cycle.
    ///
    /// Workers are resumed whether or not the reload succeeded; on failure
    /// the previous catalog generation stays live.
    pub async fn reload_once(&self) -> Result<(), EngineError> {
        info!("reload requested, pausing workers");
        let _ = self.pause_tx.send(true);

        tokio::time::sleep(self.grace_period).await;

        let result = self.rebuild_catalog().await;
        if let Err(e) = &result {
            error!(error = %e, "reload failed, keeping current catalog generation");
        }

        let _ = self.pause_tx.send(false);
        info!("workers resumed");
        result
    }

    async fn rebuild_catalog(&self) -> Result<(), EngineError> {
        let path = self.config_path.clone();
        let config = tokio::task::spawn_blocking(move || load_config(&path)).await??;

        let catalog = PatternCatalog::from_config(&config);
        debug!(sets = catalog.len(), "publishing new catalog generation");
        catalog.trace_contents();
        self.catalog.replace(catalog);
        Ok(())
    }

    /// Listen for SIGUSR1 and run the reload protocol on each delivery.
    /// Signals arriving during a reload queue behind it; reloads never
    /// overlap.
    #[cfg(unix)]
    pub async fn run(self) {
        use tokio::signal::unix::{signal, SignalKind};

        let mut reload_signal = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "could not install SIGUSR1 handler, live reload disabled");
                return;
            }
        };

        while reload_signal.recv().await.is_some() {
            let _ = self.reload_once().await;
        }
    }
}
