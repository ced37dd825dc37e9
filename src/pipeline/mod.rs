//! Producer/worker pipeline feeding URLs through the match engine.
//!
//! # Data Flow
//! ```text
//! URL input stream (one URL per line)
//!     → producer task (strip terminator, clamp length)
//!     → BoundedWorkQueue (capacity 100, LIFO, closed at EOF)
//!     → N worker tasks
//!         → PauseGate (reload in progress?)
//!         → catalog snapshot → match engine
//!         → report line (single write, per-URL lines stay contiguous)
//! ```
//!
//! # Design Decisions
//! - With one worker (the default) the pipeline degenerates to a
//!   synchronous loop: no queue, no extra tasks, input order preserved
//! - Workers terminate when the queue is closed and drained; there is no
//!   cancellation path, every accepted item is matched exactly once
//! - A worker takes its catalog snapshot per item, after the pause gate:
//!   an item popped just before a reload may be matched against either
//!   generation (best-effort, documented)

pub mod queue;

use std::io::Write;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::catalog::SharedCatalog;
use crate::error::EngineError;
use crate::matcher::{match_url, render_report, MatchStrategy};
use crate::pipeline::queue::BoundedWorkQueue;
use crate::reload::PauseGate;

/// Maximum URL length in characters; longer input lines are clamped.
pub const MAX_URL_LEN: usize = 1024;

/// The matching pipeline. Generic over the output sink so tests can
/// capture the report stream.
pub struct Pipeline<W> {
    catalog: SharedCatalog,
    strategy: MatchStrategy,
    workers: usize,
    pause: PauseGate,
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> Pipeline<W> {
    pub fn new(
        catalog: SharedCatalog,
        strategy: MatchStrategy,
        workers: usize,
        pause: PauseGate,
        out: W,
    ) -> Self {
        Self {
            catalog,
            strategy,
            workers: workers.max(1),
            pause,
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Drain the input stream to completion.
    pub async fn run<R>(self, input: R) -> Result<(), EngineError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        if self.workers == 1 {
            self.run_synchronous(input).await
        } else {
            self.run_concurrent(input).await
        }
    }

    /// Single-worker mode: one synchronous loop, no queue, no extra tasks.
    async fn run_synchronous<R>(self, input: R) -> Result<(), EngineError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let mut pause = self.pause.clone();
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            pause.wait_until_resumed().await;
            process_url(
                &self.catalog,
                self.strategy,
                &self.out,
                &clamp_url(line),
            )?;
        }
        Ok(())
    }

    async fn run_concurrent<R>(self, input: R) -> Result<(), EngineError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let queue = BoundedWorkQueue::new();

        let producer = {
            let queue = queue.clone();
            tokio::spawn(async move {
                let mut lines = input.lines();
                let result: Result<(), EngineError> = loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => queue.push(clamp_url(line)).await,
                        Ok(None) => break Ok(()),
                        Err(e) => break Err(e.into()),
                    }
                };
                debug!("producer finished, closing queue");
                queue.close();
                result
            })
        };

        let mut workers = Vec::with_capacity(self.workers);
        for worker_num in 1..=self.workers {
            let queue = queue.clone();
            let catalog = self.catalog.clone();
            let out = Arc::clone(&self.out);
            let mut pause = self.pause.clone();
            let strategy = self.strategy;
            workers.push(tokio::spawn(async move {
                debug!(worker_num, "worker started");
                while let Some(url) = queue.pop().await {
                    // An item already removed is still matched after a
                    // pause, against whichever generation is current.
                    pause.wait_until_resumed().await;
                    if let Err(e) = process_url(&catalog, strategy, &out, &url) {
                        // Unblock the producer before aborting.
                        queue.close();
                        return Err(e);
                    }
                }
                debug!(worker_num, "worker exiting");
                Ok::<(), EngineError>(())
            }));
        }

        producer.await??;
        for worker in workers {
            worker.await??;
        }
        Ok(())
    }
}

/// Match one URL against the current catalog generation and emit its
/// report line, if any, as a single write.
fn process_url<W: Write>(
    catalog: &SharedCatalog,
    strategy: MatchStrategy,
    out: &Arc<Mutex<W>>,
    url: &str,
) -> Result<(), EngineError> {
    let snapshot = catalog.snapshot();
    let hits = match_url(&snapshot, url, strategy)?;
    if let Some(line) = render_report(url, &hits) {
        let mut out = out.lock().expect("output sink lock poisoned");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn clamp_url(line: String) -> String {
    if line.chars().count() > MAX_URL_LEN {
        debug!("input line exceeds {MAX_URL_LEN} characters, clamping");
        line.chars().take(MAX_URL_LEN).collect()
    } else {
        line
    }
}
