use crate::ShutdownGuard;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Fans a single shutdown signal out to the HTTP server and the gateway's
/// maintenance tasks.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    signal: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (signal, _) = broadcast::channel(1);
        Self {
            signal,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.signal.subscribe(), Arc::clone(&self.triggered))
    }

    pub fn is_shutting_down(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Idempotent; only the first call notifies subscribers.
    pub fn shutdown(&self) {
        if self.triggered.swap(true, Ordering::AcqRel) {
            return;
        }
        log::info!("Shutdown requested, stopping listener and maintenance tasks");
        let _ = self.signal.send(());
    }

    /// Runs `tick` every `period` until shutdown. The first tick fires one
    /// full period after spawning; a tick in progress when shutdown arrives
    /// is abandoned.
    pub fn spawn_periodic<F, Fut>(
        &self,
        task: &'static str,
        period: Duration,
        mut tick: F,
    ) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut guard = self.subscribe_guard();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = guard.wait() => break,
                }
                tokio::select! {
                    _ = tick() => {}
                    _ = guard.wait() => break,
                }
            }
            log::debug!("Maintenance task '{task}' stopped");
        })
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
