use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Resolves once shutdown has been requested, even when the request came
/// before this guard was created, or when every coordinator is gone.
pub struct ShutdownGuard {
    signal: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownGuard {
    pub(crate) fn new(signal: broadcast::Receiver<()>, triggered: Arc<AtomicBool>) -> Self {
        Self { signal, triggered }
    }

    pub async fn wait(&mut self) {
        if self.triggered.load(Ordering::Acquire) {
            return;
        }
        let _ = self.signal.recv().await;
    }
}
