use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lets at most one ingestion run proceed at a time.
#[derive(Debug, Default)]
pub struct RunGuard {
    is_running: Arc<AtomicBool>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while another run holds the guard.
    pub fn try_acquire(&self) -> Option<RunPermit> {
        self.is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunPermit {
                flag: self.is_running.clone(),
            })
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}

/// Releases the guard when dropped, including on panic or cancellation.
#[derive(Debug)]
pub struct RunPermit {
    flag: Arc<AtomicBool>,
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
