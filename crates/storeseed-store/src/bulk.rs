use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling a store that a bulk insert is in progress.
///
/// Backends read it when a transaction starts and may trade durability for
/// insert throughput while it is set.
#[derive(Debug, Clone, Default)]
pub struct BulkMode {
    enabled: Arc<AtomicBool>,
}

impl BulkMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

/// Enables bulk mode for its lifetime and restores it on drop.
#[derive(Debug)]
pub struct BulkInsertGuard {
    mode: BulkMode,
    previous: bool,
}

impl BulkInsertGuard {
    pub fn enable(mode: &BulkMode) -> Self {
        let previous = mode.is_enabled();
        mode.set(true);
        tracing::debug!(previous, "bulk insert mode enabled");
        Self {
            mode: mode.clone(),
            previous,
        }
    }
}

impl Drop for BulkInsertGuard {
    fn drop(&mut self) {
        self.mode.set(self.previous);
        tracing::debug!(restored = self.previous, "bulk insert mode restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_flag_on_drop() {
        let mode = BulkMode::new();
        {
            let _guard = BulkInsertGuard::enable(&mode);
            assert!(mode.is_enabled());
        }
        assert!(!mode.is_enabled());
    }

    #[test]
    fn nested_guards_restore_outer_state() {
        let mode = BulkMode::new();
        let outer = BulkInsertGuard::enable(&mode);
        {
            let _inner = BulkInsertGuard::enable(&mode);
        }
        assert!(mode.is_enabled());
        drop(outer);
        assert!(!mode.is_enabled());
    }

    #[test]
    fn guard_restores_flag_when_unwinding() {
        let mode = BulkMode::new();
        let inner = mode.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = BulkInsertGuard::enable(&inner);
            panic!("generator failed");
        });
        assert!(result.is_err());
        assert!(!mode.is_enabled());
    }
}
