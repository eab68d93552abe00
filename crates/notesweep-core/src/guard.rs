//! Host application guard: best-effort check that the note application is
//! not running before its data directory is mutated. Advisory only, not a
//! lock.

use sysinfo::System;

/// Capability for detecting a live host application
pub trait ProcessGuard {
    /// True when the host application appears to be running
    fn is_host_active(&self) -> bool;
}

/// Process-table lookup via sysinfo
pub struct SysinfoGuard {
    process_name: String,
}

impl SysinfoGuard {
    pub fn new(process_name: &str) -> Self {
        Self {
            process_name: process_name.to_lowercase(),
        }
    }
}

impl ProcessGuard for SysinfoGuard {
    fn is_host_active(&self) -> bool {
        let sys = System::new_all();
        sys.processes().values().any(|process| {
            process
                .name()
                .to_string_lossy()
                .to_lowercase()
                .contains(&self.process_name)
        })
    }
}

/// Fallback for platforms without process enumeration: assume not running
pub struct NoopGuard;

impl ProcessGuard for NoopGuard {
    fn is_host_active(&self) -> bool {
        false
    }
}

/// Select the guard implementation for the current platform once at startup
pub fn detect(process_name: &str) -> Box<dyn ProcessGuard> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Box::new(SysinfoGuard::new(process_name))
    } else {
        tracing::debug!("process enumeration unsupported here, assuming host is not running");
        Box::new(NoopGuard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_guard_assumes_not_running() {
        assert!(!NoopGuard.is_host_active());
    }

    #[test]
    fn absent_process_is_not_active() {
        let guard = SysinfoGuard::new("notesweep-no-such-process-a1b2c3");
        assert!(!guard.is_host_active());
    }
}
