//! Ctrl-C routing
//!
//! The signal handler is process-wide once installed, so one listener lives
//! for the whole command. During a run it cancels that run's token; between
//! runs it exits the process as an unhandled interrupt would.

use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Exit status of a process stopped by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Routes Ctrl-C to the run in progress, if any
#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    current: Arc<Mutex<Option<CancellationToken>>>,
}

/// Keeps a run's token armed until dropped
pub struct ArmedRun<'a> {
    interrupts: &'a Interrupts,
}

impl Interrupts {
    /// Install the listener; call once per process
    pub fn install() -> Self {
        let interrupts = Self::default();
        let listener = interrupts.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if !listener.interrupt() {
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        });
        interrupts
    }

    /// Route interrupts to `token` while the returned guard is alive
    #[must_use]
    pub fn arm(&self, token: CancellationToken) -> ArmedRun<'_> {
        self.set(Some(token));
        ArmedRun { interrupts: self }
    }

    /// Cancel the armed run; `false` when no run is armed
    pub fn interrupt(&self) -> bool {
        let Ok(current) = self.current.lock() else {
            return false;
        };
        match current.as_ref() {
            Some(token) => {
                debug!("Interrupt received, cancelling the run");
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn set(&self, token: Option<CancellationToken>) {
        if let Ok(mut current) = self.current.lock() {
            *current = token;
        }
    }
}

impl Drop for ArmedRun<'_> {
    fn drop(&mut self) {
        self.interrupts.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_cancels_armed_run() {
        let interrupts = Interrupts::default();
        let token = CancellationToken::new();

        let armed = interrupts.arm(token.clone());
        assert!(interrupts.interrupt());
        assert!(token.is_cancelled());
        drop(armed);
    }

    #[test]
    fn test_interrupt_between_runs_is_not_swallowed() {
        let interrupts = Interrupts::default();
        assert!(!interrupts.interrupt());

        let first = CancellationToken::new();
        drop(interrupts.arm(first.clone()));
        assert!(!interrupts.interrupt());
        assert!(!first.is_cancelled());

        let second = CancellationToken::new();
        let _armed = interrupts.arm(second.clone());
        assert!(interrupts.interrupt());
        assert!(second.is_cancelled());
        assert!(!first.is_cancelled());
    }
}
