//! Process-wide run state.
//!
//! Two orthogonal states:
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `DEFERRED`: Is something running that must unwind before exit?
//!   (a supervised child, or a held document lock)

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Live [`DeferInterrupt`] guards
/// - `0`: Ctrl+C exits immediately
/// - `> 0`: Ctrl+C sets `SHUTDOWN`; the guarded work stops and unwinds
static DEFERRED: AtomicUsize = AtomicUsize::new(0);

/// Exit status after Ctrl+C
pub const INTERRUPTED_EXIT: i32 = 130;

/// Setup the global Ctrl+C handler. Call once at program start
///
/// Without a guard the process exits at once. While a guard lives the flag
/// is set instead, so the supervisor can kill its child and lock holders
/// can release their lock before the process exits.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if DEFERRED.load(Ordering::SeqCst) == 0 {
            std::process::exit(INTERRUPTED_EXIT);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Guard that turns Ctrl+C into a shutdown request for its lifetime.
///
/// Guards nest; the process only exits directly once all are dropped.
#[derive(Debug)]
pub struct DeferInterrupt(());

impl DeferInterrupt {
    pub fn enter() -> Self {
        DEFERRED.fetch_add(1, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for DeferInterrupt {
    fn drop(&mut self) {
        DEFERRED.fetch_sub(1, Ordering::SeqCst);
    }
}
