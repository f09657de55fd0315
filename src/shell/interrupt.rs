//! Ctrl-C handling.
//!
//! The first SIGINT only raises a flag; the installer checks it between
//! components so a component is never left half-written. A second SIGINT
//! exits immediately with status 130.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// A shared "stop soon" flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    /// Create a flag that is not set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

static PROCESS_FLAG: OnceLock<InterruptFlag> = OnceLock::new();

/// The process-wide flag raised by SIGINT.
pub fn process_flag() -> InterruptFlag {
    PROCESS_FLAG.get_or_init(InterruptFlag::new).clone()
}

/// Route SIGINT to [`process_flag`].
///
/// Safe to call more than once. A no-op on non-unix targets, where Ctrl-C
/// keeps its default behavior.
pub fn install_sigint() {
    let _ = process_flag();

    #[cfg(unix)]
    {
        static INSTALLED: OnceLock<()> = OnceLock::new();
        INSTALLED.get_or_init(|| {
            // SAFETY: the handler only touches an atomic and calls _exit,
            // both async-signal-safe.
            unsafe {
                libc::signal(
                    libc::SIGINT,
                    handle_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t,
                );
            }
        });
    }
}

#[cfg(unix)]
extern "C" fn handle_sigint(_signal: libc::c_int) {
    if let Some(flag) = PROCESS_FLAG.get() {
        if flag.0.swap(true, Ordering::SeqCst) {
            // SAFETY: _exit is async-signal-safe.
            unsafe { libc::_exit(130) };
        }
    }
}
