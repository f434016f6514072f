//! SIGINT handling that lets Ctrl-C break a blocking terminal read.
//!
//! The handler is installed without `SA_RESTART`, so a `read(2)` blocked on
//! the terminal fails with `EINTR` instead of resuming. The reader then
//! restores the terminal mode and reports the interruption.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the handler when SIGINT arrives
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Check if SIGINT was received while a guard was installed.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Installs the SIGINT handler and puts the previous disposition back on drop.
pub struct InterruptGuard {
    previous: libc::sigaction,
}

impl InterruptGuard {
    pub fn install() -> io::Result<Self> {
        INTERRUPTED.store(false, Ordering::SeqCst);

        // SAFETY: sigaction is plain old data; every field the kernel reads is set below.
        let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
        action.sa_sigaction = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = 0;
        let mut previous: libc::sigaction = unsafe { std::mem::zeroed() };

        unsafe {
            libc::sigemptyset(&mut action.sa_mask);
            if libc::sigaction(libc::SIGINT, &action, &mut previous) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(Self { previous })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        // Best-effort cleanup - ignore errors during drop
        unsafe {
            libc::sigaction(libc::SIGINT, &self.previous, std::ptr::null_mut());
        }
    }
}
