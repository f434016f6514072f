//! Raw terminal mode management with guaranteed restoration.

use std::os::fd::{AsRawFd, BorrowedFd};

use super::error::ReadCharError;
use super::mode::TerminalMode;

/// Guard that puts a terminal into raw mode and restores the captured mode
/// on drop. This covers normal returns, `?` early exits and unwinding panics.
pub struct RawModeGuard<'fd> {
    fd: BorrowedFd<'fd>,
    saved: TerminalMode,
    /// Whether this guard is still responsible for restoration
    active: bool,
}

impl<'fd> RawModeGuard<'fd> {
    /// Capture the current mode of `fd`, then switch it to raw mode.
    ///
    /// # Errors
    /// Returns `DeviceConfiguration` if the mode cannot be captured (nothing
    /// is restored, since nothing was changed) or if raw mode cannot be
    /// applied (the captured mode is put back before returning).
    pub fn enter(fd: BorrowedFd<'fd>) -> Result<Self, ReadCharError> {
        let saved = TerminalMode::capture(fd)?;

        // Armed before applying, so a partially applied change is undone too
        let guard = Self {
            fd,
            saved,
            active: true,
        };
        saved.to_raw().apply(fd)?;
        log::debug!("fd {}: entered raw mode", fd.as_raw_fd());

        Ok(guard)
    }

    /// The mode that will be restored.
    pub fn saved(&self) -> &TerminalMode {
        &self.saved
    }

    /// Restore the saved mode now. After calling this, drop is a no-op.
    pub fn exit(&mut self) -> Result<(), ReadCharError> {
        if self.active {
            self.active = false;
            self.saved.apply(self.fd)?;
            log::debug!("fd {}: restored saved mode", self.fd.as_raw_fd());
        }
        Ok(())
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            // Best-effort: there is no caller left to report to
            if let Err(e) = self.saved.apply(self.fd) {
                log::warn!(
                    "fd {}: failed to restore terminal mode: {}",
                    self.fd.as_raw_fd(),
                    e
                );
            }
        }
    }
}
