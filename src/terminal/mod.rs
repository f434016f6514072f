//! Terminal handling - mode snapshots, raw mode guard and single-character reads.

mod error;
mod mode;
mod raw_mode;
mod reader;

// Re-export public types from submodules
pub use error::ReadCharError;
pub use mode::TerminalMode;
pub use raw_mode::RawModeGuard;
pub use reader::{ExclusiveReader, RawCharReader, ReadChar};

/// Read one character from standard input in raw mode.
///
/// Shorthand for `RawCharReader::stdin().read_one_char()`.
pub fn read_one_char() -> Result<char, ReadCharError> {
    RawCharReader::stdin().read_one_char()
}
