//! Error types for single-character terminal reads.

use std::io;

/// Errors that can occur while reading one raw character.
#[derive(Debug, thiserror::Error)]
pub enum ReadCharError {
    /// The stream is not an interactive device (plain file, pipe, socket).
    #[error("input is not a terminal")]
    NotATerminal,

    /// Capturing or applying the line discipline failed at the OS level.
    #[error("terminal configuration failed during {operation}: {source}")]
    DeviceConfiguration {
        /// Which call failed (`tcgetattr` or `tcsetattr`)
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// The blocking read was interrupted by a signal.
    #[error("read interrupted by a signal")]
    Interrupted,

    /// The stream reached end of input before a full character was read.
    #[error("end of input before a complete character")]
    EndOfInput,

    /// The bytes read do not form a single valid UTF-8 character.
    #[error("invalid UTF-8 sequence: {bytes:02x?}")]
    InvalidUtf8 {
        /// Every byte consumed while decoding, including a trailing byte
        /// that turned out not to be a continuation byte
        bytes: Vec<u8>,
    },

    /// Any other read failure.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
}

impl ReadCharError {
    pub(crate) fn config(operation: &'static str) -> Self {
        ReadCharError::DeviceConfiguration {
            operation,
            source: io::Error::last_os_error(),
        }
    }
}
