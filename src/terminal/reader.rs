//! Single-character reads from an interactive input stream.

use std::collections::HashMap;
use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::error::ReadCharError;
use super::raw_mode::RawModeGuard;

/// Something that can hand out one raw character at a time.
pub trait ReadChar {
    /// Block until one complete character is available and return it.
    fn read_one_char(&self) -> Result<char, ReadCharError>;
}

/// Reads one character at a time from a terminal in raw mode.
///
/// Each call captures the terminal's mode, switches to raw mode, reads one
/// UTF-8 character and restores the captured mode, whatever the outcome.
///
/// Only one reader may be active per device at a time. Nothing here enforces
/// that; two overlapping reads on the same terminal can race on the
/// saved/restored mode. Wrap the reader in [`ExclusiveReader`] to serialize
/// reads within this process.
pub struct RawCharReader<F> {
    source: F,
}

impl RawCharReader<io::Stdin> {
    /// Reader on the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<F: AsFd> RawCharReader<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn get_ref(&self) -> &F {
        &self.source
    }

    pub fn into_inner(self) -> F {
        self.source
    }
}

impl<F: AsFd> ReadChar for RawCharReader<F> {
    fn read_one_char(&self) -> Result<char, ReadCharError> {
        let fd = self.source.as_fd();
        if unsafe { libc::isatty(fd.as_raw_fd()) } != 1 {
            return Err(ReadCharError::NotATerminal);
        }

        let mut guard = RawModeGuard::enter(fd)?;
        let outcome = read_utf8_char(fd);
        let restored = guard.exit();

        match (outcome, restored) {
            (Ok(ch), Ok(())) => Ok(ch),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), restored) => {
                if let Err(restore_err) = restored {
                    log::warn!("terminal restore failed after read error: {}", restore_err);
                }
                Err(e)
            }
        }
    }
}

/// A [`RawCharReader`] that holds a per-device lock for the whole
/// capture/read/restore cycle.
///
/// Threads of this process reading the same terminal through
/// `ExclusiveReader` take turns. Other processes and plain
/// `RawCharReader`s are not coordinated.
pub struct ExclusiveReader<F> {
    inner: RawCharReader<F>,
}

impl<F: AsFd> ExclusiveReader<F> {
    pub fn new(inner: RawCharReader<F>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> RawCharReader<F> {
        self.inner
    }
}

impl<F: AsFd> ReadChar for ExclusiveReader<F> {
    fn read_one_char(&self) -> Result<char, ReadCharError> {
        let lock = device_lock(self.inner.source.as_fd());
        let _held = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.read_one_char()
    }
}

/// Device identity used to key locks: the device number for character
/// devices, otherwise the inode.
type DeviceKey = (u64, u64);

fn device_lock(fd: BorrowedFd<'_>) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<DeviceKey, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = device_key(fd);
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

fn device_key(fd: BorrowedFd<'_>) -> DeviceKey {
    // SAFETY: stat is plain old data; fstat fully initializes it on success.
    let mut st: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstat(fd.as_raw_fd(), &mut st) } != 0 {
        // Unknown device: share one lock rather than none
        return (u64::MAX, u64::MAX);
    }
    (st.st_rdev as u64, st.st_ino as u64)
}

/// Read exactly one UTF-8 encoded character, one byte per `read(2)`.
///
/// Reading byte-by-byte never consumes input past a well-formed character,
/// so keystrokes typed ahead stay queued for the next read. A malformed
/// sequence is only detected on its first non-continuation byte, and that
/// byte is consumed along with the rest; `InvalidUtf8` carries all of them.
fn read_utf8_char(fd: BorrowedFd<'_>) -> Result<char, ReadCharError> {
    let mut buf = [0u8; 4];
    buf[0] = read_byte(fd)?;

    let len = utf8_sequence_len(buf[0]).ok_or_else(|| ReadCharError::InvalidUtf8 {
        bytes: vec![buf[0]],
    })?;

    for i in 1..len {
        buf[i] = read_byte(fd)?;
        if buf[i] & 0xC0 != 0x80 {
            return Err(ReadCharError::InvalidUtf8 {
                bytes: buf[..=i].to_vec(),
            });
        }
    }

    std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or_else(|| ReadCharError::InvalidUtf8 {
            bytes: buf[..len].to_vec(),
        })
}

fn read_byte(fd: BorrowedFd<'_>) -> Result<u8, ReadCharError> {
    let mut byte = 0u8;
    let n = unsafe { libc::read(fd.as_raw_fd(), (&mut byte as *mut u8).cast(), 1) };
    match n {
        1 => Ok(byte),
        0 => Err(ReadCharError::EndOfInput),
        _ => {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                Err(ReadCharError::Interrupted)
            } else {
                Err(ReadCharError::Read(err))
            }
        }
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` if `lead`
/// cannot start a sequence.
fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
