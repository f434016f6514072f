//! Snapshots of a terminal's line-discipline configuration.

use std::fmt;
use std::os::fd::{AsRawFd, BorrowedFd};

use super::error::ReadCharError;

/// Opaque snapshot of a terminal device's configuration at one point in time.
///
/// Covers the input, output, control and local flags, the control-character
/// array (including `VMIN`/`VTIME`) and the line speeds.
#[derive(Clone, Copy)]
pub struct TerminalMode {
    attrs: libc::termios,
}

impl TerminalMode {
    /// Capture the current configuration of `fd` with `tcgetattr`.
    ///
    /// # Errors
    /// Returns `DeviceConfiguration` if the device refuses the query
    /// (for example when `fd` has no controlling terminal).
    pub fn capture(fd: BorrowedFd<'_>) -> Result<Self, ReadCharError> {
        // SAFETY: termios is plain old data; tcgetattr fully initializes it on success.
        let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd.as_raw_fd(), &mut attrs) } != 0 {
            return Err(ReadCharError::config("tcgetattr"));
        }
        Ok(Self { attrs })
    }

    /// Apply this configuration to `fd` once queued output has drained.
    ///
    /// Unread input is left in place (`TCSADRAIN`, not `TCSAFLUSH`).
    pub fn apply(&self, fd: BorrowedFd<'_>) -> Result<(), ReadCharError> {
        if unsafe { libc::tcsetattr(fd.as_raw_fd(), libc::TCSADRAIN, &self.attrs) } != 0 {
            return Err(ReadCharError::config("tcsetattr"));
        }
        Ok(())
    }

    /// Derive the raw configuration used for single-character reads.
    ///
    /// Input processing of break, parity, stripping and XON/XOFF is off,
    /// characters are 8 bits without parity, echo and canonical line
    /// editing are off, and each read blocks for exactly one byte.
    /// `ISIG` stays set, so Ctrl-C still raises `SIGINT`.
    pub fn to_raw(&self) -> Self {
        let mut attrs = self.attrs;
        attrs.c_iflag &= !(libc::BRKINT | libc::INPCK | libc::ISTRIP | libc::IXON);
        attrs.c_cflag &= !(libc::CSIZE | libc::PARENB);
        attrs.c_cflag |= libc::CS8;
        attrs.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN);
        attrs.c_cc[libc::VMIN] = 1;
        attrs.c_cc[libc::VTIME] = 0;
        Self { attrs }
    }

    /// Return a copy with local echo switched on or off.
    pub fn with_echo(&self, echo: bool) -> Self {
        let mut attrs = self.attrs;
        if echo {
            attrs.c_lflag |= libc::ECHO;
        } else {
            attrs.c_lflag &= !libc::ECHO;
        }
        Self { attrs }
    }

    pub fn is_canonical(&self) -> bool {
        self.attrs.c_lflag & libc::ICANON != 0
    }

    pub fn echoes(&self) -> bool {
        self.attrs.c_lflag & libc::ECHO != 0
    }

    pub fn input_flags(&self) -> libc::tcflag_t {
        self.attrs.c_iflag
    }

    pub fn control_flags(&self) -> libc::tcflag_t {
        self.attrs.c_cflag
    }

    pub fn local_flags(&self) -> libc::tcflag_t {
        self.attrs.c_lflag
    }

    /// Minimum number of bytes a non-canonical read waits for (`VMIN`).
    pub fn min_read(&self) -> u8 {
        self.attrs.c_cc[libc::VMIN] as u8
    }

    /// Inter-byte timeout of a non-canonical read, in deciseconds (`VTIME`).
    pub fn read_timeout(&self) -> u8 {
        self.attrs.c_cc[libc::VTIME] as u8
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn line_discipline(&self) -> Option<libc::cc_t> {
        Some(self.attrs.c_line)
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn line_discipline(&self) -> Option<libc::cc_t> {
        None
    }

    fn speeds(&self) -> (libc::speed_t, libc::speed_t) {
        // SAFETY: both calls only read the struct.
        unsafe {
            (
                libc::cfgetispeed(&self.attrs),
                libc::cfgetospeed(&self.attrs),
            )
        }
    }
}

/// Field-wise equality over everything `tcsetattr` applies: the four flag
/// words, the control characters, the line discipline where the platform has
/// one, and the speeds as reported by `cfgetispeed`/`cfgetospeed`. Struct
/// padding and platform-private speed encodings are not compared.
impl PartialEq for TerminalMode {
    fn eq(&self, other: &Self) -> bool {
        self.attrs.c_iflag == other.attrs.c_iflag
            && self.attrs.c_oflag == other.attrs.c_oflag
            && self.attrs.c_cflag == other.attrs.c_cflag
            && self.attrs.c_lflag == other.attrs.c_lflag
            && self.attrs.c_cc == other.attrs.c_cc
            && self.line_discipline() == other.line_discipline()
            && self.speeds() == other.speeds()
    }
}

impl Eq for TerminalMode {}

impl fmt::Debug for TerminalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalMode")
            .field("iflag", &format_args!("{:#o}", self.attrs.c_iflag))
            .field("oflag", &format_args!("{:#o}", self.attrs.c_oflag))
            .field("cflag", &format_args!("{:#o}", self.attrs.c_cflag))
            .field("lflag", &format_args!("{:#o}", self.attrs.c_lflag))
            .field("vmin", &self.min_read())
            .field("vtime", &self.read_timeout())
            .finish()
    }
}
