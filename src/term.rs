// Copyright 2026 Daniel Smith
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Terminal session for rawrepl: raw-mode acquire/restore via POSIX termios,
//! and the byte-in/bytes-out boundary the engine drives.

use std::fmt;
use std::io::{self, BufWriter, Stdout, Write};
use std::os::unix::io::RawFd;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{ReplError, Result};

static SAVED_TERMIOS: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);

/// What the engine needs from a terminal: blocking single-byte reads and a
/// writer for echo, prompts, and cursor moves.
pub trait Terminal: Write {
    /// Block until one byte arrives. `Ok(None)` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Raw (non-canonical, no echo) mode on a tty, restored exactly once.
///
/// Restoration happens through [`RawMode::restore`] on the normal exit path,
/// or on drop for every other path (error return, panic unwind).
pub struct RawMode {
    fd: RawFd,
    orig: libc::termios,
    restored: bool,
}

impl RawMode {
    /// # Errors
    ///
    /// [`ReplError::TermAttr`] if `fd` is not a terminal or its attributes
    /// cannot be changed.
    pub fn acquire(fd: RawFd) -> Result<Self> {
        let mut orig: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut orig) } != 0 {
            return Err(ReplError::TermAttr {
                op: "tcgetattr",
                source: io::Error::last_os_error(),
            });
        }

        let mut raw = orig;
        // Line buffering and echo off; the engine echoes what it accepts.
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        // Read one byte at a time, no timeout
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(ReplError::TermAttr {
                op: "tcsetattr",
                source: io::Error::last_os_error(),
            });
        }

        // Save a copy for signal handler restoration
        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = Some((fd, orig));
        }
        debug!(fd, "raw mode acquired");

        Ok(RawMode {
            fd,
            orig,
            restored: false,
        })
    }

    pub fn restore(mut self) -> Result<()> {
        self.restore_once()
    }

    fn restore_once(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = None;
        }
        if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.orig) } != 0 {
            return Err(ReplError::TermAttr {
                op: "tcsetattr",
                source: io::Error::last_os_error(),
            });
        }
        debug!(fd = self.fd, "terminal mode restored");
        Ok(())
    }
}

impl fmt::Debug for RawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMode")
            .field("fd", &self.fd)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.restore_once();
    }
}

/// Restore from the saved static copy (used in signal handlers and panic
/// hooks where the guard is out of reach).
pub fn restore_saved() {
    if let Ok(guard) = SAVED_TERMIOS.try_lock() {
        if let Some((fd, ref orig)) = *guard {
            unsafe {
                libc::tcsetattr(fd, libc::TCSANOW, orig);
            }
        }
    }
}

pub fn read_byte(fd: RawFd) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, 1) };
    match n {
        1 => Ok(Some(buf[0])),
        0 => Ok(None),
        _ => Err(io::Error::last_os_error()),
    }
}

/// Stdin for input, buffered stdout for output.
#[derive(Debug)]
pub struct StdTerminal {
    fd: RawFd,
    out: BufWriter<Stdout>,
}

impl StdTerminal {
    pub fn new() -> Self {
        StdTerminal {
            fd: libc::STDIN_FILENO,
            out: BufWriter::new(io::stdout()),
        }
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        StdTerminal::new()
    }
}

impl Write for StdTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Terminal for StdTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        read_byte(self.fd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Master and slave ends of a fresh pseudo-terminal.
    fn open_pty() -> (RawFd, RawFd) {
        let mut master: libc::c_int = -1;
        let mut slave: libc::c_int = -1;
        let rc = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null(),
                std::ptr::null(),
            )
        };
        assert_eq!(rc, 0, "openpty: {}", io::Error::last_os_error());
        (master, slave)
    }

    fn close_pty((master, slave): (RawFd, RawFd)) {
        unsafe {
            libc::close(slave);
            libc::close(master);
        }
    }

    fn lflag(fd: RawFd) -> libc::tcflag_t {
        let mut t: libc::termios = unsafe { std::mem::zeroed() };
        assert_eq!(unsafe { libc::tcgetattr(fd, &mut t) }, 0);
        t.c_lflag
    }

    fn raw_bits(fd: RawFd) -> libc::tcflag_t {
        lflag(fd) & (libc::ICANON | libc::ECHO)
    }

    #[test]
    fn acquire_clears_canonical_and_echo_then_restore_brings_them_back() {
        let pty = open_pty();
        let fd = pty.1;
        let before = lflag(fd);
        assert_ne!(before & libc::ICANON, 0);

        let raw = RawMode::acquire(fd).unwrap();
        assert_eq!(raw_bits(fd), 0);

        raw.restore().unwrap();
        assert_eq!(lflag(fd), before);
        close_pty(pty);
    }

    #[test]
    fn dropping_guard_restores_mode() {
        let pty = open_pty();
        let fd = pty.1;
        let before = lflag(fd);
        {
            let _raw = RawMode::acquire(fd).unwrap();
            assert_eq!(raw_bits(fd), 0);
        }
        assert_eq!(lflag(fd), before);
        close_pty(pty);
    }

    #[test]
    fn second_restore_leaves_terminal_alone() {
        let pty = open_pty();
        let fd = pty.1;
        let before = lflag(fd);

        let mut raw = RawMode::acquire(fd).unwrap();
        raw.restore_once().unwrap();
        assert_eq!(lflag(fd), before);

        // Change the mode behind the guard's back; later restores must not
        // touch it.
        let mut t: libc::termios = unsafe { std::mem::zeroed() };
        assert_eq!(unsafe { libc::tcgetattr(fd, &mut t) }, 0);
        t.c_lflag &= !libc::ECHO;
        assert_eq!(unsafe { libc::tcsetattr(fd, libc::TCSANOW, &t) }, 0);

        raw.restore_once().unwrap();
        drop(raw);
        assert_eq!(lflag(fd) & libc::ECHO, 0);
        close_pty(pty);
    }

    #[test]
    fn acquire_on_non_tty_is_an_error() {
        let mut fds = [0 as libc::c_int; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let err = RawMode::acquire(fds[0]).unwrap_err();
        assert!(matches!(err, ReplError::TermAttr { op: "tcgetattr", .. }));
        unsafe {
            libc::close(fds[0]);
            libc::close(fds[1]);
        }
    }

    #[test]
    fn read_byte_from_pipe_then_eof() {
        let mut fds = [0 as libc::c_int; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let msg = b"q";
        let written = unsafe { libc::write(fds[1], msg.as_ptr() as *const libc::c_void, 1) };
        assert_eq!(written, 1);
        unsafe { libc::close(fds[1]) };
        assert_eq!(read_byte(fds[0]).unwrap(), Some(b'q'));
        assert_eq!(read_byte(fds[0]).unwrap(), None);
        unsafe { libc::close(fds[0]) };
    }
}
