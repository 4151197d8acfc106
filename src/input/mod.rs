// (C) 2025 - Enzo Lombardi

//! Input subsystem: readiness wait, byte queue and the escape decoder.
//!
//! [`Input`] owns one `poll(2)` wait over standard input (plus any
//! registered auxiliary descriptors, each with its own byte queue). When
//! stdin is readable, bytes are read in bounded chunks into the circular
//! queue and drained one at a time through the [`InputDecoder`]. A wait
//! that expires with nothing readable fires the decoder's timeout tick,
//! which is what tells a typed `ESC` apart from the start of a sequence.

mod circbuf;
mod decoder;
mod event;

pub use circbuf::{CircularBuffer, INPUT_QUEUE_SIZE};
pub use decoder::{EventHooks, InputDecoder, EVENT_BUF_SIZE};
pub use event::{
    is_control_byte, map_ascii, map_fk, map_nav, KeyCode, KeystrokeEvent, Modifiers, MouseButton,
    MouseEvent, MouseMotion,
};

use crate::core::error::{PaneledError, Result};
use log::trace;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use std::collections::HashMap;
use std::os::fd::RawFd;

/// How long the readiness wait blocks, in milliseconds. Expiry of this
/// tick right after a lone `ESC` is what makes it a keypress instead of a
/// sequence prefix, so lowering it trades paste robustness for latency.
pub const ESC_TIMEOUT_MS: i32 = 10;

/// Upper bound on bytes moved per read and per decode pass.
pub const INPUT_BUFFER_SIZE: usize = 256;

/// The input session: readiness multiplexer, byte queue, decoder.
pub struct Input {
    queue: CircularBuffer,
    decoder: InputDecoder,
    aux: HashMap<RawFd, CircularBuffer>,
}

impl Input {
    pub fn new() -> Self {
        Self {
            queue: CircularBuffer::new(),
            decoder: InputDecoder::new(),
            aux: HashMap::new(),
        }
    }

    /// Watch an additional descriptor; readable bytes land in a buffer of
    /// its own, retrievable via [`descriptor_buffer`](Self::descriptor_buffer).
    pub fn register_descriptor(&mut self, fd: RawFd) {
        self.aux.insert(fd, CircularBuffer::new());
    }

    pub fn unregister_descriptor(&mut self, fd: RawFd) {
        self.aux.remove(&fd);
    }

    /// The byte queue of a registered auxiliary descriptor.
    pub fn descriptor_buffer(&mut self, fd: RawFd) -> Option<&mut CircularBuffer> {
        self.aux.get_mut(&fd)
    }

    /// The decoder's view of the most recent mouse report.
    pub fn last_mouse(&self) -> &MouseEvent {
        self.decoder.last_mouse()
    }

    /// Block up to [`ESC_TIMEOUT_MS`] for readiness, then read and decode.
    ///
    /// Interrupted waits are retried transparently. A wait that expires
    /// with no readable descriptor fires the decoder's timeout tick.
    ///
    /// # Errors
    ///
    /// [`PaneledError`] with the read kind when an OS read fails with
    /// anything but `EINTR`, or the queue-full kind when the queue cannot
    /// accept more bytes.
    pub fn handle_events(&mut self, hooks: &mut dyn EventHooks) -> Result<()> {
        let aux_fds: Vec<RawFd> = self.aux.keys().copied().collect();
        let mut fds = Vec::with_capacity(1 + aux_fds.len());
        fds.push(PollFd::new(libc::STDIN_FILENO, PollFlags::POLLIN));
        for &fd in &aux_fds {
            fds.push(PollFd::new(fd, PollFlags::POLLIN));
        }

        let events = loop {
            match poll(&mut fds, ESC_TIMEOUT_MS) {
                Ok(n) => break n,
                Err(Errno::EINTR) => continue, // retry the wait
                Err(errno) => return Err(PaneledError::read(errno as i32)),
            }
        };

        if events == 0 {
            self.decoder.on_timeout(hooks);
            return Ok(());
        }

        let stdin_ready = fds[0]
            .revents()
            .is_some_and(|r| r.contains(PollFlags::POLLIN));
        let ready_aux: Vec<RawFd> = fds[1..]
            .iter()
            .zip(&aux_fds)
            .filter(|(pfd, _)| {
                pfd.revents()
                    .is_some_and(|r| r.contains(PollFlags::POLLIN))
            })
            .map(|(_, &fd)| fd)
            .collect();
        drop(fds);

        if stdin_ready {
            self.read_input()?;
            self.process(hooks);
        }
        for fd in ready_aux {
            self.read_descriptor(fd)?;
        }
        Ok(())
    }

    /// Move readable stdin bytes into the queue, bounded by its free space.
    fn read_input(&mut self) -> Result<()> {
        let available = self.queue.write_available();
        if available == 0 {
            return Err(PaneledError::queue_full());
        }

        let to_read = available.min(INPUT_BUFFER_SIZE);
        let mut buffer = [0u8; INPUT_BUFFER_SIZE];
        match nix::unistd::read(libc::STDIN_FILENO, &mut buffer[..to_read]) {
            Ok(0) => Ok(()), // nothing to decode
            Ok(n) => {
                trace!("read {n} bytes from stdin");
                self.queue.write(&buffer[..n]);
                Ok(())
            }
            Err(errno) => Err(PaneledError::read(errno as i32)),
        }
    }

    /// Drain queued bytes through the state machine.
    fn process(&mut self, hooks: &mut dyn EventHooks) {
        let mut buffer = [0u8; INPUT_BUFFER_SIZE];
        let n = self.queue.read(&mut buffer);
        for &byte in &buffer[..n] {
            self.decoder.feed(byte, hooks);
        }
    }

    fn read_descriptor(&mut self, fd: RawFd) -> Result<()> {
        let Some(queue) = self.aux.get_mut(&fd) else {
            return Ok(());
        };
        let available = queue.write_available();
        if available == 0 {
            return Err(PaneledError::queue_full());
        }
        let to_read = available.min(INPUT_BUFFER_SIZE);
        let mut buffer = [0u8; INPUT_BUFFER_SIZE];
        match nix::unistd::read(fd, &mut buffer[..to_read]) {
            Ok(n) => {
                queue.write(&buffer[..n]);
                Ok(())
            }
            Err(errno) => Err(PaneledError::read(errno as i32)),
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
