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

//! The read-eval-print loop: prompt, read a line byte by byte, dispatch it,
//! print the result, until the exit command is submitted.

use std::io::{self, Write};
use std::os::unix::io::RawFd;

use tracing::debug;

use crate::config::ReplConfig;
use crate::decode::{Decoder, Event};
use crate::error::{ReplError, Result};
use crate::history::{History, trim_blanks};
use crate::line::{LineBuffer, Redraw};
use crate::output;
use crate::term::{RawMode, StdTerminal, Terminal};

/// What a handler reports back for one submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// `false` asks for the continuation prompt on the next read.
    pub complete: bool,
    /// Printed on its own line unless empty.
    pub output: String,
}

impl Outcome {
    pub fn complete(output: impl Into<String>) -> Self {
        Outcome {
            complete: true,
            output: output.into(),
        }
    }

    pub fn incomplete(output: impl Into<String>) -> Self {
        Outcome {
            complete: false,
            output: output.into(),
        }
    }
}

/// Evaluates submitted lines. Called once per non-blank line, with surrounding
/// blanks already trimmed.
pub trait Handler {
    fn handle(&mut self, line: &str) -> Outcome;
}

impl<F> Handler for F
where
    F: FnMut(&str) -> Outcome,
{
    fn handle(&mut self, line: &str) -> Outcome {
        self(line)
    }
}

/// All mutable engine state. Nothing else in [`Repl`] changes while it runs.
#[derive(Debug)]
pub struct ReplState {
    line: LineBuffer,
    decoder: Decoder,
    /// Recall position into `history`; `history.len()` is the live line.
    recall: usize,
    complete: bool,
    last_command: Option<String>,
    history: History,
}

impl ReplState {
    fn new(max_history: usize) -> Self {
        ReplState {
            line: LineBuffer::new(),
            decoder: Decoder::new(),
            recall: 0,
            complete: true,
            last_command: None,
            history: History::new(max_history),
        }
    }

    fn begin_line(&mut self) {
        self.line = LineBuffer::new();
        self.decoder.reset();
        self.recall = self.history.len();
    }

    /// Apply one editing event to the line or the recall position.
    fn apply(&mut self, event: Event) -> Redraw {
        match event {
            Event::Insert(b) => self.line.insert(b),
            Event::Backspace => self.line.backspace(),
            Event::Home => self.line.move_home(),
            Event::End => self.line.move_end(),
            Event::ClearToStart => self.line.clear_to_start(),
            Event::Left => self.line.move_left(),
            Event::Right => self.line.move_right(),
            Event::WordLeft => self.line.move_left_word(),
            Event::WordRight => self.line.move_right_word(),
            Event::HistoryPrev => match self.history.recall_previous(self.recall) {
                Some((pos, entry)) => {
                    self.recall = pos;
                    self.line.replace_with(entry)
                }
                None => Redraw::bell(),
            },
            Event::HistoryNext => match self.history.recall_next(self.recall) {
                Some((pos, entry)) => {
                    self.recall = pos;
                    self.line.replace_with(entry)
                }
                None => Redraw::bell(),
            },
            Event::Fault(b) => {
                debug!(byte = b, "dropping byte from malformed escape sequence");
                Redraw::new()
            }
            Event::Submit => Redraw::new(),
        }
    }
}

pub struct Repl<H> {
    config: ReplConfig,
    handler: H,
    state: ReplState,
}

impl<H: Handler> Repl<H> {
    /// # Errors
    ///
    /// [`ReplError::InvalidConfig`] if the config does not validate.
    pub fn new(config: ReplConfig, handler: H) -> Result<Self> {
        config.validate()?;
        let state = ReplState::new(config.max_history);
        Ok(Repl {
            config,
            handler,
            state,
        })
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    pub fn line(&self) -> &LineBuffer {
        &self.state.line
    }

    pub fn recall_position(&self) -> usize {
        self.state.recall
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    pub fn last_command(&self) -> Option<&str> {
        self.state.last_command.as_deref()
    }

    /// Primary prompt after a complete command, continuation prompt otherwise.
    pub fn current_prompt(&self) -> &str {
        if self.state.complete {
            &self.config.prompt
        } else {
            &self.config.continuation_prompt
        }
    }

    /// Start a fresh read: empty line, decoder and recall position reset,
    /// prompt printed.
    pub fn begin_line(&mut self, out: &mut impl Write) -> Result<()> {
        self.state.begin_line();
        output::prompt(out, self.current_prompt()).map_err(ReplError::Write)
    }

    /// Consume one input byte. Returns the untrimmed line once it is
    /// submitted; the line buffer keeps its content until the next
    /// [`begin_line`](Self::begin_line).
    pub fn feed(&mut self, b: u8, out: &mut impl Write) -> Result<Option<String>> {
        let Some(event) = self.state.decoder.decode(b) else {
            return Ok(None);
        };
        if event == Event::Submit {
            out.write_all(b"\n")
                .and_then(|()| out.flush())
                .map_err(ReplError::Write)?;
            return Ok(Some(self.state.line.as_str().into_owned()));
        }
        let redraw = self.state.apply(event);
        output::render(out, &redraw)
            .and_then(|()| out.flush())
            .map_err(ReplError::Write)?;
        Ok(None)
    }

    /// Trim, record, and dispatch a submitted line, printing the handler's
    /// output. Returns `true` once the last executed command is the exit
    /// command.
    pub fn submit(&mut self, raw: &str, out: &mut impl Write) -> Result<bool> {
        let line = trim_blanks(raw);
        self.state.complete = true;
        if !line.is_empty() {
            debug!(line, "dispatching line");
            self.state.last_command = Some(line.to_string());
            self.state.history.append(line);
            let outcome = self.handler.handle(line);
            self.state.complete = outcome.complete;
            output::output_line(out, &outcome.output).map_err(ReplError::Write)?;
        }
        let exit_command = trim_blanks(&self.config.exit_command);
        Ok(self.state.last_command.as_deref() == Some(exit_command))
    }

    /// Run until the exit command is submitted.
    ///
    /// # Errors
    ///
    /// [`ReplError::Eof`] if input ends first, [`ReplError::Read`] or
    /// [`ReplError::Write`] on I/O failure.
    pub fn run<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        loop {
            self.begin_line(term)?;
            let line = self.read_line(term)?;
            if self.submit(&line, term)? {
                debug!("exit command submitted");
                return Ok(());
            }
        }
    }

    fn read_line<T: Terminal>(&mut self, term: &mut T) -> Result<String> {
        loop {
            let b = match term.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => return Err(ReplError::Eof),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReplError::Read(e)),
            };
            if let Some(line) = self.feed(b, term)? {
                return Ok(line);
            }
        }
    }

    /// Run on stdin/stdout with the terminal in raw mode for the whole
    /// session.
    ///
    /// # Errors
    ///
    /// [`ReplError::TermAttr`] if stdin is not a terminal, plus anything
    /// [`run`](Self::run) returns.
    pub fn run_stdio(&mut self) -> Result<()> {
        let mut term = StdTerminal::new();
        let fd = term.fd();
        self.run_raw(fd, &mut term)
    }

    /// Put the tty behind `fd` in raw mode, run the session on `term`, then
    /// restore the tty's previous mode. Restoration happens once, on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// [`ReplError::TermAttr`] if `fd` is not a terminal or its mode cannot
    /// be restored, plus anything [`run`](Self::run) returns.
    pub fn run_raw<T: Terminal>(&mut self, fd: RawFd, term: &mut T) -> Result<()> {
        let raw = RawMode::acquire(fd)?;
        let result = self.run(term);
        let restored = raw.restore();
        result?;
        restored
    }
}
