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

//! Key decoding: turning raw input bytes into logical editing events.
//!
//! The decoder is fed one byte at a time and never reads or writes anything
//! itself. Recognized sequences:
//!
//! | bytes            | event                  |
//! |------------------|------------------------|
//! | `ESC [ A` / `B`  | history previous/next  |
//! | `ESC [ C` / `D`  | cursor right/left      |
//! | `ESC ESC [ C`/`D`| word right/left        |
//! | Ctrl-A / Ctrl-E  | home / end             |
//! | Ctrl-U           | clear to line start    |
//! | DEL (0x7F)       | backspace              |
//! | `\n`             | submit                 |

use tracing::trace;

const CTRL_A: u8 = 0x01;
const CTRL_E: u8 = 0x05;
const CTRL_U: u8 = 0x15;
const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Normal,
    SawEsc,
    SawDoubleEsc,
    ExpectCsiLetter,
    ExpectCsiLetterWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Insert(u8),
    Backspace,
    Home,
    End,
    ClearToStart,
    Left,
    Right,
    WordLeft,
    WordRight,
    HistoryPrev,
    HistoryNext,
    Submit,
    /// Unexpected byte inside an escape sequence. The decoder is already back
    /// in `Normal` when this is returned and the byte is dropped.
    Fault(u8),
}

#[derive(Debug, Default)]
pub struct Decoder {
    state: DecoderState,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder::default()
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = DecoderState::Normal;
    }

    /// Consume one byte. Returns `None` while inside an escape sequence and
    /// for ignored control bytes.
    pub fn decode(&mut self, b: u8) -> Option<Event> {
        // A newline ends the line whatever sequence was in progress.
        if b == b'\n' {
            self.state = DecoderState::Normal;
            return Some(Event::Submit);
        }
        let event = match self.state {
            DecoderState::Normal => match b {
                DEL => Some(Event::Backspace),
                CTRL_A => Some(Event::Home),
                CTRL_E => Some(Event::End),
                CTRL_U => Some(Event::ClearToStart),
                ESC => {
                    self.state = DecoderState::SawEsc;
                    None
                }
                0x20..=0x7E => Some(Event::Insert(b)),
                _ => None,
            },
            DecoderState::SawEsc => match b {
                ESC => {
                    self.state = DecoderState::SawDoubleEsc;
                    None
                }
                b'[' => {
                    self.state = DecoderState::ExpectCsiLetter;
                    None
                }
                _ => self.fault(b),
            },
            DecoderState::SawDoubleEsc => match b {
                b'[' => {
                    self.state = DecoderState::ExpectCsiLetterWord;
                    None
                }
                _ => self.fault(b),
            },
            DecoderState::ExpectCsiLetter => {
                let event = match b {
                    b'A' => Event::HistoryPrev,
                    b'B' => Event::HistoryNext,
                    b'C' => Event::Right,
                    b'D' => Event::Left,
                    _ => return self.fault(b),
                };
                self.state = DecoderState::Normal;
                Some(event)
            }
            DecoderState::ExpectCsiLetterWord => {
                let event = match b {
                    b'C' => Event::WordRight,
                    b'D' => Event::WordLeft,
                    _ => return self.fault(b),
                };
                self.state = DecoderState::Normal;
                Some(event)
            }
        };
        if let Some(ev) = event {
            trace!(byte = b, event = ?ev, "decoded");
        }
        event
    }

    fn fault(&mut self, b: u8) -> Option<Event> {
        trace!(byte = b, state = ?self.state, "malformed escape sequence");
        self.state = DecoderState::Normal;
        Some(Event::Fault(b))
    }
}
