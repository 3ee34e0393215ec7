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

//! rawrepl - a raw-mode line editing read-eval-print loop.
//!
//! Puts the terminal in raw mode, reads keystrokes one byte at a time, and
//! edits the command line in place with cursor-relative escape codes:
//! left/right, word left/right (`ESC ESC [ D` / `C`), Ctrl-A/Ctrl-E, Ctrl-U,
//! backspace, and up/down history recall. Submitted lines go to a
//! caller-supplied [`Handler`], whose output is printed under the line.
//!
//! ```no_run
//! use rawrepl::{Outcome, Repl, ReplConfig};
//!
//! let config = ReplConfig::new("calc>", "quit", 100).with_continuation_prompt("...>");
//! let mut repl = Repl::new(config, |line: &str| Outcome::complete(format!("you said {line}")))?;
//! repl.run_stdio()?;
//! # Ok::<(), rawrepl::ReplError>(())
//! ```

pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod history;
pub mod line;
pub mod output;
pub mod term;

pub use config::ReplConfig;
pub use decode::{Decoder, DecoderState, Event};
pub use engine::{Handler, Outcome, Repl, ReplState};
pub use error::{ReplError, Result};
pub use history::History;
pub use line::{Draw, LineBuffer, Redraw};
pub use term::{RawMode, StdTerminal, Terminal};
