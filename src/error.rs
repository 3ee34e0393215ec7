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

//! Error type shared by every fallible rawrepl operation.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplError>;

#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading or setting terminal attributes failed. Fatal at session start.
    #[error("terminal attribute call {op} failed: {source}")]
    TermAttr {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from terminal: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write to terminal: {0}")]
    Write(#[source] io::Error),

    /// Input closed before the exit command was seen.
    #[error("end of input")]
    Eof,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
