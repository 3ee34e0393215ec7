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

//! ANSI escape sequences and writing redraws, prompts, and handler output.

use std::io::{self, Write};

use crate::line::{Draw, Redraw};

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

pub const CURSOR_LEFT: &[u8] = b"\x1b[1D";
pub const CURSOR_RIGHT: &[u8] = b"\x1b[1C";
pub const BELL: &[u8] = b"\x07";

/// Move cursor left by `n` columns, one column per sequence.
pub fn cursor_left_n(out: &mut impl Write, n: usize) -> io::Result<()> {
    for _ in 0..n {
        out.write_all(CURSOR_LEFT)?;
    }
    Ok(())
}

/// Move cursor right by `n` columns, one column per sequence.
pub fn cursor_right_n(out: &mut impl Write, n: usize) -> io::Result<()> {
    for _ in 0..n {
        out.write_all(CURSOR_RIGHT)?;
    }
    Ok(())
}

/// Emit a redraw. Does not flush.
pub fn render(out: &mut impl Write, redraw: &Redraw) -> io::Result<()> {
    for step in redraw.steps() {
        match step {
            Draw::Print(bytes) => out.write_all(bytes)?,
            Draw::Left(n) => cursor_left_n(out, *n)?,
            Draw::Right(n) => cursor_right_n(out, *n)?,
            Draw::Bell => out.write_all(BELL)?,
        }
    }
    Ok(())
}

pub fn prompt(out: &mut impl Write, prompt: &str) -> io::Result<()> {
    write!(out, "{} ", prompt)?;
    out.flush()
}

/// Print handler output on its own line; empty output prints nothing.
pub fn output_line(out: &mut impl Write, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", text)?;
    out.flush()
}
