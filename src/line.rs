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

//! The editable line: byte buffer, cursor offset, and the redraw each edit
//! needs to keep the terminal in step.
//!
//! Every operation mutates the buffer and returns a [`Redraw`] describing,
//! with cursor-relative moves only, how to bring the screen from its old
//! state to the new one. The physical cursor is assumed to sit at column
//! `cursor` (relative to the end of the prompt) before each call, and is left
//! at the new `cursor` by the returned redraw.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Print(Vec<u8>),
    Left(usize),
    Right(usize),
    Bell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redraw {
    steps: Vec<Draw>,
}

impl Redraw {
    pub fn new() -> Self {
        Redraw::default()
    }

    pub fn bell() -> Self {
        Redraw { steps: vec![Draw::Bell] }
    }

    pub fn print(&mut self, bytes: &[u8]) -> &mut Self {
        if !bytes.is_empty() {
            self.steps.push(Draw::Print(bytes.to_vec()));
        }
        self
    }

    pub fn blank(&mut self, n: usize) -> &mut Self {
        if n > 0 {
            self.steps.push(Draw::Print(vec![b' '; n]));
        }
        self
    }

    pub fn left(&mut self, n: usize) -> &mut Self {
        if n > 0 {
            self.steps.push(Draw::Left(n));
        }
        self
    }

    pub fn right(&mut self, n: usize) -> &mut Self {
        if n > 0 {
            self.steps.push(Draw::Right(n));
        }
        self
    }

    pub fn is_bell(&self) -> bool {
        self.steps == [Draw::Bell]
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Draw] {
        &self.steps
    }

    /// Net horizontal cursor movement, in columns.
    pub fn cursor_delta(&self) -> isize {
        self.steps
            .iter()
            .map(|step| match step {
                Draw::Print(bytes) => bytes.len() as isize,
                Draw::Left(n) => -(*n as isize),
                Draw::Right(n) => *n as isize,
                Draw::Bell => 0,
            })
            .sum()
    }
}

pub(crate) fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    buf: Vec<u8>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, b: u8) -> Redraw {
        let mut redraw = Redraw::new();
        if self.cursor == self.buf.len() {
            self.buf.push(b);
            self.cursor += 1;
            redraw.print(&[b]);
            return redraw;
        }
        // Mid-line: reprint the shifted tail, then walk back over it.
        let tail = self.buf[self.cursor..].to_vec();
        self.buf.insert(self.cursor, b);
        self.cursor += 1;
        redraw.print(&[b]).print(&tail).left(tail.len());
        redraw
    }

    pub fn backspace(&mut self) -> Redraw {
        if self.cursor == 0 {
            return Redraw::bell();
        }
        let mut redraw = Redraw::new();
        if self.cursor == self.buf.len() {
            self.buf.pop();
            self.cursor -= 1;
            redraw.left(1).blank(1).left(1);
            return redraw;
        }
        let old_len = self.buf.len();
        let tail = self.buf[self.cursor..].to_vec();
        self.cursor -= 1;
        self.buf.remove(self.cursor);
        let vacated = old_len - self.cursor;
        redraw
            .left(1)
            .blank(vacated)
            .left(vacated)
            .print(&tail)
            .left(tail.len());
        redraw
    }

    pub fn move_left(&mut self) -> Redraw {
        if self.cursor == 0 {
            return Redraw::bell();
        }
        self.cursor -= 1;
        let mut redraw = Redraw::new();
        redraw.left(1);
        redraw
    }

    pub fn move_right(&mut self) -> Redraw {
        if self.cursor == self.buf.len() {
            return Redraw::bell();
        }
        self.cursor += 1;
        let mut redraw = Redraw::new();
        redraw.right(1);
        redraw
    }

    /// Skip blanks, then the word, to the left of the cursor.
    pub fn move_left_word(&mut self) -> Redraw {
        let start = self.cursor;
        while self.cursor > 0 && is_blank(self.buf[self.cursor - 1]) {
            self.cursor -= 1;
        }
        while self.cursor > 0 && !is_blank(self.buf[self.cursor - 1]) {
            self.cursor -= 1;
        }
        let mut redraw = Redraw::new();
        redraw.left(start - self.cursor);
        redraw
    }

    /// Skip blanks, then the word, looking one past the cursor; land just
    /// after the word.
    pub fn move_right_word(&mut self) -> Redraw {
        let start = self.cursor;
        let len = self.buf.len();
        while self.cursor + 1 < len && is_blank(self.buf[self.cursor + 1]) {
            self.cursor += 1;
        }
        while self.cursor + 1 < len && !is_blank(self.buf[self.cursor + 1]) {
            self.cursor += 1;
        }
        if self.cursor < len {
            self.cursor += 1;
        }
        let mut redraw = Redraw::new();
        redraw.right(self.cursor - start);
        redraw
    }

    pub fn move_home(&mut self) -> Redraw {
        let mut redraw = Redraw::new();
        redraw.left(self.cursor);
        self.cursor = 0;
        redraw
    }

    pub fn move_end(&mut self) -> Redraw {
        let mut redraw = Redraw::new();
        redraw.right(self.buf.len() - self.cursor);
        self.cursor = self.buf.len();
        redraw
    }

    /// Delete everything before the cursor and pull the rest to column 0.
    pub fn clear_to_start(&mut self) -> Redraw {
        let old_len = self.buf.len();
        let mut redraw = Redraw::new();
        redraw.left(self.cursor).blank(old_len).left(old_len);
        self.buf.drain(..self.cursor);
        self.cursor = 0;
        redraw.print(&self.buf).left(self.buf.len());
        redraw
    }

    /// Erase the whole line from the screen and the buffer.
    pub fn clear_all(&mut self) -> Redraw {
        let after = self.buf.len() - self.cursor;
        let mut redraw = Redraw::new();
        redraw.blank(after).left(after);
        for _ in 0..self.cursor {
            redraw.left(1).blank(1).left(1);
        }
        self.buf.clear();
        self.cursor = 0;
        redraw
    }

    /// Swap in `text` (a recalled history entry) with the cursor at its end.
    pub fn replace_with(&mut self, text: &str) -> Redraw {
        let mut redraw = self.clear_all();
        self.buf.extend_from_slice(text.as_bytes());
        self.cursor = self.buf.len();
        redraw.print(&self.buf);
        redraw
    }
}
