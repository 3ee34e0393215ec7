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

//! Property-based invariant tests for the line editor and history.
//!
//! 1. The cursor stays within `0..=len` after every editing operation.
//! 2. Inserting a byte then backspacing restores the exact prior line.
//! 3. Each redraw leaves the physical cursor where the logical cursor is.
//! 4. History keeps exactly the newest `max_entries` lines, oldest first.
//! 5. Repeated recall-previous walks strictly down to 0, then stops.
//! 6. Word moves are no-ops at the matching buffer boundary.

use proptest::prelude::*;
use rawrepl::{History, LineBuffer, Redraw};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    Backspace,
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
    ClearToStart,
    ClearAll,
    Replace(String),
}

fn printable() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => 0x21u8..=0x7E,
        1 => Just(b' '),
        1 => Just(b'\t'),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => printable().prop_map(Op::Insert),
        2 => Just(Op::Backspace),
        2 => Just(Op::Left),
        2 => Just(Op::Right),
        1 => Just(Op::WordLeft),
        1 => Just(Op::WordRight),
        1 => Just(Op::Home),
        1 => Just(Op::End),
        1 => Just(Op::ClearToStart),
        1 => Just(Op::ClearAll),
        1 => "[a-z ]{0,12}".prop_map(Op::Replace),
    ]
}

fn apply(line: &mut LineBuffer, op: &Op) -> Redraw {
    match op {
        Op::Insert(b) => line.insert(*b),
        Op::Backspace => line.backspace(),
        Op::Left => line.move_left(),
        Op::Right => line.move_right(),
        Op::WordLeft => line.move_left_word(),
        Op::WordRight => line.move_right_word(),
        Op::Home => line.move_home(),
        Op::End => line.move_end(),
        Op::ClearToStart => line.clear_to_start(),
        Op::ClearAll => line.clear_all(),
        Op::Replace(text) => line.replace_with(text),
    }
}

fn line_from(text: &[u8], cursor_seed: usize) -> LineBuffer {
    let mut line = LineBuffer::new();
    for &b in text {
        line.insert(b);
    }
    let back = cursor_seed % (text.len() + 1);
    for _ in 0..back {
        line.move_left();
    }
    line
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 3. Cursor bounds and physical/logical agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cursor_stays_in_bounds(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut line = LineBuffer::new();
        for op in &ops {
            let before = line.cursor() as isize;
            let redraw = apply(&mut line, op);
            prop_assert!(line.cursor() <= line.len(), "op {:?} left cursor {} past len {}", op, line.cursor(), line.len());
            prop_assert_eq!(before + redraw.cursor_delta(), line.cursor() as isize, "op {:?}", op);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Insert then backspace is the identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_then_backspace_restores(
        text in prop::collection::vec(printable(), 0..24),
        seed in any::<usize>(),
        b in printable(),
    ) {
        let before = line_from(&text, seed);
        let mut line = before.clone();
        line.insert(b);
        line.backspace();
        prop_assert_eq!(line, before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. History bounding
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn history_keeps_newest(max in 1usize..10, extra in 0usize..10) {
        let lines: Vec<String> = (0..max + extra).map(|i| format!("cmd{i}")).collect();
        let mut history = History::new(max);
        for line in &lines {
            history.append(line);
        }
        let kept: Vec<&str> = history.iter().collect();
        let expected: Vec<&str> = lines[extra..].iter().map(String::as_str).collect();
        prop_assert_eq!(kept, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Recall monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recall_previous_walks_down(n in 0usize..8) {
        let mut history = History::new(8);
        for i in 0..n {
            history.append(&format!("line {i}"));
        }
        let mut pos = history.len();
        while let Some((next, _)) = history.recall_previous(pos) {
            prop_assert!(next < pos);
            pos = next;
        }
        prop_assert_eq!(pos, 0);
        prop_assert!(history.recall_previous(pos).is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Word moves at the boundaries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn word_moves_noop_at_boundaries(text in prop::collection::vec(printable(), 0..24)) {
        let mut at_start = line_from(&text, text.len());
        prop_assert_eq!(at_start.cursor(), 0);
        let redraw = at_start.move_left_word();
        prop_assert!(redraw.is_empty());
        prop_assert_eq!(at_start.cursor(), 0);

        let mut at_end = line_from(&text, 0);
        prop_assert_eq!(at_end.cursor(), text.len());
        let redraw = at_end.move_right_word();
        prop_assert!(redraw.is_empty());
        prop_assert_eq!(at_end.cursor(), text.len());
    }
}
