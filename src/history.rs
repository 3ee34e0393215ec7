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

//! Bounded command history with up/down recall.

use std::collections::VecDeque;

use tracing::debug;

/// Strip spaces and tabs from both ends.
pub fn trim_blanks(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Submitted lines, oldest first, holding at most `max_entries`.
///
/// The recall position is owned by the caller: `len()` means "on the live
/// line", and `recall_previous`/`recall_next` only ever land on stored
/// entries. Stepping down from the newest entry does not return to the live
/// line.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Record a submitted line. Blank lines are skipped; duplicates are kept.
    /// Returns whether the line was stored.
    pub fn append(&mut self, line: &str) -> bool {
        let line = trim_blanks(line);
        if line.is_empty() {
            return false;
        }
        self.entries.push_back(line.to_string());
        while self.entries.len() > self.max_entries {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(%evicted, "history full, evicting oldest entry");
            }
        }
        true
    }

    pub fn recall_previous(&self, pos: usize) -> Option<(usize, &str)> {
        if self.entries.is_empty() || pos == 0 {
            return None;
        }
        let pos = pos.min(self.entries.len()) - 1;
        self.get(pos).map(|entry| (pos, entry))
    }

    pub fn recall_next(&self, pos: usize) -> Option<(usize, &str)> {
        if pos + 1 >= self.entries.len() {
            return None;
        }
        let pos = pos + 1;
        self.get(pos).map(|entry| (pos, entry))
    }
}
