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

//! Construction parameters for a [`Repl`](crate::Repl).

use crate::error::{ReplError, Result};

/// Prompts, exit token, and history capacity.
///
/// The continuation prompt is shown after the handler reports an incomplete
/// command; it defaults to the primary prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    pub continuation_prompt: String,
    pub exit_command: String,
    pub max_history: usize,
}

impl ReplConfig {
    pub fn new(prompt: impl Into<String>, exit_command: impl Into<String>, max_history: usize) -> Self {
        let prompt = prompt.into();
        ReplConfig {
            continuation_prompt: prompt.clone(),
            prompt,
            exit_command: exit_command.into(),
            max_history,
        }
    }

    pub fn with_continuation_prompt(mut self, continuation_prompt: impl Into<String>) -> Self {
        self.continuation_prompt = continuation_prompt.into();
        self
    }

    /// Check the parameters a running engine relies on.
    ///
    /// # Errors
    ///
    /// [`ReplError::InvalidConfig`] when `max_history` is zero or the exit
    /// command is blank (a blank line is never dispatched, so it could never
    /// match).
    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            return Err(ReplError::InvalidConfig(
                "history size must be greater than zero".to_string(),
            ));
        }
        if crate::history::trim_blanks(&self.exit_command).is_empty() {
            return Err(ReplError::InvalidConfig("exit command must not be blank".to_string()));
        }
        Ok(())
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig::new("REPL>", "exit", 5).with_continuation_prompt("....>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn continuation_prompt_defaults_to_primary() {
        let cfg = ReplConfig::new("db>", "quit", 10);
        assert_eq!(cfg.continuation_prompt, "db>");
        let cfg = cfg.with_continuation_prompt("..>");
        assert_eq!(cfg.prompt, "db>");
        assert_eq!(cfg.continuation_prompt, "..>");
    }

    #[test]
    fn default_matches_demo() {
        let cfg = ReplConfig::default();
        assert_eq!(cfg.prompt, "REPL>");
        assert_eq!(cfg.continuation_prompt, "....>");
        assert_eq!(cfg.exit_command, "exit");
        assert_eq!(cfg.max_history, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_history_rejected() {
        let err = ReplConfig::new(">", "exit", 0).validate().unwrap_err();
        assert!(matches!(err, ReplError::InvalidConfig(_)));
    }

    #[test]
    fn blank_exit_command_rejected() {
        let err = ReplConfig::new(">", " \t ", 3).validate().unwrap_err();
        assert!(matches!(err, ReplError::InvalidConfig(_)));
    }
}
