//! Scripted terminal for tests and automated sessions
//!
//! Feeds a fixed list of operator inputs to the session and records every
//! prompt and output line, so a whole ATM session can be asserted on.

use std::collections::VecDeque;

use crate::domain::result::{Error, Result};
use crate::ports::Terminal;

/// Terminal that replays canned input
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    outputs: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Every prompt shown, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every output line, in order
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Inputs that were never consumed
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.prompts.push(message.to_string());
        self.inputs.pop_front().ok_or(Error::InputClosed)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.outputs.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_inputs_and_records_transcript() {
        let mut terminal = ScriptedTerminal::new(["first", "second"]);
        assert_eq!(terminal.prompt("one? ").unwrap(), "first");
        terminal.say("hello").unwrap();
        assert_eq!(terminal.prompt_secret("two? ").unwrap(), "second");

        assert_eq!(terminal.prompts(), ["one? ", "two? "]);
        assert_eq!(terminal.outputs(), ["hello"]);
        assert_eq!(terminal.remaining(), 0);
        assert!(matches!(terminal.prompt("three? "), Err(Error::InputClosed)));
    }
}
