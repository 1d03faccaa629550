//! Interactive terminal backed by dialoguer prompts

use dialoguer::{Input, Password};
use teller_core::{CoreResult, Error, Terminal};

/// Terminal for an interactive TTY
///
/// PIN entry is hidden. dialoguer adds its own ": " suffix, so the trailing
/// colon of the session prompts is dropped.
pub struct DialoguerTerminal;

fn prompt_label(message: &str) -> &str {
    message.trim_end().trim_end_matches(':')
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Other(format!("Prompt failed: {}", e))
}

impl Terminal for DialoguerTerminal {
    fn prompt(&mut self, message: &str) -> CoreResult<String> {
        Input::<String>::new()
            .with_prompt(prompt_label(message))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn prompt_secret(&mut self, message: &str) -> CoreResult<String> {
        Password::new()
            .with_prompt(prompt_label(message))
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }

    fn say(&mut self, message: &str) -> CoreResult<()> {
        println!("{}", message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_label_drops_trailing_colon() {
        assert_eq!(prompt_label("Please enter four digit PIN: "), "Please enter four digit PIN");
        assert_eq!(prompt_label("Continue? (Y or N): "), "Continue? (Y or N)");
        assert_eq!(prompt_label("Plain"), "Plain");
    }
}
