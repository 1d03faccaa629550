//! Terminal port - the operator-facing text boundary of an ATM session

use crate::domain::result::Result;

/// Line-oriented operator interface
///
/// The session controller only talks to the operator through this trait, so
/// the same state machine runs against a real console, an interactive
/// prompt library, or a scripted transcript in tests.
pub trait Terminal {
    /// Show `message` and read one line of operator input
    ///
    /// The returned line has its trailing newline removed. Implementations
    /// return `Error::InputClosed` when no more input is available.
    fn prompt(&mut self, message: &str) -> Result<String>;

    /// Read a secret such as a PIN
    ///
    /// Defaults to a normal prompt; interactive implementations should hide
    /// the echoed characters.
    fn prompt_secret(&mut self, message: &str) -> Result<String> {
        self.prompt(message)
    }

    /// Show one line of output to the operator
    fn say(&mut self, message: &str) -> Result<()>;
}
