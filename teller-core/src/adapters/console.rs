//! Console terminal - line-based operator I/O over any reader/writer pair

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use crate::domain::result::{Error, Result};
use crate::ports::Terminal;

/// Terminal backed by a buffered reader and a writer
///
/// Used for piped stdin and anywhere an interactive prompt library is not
/// available. Prompts are written without a trailing newline.
pub struct ConsoleTerminal<R, W> {
    input: R,
    output: W,
}

impl ConsoleTerminal<StdinLock<'static>, Stdout> {
    /// Terminal over the process stdin/stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleTerminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the terminal and return the writer (for inspecting output)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for ConsoleTerminal<R, W> {
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        Ok(trimmed.to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}
