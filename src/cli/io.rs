//! Line-oriented terminal I/O for the interactive menu
//!
//! Every answer is trimmed of surrounding whitespace before it reaches
//! the storage layer.

use std::io::{BufRead, Write};

use super::errors::{CliError, CliResult};

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `message` without a newline and reads one trimmed line.
    ///
    /// Returns `InputClosed` at end of input.
    pub fn ask(&mut self, message: &str) -> CliResult<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::input_closed());
        }
        Ok(line.trim().to_string())
    }

    /// Asks a yes/no question; only `yes` (any case) confirms
    pub fn confirm(&mut self, message: &str) -> CliResult<bool> {
        Ok(self.ask(message)?.eq_ignore_ascii_case("yes"))
    }

    /// Writes one line
    pub fn say(&mut self, message: impl AsRef<str>) -> CliResult<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Consumes the prompter, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims() {
        let mut io = Prompter::new(Cursor::new("  contacts \n"), Vec::new());
        assert_eq!(io.ask("Name: ").unwrap(), "contacts");
        assert_eq!(io.into_output(), b"Name: ");
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut io = Prompter::new(Cursor::new(""), Vec::new());
        assert!(io.ask("? ").unwrap_err().is_input_closed());
    }

    #[test]
    fn test_confirm() {
        let mut io = Prompter::new(Cursor::new("YES\nno\ny\n"), Vec::new());
        assert!(io.confirm("? ").unwrap());
        assert!(!io.confirm("? ").unwrap());
        assert!(!io.confirm("? ").unwrap());
    }
}
