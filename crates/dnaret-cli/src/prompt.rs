//! Reading the target file name from the user
//!
//! A terminal gets an `inquire` prompt; piped stdin is read line by line so
//! the tool stays scriptable.

use crate::error::{CliError, Result};
use inquire::InquireError;
use std::io::{BufRead, Write};

/// Source of one line of user input
pub trait LineSource {
    /// Show `message` and return the raw line; end of input yields `""`
    fn read_line(&mut self, message: &str) -> Result<String>;
}

/// Plain line reader over any buffered input
pub struct ReaderSource<R> {
    reader: R,
    echo: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, echo: true }
    }

    /// Do not print the prompt message
    pub fn quiet(reader: R) -> Self {
        Self {
            reader,
            echo: false,
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, message: &str) -> Result<String> {
        if self.echo {
            let mut stdout = std::io::stdout();
            write!(stdout, "{} ", message)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line)
    }
}

/// Interactive terminal prompt
pub struct TerminalSource;

impl LineSource for TerminalSource {
    fn read_line(&mut self, message: &str) -> Result<String> {
        match inquire::Text::new(message).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(String::new())
            }
            Err(e) => Err(CliError::Prompt(e.to_string())),
        }
    }
}

/// Pick the line source matching how stdin is attached
pub fn stdin_source() -> Box<dyn LineSource> {
    if atty::is(atty::Stream::Stdin) {
        Box::new(TerminalSource)
    } else {
        Box::new(ReaderSource::new(std::io::stdin().lock()))
    }
}
