use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::error::{AppError, Result};

pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Line-based terminal I/O. Input and output are generic so the menu can be
/// driven from scripted input in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
    pause: Duration,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), DEFAULT_PAUSE)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, pause: Duration) -> Self {
        Self {
            input,
            output,
            pause,
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line without its line ending. A closed input stream is an error,
    /// since every prompt in the program would otherwise spin forever.
    pub fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.read_line()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.output.flush()?;
        thread::sleep(self.pause);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Console<io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Console::new(io::Cursor::new(input.into_bytes()), Vec::new(), Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_line_strips_line_endings() {
        let mut console = Console::new(
            io::Cursor::new(b"first\r\nsecond\n".to_vec()),
            Vec::new(),
            Duration::ZERO,
        );
        assert_eq!(console.read_line().unwrap(), "first");
        assert_eq!(console.read_line().unwrap(), "second");
    }

    #[test]
    fn read_line_at_end_of_input_is_input_closed() {
        let mut console = scripted(&["only"]);
        console.read_line().unwrap();
        assert!(matches!(console.read_line(), Err(AppError::InputClosed)));
    }

    #[test]
    fn prompt_writes_text_before_reading() {
        let mut console = scripted(&["42"]);
        assert_eq!(console.prompt("Number: ").unwrap(), "42");
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Number: ");
    }
}
