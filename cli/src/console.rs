use std::io::{BufRead, Write};

use carpark_core::*;

use crate::input::{parse_command, parse_confirm, parse_selection};
use crate::render::{frame, notice_text};

/// Clears the screen and homes the cursor.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Line-oriented console over any reader and writer.
///
/// Notices are held back until the next frame or prompt, so clearing the screen for a new
/// frame never swallows a message.
pub(crate) struct TerminalConsole<R, W> {
    input: R,
    output: W,
    clear: bool,
    carrying: bool,
    pending: Vec<String>,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub(crate) fn new(input: R, output: W, clear: bool) -> Self {
        Self {
            input,
            output,
            clear,
            carrying: false,
            pending: Vec::new(),
        }
    }

    /// Writes out anything still pending once the session is over.
    pub(crate) fn finish(&mut self) -> anyhow::Result<()> {
        self.flush_pending()?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    fn flush_pending(&mut self) -> anyhow::Result<()> {
        for message in self.pending.drain(..) {
            writeln!(self.output, "{}", message)?;
        }
        Ok(())
    }

    /// Shows `prompt` and reads one line, `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.flush_pending()?;
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("End of input, quitting");
            writeln!(self.output)?;
            return Ok(None);
        }
        log::trace!("Read {:?}", line.trim_end());
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    type Error = anyhow::Error;

    fn render(&mut self, view: &LotView) -> anyhow::Result<()> {
        if self.clear {
            write!(self.output, "{}", CLEAR)?;
        }
        write!(self.output, "{}", frame(view))?;
        self.carrying = view.selected.is_some();
        self.flush_pending()
    }

    fn notify(&mut self, notice: Notice) -> anyhow::Result<()> {
        log::debug!("{:?}", notice);
        self.pending.push(notice_text(notice));
        Ok(())
    }

    fn read_selection(&mut self) -> anyhow::Result<Reply<Coord2>> {
        let line = self.prompt(
            "Enter the row and column of the car you want to select (e.g., 2 3), or Q to quit: ",
        )?;
        Ok(line.map_or(Reply::Quit, |line| parse_selection(&line)))
    }

    fn read_command(&mut self) -> anyhow::Result<Reply<Command>> {
        let prompt = if self.carrying {
            "Move the car using W (up), S (down), A (left), D (right), R to remove, Q to quit: "
        } else {
            "Walk using W (up), S (down), A (left), D (right), Q to quit: "
        };
        let line = self.prompt(prompt)?;
        Ok(line.map_or(Reply::Quit, |line| parse_command(&line)))
    }

    fn confirm_advance(&mut self, _cleared: Level) -> anyhow::Result<Reply<()>> {
        let line = self.prompt("Do you want to continue to the next level? (Y to continue, Q to quit): ")?;
        Ok(line.map_or(Reply::Quit, |line| parse_confirm(&line)))
    }
}
