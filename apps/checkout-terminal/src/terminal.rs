//! Line-oriented operator terminal.
//!
//! [`TerminalNotifier`] is the [`NotificationPort`] of the terminal app and
//! also the only reader of operator input, so prompts, notices and
//! confirmations never interleave.

use std::io::{self, BufRead, Write};

use checkout_core::NotificationPort;
use tracing::warn;

/// Operator I/O over any reader/writer pair (stdin/stdout in production).
#[derive(Debug)]
pub struct TerminalNotifier<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalNotifier<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalNotifier { input, output }
    }

    /// Prints `prompt` and reads one line without its line ending.
    ///
    /// Returns `Ok(None)` at end of input. Bytes that are not UTF-8 are
    /// replaced with U+FFFD.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Writes one block of text followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn notice(&mut self, label: &str, message: &str) {
        let text = format!("{label}: {message}");
        if let Err(e) = self.say(&text) {
            warn!(error = %e, "Could not show notice");
        }
    }
}

impl<R: BufRead, W: Write> NotificationPort for TerminalNotifier<R, W> {
    fn show_info(&mut self, message: &str) {
        self.notice("Info", message);
    }

    fn show_warning(&mut self, message: &str) {
        self.notice("Warning", message);
    }

    fn show_error(&mut self, message: &str) {
        self.notice("Error", message);
    }

    /// Only `y` or `yes` (any case) confirms; end of input declines.
    fn confirm(&mut self, question: &str) -> bool {
        match self.prompt(&format!("{question} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terminal(input: &str) -> TerminalNotifier<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalNotifier::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(term: &TerminalNotifier<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(term.output().clone()).unwrap()
    }

    #[test]
    fn test_prompt_reads_lines() {
        let mut term = terminal("Milk\r\n2.50\n");
        assert_eq!(term.prompt("Name: ").unwrap().as_deref(), Some("Milk"));
        assert_eq!(term.prompt("Price: ").unwrap().as_deref(), Some("2.50"));
        assert_eq!(term.prompt("Quantity: ").unwrap(), None);
        assert!(printed(&term).starts_with("Name: Price: Quantity: "));
    }

    #[test]
    fn test_prompt_decodes_invalid_utf8_lossily() {
        let mut term =
            TerminalNotifier::new(Cursor::new(b"Caf\xe9\r\n2.50\n".to_vec()), Vec::new());
        assert_eq!(term.prompt("Name: ").unwrap().as_deref(), Some("Caf\u{FFFD}"));
        assert_eq!(term.prompt("Price: ").unwrap().as_deref(), Some("2.50"));
    }

    #[test]
    fn test_confirm_answers() {
        let mut term = terminal("y\nYES\nn\n\nmaybe\n");
        assert!(term.confirm("Finish?"));
        assert!(term.confirm("Finish?"));
        assert!(!term.confirm("Finish?"));
        assert!(!term.confirm("Finish?"));
        assert!(!term.confirm("Finish?"));
        // End of input declines
        assert!(!term.confirm("Finish?"));
        assert!(printed(&term).contains("Finish? [y/N] "));
    }

    #[test]
    fn test_notices_are_labelled() {
        let mut term = terminal("");
        term.show_info("Sale #00000001 completed\nTotal: $9.90");
        term.show_warning("No products in current sale");
        term.show_error("Invalid price value");

        let out = printed(&term);
        assert!(out.contains("Info: Sale #00000001 completed\nTotal: $9.90\n"));
        assert!(out.contains("Warning: No products in current sale\n"));
        assert!(out.contains("Error: Invalid price value\n"));
    }
}
