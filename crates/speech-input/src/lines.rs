use crate::{RecognizedSpeech, Result, SpeechSource};
use std::io::BufRead;

/// Reads one recognizer message per line.
///
/// Trailing `\n`/`\r\n` is stripped; everything else, including case and
/// inner whitespace, is passed through untouched. Blank lines are skipped.
pub struct LineSource<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> SpeechSource for LineSource<R> {
    fn next_event(&mut self) -> Result<Option<RecognizedSpeech>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }
            return Ok(Some(RecognizedSpeech::now(line)));
        }
    }

    fn name(&self) -> &str {
        "lines"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_lines_and_skips_blanks() -> Result<()> {
        let mut src = LineSource::new(Cursor::new("move forward\r\n\n  Half Speed \nstop"));
        let mut seen = Vec::new();
        while let Some(ev) = src.next_event()? {
            assert!(ev.ts.is_some());
            seen.push(ev.text);
        }
        assert_eq!(seen, vec!["move forward", "  Half Speed ", "stop"]);
        Ok(())
    }

    #[test]
    fn empty_input_ends_immediately() -> Result<()> {
        let mut src = LineSource::new(Cursor::new(""));
        assert!(src.next_event()?.is_none());
        Ok(())
    }
}
