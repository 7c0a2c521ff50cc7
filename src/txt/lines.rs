use std::io;

/// Iterator-like reader over the lines of a text file that hold content.
///
/// Everything from the first `#` on a line is a comment. Comments and
/// surrounding whitespace are removed, and lines left empty are skipped, the
/// same way `numpy.loadtxt` treats them.
pub(crate) struct ContentLines<R> {
    reader: R,
    buf: String,
    line_number: usize,
}

impl<R: io::BufRead> ContentLines<R> {
    pub fn new(reader: R) -> Self {
        ContentLines {
            reader,
            buf: String::new(),
            line_number: 0,
        }
    }

    /// Returns the next line with content and its 1-based line number, or
    /// `None` at the end of the input.
    pub fn next_content(&mut self) -> io::Result<Option<(usize, &str)>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let end = self.buf.find('#').unwrap_or(self.buf.len());
            if !self.buf[..end].trim().is_empty() {
                return Ok(Some((self.line_number, self.buf[..end].trim())));
            }
        }
    }
}
