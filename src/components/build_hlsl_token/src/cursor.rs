use source_files::Occurrence;

pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

pub fn is_inline_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_line_terminator(c)
}

pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Read head over the source text that keeps the position of the next
/// unread character.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    processed_line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            processed_line: 1,
            column: 1,
        }
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Text consumed since byte offset `start`.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.offset]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_nth(&self, index: usize) -> Option<char> {
        self.rest().chars().nth(index)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Zero-width occurrence at the current position.
    pub fn here(&self) -> Occurrence {
        Occurrence {
            offset: self.offset,
            offset_after: self.offset,
            processed_line: self.processed_line,
            line: self.line,
            column: self.column,
        }
    }

    /// Text consumed since `start`, along with its occurrence.
    pub fn since(&self, start: Occurrence) -> (Occurrence, &'a str) {
        (start.to(self.offset), &self.text[start.offset..self.offset])
    }

    /// Consumes one character. A CRLF pair is consumed as a single line
    /// terminator.
    pub fn advance(&mut self) -> Option<char> {
        self.advance_line(false)
    }

    /// Consumes a line terminator that a backslash splices onto the
    /// previous line.
    pub fn advance_spliced(&mut self) -> Option<char> {
        self.advance_line(true)
    }

    fn advance_line(&mut self, spliced: bool) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();

        if is_line_terminator(c) {
            if c == '\r' && self.peek() == Some('\n') {
                self.offset += 1;
            }

            self.line += 1;
            self.column = 1;

            if !spliced {
                self.processed_line += 1;
            }
        } else {
            self.column += 1;
        }

        Some(c)
    }

    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let mut count = 0;

        while self.peek().is_some_and(&predicate) {
            self.advance();
            count += 1;
        }

        count
    }

    /// Advances past `sequence` if the remaining text starts with it.
    pub fn eat(&mut self, sequence: &str) -> bool {
        if !self.starts_with(sequence) {
            return false;
        }

        for _ in sequence.chars() {
            self.advance();
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_is_one_terminator() {
        let mut cursor = Cursor::new("a\r\nb");
        cursor.advance();
        assert_eq!(cursor.advance(), Some('\r'));

        let here = cursor.here();
        assert_eq!((here.offset, here.line, here.column), (3, 2, 1));
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn spliced_lines_keep_processed_line() {
        let mut cursor = Cursor::new("\\\nx\ny");
        cursor.advance();
        cursor.advance_spliced();
        cursor.advance();
        cursor.advance();

        let here = cursor.here();
        assert_eq!(here.line, 3);
        assert_eq!(here.processed_line, 2);
    }
}
