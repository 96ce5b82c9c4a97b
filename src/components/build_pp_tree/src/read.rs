use hlsl_token::{Token, TokenKind};
use pp_tree::{ParseError, ParseErrorKind, Sequence};
use source_files::Occurrence;

/// Index-based read head over a lexed token slice.
pub struct ReadHead<'a> {
    tokens: &'a [Token<'a>],
    index: usize,
}

impl<'a> ReadHead<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.tokens.len());
    }

    pub fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.index)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub fn next(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    pub fn next_if(&mut self, kind: TokenKind) -> Option<&'a Token<'a>> {
        if self.peek_kind() == Some(kind) {
            self.next()
        } else {
            None
        }
    }

    /// Occurrence of the next token, or the end of the last one.
    pub fn here(&self) -> Occurrence {
        match (self.peek(), self.tokens.last()) {
            (Some(token), _) => token.occurrence,
            (None, Some(last)) => last.occurrence.end(),
            (None, None) => Occurrence::start(),
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token<'a>, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.index += 1;
                Ok(token)
            }
            found => Err(ParseErrorKind::Expected {
                expected: kind.to_string(),
                found: found.map_or_else(|| "end of input".into(), |token| token.to_string()),
            }
            .at(self.here())),
        }
    }

    /// Skips whitespace, spliced line breaks and comments, staying on the
    /// current line.
    pub fn skip_line_trivia(&mut self) {
        while self
            .peek_kind()
            .is_some_and(|kind| kind.is_trivia() && kind != TokenKind::Newline)
        {
            self.index += 1;
        }
    }

    pub fn tokens(&self) -> &'a [Token<'a>] {
        self.tokens
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a [Token<'a>] {
        let end = end.min(self.tokens.len());
        &self.tokens[start.min(end)..end]
    }

    /// Tokens read since `start`.
    pub fn since(&self, start: usize) -> Sequence<'a> {
        Sequence::new(self.slice(start, self.index))
    }

    /// Reads the rest of a directive line through its statement end,
    /// returning the body without surrounding trivia.
    pub fn read_body(&mut self) -> Result<Sequence<'a>, ParseError> {
        let start = self.index;

        let end = self.tokens[start..]
            .iter()
            .position(|token| token.kind == TokenKind::PreprocessorStatementEnd)
            .map(|offset| start + offset)
            .ok_or_else(|| {
                ParseErrorKind::Expected {
                    expected: TokenKind::PreprocessorStatementEnd.to_string(),
                    found: "end of input".into(),
                }
                .at(self.here())
            })?;

        self.index = end + 1;
        Ok(Sequence::new(trim_trivia(&self.tokens[start..end])))
    }

    /// Moves past the rest of the current line after a failed directive.
    pub fn skip_rest_of_line(&mut self) {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::PreprocessorStatementEnd => {
                    self.index += 1;
                    return;
                }
                TokenKind::Newline | TokenKind::StreamEnd => return,
                _ => self.index += 1,
            }
        }
    }
}

pub fn trim_trivia<'a>(tokens: &'a [Token<'a>]) -> &'a [Token<'a>] {
    let start = tokens
        .iter()
        .position(|token| !token.kind.is_trivia())
        .unwrap_or(tokens.len());

    let end = tokens
        .iter()
        .rposition(|token| !token.kind.is_trivia())
        .map_or(start, |index| index + 1);

    &tokens[start..end]
}

/// Every comment must be a begin, text, end triple of matching style.
pub fn check_comments(tokens: &[Token]) -> Result<(), ParseError> {
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        let expected_end = match token.kind {
            TokenKind::LineCommentBegin => TokenKind::LineCommentEnd,
            TokenKind::BlockCommentBegin => TokenKind::BlockCommentEnd,
            TokenKind::CommentText | TokenKind::LineCommentEnd | TokenKind::BlockCommentEnd => {
                return Err(ParseErrorKind::MalformedComment.at(token.occurrence));
            }
            _ => {
                index += 1;
                continue;
            }
        };

        let text = tokens.get(index + 1).map(|token| token.kind);
        let end = tokens.get(index + 2).map(|token| token.kind);

        if text != Some(TokenKind::CommentText) || end != Some(expected_end) {
            return Err(ParseErrorKind::MalformedComment.at(token.occurrence));
        }

        index += 3;
    }

    Ok(())
}
