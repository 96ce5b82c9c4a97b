use crate::{
    cursor::{
        Cursor, is_identifier_continue, is_identifier_start, is_inline_whitespace,
        is_line_terminator,
    },
    error::{LexError, LexErrorKind},
    escape::unescape,
    number::lex_number,
    options::LexerOptions,
};
use hlsl_token::{
    InclusionStyle, Keyword, Token, TokenKind, TokenValue, directive_kind, pragma_kind,
};
use log::trace;
use source_files::Occurrence;

const PUNCTUATORS: &[(&str, TokenKind)] = &[
    ("...", TokenKind::Ellipsis),
    ("<<=", TokenKind::LeftShiftAssign),
    (">>=", TokenKind::RightShiftAssign),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    ("==", TokenKind::EqualTo),
    ("!=", TokenKind::NotEqualTo),
    ("<=", TokenKind::LessThanOrEqualTo),
    (">=", TokenKind::GreaterThanOrEqualTo),
    ("&&", TokenKind::LogicalAnd),
    ("||", TokenKind::LogicalOr),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("+=", TokenKind::AddAssign),
    ("-=", TokenKind::SubtractAssign),
    ("*=", TokenKind::MultiplyAssign),
    ("/=", TokenKind::DivideAssign),
    ("%=", TokenKind::ModulusAssign),
    ("&=", TokenKind::AndAssign),
    ("|=", TokenKind::OrAssign),
    ("^=", TokenKind::XorAssign),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Assign),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("!", TokenKind::Bang),
];

/// Single pass over a source text producing the full token sequence,
/// trivia included.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    options: LexerOptions,
    tokens: Vec<Token<'a>>,

    // Inside a directive line, between its statement markers
    in_macro: bool,

    // A backslash was the last thing before a line terminator
    escaped: bool,

    // Nothing but whitespace so far on the current line
    line_whitespace: bool,

    last_significant: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(text),
            options,
            tokens: Vec::new(),
            in_macro: false,
            escaped: false,
            line_whitespace: true,
            last_significant: None,
        }
    }

    pub fn lex(mut self) -> Result<Vec<Token<'a>>, LexError> {
        self.marker(TokenKind::StreamBegin);

        while let Some(c) = self.cursor.peek() {
            self.lex_next(c)?;
        }

        if self.in_macro {
            self.close_macro();
        }

        self.marker(TokenKind::StreamEnd);
        Ok(self.tokens)
    }

    fn push(&mut self, token: Token<'a>) {
        if !token.kind.is_trivia() {
            self.last_significant = Some(token.kind);
        }

        self.tokens.push(token);
    }

    /// Emits everything consumed since `start` as a single token.
    fn emit(&mut self, kind: TokenKind, start: Occurrence) {
        let (occurrence, lexeme) = self.cursor.since(start);
        self.push(kind.at(occurrence, lexeme));
    }

    fn emit_with(&mut self, kind: TokenKind, start: Occurrence, value: TokenValue) {
        let (occurrence, lexeme) = self.cursor.since(start);
        self.push(kind.at(occurrence, lexeme).with_value(value));
    }

    fn marker(&mut self, kind: TokenKind) {
        let here = self.cursor.here();
        self.push(kind.at(here, ""));
    }

    fn open_macro(&mut self) {
        self.marker(TokenKind::PreprocessorStatementBegin);
        self.in_macro = true;
    }

    fn close_macro(&mut self) {
        self.marker(TokenKind::PreprocessorStatementEnd);
        self.in_macro = false;
    }

    fn lex_next(&mut self, c: char) -> Result<(), LexError> {
        let start = self.cursor.here();

        if is_line_terminator(c) {
            if self.escaped {
                self.escaped = false;
                self.cursor.advance_spliced();
                self.emit(TokenKind::EscapedNewline, start);
                return Ok(());
            }

            if self.in_macro {
                self.close_macro();
            }

            self.cursor.advance();
            self.emit(TokenKind::Newline, start);
            self.line_whitespace = true;
            return Ok(());
        }

        self.escaped = false;

        if is_inline_whitespace(c) {
            self.lex_whitespace();
            return Ok(());
        }

        let at_line_start = self.line_whitespace;
        self.line_whitespace = false;

        match c {
            '\\' => {
                self.cursor.advance();
                self.emit(TokenKind::Backslash, start);
                self.escaped = self.cursor.peek().is_some_and(is_line_terminator);
            }
            '#' if at_line_start && !self.in_macro => self.lex_directive(start)?,
            '#' => {
                let kind = if self.cursor.eat("##") {
                    TokenKind::TokenPasting
                } else if self.cursor.eat("#@") {
                    TokenKind::Charizing
                } else {
                    self.cursor.advance();
                    TokenKind::Hash
                };

                self.emit(kind, start);
            }
            '/' if self.cursor.starts_with("//") => self.lex_line_comment(start),
            '/' if self.cursor.starts_with("/*") => self.lex_block_comment(start)?,
            '"' if self.follows_raw_prefix() => self.lex_raw_string(start)?,
            '"' => self.lex_string(start)?,
            '\'' => self.lex_char(start)?,
            '0'..='9' => self.lex_number(start)?,
            '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_number(start)?
            }
            '-' if self.starts_negative_number() => self.lex_number(start)?,
            c if is_identifier_start(c) => self.lex_identifier(start),
            _ => self.lex_punctuator(start),
        }

        Ok(())
    }

    fn lex_whitespace(&mut self) {
        let start = self.cursor.here();

        if self.cursor.advance_while(is_inline_whitespace) > 0 {
            self.emit(TokenKind::Whitespace, start);
        }
    }

    /// A `-` only begins a literal where no value precedes it.
    fn starts_negative_number(&self) -> bool {
        let digit_follows = match self.cursor.peek_nth(1) {
            Some('.') => self.cursor.peek_nth(2),
            other => other,
        }
        .is_some_and(|c| c.is_ascii_digit());

        digit_follows
            && !self
                .last_significant
                .is_some_and(|kind| kind.ends_value())
    }

    fn follows_raw_prefix(&self) -> bool {
        self.tokens.last().is_some_and(|token| {
            token.kind == TokenKind::Identifier
                && token.lexeme == "R"
                && token.occurrence.offset_after == self.cursor.offset()
        })
    }

    fn lex_number(&mut self, start: Occurrence) -> Result<(), LexError> {
        let (kind, value) = lex_number(&mut self.cursor)?;
        self.emit_with(kind, start, value);
        Ok(())
    }

    fn lex_identifier(&mut self, start: Occurrence) {
        self.cursor.advance_while(is_identifier_continue);
        let (_, word) = self.cursor.since(start);

        match word {
            "true" | "false" => {
                self.emit_with(
                    TokenKind::BooleanLiteral,
                    start,
                    TokenValue::Bool(word == "true"),
                );
            }
            _ => {
                let kind = Keyword::from_name(word).map_or(TokenKind::Identifier, TokenKind::Keyword);
                self.emit(kind, start);
            }
        }
    }

    fn lex_punctuator(&mut self, start: Occurrence) {
        let kind = PUNCTUATORS
            .iter()
            .find(|(text, _)| self.cursor.starts_with(text))
            .map(|(text, kind)| (*text, *kind));

        match kind {
            Some((text, kind)) => {
                self.cursor.eat(text);
                self.emit(kind, start);
            }
            None => {
                self.cursor.advance();
                self.emit(TokenKind::Unknown, start);
            }
        }
    }

    fn lex_line_comment(&mut self, start: Occurrence) {
        self.cursor.eat("//");
        self.emit(TokenKind::LineCommentBegin, start);

        let text_start = self.cursor.here();
        self.cursor.advance_while(|c| !is_line_terminator(c));
        self.emit(TokenKind::CommentText, text_start);

        self.marker(TokenKind::LineCommentEnd);
    }

    fn lex_block_comment(&mut self, start: Occurrence) -> Result<(), LexError> {
        self.cursor.eat("/*");
        self.emit(TokenKind::BlockCommentBegin, start);

        let text_start = self.cursor.here();

        while !self.cursor.starts_with("*/") {
            if self.cursor.advance().is_none() {
                return Err(LexErrorKind::UnterminatedBlockComment.at(start.to(start.offset + 2)));
            }
        }

        self.emit(TokenKind::CommentText, text_start);

        let end_start = self.cursor.here();
        self.cursor.eat("*/");
        self.emit(TokenKind::BlockCommentEnd, end_start);
        Ok(())
    }

    /// Consumes up to the unescaped `close`, returning its decoded content.
    fn lex_quoted(
        &mut self,
        start: Occurrence,
        close: char,
        unterminated: LexErrorKind,
        multi_line: bool,
    ) -> Result<(Occurrence, String), LexError> {
        let content_start = self.cursor.here();

        loop {
            match self.cursor.peek() {
                None => return Err(unterminated.at(start)),
                Some(c) if c == close => break,
                Some('\\') => {
                    self.cursor.advance();

                    match self.cursor.peek() {
                        Some(c) if is_line_terminator(c) => {
                            self.cursor.advance_spliced();
                        }
                        Some(_) => {
                            self.cursor.advance();
                        }
                        None => return Err(unterminated.at(start)),
                    }
                }
                Some(c) if is_line_terminator(c) && !multi_line => {
                    return Err(unterminated.at(start));
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }

        let (occurrence, content) = self.cursor.since(content_start);
        let value = unescape(content).map_err(|kind| kind.at(occurrence))?;
        Ok((content_start, value))
    }

    fn lex_string(&mut self, start: Occurrence) -> Result<(), LexError> {
        self.cursor.advance();
        self.emit(TokenKind::StringLiteralBegin, start);

        let (content_start, value) = self.lex_quoted(
            start,
            '"',
            LexErrorKind::UnterminatedStringLiteral,
            self.options.multi_line_strings,
        )?;
        self.emit_with(TokenKind::StringLiteral, content_start, TokenValue::String(value));

        let end_start = self.cursor.here();
        self.cursor.advance();
        self.emit(TokenKind::StringLiteralEnd, end_start);
        Ok(())
    }

    /// `R"delimiter( ... )delimiter"`, taken verbatim.
    fn lex_raw_string(&mut self, start: Occurrence) -> Result<(), LexError> {
        self.cursor.advance();

        let delimiter_start = self.cursor.offset();
        self.cursor.advance_while(|c| {
            !matches!(c, '(' | ')' | '\\' | '"') && !c.is_whitespace()
        });
        let delimiter = self.cursor.slice_from(delimiter_start);

        if !self.cursor.eat("(") || delimiter.len() > 16 {
            let (occurrence, _) = self.cursor.since(start);
            return Err(LexErrorKind::BadRawStringDelimiter.at(occurrence));
        }

        self.emit(TokenKind::StringLiteralBegin, start);

        let closing = format!("){}\"", delimiter);
        let content_start = self.cursor.here();

        while !self.cursor.starts_with(&closing) {
            if self.cursor.advance().is_none() {
                return Err(LexErrorKind::UnterminatedRawString.at(start));
            }
        }

        let (_, content) = self.cursor.since(content_start);
        self.emit_with(
            TokenKind::StringLiteral,
            content_start,
            TokenValue::String(content.into()),
        );

        let end_start = self.cursor.here();
        self.cursor.eat(&closing);
        self.emit(TokenKind::StringLiteralEnd, end_start);
        Ok(())
    }

    fn lex_char(&mut self, start: Occurrence) -> Result<(), LexError> {
        self.cursor.advance();
        self.emit(TokenKind::CharLiteralBegin, start);

        let (content_start, value) =
            self.lex_quoted(start, '\'', LexErrorKind::UnterminatedCharLiteral, false)?;

        if value.is_empty() {
            let (occurrence, _) = self.cursor.since(start);
            return Err(LexErrorKind::EmptyCharLiteral.at(occurrence.to(occurrence.offset_after + 1)));
        }

        // Multi-character constants pack one byte per character
        let mut chars = value.chars();

        let value = if let (Some(c), None) = (chars.next(), chars.next()) {
            c as i64
        } else {
            value
                .chars()
                .fold(0i64, |packed, c| (packed << 8) | (c as i64 & 0xFF))
        };

        self.emit_with(TokenKind::CharLiteral, content_start, TokenValue::Character(value));

        let end_start = self.cursor.here();
        self.cursor.advance();
        self.emit(TokenKind::CharLiteralEnd, end_start);
        Ok(())
    }

    fn lex_directive(&mut self, start: Occurrence) -> Result<(), LexError> {
        self.cursor.advance();
        self.emit(TokenKind::PreprocessorHash, start);
        self.lex_whitespace();

        let word_start = self.cursor.here();
        self.cursor.advance_while(is_identifier_continue);
        let (word_occurrence, word) = self.cursor.since(word_start);

        if word.is_empty() {
            return Err(LexErrorKind::MissingDirective.at(start.to(start.offset + 1)));
        }

        let kind = directive_kind(word)
            .ok_or_else(|| LexErrorKind::UnknownDirective(word.into()).at(word_occurrence))?;

        trace!("directive `#{}` at {}", word, start);

        match kind {
            TokenKind::Keyword(_) => {
                self.emit(kind, word_start);
            }
            TokenKind::PreprocessorInclude => {
                let mut token = kind.at(word_occurrence, word);

                if let Some(style) = self.upcoming_inclusion_style() {
                    token = token.with_value(TokenValue::InclusionStyle(style));
                }

                self.push(token);
                self.open_macro();
                self.lex_whitespace();

                match self.cursor.peek() {
                    Some('<') => self.lex_include_path('>')?,
                    Some('"') => self.lex_include_path('"')?,
                    _ => (),
                }
            }
            TokenKind::PreprocessorIf | TokenKind::PreprocessorIfdef | TokenKind::PreprocessorIfndef => {
                self.emit(kind, word_start);
                self.marker(TokenKind::PreprocessorBlockBegin);
                self.open_macro();
            }
            TokenKind::PreprocessorEndif => {
                self.emit(kind, word_start);
                self.marker(TokenKind::PreprocessorBlockEnd);
                self.open_macro();
            }
            TokenKind::PreprocessorPragma => {
                self.emit(kind, word_start);
                self.open_macro();
                self.lex_whitespace();

                let pragma_start = self.cursor.here();
                self.cursor.advance_while(is_identifier_continue);
                let (_, pragma) = self.cursor.since(pragma_start);
                self.emit(pragma_kind(pragma), pragma_start);
            }
            TokenKind::PreprocessorError | TokenKind::PreprocessorWarning => {
                self.emit(kind, word_start);
                self.open_macro();
                self.lex_whitespace();
                self.lex_directive_text();
            }
            _ => {
                self.emit(kind, word_start);
                self.open_macro();
            }
        }

        Ok(())
    }

    fn upcoming_inclusion_style(&self) -> Option<InclusionStyle> {
        match self.cursor.rest().trim_start_matches(is_inline_whitespace).chars().next() {
            Some('"') => Some(InclusionStyle::Quote),
            Some('<') => Some(InclusionStyle::AngleBracket),
            _ => None,
        }
    }

    /// Include paths are taken verbatim, so backslashes in them are
    /// directory separators rather than escapes.
    fn lex_include_path(&mut self, close: char) -> Result<(), LexError> {
        let start = self.cursor.here();
        self.cursor.advance();
        self.emit(TokenKind::StringLiteralBegin, start);

        let path_start = self.cursor.here();
        self.cursor
            .advance_while(|c| c != close && !is_line_terminator(c));

        if self.cursor.peek() != Some(close) {
            return Err(LexErrorKind::UnterminatedIncludePath.at(start));
        }

        let (_, path) = self.cursor.since(path_start);
        self.emit_with(TokenKind::StringLiteral, path_start, TokenValue::String(path.into()));

        let end_start = self.cursor.here();
        self.cursor.advance();
        self.emit(TokenKind::StringLiteralEnd, end_start);
        Ok(())
    }

    /// Rest of an `#error` or `#warning` line, with trailing whitespace
    /// left as its own token. A backslash before the line terminator
    /// carries the text onto the next line.
    fn lex_directive_text(&mut self) {
        loop {
            let rest = self.cursor.rest();
            let line = &rest[..rest.find(is_line_terminator).unwrap_or(rest.len())];
            let spliced = line.len() < rest.len() && line.ends_with('\\');

            let text = if spliced {
                &line[..line.len() - 1]
            } else {
                line.trim_end_matches(is_inline_whitespace)
            };

            if !text.is_empty() {
                let start = self.cursor.here();

                while self.cursor.offset() < start.offset + text.len() {
                    self.cursor.advance();
                }

                self.emit(TokenKind::DirectiveText, start);
            }

            if !spliced {
                return;
            }

            let backslash = self.cursor.here();
            self.cursor.advance();
            self.emit(TokenKind::Backslash, backslash);

            let terminator = self.cursor.here();
            self.cursor.advance_spliced();
            self.emit(TokenKind::EscapedNewline, terminator);
        }
    }
}
