mod conditional;
mod define;
mod directive;

use crate::{
    ParsedUnit,
    options::ParserOptions,
    read::{ReadHead, check_comments, trim_trivia},
};
use diagnostics::{Diagnostics, ErrorDiagnostic};
use hlsl_token::{Token, TokenKind};
use pp_tree::{
    Block, BlockRef, Definition, ParseError, ParseErrorKind, ParseTree, Sequence, Statement,
    Symbol, SymbolTable, TextLine,
};

/// Recursive-descent reader from a token sequence to a [`ParseTree`].
pub struct Parser<'a, 'd> {
    input: ReadHead<'a>,
    tree: ParseTree<'a>,
    symbols: SymbolTable<'a>,
    diagnostics: &'d Diagnostics<'d>,
    options: ParserOptions,

    // Inside a conditional branch that was not taken
    disabled: bool,

    // Nothing significant read on the current line yet
    line_whitespace: bool,

    once: bool,
}

impl<'a, 'd> Parser<'a, 'd> {
    pub fn new(
        tokens: &'a [Token<'a>],
        diagnostics: &'d Diagnostics<'d>,
        options: ParserOptions,
    ) -> Self {
        Self {
            input: ReadHead::new(tokens),
            tree: ParseTree::new(),
            symbols: SymbolTable::new(),
            diagnostics,
            options,
            disabled: false,
            line_whitespace: true,
            once: false,
        }
    }

    /// Starts from macros defined by an earlier pass.
    pub fn with_symbols(self, symbols: SymbolTable<'a>) -> Self {
        Self { symbols, ..self }
    }

    pub fn parse(mut self) -> Result<ParsedUnit<'a>, ParseError> {
        self.input.expect(TokenKind::StreamBegin).map_err(|error| {
            ParseErrorKind::ExpectedStreamBegin.at(error.occurrence)
        })?;

        check_comments(self.input.tokens())?;

        let root = self.tree.make_block(Block::default());
        let start = self.input.index();
        let statements = self.parse_statements(false)?;
        self.tree[root] = Block {
            sequence: self.input.since(start),
            statements,
        };

        self.input.expect(TokenKind::StreamEnd).map_err(|error| {
            ParseErrorKind::ExpectedStreamEnd.at(error.occurrence)
        })?;

        if let Some(token) = self.input.peek() {
            return Err(ParseErrorKind::ExpectedStreamEnd.at(token.occurrence));
        }

        Ok(ParsedUnit {
            tree: self.tree,
            root,
            symbols: self.symbols,
            once: self.once,
        })
    }

    /// Reads statements until the end of input, or in a conditional branch
    /// until the directive that continues or closes it.
    fn parse_statements(&mut self, nested: bool) -> Result<Vec<Statement<'a>>, ParseError> {
        let mut statements = Vec::new();

        loop {
            self.skip_blank();

            match self.input.peek_kind() {
                None | Some(TokenKind::StreamEnd) => break,
                Some(TokenKind::PreprocessorHash) => {
                    if !self.line_whitespace {
                        return Err(ParseErrorKind::DirectiveNotAtLineStart.at(self.input.here()));
                    }

                    match self.peek_directive() {
                        Some(kind) if continues_conditional(kind) => {
                            if nested {
                                break;
                            }

                            let error = ParseErrorKind::UnmatchedConditional(directive_name(kind))
                                .at(self.input.here());
                            statements.push(self.recover(error)?);
                        }
                        _ => {
                            match self.parse_directive() {
                                Ok(statement) => statements.push(statement),
                                Err(error) => statements.push(self.recover(error)?),
                            }
                        }
                    }

                    self.line_whitespace = true;
                }
                Some(_) => self.parse_text_line(&mut statements)?,
            }
        }

        Ok(statements)
    }

    /// In recovery mode, reports `error` and skips the rest of its line.
    fn recover(&mut self, error: ParseError) -> Result<Statement<'a>, ParseError> {
        if !self.options.recover {
            return Err(error);
        }

        self.diagnostics
            .push(ErrorDiagnostic::new(&error.kind, error.occurrence));
        self.input.skip_rest_of_line();
        Ok(Statement::ParserError(error))
    }

    /// Skips trivia between statements, including whole blank lines.
    fn skip_blank(&mut self) {
        while let Some(kind) = self.input.peek_kind() {
            if kind == TokenKind::Newline {
                self.line_whitespace = true;
            } else if !kind.is_trivia() {
                return;
            }

            self.input.next();
        }
    }

    /// Kind of the directive keyword following the `#` under the read head.
    fn peek_directive(&self) -> Option<TokenKind> {
        let hash = self.input.index();
        let after_hash = self.input.slice(hash + 1, hash + 4);

        after_hash
            .iter()
            .find(|token| !token.kind.is_whitespace())
            .map(|token| token.kind)
    }

    fn parse_directive(&mut self) -> Result<Statement<'a>, ParseError> {
        let start = self.input.index();
        self.input.expect(TokenKind::PreprocessorHash)?;
        self.input.skip_line_trivia();

        let keyword = self
            .input
            .next()
            .ok_or_else(|| {
                ParseErrorKind::Expected {
                    expected: "directive name".into(),
                    found: "end of input".into(),
                }
                .at(self.input.here())
            })?;

        match keyword.kind {
            TokenKind::PreprocessorDefine => self.parse_define(start),
            TokenKind::PreprocessorUndef => self.parse_undef(start),
            TokenKind::PreprocessorIf
            | TokenKind::PreprocessorIfdef
            | TokenKind::PreprocessorIfndef => {
                self.input.seek(start);
                self.parse_conditional(start)
            }
            TokenKind::PreprocessorInclude => self.parse_include(start, keyword),
            TokenKind::PreprocessorLine => self.parse_line(start),
            TokenKind::PreprocessorPragma => self.parse_pragma(start),
            TokenKind::PreprocessorError | TokenKind::PreprocessorWarning => {
                self.parse_error_directive(start, keyword)
            }
            TokenKind::Keyword(_) => {
                Err(ParseErrorKind::UnexpectedDirective(keyword.lexeme.into()).at(keyword.occurrence))
            }
            _ => Err(ParseErrorKind::StrayToken(keyword.to_string()).at(keyword.occurrence)),
        }
    }

    /// Reads source text up to the end of its line, splitting out the
    /// names of macros in scope as substitution points.
    fn parse_text_line(&mut self, statements: &mut Vec<Statement<'a>>) -> Result<(), ParseError> {
        let start = self.input.index();

        while let Some(token) = self.input.peek() {
            match token.kind {
                TokenKind::Newline | TokenKind::StreamEnd | TokenKind::PreprocessorHash => break,
                kind if is_directive_structure(kind) => {
                    return Err(ParseErrorKind::StrayToken(token.to_string()).at(token.occurrence));
                }
                _ => {
                    self.input.next();
                }
            }
        }

        self.line_whitespace = false;

        let line = trim_trivia(self.input.slice(start, self.input.index()));

        if line.is_empty() {
            return Ok(());
        }

        if self.disabled {
            statements.push(Statement::TextLine(TextLine {
                sequence: Sequence::new(line),
            }));
            return Ok(());
        }

        let mut run_start = 0;

        for (index, token) in line.iter().enumerate() {
            let Some(name) = token.name() else {
                continue;
            };

            let substitutes = match self.symbols.lookup(name) {
                Some(Definition::Variable(_)) => true,
                Some(Definition::Function(_)) => line[index + 1..]
                    .iter()
                    .find(|token| !token.kind.is_trivia())
                    .is_some_and(|token| token.kind == TokenKind::OpenParen),
                None => false,
            };

            if !substitutes {
                continue;
            }

            push_text(statements, &line[run_start..index]);

            statements.push(Statement::Symbol(Symbol {
                name,
                sequence: Sequence::new(&line[index..=index]),
            }));

            run_start = index + 1;
        }

        push_text(statements, &line[run_start..]);
        Ok(())
    }
}

fn push_text<'a>(statements: &mut Vec<Statement<'a>>, tokens: &'a [Token<'a>]) {
    if tokens.iter().any(|token| !token.kind.is_trivia()) {
        statements.push(Statement::TextLine(TextLine {
            sequence: Sequence::new(tokens),
        }));
    }
}

fn continues_conditional(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::PreprocessorElif
            | TokenKind::PreprocessorElifdef
            | TokenKind::PreprocessorElifndef
            | TokenKind::PreprocessorElse
            | TokenKind::PreprocessorEndif
    )
}

fn directive_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::PreprocessorElif => "#elif",
        TokenKind::PreprocessorElifdef => "#elifdef",
        TokenKind::PreprocessorElifndef => "#elifndef",
        TokenKind::PreprocessorElse => "#else",
        _ => "#endif",
    }
}

/// Tokens the lexer only places around directive lines.
fn is_directive_structure(kind: TokenKind) -> bool {
    kind.is_directive()
        || kind.is_pragma()
        || matches!(
            kind,
            TokenKind::PreprocessorStatementBegin
                | TokenKind::PreprocessorStatementEnd
                | TokenKind::PreprocessorBlockBegin
                | TokenKind::PreprocessorBlockEnd
                | TokenKind::DirectiveText
        )
}
