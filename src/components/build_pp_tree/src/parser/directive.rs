use super::Parser;
use diagnostics::{ErrorDiagnostic, NoteDiagnostic, Severity, WarningDiagnostic};
use hlsl_token::{InclusionStyle, Keyword, Token, TokenKind};
use itertools::Itertools;
use pp_tree::{
    ErrorConstruct, ForceLine, Inclusion, MatrixPacking, ParseError, ParseErrorKind, Pragma,
    PragmaConstruct, Sequence, Statement,
};
use source_files::Occurrence;

impl<'a, 'd> Parser<'a, 'd> {
    /// `#include "path"` or `#include <path>`, recorded but not opened.
    pub(super) fn parse_include(
        &mut self,
        start: usize,
        keyword: &'a Token<'a>,
    ) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        self.input.skip_line_trivia();

        let path = self
            .parse_string()
            .ok_or_else(|| ParseErrorKind::ExpectedIncludePath.at(self.input.here()))?;

        let style = keyword.inclusion_style().unwrap_or(InclusionStyle::Quote);
        let rest = self.input.read_body()?;

        if !self.disabled {
            self.warn_extra_tokens("#include", rest);
        }

        Ok(Statement::Inclusion(Inclusion {
            sequence: self.input.since(start),
            path,
            style,
        }))
    }

    /// Reads a string literal triple under the read head.
    fn parse_string(&mut self) -> Option<String> {
        let start = self.input.index();

        let value = self
            .input
            .next_if(TokenKind::StringLiteralBegin)
            .and_then(|_| self.input.next_if(TokenKind::StringLiteral))
            .and_then(|token| token.string().map(str::to_string))
            .filter(|_| self.input.next_if(TokenKind::StringLiteralEnd).is_some());

        if value.is_none() {
            self.input.seek(start);
        }

        value
    }

    /// `#line number ["filename"]`
    pub(super) fn parse_line(&mut self, start: usize) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        self.input.skip_line_trivia();

        let occurrence = self.input.here();

        let number = self
            .input
            .peek()
            .filter(|token| token.kind.is_integer())
            .and_then(|token| token.integer())
            .filter(|number| *number > 0)
            .ok_or_else(|| ParseErrorKind::ExpectedLineNumber.at(occurrence))?;

        self.input.next();
        self.input.skip_line_trivia();

        let filename = self.parse_string();
        let rest = self.input.read_body()?;

        if !self.disabled {
            self.warn_extra_tokens("#line", rest);
        }

        Ok(Statement::ForceLine(ForceLine {
            sequence: self.input.since(start),
            number,
            filename,
        }))
    }

    pub(super) fn parse_pragma(&mut self, start: usize) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        self.input.skip_line_trivia();

        let occurrence = self.input.here();

        let token = match self.input.next() {
            Some(token) if token.kind.is_pragma() => token,
            found => {
                return Err(ParseErrorKind::Expected {
                    expected: "pragma name".into(),
                    found: found.map_or_else(|| "end of input".into(), |token| token.to_string()),
                }
                .at(occurrence));
            }
        };

        let arguments = self.input.read_body()?;

        let pragma = match token.kind {
            TokenKind::PragmaOnce => {
                if !self.disabled {
                    self.warn_extra_tokens("#pragma once", arguments);
                    self.once = true;
                }
                Pragma::Once
            }
            TokenKind::PragmaDef => Pragma::Def(arguments),
            TokenKind::PragmaPackMatrix => {
                Pragma::PackMatrix(parse_matrix_packing(arguments, token.occurrence)?)
            }
            TokenKind::PragmaWarning => Pragma::Warning(arguments),
            TokenKind::PragmaMessage => {
                let message = arguments
                    .significant()
                    .find(|token| token.kind == TokenKind::StringLiteral)
                    .and_then(|token| token.string())
                    .map(str::to_string);

                if !self.disabled {
                    self.diagnostics.push(NoteDiagnostic::new(
                        message.as_deref().unwrap_or_default(),
                        token.occurrence,
                    ));
                }

                Pragma::Message(message)
            }
            _ => {
                if !self.disabled {
                    self.diagnostics.push(WarningDiagnostic::new(
                        format!("Unknown pragma `{}`", token.lexeme),
                        token.occurrence,
                    ));
                }

                Pragma::Custom {
                    name: token.lexeme,
                    arguments,
                }
            }
        };

        let construct = self.tree.make_pragma(PragmaConstruct {
            sequence: self.input.since(start),
            pragma,
        });

        Ok(Statement::PragmaConstruct(construct))
    }

    /// `#error` and `#warning` report their text when reached, without
    /// stopping the pass.
    pub(super) fn parse_error_directive(
        &mut self,
        start: usize,
        keyword: &'a Token<'a>,
    ) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        let body = self.input.read_body()?;

        let text: String = body
            .tokens
            .iter()
            .filter(|token| token.kind == TokenKind::DirectiveText)
            .map(|token| token.lexeme)
            .collect();

        let severity = if keyword.kind == TokenKind::PreprocessorError {
            Severity::Error
        } else {
            Severity::Warning
        };

        if !self.disabled {
            let message = if text.is_empty() {
                format!("#{}", keyword.lexeme)
            } else {
                text.clone()
            };

            match severity {
                Severity::Error => self
                    .diagnostics
                    .push(ErrorDiagnostic::new(message, keyword.occurrence)),
                _ => self
                    .diagnostics
                    .push(WarningDiagnostic::new(message, keyword.occurrence)),
            }
        }

        let construct = self.tree.make_error(ErrorConstruct {
            sequence: self.input.since(start),
            severity,
            text,
        });

        Ok(Statement::ErrorConstruct(construct))
    }
}

/// `(row_major)` or `(column_major)`
fn parse_matrix_packing(
    arguments: Sequence,
    occurrence: Occurrence,
) -> Result<MatrixPacking, ParseError> {
    let kinds = arguments.significant().map(|token| token.kind).collect_vec();

    match kinds.as_slice() {
        [
            TokenKind::OpenParen,
            TokenKind::Keyword(Keyword::RowMajor),
            TokenKind::CloseParen,
        ] => Ok(MatrixPacking::RowMajor),
        [
            TokenKind::OpenParen,
            TokenKind::Keyword(Keyword::ColumnMajor),
            TokenKind::CloseParen,
        ] => Ok(MatrixPacking::ColumnMajor),
        _ => Err(ParseErrorKind::ExpectedMatrixPacking
            .at(arguments.occurrence().unwrap_or(occurrence))),
    }
}
