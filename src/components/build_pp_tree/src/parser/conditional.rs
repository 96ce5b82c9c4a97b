use super::{Parser, directive_name};
use crate::{evaluate::Evaluator, expr::ExprParser};
use diagnostics::ErrorDiagnostic;
use hlsl_token::TokenKind;
use log::trace;
use pp_tree::{
    Block, Conditional, ConditionalBlock, ConditionalOrigin, Expression, IfElseifElse, ParseError,
    ParseErrorKind, Sequence, Statement, Symbol,
};
use source_files::Occurrence;

impl<'a, 'd> Parser<'a, 'd> {
    /// An `#if`-class directive through its matching `#endif`.
    pub(super) fn parse_conditional(&mut self, start: usize) -> Result<Statement<'a>, ParseError> {
        let outer_disabled = self.disabled;
        let mut construct = IfElseifElse::default();

        loop {
            let condition = self.parse_condition()?;
            let occurrence = condition.sequence.occurrence().unwrap_or_default();

            let taken = construct.active_branch().is_some();

            let holds = if outer_disabled || taken || !self.options.evaluate_conditions {
                false
            } else {
                self.condition_holds(&condition)?
            };

            trace!("{} at {} holds: {}", condition.origin, occurrence, holds);

            let branch = self.tree.make_block(Block::default());

            construct
                .push(ConditionalBlock { condition, branch })
                .map_err(|kind| kind.at(occurrence))?;

            if holds {
                construct.active = Some(construct.branches.len() - 1);
            }

            self.disabled = outer_disabled || (self.options.evaluate_conditions && !holds);

            let branch_start = self.input.index();
            let statements = self.parse_statements(true);
            self.disabled = outer_disabled;

            self.tree[branch] = Block {
                sequence: self.input.since(branch_start),
                statements: statements?,
            };

            match self.peek_directive() {
                Some(TokenKind::PreprocessorEndif) => {
                    self.parse_endif()?;
                    break;
                }
                Some(
                    TokenKind::PreprocessorElif
                    | TokenKind::PreprocessorElifdef
                    | TokenKind::PreprocessorElifndef
                    | TokenKind::PreprocessorElse,
                ) => continue,
                _ => return Err(ParseErrorKind::ExpectedEndif.at(self.input.here())),
            }
        }

        construct.sequence = self.input.since(start);
        Ok(Statement::IfElseifElse(
            self.tree.make_if_elseif_else(construct),
        ))
    }

    /// One conditional directive line, from its `#` through its statement end.
    fn parse_condition(&mut self) -> Result<Conditional<'a>, ParseError> {
        let start = self.input.index();
        self.input.expect(TokenKind::PreprocessorHash)?;
        self.input.skip_line_trivia();

        let occurrence = self.input.here();
        let keyword = self.input.next();

        let origin = match keyword.map(|token| token.kind) {
            Some(TokenKind::PreprocessorIf) => ConditionalOrigin::If,
            Some(TokenKind::PreprocessorIfdef) => ConditionalOrigin::IfDef,
            Some(TokenKind::PreprocessorIfndef) => ConditionalOrigin::IfNDef,
            Some(TokenKind::PreprocessorElif) => ConditionalOrigin::ElseIf,
            Some(TokenKind::PreprocessorElifdef) => ConditionalOrigin::ElseIfDef,
            Some(TokenKind::PreprocessorElifndef) => ConditionalOrigin::ElseIfNDef,
            Some(TokenKind::PreprocessorElse) => ConditionalOrigin::Else,
            _ => {
                return Err(ParseErrorKind::Expected {
                    expected: "conditional directive".into(),
                    found: keyword.map_or_else(|| "end of input".into(), |token| token.to_string()),
                }
                .at(occurrence));
            }
        };

        self.input.next_if(TokenKind::PreprocessorBlockBegin);
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        let body = self.input.read_body()?;

        let expression = match origin {
            ConditionalOrigin::Else => {
                if !self.disabled {
                    self.warn_extra_tokens("#else", body);
                }
                None
            }
            _ if origin.tests_definition() => {
                Some(self.recover_expression(parse_definition_test(body, occurrence))?)
            }
            _ => {
                let expression = ExprParser::parse(&mut self.tree, body.tokens, occurrence);
                Some(self.recover_expression(expression)?)
            }
        };

        Ok(Conditional {
            sequence: self.input.since(start),
            origin,
            expression,
        })
    }

    /// In recovery mode a malformed condition becomes an error expression.
    fn recover_expression(
        &mut self,
        expression: Result<Expression<'a>, ParseError>,
    ) -> Result<Expression<'a>, ParseError> {
        match expression {
            Err(error) if self.options.recover => {
                self.diagnostics
                    .push(ErrorDiagnostic::new(&error.kind, error.occurrence));
                Ok(Expression::ParserError(error))
            }
            result => result,
        }
    }

    fn condition_holds(&mut self, condition: &Conditional<'a>) -> Result<bool, ParseError> {
        let Some(expression) = &condition.expression else {
            return Ok(condition.origin.is_else());
        };

        if condition.origin.tests_definition() {
            let defined = match expression {
                Expression::Symbol(symbol) => self.symbols.contains(symbol.name),
                _ => false,
            };

            return Ok(defined != condition.origin.is_negated());
        }

        match Evaluator::new(&self.symbols).is_true(&self.tree, expression) {
            Err(error) if self.options.recover => {
                self.diagnostics
                    .push(ErrorDiagnostic::new(&error.kind, error.occurrence));
                Ok(false)
            }
            result => result,
        }
    }

    fn parse_endif(&mut self) -> Result<(), ParseError> {
        self.input.expect(TokenKind::PreprocessorHash)?;
        self.input.skip_line_trivia();
        self.input.expect(TokenKind::PreprocessorEndif)?;
        self.input.next_if(TokenKind::PreprocessorBlockEnd);
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;

        let rest = self.input.read_body()?;

        if !self.disabled {
            self.warn_extra_tokens(directive_name(TokenKind::PreprocessorEndif), rest);
        }

        Ok(())
    }
}

/// The single name after `#ifdef`, `#ifndef`, `#elifdef` or `#elifndef`.
fn parse_definition_test<'a>(
    body: Sequence<'a>,
    occurrence: Occurrence,
) -> Result<Expression<'a>, ParseError> {
    let mut significant = body.significant();

    let token = significant
        .next()
        .ok_or_else(|| ParseErrorKind::ExpectedMacroName.at(occurrence))?;

    let name = token
        .name()
        .ok_or_else(|| ParseErrorKind::ExpectedMacroName.at(token.occurrence))?;

    if let Some(extra) = significant.next() {
        return Err(ParseErrorKind::ExpectedEndOfExpression.at(extra.occurrence));
    }

    Ok(Expression::Symbol(Symbol {
        name,
        sequence: Sequence::new(std::slice::from_ref(token)),
    }))
}
