/*
    Constant expression reader for `#if` and `#elif`.

    Expressions are read from the significant tokens of a directive body
    using precedence climbing, with the levels taken from the operator
    table in `hlsl_token`. Nothing is expanded here, macro names stay
    symbols and are resolved when the condition is evaluated.
*/

use hlsl_token::{Token, TokenKind, TokenValue};
use look_ahead::LookAhead;
use pp_tree::{
    Binary, BinaryOperator, Defined, Expression, FunctionCall, Literal, ParseError,
    ParseErrorKind, ParseTree, Sequence, Symbol, Ternary, Unary, UnaryOperator,
};
use source_files::Occurrence;
use std::iter::Enumerate;

type Significant<'a> = std::iter::Filter<
    Enumerate<std::slice::Iter<'a, Token<'a>>>,
    fn(&(usize, &'a Token<'a>)) -> bool,
>;

pub struct ExprParser<'a, 't> {
    tokens: &'a [Token<'a>],
    input: LookAhead<Significant<'a>>,
    tree: &'t mut ParseTree<'a>,
    start_of_line: Occurrence,
    depth: usize,
}

/// Deepest nesting of parentheses and unary operators accepted in one
/// expression.
pub const MAX_NESTING: usize = 128;

fn is_significant(entry: &(usize, &Token)) -> bool {
    !entry.1.kind.is_trivia()
}

impl<'a, 't> ExprParser<'a, 't> {
    pub fn new(
        tree: &'t mut ParseTree<'a>,
        tokens: &'a [Token<'a>],
        start_of_line: Occurrence,
    ) -> Self {
        let significant: Significant<'a> = tokens
            .iter()
            .enumerate()
            .filter(is_significant as fn(&(usize, &'a Token<'a>)) -> bool);

        Self {
            tokens,
            input: LookAhead::new(significant),
            tree,
            start_of_line,
            depth: 0,
        }
    }

    /// Reads one complete expression spanning all of `tokens`.
    pub fn parse(
        tree: &'t mut ParseTree<'a>,
        tokens: &'a [Token<'a>],
        start_of_line: Occurrence,
    ) -> Result<Expression<'a>, ParseError> {
        let mut parser = Self::new(tree, tokens, start_of_line);
        let full_expr = parser.parse_expr()?;

        match parser.input.next() {
            None => Ok(full_expr),
            Some((_, token)) => Err(ParseErrorKind::ExpectedEndOfExpression.at(token.occurrence)),
        }
    }

    pub fn parse_expr(&mut self) -> Result<Expression<'a>, ParseError> {
        let primary = self.parse_expr_primary()?;
        self.parse_operator_expr(0, primary)
    }

    fn span(&self, first: usize, last: usize) -> Sequence<'a> {
        Sequence::new(&self.tokens[first..=last])
    }

    fn here(&mut self) -> Occurrence {
        let start_of_line = self.start_of_line;

        self.input
            .peek()
            .map_or(start_of_line, |(_, token)| token.occurrence)
    }

    fn parse_expr_primary(&mut self) -> Result<Expression<'a>, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseErrorKind::ExpressionTooDeep(MAX_NESTING).at(self.here()));
        }

        self.depth += 1;
        let primary = self.parse_expr_primary_inner();
        self.depth -= 1;
        primary
    }

    fn parse_expr_primary_inner(&mut self) -> Result<Expression<'a>, ParseError> {
        let Some((index, token)) = self.input.next() else {
            return Err(ParseErrorKind::ExpectedExpression.at(self.start_of_line));
        };

        if let Some(operator) = UnaryOperator::from_token(token.kind) {
            return self.parse_unary_operation(index, operator);
        }

        let literal = || Sequence::new(std::slice::from_ref(token));

        match (token.kind, &token.value) {
            (kind, Some(TokenValue::Integer(value))) if kind.is_integer() => {
                Ok(Expression::Integer(Literal {
                    value: *value,
                    sequence: literal(),
                }))
            }
            (TokenKind::FloatLiteral, Some(TokenValue::Float(value))) => {
                Ok(Expression::Float(Literal {
                    value: *value,
                    sequence: literal(),
                }))
            }
            (TokenKind::BooleanLiteral, Some(TokenValue::Bool(value))) => {
                Ok(Expression::Boolean(Literal {
                    value: *value,
                    sequence: literal(),
                }))
            }
            (TokenKind::StringLiteralBegin, _) => {
                let (value, last) = self.parse_quoted(index, TokenKind::StringLiteralEnd)?;

                Ok(Expression::String(Literal {
                    value: value.string().unwrap_or_default().to_string(),
                    sequence: self.span(index, last),
                }))
            }
            (TokenKind::CharLiteralBegin, _) => {
                let (value, last) = self.parse_quoted(index, TokenKind::CharLiteralEnd)?;

                Ok(Expression::Char(Literal {
                    value: value.integer().unwrap_or_default(),
                    sequence: self.span(index, last),
                }))
            }
            (TokenKind::OpenParen, _) => {
                let inner = self.parse_expr()?;
                self.eat(TokenKind::CloseParen)?;
                Ok(inner)
            }
            _ => match token.name() {
                Some("defined") => self.parse_defined(index),
                Some(name) => {
                    let symbol = Symbol {
                        name,
                        sequence: literal(),
                    };

                    if self.peek_kind() == Some(TokenKind::OpenParen) {
                        self.parse_call(index, symbol)
                    } else {
                        Ok(Expression::Symbol(symbol))
                    }
                }
                None => Err(ParseErrorKind::ExpectedExpression.at(token.occurrence)),
            },
        }
    }

    fn parse_unary_operation(
        &mut self,
        index: usize,
        operator: UnaryOperator,
    ) -> Result<Expression<'a>, ParseError> {
        let operand = self.parse_expr_primary()?;

        let unary = self.tree.make_unary(Unary {
            operator,
            operand,
            sequence: self.span(index, index),
        });

        Ok(Expression::Unary(unary))
    }

    /// Reads the value and closing token of a string or character triple.
    fn parse_quoted(
        &mut self,
        begin: usize,
        end: TokenKind,
    ) -> Result<(&'a Token<'a>, usize), ParseError> {
        let occurrence = self.tokens[begin].occurrence;

        let value = match self.input.next() {
            Some((_, token))
                if matches!(token.kind, TokenKind::StringLiteral | TokenKind::CharLiteral) =>
            {
                token
            }
            _ => return Err(ParseErrorKind::ExpectedExpression.at(occurrence)),
        };

        let last = self.eat(end)?;
        Ok((value, last))
    }

    /// `defined NAME` or `defined ( NAME )`
    fn parse_defined(&mut self, index: usize) -> Result<Expression<'a>, ParseError> {
        let parenthesized = self.peek_kind() == Some(TokenKind::OpenParen);

        if parenthesized {
            self.input.next();
        }

        let occurrence = self.here();

        let (name_index, name) = match self.input.next() {
            Some((name_index, token)) => match token.name() {
                Some(name) => (name_index, name),
                None => return Err(ParseErrorKind::ExpectedMacroName.at(token.occurrence)),
            },
            None => return Err(ParseErrorKind::ExpectedMacroName.at(occurrence)),
        };

        let last = if parenthesized {
            self.eat(TokenKind::CloseParen)?
        } else {
            name_index
        };

        Ok(Expression::Defined(Defined {
            symbol: Symbol {
                name,
                sequence: self.span(name_index, name_index),
            },
            sequence: self.span(index, last),
        }))
    }

    fn parse_call(&mut self, index: usize, name: Symbol<'a>) -> Result<Expression<'a>, ParseError> {
        self.eat(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();

        if self.peek_kind() != Some(TokenKind::CloseParen) {
            loop {
                arguments.push(self.parse_expr()?);

                if self.peek_kind() == Some(TokenKind::Comma) {
                    self.input.next();
                } else {
                    break;
                }
            }
        }

        let last = self.eat(TokenKind::CloseParen)?;

        let call = self.tree.make_call(FunctionCall {
            name,
            arguments,
            sequence: self.span(index, last),
        });

        Ok(Expression::FunctionCall(call))
    }

    fn parse_ternary(&mut self, condition: Expression<'a>) -> Result<Expression<'a>, ParseError> {
        let question = self.eat(TokenKind::Question)?;
        let when_true = self.parse_expr()?;
        self.eat(TokenKind::Colon)?;
        let when_false = self.parse_expr()?;

        let ternary = self.tree.make_ternary(Ternary {
            condition,
            when_true,
            when_false,
            sequence: self.span(question, question),
        });

        Ok(Expression::Ternary(ternary))
    }

    fn parse_operator_expr(
        &mut self,
        precedence: usize,
        expr: Expression<'a>,
    ) -> Result<Expression<'a>, ParseError> {
        let mut lhs = expr;

        loop {
            let Some(kind) = self.peek_kind() else {
                return Ok(lhs);
            };

            let next_precedence = precedence_of(kind);

            if is_terminating_token(kind)
                || (next_precedence + is_right_associative(kind) as usize) < precedence
            {
                return Ok(lhs);
            }

            if kind == TokenKind::Question {
                lhs = self.parse_ternary(lhs)?;
                continue;
            }

            let Some(binary_operator) = BinaryOperator::from_token(kind) else {
                return Ok(lhs);
            };

            lhs = self.parse_math(lhs, binary_operator, next_precedence)?;
        }
    }

    fn parse_math(
        &mut self,
        lhs: Expression<'a>,
        operator: BinaryOperator,
        operator_precedence: usize,
    ) -> Result<Expression<'a>, ParseError> {
        // Operator token
        let index = self.input.next().map_or(0, |(index, _)| index);

        let rhs = self.parse_math_rhs(operator_precedence)?;

        let binary = self.tree.make_binary(Binary {
            operator,
            left: lhs,
            right: rhs,
            sequence: self.span(index, index),
        });

        Ok(Expression::Binary(binary))
    }

    fn parse_math_rhs(&mut self, operator_precedence: usize) -> Result<Expression<'a>, ParseError> {
        let rhs = self.parse_expr_primary()?;

        let Some(kind) = self.peek_kind() else {
            return Ok(rhs);
        };

        let next_precedence = precedence_of(kind);

        if (next_precedence + is_right_associative(kind) as usize) >= operator_precedence {
            self.parse_operator_expr(operator_precedence + 1, rhs)
        } else {
            Ok(rhs)
        }
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.input.peek().map(|(_, token)| token.kind)
    }

    /// Consumes a token of `kind`, returning its index.
    fn eat(&mut self, kind: TokenKind) -> Result<usize, ParseError> {
        match self.input.peek().copied() {
            Some((index, token)) if token.kind == kind => {
                self.input.next();
                Ok(index)
            }
            found => Err(ParseErrorKind::Expected {
                expected: kind.to_string(),
                found: found.map_or_else(|| "end of line".into(), |(_, token)| token.to_string()),
            }
            .at(found.map_or(self.start_of_line, |(_, token)| token.occurrence))),
        }
    }
}

fn precedence_of(kind: TokenKind) -> usize {
    kind.precedence()
        .map_or(0, |precedence| precedence.level as usize)
}

fn is_terminating_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comma | TokenKind::CloseParen | TokenKind::Colon
    )
}

fn is_right_associative(kind: TokenKind) -> bool {
    kind.precedence()
        .is_some_and(|precedence| precedence.is_right_associative())
}
