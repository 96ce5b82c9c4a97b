use super::Parser;
use crate::options::RedefinitionPolicy;
use diagnostics::WarningDiagnostic;
use hlsl_token::{Token, TokenKind};
use log::debug;
use pp_tree::{
    Definition, Function, ParseError, ParseErrorKind, Sequence, Statement, Substitution,
    SubstitutionArgument, SubstitutionText, Symbol, TextLine, Undefinition, Variable,
};

impl<'a, 'd> Parser<'a, 'd> {
    /// `#define NAME body` or `#define NAME(parameters) body`, where the
    /// parameter list must touch the name.
    pub(super) fn parse_define(&mut self, start: usize) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        let name = self.parse_macro_name()?;

        let definition = if self.input.peek_kind() == Some(TokenKind::OpenParen) {
            Definition::Function(self.parse_function_macro(start, name)?)
        } else {
            let substitution = TextLine {
                sequence: self.input.read_body()?,
            };

            Definition::Variable(Variable {
                sequence: self.input.since(start),
                name,
                substitution,
            })
        };

        self.define(definition.clone())?;

        Ok(match definition {
            Definition::Variable(variable) => Statement::Variable(variable),
            Definition::Function(function) => Statement::Function(function),
        })
    }

    fn parse_macro_name(&mut self) -> Result<Symbol<'a>, ParseError> {
        self.input.skip_line_trivia();
        let occurrence = self.input.here();

        let token = self
            .input
            .next()
            .ok_or_else(|| ParseErrorKind::ExpectedMacroName.at(occurrence))?;

        let name = token
            .name()
            .ok_or_else(|| ParseErrorKind::ExpectedMacroName.at(token.occurrence))?;

        Ok(Symbol {
            name,
            sequence: Sequence::new(std::slice::from_ref(token)),
        })
    }

    fn parse_function_macro(
        &mut self,
        start: usize,
        name: Symbol<'a>,
    ) -> Result<Function<'a>, ParseError> {
        self.input.expect(TokenKind::OpenParen)?;

        let mut parameters: Vec<Symbol<'a>> = Vec::new();
        let mut variadic = false;

        loop {
            self.input.skip_line_trivia();
            let occurrence = self.input.here();

            let token = self
                .input
                .next()
                .ok_or_else(|| ParseErrorKind::ExpectedParameter.at(occurrence))?;

            match token.kind {
                TokenKind::CloseParen if parameters.is_empty() && !variadic => break,
                TokenKind::Ellipsis if !variadic => variadic = true,
                _ if variadic => {
                    return Err(ParseErrorKind::VariadicParameterMustBeLast.at(token.occurrence));
                }
                _ => {
                    let parameter = token
                        .name()
                        .ok_or_else(|| ParseErrorKind::ExpectedParameter.at(token.occurrence))?;

                    if parameters.iter().any(|existing| existing.name == parameter) {
                        return Err(ParseErrorKind::DuplicateParameter(parameter.into())
                            .at(token.occurrence));
                    }

                    parameters.push(Symbol {
                        name: parameter,
                        sequence: Sequence::new(std::slice::from_ref(token)),
                    });
                }
            }

            self.input.skip_line_trivia();

            match self.input.next() {
                Some(Token {
                    kind: TokenKind::Comma,
                    occurrence,
                    ..
                }) => {
                    if variadic {
                        return Err(ParseErrorKind::VariadicParameterMustBeLast.at(*occurrence));
                    }
                }
                Some(Token {
                    kind: TokenKind::CloseParen,
                    ..
                }) => break,
                found => {
                    return Err(ParseErrorKind::Expected {
                        expected: "`,` or `)`".into(),
                        found: found.map_or_else(|| "end of input".into(), |token| token.to_string()),
                    }
                    .at(found.map_or(occurrence, |token| token.occurrence)));
                }
            }
        }

        let body = self.input.read_body()?;
        let text = split_substitution(body, &parameters, variadic);

        Ok(Function {
            sequence: self.input.since(start),
            name,
            parameters,
            substitution: Substitution {
                sequence: body,
                text,
            },
            variadic,
        })
    }

    /// Registers a definition unless inside a disabled branch.
    fn define(&mut self, definition: Definition<'a>) -> Result<(), ParseError> {
        if self.disabled {
            return Ok(());
        }

        let name = *definition.name();
        let occurrence = name.occurrence().unwrap_or_default();
        debug!("#define {} at {}", name.name, occurrence);

        let Err(_) = self.symbols.insert(definition.clone()) else {
            return Ok(());
        };

        let identical = self
            .symbols
            .lookup(name.name)
            .is_some_and(|existing| existing.same_as(&definition));

        match self.options.redefinition {
            RedefinitionPolicy::ErrorOnDifferingBody if identical => Ok(()),
            _ => Err(ParseErrorKind::MacroRedefinition(name.name.into()).at(occurrence)),
        }
    }

    pub(super) fn parse_undef(&mut self, start: usize) -> Result<Statement<'a>, ParseError> {
        self.input.expect(TokenKind::PreprocessorStatementBegin)?;
        let name = self.parse_macro_name()?;
        let rest = self.input.read_body()?;
        let occurrence = name.occurrence().unwrap_or_default();

        if !self.disabled {
            self.warn_extra_tokens("#undef", rest);
            debug!("#undef {} at {}", name.name, occurrence);

            match self.symbols.remove(name.name) {
                0 => self.diagnostics.push(WarningDiagnostic::new(
                    format!("Macro `{}` is not defined", name.name),
                    occurrence,
                )),
                1 => (),
                count => {
                    return Err(ParseErrorKind::CorruptedSymbolTable {
                        name: name.name.into(),
                        count,
                    }
                    .at(occurrence));
                }
            }
        }

        Ok(Statement::Undefinition(Undefinition {
            sequence: self.input.since(start),
            name,
        }))
    }

    pub(super) fn warn_extra_tokens(&self, directive: &str, rest: Sequence<'a>) {
        if let Some(occurrence) = rest.occurrence() {
            self.diagnostics.push(WarningDiagnostic::new(
                format!("Extra tokens at end of `{}` directive", directive),
                occurrence,
            ));
        }
    }
}

/// Splits a macro body into verbatim runs and parameter references.
fn split_substitution<'a>(
    body: Sequence<'a>,
    parameters: &[Symbol<'a>],
    variadic: bool,
) -> Vec<SubstitutionText<'a>> {
    let tokens = body.tokens;
    let mut text = Vec::new();
    let mut run_start = 0;

    for (index, token) in tokens.iter().enumerate() {
        let parameter = token.name().and_then(|name| {
            if variadic && name == "__VA_ARGS__" {
                Some(parameters.len())
            } else {
                parameters
                    .iter()
                    .position(|parameter| parameter.name == name)
            }
        });

        let Some(parameter) = parameter else {
            continue;
        };

        if run_start < index {
            text.push(SubstitutionText::Text(TextLine {
                sequence: Sequence::new(&tokens[run_start..index]),
            }));
        }

        text.push(SubstitutionText::Argument(SubstitutionArgument {
            symbol: Symbol {
                name: token.lexeme,
                sequence: Sequence::new(&tokens[index..=index]),
            },
            parameter,
        }));

        run_start = index + 1;
    }

    if run_start < tokens.len() {
        text.push(SubstitutionText::Text(TextLine {
            sequence: Sequence::new(&tokens[run_start..]),
        }));
    }

    text
}
