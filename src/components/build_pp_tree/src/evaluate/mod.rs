mod depleted;

use crate::expr::ExprParser;
use depleted::Depleted;
use log::trace;
use pp_tree::{
    BinaryOperator, Definition, Expression, ParseError, ParseErrorKind, ParseTree, SymbolTable,
    UnaryOperator,
};
use source_files::Occurrence;

/// Folds a conditional expression to an integer against the macros in
/// scope.
///
/// Arithmetic is on `i64` and wraps. Comparisons and logical operators
/// produce 0 or 1, and `&&`, `||` and `?:` only evaluate the operand they
/// need. Unknown names are 0.
pub struct Evaluator<'s, 'a> {
    symbols: &'s SymbolTable<'a>,
    depleted: Depleted<'a>,
}

impl<'s, 'a> Evaluator<'s, 'a> {
    pub fn new(symbols: &'s SymbolTable<'a>) -> Self {
        Self {
            symbols,
            depleted: Depleted::new(),
        }
    }

    pub fn is_true(
        &mut self,
        tree: &ParseTree<'a>,
        expression: &Expression<'a>,
    ) -> Result<bool, ParseError> {
        self.evaluate(tree, expression).map(|value| value != 0)
    }

    pub fn evaluate(
        &mut self,
        tree: &ParseTree<'a>,
        expression: &Expression<'a>,
    ) -> Result<i64, ParseError> {
        match expression {
            Expression::Integer(literal) | Expression::Char(literal) => Ok(literal.value),
            Expression::Boolean(literal) => Ok(literal.value as i64),
            Expression::Float(literal) => Err(cannot_evaluate(
                "floating point literal",
                literal.sequence.occurrence(),
            )),
            Expression::String(literal) => Err(cannot_evaluate(
                "string literal",
                literal.sequence.occurrence(),
            )),
            Expression::Defined(defined) => Ok(self.symbols.contains(defined.symbol.name) as i64),
            Expression::Symbol(symbol) => {
                let occurrence = symbol.occurrence().unwrap_or_default();
                self.evaluate_name(symbol.name, occurrence)
            }
            Expression::Unary(unary) => {
                let unary = &tree[*unary];
                let occurrence = unary.sequence.occurrence();

                match unary.operator {
                    UnaryOperator::Stringize => Err(cannot_evaluate("stringizing", occurrence)),
                    UnaryOperator::Charize => Err(cannot_evaluate("charizing", occurrence)),
                    operator => {
                        let value = self.evaluate(tree, &unary.operand)?;

                        Ok(match operator {
                            UnaryOperator::Not => (value == 0) as i64,
                            UnaryOperator::Negate => value.wrapping_neg(),
                            UnaryOperator::Complement => !value,
                            _ => value,
                        })
                    }
                }
            }
            Expression::Binary(binary) => {
                let binary = &tree[*binary];
                let occurrence = binary.sequence.occurrence();

                match binary.operator {
                    BinaryOperator::TokenPaste => Err(cannot_evaluate("token pasting", occurrence)),
                    BinaryOperator::LogicalAnd => Ok((self.is_true(tree, &binary.left)?
                        && self.is_true(tree, &binary.right)?)
                        as i64),
                    BinaryOperator::LogicalOr => Ok((self.is_true(tree, &binary.left)?
                        || self.is_true(tree, &binary.right)?)
                        as i64),
                    operator => {
                        let left = self.evaluate(tree, &binary.left)?;
                        let right = self.evaluate(tree, &binary.right)?;
                        arithmetic(operator, left, right)
                            .map_err(|kind| kind.at(occurrence.unwrap_or_default()))
                    }
                }
            }
            Expression::Ternary(ternary) => {
                let ternary = &tree[*ternary];

                if self.is_true(tree, &ternary.condition)? {
                    self.evaluate(tree, &ternary.when_true)
                } else {
                    self.evaluate(tree, &ternary.when_false)
                }
            }
            Expression::FunctionCall(call) => {
                let call = &tree[*call];
                let occurrence = call.sequence.occurrence().unwrap_or_default();

                match self.symbols.lookup(call.name.name) {
                    Some(Definition::Function(_)) => Err(ParseErrorKind::UnsupportedMacroCall(
                        call.name.name.into(),
                    )
                    .at(occurrence)),
                    _ => Err(ParseErrorKind::CannotEvaluate(format!(
                        "call to `{}`",
                        call.name.name
                    ))
                    .at(occurrence)),
                }
            }
            Expression::ParserError(_) => Ok(0),
        }
    }

    fn evaluate_name(&mut self, name: &'a str, occurrence: Occurrence) -> Result<i64, ParseError> {
        let variable = match self.symbols.lookup(name) {
            Some(Definition::Variable(variable)) if !self.depleted.contains(name) => variable,
            _ => return Ok(0),
        };

        trace!("expanding `{}` for evaluation", name);

        // Macro bodies are parsed on demand into a tree of their own
        let mut scratch = ParseTree::new();
        let body = ExprParser::parse(
            &mut scratch,
            variable.substitution.sequence.tokens,
            occurrence,
        )?;

        self.depleted.push(name);
        let value = self.evaluate(&scratch, &body);
        self.depleted.pop(name);
        value
    }
}

fn cannot_evaluate(what: &str, occurrence: Option<Occurrence>) -> ParseError {
    ParseErrorKind::CannotEvaluate(what.into()).at(occurrence.unwrap_or_default())
}

fn arithmetic(operator: BinaryOperator, left: i64, right: i64) -> Result<i64, ParseErrorKind> {
    Ok(match operator {
        BinaryOperator::Divide | BinaryOperator::Modulus if right == 0 => {
            return Err(ParseErrorKind::DivisionByZero);
        }
        BinaryOperator::Multiply => left.wrapping_mul(right),
        BinaryOperator::Divide => left.wrapping_div(right),
        BinaryOperator::Modulus => left.wrapping_rem(right),
        BinaryOperator::Add => left.wrapping_add(right),
        BinaryOperator::Subtract => left.wrapping_sub(right),
        BinaryOperator::LeftShift => left.wrapping_shl(right as u32),
        BinaryOperator::RightShift => left.wrapping_shr(right as u32),
        BinaryOperator::Less => (left < right) as i64,
        BinaryOperator::LessEqual => (left <= right) as i64,
        BinaryOperator::Greater => (left > right) as i64,
        BinaryOperator::GreaterEqual => (left >= right) as i64,
        BinaryOperator::Equal => (left == right) as i64,
        BinaryOperator::NotEqual => (left != right) as i64,
        BinaryOperator::BitAnd => left & right,
        BinaryOperator::BitXor => left ^ right,
        BinaryOperator::BitOr => left | right,
        BinaryOperator::LogicalAnd => (left != 0 && right != 0) as i64,
        BinaryOperator::LogicalOr => (left != 0 || right != 0) as i64,
        BinaryOperator::TokenPaste => {
            return Err(ParseErrorKind::CannotEvaluate("token pasting".into()));
        }
    })
}
