use crate::{ErrorConstructRef, IfElseifElseRef, ParseError, PragmaConstructRef, Sequence};
use derive_more::IsVariant;
use hlsl_token::InclusionStyle;
use source_files::Occurrence;

/// A name as it was spelled in the source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub sequence: Sequence<'a>,
}

impl<'a> Symbol<'a> {
    pub fn occurrence(&self) -> Option<Occurrence> {
        self.sequence.occurrence()
    }
}

/// Source text kept verbatim, such as a line of shader code or the body of
/// a variable-like macro.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextLine<'a> {
    pub sequence: Sequence<'a>,
}

impl<'a> TextLine<'a> {
    pub fn text(&self) -> String {
        self.sequence.text()
    }
}

/// A use of a macro parameter inside a function-like macro body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubstitutionArgument<'a> {
    pub symbol: Symbol<'a>,
    pub parameter: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, IsVariant)]
pub enum SubstitutionText<'a> {
    Argument(SubstitutionArgument<'a>),
    Text(TextLine<'a>),
}

/// Body of a function-like macro, split into verbatim text and
/// parameter references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Substitution<'a> {
    pub sequence: Sequence<'a>,
    pub text: Vec<SubstitutionText<'a>>,
}

impl<'a> Substitution<'a> {
    pub fn arguments(&self) -> impl Iterator<Item = &SubstitutionArgument<'a>> {
        self.text.iter().filter_map(|text| match text {
            SubstitutionText::Argument(argument) => Some(argument),
            SubstitutionText::Text(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Undefinition<'a> {
    pub sequence: Sequence<'a>,
    pub name: Symbol<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable<'a> {
    pub sequence: Sequence<'a>,
    pub name: Symbol<'a>,
    pub substitution: TextLine<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function<'a> {
    pub sequence: Sequence<'a>,
    pub name: Symbol<'a>,
    pub parameters: Vec<Symbol<'a>>,
    pub substitution: Substitution<'a>,
    pub variadic: bool,
}

/// `#line <number> ["filename"]`
#[derive(Clone, Debug, PartialEq)]
pub struct ForceLine<'a> {
    pub sequence: Sequence<'a>,
    pub number: i64,
    pub filename: Option<String>,
}

/// `#include`, recorded but never resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Inclusion<'a> {
    pub sequence: Sequence<'a>,
    pub path: String,
    pub style: InclusionStyle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block<'a> {
    pub sequence: Sequence<'a>,
    pub statements: Vec<Statement<'a>>,
}

#[derive(Clone, Debug, PartialEq, IsVariant)]
pub enum Statement<'a> {
    /// Where a known macro would be expanded
    Symbol(Symbol<'a>),
    TextLine(TextLine<'a>),
    Undefinition(Undefinition<'a>),
    Variable(Variable<'a>),
    Function(Function<'a>),
    ForceLine(ForceLine<'a>),
    IfElseifElse(IfElseifElseRef<'a>),
    Inclusion(Inclusion<'a>),
    PragmaConstruct(PragmaConstructRef<'a>),
    ErrorConstruct(ErrorConstructRef<'a>),
    ParserError(ParseError),
}
