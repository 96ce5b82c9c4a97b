use crate::{Keyword, TokenKind};

/// Words that may follow a line-leading `#`.
///
/// The storage keywords are listed here as well as in the language keyword
/// table, since both readings are lexically possible.
pub const DIRECTIVES: &[(&str, TokenKind)] = &[
    ("define", TokenKind::PreprocessorDefine),
    ("undef", TokenKind::PreprocessorUndef),
    ("if", TokenKind::PreprocessorIf),
    ("elif", TokenKind::PreprocessorElif),
    ("ifdef", TokenKind::PreprocessorIfdef),
    ("ifndef", TokenKind::PreprocessorIfndef),
    ("elifdef", TokenKind::PreprocessorElifdef),
    ("elifndef", TokenKind::PreprocessorElifndef),
    ("else", TokenKind::PreprocessorElse),
    ("endif", TokenKind::PreprocessorEndif),
    ("include", TokenKind::PreprocessorInclude),
    ("line", TokenKind::PreprocessorLine),
    ("pragma", TokenKind::PreprocessorPragma),
    ("error", TokenKind::PreprocessorError),
    ("warning", TokenKind::PreprocessorWarning),
    ("packoffset", TokenKind::Keyword(Keyword::PackOffset)),
    ("row_major", TokenKind::Keyword(Keyword::RowMajor)),
    ("column_major", TokenKind::Keyword(Keyword::ColumnMajor)),
];

/// Words recognised directly after `#pragma`.
pub const PRAGMAS: &[(&str, TokenKind)] = &[
    ("once", TokenKind::PragmaOnce),
    ("def", TokenKind::PragmaDef),
    ("pack_matrix", TokenKind::PragmaPackMatrix),
    ("warning", TokenKind::PragmaWarning),
    ("message", TokenKind::PragmaMessage),
];

pub fn directive_kind(word: &str) -> Option<TokenKind> {
    DIRECTIVES
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, kind)| *kind)
}

/// Unrecognised pragmas are not an error, they become `PragmaCustom`.
pub fn pragma_kind(word: &str) -> TokenKind {
    PRAGMAS
        .iter()
        .find(|(name, _)| *name == word)
        .map_or(TokenKind::PragmaCustom, |(_, kind)| *kind)
}
