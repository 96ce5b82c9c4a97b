/*
    ==================  components/build_hlsl_token/src/lib.rs  ==================
    Lexes shader source into a complete, position-stamped token sequence
    ---------------------------------------------------------------------------
*/

mod cursor;
mod error;
mod escape;
mod lexer;
mod number;
mod options;

pub use error::{LexError, LexErrorKind};
pub use escape::unescape;
use hlsl_token::Token;
use lexer::Lexer;
use log::debug;
pub use options::LexerOptions;
use source_files::SourceUnit;

/// Lexes a source unit with default options.
///
/// The result always starts with `StreamBegin` and ends with `StreamEnd`,
/// and concatenating every lexeme reproduces the source text exactly.
pub fn lex(unit: &SourceUnit) -> Result<Vec<Token<'_>>, LexError> {
    lex_with(unit, &LexerOptions::default())
}

pub fn lex_with<'a>(
    unit: &'a SourceUnit,
    options: &LexerOptions,
) -> Result<Vec<Token<'a>>, LexError> {
    let tokens = Lexer::new(unit.text(), options.clone()).lex()?;
    debug!("lexed {} tokens from {}", tokens.len(), unit.name());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlsl_token::{InclusionStyle, Keyword, TokenKind, TokenValue};
    use indoc::indoc;
    use itertools::Itertools;

    fn unit(text: &str) -> SourceUnit {
        SourceUnit::new("test.hlsl", text)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens
            .iter()
            .map(|token| token.kind)
            .filter(|kind| !kind.is_whitespace())
            .collect()
    }

    #[test]
    fn empty_input_is_bracketed() {
        let source = unit("");
        let tokens = lex(&source).unwrap();

        assert_eq!(kinds(&tokens), [TokenKind::StreamBegin, TokenKind::StreamEnd]);
    }

    const CORPUS: [&str; 5] = [
        indoc! {r#"
            #include "common.hlsli"
            #define SCALE(x) ((x) * 2.0f) // doubled
            #pragma pack_matrix(row_major)
            /* multi
               line */
            cbuffer Globals : register(b0) {
                float4x4 world;
            };
            #if defined(SCALE) && VERSION >= 0x10
            static const int a = -1, b = a - 1;
            #endif
            char c = 'a'; string s = R"x(raw "text")x";
        "#},
        "#ifdef WIN\r\n#include \"shaders\\win\\common.hlsli\"\r\n#else\r\n#include <shaders/common.hlsli>\r\n#endif\r\n",
        "#define LERP(a, b, t) \\\n    ((a) + ((b) - (a)) * (t))\n#error first \\\r\n second \\\n third\nfloat x = LERP(0, 1, 0.5);\n",
        "\r\n  #  define  EMPTY \\\r\n\r\n#warning   \n#line 12 \"dir\\new.hlsli\"\n#pragma once",
        "a\r\nb \\\n c\n\n  #define X 1\n#if X \\\n  && !defined(Y)\n#undef X\n#endif\n",
    ];

    #[test]
    fn lexemes_reproduce_source() {
        for text in CORPUS {
            let source = unit(text);
            let tokens = lex(&source).unwrap();

            assert_eq!(tokens.iter().map(|token| token.lexeme).join(""), text);
            assert_eq!(tokens.first().map(|token| token.kind), Some(TokenKind::StreamBegin));
            assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::StreamEnd));
        }
    }

    #[test]
    fn positions_never_move_backwards() {
        for text in CORPUS {
            let source = unit(text);
            let tokens = lex(&source).unwrap();

            for (previous, next) in tokens.iter().tuple_windows() {
                assert!(
                    previous.occurrence.offset_after <= next.occurrence.offset,
                    "{:?} then {:?} in {:?}",
                    previous,
                    next,
                    text
                );
                assert!(previous.occurrence.line <= next.occurrence.line);
                assert!(previous.occurrence.processed_line <= next.occurrence.processed_line);
                assert!(next.occurrence.processed_line <= next.occurrence.line);
            }
        }

        let source = unit(CORPUS[4]);
        let tokens = lex(&source).unwrap();
        let define = tokens
            .iter()
            .find(|token| token.kind == TokenKind::PreprocessorDefine)
            .unwrap();
        assert_eq!((define.occurrence.line, define.occurrence.column), (5, 4));
        assert_eq!(define.occurrence.processed_line, 4);
    }

    #[test]
    fn escaped_newlines_continue_a_macro() {
        let source = unit("#define song do\\\nre\\\nmi");
        let tokens = lex(&source).unwrap();

        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::StreamBegin,
                TokenKind::PreprocessorHash,
                TokenKind::PreprocessorDefine,
                TokenKind::PreprocessorStatementBegin,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Do),
                TokenKind::Backslash,
                TokenKind::EscapedNewline,
                TokenKind::Identifier,
                TokenKind::Backslash,
                TokenKind::EscapedNewline,
                TokenKind::Identifier,
                TokenKind::PreprocessorStatementEnd,
                TokenKind::StreamEnd,
            ]
        );

        let mi = &tokens[tokens.len() - 3];
        assert_eq!(mi.lexeme, "mi");
        assert_eq!(mi.occurrence.line, 3);
        assert_eq!(mi.occurrence.processed_line, 1);
    }

    #[test]
    fn unterminated_block_comment() {
        let source = unit("/* unterminated");
        let error = lex(&source).unwrap_err();

        assert_eq!(error.kind, LexErrorKind::UnterminatedBlockComment);
        assert_eq!(error.occurrence.offset, 0);
    }

    #[test]
    fn comments_are_bracketed() {
        let source = unit("// note\n/**/");
        let tokens = lex(&source).unwrap();

        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::StreamBegin,
                TokenKind::LineCommentBegin,
                TokenKind::CommentText,
                TokenKind::LineCommentEnd,
                TokenKind::Newline,
                TokenKind::BlockCommentBegin,
                TokenKind::CommentText,
                TokenKind::BlockCommentEnd,
                TokenKind::StreamEnd,
            ]
        );
        assert_eq!(tokens[2].lexeme, " note");
    }

    #[test]
    fn conditional_directives_open_blocks() {
        let source = unit("#ifdef MEOW\nX\n#endif\n");
        let tokens = lex(&source).unwrap();

        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::StreamBegin,
                TokenKind::PreprocessorHash,
                TokenKind::PreprocessorIfdef,
                TokenKind::PreprocessorBlockBegin,
                TokenKind::PreprocessorStatementBegin,
                TokenKind::Identifier,
                TokenKind::PreprocessorStatementEnd,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::PreprocessorHash,
                TokenKind::PreprocessorEndif,
                TokenKind::PreprocessorBlockEnd,
                TokenKind::PreprocessorStatementEnd,
                TokenKind::Newline,
                TokenKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn hash_inside_a_line_is_an_operator() {
        let source = unit("#define STR(x) #x\n#define CAT(a, b) a##b\n#define CH(x) #@x\n");
        let tokens = lex(&source).unwrap();
        let operators = tokens
            .iter()
            .map(|token| token.kind)
            .filter(|kind| {
                matches!(
                    kind,
                    TokenKind::Hash | TokenKind::TokenPasting | TokenKind::Charizing
                )
            })
            .collect_vec();

        assert_eq!(
            operators,
            [TokenKind::Hash, TokenKind::TokenPasting, TokenKind::Charizing]
        );
    }

    #[test]
    fn include_styles() {
        let source = unit("#include <shared/lighting.hlsli>\n#include \"local.hlsli\"\n");
        let tokens = lex(&source).unwrap();

        let styles = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::PreprocessorInclude)
            .map(|token| token.inclusion_style())
            .collect_vec();
        assert_eq!(
            styles,
            [
                Some(InclusionStyle::AngleBracket),
                Some(InclusionStyle::Quote)
            ]
        );

        let paths = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::StringLiteral)
            .filter_map(|token| token.string())
            .collect_vec();
        assert_eq!(paths, ["shared/lighting.hlsli", "local.hlsli"]);
    }

    #[test]
    fn include_paths_keep_backslashes() {
        let source = unit(concat!(
            "#include \"a\\b.hlsli\"\n",
            "#include \"dir\\new.hlsli\"\n",
            "#include <sys\\types.hlsli>\n",
        ));
        let tokens = lex(&source).unwrap();

        let paths = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::StringLiteral)
            .filter_map(|token| token.string())
            .collect_vec();
        assert_eq!(paths, [r"a\b.hlsli", r"dir\new.hlsli", r"sys\types.hlsli"]);
        assert!(paths.iter().all(|path| !path.contains('\n')));
    }

    #[test]
    fn unknown_escapes_outside_includes_are_kept() {
        let source = unit("string s = \"shaders\\common.hlsli\";");
        let tokens = lex(&source).unwrap();
        let value = tokens.iter().find_map(|token| token.string());

        assert_eq!(value, Some(r"shaders\common.hlsli"));
    }

    #[test]
    fn pragma_words() {
        let source = unit("#pragma once\n#pragma optimize(off)\n#pragma\n");
        let tokens = lex(&source).unwrap();
        let pragmas = tokens
            .iter()
            .filter(|token| token.kind.is_pragma())
            .map(|token| (token.kind, token.lexeme))
            .collect_vec();

        assert_eq!(
            pragmas,
            [
                (TokenKind::PragmaOnce, "once"),
                (TokenKind::PragmaCustom, "optimize"),
                (TokenKind::PragmaCustom, ""),
            ]
        );
    }

    #[test]
    fn error_directive_keeps_its_text() {
        let source = unit("#error  shader model 5 required   \n");
        let tokens = lex(&source).unwrap();
        let text = tokens
            .iter()
            .find(|token| token.kind == TokenKind::DirectiveText)
            .unwrap();

        assert_eq!(text.lexeme, "shader model 5 required");
    }

    #[test]
    fn error_directive_text_continues_over_spliced_lines() {
        let source = unit("#error first \\\n second\nfloat x;\n");
        let tokens = lex(&source).unwrap();

        let statement = tokens
            .iter()
            .skip_while(|token| token.kind != TokenKind::PreprocessorStatementBegin)
            .take_while(|token| token.kind != TokenKind::PreprocessorStatementEnd)
            .map(|token| (token.kind, token.lexeme))
            .filter(|(kind, _)| !kind.is_whitespace())
            .collect_vec();

        assert_eq!(
            statement,
            [
                (TokenKind::PreprocessorStatementBegin, ""),
                (TokenKind::DirectiveText, "first "),
                (TokenKind::Backslash, "\\"),
                (TokenKind::EscapedNewline, "\n"),
                (TokenKind::DirectiveText, " second"),
            ]
        );
        assert!(
            !tokens
                .iter()
                .any(|token| token.kind == TokenKind::Identifier && token.lexeme == "second")
        );

        let end = tokens
            .iter()
            .find(|token| token.kind == TokenKind::PreprocessorStatementEnd)
            .unwrap();
        assert_eq!((end.occurrence.line, end.occurrence.processed_line), (2, 1));
    }

    #[test]
    fn storage_directives_are_keywords() {
        let source = unit("#row_major\n");
        let tokens = lex(&source).unwrap();

        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::StreamBegin,
                TokenKind::PreprocessorHash,
                TokenKind::Keyword(Keyword::RowMajor),
                TokenKind::Newline,
                TokenKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn unknown_and_missing_directives() {
        let source = unit("#import foo\n");
        assert_eq!(
            lex(&source).unwrap_err().kind,
            LexErrorKind::UnknownDirective("import".into())
        );

        let source = unit("#\n");
        assert_eq!(lex(&source).unwrap_err().kind, LexErrorKind::MissingDirective);
    }

    #[test]
    fn minus_binds_only_where_no_value_precedes() {
        let source = unit("#if -1 - 2 < (3)-4\n");
        let tokens = lex(&source).unwrap();
        let significant = tokens
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .filter(|token| !token.lexeme.is_empty())
            .map(|token| token.lexeme)
            .collect_vec();

        assert_eq!(significant, ["#", "if", "-1", "-", "2", "<", "(", "3", ")", "-", "4"]);
        assert_eq!(
            tokens
                .iter()
                .find(|token| token.lexeme == "-1")
                .and_then(|token| token.integer()),
            Some(-1)
        );
    }

    #[test]
    fn literal_values() {
        let source = unit(r#"'A' '\n' 'ab' "tab\tbed" true 0x10 R"(C:\path)""#);
        let tokens = lex(&source).unwrap();
        let values = tokens
            .iter()
            .filter_map(|token| token.value.clone())
            .collect_vec();

        assert_eq!(
            values,
            [
                TokenValue::Character(65),
                TokenValue::Character(10),
                TokenValue::Character(0x6162),
                TokenValue::String("tab\tbed".into()),
                TokenValue::Bool(true),
                TokenValue::Integer(16),
                TokenValue::String(r"C:\path".into()),
            ]
        );
    }

    #[test]
    fn malformed_literals() {
        let cases = [
            ("''", LexErrorKind::EmptyCharLiteral),
            ("'a", LexErrorKind::UnterminatedCharLiteral),
            ("\"abc\nx\"", LexErrorKind::UnterminatedStringLiteral),
            ("R\"x(never closed", LexErrorKind::UnterminatedRawString),
            ("#include <path\n", LexErrorKind::UnterminatedIncludePath),
            ("int x = 12ab;", LexErrorKind::MalformedNumber("12ab".into())),
        ];

        for (text, expected) in cases {
            let source = unit(text);
            assert_eq!(lex(&source).unwrap_err().kind, expected, "lexing {:?}", text);
        }
    }

    #[test]
    fn multi_line_strings_are_opt_in() {
        let source = unit("\"one\ntwo\"");
        let options = LexerOptions {
            multi_line_strings: true,
        };
        let tokens = lex_with(&source, &options).unwrap();

        assert_eq!(
            tokens
                .iter()
                .find_map(|token| token.string().map(str::to_string)),
            Some("one\ntwo".to_string())
        );
    }
}
