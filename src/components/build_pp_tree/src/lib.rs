/*
    ===================  components/build_pp_tree/src/lib.rs  ===================
    Parses lexed shader source into preprocessor statements and macros
    ---------------------------------------------------------------------------
*/

mod evaluate;
mod expr;
mod options;
mod parser;
mod read;

use diagnostics::Diagnostics;
pub use evaluate::Evaluator;
pub use expr::ExprParser;
use hlsl_token::Token;
pub use options::{ParserOptions, RedefinitionPolicy};
pub use parser::Parser;
use pp_tree::{BlockRef, ParseError, ParseTree, Statement, SymbolTable};

/// Everything one parsing pass produces.
#[derive(Debug)]
pub struct ParsedUnit<'a> {
    pub tree: ParseTree<'a>,
    pub root: BlockRef<'a>,
    pub symbols: SymbolTable<'a>,

    /// Whether an active `#pragma once` was seen
    pub once: bool,
}

impl<'a> ParsedUnit<'a> {
    pub fn statements(&self) -> &[Statement<'a>] {
        &self.tree[self.root].statements
    }
}

/// Parses a complete token sequence with default options.
pub fn parse<'a, 'd>(
    tokens: &'a [Token<'a>],
    diagnostics: &'d Diagnostics<'d>,
) -> Result<ParsedUnit<'a>, ParseError> {
    Parser::new(tokens, diagnostics, ParserOptions::default()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use build_hlsl_token::lex;
    use diagnostics::{DiagnosticFlags, Severity};
    use hlsl_token::{InclusionStyle, TokenKind};
    use indoc::indoc;
    use itertools::Itertools;
    use pp_tree::{
        Definition, Expression, MatrixPacking, ParseErrorKind, Pragma, SubstitutionText,
    };
    use source_files::{Occurrence, SourceUnit};

    fn check(
        text: &str,
        options: ParserOptions,
        f: impl FnOnce(Result<ParsedUnit<'_>, ParseError>, &Diagnostics),
    ) {
        let source = SourceUnit::new("test.hlsl", text);
        let tokens = lex(&source).unwrap();
        let diagnostics = Diagnostics::new(&source, DiagnosticFlags::collecting());
        let result = Parser::new(&tokens, &diagnostics, options).parse();
        f(result, &diagnostics);
    }

    fn parses(text: &str, f: impl FnOnce(&ParsedUnit<'_>, &Diagnostics)) {
        check(text, ParserOptions::default(), |result, diagnostics| {
            f(&result.unwrap(), diagnostics)
        });
    }

    fn fails(text: &str) -> ParseErrorKind {
        let mut kind = None;
        check(text, ParserOptions::default(), |result, _| {
            kind = Some(result.unwrap_err().kind)
        });
        kind.unwrap()
    }

    fn only_conditional<'u, 'a>(unit: &'u ParsedUnit<'a>) -> &'u pp_tree::IfElseifElse<'a> {
        match unit.statements() {
            [Statement::IfElseifElse(construct)] => &unit.tree[*construct],
            other => panic!("expected a single conditional, got {:?}", other),
        }
    }

    #[test]
    fn variable_macro() {
        parses("#define a b", |unit, _| {
            let Some(Definition::Variable(variable)) = unit.symbols.lookup("a") else {
                panic!("`a` is not a variable macro");
            };

            assert_eq!(variable.substitution.text(), "b");
            assert!(matches!(unit.statements(), [Statement::Variable(_)]));
        });
    }

    #[test]
    fn function_macro() {
        parses("#define c( d ) e", |unit, _| {
            let Some(Definition::Function(function)) = unit.symbols.lookup("c") else {
                panic!("`c` is not a function macro");
            };

            let parameters = function
                .parameters
                .iter()
                .map(|parameter| parameter.name)
                .collect_vec();

            assert_eq!(parameters, ["d"]);
            assert!(!function.variadic);
            assert_eq!(function.substitution.sequence.text(), "e");
            assert!(matches!(
                function.substitution.text.as_slice(),
                [SubstitutionText::Text(_)]
            ));
        });
    }

    #[test]
    fn parenthesis_must_touch_function_macro_name() {
        parses("#define c (d) e", |unit, _| {
            assert!(unit.symbols.lookup("c").is_some_and(Definition::is_variable));
        });
    }

    #[test]
    fn else_branch_of_undefined_ifdef_is_active() {
        parses("#ifdef MEOW\nX\n#else\nY\n#endif", |unit, _| {
            let construct = only_conditional(unit);
            assert_eq!(construct.branches.len(), 2);
            assert_eq!(construct.active, Some(1));

            let else_branch = &unit.tree[construct.branches[1].branch];
            assert!(matches!(
                else_branch.statements.as_slice(),
                [Statement::TextLine(line)] if line.text() == "Y"
            ));
        });
    }

    #[test]
    fn escaped_newlines_stay_in_one_macro() {
        parses("#define song do\\\nre\\\nmi", |unit, _| {
            let [Statement::Variable(variable)] = unit.statements() else {
                panic!("expected one macro statement");
            };

            let body = variable.substitution.sequence;
            assert_eq!(body.text(), "do\\\nre\\\nmi");
            assert_eq!(
                body.tokens
                    .iter()
                    .filter(|token| token.kind == TokenKind::EscapedNewline)
                    .count(),
                2
            );
        });
    }

    #[test]
    fn malformed_comment_triple() {
        let tokens = [
            TokenKind::StreamBegin.at(Occurrence::start(), ""),
            TokenKind::BlockCommentBegin.at(Occurrence::start().to(2), "/*"),
            TokenKind::StreamEnd.at(Occurrence::start(), ""),
        ];

        let source = SourceUnit::new("test.hlsl", "/*");
        let diagnostics = Diagnostics::new(&source, DiagnosticFlags::collecting());

        assert_eq!(
            parse(&tokens, &diagnostics).unwrap_err().kind,
            ParseErrorKind::MalformedComment
        );
    }

    #[test]
    fn stream_must_be_bracketed() {
        let tokens = [TokenKind::Identifier.at(Occurrence::start().to(1), "x")];
        let source = SourceUnit::new("test.hlsl", "x");
        let diagnostics = Diagnostics::new(&source, DiagnosticFlags::collecting());

        assert_eq!(
            parse(&tokens, &diagnostics).unwrap_err().kind,
            ParseErrorKind::ExpectedStreamBegin
        );
    }

    #[test]
    fn conditionals_must_nest() {
        assert_eq!(
            fails("#endif\n"),
            ParseErrorKind::UnmatchedConditional("#endif")
        );
        assert_eq!(
            fails("X\n#else\n"),
            ParseErrorKind::UnmatchedConditional("#else")
        );
        assert_eq!(fails("#if 1\nX\n"), ParseErrorKind::ExpectedEndif);
        assert!(matches!(
            fails("#if 1\n#else\n#elif 1\n#endif\n"),
            ParseErrorKind::ConditionalAfterElse(_)
        ));
    }

    #[test]
    fn undef_removes_and_warns_when_absent() {
        parses("#define A 1\n#undef A\n#undef NOPE\n", |unit, diagnostics| {
            assert!(unit.symbols.is_empty());
            assert_eq!(
                diagnostics.messages(),
                [(Severity::Warning, "Macro `NOPE` is not defined".to_string())]
            );
        });
    }

    #[test]
    fn redefinition_policy() {
        parses("#define A (1 + 2)\n#define A (1  +  2)\n", |unit, _| {
            assert_eq!(unit.symbols.len(), 1);
        });

        assert_eq!(
            fails("#define A 1\n#define A 2\n"),
            ParseErrorKind::MacroRedefinition("A".into())
        );

        let strict = ParserOptions {
            redefinition: RedefinitionPolicy::ErrorOnAny,
            ..Default::default()
        };

        check("#define A 1\n#define A 1\n", strict, |result, _| {
            assert_eq!(
                result.unwrap_err().kind,
                ParseErrorKind::MacroRedefinition("A".into())
            );
        });
    }

    #[test]
    fn function_macro_redefinition() {
        parses("#define F(a, b) a + b\n#define F(a, b) a  +  b\n", |unit, diagnostics| {
            assert_eq!(unit.symbols.len(), 1);
            assert!(diagnostics.is_empty());
            assert!(matches!(unit.symbols.lookup("F"), Some(Definition::Function(_))));
        });

        for redefinition in [
            "#define F(a, b) a + b\n#define F(x, b) x + b\n",
            "#define F(a, b) a + b\n#define F(a, b) a - b\n",
            "#define F(a) a\n#define F(a, ...) a\n",
            "#define F(a) a\n#define F a\n",
        ] {
            assert_eq!(
                fails(redefinition),
                ParseErrorKind::MacroRedefinition("F".into()),
                "redefining with {:?}",
                redefinition
            );
        }
    }

    #[test]
    fn macro_parameters() {
        parses(
            "#define LOG(format, ...) print(format, __VA_ARGS__)\n",
            |unit, _| {
                let Some(Definition::Function(function)) = unit.symbols.lookup("LOG") else {
                    panic!("`LOG` is not a function macro");
                };

                assert!(function.variadic);
                assert_eq!(function.parameters.len(), 1);
                assert_eq!(
                    function
                        .substitution
                        .arguments()
                        .map(|argument| argument.parameter)
                        .collect_vec(),
                    [0, 1]
                );
            },
        );

        assert_eq!(
            fails("#define BAD(..., x) x\n"),
            ParseErrorKind::VariadicParameterMustBeLast
        );
        assert_eq!(
            fails("#define DUP(a, a) a\n"),
            ParseErrorKind::DuplicateParameter("a".into())
        );
        assert_eq!(fails("#define 3\n"), ParseErrorKind::ExpectedMacroName);
    }

    #[test]
    fn evaluates_conditions() {
        let text = indoc! {"
            #define WIDTH 4
            #define AREA (WIDTH * WIDTH)
            #if AREA == 16 && defined(WIDTH) && !defined HEIGHT
            #define OK 1
            #elif 1
            #define WRONG 1
            #endif
        "};

        parses(text, |unit, _| {
            let construct = unit
                .statements()
                .iter()
                .find_map(|statement| match statement {
                    Statement::IfElseifElse(construct) => Some(&unit.tree[*construct]),
                    _ => None,
                })
                .unwrap();

            assert_eq!(construct.active, Some(0));
            assert!(unit.symbols.contains("OK"));
            assert!(!unit.symbols.contains("WRONG"));
        });
    }

    #[test]
    fn operators_follow_c_precedence() {
        let text = indoc! {"
            #if 1 + 2 * 3 == 7 && 10 - 2 - 3 == 5 && 0x10 >> 2 == 4 && 7 % 3 == 1
            #if ~0 == -1 && (1 || 0 && 0) && !(2 < 1) && (0 ? 5 : 6) == 6
            #define PASS
            #endif
            #endif
        "};

        parses(text, |unit, _| {
            assert!(unit.symbols.contains("PASS"));
            assert_eq!(only_conditional(unit).active, Some(0));
        });
    }

    #[test]
    fn later_branch_can_be_taken() {
        parses("#if 0\n#elif 2 > 1\n#define B\n#else\n#endif\n", |unit, _| {
            assert_eq!(only_conditional(unit).active, Some(1));
            assert!(unit.symbols.contains("B"));
        });

        parses("#ifndef GUARD\n#define GUARD\n#endif\n", |unit, _| {
            assert_eq!(only_conditional(unit).active, Some(0));
            assert!(unit.symbols.contains("GUARD"));
        });
    }

    #[test]
    fn evaluation_errors() {
        assert_eq!(fails("#if 1 / 0\n#endif\n"), ParseErrorKind::DivisionByZero);
        assert!(matches!(
            fails("#if 1.5\n#endif\n"),
            ParseErrorKind::CannotEvaluate(_)
        ));
        assert_eq!(
            fails("#define F(x) x\n#if F(1)\n#endif\n"),
            ParseErrorKind::UnsupportedMacroCall("F".into())
        );
        assert_eq!(fails("#if 1 2\n#endif\n"), ParseErrorKind::ExpectedEndOfExpression);

        parses("#if 0 && 1 / 0\n#endif\n", |unit, _| {
            assert_eq!(only_conditional(unit).active, None);
        });
    }

    #[test]
    fn nesting_depth_is_capped() {
        let nested = |depth: usize| {
            format!("#if {}1{}\n#endif\n", "(".repeat(depth), ")".repeat(depth))
        };

        parses(&nested(crate::expr::MAX_NESTING - 1), |unit, _| {
            assert_eq!(only_conditional(unit).active, Some(0));
        });

        let too_deep = ParseErrorKind::ExpressionTooDeep(crate::expr::MAX_NESTING);
        assert_eq!(fails(&nested(10_000)), too_deep);
        assert_eq!(fails(&format!("#if {}1\n#endif\n", "!".repeat(10_000))), too_deep);
    }

    #[test]
    fn self_referencing_macro_is_depleted() {
        parses("#define SELF SELF + 1\n#if SELF == 1\n#define REACHED\n#endif\n", |unit, _| {
            assert!(unit.symbols.contains("REACHED"));
        });
    }

    #[test]
    fn inactive_regions_have_no_effects() {
        let text = indoc! {"
            #if 0
            #define HIDDEN 1
            #undef MISSING
            #error never shown
            #pragma once
            #endif
        "};

        parses(text, |unit, diagnostics| {
            assert!(!unit.symbols.contains("HIDDEN"));
            assert!(!unit.once);
            assert!(diagnostics.is_empty());

            let branch = &unit.tree[only_conditional(unit).branches[0].branch];
            assert_eq!(branch.statements.len(), 4);
            assert!(branch.statements[0].is_variable());
        });
    }

    #[test]
    fn error_and_warning_directives_report() {
        parses("#warning careful now\n#error broken\n", |unit, diagnostics| {
            assert_eq!(unit.statements().len(), 2);
            assert_eq!(
                diagnostics.messages(),
                [
                    (Severity::Warning, "careful now".to_string()),
                    (Severity::Error, "broken".to_string()),
                ]
            );
        });
    }

    #[test]
    fn error_text_continues_over_spliced_lines() {
        parses("#error first \\\n second\n#warning\n", |unit, diagnostics| {
            let [Statement::ErrorConstruct(error), Statement::ErrorConstruct(_)] =
                unit.statements()
            else {
                panic!("unexpected statements {:?}", unit.statements());
            };

            assert_eq!(unit.tree[*error].text, "first  second");
            assert_eq!(
                diagnostics.messages(),
                [
                    (Severity::Error, "first  second".to_string()),
                    (Severity::Warning, "#warning".to_string()),
                ]
            );
        });
    }

    #[test]
    fn pragmas() {
        let text = indoc! {r#"
            #pragma once
            #pragma pack_matrix(row_major)
            #pragma message("hello")
            #pragma optimize(off)
        "#};

        parses(text, |unit, diagnostics| {
            assert!(unit.once);

            let pragmas = unit
                .statements()
                .iter()
                .filter_map(|statement| match statement {
                    Statement::PragmaConstruct(pragma) => Some(&unit.tree[*pragma].pragma),
                    _ => None,
                })
                .collect_vec();

            assert_eq!(pragmas.len(), 4);
            assert_eq!(pragmas[1], &Pragma::PackMatrix(MatrixPacking::RowMajor));
            assert_eq!(pragmas[2], &Pragma::Message(Some("hello".into())));
            assert!(matches!(pragmas[3], Pragma::Custom { name: "optimize", .. }));

            assert_eq!(
                diagnostics.messages(),
                [
                    (Severity::Note, "hello".to_string()),
                    (Severity::Warning, "Unknown pragma `optimize`".to_string()),
                ]
            );
        });

        assert_eq!(
            fails("#pragma pack_matrix(sideways)\n"),
            ParseErrorKind::ExpectedMatrixPacking
        );
    }

    #[test]
    fn include_and_line() {
        parses("#include <lighting/brdf.hlsli>\n#line 42 \"other.hlsl\"\n", |unit, _| {
            let [Statement::Inclusion(inclusion), Statement::ForceLine(line)] = unit.statements()
            else {
                panic!("unexpected statements {:?}", unit.statements());
            };

            assert_eq!(inclusion.path, "lighting/brdf.hlsli");
            assert_eq!(inclusion.style, InclusionStyle::AngleBracket);
            assert_eq!(line.number, 42);
            assert_eq!(line.filename.as_deref(), Some("other.hlsl"));
        });

        assert_eq!(fails("#include\n"), ParseErrorKind::ExpectedIncludePath);
        assert_eq!(fails("#line x\n"), ParseErrorKind::ExpectedLineNumber);
    }

    #[test]
    fn quoted_include_paths_are_not_unescaped() {
        parses(
            "#include \"shaders\\common.hlsli\"\n#include \"dir\\new.hlsli\"\n",
            |unit, _| {
                let paths = unit
                    .statements()
                    .iter()
                    .map(|statement| match statement {
                        Statement::Inclusion(inclusion) => {
                            assert_eq!(inclusion.style, InclusionStyle::Quote);
                            inclusion.path.as_str()
                        }
                        other => panic!("expected an inclusion, got {:?}", other),
                    })
                    .collect_vec();

                assert_eq!(paths, [r"shaders\common.hlsli", r"dir\new.hlsli"]);
            },
        );
    }

    #[test]
    fn storage_keyword_is_not_a_directive() {
        assert_eq!(
            fails("#row_major\n"),
            ParseErrorKind::UnexpectedDirective("row_major".into())
        );
    }

    #[test]
    fn text_lines_mark_substitution_points() {
        let text = "#define SCALE 2\n#define MUL(a, b) a * b\nfloat x = SCALE * MUL(1, 2) + MUL;\n";

        parses(text, |unit, _| {
            let pieces = unit.statements()[2..]
                .iter()
                .map(|statement| match statement {
                    Statement::TextLine(line) => format!("text {}", line.text()),
                    Statement::Symbol(symbol) => format!("symbol {}", symbol.name),
                    other => format!("{:?}", other),
                })
                .collect_vec();

            assert_eq!(
                pieces,
                [
                    "text float x = ",
                    "symbol SCALE",
                    "text  * ",
                    "symbol MUL",
                    "text (1, 2) + MUL;",
                ]
            );
        });
    }

    #[test]
    fn recovery_keeps_going() {
        let options = ParserOptions {
            recover: true,
            ..Default::default()
        };

        let text = "#define\n#if 1 +\n#endif\nX\n#endif\n";

        check(text, options, |result, diagnostics| {
            let unit = result.unwrap();

            assert!(matches!(
                unit.statements(),
                [
                    Statement::ParserError(_),
                    Statement::IfElseifElse(_),
                    Statement::TextLine(_),
                    Statement::ParserError(_),
                ]
            ));

            let Statement::IfElseifElse(construct) = &unit.statements()[1] else {
                unreachable!();
            };

            let condition = &unit.tree[*construct].branches[0].condition;
            assert!(matches!(condition.expression, Some(Expression::ParserError(_))));
            assert_eq!(unit.tree[*construct].active, None);
            assert_eq!(diagnostics.count(Severity::Error), 3);
        });
    }

    #[test]
    fn symbols_carry_over_between_passes() {
        let first = SourceUnit::new("first.hlsl", "#define FEATURE 1\n");
        let second = SourceUnit::new("second.hlsl", "#if FEATURE\n#define ENABLED\n#endif\n");

        let first_tokens = lex(&first).unwrap();
        let second_tokens = lex(&second).unwrap();
        let diagnostics = Diagnostics::new(&first, DiagnosticFlags::collecting());

        let symbols = parse(&first_tokens, &diagnostics).unwrap().symbols;
        let unit = Parser::new(&second_tokens, &diagnostics, ParserOptions::default())
            .with_symbols(symbols)
            .parse()
            .unwrap();

        assert!(unit.symbols.contains("FEATURE"));
        assert!(unit.symbols.contains("ENABLED"));
    }
}
