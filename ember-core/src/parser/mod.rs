pub mod error;
pub mod expressions;
pub mod statements;

use crate::lexer::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

pub struct Parser<'a> {
    pub iter: std::iter::Peekable<crate::lexer::Tokenizer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: crate::lexer::Tokenizer<'a>) -> Self {
        let iter = tokenizer.peekable();
        Self { iter }
    }

    pub(crate) fn parse_ident(&mut self) -> Result<std::rc::Rc<str>, ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            _ => Err(ParseError::unexpected_other(
                error::Expected::Identifier,
                token,
            )),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token { kind, .. }) if kind == token_kind => Ok(()),
            _ => Err(ParseError::unexpected_token(token_kind, token)),
        }
    }

    /// Parses until the token stream is exhausted. A malformed statement
    /// records its error and parsing resumes after the next semicolon, so a
    /// single pass can report several errors. A non-empty error list means
    /// the program must not be evaluated.
    pub fn parse_program(&mut self) -> Result<crate::ast::Program, Vec<ParseError>> {
        let mut statements = Vec::new();

        let mut errors = Vec::new();

        while self.iter.peek().is_some() {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                }
                Err(err) => {
                    errors.push(err);
                    for token in self.iter.by_ref() {
                        if token.kind == TokenKind::SemiColon {
                            break;
                        }
                    }
                }
            }
        }
        if errors.is_empty() {
            Ok(crate::ast::Program { statements })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let tokenizer = crate::lexer::Tokenizer::new(input);
            let mut parser = crate::parser::Parser::new(tokenizer);

            let program = parser.parse_program().unwrap();

            assert_eq!(program.to_string(), expected)
        }
    }

    #[test]
    fn test_let_statements() {
        let tests = vec![
            ("let x = 5;", "let x = 5;"),
            ("let x = 5", "let x = 5;"),
            ("let y = true;", "let y = true;"),
            ("let foobar = y;", "let foobar = y;"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_return_statements() {
        let tests = vec![
            ("return 5;", "return 5;"),
            ("return x + y", "return (x + y);"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_expression_precedence() {
        let tests = vec![
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("5 >= 4 == 3 <= 4", "((5 >= 4) == (3 <= 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_grouped_expressions() {
        let tests = vec![
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_call_expressions() {
        let tests = vec![
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditionals() {
        let tests = vec![
            ("if (x < y) { x }", "if(x < y) x"),
            ("if (x < y) { x } else { y }", "if(x < y) xelsey"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_function_literals() {
        let tests = vec![
            ("func() {}", "func() "),
            ("func(x) { x; }", "func(x) x"),
            (
                "let add = func(x, y) { x + y; };",
                "let add = func(x, y) (x + y);",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_blocks_without_separators() {
        // Statements inside a block need no semicolons between them
        let tests = vec![(
            "if(10 < 11) { if (9 > 2){return 9} return 10}",
            "if(10 < 11) if(9 > 2) return 9;return 10;",
        )];

        test_parsing(tests)
    }

    #[test]
    fn test_string_literals() {
        let tests = vec![("\"hello world\"", "hello world")];

        test_parsing(tests)
    }

    #[test]
    fn test_error_accumulation() {
        let input = "let = 5; let y 10; let z = 3;";
        let tokenizer = crate::lexer::Tokenizer::new(input);
        let mut parser = crate::parser::Parser::new(tokenizer);

        let errors = parser.parse_program().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_no_prefix_function_error() {
        let tokenizer = crate::lexer::Tokenizer::new("let x = ;");
        let mut parser = crate::parser::Parser::new(tokenizer);

        let errors = parser.parse_program().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .contains("no prefix parse function for `;` found"));
    }

    #[test]
    fn test_illegal_token_is_reported() {
        let tokenizer = crate::lexer::Tokenizer::new("1 + @");
        let mut parser = crate::parser::Parser::new(tokenizer);

        let errors = parser.parse_program().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("illegal token `@`"));
    }

    #[test]
    fn test_premature_end_of_input() {
        let tokenizer = crate::lexer::Tokenizer::new("if (x < y) { x");
        let mut parser = crate::parser::Parser::new(tokenizer);

        let errors = parser.parse_program().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("premature end of input"));
    }
}
