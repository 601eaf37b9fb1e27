use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Illegal(Rc<str>),
    Ident(Rc<str>),
    Int(Rc<str>),
    String(Rc<str>),

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,

    LessThan,
    GreaterThan,
    LessEq,
    GreaterEq,

    Comma,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            Illegal(literal) => write!(f, "illegal token `{}`", literal),
            Ident(name) => write!(f, "identifier `{}`", name),
            Int(literal) => write!(f, "integer `{}`", literal),
            String(literal) => write!(f, "string {}", literal),
            Assign => write!(f, "`=`"),
            Plus => write!(f, "`+`"),
            Minus => write!(f, "`-`"),
            Bang => write!(f, "`!`"),
            Asterisk => write!(f, "`*`"),
            Slash => write!(f, "`/`"),
            Equal => write!(f, "`==`"),
            NotEqual => write!(f, "`!=`"),
            LessThan => write!(f, "`<`"),
            GreaterThan => write!(f, "`>`"),
            LessEq => write!(f, "`<=`"),
            GreaterEq => write!(f, "`>=`"),
            Comma => write!(f, "`,`"),
            SemiColon => write!(f, "`;`"),
            LParen => write!(f, "`(`"),
            RParen => write!(f, "`)`"),
            LBrace => write!(f, "`{{`"),
            RBrace => write!(f, "`}}`"),
            Function => write!(f, "`func`"),
            Let => write!(f, "`let`"),
            True => write!(f, "`true`"),
            False => write!(f, "`false`"),
            If => write!(f, "`if`"),
            Else => write!(f, "`else`"),
            Return => write!(f, "`return`"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "func" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        Token {
            kind: keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into())),
            start,
            end,
        }
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        let digits = &self.input[start..end];

        Token {
            kind: TokenKind::Int(digits.into()),
            start,
            end,
        }
    }

    /// Reads a `"`-delimited string starting at the opening quote. The
    /// content is the raw text between the quotes, no escape processing.
    /// An unterminated string runs to the end of the input.
    fn read_string(&mut self, start: usize) -> Token {
        loop {
            match self.iter.next() {
                Some((_, '"')) | None => break,
                _ => {}
            }
        }

        let end = self.next_idx();
        let content = self.input[start..end].trim_matches('"');
        Token {
            kind: TokenKind::String(content.into()),
            start,
            end,
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.next_idx(),
        }
    }

    /// Emits `two` if the next character is `=`, `one` otherwise.
    fn maybe_eq(&mut self, one: TokenKind, two: TokenKind, start: usize) -> Token {
        if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
            self.token(two, start)
        } else {
            self.token(one, start)
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut iter = self.iter.by_ref().skip_while(|(_, ch)| ch.is_whitespace());

        let (idx, ch) = iter.next()?;
        let tok = match ch {
            '=' => self.maybe_eq(TokenKind::Assign, TokenKind::Equal, idx),
            '!' => self.maybe_eq(TokenKind::Bang, TokenKind::NotEqual, idx),
            '<' => self.maybe_eq(TokenKind::LessThan, TokenKind::LessEq, idx),
            '>' => self.maybe_eq(TokenKind::GreaterThan, TokenKind::GreaterEq, idx),
            '+' => self.token(TokenKind::Plus, idx),
            '-' => self.token(TokenKind::Minus, idx),
            '*' => self.token(TokenKind::Asterisk, idx),
            '/' => self.token(TokenKind::Slash, idx),
            ',' => self.token(TokenKind::Comma, idx),
            ';' => self.token(TokenKind::SemiColon, idx),
            '(' => self.token(TokenKind::LParen, idx),
            ')' => self.token(TokenKind::RParen, idx),
            '{' => self.token(TokenKind::LBrace, idx),
            '}' => self.token(TokenKind::RBrace, idx),
            '"' => self.read_string(idx),
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if c.is_ascii_digit() => self.read_number(idx),
            _ => {
                let kind = TokenKind::Illegal(ch.to_string().into());
                self.token(kind, idx)
            }
        };
        Some(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|token| token.kind).collect()
    }

    #[test]
    fn test_delimiters() {
        let input = "=+(){},;";
        let output = Tokenizer::new(input).collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                Token {
                    kind: TokenKind::Assign,
                    start: 0,
                    end: 1
                },
                Token {
                    kind: TokenKind::Plus,
                    start: 1,
                    end: 2
                },
                Token {
                    kind: TokenKind::LParen,
                    start: 2,
                    end: 3
                },
                Token {
                    kind: TokenKind::RParen,
                    start: 3,
                    end: 4
                },
                Token {
                    kind: TokenKind::LBrace,
                    start: 4,
                    end: 5
                },
                Token {
                    kind: TokenKind::RBrace,
                    start: 5,
                    end: 6
                },
                Token {
                    kind: TokenKind::Comma,
                    start: 6,
                    end: 7
                },
                Token {
                    kind: TokenKind::SemiColon,
                    start: 7,
                    end: 8
                }
            ]
        );
    }

    #[test]
    fn test_let_and_function() {
        let input = "let five = 5;
    let ten = 10;
    let add = func(x, y) {
    x + y;
    };
    let result = add(five, ten);
    ";
        let expected_output = vec![
            TokenKind::Let,
            TokenKind::Ident("five".into()),
            TokenKind::Assign,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("ten".into()),
            TokenKind::Assign,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("add".into()),
            TokenKind::Assign,
            TokenKind::Function,
            TokenKind::LParen,
            TokenKind::Ident("x".into()),
            TokenKind::Comma,
            TokenKind::Ident("y".into()),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident("x".into()),
            TokenKind::Plus,
            TokenKind::Ident("y".into()),
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("result".into()),
            TokenKind::Assign,
            TokenKind::Ident("add".into()),
            TokenKind::LParen,
            TokenKind::Ident("five".into()),
            TokenKind::Comma,
            TokenKind::Ident("ten".into()),
            TokenKind::RParen,
            TokenKind::SemiColon,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_operators() {
        let input = "
    !-/*5;
    5 < 10 > 5;
    ";

        let expected_output = vec![
            TokenKind::Bang,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Asterisk,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
            TokenKind::Int("5".into()),
            TokenKind::LessThan,
            TokenKind::Int("10".into()),
            TokenKind::GreaterThan,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_keywords() {
        let input = "if (5 < 10) {
    return true;
    } else {
    return false;
    }";

        let expected_output = vec![
            TokenKind::If,
            TokenKind::LParen,
            TokenKind::Int("5".into()),
            TokenKind::LessThan,
            TokenKind::Int("10".into()),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::Else,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::False,
            TokenKind::SemiColon,
            TokenKind::RBrace,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_two_character_operators() {
        let input = "10 == 10;
    10 != 9;
    10 <= 10;
    9 >= 10;";

        let expected_output = vec![
            TokenKind::Int("10".into()),
            TokenKind::Equal,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
            TokenKind::Int("10".into()),
            TokenKind::NotEqual,
            TokenKind::Int("9".into()),
            TokenKind::SemiColon,
            TokenKind::Int("10".into()),
            TokenKind::LessEq,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
            TokenKind::Int("9".into()),
            TokenKind::GreaterEq,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_strings() {
        let input = "\"hello\" + \"world\"";

        let expected_output = vec![
            TokenKind::String("hello".into()),
            TokenKind::Plus,
            TokenKind::String("world".into()),
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let input = "\"unterminated";

        assert_eq!(kinds(input), vec![TokenKind::String("unterminated".into())])
    }

    #[test]
    fn test_illegal_character() {
        let input = "1 @ 2";

        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Int("1".into()),
                TokenKind::Illegal("@".into()),
                TokenKind::Int("2".into()),
            ]
        )
    }

    #[test]
    fn test_multibyte_characters_are_illegal_not_split() {
        let input = "1 é 2";

        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Int("1".into()),
                TokenKind::Illegal("é".into()),
                TokenKind::Int("2".into()),
            ]
        )
    }
}
