/**
 * Condition Expression Lexer
 *
 * Tokenizes `if` / `if-not` expressions. Data paths such as `user.address.city`
 * come out as a single identifier token; `true`, `false`, `null` and
 * `undefined` are keywords and are never looked up as data.
 */
use crate::chars;

/// Token types in condition expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Operator,
    Number,
    Error,
}

/// Token representation
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

/// Literal keywords
const KEYWORDS: &[&str] = &["true", "false", "null", "undefined"];

/// Condition expression lexer
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            peek,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn scan_token(&mut self) -> Option<Token> {
        // Skip whitespace
        while self.index < self.length && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        let token = match ch {
            chars::PERIOD => {
                self.advance();
                if chars::is_digit(self.peek) {
                    return Some(self.scan_number(start));
                }
                Token::new(
                    start,
                    self.index,
                    TokenType::Character,
                    0.0,
                    chars::PERIOD.to_string(),
                )
            }
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET | chars::COLON => {
                self.scan_character(start, ch)
            }
            chars::SQ | chars::DQ => self.scan_string(ch),
            chars::PLUS | chars::MINUS | chars::SLASH | chars::PERCENT => {
                self.advance();
                Token::operator(start, self.index, &ch.to_string())
            }
            chars::STAR => {
                self.advance();
                if self.peek == chars::STAR {
                    self.advance();
                    return Some(Token::operator(start, self.index, "**"));
                }
                Token::operator(start, self.index, "*")
            }
            chars::AMPERSAND => self.scan_doubled(start, chars::AMPERSAND, "&&"),
            chars::BAR => self.scan_doubled(start, chars::BAR, "||"),
            chars::LT => self.scan_complex_operator(start, "<", chars::EQ, "<="),
            chars::GT => self.scan_complex_operator(start, ">", chars::EQ, ">="),
            chars::QUESTION => self.scan_complex_operator(start, "?", chars::QUESTION, "??"),
            chars::BANG => self.scan_equality(start, "!"),
            chars::EQ => {
                let token = self.scan_equality(start, "=");
                if token.is_operator("=") {
                    return Some(self.error(start, "Assignment is not supported"));
                }
                token
            }
            _ => {
                self.advance();
                self.error(start, &format!("Unexpected character [{}]", ch))
            }
        };
        Some(token)
    }

    fn error(&self, index: usize, message: &str) -> Token {
        Token::new(index, self.index, TokenType::Error, 0.0, message.to_string())
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        Token::new(start, self.index, TokenType::Character, 0.0, ch.to_string())
    }

    /// `&&` and `||`; a single `&` or `|` is an error.
    fn scan_doubled(&mut self, start: usize, ch: char, doubled: &str) -> Token {
        self.advance();
        if self.peek == ch {
            self.advance();
            return Token::operator(start, self.index, doubled);
        }
        self.error(start, &format!("Unexpected character [{}]", ch))
    }

    fn scan_complex_operator(&mut self, start: usize, one: &str, code: char, two: &str) -> Token {
        self.advance();
        if self.peek == code {
            self.advance();
            return Token::operator(start, self.index, two);
        }
        Token::operator(start, self.index, one)
    }

    /// `!`, `!=`, `!==`, `=`, `==`, `===`
    fn scan_equality(&mut self, start: usize, first: &str) -> Token {
        self.advance();
        let mut operator = first.to_string();
        if self.peek == chars::EQ {
            self.advance();
            operator.push(chars::EQ);
            if self.peek == chars::EQ {
                self.advance();
                operator.push(chars::EQ);
            }
        }
        Token::operator(start, self.index, &operator)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();

        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.input[start..self.index].to_string();
        let token_type = if KEYWORDS.contains(&str_value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Token::new(start, self.index, token_type, 0.0, str_value)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while self.index < self.length {
            if chars::is_digit(self.peek) || self.peek == chars::PERIOD {
                self.advance();
            } else if self.peek == 'e' || self.peek == 'E' {
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
            } else {
                break;
            }
        }

        let str_value = self.input[start..self.index].to_string();
        match str_value.parse::<f64>() {
            Ok(num_value) => Token::new(start, self.index, TokenType::Number, num_value, str_value),
            Err(_) => self.error(start, &format!("Invalid number [{}]", str_value)),
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        self.advance(); // Skip opening quote

        let mut buffer = String::new();
        while self.index < self.length {
            let ch = self.peek;
            if ch == quote {
                self.advance();
                return Token::new(start, self.index, TokenType::String, 0.0, buffer);
            }
            if ch == chars::BACKSLASH {
                self.advance();
                let escaped = match self.peek {
                    'n' => chars::LF,
                    't' => chars::TAB,
                    'r' => chars::CR,
                    chars::EOF if self.index >= self.length => break,
                    other => other,
                };
                buffer.push(escaped);
                self.advance();
                continue;
            }
            buffer.push(ch);
            self.advance();
        }

        self.error(start, "Unterminated quote")
    }
}
