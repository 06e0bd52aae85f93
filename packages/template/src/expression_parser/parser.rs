/**
 * Condition Expression Parser
 *
 * Recursive descent parser for `if` / `if-not` expressions. Precedence, lowest
 * first: ternary, `||`, `&&`, `??`, equality, relational, additive,
 * multiplicative, `**`, prefix, keyed/member access, primary.
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{Result, TemplateError};

/// Parser for condition expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Parse a whole expression; trailing tokens are an error.
    pub fn parse(&self, input: &str) -> Result<AST> {
        let tokens = self.lexer.tokenize(input);
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(TemplateError::Lexer {
                message: error.str_value.clone(),
                index: error.index,
                input: input.to_string(),
            });
        }

        let mut ast = ParseAST::new(input, tokens);
        let result = ast.parse_conditional()?;
        if let Some(token) = ast.current() {
            let message = format!("Unexpected token '{}'", token.str_value_or_number());
            return Err(ast.error(message));
        }
        Ok(result)
    }
}

impl Token {
    fn str_value_or_number(&self) -> String {
        match self.token_type {
            TokenType::Number => self.num_value.to_string(),
            _ => self.str_value.clone(),
        }
    }
}

struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseAST {
            input,
            tokens,
            index: 0,
        }
    }

    fn error(&self, message: String) -> TemplateError {
        TemplateError::Parser {
            message,
            index: self.input_index(),
            input: self.input.to_string(),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if let Some(token) = self.current() {
            if token.is_character(code) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Consume the current token if it is one of `operators`.
    fn consume_operator(&mut self, operators: &[&str]) -> Option<String> {
        let token = self.current()?;
        if token.token_type == TokenType::Operator
            && operators.contains(&token.str_value.as_str())
        {
            let operator = token.str_value.clone();
            self.advance();
            return Some(operator);
        }
        None
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            Ok(())
        } else {
            Err(self.error(format!("Missing expected {}", code)))
        }
    }

    fn input_index(&self) -> usize {
        match self.current() {
            Some(token) => token.index,
            None => self.input.len(),
        }
    }

    fn last_end(&self) -> usize {
        self.index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.input.len(), |token| token.end)
    }

    fn span(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.last_end())
    }

    fn binary(&self, start: usize, operation: String, left: AST, right: AST) -> AST {
        AST::Binary(Binary {
            span: self.span(start),
            operation,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_conditional(&mut self) -> Result<AST> {
        let start = self.input_index();
        let result = self.parse_logical_or()?;

        if self.consume_operator(&["?"]).is_some() {
            let true_exp = self.parse_conditional()?;
            self.expect_character(':')?;
            let false_exp = self.parse_conditional()?; // Right-associative

            return Ok(AST::Conditional(Conditional {
                span: self.span(start),
                condition: Box::new(result),
                true_exp: Box::new(true_exp),
                false_exp: Box::new(false_exp),
            }));
        }

        Ok(result)
    }

    fn parse_logical_or(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_logical_and()?;
        while let Some(operator) = self.consume_operator(&["||"]) {
            let right = self.parse_logical_and()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_logical_and(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_nullish_coalescing()?;
        while let Some(operator) = self.consume_operator(&["&&"]) {
            let right = self.parse_nullish_coalescing()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_nullish_coalescing(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_equality()?;
        while let Some(operator) = self.consume_operator(&["??"]) {
            let right = self.parse_equality()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_equality(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_relational()?;
        while let Some(operator) = self.consume_operator(&["==", "!=", "===", "!=="]) {
            let right = self.parse_relational()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_relational(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_additive()?;
        while let Some(operator) = self.consume_operator(&["<", ">", "<=", ">="]) {
            let right = self.parse_additive()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_additive(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_multiplicative()?;
        while let Some(operator) = self.consume_operator(&["+", "-"]) {
            let right = self.parse_multiplicative()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_multiplicative(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_exponentiation()?;
        while let Some(operator) = self.consume_operator(&["*", "/", "%"]) {
            let right = self.parse_exponentiation()?;
            result = self.binary(start, operator, result, right);
        }
        Ok(result)
    }

    fn parse_exponentiation(&mut self) -> Result<AST> {
        let start = self.input_index();
        let result = self.parse_prefix()?;
        if let Some(operator) = self.consume_operator(&["**"]) {
            let right = self.parse_exponentiation()?;
            return Ok(self.binary(start, operator, result, right));
        }
        Ok(result)
    }

    fn parse_prefix(&mut self) -> Result<AST> {
        let start = self.input_index();

        if self.consume_operator(&["!"]).is_some() {
            let expression = self.parse_prefix()?;
            return Ok(AST::PrefixNot(PrefixNot {
                span: self.span(start),
                expression: Box::new(expression),
            }));
        }

        if let Some(operator) = self.consume_operator(&["+", "-"]) {
            let expr = self.parse_prefix()?;
            return Ok(AST::Unary(Unary {
                span: self.span(start),
                operator,
                expr: Box::new(expr),
            }));
        }

        self.parse_call_chain()
    }

    /// Keyed (`[key]`) and member (`.name`) access after a primary
    fn parse_call_chain(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_primary()?;

        loop {
            if self.consume_optional_character('[') {
                let key = self.parse_conditional()?;
                self.expect_character(']')?;
                result = AST::KeyedRead(KeyedRead {
                    span: self.span(start),
                    receiver: Box::new(result),
                    key: Box::new(key),
                });
            } else if self.consume_optional_character('.') {
                let path = match self.current() {
                    Some(token) if token.is_identifier() || token.is_keyword() => {
                        token.str_value.clone()
                    }
                    _ => return Err(self.error("Expected identifier after '.'".to_string())),
                };
                self.advance();
                result = AST::MemberRead(MemberRead {
                    span: self.span(start),
                    receiver: Box::new(result),
                    path,
                });
            } else {
                break;
            }
        }

        Ok(result)
    }

    fn parse_primary(&mut self) -> Result<AST> {
        let start = self.input_index();

        let Some(token) = self.current().cloned() else {
            return Err(self.error("Unexpected end of expression".to_string()));
        };

        if token.is_character('(') {
            self.advance();
            let result = self.parse_conditional()?;
            self.expect_character(')')?;
            return Ok(result);
        }

        let value = match token.token_type {
            TokenType::Keyword => match token.str_value.as_str() {
                "true" => LiteralValue::Bool(true),
                "false" => LiteralValue::Bool(false),
                "null" => LiteralValue::Null,
                _ => LiteralValue::Undefined,
            },
            TokenType::Number => LiteralValue::Number(token.num_value),
            TokenType::String => LiteralValue::String(token.str_value.clone()),
            TokenType::Identifier => {
                self.advance();
                return Ok(AST::PropertyRead(PropertyRead {
                    span: self.span(start),
                    path: token.str_value,
                }));
            }
            _ => {
                return Err(self.error(format!(
                    "Unexpected token '{}'",
                    token.str_value_or_number()
                )))
            }
        };

        self.advance();
        Ok(AST::LiteralPrimitive(LiteralPrimitive {
            span: self.span(start),
            value,
        }))
    }
}
