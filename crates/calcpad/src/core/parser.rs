//! Tokenizer and flat operand chain parser
//!
//! The keypad grammar has no parentheses and no unary operators, so an
//! expression is always `number (operator number)*`. Parsing produces that
//! chain directly instead of a tree.

use crate::core::{EvalResult, EvaluationError, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> EvalResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> EvalResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        match Operation::from_symbol(ch) {
            Some(op) => {
                self.advance();
                Ok(Some(Token::Operator(op)))
            }
            None => Err(EvaluationError::parse(format!(
                "Unexpected character: '{ch}'"
            ))),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a maximal run of digits and dots, then validates it
    fn read_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        let mut dots = 0usize;
        let mut digits = 0usize;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits += 1;
            } else if ch == '.' {
                dots += 1;
            } else {
                break;
            }
            self.advance();
        }

        let literal = &self.input[start..self.pos];
        if dots > 1 || digits == 0 {
            return Err(EvaluationError::parse(format!(
                "Invalid number: '{literal}'"
            )));
        }

        let value: f64 = literal
            .parse()
            .map_err(|_| EvaluationError::parse(format!("Invalid number: '{literal}'")))?;

        Ok(Token::Number(value))
    }
}

/// A validated `number (operator number)*` sequence
#[derive(Debug, Clone, PartialEq)]
pub struct OperandChain {
    /// Leading operand
    pub first: f64,
    /// Remaining `(operator, operand)` pairs in input order
    pub rest: Vec<(Operation, f64)>,
}

impl OperandChain {
    /// Creates a chain with a single operand
    #[must_use]
    pub fn single(value: f64) -> Self {
        Self {
            first: value,
            rest: Vec::new(),
        }
    }

    /// Appends an operator and operand
    #[must_use]
    pub fn then(mut self, op: Operation, value: f64) -> Self {
        self.rest.push((op, value));
        self
    }

    /// Number of operators in the chain
    #[must_use]
    pub fn operator_count(&self) -> usize {
        self.rest.len()
    }
}

/// Parser from tokens to an [`OperandChain`]
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Tokenizes and parses an expression string
    pub fn parse_str(input: &str) -> EvalResult<OperandChain> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EvaluationError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens, requiring strict operand/operator alternation
    pub fn parse(&mut self) -> EvalResult<OperandChain> {
        if self.tokens.is_empty() {
            return Err(EvaluationError::EmptyExpression);
        }

        let mut chain = OperandChain::single(self.expect_operand()?);

        while let Some(token) = self.advance() {
            let op = match token {
                Token::Operator(op) => op,
                Token::Number(n) => {
                    return Err(EvaluationError::parse(format!(
                        "Expected operator but found {n}"
                    )));
                }
            };
            chain.rest.push((op, self.expect_operand()?));
        }

        Ok(chain)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_operand(&mut self) -> EvalResult<f64> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Operator(op)) => Err(EvaluationError::parse(format!(
                "Unexpected operator '{op}' at token {}",
                self.pos - 1
            ))),
            None => Err(EvaluationError::parse("Unexpected end of expression")),
        }
    }
}
