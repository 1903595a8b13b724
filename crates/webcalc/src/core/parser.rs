//! Tokenizer and recursive descent parser for keypad expressions
//!
//! Input is expected to be glyph-normalized (see [`normalize_glyphs`]).
//! Nothing here interprets the text as code: the grammar below is the
//! complete language.
//!
//! [`normalize_glyphs`]: crate::core::normalize_glyphs

use crate::core::{CalcError, CalcResult, Operation};

/// Maximum nesting accepted by the parser: groups, `sqrt` calls, chained
/// signs and `**` exponents all count one level
pub const MAX_DEPTH: usize = 128;

/// Maximum number of tokens in one expression. Bounds the height of
/// left-deep `+`/`*` chains, which the evaluator folds recursively.
pub const MAX_TOKENS: usize = 1024;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary (or, for `+`/`-`, unary) operator
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// The `sqrt` function name
    Sqrt,
}

impl Token {
    const fn sign(&self) -> Option<Operation> {
        match self {
            Self::Operator(op @ (Operation::Add | Operation::Subtract)) => Some(*op),
            _ => None,
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Square root of a parenthesized sub-expression
    Sqrt(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new square root node
    #[must_use]
    pub fn sqrt(inner: AstNode) -> Self {
        Self::Sqrt(Box::new(inner))
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

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '+' | '-' => {
                self.advance();
                // `++` / `--` lex as increment/decrement, which has no operand here
                if self.current_char() == Some(ch) {
                    return Err(CalcError::syntax(format!(
                        "'{ch}{ch}' at position {} has no valid operand",
                        self.pos - 1
                    )));
                }
                if ch == '+' {
                    Token::Operator(Operation::Add)
                } else {
                    Token::Operator(Operation::Subtract)
                }
            }
            '*' => {
                self.advance();
                if self.current_char() == Some('*') {
                    self.advance();
                    Token::Operator(Operation::Power)
                } else {
                    Token::Operator(Operation::Multiply)
                }
            }
            '/' => {
                self.advance();
                Token::Operator(Operation::Divide)
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            c if c.is_ascii_alphabetic() => self.read_identifier()?,
            _ => {
                return Err(CalcError::syntax(format!("Unexpected character: '{ch}'")));
            }
        };

        Ok(Some(token))
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
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_digits(&mut self) -> usize {
        let mut count = 0;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            count += 1;
        }
        count
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut digits = self.skip_digits();

        if self.current_char() == Some('.') {
            self.advance();
            digits += self.skip_digits();
        }

        if digits == 0 {
            return Err(CalcError::syntax(format!(
                "Invalid number at position {start}"
            )));
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.current_char(), Some('+' | '-')) {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(CalcError::syntax(format!(
                    "Missing exponent digits in '{}'",
                    &self.input[start..self.pos]
                )));
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::syntax(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_identifier(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        match &self.input[start..self.pos] {
            "sqrt" => Ok(Token::Sqrt),
            other => Err(CalcError::syntax(format!("Unknown name: '{other}'"))),
        }
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('+' | '-') unary | power
/// power      ::= primary ('**' unary)?        // Right associative
/// primary    ::= NUMBER | '(' expression ')' | 'sqrt' '(' expression ')'
/// ```
///
/// A sign applied directly to the base of `**` (`-2**2`) is ambiguous and
/// rejected; the exponent may carry a sign (`2**-1`).
///
/// Input longer than [`MAX_TOKENS`] or nested deeper than [`MAX_DEPTH`]
/// is rejected before it can exhaust the stack.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input.trim()).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::syntax("Empty expression"));
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::syntax(format!(
                "Expression too long: {} tokens (max {MAX_TOKENS})",
                self.tokens.len()
            )));
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::syntax(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.current().and_then(Token::sign) {
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(op @ (Operation::Multiply | Operation::Divide)) => *op,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let Some(sign) = self.current().and_then(Token::sign) else {
            return self.parse_power();
        };
        self.advance();

        let operand = if self.current().and_then(Token::sign).is_some() {
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            inner
        } else {
            let base = self.parse_primary()?;
            if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
                return Err(CalcError::syntax(
                    "Unary sign before '**' base needs parentheses",
                ));
            }
            base
        };

        Ok(match sign {
            Operation::Subtract => AstNode::negate(operand),
            _ => operand,
        })
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            self.descend()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::syntax("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => self.parse_group(),
            Token::Sqrt => match self.advance() {
                Some(Token::LeftParen) => Ok(AstNode::sqrt(self.parse_group()?)),
                _ => Err(CalcError::syntax("Expected '(' after sqrt")),
            },
            other => Err(CalcError::syntax(format!("Unexpected token: {other:?}"))),
        }
    }

    /// Parses the inside of a group whose `(` was already consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        self.descend()?;
        let expr = self.parse_expression()?;
        self.depth -= 1;

        match self.advance() {
            Some(Token::RightParen) => Ok(expr),
            Some(t) => Err(CalcError::syntax(format!("Expected ')' but found {t:?}"))),
            None => Err(CalcError::syntax("Unclosed parenthesis")),
        }
    }

    fn descend(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax("Expression nested too deeply"));
        }
        Ok(())
    }
}
