//! Ratio expressions - arithmetic text such as `"3"`, `"1/3"` or `"(1/2) * 3"`.
//!
//! Comparison matrix cells arrive either as JSON numbers or as short
//! arithmetic expressions. This evaluator accepts decimal literals (with an
//! optional exponent), `+ - * /`, unary signs and parentheses.

use thiserror::Error;

/// Deepest nesting of parentheses and unary signs accepted in one expression.
pub const MAX_EXPRESSION_DEPTH: usize = 64;

/// Errors produced while evaluating a ratio expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("expression does not evaluate to a finite number")]
    NonFinite,

    #[error("expression nests deeper than {max} levels at position {position}", max = MAX_EXPRESSION_DEPTH)]
    TooDeep { position: usize },
}

/// Evaluates an arithmetic expression to a finite `f64`.
///
/// Every intermediate result must be finite too, so `"2 + 1/(1/0)"` fails
/// instead of quietly evaluating to 2.
pub fn evaluate(text: &str) -> Result<f64, ExpressionError> {
    let mut parser = Parser {
        text,
        pos: 0,
        depth: 0,
    };

    parser.skip_whitespace();
    if parser.at_end() {
        return Err(ExpressionError::Empty);
    }

    let value = parser.expression()?;

    parser.skip_whitespace();
    if let Some(found) = parser.peek_char() {
        return Err(ExpressionError::UnexpectedChar {
            found,
            position: parser.pos,
        });
    }

    finite(value)
}

fn finite(value: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NonFinite)
    }
}

/// Recursive descent parser.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := unary (('*' | '/') unary)*
/// unary      := ('+' | '-') unary | primary
/// primary    := number | '(' expression ')'
/// ```
///
/// Only `unary` and the parenthesized branch of `primary` recurse, and both
/// go through `nested`, which bounds the depth.
struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek_byte() {
                Some(b'+') => {
                    self.pos += 1;
                    value = finite(value + self.term()?)?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value = finite(value - self.term()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            self.skip_whitespace();
            match self.peek_byte() {
                Some(b'*') => {
                    self.pos += 1;
                    value = finite(value * self.unary()?)?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    value = finite(value / self.unary()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        self.skip_whitespace();
        match self.peek_byte() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.nested(Self::unary)?)
            }
            Some(b'+') => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        self.skip_whitespace();
        match self.peek_byte() {
            None => Err(ExpressionError::UnexpectedEnd),
            Some(b'(') => {
                self.pos += 1;
                let value = self.nested(Self::expression)?;
                self.skip_whitespace();
                match self.peek_byte() {
                    Some(b')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    None => Err(ExpressionError::UnexpectedEnd),
                    Some(_) => Err(self.unexpected()),
                }
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(_) => Err(self.unexpected()),
        }
    }

    /// Runs `rule` one level deeper, failing once the depth limit is passed.
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<f64, ExpressionError>,
    ) -> Result<f64, ExpressionError> {
        if self.depth >= MAX_EXPRESSION_DEPTH {
            return Err(ExpressionError::TooDeep { position: self.pos });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn number(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'.')
        {
            self.pos += 1;
        }

        // Exponent only when followed by digits, so "2e" stays an error at 'e'.
        if self.pos < bytes.len() && matches!(bytes[self.pos], b'e' | b'E') {
            let mut cursor = self.pos + 1;
            if cursor < bytes.len() && matches!(bytes[cursor], b'+' | b'-') {
                cursor += 1;
            }
            if cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                    cursor += 1;
                }
                self.pos = cursor;
            }
        }

        let literal = &self.text[start..self.pos];
        literal
            .parse::<f64>()
            .map_err(|_| ExpressionError::InvalidNumber(literal.to_string()))
    }

    fn unexpected(&self) -> ExpressionError {
        match self.peek_char() {
            Some(found) => ExpressionError::UnexpectedChar {
                found,
                position: self.pos,
            },
            None => ExpressionError::UnexpectedEnd,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }
}
