//! Arithmetic expression parser and evaluator.
//!
//! Grammar (whitespace allowed between tokens):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := number | '(' expr ')'
//! number  := digits ('.' digits?)? | '.' digits
//! ```
//!
//! A number may not start with a redundant zero (`012`), and two numbers or
//! a number and a parenthesis may not be juxtaposed (`2(3)`). Parentheses
//! and unary minus together may nest at most [`MAX_DEPTH`] levels.

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    #[error("unexpected {found:?} at position {pos}")]
    Unexpected { pos: usize, found: char },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("malformed number at position {0}")]
    BadNumber(usize),
    #[error("result is not a finite number")]
    NonFinite,
    #[error("expression nested deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Deepest allowed nesting of parentheses and unary minus.
pub const MAX_DEPTH: usize = 256;

/// Characters an expression may contain at all.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | '(' | ')') || c.is_whitespace()
}

/// Parse and evaluate `input`.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    if let Some(bad) = input.chars().find(|c| !is_allowed_char(*c)) {
        return Err(EvalError::InvalidChar(bad));
    }

    let mut parser = Parser::new(input);
    parser.skip_ws();
    if parser.peek().is_none() {
        return Err(EvalError::Empty);
    }

    let value = parser.expr()?;
    parser.skip_ws();
    if let Some((pos, found)) = parser.peek_pos() {
        return Err(EvalError::Unexpected { pos, found });
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

struct Parser<'a> {
    chars: Vec<(usize, char)>,
    index: usize,
    depth: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().collect(),
            index: 0,
            depth: 0,
            source,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, c)| *c)
    }

    fn peek_pos(&self) -> Option<(usize, char)> {
        self.chars.get(self.index).copied()
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(i, _)| *i)
            .unwrap_or(self.source.len())
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.index += 1;
        }
    }

    /// Next non-space character, consumed if it is one of `ops`.
    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        self.skip_ws();
        match self.peek() {
            Some(c) if ops.contains(&c) => {
                self.index += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            if op == '+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/']) {
            let rhs = self.unary()?;
            if op == '*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.eat_op(&['-']).is_some() {
            self.descend()?;
            let value = -self.unary()?;
            self.depth -= 1;
            return Ok(value);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        self.skip_ws();
        match self.peek_pos() {
            None => Err(EvalError::UnexpectedEnd),
            Some((_, '(')) => {
                self.index += 1;
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                self.skip_ws();
                match self.peek_pos() {
                    Some((_, ')')) => {
                        self.index += 1;
                        self.reject_juxtaposition()?;
                        Ok(value)
                    }
                    Some((pos, found)) => Err(EvalError::Unexpected { pos, found }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some((_, c)) if c.is_ascii_digit() || c == '.' => {
                let value = self.number()?;
                self.reject_juxtaposition()?;
                Ok(value)
            }
            Some((pos, found)) => Err(EvalError::Unexpected { pos, found }),
        }
    }

    /// An operand must be followed by an operator, `)` or the end.
    fn reject_juxtaposition(&mut self) -> Result<(), EvalError> {
        self.skip_ws();
        match self.peek_pos() {
            Some((pos, found)) if found == '(' || found == '.' || found.is_ascii_digit() => {
                Err(EvalError::Unexpected { pos, found })
            }
            _ => Ok(()),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.offset();
        let start_index = self.index;

        let int_digits = self.digits();
        let mut frac_digits = 0;
        let has_point = self.peek() == Some('.');
        if has_point {
            self.index += 1;
            frac_digits = self.digits();
        }

        if int_digits == 0 && frac_digits == 0 {
            return Err(EvalError::BadNumber(start));
        }
        if int_digits > 1 && self.chars[start_index].1 == '0' {
            return Err(EvalError::BadNumber(start));
        }
        // "1.2.3" and "2..3"
        if self.peek() == Some('.') {
            return Err(EvalError::BadNumber(start));
        }

        let text = &self.source[start..self.offset()];
        text.parse::<f64>().map_err(|_| EvalError::BadNumber(start))
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.index += 1;
            count += 1;
        }
        count
    }
}
