//! Tokenizer and recursive-descent evaluator for calculator expressions.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := postfix ('^' unary)?
//! postfix := primary '%'*
//! primary := number | '(' expr ')' | 'sqrt' '(' expr ')' | '√' unary
//! ```
//!
//! `^` is right-associative and binds tighter than a leading minus, so
//! `-2^2` is `-4`. A postfix `%` divides its operand by 100.
//!
//! Every recursion passes through `unary`, which fails with
//! [`ParseError::TooDeep`] past [`MAX_DEPTH`] levels.

use thiserror::Error;

/// Deepest nesting of groups, signs and roots accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// Why an expression could not be parsed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number '{text}' at position {pos}")]
    MalformedNumber { text: String, pos: usize },

    #[error("unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("missing closing parenthesis for '(' at position {pos}")]
    UnclosedParen { pos: usize },

    #[error("expression nested too deeply at position {pos}")]
    TooDeep { pos: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    LParen,
    RParen,
    Sqrt,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::Percent => "'%'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Sqrt => "sqrt".to_string(),
        }
    }
}

/// Split an expression into positioned tokens.
fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let pos = i;

        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[pos..i].iter().collect();
                let value = parse_number(&text).ok_or(ParseError::MalformedNumber {
                    text: text.clone(),
                    pos,
                })?;
                tokens.push((Token::Number(value), pos));
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let name: String = chars[pos..i].iter().collect();
                if name != "sqrt" {
                    return Err(ParseError::UnknownFunction { name, pos });
                }
                tokens.push((Token::Sqrt, pos));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' | '×' => Token::Star,
            '/' | '÷' => Token::Slash,
            '^' => Token::Caret,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '√' => Token::Sqrt,
            ch => return Err(ParseError::UnexpectedChar { ch, pos }),
        };

        tokens.push((token, pos));
        i += 1;
    }

    Ok(tokens)
}

/// Parse `12`, `1.5`, `.5` or `5.`. A lone `.` or a second `.` is rejected.
fn parse_number(text: &str) -> Option<f64> {
    if text == "." || text.matches('.').count() > 1 {
        return None;
    }
    let normalized = if let Some(rest) = text.strip_suffix('.') {
        rest
    } else {
        text
    };
    if let Some(fraction) = normalized.strip_prefix('.') {
        return format!("0.{fraction}").parse().ok();
    }
    normalized.parse().ok()
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.index).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.index).copied();
        if next.is_some() {
            self.index += 1;
        }
        next
    }

    fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.index) {
            Some((token, pos)) => ParseError::UnexpectedToken {
                found: token.describe(),
                pos: *pos,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn expr(&mut self) -> Result<f64, ParseError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    value /= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let pos = self.tokens.get(self.index).map_or(0, |(_, pos)| *pos);
            return Err(ParseError::TooDeep { pos });
        }
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, ParseError> {
        let base = self.postfix()?;
        if self.peek() == Some(Token::Caret) {
            self.advance();
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<f64, ParseError> {
        let mut value = self.primary()?;
        while self.peek() == Some(Token::Percent) {
            self.advance();
            value /= 100.0;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<f64, ParseError> {
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, pos)) => self.parenthesized(pos),
            Some((Token::Sqrt, _)) => {
                let operand = match self.peek() {
                    Some(Token::LParen) => {
                        let (_, pos) = self.advance().ok_or(ParseError::UnexpectedEnd)?;
                        self.parenthesized(pos)?
                    }
                    _ => self.unary()?,
                };
                Ok(operand.sqrt())
            }
            Some(_) => {
                self.index -= 1;
                Err(self.unexpected())
            }
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parse the body of a group whose `(` at `open` was already consumed.
    fn parenthesized(&mut self, open: usize) -> Result<f64, ParseError> {
        let value = self.expr()?;
        match self.advance() {
            Some((Token::RParen, _)) => Ok(value),
            Some(_) => {
                self.index -= 1;
                Err(self.unexpected())
            }
            None => Err(ParseError::UnclosedParen { pos: open }),
        }
    }
}

/// Parse and evaluate an arithmetic expression.
///
/// Non-finite results (division by zero, `sqrt` of a negative number) are
/// returned as-is; rejecting them is the caller's decision.
pub fn parse_and_eval(input: &str) -> Result<f64, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if parser.index < parser.tokens.len() {
        return Err(parser.unexpected());
    }

    Ok(value)
}
