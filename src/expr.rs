//! Order-total expressions
//!
//! The order-total field lets the operator add up several orders in place,
//! e.g. `1000+500*2`. Input is first reduced to the characters
//! `0-9 + - * / ( ) .`, then parsed by a small recursive-descent parser.
//! Nothing else is ever evaluated.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `++` and `--` are rejected, as are multi-digit literals starting with `0`
//! (`007`, `08`).
//!
//! ```
//! use order_price::expr::{evaluate, ExprError};
//!
//! assert_eq!(evaluate("1000+500*2"), Ok(2000.0));
//! assert_eq!(evaluate("¥1,200 + 300"), Ok(1500.0));
//! assert_eq!(evaluate("1/0"), Err(ExprError::NonFinite));
//! ```

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Nesting limit for parentheses and unary signs
pub const MAX_DEPTH: usize = 64;

/// Why an expression produced no value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("malformed number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedToken { pos: usize, found: char },

    #[error("expression ends unexpectedly")]
    UnexpectedEnd,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression nests deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        write!(f, "{}", s)
    }
}

/// Parsed expression tree
///
/// Operators of one precedence level sit side by side in a [`Expr::Chain`],
/// so tree depth grows only with parentheses and unary signs.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    /// `first op operand op operand ...`, applied left to right
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
}

impl Expr {
    /// Evaluate with IEEE semantics; finiteness is checked by [`evaluate`]
    pub fn eval(&self) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval(),
            Expr::Chain { first, rest } => rest
                .iter()
                .fold(first.eval(), |acc, (op, operand)| op.apply(acc, operand.eval())),
        }
    }

    fn chain(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
        if rest.is_empty() {
            first
        } else {
            Expr::Chain {
                first: Box::new(first),
                rest,
            }
        }
    }
}

static DISALLOWED: OnceLock<Regex> = OnceLock::new();
static LEADING_ZEROS: OnceLock<Regex> = OnceLock::new();

/// Drop every character outside the expression alphabet
pub fn sanitize(raw: &str) -> String {
    DISALLOWED
        .get_or_init(|| Regex::new(r"[^0-9+\-*/().]").expect("valid sanitize pattern"))
        .replace_all(raw, "")
        .into_owned()
}

/// Strip zeros in front of the first digit (`"007+1"` becomes `"7+1"`)
pub fn strip_leading_zeros(raw: &str) -> String {
    LEADING_ZEROS
        .get_or_init(|| Regex::new(r"^0+([0-9])").expect("valid leading-zero pattern"))
        .replace(raw, "$1")
        .into_owned()
}

/// Sanitize, parse and evaluate an order-total expression
pub fn evaluate(raw: &str) -> Result<f64, ExprError> {
    let expr = parse(&sanitize(raw))?;
    let value = expr.eval();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::NonFinite)
    }
}

/// Parse already-sanitized text into an expression tree
pub fn parse(text: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(tok.unexpected()),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Op(BinaryOp),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
    ch: char,
}

impl Token {
    fn unexpected(&self) -> ExprError {
        ExprError::UnexpectedToken {
            pos: self.pos,
            found: self.ch,
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if matches!(ch, '+' | '-') && tokens.last().is_some_and(|t: &Token| t.ch == ch) {
            return Err(ExprError::UnexpectedToken { pos: i, found: ch });
        }
        let kind = match ch {
            '+' => TokenKind::Op(BinaryOp::Add),
            '-' => TokenKind::Op(BinaryOp::Sub),
            '*' => TokenKind::Op(BinaryOp::Mul),
            '/' => TokenKind::Op(BinaryOp::Div),
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = parse_literal(&literal)?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    pos: start,
                    ch,
                });
                continue;
            }
            other => return Err(ExprError::UnexpectedToken { pos: i, found: other }),
        };
        tokens.push(Token { kind, pos: i, ch });
        i += 1;
    }

    Ok(tokens)
}

fn parse_literal(literal: &str) -> Result<f64, ExprError> {
    let dots = literal.matches('.').count();
    let has_digit = literal.chars().any(|c| c.is_ascii_digit());
    let leading_zero = literal.starts_with('0')
        && literal[1..].starts_with(|c: char| c.is_ascii_digit());
    if dots > 1 || !has_digit || leading_zero {
        return Err(ExprError::InvalidNumber(literal.to_string()));
    }
    literal
        .parse::<f64>()
        .map_err(|_| ExprError::InvalidNumber(literal.to_string()))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn next_op(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Op(op),
                ..
            }) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        while let Some(op) = self.next_op(&[BinaryOp::Add, BinaryOp::Sub]) {
            rest.push((op, self.term()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        while let Some(op) = self.next_op(&[BinaryOp::Mul, BinaryOp::Div]) {
            rest.push((op, self.unary()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        match self.next_op(&[BinaryOp::Add, BinaryOp::Sub]) {
            Some(op) => {
                self.descend()?;
                let operand = self.unary()?;
                self.depth -= 1;
                Ok(match op {
                    BinaryOp::Sub => Expr::Neg(Box::new(operand)),
                    _ => operand,
                })
            }
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let tok = self.next().cloned().ok_or(ExprError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(other.unexpected()),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            _ => Err(tok.unexpected()),
        }
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(ExprError::TooDeep)
        } else {
            Ok(())
        }
    }
}
