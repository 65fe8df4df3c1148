//! Restricted arithmetic expression evaluator.
//!
//! Parses a fixed grammar instead of handing the input to any kind of code
//! evaluation:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := '-' factor | power
//! power      := primary ('^' factor)?        right-associative
//! primary    := number | name '(' expression ')' | '(' expression ')'
//! ```
//!
//! Recognized function names: sqrt, abs, sin, cos, tan, log (base 10), ln.
//! Input is pre-checked against a character whitelist, so anything outside
//! digits, operators, parens, dot, whitespace and those names is rejected
//! before tokenization.

use crate::error::{ToolError, ToolResult};

/// Letters that may appear in an expression (the characters of the
/// recognized function names).
const FUNCTION_LETTERS: &str = "sqrtabsincostanlogln";

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Numeric result, always finite.
    pub value: f64,
    /// Parser-rendered form of the input with grouping made explicit,
    /// e.g. `2+3*4` → `(2 + (3 * 4))`. Used by the explain trace.
    pub normalized: String,
}

/// Evaluate a whitelisted arithmetic expression.
///
/// Any lexical, syntactic or numeric failure (including a non-finite result)
/// is reported as `ToolError::InvalidExpression` carrying the original input.
pub fn evaluate(expression: &str) -> ToolResult<Evaluation> {
    let invalid = || ToolError::InvalidExpression(expression.to_string());

    if expression.trim().is_empty() || !is_whitelisted(expression) {
        return Err(invalid());
    }

    let tokens = tokenize(expression).map_err(|reason| {
        tracing::debug!("tokenize failed: {}", reason);
        invalid()
    })?;

    let ast = Parser::new(tokens).parse().map_err(|reason| {
        tracing::debug!("parse failed: {}", reason);
        invalid()
    })?;

    let value = ast.eval();
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(Evaluation {
        value,
        normalized: ast.render(),
    })
}

/// Extract the text of the first `sqrt(...)` radicand, if any.
/// Used for the optional square-root line of the explain trace.
pub fn sqrt_radicand(expression: &str) -> Option<&str> {
    let start = expression.find("sqrt(")? + "sqrt(".len();
    let rest = &expression[start..];
    let end = rest.find(')')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

fn is_whitelisted(expression: &str) -> bool {
    expression.chars().all(|c| {
        c.is_ascii_digit()
            || c.is_whitespace()
            || "+-*/().^".contains(c)
            || FUNCTION_LETTERS.contains(c)
    })
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| format!("bad number literal: {}", literal))?;
                tokens.push(Token::Number(value));
            }
            'a'..='z' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_lowercase() {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Name(name));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(format!("unexpected character: {}", other)),
        }
    }

    Ok(tokens)
}

// ============================================================================
// Parser / AST
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Func {
    Sqrt,
    Abs,
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Func::Sqrt),
            "abs" => Some(Func::Abs),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "log" => Some(Func::Log),
            "ln" => Some(Func::Ln),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Log => "log",
            Func::Ln => "ln",
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sqrt => x.sqrt(),
            Func::Abs => x.abs(),
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Log => x.log10(),
            Func::Ln => x.ln(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    fn eval(&self) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval(),
            Expr::Add(l, r) => l.eval() + r.eval(),
            Expr::Sub(l, r) => l.eval() - r.eval(),
            Expr::Mul(l, r) => l.eval() * r.eval(),
            Expr::Div(l, r) => l.eval() / r.eval(),
            Expr::Pow(l, r) => l.eval().powf(r.eval()),
            Expr::Call(f, arg) => f.apply(arg.eval()),
        }
    }

    /// Render with explicit grouping so the explain trace shows how the
    /// expression was parsed.
    fn render(&self) -> String {
        match self {
            Expr::Number(n) => format!("{}", n),
            Expr::Neg(inner) => format!("(-{})", inner.render()),
            Expr::Add(l, r) => format!("({} + {})", l.render(), r.render()),
            Expr::Sub(l, r) => format!("({} - {})", l.render(), r.render()),
            Expr::Mul(l, r) => format!("({} * {})", l.render(), r.render()),
            Expr::Div(l, r) => format!("({} / {})", l.render(), r.render()),
            Expr::Pow(l, r) => format!("({} ^ {})", l.render(), r.render()),
            Expr::Call(f, arg) => format!("{}({})", f.name(), arg.render()),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Expr, String> {
        let expr = self.expression()?;
        match self.peek() {
            None => Ok(expr),
            Some(t) => Err(format!("trailing token: {:?}", t)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, token: Token) -> Result<(), String> {
        match self.advance() {
            Some(t) if t == token => Ok(()),
            Some(t) => Err(format!("expected {:?}, found {:?}", token, t)),
            None => Err(format!("expected {:?}, found end of input", token)),
        }
    }

    fn expression(&mut self) -> Result<Expr, String> {
        let mut node = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.advance();
                    node = Expr::Add(Box::new(node), Box::new(self.term()?));
                }
                Token::Minus => {
                    self.advance();
                    node = Expr::Sub(Box::new(node), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, String> {
        let mut node = self.factor()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.advance();
                    node = Expr::Mul(Box::new(node), Box::new(self.factor()?));
                }
                Token::Slash => {
                    self.advance();
                    node = Expr::Div(Box::new(node), Box::new(self.factor()?));
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr, String> {
        if let Some(Token::Minus) = self.peek() {
            self.advance();
            return Ok(Expr::Neg(Box::new(self.factor()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, String> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            // Right-associative; the exponent may itself be signed.
            let exponent = self.factor()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Name(name)) => {
                let func = Func::from_name(&name)
                    .ok_or_else(|| format!("unknown function: {}", name))?;
                self.expect(Token::LParen)?;
                let arg = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            Some(t) => Err(format!("unexpected token: {:?}", t)),
            None => Err("unexpected end of input".to_string()),
        }
    }
}
