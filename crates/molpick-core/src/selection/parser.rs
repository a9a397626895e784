//! Recursive descent parser for the selection language.
//!
//! Precedence, weakest to tightest binding:
//!
//! ```text
//! disjunction := conjunction (("or" | "xor") conjunction)*
//! conjunction := negation ("and" negation)*
//! negation    := "not" negation | prefixed
//! prefixed    := ("around" | "xaround" | "beyond") RADIUS prefixed
//!              | ("byres" | "bychain") prefixed
//!              | primary
//! primary     := "(" disjunction ")" | predicate | bare keyword
//! ```
//!
//! `or` and `xor` share the weakest level and associate left; runs of the
//! same operator collapse into one n-ary node (`a or b or c` is a single
//! union, `a xor b xor c` means "in exactly one of the three"), while a
//! parenthesized operand stays a nested child (`(a xor b) xor c` is not
//! flattened).

use crate::selection::ast::{CmpOp, Expr, NamePattern, NumTest};
use crate::selection::error::SelectionError;
use crate::selection::token::{Lexer, SpannedToken, Token};

/// Parser state wrapping a token stream.
pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    input: String,
}

impl Parser {
    pub fn new(tokens: Vec<SpannedToken>, input: String) -> Self {
        Self {
            tokens,
            pos: 0,
            input,
        }
    }

    pub fn parse(mut self) -> Result<Expr, SelectionError> {
        let expr = self.parse_disjunction()?;
        if !self.at_eof() {
            return Err(self.err_here("unexpected trailing input"));
        }
        Ok(expr)
    }

    fn current(&self) -> &SpannedToken {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at_eof(&self) -> bool {
        self.current().token == Token::Eof
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn err_here(&self, msg: impl Into<String>) -> SelectionError {
        SelectionError::syntax(msg, &self.input, self.current().span)
    }

    fn err_at(&self, msg: impl Into<String>, span: (usize, usize)) -> SelectionError {
        SelectionError::syntax(msg, &self.input, span)
    }

    fn parse_disjunction(&mut self) -> Result<Expr, SelectionError> {
        let mut left = self.parse_conjunction()?;
        loop {
            let op = match self.current().token {
                Token::Or => Token::Or,
                Token::Xor => Token::Xor,
                _ => break,
            };
            self.advance();
            let mut operands = vec![left, self.parse_conjunction()?];
            while self.current().token == op {
                self.advance();
                operands.push(self.parse_conjunction()?);
            }
            left = match op {
                Token::Or => Expr::Or(operands),
                _ => Expr::Xor(operands),
            };
        }
        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<Expr, SelectionError> {
        let left = self.parse_negation()?;
        if self.current().token != Token::And {
            return Ok(left);
        }
        let mut operands = vec![left];
        while self.current().token == Token::And {
            self.advance();
            operands.push(self.parse_negation()?);
        }
        Ok(Expr::And(operands))
    }

    fn parse_negation(&mut self) -> Result<Expr, SelectionError> {
        if self.current().token == Token::Not {
            self.advance();
            let inner = self.parse_negation()?;
            Ok(Expr::Not(Box::new(inner)))
        } else {
            self.parse_prefixed()
        }
    }

    fn parse_prefixed(&mut self) -> Result<Expr, SelectionError> {
        match self.current().token {
            Token::Around => {
                self.advance();
                let radius = self.parse_radius()?;
                let inner = Box::new(self.parse_prefixed()?);
                Ok(Expr::Around { radius, inner })
            }
            Token::XAround => {
                self.advance();
                let radius = self.parse_radius()?;
                let inner = Box::new(self.parse_prefixed()?);
                Ok(Expr::XAround { radius, inner })
            }
            Token::Beyond => {
                self.advance();
                let radius = self.parse_radius()?;
                let inner = Box::new(self.parse_prefixed()?);
                Ok(Expr::Beyond { radius, inner })
            }
            Token::ByRes => {
                self.advance();
                Ok(Expr::ByRes(Box::new(self.parse_prefixed()?)))
            }
            Token::ByChain => {
                self.advance();
                Ok(Expr::ByChain(Box::new(self.parse_prefixed()?)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, SelectionError> {
        match self.current().token.clone() {
            Token::LParen => {
                self.advance();
                let inner = self.parse_disjunction()?;
                if self.current().token != Token::RParen {
                    return Err(self.err_here("expected ')'"));
                }
                self.advance();
                Ok(inner)
            }
            Token::Keyword(keyword) => {
                self.advance();
                Ok(Expr::Keyword(keyword))
            }
            Token::Name => {
                self.advance();
                Ok(Expr::Name(self.parse_value_list("name")?))
            }
            Token::Resn => {
                self.advance();
                Ok(Expr::ResName(self.parse_value_list("resn")?))
            }
            Token::Chain => {
                self.advance();
                Ok(Expr::Chain(self.parse_chain_id()?))
            }
            Token::Elem => {
                self.advance();
                Ok(Expr::Element(self.parse_element()?))
            }
            Token::Resi => {
                self.advance();
                Ok(Expr::ResSeq(self.parse_num_test()?))
            }
            Token::Index => {
                self.advance();
                Ok(Expr::Index(self.parse_num_test()?))
            }
            _ => Err(self.err_here("expected selection expression")),
        }
    }

    fn parse_value_list(&mut self, predicate: &str) -> Result<Vec<NamePattern>, SelectionError> {
        let tok = self.current().clone();
        let Token::Ident(raw) = tok.token else {
            return Err(self.err_at(format!("expected value after '{predicate}'"), tok.span));
        };
        self.advance();
        let mut patterns = Vec::with_capacity(1);
        for part in raw.split('+') {
            if part.is_empty() {
                return Err(self.err_at(format!("empty entry in '{predicate}' list"), tok.span));
            }
            let pattern = NamePattern::parse(part)
                .map_err(|_| self.err_at(format!("invalid pattern '{part}'"), tok.span))?;
            patterns.push(pattern);
        }
        Ok(patterns)
    }

    fn parse_chain_id(&mut self) -> Result<char, SelectionError> {
        let tok = self.current().clone();
        let id = match &tok.token {
            Token::Ident(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(
                            self.err_at("chain identifier must be a single character", tok.span)
                        );
                    }
                }
            }
            Token::Integer(n) if (0..=9).contains(n) => (b'0' + *n as u8) as char,
            _ => return Err(self.err_at("expected chain identifier after 'chain'", tok.span)),
        };
        self.advance();
        Ok(id)
    }

    fn parse_element(&mut self) -> Result<String, SelectionError> {
        let tok = self.current().clone();
        let Token::Ident(symbol) = tok.token else {
            return Err(self.err_at("expected element symbol after 'elem'", tok.span));
        };
        self.advance();
        Ok(symbol)
    }

    fn parse_num_test(&mut self) -> Result<NumTest, SelectionError> {
        let op = match self.current().token {
            Token::EqEq => Some(CmpOp::Eq),
            Token::Ge => Some(CmpOp::Ge),
            Token::Le => Some(CmpOp::Le),
            Token::Gt => Some(CmpOp::Gt),
            Token::Lt => Some(CmpOp::Lt),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let value = self.parse_signed_integer()?;
            return Ok(NumTest::Cmp(op, value));
        }
        let first = self.expect_integer()?;
        if self.current().token == Token::Dash {
            self.advance();
            let second = self.expect_integer()?;
            Ok(NumTest::Range(first, second))
        } else {
            Ok(NumTest::Single(first))
        }
    }

    fn parse_signed_integer(&mut self) -> Result<i64, SelectionError> {
        let negative = if self.current().token == Token::Dash {
            self.advance();
            true
        } else {
            false
        };
        let value = self.expect_integer()?;
        Ok(if negative { -value } else { value })
    }

    fn expect_integer(&mut self) -> Result<i64, SelectionError> {
        match self.current().token {
            Token::Integer(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.err_here("expected integer")),
        }
    }

    fn parse_radius(&mut self) -> Result<f64, SelectionError> {
        let radius = match self.current().token {
            Token::Float(f) => f,
            Token::Integer(i) => i as f64,
            _ => return Err(self.err_here("expected a non-negative radius")),
        };
        self.advance();
        Ok(radius)
    }
}

/// Parses a selection expression string into an AST.
///
/// # Errors
///
/// Returns [`SelectionError::Syntax`] identifying the offending text when the
/// input does not match the grammar; no partial AST is ever produced.
pub fn parse_selection(input: &str) -> Result<Expr, SelectionError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens, input.to_string()).parse()
}
