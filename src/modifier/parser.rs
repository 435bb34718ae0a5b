use crate::modifier::error::ParseError;
use crate::modifier::lexer::{Span, Token, TokenKind, lex};

/// One argument of a call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Arg {
    Number(f64, Span),
    Bool(bool, Span),
    Call(Call),
}

impl Arg {
    pub(crate) fn span(&self) -> Span {
        match self {
            Self::Number(_, s) | Self::Bool(_, s) => *s,
            Self::Call(c) => c.span,
        }
    }
}

/// `name` or `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub(crate) name: String,
    pub(crate) args: Vec<Arg>,
    pub(crate) span: Span,
}

/// Parse a whitespace- or comma-separated sequence of calls.
pub(crate) fn parse_calls(src: &str) -> Result<Vec<Call>, ParseError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let calls = p.parse_sequence(&TokenKind::Eof)?;
    p.expect(TokenKind::Eof)?;
    Ok(calls)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::new(
                self.peek().span.start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_sequence(&mut self, end: &TokenKind) -> Result<Vec<Call>, ParseError> {
        let mut out = Vec::new();
        while &self.peek().kind != end {
            out.push(self.parse_call()?);
            self.consume(TokenKind::Comma);
        }
        Ok(out)
    }

    fn parse_call(&mut self) -> Result<Call, ParseError> {
        let tok = self.bump();
        let TokenKind::Ident(name) = tok.kind else {
            return Err(ParseError::new(
                tok.span.start,
                format!("expected a modifier name, found {:?}", tok.kind),
            ));
        };
        let mut span = tok.span;
        let mut args = Vec::new();
        if self.consume(TokenKind::LParen) {
            while self.peek().kind != TokenKind::RParen {
                args.push(self.parse_arg()?);
                self.consume(TokenKind::Comma);
            }
            span.end = self.peek().span.end;
            self.expect(TokenKind::RParen)?;
        }
        Ok(Call { name, args, span })
    }

    fn parse_arg(&mut self) -> Result<Arg, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Number(v) => {
                self.bump();
                Ok(Arg::Number(v, tok.span))
            }
            TokenKind::Minus => {
                self.bump();
                let next = self.bump();
                match next.kind {
                    TokenKind::Number(v) => Ok(Arg::Number(
                        -v,
                        Span {
                            start: tok.span.start,
                            end: next.span.end,
                        },
                    )),
                    other => Err(ParseError::new(
                        next.span.start,
                        format!("expected a number after '-', found {other:?}"),
                    )),
                }
            }
            TokenKind::True => {
                self.bump();
                Ok(Arg::Bool(true, tok.span))
            }
            TokenKind::False => {
                self.bump();
                Ok(Arg::Bool(false, tok.span))
            }
            TokenKind::Ident(_) => Ok(Arg::Call(self.parse_call()?)),
            other => Err(ParseError::new(
                tok.span.start,
                format!("unexpected {other:?} in argument list"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modifier/parser.rs"]
mod tests;
