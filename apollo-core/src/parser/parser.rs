use super::ast::{Module, Parsed, Program};
use super::error::{ParseError, ParseErrorType};
use crate::{
    lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token},
    utils::prelude::SrcSpan,
};

pub trait Parse<T: Iterator<Item = LexResult>>
where
    Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>,
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = LexResult>>
where
    Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: super::ast::Expression,
        precedence: Option<Precedence>,
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Ok((start, Token::Comment, end))) => {
                    self.comments.push(SrcSpan { start, end })
                }
                Some(Err(err)) => {
                    self.lex_errors.push(err);

                    break;
                }
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                }
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest,
        }
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = Program::parse(self, None);

        if !self.lex_errors.is_empty() {
            let error = self.lex_errors[0].clone();
            let location = error.location;

            return parse_error(
                ParseErrorType::LexError { error },
                SrcSpan {
                    start: location.start,
                    end: location.end,
                },
            );
        }

        let module = Module {
            name: "".into(),
            program: program?,
        };

        Ok(Parsed {
            module,
            comments: std::mem::take(&mut self.comments),
        })
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            }
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end },
                )
            }
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 }),
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            }
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(ParseErrorType::ExpectedIdent, SrcSpan { start, end })
            }
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 }),
        }
    }
}

/// Binding power for the precedence climbing loop. Anything that is not
/// a binary operator maps to `Lowest` and terminates the climb.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    LogicalOr,
    LogicalAnd,
    Comparison,
    Sum,
    Product,
    Prefix,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Or => Self::LogicalOr,
            Token::And => Self::LogicalAnd,
            Token::Equal
            | Token::NotEqual
            | Token::Greater
            | Token::GreaterEqual
            | Token::Less
            | Token::LessEqual => Self::Comparison,
            Token::Plus | Token::Minus | Token::BitOr => Self::Sum,
            Token::Star | Token::Slash | Token::Percent | Token::BitAnd => Self::Product,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(stream.scan(0, |pos, c| {
        *pos += c.len_utf8() as u32;
        Some((*pos - c.len_utf8() as u32, c))
    }));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
