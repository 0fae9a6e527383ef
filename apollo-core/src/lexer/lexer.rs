use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "null" => Token::Null,
        "true" => Token::True,
        "false" => Token::False,
        "func" => Token::Func,
        "return" => Token::Return,
        "break" => Token::Break,
        "continue" => Token::Continue,
        _ => return None,
    })
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    position: u32,
    next_position: u32,
    ch: Option<char>,
    next_ch: Option<char>,
    input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
        let span = match self.ch {
            Some(ch) => match ch {
                '#' => return Ok(self.lex_comment()),
                '\'' | '"' => return self.lex_string(ch),
                '(' => self.eat_one_char(Token::LParen),
                ')' => self.eat_one_char(Token::RParen),
                '{' => self.eat_one_char(Token::LBrace),
                '}' => self.eat_one_char(Token::RBrace),
                '[' => self.eat_one_char(Token::LBracket),
                ']' => self.eat_one_char(Token::RBracket),
                ',' => self.eat_one_char(Token::Comma),
                '~' => self.eat_one_char(Token::BitNot),
                '+' => self.eat_with_assign(Token::Plus, Token::PlusAssign),
                '-' => self.eat_with_assign(Token::Minus, Token::MinusAssign),
                '*' => self.eat_with_assign(Token::Star, Token::StarAssign),
                '/' => self.eat_with_assign(Token::Slash, Token::SlashAssign),
                '%' => self.eat_with_assign(Token::Percent, Token::PercentAssign),
                '=' => self.eat_with_assign(Token::Assign, Token::Equal),
                '!' => self.eat_with_assign(Token::Not, Token::NotEqual),
                '>' => self.eat_with_assign(Token::Greater, Token::GreaterEqual),
                '<' => self.eat_with_assign(Token::Less, Token::LessEqual),
                '&' => self.eat_doubled(Token::BitAnd, Token::And),
                '|' => self.eat_doubled(Token::BitOr, Token::Or),
                'a'..='z' | 'A'..='Z' | '_' => return Ok(self.lex_ident()),
                '0'..='9' => return self.lex_number(),
                ' ' | '\t' | '\n' | '\r' | '\x0C' => {
                    self.next_char();
                    return self.next_token();
                }
                c => {
                    let location = self.position;
                    return Err(LexicalError {
                        error: LexicalErrorType::UnrecognizedToken { tok: c },
                        location: SrcSpan {
                            start: location,
                            end: location,
                        },
                    });
                }
            },
            None => self.eat_one_char(Token::Eof),
        };

        Ok(span)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch;

        let next = match self.input.next() {
            Some((pos, ch)) => {
                self.position = self.next_position;
                self.next_position = pos;

                Some(ch)
            }
            None => {
                self.position = self.next_position;
                self.next_position += 1;

                None
            }
        };

        self.ch = self.next_ch;
        self.next_ch = next;

        ch
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    /// One-character lookahead: `<symbol>=` forms take priority over
    /// the bare symbol.
    fn eat_with_assign(&mut self, bare: Token, with_equal: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();

        let token = if self.ch == Some('=') {
            self.next_char();
            with_equal
        } else {
            bare
        };

        let end_pos = self.position;
        (start_pos, token, end_pos)
    }

    /// `&`/`&&` and `|`/`||` disambiguation.
    fn eat_doubled(&mut self, single: Token, doubled: Token) -> Spanned {
        let start_pos = self.position;
        let first = self.ch;
        self.next_char();

        let token = if self.ch == first {
            self.next_char();
            doubled
        } else {
            single
        };

        let end_pos = self.position;
        (start_pos, token, end_pos)
    }

    fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut ident = String::new();

        while let Some(ch) = self.ch {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.next_char();
            } else {
                break;
            }
        }

        let end_pos = self.position;

        match str_to_keyword(&ident) {
            Some(tok) => (start_pos, tok, end_pos),
            None => (start_pos, Token::Ident(ident), end_pos),
        }
    }

    fn lex_number(&mut self) -> LexResult {
        let start_pos = self.position;
        let mut value = String::new();
        let mut has_period = false;

        while let Some(ch) = self.ch {
            match ch {
                '0'..='9' => {
                    value.push(ch);
                    self.next_char();
                }
                '.' if !has_period => {
                    has_period = true;
                    value.push(ch);
                    self.next_char();
                }
                _ => break,
            }
        }

        let end_pos = self.position;

        match value.parse::<f64>() {
            Ok(number) => Ok((start_pos, Token::Number(number), end_pos)),
            Err(_) => Err(LexicalError {
                error: LexicalErrorType::InvalidNumber { literal: value },
                location: SrcSpan::from(start_pos, end_pos),
            }),
        }
    }

    /// Single- and double-quoted strings; raw characters, no escapes.
    fn lex_string(&mut self, quote: char) -> LexResult {
        let start_pos = self.position;
        self.next_char();

        let mut value = String::new();

        loop {
            match self.ch {
                Some(ch) if ch == quote => {
                    self.next_char();
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.next_char();
                }
                None => {
                    return Err(LexicalError {
                        error: LexicalErrorType::UnterminatedString,
                        location: SrcSpan::from(start_pos, self.position),
                    })
                }
            }
        }

        let end_pos = self.position;

        Ok((start_pos, Token::String(value), end_pos))
    }

    fn lex_comment(&mut self) -> Spanned {
        let start_pos = self.position;

        while !matches!(self.ch, Some('\n') | None) {
            self.next_char();
        }

        let end_pos = self.position;

        (start_pos, Token::Comment, end_pos)
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}
