use crate::{
    lexer::prelude::{LexicalError, Token},
    utils::prelude::SrcSpan,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    InvalidAssignmentTarget,
    DuplicateFunction { name: String },
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::InvalidAssignmentTarget => (
                "Can only assign to an identifier or an index expression",
                vec![],
            ),
            ParseErrorType::DuplicateFunction { name } => (
                "Duplicate function definition",
                vec![format!("`{name}` is already defined")],
            ),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::String(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    Token::Eof => "the end of the file".to_string(),
                    _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal()),
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            }
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::LexError { error } => error.details(),
        }
    }
}
