use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
    InvalidNumber { literal: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan,
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            LexicalErrorType::UnrecognizedToken { tok } => (
                "Unrecognized character",
                vec![format!("`{tok}` is not part of the language")],
            ),
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string literal", vec![])
            }
            LexicalErrorType::InvalidNumber { literal } => (
                "Malformed number literal",
                vec![format!("`{literal}` is not a valid number")],
            ),
        }
    }
}
