use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use super::diagnostic::{Diagnostic, Label, Level, Location};
use crate::{
    eval::error::RuntimeError,
    lexer::prelude::Token,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError,
    },
    #[error("program execution failed")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError,
    },
    #[error("IO operation failed")]
    StdIo { err: std::io::ErrorKind },
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                // errors at the end of input point past the last token
                let at_eof = matches!(
                    error.error,
                    ParseErrorType::UnexpectedEof
                        | ParseErrorType::UnexpectedToken {
                            token: Token::Eof,
                            ..
                        }
                );

                let adjusted_location = if at_eof {
                    SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    }
                } else {
                    error.span
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            }
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                vec![Diagnostic {
                    title: "Runtime error".into(),
                    text,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            }
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
