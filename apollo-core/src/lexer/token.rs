#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Number(f64),
    String(String),
    // # runs to end of line; skipped by the parser
    Comment,

    // Bitwise
    BitAnd,  // &
    BitOr,   // |
    BitNot,  // ~

    // Logical
    And, // &&
    Or,  // ||
    Not, // !

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    Equal,        // ==
    NotEqual,     // !=
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // Assignment
    Assign,        // =
    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    PercentAssign, // %=

    // Delimiters
    Comma,    // ,
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]

    // Keywords
    If,
    Else,
    True,
    False,
    While,
    Null,
    Func,
    Return,
    Break,
    Continue,

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::If
                | Token::Else
                | Token::True
                | Token::False
                | Token::While
                | Token::Null
                | Token::Func
                | Token::Return
                | Token::Break
                | Token::Continue
        )
    }

    /// Operators that may appear between two expressions.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Token::Or
                | Token::And
                | Token::Equal
                | Token::NotEqual
                | Token::Greater
                | Token::GreaterEqual
                | Token::Less
                | Token::LessEqual
                | Token::Plus
                | Token::Minus
                | Token::BitOr
                | Token::Star
                | Token::Slash
                | Token::Percent
                | Token::BitAnd
        )
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            Token::Assign
                | Token::PlusAssign
                | Token::MinusAssign
                | Token::StarAssign
                | Token::SlashAssign
                | Token::PercentAssign
        )
    }

    /// Whether a token can open an expression; used to decide if a
    /// `return` carries a value.
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Number(_)
                | Token::String(_)
                | Token::True
                | Token::False
                | Token::Null
                | Token::Minus
                | Token::Not
                | Token::BitNot
                | Token::LParen
                | Token::LBracket
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Number(value) => format!("{}", value),
            Token::String(value) => value.clone(),
            Token::Comment => "#".to_string(),

            Token::BitAnd => "&".to_string(),
            Token::BitOr => "|".to_string(),
            Token::BitNot => "~".to_string(),
            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Not => "!".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::Greater => ">".to_string(),
            Token::GreaterEqual => ">=".to_string(),
            Token::Less => "<".to_string(),
            Token::LessEqual => "<=".to_string(),

            Token::Assign => "=".to_string(),
            Token::PlusAssign => "+=".to_string(),
            Token::MinusAssign => "-=".to_string(),
            Token::StarAssign => "*=".to_string(),
            Token::SlashAssign => "/=".to_string(),
            Token::PercentAssign => "%=".to_string(),

            Token::Comma => ",".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),

            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::While => "while".to_string(),
            Token::Null => "null".to_string(),
            Token::Func => "func".to_string(),
            Token::Return => "return".to_string(),
            Token::Break => "break".to_string(),
            Token::Continue => "continue".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
