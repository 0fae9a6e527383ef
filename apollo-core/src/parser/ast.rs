use std::collections::HashMap;
use std::fmt::Display;

use super::error::{ParseError, ParseErrorType};
use super::parser::{parse_error, InfixParse, Parse, Parser, Precedence};
use crate::{
    lexer::prelude::{LexResult, Token},
    utils::prelude::SrcSpan,
};

#[derive(Debug)]
pub struct Parsed {
    pub module: Module,
    pub comments: Vec<SrcSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub program: Program,
}

// program -> { <function> | <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub functions: HashMap<String, FunctionDeclaration>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let mut statements = vec![];
        let mut functions: HashMap<String, FunctionDeclaration> = HashMap::new();
        let mut location = SrcSpan { start: 0, end: 0 };
        let mut first = true;

        loop {
            match &parser.current_token {
                None | Some((_, Token::Eof, _)) => break,
                Some((start, Token::Func, _)) => {
                    let start = *start;
                    let function = FunctionDeclaration::parse(parser, None)?;

                    if first {
                        location.start = start;
                        first = false;
                    }
                    location.end = function.location.end;

                    if functions.contains_key(&function.name) {
                        return parse_error(
                            ParseErrorType::DuplicateFunction {
                                name: function.name.clone(),
                            },
                            function.location,
                        );
                    }

                    let _ = functions.insert(function.name.clone(), function);
                }
                Some((start, _, _)) => {
                    let start = *start;
                    let statement = Statement::parse(parser, None)?;

                    if first {
                        location.start = start;
                        first = false;
                    }
                    location.end = statement.location().end;

                    statements.push(statement);
                }
            }
        }

        Ok(Self {
            statements,
            functions,
            location,
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut functions: Vec<_> = self.functions.values().collect();
        functions.sort_by(|a, b| a.location.start.cmp(&b.location.start));

        for function in functions {
            writeln!(f, "{function}")?;
        }

        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }

        Ok(())
    }
}

// function -> func <identifier> ( [ <identifier> {, <identifier>} ] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDeclaration {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Func)?;
        let (_, name, _) = parser.expect_ident()?;

        let _ = parser.expect_one(Token::LParen)?;

        let mut params = vec![];
        if !matches!(&parser.current_token, Some((_, Token::RParen, _))) {
            loop {
                let (_, param, _) = parser.expect_ident()?;
                params.push(param);

                match &parser.current_token {
                    Some((_, Token::Comma, _)) => parser.step(),
                    _ => break,
                }
            }
        }

        let _ = parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            name,
            params,
            body,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "func {}({}) {}",
            self.name,
            self.params.join(", "),
            self.body
        )
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;
        let mut statements = vec![];

        let end = loop {
            match &parser.current_token {
                Some((_, Token::RBrace, _)) => {
                    let (_, end) = parser.expect_one(Token::RBrace)?;
                    break end;
                }
                _ => statements.push(Statement::parse(parser, None)?),
            }
        };

        Ok(Self {
            statements,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for statement in &self.statements {
            write!(f, "{statement} ")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression {
        expression: Expression,
        location: SrcSpan,
    },
    If {
        condition: Expression,
        consequence: Block,
        alternative: Option<Block>,
        location: SrcSpan,
    },
    While {
        condition: Expression,
        body: Block,
        location: SrcSpan,
    },
    Return {
        value: Option<Expression>,
        location: SrcSpan,
    },
    Break {
        location: SrcSpan,
    },
    Continue {
        location: SrcSpan,
    },
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression { location, .. }
            | Self::If { location, .. }
            | Self::While { location, .. }
            | Self::Return { location, .. }
            | Self::Break { location }
            | Self::Continue { location } => *location,
        }
    }

    // conditional -> if ( <expression> ) <block> [ else <block> ]
    fn parse_if<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        let _ = parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        let _ = parser.expect_one(Token::RParen)?;

        let consequence = Block::parse(parser, None)?;
        let mut end = consequence.location.end;

        let alternative = match &parser.current_token {
            Some((_, Token::Else, _)) => {
                parser.step();

                let alternative = Block::parse(parser, None)?;
                end = alternative.location.end;

                Some(alternative)
            }
            _ => None,
        };

        Ok(Self::If {
            condition,
            consequence,
            alternative,
            location: SrcSpan { start, end },
        })
    }

    // loop -> while ( <expression> ) <block>
    fn parse_while<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let _ = parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        let _ = parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self::While {
            condition,
            body,
            location: SrcSpan { start, end },
        })
    }

    // return -> return [ <expression> ]
    fn parse_return<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(Token::Return)?;

        let value = match &parser.current_token {
            Some((_, token, _)) if token.starts_expression() => {
                let value = Expression::parse(parser, None)?;
                end = value.location().end;

                Some(value)
            }
            _ => None,
        };

        Ok(Self::Return {
            value,
            location: SrcSpan { start, end },
        })
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        match &parser.current_token {
            Some((_, Token::If, _)) => Self::parse_if(parser),
            Some((_, Token::While, _)) => Self::parse_while(parser),
            Some((_, Token::Return, _)) => Self::parse_return(parser),
            Some((start, Token::Break, end)) => {
                let location = SrcSpan {
                    start: *start,
                    end: *end,
                };
                parser.step();

                Ok(Self::Break { location })
            }
            Some((start, Token::Continue, end)) => {
                let location = SrcSpan {
                    start: *start,
                    end: *end,
                };
                parser.step();

                Ok(Self::Continue { location })
            }
            Some(_) => {
                let expression = Expression::parse(parser, None)?;
                let location = expression.location();

                Ok(Self::Expression {
                    expression,
                    location,
                })
            }
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 }),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression { expression, .. } => write!(f, "{expression}"),
            Self::If {
                condition,
                consequence,
                alternative,
                ..
            } => match alternative {
                Some(alternative) => {
                    write!(f, "if ({condition}) {consequence} else {alternative}")
                }
                None => write!(f, "if ({condition}) {consequence}"),
            },
            Self::While {
                condition, body, ..
            } => write!(f, "while ({condition}) {body}"),
            Self::Return { value, .. } => match value {
                Some(value) => write!(f, "return {value}"),
                None => write!(f, "return"),
            },
            Self::Break { .. } => write!(f, "break"),
            Self::Continue { .. } => write!(f, "continue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan,
}

impl From<(u32, String, u32)> for Identifier {
    fn from((start, value, end): (u32, String, u32)) -> Self {
        Self {
            value,
            location: SrcSpan { start, end },
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Null {
        location: SrcSpan,
    },
    Boolean {
        value: bool,
        location: SrcSpan,
    },
    Number {
        value: f64,
        location: SrcSpan,
    },
    String {
        value: String,
        location: SrcSpan,
    },
    Array {
        elements: Vec<Expression>,
        location: SrcSpan,
    },
    Identifier(Identifier),
    Index(IndexExpression),
    Unary(UnaryExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Assign(AssignExpression),
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Null { location }
            | Self::Boolean { location, .. }
            | Self::Number { location, .. }
            | Self::String { location, .. }
            | Self::Array { location, .. } => *location,
            Self::Identifier(identifier) => identifier.location,
            Self::Index(index) => index.location,
            Self::Unary(unary) => unary.location,
            Self::Infix(infix) => infix.location,
            Self::Call(call) => call.location,
            Self::Assign(assign) => assign.location,
        }
    }

    // unary -> [ - | ! | ~ ] <unary> | <primary>
    fn parse_unary<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
    ) -> Result<Self, ParseError> {
        match &parser.current_token {
            Some((_, Token::Minus | Token::Not | Token::BitNot, _)) => {
                Ok(Self::Unary(UnaryExpression::parse(parser, None)?))
            }
            _ => Self::parse_primary(parser),
        }
    }

    // primary -> <literal> | <identifier> | <call> | <index> | ( <expression> ) | <array>
    fn parse_primary<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::Ident(name), end)) => match &parser.current_token {
                Some((_, Token::LParen, _)) => {
                    Ok(Self::Call(CallExpression::parse_rest(parser, name, start)?))
                }
                Some((_, Token::LBracket, _)) => Ok(Self::Index(IndexExpression::parse_rest(
                    parser, name, start,
                )?)),
                _ => Ok(Self::Identifier(Identifier::from((start, name, end)))),
            },
            Some((start, Token::Number(value), end)) => Ok(Self::Number {
                value,
                location: SrcSpan { start, end },
            }),
            Some((start, Token::String(value), end)) => Ok(Self::String {
                value,
                location: SrcSpan { start, end },
            }),
            Some((start, Token::True, end)) => Ok(Self::Boolean {
                value: true,
                location: SrcSpan { start, end },
            }),
            Some((start, Token::False, end)) => Ok(Self::Boolean {
                value: false,
                location: SrcSpan { start, end },
            }),
            Some((start, Token::Null, end)) => Ok(Self::Null {
                location: SrcSpan { start, end },
            }),
            Some((_, Token::LParen, _)) => {
                // grouping only guides the climb, it leaves no node behind
                let expression = Expression::parse(parser, None)?;
                let _ = parser.expect_one(Token::RParen)?;

                Ok(expression)
            }
            Some((start, Token::LBracket, _)) => {
                let mut elements = vec![];

                let end = loop {
                    match &parser.current_token {
                        Some((_, Token::RBracket, _)) => {
                            let (_, end) = parser.expect_one(Token::RBracket)?;
                            break end;
                        }
                        _ => {
                            elements.push(Expression::parse(parser, None)?);

                            match &parser.current_token {
                                Some((_, Token::Comma, _)) => parser.step(),
                                Some((_, Token::RBracket, _)) => {}
                                Some((start, token, end)) => {
                                    return parse_error(
                                        ParseErrorType::UnexpectedToken {
                                            token: token.clone(),
                                            expected: vec!["`,`".into(), "`]`".into()],
                                        },
                                        SrcSpan {
                                            start: *start,
                                            end: *end,
                                        },
                                    )
                                }
                                None => {
                                    return parse_error(
                                        ParseErrorType::UnexpectedEof,
                                        SrcSpan { start: 0, end: 0 },
                                    )
                                }
                            }
                        }
                    }
                };

                Ok(Self::Array {
                    elements,
                    location: SrcSpan { start, end },
                })
            }
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an expression".into()],
                },
                SrcSpan { start, end },
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 }),
        }
    }
}

// expression -> <unary> { <binary_operator> <expression> } | <assignment>
impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>, precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let mut expression = Self::parse_unary(parser)?;

        if let Some((_, token, _)) = &parser.current_token {
            if token.is_assignment_operator() {
                return Ok(Self::Assign(AssignExpression::parse(
                    parser, expression, None,
                )?));
            }
        }

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expression = match &parser.current_token {
                Some((_, token, _)) if token.is_binary_operator() => {
                    Self::Infix(InfixExpression::parse(parser, expression, precedence)?)
                }
                _ => break,
            };
        }

        Ok(expression)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null { .. } => write!(f, "null"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::String { value, .. } => write!(f, "'{value}'"),
            Self::Array { elements, .. } => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Index(index) => write!(f, "{index}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Assign(assign) => write!(f, "{assign}"),
        }
    }
}

// index -> <identifier> [ <expression> ]
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub name: String,
    pub index: Box<Expression>,
    pub location: SrcSpan,
}

impl IndexExpression {
    fn parse_rest<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        name: String,
        start: u32,
    ) -> Result<Self, ParseError> {
        let _ = parser.expect_one(Token::LBracket)?;
        let index = Expression::parse(parser, None)?;
        let (_, end) = parser.expect_one(Token::RBracket)?;

        Ok(Self {
            name,
            index: Box::new(index),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

// call -> <identifier> ( [ <expression> {, <expression>} ] )
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan,
}

impl CallExpression {
    fn parse_rest<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        name: String,
        start: u32,
    ) -> Result<Self, ParseError> {
        let _ = parser.expect_one(Token::LParen)?;

        let mut arguments = vec![];

        let end = loop {
            match &parser.current_token {
                Some((_, Token::RParen, _)) => {
                    let (_, end) = parser.expect_one(Token::RParen)?;
                    break end;
                }
                _ => {
                    arguments.push(Expression::parse(parser, None)?);

                    match &parser.current_token {
                        Some((_, Token::Comma, _)) => parser.step(),
                        Some((_, Token::RParen, _)) => {}
                        Some((start, token, end)) => {
                            return parse_error(
                                ParseErrorType::UnexpectedToken {
                                    token: token.clone(),
                                    expected: vec!["`,`".into(), "`)`".into()],
                                },
                                SrcSpan {
                                    start: *start,
                                    end: *end,
                                },
                            )
                        }
                        None => {
                            return parse_error(
                                ParseErrorType::UnexpectedEof,
                                SrcSpan { start: 0, end: 0 },
                            )
                        }
                    }
                }
            }
        };

        Ok(Self {
            name,
            arguments,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: Token,
    pub operand: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for UnaryExpression {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let (start, operator, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => {
                return parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 })
            }
        };

        let operand = Expression::parse_unary(parser)?;
        let end = operand.location().end;

        Ok(Self {
            operator,
            operand: Box::new(operand),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for UnaryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.as_literal(), self.operand)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for InfixExpression {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let start = left.location().start;

        let operator = match parser.next_token() {
            Some((_, token, _)) if token.is_binary_operator() => token,
            Some((start, token, end)) => {
                return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["a binary operator".into()],
                    },
                    SrcSpan { start, end },
                )
            }
            None => {
                return parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 })
            }
        };

        let right = Expression::parse(parser, Some(precedence))?;
        let end = right.location().end;

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.left,
            self.operator.as_literal(),
            self.right
        )
    }
}

// assignment -> ( <identifier> | <index> ) <assignment_operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpression {
    pub target: Box<Expression>,
    pub operator: Token,
    pub value: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for AssignExpression {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        match &left {
            Expression::Identifier(_) | Expression::Index(_) => {}
            _ => {
                return parse_error(ParseErrorType::InvalidAssignmentTarget, left.location());
            }
        }

        let start = left.location().start;

        let operator = match parser.next_token() {
            Some((_, token, _)) if token.is_assignment_operator() => token,
            Some((start, token, end)) => {
                return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["an assignment operator".into()],
                    },
                    SrcSpan { start, end },
                )
            }
            None => {
                return parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start: 0, end: 0 })
            }
        };

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        Ok(Self {
            target: Box::new(left),
            operator,
            value: Box::new(value),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for AssignExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.target,
            self.operator.as_literal(),
            self.value
        )
    }
}
