use crate::{
    lexer::prelude::Token,
    runtime::prelude::ValueType,
    utils::prelude::SrcSpan,
};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    InvalidOperands {
        operator: Token,
        left: ValueType,
        right: ValueType,
    },
    InvalidUnaryOperand {
        operator: Token,
        operand: ValueType,
    },
    NonBooleanCondition {
        found: ValueType,
    },
    UndefinedVariable {
        name: String,
    },
    UnknownFunction {
        name: String,
    },
    WrongArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    IndexTargetNotArray {
        name: String,
        found: ValueType,
    },
    IndexNotNumber {
        found: ValueType,
    },
    IndexOutOfRange {
        index: i64,
        length: usize,
    },
    InvalidArgument {
        function: String,
        found: ValueType,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan,
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::InvalidOperands {
                operator,
                left,
                right,
            } => (
                "Invalid operand types",
                vec![format!(
                    "`{}` is not defined for `{left}` and `{right}`",
                    operator.as_literal()
                )],
            ),
            RuntimeErrorType::InvalidUnaryOperand { operator, operand } => (
                "Invalid operand type",
                vec![format!(
                    "`{}` is not defined for `{operand}`",
                    operator.as_literal()
                )],
            ),
            RuntimeErrorType::NonBooleanCondition { found } => (
                "Condition must be a Boolean",
                vec![format!("This evaluated to `{found}`")],
            ),
            RuntimeErrorType::UndefinedVariable { name } => (
                "Undefined variable",
                vec![format!("`{name}` is not defined in any visible scope")],
            ),
            RuntimeErrorType::UnknownFunction { name } => (
                "Unknown function",
                vec![format!("`{name}` is neither a builtin nor defined here")],
            ),
            RuntimeErrorType::WrongArgumentCount {
                name,
                expected,
                got,
            } => (
                "Wrong number of arguments",
                vec![format!("`{name}` takes {expected} argument(s), got {got}")],
            ),
            RuntimeErrorType::IndexTargetNotArray { name, found } => (
                "Cannot index into this",
                vec![format!("`{name}` is a `{found}`, not an Array")],
            ),
            RuntimeErrorType::IndexNotNumber { found } => (
                "Index must be a Number",
                vec![format!("This evaluated to `{found}`")],
            ),
            RuntimeErrorType::IndexOutOfRange { index, length } => (
                "Index out of range",
                vec![format!(
                    "Index is {index}, but the array has {length} element(s)"
                )],
            ),
            RuntimeErrorType::InvalidArgument { function, found } => (
                "Invalid argument",
                vec![format!("`{function}` cannot take a `{found}`")],
            ),
        }
    }
}
