use std::fmt::Display;

use crate::lexer::prelude::Token;

/// A runtime value. Numbers are always `f64`; an integral number is
/// rendered without the decimal part.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Array => "Array",
        };

        write!(f, "{name}")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            Self::String(value) => write!(f, "{value}"),
            Self::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(","))
            }
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
        }
    }

    /// Applies a binary operator, `None` meaning the operand types do
    /// not support it.
    pub fn apply_binary(operator: &Token, left: &Value, right: &Value) -> Option<Value> {
        match operator {
            Token::Plus => left.add(right),
            Token::Minus => left.subtract(right),
            Token::Star => left.multiply(right),
            Token::Slash => left.divide(right),
            Token::Percent => left.modulo(right),
            Token::And => left.logical_and(right),
            Token::Or => left.logical_or(right),
            Token::Equal => left.equals(right),
            Token::NotEqual => left.equals(right).and_then(|v| v.logical_not()),
            Token::Greater => left.compare(right, |o| o == std::cmp::Ordering::Greater),
            Token::GreaterEqual => left.compare(right, |o| o != std::cmp::Ordering::Less),
            Token::Less => left.compare(right, |o| o == std::cmp::Ordering::Less),
            Token::LessEqual => left.compare(right, |o| o != std::cmp::Ordering::Greater),
            Token::BitAnd => left.bitwise(right, |a, b| a & b),
            Token::BitOr => left.bitwise(right, |a, b| a | b),
            _ => None,
        }
    }

    /// Resolves an assignment operator against the current value of the
    /// target. Plain `=` replaces, the compound forms route through the
    /// matching binary operator.
    pub fn apply_assign(operator: &Token, current: &Value, rhs: &Value) -> Option<Value> {
        match operator {
            Token::Assign => Some(rhs.clone()),
            Token::PlusAssign => Self::apply_binary(&Token::Plus, current, rhs),
            Token::MinusAssign => Self::apply_binary(&Token::Minus, current, rhs),
            Token::StarAssign => Self::apply_binary(&Token::Star, current, rhs),
            Token::SlashAssign => Self::apply_binary(&Token::Slash, current, rhs),
            Token::PercentAssign => Self::apply_binary(&Token::Percent, current, rhs),
            _ => None,
        }
    }

    pub fn apply_unary(operator: &Token, operand: &Value) -> Option<Value> {
        match operator {
            Token::Minus => match operand {
                Value::Number(n) => Some(Value::Number(-n)),
                _ => None,
            },
            Token::Not => operand.logical_not(),
            Token::BitNot => match operand {
                Value::Number(n) => Some(Value::Number(!(*n as i64) as f64)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The coercion ladder of `+`, checked top to bottom:
    /// number addition, character-code addition, string concatenation,
    /// concatenation with the other operand rendered as text, and
    /// array append (the non-array operand goes to the back of a copy,
    /// whichever side it is on).
    fn add(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(a + b)),
            (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
                let first = s.chars().next()?;
                let code = (first as i64 + *n as i64) as u8;

                Some(Value::String((code as char).to_string()))
            }
            (Value::String(a), Value::String(b)) => Some(Value::String(format!("{a}{b}"))),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Some(Value::String(format!("{self}{other}")))
            }
            (Value::Array(elements), other) | (other, Value::Array(elements)) => {
                let mut elements = elements.clone();
                elements.push(other.clone());

                Some(Value::Array(elements))
            }
            _ => None,
        }
    }

    fn subtract(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(a - b)),
            _ => None,
        }
    }

    fn multiply(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(a * b)),
            _ => None,
        }
    }

    // IEEE 754 semantics, division by zero included
    fn divide(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(a / b)),
            _ => None,
        }
    }

    fn modulo(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(a % b)),
            _ => None,
        }
    }

    fn logical_and(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Some(Value::Boolean(*a && *b)),
            _ => None,
        }
    }

    fn logical_or(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Some(Value::Boolean(*a || *b)),
            _ => None,
        }
    }

    fn logical_not(&self) -> Option<Value> {
        match self {
            Value::Boolean(value) => Some(Value::Boolean(!value)),
            _ => None,
        }
    }

    /// Equality is only defined between Numbers, Strings, Booleans and
    /// Nulls of matching type; arrays and mixed pairings do not compare.
    fn equals(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Boolean(a == b)),
            (Value::String(a), Value::String(b)) => Some(Value::Boolean(a == b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(Value::Boolean(a == b)),
            (Value::Null, Value::Null) => Some(Value::Boolean(true)),
            _ => None,
        }
    }

    fn compare(
        &self,
        other: &Value,
        check: impl Fn(std::cmp::Ordering) -> bool,
    ) -> Option<Value> {
        let ordering = match (self, other) {
            (Value::Number(a), Value::Number(b)) => match a.partial_cmp(b) {
                Some(ordering) => ordering,
                // NaN never orders, IEEE 754 makes these comparisons false
                None => return Some(Value::Boolean(false)),
            },
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => return None,
        };

        Some(Value::Boolean(check(ordering)))
    }

    // bitwise operators work on the integral part of a number
    fn bitwise(&self, other: &Value, apply: impl Fn(i64, i64) -> i64) -> Option<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Some(Value::Number(apply(*a as i64, *b as i64) as f64))
            }
            _ => None,
        }
    }
}
