pub mod error;


use std::collections::HashMap;
use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use self::error::{RuntimeError, RuntimeErrorType};
use crate::{
    parser::prelude::{
        parse_module, parse_module_from_stream, AssignExpression, Block, CallExpression,
        Expression, IndexExpression, Parsed, Statement,
    },
    runtime::prelude::{BuiltinFunction, Runtime, ScopeChain, Value},
    utils::prelude::{Error, SrcSpan},
};

/// What a statement told the enclosing block to do next.
pub enum Flow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// Parses and runs the program at `path`, streaming the source through
/// the lexer. The final global scope is returned so embedders can
/// inspect it.
pub fn interpret(
    path: PathBuf,
    builtins: HashMap<String, BuiltinFunction>,
) -> Result<ScopeChain, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            let error = Error::StdIo { err: err.kind() };
            return Err(error);
        }
    };

    let file_size = file
        .metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?
        .len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars().map(|c| {
        let c = c.unwrap();
        src.push(c);
        c
    });

    let parsed = match parse_module_from_stream(stream) {
        Ok(parsed) => parsed,
        Err(err) => {
            let error = Error::Parse {
                path,
                src,
                error: err,
            };
            return Err(error);
        }
    };

    run_module(parsed, path, src, builtins)
}

/// Same as [`interpret`], for source already held in memory.
pub fn interpret_source(
    src: &str,
    path: PathBuf,
    builtins: HashMap<String, BuiltinFunction>,
) -> Result<ScopeChain, Error> {
    let parsed = match parse_module(src) {
        Ok(parsed) => parsed,
        Err(err) => {
            let error = Error::Parse {
                path,
                src: src.to_string(),
                error: err,
            };
            return Err(error);
        }
    };

    run_module(parsed, path, src.to_string(), builtins)
}

fn run_module(
    parsed: Parsed,
    path: PathBuf,
    src: String,
    builtins: HashMap<String, BuiltinFunction>,
) -> Result<ScopeChain, Error> {
    let runtime = Runtime::new(parsed.module, builtins);
    let mut chain = ScopeChain::new();

    match eval(&runtime, &mut chain) {
        Ok(()) => Ok(chain),
        Err(error) => Err(Error::Runtime { path, src, error }),
    }
}

pub fn eval(runtime: &Runtime, chain: &mut ScopeChain) -> Result<(), RuntimeError> {
    for statement in &runtime.statements {
        // break/continue escaping to the top level are discarded, the
        // next statement still runs
        let _ = eval_statement(runtime, chain, statement)?;
    }

    Ok(())
}

fn eval_statement(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    statement: &Statement,
) -> Result<Flow, RuntimeError> {
    match statement {
        Statement::Expression { expression, .. } => {
            let _ = eval_expression(runtime, chain, expression)?;

            Ok(Flow::Normal)
        }
        Statement::If {
            condition,
            consequence,
            alternative,
            ..
        } => match eval_condition(runtime, chain, condition)? {
            true => eval_block(runtime, chain, consequence),
            false => match alternative {
                Some(alternative) => eval_block(runtime, chain, alternative),
                None => Ok(Flow::Normal),
            },
        },
        Statement::While {
            condition, body, ..
        } => {
            // one frame for the whole lifetime of the loop
            chain.push_frame();
            let result = eval_while(runtime, chain, condition, body);
            chain.pop_frame();

            result
        }
        Statement::Return { value, .. } => {
            let value = match value {
                Some(value) => eval_expression(runtime, chain, value)?,
                None => Value::Null,
            };

            Ok(Flow::Return(value))
        }
        Statement::Break { .. } => Ok(Flow::Break),
        Statement::Continue { .. } => Ok(Flow::Continue),
    }
}

fn eval_statements(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    statements: &[Statement],
) -> Result<Flow, RuntimeError> {
    for statement in statements {
        match eval_statement(runtime, chain, statement)? {
            Flow::Normal => {}
            flow => return Ok(flow),
        }
    }

    Ok(Flow::Normal)
}

fn eval_block(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    block: &Block,
) -> Result<Flow, RuntimeError> {
    chain.push_frame();
    let result = eval_statements(runtime, chain, &block.statements);
    chain.pop_frame();

    result
}

fn eval_while(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    condition: &Expression,
    body: &Block,
) -> Result<Flow, RuntimeError> {
    loop {
        if !eval_condition(runtime, chain, condition)? {
            return Ok(Flow::Normal);
        }

        match eval_statements(runtime, chain, &body.statements)? {
            Flow::Return(value) => return Ok(Flow::Return(value)),
            Flow::Break => return Ok(Flow::Normal),
            Flow::Normal | Flow::Continue => {}
        }
    }
}

fn eval_condition(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    condition: &Expression,
) -> Result<bool, RuntimeError> {
    match eval_expression(runtime, chain, condition)? {
        Value::Boolean(value) => Ok(value),
        other => Err(RuntimeError {
            error: RuntimeErrorType::NonBooleanCondition {
                found: other.value_type(),
            },
            location: condition.location(),
        }),
    }
}

fn eval_expression(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    expression: &Expression,
) -> Result<Value, RuntimeError> {
    match expression {
        Expression::Null { .. } => Ok(Value::Null),
        Expression::Boolean { value, .. } => Ok(Value::Boolean(*value)),
        Expression::Number { value, .. } => Ok(Value::Number(*value)),
        Expression::String { value, .. } => Ok(Value::String(value.clone())),
        Expression::Array { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(runtime, chain, element)?);
            }

            Ok(Value::Array(values))
        }
        Expression::Identifier(identifier) => match chain.lookup(&identifier.value) {
            Some(value) => Ok(value.clone()),
            None => Err(RuntimeError {
                error: RuntimeErrorType::UndefinedVariable {
                    name: identifier.value.clone(),
                },
                location: identifier.location,
            }),
        },
        Expression::Index(index) => eval_index(runtime, chain, index),
        Expression::Unary(unary) => {
            let operand = eval_expression(runtime, chain, &unary.operand)?;

            Value::apply_unary(&unary.operator, &operand).ok_or(RuntimeError {
                error: RuntimeErrorType::InvalidUnaryOperand {
                    operator: unary.operator.clone(),
                    operand: operand.value_type(),
                },
                location: unary.location,
            })
        }
        Expression::Infix(infix) => {
            let left = eval_expression(runtime, chain, &infix.left)?;
            let right = eval_expression(runtime, chain, &infix.right)?;

            Value::apply_binary(&infix.operator, &left, &right).ok_or(RuntimeError {
                error: RuntimeErrorType::InvalidOperands {
                    operator: infix.operator.clone(),
                    left: left.value_type(),
                    right: right.value_type(),
                },
                location: infix.location,
            })
        }
        Expression::Call(call) => eval_call(runtime, chain, call),
        Expression::Assign(assign) => eval_assign(runtime, chain, assign),
    }
}

fn eval_index(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    index: &IndexExpression,
) -> Result<Value, RuntimeError> {
    let idx = eval_expression(runtime, chain, &index.index)?;

    let elements = match chain.lookup(&index.name) {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            return Err(RuntimeError {
                error: RuntimeErrorType::IndexTargetNotArray {
                    name: index.name.clone(),
                    found: other.value_type(),
                },
                location: index.location,
            })
        }
        None => {
            return Err(RuntimeError {
                error: RuntimeErrorType::UndefinedVariable {
                    name: index.name.clone(),
                },
                location: index.location,
            })
        }
    };

    let position = index_position(&idx, elements.len(), index.location)?;

    Ok(elements[position].clone())
}

fn index_position(
    value: &Value,
    length: usize,
    location: SrcSpan,
) -> Result<usize, RuntimeError> {
    let index = match value {
        Value::Number(n) => *n as i64,
        other => {
            return Err(RuntimeError {
                error: RuntimeErrorType::IndexNotNumber {
                    found: other.value_type(),
                },
                location,
            })
        }
    };

    if index < 0 || index as usize >= length {
        return Err(RuntimeError {
            error: RuntimeErrorType::IndexOutOfRange { index, length },
            location,
        });
    }

    Ok(index as usize)
}

fn eval_assign(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    assign: &AssignExpression,
) -> Result<Value, RuntimeError> {
    let rhs = eval_expression(runtime, chain, &assign.value)?;

    match assign.target.as_ref() {
        Expression::Identifier(identifier) => {
            let combined = match chain.lookup(&identifier.value) {
                Some(current) => match Value::apply_assign(&assign.operator, current, &rhs) {
                    Some(value) => Some(value),
                    None => {
                        return Err(RuntimeError {
                            error: RuntimeErrorType::InvalidOperands {
                                operator: assign.operator.clone(),
                                left: current.value_type(),
                                right: rhs.value_type(),
                            },
                            location: assign.location,
                        })
                    }
                },
                None => None,
            };

            match combined {
                // the binding is rewritten in whichever frame holds it
                Some(value) => {
                    if let Some(slot) = chain.lookup_mut(&identifier.value) {
                        *slot = value;
                    }
                }
                None => chain.define(identifier.value.clone(), rhs.clone()),
            }

            Ok(rhs)
        }
        Expression::Index(index) => {
            let idx = eval_expression(runtime, chain, &index.index)?;

            let (position, element) = {
                let elements = match chain.lookup(&index.name) {
                    Some(Value::Array(elements)) => elements,
                    Some(other) => {
                        return Err(RuntimeError {
                            error: RuntimeErrorType::IndexTargetNotArray {
                                name: index.name.clone(),
                                found: other.value_type(),
                            },
                            location: index.location,
                        })
                    }
                    None => {
                        return Err(RuntimeError {
                            error: RuntimeErrorType::UndefinedVariable {
                                name: index.name.clone(),
                            },
                            location: index.location,
                        })
                    }
                };

                let position = index_position(&idx, elements.len(), index.location)?;

                (position, elements[position].clone())
            };

            let combined = match Value::apply_assign(&assign.operator, &element, &rhs) {
                Some(value) => value,
                None => {
                    return Err(RuntimeError {
                        error: RuntimeErrorType::InvalidOperands {
                            operator: assign.operator.clone(),
                            left: element.value_type(),
                            right: rhs.value_type(),
                        },
                        location: assign.location,
                    })
                }
            };

            if let Some(Value::Array(elements)) = chain.lookup_mut(&index.name) {
                elements[position] = combined.clone();
            }

            Ok(combined)
        }
        // the parser only ever produces the two targets above
        _ => unreachable!("invalid assignment target"),
    }
}

fn eval_call(
    runtime: &Runtime,
    chain: &mut ScopeChain,
    call: &CallExpression,
) -> Result<Value, RuntimeError> {
    // arguments evaluate in the caller's scope chain
    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        arguments.push(eval_expression(runtime, chain, argument)?);
    }

    // builtins shadow user definitions
    if let Some(builtin) = runtime.builtin(&call.name) {
        return builtin(runtime, chain, arguments);
    }

    let function = match runtime.function(&call.name) {
        Some(function) => function,
        None => {
            return Err(RuntimeError {
                error: RuntimeErrorType::UnknownFunction {
                    name: call.name.clone(),
                },
                location: call.location,
            })
        }
    };

    if function.params.len() != arguments.len() {
        return Err(RuntimeError {
            error: RuntimeErrorType::WrongArgumentCount {
                name: call.name.clone(),
                expected: function.params.len(),
                got: arguments.len(),
            },
            location: call.location,
        });
    }

    // a function body sees nothing but its own arguments
    let mut function_chain = ScopeChain::new();
    for (param, argument) in function.params.iter().zip(arguments) {
        function_chain.define(param.clone(), argument);
    }

    for statement in &function.body.statements {
        if let Flow::Return(value) = eval_statement(runtime, &mut function_chain, statement)? {
            return Ok(value);
        }
    }

    Ok(Value::Null)
}
