use std::collections::HashMap;
use std::io::Write;

use apollo_core::{
    eval::error::{RuntimeError, RuntimeErrorType},
    runtime::prelude::{BuiltinFunction, Runtime, ScopeChain, Value},
    utils::prelude::SrcSpan,
};

pub fn default_builtins() -> HashMap<String, BuiltinFunction> {
    let mut builtins: HashMap<String, BuiltinFunction> = HashMap::new();

    let _ = builtins.insert("print".to_string(), print as BuiltinFunction);
    let _ = builtins.insert("println".to_string(), println as BuiltinFunction);
    let _ = builtins.insert("len".to_string(), len as BuiltinFunction);

    builtins
}

// builtin errors carry no source position
fn error(error: RuntimeErrorType) -> RuntimeError {
    RuntimeError {
        error,
        location: SrcSpan { start: 0, end: 0 },
    }
}

fn render(arguments: &[Value]) -> String {
    arguments
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join("")
}

fn print(
    _runtime: &Runtime,
    _chain: &mut ScopeChain,
    arguments: Vec<Value>,
) -> Result<Value, RuntimeError> {
    print!("{}", render(&arguments));
    let _ = std::io::stdout().flush();

    Ok(Value::Null)
}

fn println(
    _runtime: &Runtime,
    _chain: &mut ScopeChain,
    arguments: Vec<Value>,
) -> Result<Value, RuntimeError> {
    println!("{}", render(&arguments));

    Ok(Value::Null)
}

fn len(
    _runtime: &Runtime,
    _chain: &mut ScopeChain,
    arguments: Vec<Value>,
) -> Result<Value, RuntimeError> {
    if arguments.len() != 1 {
        return Err(error(RuntimeErrorType::WrongArgumentCount {
            name: "len".to_string(),
            expected: 1,
            got: arguments.len(),
        }));
    }

    match &arguments[0] {
        Value::String(value) => Ok(Value::Number(value.chars().count() as f64)),
        Value::Array(elements) => Ok(Value::Number(elements.len() as f64)),
        other => Err(error(RuntimeErrorType::InvalidArgument {
            function: "len".to_string(),
            found: other.value_type(),
        })),
    }
}
