use std::collections::HashMap;

use super::context::ScopeChain;
use super::value::Value;
use crate::eval::error::RuntimeError;
use crate::parser::prelude::{FunctionDeclaration, Module, Statement};

pub type BuiltinFunction = fn(&Runtime, &mut ScopeChain, Vec<Value>) -> Result<Value, RuntimeError>;

/// Everything a program needs at run time: its top level statements,
/// the user-defined functions, and the builtin table supplied by the
/// embedder.
pub struct Runtime {
    pub statements: Vec<Statement>,
    pub functions: HashMap<String, FunctionDeclaration>,
    pub builtins: HashMap<String, BuiltinFunction>,
}

impl Runtime {
    pub fn new(module: Module, builtins: HashMap<String, BuiltinFunction>) -> Self {
        Self {
            statements: module.program.statements,
            functions: module.program.functions,
            builtins,
        }
    }

    pub fn builtin(&self, name: &str) -> Option<&BuiltinFunction> {
        self.builtins.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions.get(name)
    }
}
