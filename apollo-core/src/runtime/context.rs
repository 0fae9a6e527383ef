use std::collections::HashMap;

use super::value::Value;

/// One scope frame: the variables visible while the frame is alive.
#[derive(Debug, Default, Clone)]
pub struct Context {
    vars: HashMap<String, Value>,
}

impl Context {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.vars.get_mut(name)
    }

    pub fn define(&mut self, name: String, value: Value) {
        let _ = self.vars.insert(name, value);
    }
}

/// The stack of scope frames a statement executes against. Lookups walk
/// from the innermost frame outwards; new bindings always land in the
/// innermost frame.
#[derive(Debug)]
pub struct ScopeChain {
    frames: Vec<Context>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    pub fn new() -> Self {
        Self {
            frames: vec![Context::default()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Context::default());
    }

    pub fn pop_frame(&mut self) {
        let _ = self.frames.pop();
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
    }

    pub fn define(&mut self, name: String, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.define(name, value);
        }
    }
}
