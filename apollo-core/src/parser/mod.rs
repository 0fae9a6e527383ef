pub mod ast;
pub mod error;
#[allow(clippy::module_inception)]
pub mod parser;

pub mod prelude {
    pub use super::{ast::*, error::*, parser::*};
}

#[cfg(test)]
mod tests;
