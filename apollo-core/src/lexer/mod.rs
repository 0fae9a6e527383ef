pub mod error;
#[allow(clippy::module_inception)]
pub mod lexer;
pub mod token;

pub mod prelude {
    pub use super::{error::*, lexer::*, token::*};
}

#[cfg(test)]
mod tests;
