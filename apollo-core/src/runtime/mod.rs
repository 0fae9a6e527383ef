pub mod context;
#[allow(clippy::module_inception)]
pub mod runtime;
pub mod value;

pub mod prelude {
    pub use super::{context::*, runtime::*, value::*};
}

#[cfg(test)]
mod tests;
