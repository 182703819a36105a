//! Types and values of the expression language

mod type_system;
mod value;

pub use type_system::{convert, TypeName};
pub use value::Value;
