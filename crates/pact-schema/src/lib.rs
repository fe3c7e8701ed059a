//! Type algebra for Pact
//!
//! Pure data: primitive, function, row, list, table, capability, constrained
//! and quantified types, with structural traversal, diagnostic rendering and
//! the built-in typeclass table. Inference and unification are built on top
//! of this crate, not in it.

mod pretty;
mod traverse;
pub mod typeclass;
pub mod types;

pub use typeclass::{builtin_classes, BuiltinTC, Class, Instance, Pred};
pub use types::{
    decompose_function, map_row_types, type_of_literal, NonEmpty, PrimType, Row, Type, TypeError,
};

#[cfg(test)]
mod tests;
