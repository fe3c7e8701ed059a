//! Module system for Pact
//!
//! Modules, interfaces and their governance, import declarations and module
//! references. Everything here is an immutable value: lookup, governance
//! enforcement and redeploy approval belong to the evaluator and storage layer.

pub mod governance;
pub mod imports;
pub mod module;
pub mod modref;

pub use governance::{Governance, GovernanceKind};
pub use imports::{ImportError, Use};
pub use module::{Code, Interface, Meta, Module, ModuleDecodeError, ModuleDef};
pub use modref::{ModRef, ModRefEncoding};
