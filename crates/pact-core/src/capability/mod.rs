//! Capability-related guard payloads

pub mod guards;

pub use guards::{CapabilityGuard, ModuleGuard, PactGuard, UserGuard};
