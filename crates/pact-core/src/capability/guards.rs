//! Pact, module, user and capability guards
//!
//! The four non-keyset guard payloads. User and capability guards carry
//! argument lists of the evaluator's value type `A`, held behind an `Arc` so
//! that cloning a guard shares rather than copies the arguments.

use crate::names::{DefPactId, ModuleName, QualifiedName};
use compact_str::CompactString;
use std::sync::Arc;

/// Capability guard - satisfied while the named capability with these exact
/// arguments (and pact scope, when present) is granted
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapabilityGuard<A> {
    /// Capability name
    pub name: QualifiedName,
    /// Arguments to the capability
    pub args: Arc<[A]>,
    /// Optional DefPact ID for pact-specific guards
    pub pact_id: Option<DefPactId>,
}

/// DefPact guard - satisfied only while the given pact execution is active
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PactGuard {
    /// DefPact ID
    pub pact_id: DefPactId,
    /// DefPact continuation name
    pub name: CompactString,
}

/// Module guard - satisfied by code running under the module's authority
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleGuard {
    /// Module name
    pub module_name: ModuleName,
    /// Module guard name
    pub name: CompactString,
}

/// User guard - satisfied when `fun` applied to `args` returns true
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserGuard<A> {
    /// User guard function
    pub fun: QualifiedName,
    /// Arguments to the guard function
    pub args: Arc<[A]>,
}

impl<A> CapabilityGuard<A> {
    /// Create a new capability guard
    pub fn new<I: IntoIterator<Item = A>>(name: QualifiedName, args: I) -> Self {
        CapabilityGuard {
            name,
            args: args.into_iter().collect(),
            pact_id: None,
        }
    }

    /// Create a capability guard scoped to a pact execution
    pub fn with_pact_id<I: IntoIterator<Item = A>>(
        name: QualifiedName,
        args: I,
        pact_id: DefPactId,
    ) -> Self {
        CapabilityGuard {
            name,
            args: args.into_iter().collect(),
            pact_id: Some(pact_id),
        }
    }

    /// Convert the argument payload
    pub fn map_args<B, F: FnMut(&A) -> B>(&self, f: F) -> CapabilityGuard<B> {
        CapabilityGuard {
            name: self.name.clone(),
            args: self.args.iter().map(f).collect(),
            pact_id: self.pact_id.clone(),
        }
    }

    /// Fallible [`CapabilityGuard::map_args`]
    pub fn try_map_args<B, E, F>(&self, f: F) -> Result<CapabilityGuard<B>, E>
    where
        F: FnMut(&A) -> Result<B, E>,
    {
        Ok(CapabilityGuard {
            name: self.name.clone(),
            args: self.args.iter().map(f).collect::<Result<Arc<[B]>, E>>()?,
            pact_id: self.pact_id.clone(),
        })
    }
}

impl PactGuard {
    /// Create a new DefPact guard
    pub fn new<S: Into<CompactString>>(pact_id: DefPactId, name: S) -> Self {
        PactGuard {
            pact_id,
            name: name.into(),
        }
    }
}

impl ModuleGuard {
    /// Create a new module guard
    pub fn new<S: Into<CompactString>>(module_name: ModuleName, name: S) -> Self {
        ModuleGuard {
            module_name,
            name: name.into(),
        }
    }
}

impl<A> UserGuard<A> {
    /// Create a new user guard
    pub fn new<I: IntoIterator<Item = A>>(fun: QualifiedName, args: I) -> Self {
        UserGuard {
            fun,
            args: args.into_iter().collect(),
        }
    }

    /// Convert the argument payload
    pub fn map_args<B, F: FnMut(&A) -> B>(&self, f: F) -> UserGuard<B> {
        UserGuard {
            fun: self.fun.clone(),
            args: self.args.iter().map(f).collect(),
        }
    }

    /// Fallible [`UserGuard::map_args`]
    pub fn try_map_args<B, E, F>(&self, f: F) -> Result<UserGuard<B>, E>
    where
        F: FnMut(&A) -> Result<B, E>,
    {
        Ok(UserGuard {
            fun: self.fun.clone(),
            args: self.args.iter().map(f).collect::<Result<Arc<[B]>, E>>()?,
        })
    }
}
