//! Module governance
//!
//! Who may upgrade a module: the holders of a named keyset, or whoever can
//! acquire a governance capability. Satisfying the policy is the evaluator's
//! job; this type only records it.

use pact_core::names::KeySetName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upgrade policy for a module.
///
/// Encoded as `{"keyset": <name>}` or `{"capability": <G>}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Governance<G> {
    /// Governed by a keyset
    #[serde(rename = "keyset")]
    KeyGov(KeySetName),
    /// Governed by a capability
    #[serde(rename = "capability")]
    CapGov(G),
}

/// The two governance forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GovernanceKind {
    /// Keyset governance
    Keyset,
    /// Capability governance
    Capability,
}

impl fmt::Display for GovernanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GovernanceKind::Keyset => write!(f, "keyset"),
            GovernanceKind::Capability => write!(f, "capability"),
        }
    }
}

impl<G> Governance<G> {
    /// Which form this is
    pub fn kind(&self) -> GovernanceKind {
        match self {
            Governance::KeyGov(_) => GovernanceKind::Keyset,
            Governance::CapGov(_) => GovernanceKind::Capability,
        }
    }

    /// Keyset name, for keyset governance
    pub fn as_keyset(&self) -> Option<&KeySetName> {
        match self {
            Governance::KeyGov(ks) => Some(ks),
            Governance::CapGov(_) => None,
        }
    }

    /// Capability, for capability governance
    pub fn as_capability(&self) -> Option<&G> {
        match self {
            Governance::KeyGov(_) => None,
            Governance::CapGov(cap) => Some(cap),
        }
    }

    /// Convert the capability reference, e.g. after name resolution
    pub fn map_capability<H, F: FnOnce(G) -> H>(self, f: F) -> Governance<H> {
        match self {
            Governance::KeyGov(ks) => Governance::KeyGov(ks),
            Governance::CapGov(cap) => Governance::CapGov(f(cap)),
        }
    }
}

impl<G: fmt::Display> fmt::Display for Governance<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Governance::KeyGov(ks) => write!(f, "'{}", ks),
            Governance::CapGov(cap) => write!(f, "{}", cap),
        }
    }
}
