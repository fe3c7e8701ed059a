//! Module references
//!
//! A `ModRef` names a module, optionally the interfaces it is expected to
//! implement, and where the reference was written. Two encodings exist: the
//! full one always carries `refInfo`; the one used inside evaluated values
//! omits it when it is the default. Decoding accepts both.

use crate::module::ModuleDecodeError;
use pact_core::names::ModuleName;
use pact_core::shared::Info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

const REF_INFO: &str = "refInfo";

/// Which `ModRef` encoding to write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModRefEncoding {
    /// Always write `refInfo`
    #[default]
    Full,
    /// Drop `refInfo` when it is the default
    OmitDefaultInfo,
}

/// Reference to a module.
///
/// Equality, ordering and hashing ignore `info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModRef {
    /// Where the reference appears
    #[serde(rename = "refInfo", default)]
    pub info: Info,
    /// Referenced module
    #[serde(rename = "refName")]
    pub name: ModuleName,
    /// Interfaces the module is expected to implement
    #[serde(rename = "refSpec")]
    pub spec: Option<Vec<ModuleName>>,
}

impl ModRef {
    /// Reference without interface expectations or location
    pub fn new(name: ModuleName) -> Self {
        ModRef {
            info: Info::default(),
            name,
            spec: None,
        }
    }

    /// Set the expected interfaces
    pub fn with_spec<I: IntoIterator<Item = ModuleName>>(mut self, spec: I) -> Self {
        self.spec = Some(spec.into_iter().collect());
        self
    }

    /// Set the location
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Whether the referenced module is expected to implement `interface`
    pub fn implements(&self, interface: &ModuleName) -> bool {
        self.spec.as_ref().is_some_and(|s| s.contains(interface))
    }

    /// Encode with every field
    pub fn to_full_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Encode, dropping `refInfo` when it is the default
    pub fn to_value_omit_default(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if self.info.is_default() {
            if let Value::Object(obj) = &mut value {
                obj.remove(REF_INFO);
            }
        }
        Ok(value)
    }

    /// Encode in the given form
    pub fn encode(&self, encoding: ModRefEncoding) -> Result<Value, serde_json::Error> {
        match encoding {
            ModRefEncoding::Full => self.to_full_value(),
            ModRefEncoding::OmitDefaultInfo => self.to_value_omit_default(),
        }
    }

    /// Decode either form
    pub fn from_value(value: Value) -> Result<Self, ModuleDecodeError> {
        serde_json::from_value(value).map_err(|e| {
            tracing::debug!(error = %e, "rejecting module reference");
            ModuleDecodeError::InvalidModRef(e.to_string())
        })
    }

    fn key(&self) -> (&ModuleName, &Option<Vec<ModuleName>>) {
        (&self.name, &self.spec)
    }
}

impl PartialEq for ModRef {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ModRef {}

impl PartialOrd for ModRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for ModRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
