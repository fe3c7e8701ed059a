//! Modules, interfaces and the `ModuleDef` sum
//!
//! Modules are immutable values: a redeploy produces a new `Module` that
//! replaces the old one wholesale. A module's hash is derived from its code
//! text and nothing else.

use crate::governance::Governance;
use crate::imports::Use;
use pact_core::hash::ModuleHash;
use pact_core::names::ModuleName;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Failure decoding a module, interface or module reference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleDecodeError {
    /// Neither a module nor an interface
    #[error("not a module ({module}) or an interface ({interface})")]
    UnrecognizedModuleDef {
        /// Why decoding as a module failed
        module: String,
        /// Why decoding as an interface failed
        interface: String,
    },

    /// Malformed module reference
    #[error("invalid module reference: {0}")]
    InvalidModRef(String),

    /// Stored module hash is not the hash of the stored code
    #[error("module {module} hash mismatch: stored {stored}, code hashes to {computed}")]
    HashMismatch {
        /// Module being decoded
        module: ModuleName,
        /// Hash found in the encoding
        stored: ModuleHash,
        /// Hash of the encoded code
        computed: ModuleHash,
    },
}

impl ModuleDecodeError {
    /// Decode failures describe malformed input and never succeed on retry
    pub fn is_permanent(&self) -> bool {
        true
    }
}

/// Module source text, exactly as deployed
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(pub String);

impl Code {
    /// Wrap source text
    pub fn new<S: Into<String>>(code: S) -> Self {
        Code(code.into())
    }

    /// The source text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash of this text
    pub fn hash(&self) -> ModuleHash {
        ModuleHash::of_code(&self.0)
    }
}

/// Documentation and model annotations
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Meta {
    /// Docstring
    #[serde(default)]
    pub docs: Option<String>,
    /// Rendered `@model` properties
    #[serde(default)]
    pub model: Vec<String>,
}

impl Meta {
    /// Meta with just a docstring
    pub fn docs<S: Into<String>>(docs: S) -> Self {
        Meta {
            docs: Some(docs.into()),
            model: Vec::new(),
        }
    }
}

/// A deployed module.
///
/// Fields are declared in their encoded order; every field is always encoded.
/// `code` and `hash` are only set together, and decoding rejects a stored
/// hash that is not the hash of the stored code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawModule<G>")]
pub struct Module<G> {
    /// Hashes of earlier versions still accepted by callers pinning them
    pub blessed: BTreeSet<ModuleHash>,
    code: Code,
    /// Upgrade policy
    pub governance: Governance<G>,
    hash: ModuleHash,
    /// Imports
    pub imports: Vec<Use>,
    /// Implemented interfaces
    pub interfaces: Vec<ModuleName>,
    /// Docs and model
    pub meta: Meta,
    /// Module name
    pub name: ModuleName,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModule<G> {
    blessed: BTreeSet<ModuleHash>,
    code: Code,
    governance: Governance<G>,
    hash: ModuleHash,
    imports: Vec<Use>,
    interfaces: Vec<ModuleName>,
    meta: Meta,
    name: ModuleName,
}

impl<G> TryFrom<RawModule<G>> for Module<G> {
    type Error = ModuleDecodeError;

    fn try_from(raw: RawModule<G>) -> Result<Self, Self::Error> {
        let computed = raw.code.hash();
        if computed != raw.hash {
            tracing::debug!(module = %raw.name, stored = %raw.hash, %computed, "rejecting module");
            return Err(ModuleDecodeError::HashMismatch {
                module: raw.name,
                stored: raw.hash,
                computed,
            });
        }
        Ok(Module {
            blessed: raw.blessed,
            code: raw.code,
            governance: raw.governance,
            hash: raw.hash,
            imports: raw.imports,
            interfaces: raw.interfaces,
            meta: raw.meta,
            name: raw.name,
        })
    }
}

impl<G> Module<G> {
    /// New module with hash computed from `code`; no blessed hashes,
    /// interfaces or imports
    pub fn new(name: ModuleName, governance: Governance<G>, meta: Meta, code: Code) -> Self {
        let hash = code.hash();
        Module {
            blessed: BTreeSet::new(),
            code,
            governance,
            hash,
            imports: Vec::new(),
            interfaces: Vec::new(),
            meta,
            name,
        }
    }

    /// Source text
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Hash of [`Module::code`]
    pub fn hash(&self) -> ModuleHash {
        self.hash
    }

    /// Replace the blessed set
    pub fn with_blessed<I: IntoIterator<Item = ModuleHash>>(mut self, blessed: I) -> Self {
        self.blessed = blessed.into_iter().collect();
        self
    }

    /// Replace the implemented interfaces
    pub fn with_interfaces<I: IntoIterator<Item = ModuleName>>(mut self, interfaces: I) -> Self {
        self.interfaces = interfaces.into_iter().collect();
        self
    }

    /// Replace the imports
    pub fn with_imports<I: IntoIterator<Item = Use>>(mut self, imports: I) -> Self {
        self.imports = imports.into_iter().collect();
        self
    }

    /// Redeploy with new code. The current hash joins the blessed set so
    /// callers pinned to it keep working.
    pub fn upgrade(mut self, code: Code) -> Self {
        let hash = code.hash();
        if hash != self.hash {
            self.blessed.insert(self.hash);
        }
        self.hash = hash;
        self.code = code;
        self
    }

    /// A call pinned to `hash` is accepted when it is this module's hash or a blessed one
    pub fn accepts_hash(&self, hash: &ModuleHash) -> bool {
        self.hash == *hash || self.blessed.contains(hash)
    }
}

/// An interface: declarations only, no governance or hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interface {
    /// Source text
    pub code: Code,
    /// Imports
    pub imports: Vec<Use>,
    /// Docs and model
    pub meta: Meta,
    /// Interface name
    pub name: ModuleName,
}

impl Interface {
    /// New interface without imports
    pub fn new(name: ModuleName, meta: Meta, code: Code) -> Self {
        Interface {
            code,
            imports: Vec::new(),
            meta,
            name,
        }
    }

    /// Replace the imports
    pub fn with_imports<I: IntoIterator<Item = Use>>(mut self, imports: I) -> Self {
        self.imports = imports.into_iter().collect();
        self
    }
}

/// A module or an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDef<G> {
    /// Module
    Module(Module<G>),
    /// Interface
    Interface(Interface),
}

impl<G> ModuleDef<G> {
    /// Name
    pub fn name(&self) -> &ModuleName {
        match self {
            ModuleDef::Module(m) => &m.name,
            ModuleDef::Interface(i) => &i.name,
        }
    }

    /// Source text
    pub fn code(&self) -> &Code {
        match self {
            ModuleDef::Module(m) => m.code(),
            ModuleDef::Interface(i) => &i.code,
        }
    }

    /// Docs and model
    pub fn meta(&self) -> &Meta {
        match self {
            ModuleDef::Module(m) => &m.meta,
            ModuleDef::Interface(i) => &i.meta,
        }
    }

    /// Imports
    pub fn imports(&self) -> &[Use] {
        match self {
            ModuleDef::Module(m) => &m.imports,
            ModuleDef::Interface(i) => &i.imports,
        }
    }

    /// The module, if this is one
    pub fn as_module(&self) -> Option<&Module<G>> {
        match self {
            ModuleDef::Module(m) => Some(m),
            ModuleDef::Interface(_) => None,
        }
    }

    /// The interface, if this is one
    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            ModuleDef::Module(_) => None,
            ModuleDef::Interface(i) => Some(i),
        }
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        matches!(self, ModuleDef::Interface(_))
    }
}

impl<G: DeserializeOwned> ModuleDef<G> {
    /// Decode as a module, falling back to an interface
    pub fn from_value(value: Value) -> Result<Self, ModuleDecodeError> {
        let module_err = match serde_json::from_value::<Module<G>>(value.clone()) {
            Ok(m) => return Ok(ModuleDef::Module(m)),
            Err(e) => e,
        };
        match serde_json::from_value::<Interface>(value) {
            Ok(i) => {
                tracing::trace!(name = %i.name, "decoded module definition as interface");
                Ok(ModuleDef::Interface(i))
            }
            Err(interface_err) => {
                tracing::debug!(%module_err, %interface_err, "rejecting module definition");
                Err(ModuleDecodeError::UnrecognizedModuleDef {
                    module: module_err.to_string(),
                    interface: interface_err.to_string(),
                })
            }
        }
    }
}

impl<G: Serialize> Serialize for ModuleDef<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModuleDef::Module(m) => m.serialize(serializer),
            ModuleDef::Interface(i) => i.serialize(serializer),
        }
    }
}

impl<'de, G: DeserializeOwned> Deserialize<'de> for ModuleDef<G> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ModuleDef::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl<G> From<Module<G>> for ModuleDef<G> {
    fn from(m: Module<G>) -> Self {
        ModuleDef::Module(m)
    }
}

impl<G> From<Interface> for ModuleDef<G> {
    fn from(i: Interface) -> Self {
        ModuleDef::Interface(i)
    }
}
