//! Names and identifiers
//!
//! Module names, namespaces, keyset names, qualified names, field labels and
//! defpact ids. Every identifier is an ordered, hashable value with no
//! identity semantics.
//!
//! Dotted names are validated when built, so every name that can be
//! constructed renders to text that parses back to the same name.

use compact_str::CompactString;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors produced when building or parsing names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameParseError {
    /// Input was empty
    #[error("empty name")]
    Empty,

    /// A dotted name had an empty segment
    #[error("empty segment in name: {0}")]
    EmptySegment(String),

    /// A single-segment name contained a dot
    #[error("unexpected '.' in name segment: {0}")]
    DottedSegment(String),

    /// A qualified name needs at least a module and a member
    #[error("expected a qualified name of the form module.name, got: {0}")]
    NotQualified(String),
}

/// A single dot-free segment: module names and module members
fn segment(s: CompactString) -> Result<CompactString, NameParseError> {
    if s.is_empty() {
        Err(NameParseError::Empty)
    } else if s.contains('.') {
        Err(NameParseError::DottedSegment(s.into()))
    } else {
        Ok(s)
    }
}

/// Namespace name. May be dotted, but no segment may be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "CompactString", try_from = "CompactString")]
pub struct NamespaceName(CompactString);

impl NamespaceName {
    /// Create a namespace name
    pub fn new<S: Into<CompactString>>(name: S) -> Result<Self, NameParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameParseError::Empty);
        }
        if name.split('.').any(str::is_empty) {
            return Err(NameParseError::EmptySegment(name.into()));
        }
        Ok(NamespaceName(name))
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<CompactString> for NamespaceName {
    type Error = NameParseError;

    fn try_from(s: CompactString) -> Result<Self, Self::Error> {
        NamespaceName::new(s)
    }
}

impl From<NamespaceName> for CompactString {
    fn from(ns: NamespaceName) -> Self {
        ns.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
struct RawModuleName {
    name: CompactString,
    namespace: Option<NamespaceName>,
}

/// Module name representation, optionally inside a namespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawModuleName")]
pub struct ModuleName {
    name: CompactString,
    namespace: Option<NamespaceName>,
}

impl ModuleName {
    /// Module name without namespace
    pub fn simple<S: Into<CompactString>>(name: S) -> Result<Self, NameParseError> {
        Ok(ModuleName {
            name: segment(name.into())?,
            namespace: None,
        })
    }

    /// Module name inside a namespace
    pub fn namespaced<S1, S2>(namespace: S1, name: S2) -> Result<Self, NameParseError>
    where
        S1: Into<CompactString>,
        S2: Into<CompactString>,
    {
        Ok(ModuleName {
            name: segment(name.into())?,
            namespace: Some(NamespaceName::new(namespace)?),
        })
    }

    /// Module name string
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace, if any
    pub fn namespace(&self) -> Option<&NamespaceName> {
        self.namespace.as_ref()
    }

    /// Render as qualified string
    pub fn render(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.to_string(),
        }
    }

    /// Parse from a rendered module name, splitting the namespace at the last dot
    pub fn parse(s: &str) -> Result<Self, NameParseError> {
        if s.is_empty() {
            return Err(NameParseError::Empty);
        }
        match s.rfind('.') {
            Some(dot) => {
                let (ns, name) = (&s[..dot], &s[dot + 1..]);
                if ns.is_empty() || name.is_empty() {
                    return Err(NameParseError::EmptySegment(s.to_string()));
                }
                ModuleName::namespaced(ns, name)
                    .map_err(|_| NameParseError::EmptySegment(s.to_string()))
            }
            None => ModuleName::simple(s),
        }
    }
}

impl TryFrom<RawModuleName> for ModuleName {
    type Error = NameParseError;

    fn try_from(raw: RawModuleName) -> Result<Self, Self::Error> {
        Ok(ModuleName {
            name: segment(raw.name)?,
            namespace: raw.namespace,
        })
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl FromStr for ModuleName {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleName::parse(s)
    }
}

/// Name of a keyset stored in the keyset table.
///
/// Encoded as a bare string when it has no namespace and as
/// `{"ksn": name, "ns": namespace}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySetName {
    name: CompactString,
    namespace: Option<NamespaceName>,
}

impl KeySetName {
    /// Keyset name outside any namespace
    pub fn new<S: Into<CompactString>>(name: S) -> Result<Self, NameParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameParseError::Empty);
        }
        Ok(KeySetName { name, namespace: None })
    }

    /// Keyset name inside a namespace
    pub fn namespaced<S1, S2>(namespace: S1, name: S2) -> Result<Self, NameParseError>
    where
        S1: Into<CompactString>,
        S2: Into<CompactString>,
    {
        let mut ks = KeySetName::new(name)?;
        ks.namespace = Some(NamespaceName::new(namespace)?);
        Ok(ks)
    }

    /// Keyset name within its namespace
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace, if any
    pub fn namespace(&self) -> Option<&NamespaceName> {
        self.namespace.as_ref()
    }

    /// Render as `ns.name` or `name`
    pub fn render(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.to_string(),
        }
    }
}

impl fmt::Display for KeySetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl TryFrom<&str> for KeySetName {
    type Error = NameParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        KeySetName::new(s)
    }
}

impl Serialize for KeySetName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.namespace {
            None => serializer.serialize_str(&self.name),
            Some(ns) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ksn", &self.name)?;
                map.serialize_entry("ns", ns)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for KeySetName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(CompactString),
            Qualified {
                ksn: CompactString,
                ns: Option<NamespaceName>,
            },
        }

        let ks = match Repr::deserialize(deserializer)? {
            Repr::Bare(name) | Repr::Qualified { ksn: name, ns: None } => KeySetName::new(name),
            Repr::Qualified { ksn, ns: Some(ns) } => KeySetName::new(ksn).map(|mut ks| {
                ks.namespace = Some(ns);
                ks
            }),
        };
        ks.map_err(|e| de::Error::custom(format!("invalid keyset name: {e}")))
    }
}

/// Qualified name for functions, capabilities, etc. within modules
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    name: CompactString,
    module: ModuleName,
}

impl QualifiedName {
    /// Member `name` of `module`
    pub fn new<S>(module: ModuleName, name: S) -> Result<Self, NameParseError>
    where
        S: Into<CompactString>,
    {
        Ok(QualifiedName {
            name: segment(name.into())?,
            module,
        })
    }

    /// Local name within the module
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defining module
    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// Render as fully qualified string
    pub fn render(&self) -> String {
        format!("{}.{}", self.module.render(), self.name)
    }

    /// Parse `module.name` or `ns.module.name`
    pub fn parse(s: &str) -> Result<Self, NameParseError> {
        let dot = s.rfind('.').ok_or_else(|| NameParseError::NotQualified(s.to_string()))?;
        let (module, name) = (&s[..dot], &s[dot + 1..]);
        if name.is_empty() {
            return Err(NameParseError::EmptySegment(s.to_string()));
        }
        QualifiedName::new(ModuleName::parse(module)?, name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl FromStr for QualifiedName {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualifiedName::parse(s)
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = CompactString::deserialize(deserializer)?;
        QualifiedName::parse(&text).map_err(de::Error::custom)
    }
}

/// Object field / row label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field(pub CompactString);

impl Field {
    /// Create a field label
    pub fn new<S: Into<CompactString>>(name: S) -> Self {
        Field(name.into())
    }

    /// Get the label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::new(s)
    }
}

/// Unique identifier for a defpact execution instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefPactId(pub CompactString);

impl DefPactId {
    /// Create a new DefPactId
    pub fn new<S: Into<CompactString>>(id: S) -> Self {
        DefPactId(id.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefPactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
