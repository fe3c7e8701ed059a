//! Guard system for Pact authorization
//!
//! A [`Guard`] describes one mechanism by which an operation is authorized.
//! The variant set is closed: authorization code elsewhere dispatches
//! exhaustively on [`Guard::kind`]. Nothing here verifies signatures or looks
//! up granted capabilities; guards are plain values built from already
//! validated parts.
//!
//! Guards are generic over the argument payload `A` of user and capability
//! guards so this crate never depends on the evaluator's term representation.

mod codec;

pub use codec::GuardDecodeError;

use crate::capability::{CapabilityGuard, ModuleGuard, PactGuard, UserGuard};
use crate::names::{DefPactId, KeySetName, ModuleName, NameParseError, QualifiedName};
use crate::shared::PublicKeyText;
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Keyset predicate functions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeySetPredicate {
    /// All keys must sign
    KeysAll,
    /// Any key can sign
    KeysAny,
    /// At least 2 keys must sign
    Keys2,
    /// User-defined predicate function, by name
    Custom(CompactString),
}

impl KeySetPredicate {
    /// Get the name of this predicate
    pub fn name(&self) -> &str {
        match self {
            KeySetPredicate::KeysAll => "keys-all",
            KeySetPredicate::KeysAny => "keys-any",
            KeySetPredicate::Keys2 => "keys-2",
            KeySetPredicate::Custom(s) => s,
        }
    }

    /// Parse predicate from its name. Unknown names are custom predicates.
    pub fn parse(s: &str) -> Result<Self, NameParseError> {
        Ok(match s {
            "" => return Err(NameParseError::Empty),
            "keys-all" => KeySetPredicate::KeysAll,
            "keys-any" => KeySetPredicate::KeysAny,
            "keys-2" => KeySetPredicate::Keys2,
            _ => KeySetPredicate::Custom(s.into()),
        })
    }
}

impl fmt::Display for KeySetPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for KeySetPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.name().is_empty() {
            return Err(serde::ser::Error::custom("empty keyset predicate"));
        }
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for KeySetPredicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = CompactString::deserialize(deserializer)?;
        KeySetPredicate::parse(&name)
            .map_err(|_| serde::de::Error::custom("empty keyset predicate"))
    }
}

/// Key set for multi-signature authorization
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeySet {
    /// Set of public keys
    pub keys: BTreeSet<PublicKeyText>,
    /// Predicate deciding how many signatures satisfy the set
    pub pred: KeySetPredicate,
}

impl KeySet {
    /// Create a new keyset
    pub fn new<I, K>(keys: I, pred: KeySetPredicate) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PublicKeyText>,
    {
        KeySet {
            keys: keys.into_iter().map(Into::into).collect(),
            pred,
        }
    }

    /// Create keyset with keys-all predicate
    pub fn keys_all<I: IntoIterator<Item = K>, K: Into<PublicKeyText>>(keys: I) -> Self {
        KeySet::new(keys, KeySetPredicate::KeysAll)
    }

    /// Create keyset with keys-any predicate
    pub fn keys_any<I: IntoIterator<Item = K>, K: Into<PublicKeyText>>(keys: I) -> Self {
        KeySet::new(keys, KeySetPredicate::KeysAny)
    }
}

impl fmt::Display for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys.iter().map(PublicKeyText::as_str).collect();
        write!(f, "KeySet {{keys: [{}],pred: {}}}", keys.join(", "), self.pred)
    }
}

/// Tag identifying which of the six guard forms a value is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuardKind {
    /// Inline keyset
    KeySet,
    /// Reference to a stored keyset
    KeySetRef,
    /// Pact execution guard
    Pact,
    /// Module authority guard
    Module,
    /// User predicate guard
    User,
    /// Capability guard
    Capability,
}

impl GuardKind {
    /// All kinds, in variant order
    pub const ALL: [GuardKind; 6] = [
        GuardKind::KeySet,
        GuardKind::KeySetRef,
        GuardKind::Pact,
        GuardKind::Module,
        GuardKind::User,
        GuardKind::Capability,
    ];

    /// Alphabetically sorted wire field names of this kind
    pub fn field_names(self) -> &'static [&'static str] {
        codec::field_names(self)
    }
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuardKind::KeySet => "keyset",
            GuardKind::KeySetRef => "keyset-ref",
            GuardKind::Pact => "pact",
            GuardKind::Module => "module",
            GuardKind::User => "user",
            GuardKind::Capability => "capability",
        };
        f.write_str(name)
    }
}

/// Authorization guard
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Guard<A> {
    /// Inline keyset with keys and predicate
    KeySet(KeySet),
    /// Keyset stored elsewhere under this name
    KeySetRef(KeySetName),
    /// Pact execution guard
    Pact(PactGuard),
    /// Module authority guard
    Module(ModuleGuard),
    /// User-defined guard function
    User(UserGuard<A>),
    /// Capability guard
    Capability(CapabilityGuard<A>),
}

impl<A> Guard<A> {
    /// Which of the six guard forms this is
    pub fn kind(&self) -> GuardKind {
        match self {
            Guard::KeySet(_) => GuardKind::KeySet,
            Guard::KeySetRef(_) => GuardKind::KeySetRef,
            Guard::Pact(_) => GuardKind::Pact,
            Guard::Module(_) => GuardKind::Module,
            Guard::User(_) => GuardKind::User,
            Guard::Capability(_) => GuardKind::Capability,
        }
    }

    /// Create a new keyset guard
    pub fn keyset(keyset: KeySet) -> Self {
        Guard::KeySet(keyset)
    }

    /// Create a keyset reference guard
    pub fn keyset_ref(name: KeySetName) -> Self {
        Guard::KeySetRef(name)
    }

    /// Create a pact guard
    pub fn pact<S: Into<CompactString>>(pact_id: DefPactId, name: S) -> Self {
        Guard::Pact(PactGuard::new(pact_id, name))
    }

    /// Create a module guard
    pub fn module<S: Into<CompactString>>(module_name: ModuleName, name: S) -> Self {
        Guard::Module(ModuleGuard::new(module_name, name))
    }

    /// Create a new user guard
    pub fn user<I: IntoIterator<Item = A>>(fun: QualifiedName, args: I) -> Self {
        Guard::User(UserGuard::new(fun, args))
    }

    /// Create a new capability guard
    pub fn capability<I: IntoIterator<Item = A>>(
        name: QualifiedName,
        args: I,
        pact_id: Option<DefPactId>,
    ) -> Self {
        let mut guard = CapabilityGuard::new(name, args);
        guard.pact_id = pact_id;
        Guard::Capability(guard)
    }

    /// Argument list of user and capability guards; empty for the others
    pub fn args(&self) -> &[A] {
        match self {
            Guard::User(ug) => &ug.args[..],
            Guard::Capability(cg) => &cg.args[..],
            Guard::KeySet(_) | Guard::KeySetRef(_) | Guard::Pact(_) | Guard::Module(_) => &[],
        }
    }

    /// Fold over the argument payload
    pub fn fold_args<B, F: FnMut(B, &A) -> B>(&self, init: B, f: F) -> B {
        self.args().iter().fold(init, f)
    }

    /// Convert the argument payload, keeping the guard's shape
    pub fn map_args<B, F: FnMut(&A) -> B>(&self, f: F) -> Guard<B> {
        match self {
            Guard::KeySet(ks) => Guard::KeySet(ks.clone()),
            Guard::KeySetRef(name) => Guard::KeySetRef(name.clone()),
            Guard::Pact(pg) => Guard::Pact(pg.clone()),
            Guard::Module(mg) => Guard::Module(mg.clone()),
            Guard::User(ug) => Guard::User(ug.map_args(f)),
            Guard::Capability(cg) => Guard::Capability(cg.map_args(f)),
        }
    }

    /// Fallible [`Guard::map_args`]
    pub fn try_map_args<B, E, F: FnMut(&A) -> Result<B, E>>(&self, f: F) -> Result<Guard<B>, E> {
        Ok(match self {
            Guard::KeySet(ks) => Guard::KeySet(ks.clone()),
            Guard::KeySetRef(name) => Guard::KeySetRef(name.clone()),
            Guard::Pact(pg) => Guard::Pact(pg.clone()),
            Guard::Module(mg) => Guard::Module(mg.clone()),
            Guard::User(ug) => Guard::User(ug.try_map_args(f)?),
            Guard::Capability(cg) => Guard::Capability(cg.try_map_args(f)?),
        })
    }
}

fn write_args<A: fmt::Display>(f: &mut fmt::Formatter<'_>, args: &[A]) -> fmt::Result {
    write!(f, "[")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, "]")
}

impl<A: fmt::Display> fmt::Display for Guard<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::KeySet(ks) => write!(f, "{}", ks),
            Guard::KeySetRef(name) => write!(f, "KeySetRef({})", name),
            Guard::Pact(pg) => write!(f, "PactGuard {{pactId: {},name: {}}}", pg.pact_id, pg.name),
            Guard::Module(mg) => {
                write!(f, "ModuleGuard {{module: {},name: {}}}", mg.module_name, mg.name)
            }
            Guard::User(ug) => {
                write!(f, "UserGuard {{fun: {},args: ", ug.fun)?;
                write_args(f, &ug.args)?;
                write!(f, "}}")
            }
            Guard::Capability(cg) => {
                write!(f, "CapabilityGuard {{name: {},args: ", cg.name)?;
                write_args(f, &cg.args)?;
                match &cg.pact_id {
                    Some(pid) => write!(f, ",pactId: {}}}", pid),
                    None => write!(f, "}}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(module: &str, name: &str) -> QualifiedName {
        QualifiedName::new(ModuleName::simple(module).unwrap(), name).unwrap()
    }

    fn one_of_each() -> Vec<Guard<i64>> {
        vec![
            Guard::keyset(KeySet::keys_all(["k1", "k2"])),
            Guard::keyset_ref(KeySetName::new("admin").unwrap()),
            Guard::pact(DefPactId::new("pid"), "transfer-crosschain"),
            Guard::module(ModuleName::simple("coin").unwrap(), "bank"),
            Guard::user(qn("m", "enforce-even"), vec![2]),
            Guard::capability(qn("coin", "GAS"), Vec::new(), None),
        ]
    }

    #[test]
    fn test_kind_matches_variant() {
        let kinds: Vec<GuardKind> = one_of_each().iter().map(Guard::kind).collect();
        assert_eq!(kinds, GuardKind::ALL.to_vec());
    }

    #[test]
    fn test_ordering_follows_variant_tag_first() {
        let mut guards = one_of_each();
        guards.reverse();
        guards.sort();
        assert_eq!(guards, one_of_each());

        // payload ordering within a variant
        let a = Guard::<i64>::keyset_ref(KeySetName::new("a").unwrap());
        let b = Guard::<i64>::keyset_ref(KeySetName::new("b").unwrap());
        assert!(a < b);
    }

    #[test]
    fn test_keyset_predicate_names() {
        for name in ["keys-all", "keys-any", "keys-2", "free.my-pred"] {
            assert_eq!(KeySetPredicate::parse(name).unwrap().name(), name);
        }
        assert_eq!(KeySetPredicate::parse("keys-2").unwrap(), KeySetPredicate::Keys2);
        assert_eq!(
            KeySetPredicate::parse("free.my-pred").unwrap(),
            KeySetPredicate::Custom("free.my-pred".into())
        );
    }

    #[test]
    fn test_keyset_deduplicates_and_sorts_keys() {
        let ks = KeySet::keys_any(["b", "a", "b"]);
        let keys: Vec<&str> = ks.keys.iter().map(PublicKeyText::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_args_and_fold() {
        let g = Guard::user(qn("m", "sum-check"), vec![1, 2, 3]);
        assert_eq!(g.args(), &[1, 2, 3]);
        assert_eq!(g.fold_args(0, |acc, x| acc + x), 6);
        assert!(Guard::<i64>::keyset_ref(KeySetName::new("k").unwrap()).args().is_empty());
    }

    #[test]
    fn test_map_args_preserves_shape() {
        for g in one_of_each() {
            let mapped = g.map_args(|n| n.to_string());
            assert_eq!(mapped.kind(), g.kind());
            assert_eq!(mapped.args().len(), g.args().len());
        }
        let wide = Guard::capability(qn("c", "CAP"), vec![300i64], None);
        let failed: Result<Guard<u8>, String> =
            wide.try_map_args(|n| u8::try_from(*n).map_err(|e| e.to_string()));
        assert!(failed.is_err());
    }

    #[test]
    fn test_display() {
        let ks = Guard::<i64>::keyset(KeySet::keys_all(["k1", "k2"]));
        assert_eq!(ks.to_string(), "KeySet {keys: [k1, k2],pred: keys-all}");

        let ug = Guard::user(qn("m", "check"), vec![1, 2]);
        assert_eq!(ug.to_string(), "UserGuard {fun: m.check,args: [1, 2]}");

        let cg = Guard::capability(qn("coin", "TRANSFER"), vec![5], Some(DefPactId::new("p1")));
        assert_eq!(cg.to_string(), "CapabilityGuard {name: coin.TRANSFER,args: [5],pactId: p1}");

        let mg = Guard::<i64>::module(ModuleName::namespaced("free", "bank").unwrap(), "vault");
        assert_eq!(mg.to_string(), "ModuleGuard {module: free.bank,name: vault}");
    }
}
