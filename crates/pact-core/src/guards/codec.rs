//! Tag-free guard encoding
//!
//! Guards are serialized without a discriminant. The variant is recovered
//! from the set of field names present in the encoded object, sorted
//! alphabetically and matched exactly against a fixed table. Anything that
//! is not an exact match is rejected; stored data depends on both the table
//! and the error text, so neither may change.

use super::{Guard, GuardKind, KeySet};
use crate::capability::{CapabilityGuard, ModuleGuard, PactGuard, UserGuard};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

const KEYSET_FIELDS: &[&str] = &["keys", "pred"];
const KEYSET_REF_FIELDS: &[&str] = &["keysetref"];
const PACT_FIELDS: &[&str] = &["name", "pactId"];
const MODULE_FIELDS: &[&str] = &["moduleName", "name"];
const USER_FIELDS: &[&str] = &["args", "fun"];
const CAPABILITY_FIELDS: &[&str] = &["cgArgs", "cgName", "cgPactId"];

/// Sorted field set → guard kind
const GUARD_SHAPES: [(&[&str], GuardKind); 6] = [
    (KEYSET_FIELDS, GuardKind::KeySet),
    (KEYSET_REF_FIELDS, GuardKind::KeySetRef),
    (PACT_FIELDS, GuardKind::Pact),
    (MODULE_FIELDS, GuardKind::Module),
    (USER_FIELDS, GuardKind::User),
    (CAPABILITY_FIELDS, GuardKind::Capability),
];

pub(super) fn field_names(kind: GuardKind) -> &'static [&'static str] {
    match kind {
        GuardKind::KeySet => KEYSET_FIELDS,
        GuardKind::KeySetRef => KEYSET_REF_FIELDS,
        GuardKind::Pact => PACT_FIELDS,
        GuardKind::Module => MODULE_FIELDS,
        GuardKind::User => USER_FIELDS,
        GuardKind::Capability => CAPABILITY_FIELDS,
    }
}

/// Failure decoding a guard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardDecodeError {
    /// The field set matched none of the six guard shapes
    #[error("unexpected guard fields: {fields:?}")]
    UnexpectedFields {
        /// Field names of the input, sorted alphabetically
        fields: Vec<String>,
    },

    /// The shape matched but one of its fields did not decode
    #[error("invalid {kind} guard field {field}: {reason}")]
    InvalidField {
        /// Guard kind selected by the field set
        kind: GuardKind,
        /// Offending field
        field: &'static str,
        /// Underlying decode failure
        reason: String,
    },
}

impl GuardDecodeError {
    /// Decode failures describe malformed input and never succeed on retry
    pub fn is_permanent(&self) -> bool {
        true
    }
}

/// Alphabetically sorted field names of an encoded value; empty for non-objects
fn sorted_fields(value: &Value) -> Vec<String> {
    let mut fields: Vec<String> = match value {
        Value::Object(obj) => obj.keys().cloned().collect(),
        _ => Vec::new(),
    };
    fields.sort();
    fields
}

fn match_shape(fields: &[String]) -> Option<GuardKind> {
    GUARD_SHAPES
        .iter()
        .find(|(shape, _)| {
            shape.len() == fields.len() && shape.iter().zip(fields).all(|(s, f)| *s == f)
        })
        .map(|(_, kind)| *kind)
}

fn take_field<T: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    kind: GuardKind,
    field: &'static str,
) -> Result<T, GuardDecodeError> {
    let value = obj.remove(field).unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| GuardDecodeError::InvalidField {
        kind,
        field,
        reason: e.to_string(),
    })
}

fn take_args<A: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    kind: GuardKind,
    field: &'static str,
) -> Result<Arc<[A]>, GuardDecodeError> {
    take_field::<Vec<A>>(obj, kind, field).map(Arc::from)
}

impl<A: DeserializeOwned> Guard<A> {
    /// Decode a guard from its structural encoding
    pub fn from_value(value: Value) -> Result<Self, GuardDecodeError> {
        let fields = sorted_fields(&value);
        let Some(kind) = match_shape(&fields) else {
            tracing::debug!(?fields, "rejecting guard with unrecognized field set");
            return Err(GuardDecodeError::UnexpectedFields { fields });
        };
        let Value::Object(mut obj) = value else {
            return Err(GuardDecodeError::UnexpectedFields { fields });
        };

        let guard = match kind {
            GuardKind::KeySet => Guard::KeySet(KeySet {
                keys: take_field(&mut obj, kind, "keys")?,
                pred: take_field(&mut obj, kind, "pred")?,
            }),
            GuardKind::KeySetRef => Guard::KeySetRef(take_field(&mut obj, kind, "keysetref")?),
            GuardKind::Pact => Guard::Pact(PactGuard {
                pact_id: take_field(&mut obj, kind, "pactId")?,
                name: take_field(&mut obj, kind, "name")?,
            }),
            GuardKind::Module => Guard::Module(ModuleGuard {
                module_name: take_field(&mut obj, kind, "moduleName")?,
                name: take_field(&mut obj, kind, "name")?,
            }),
            GuardKind::User => Guard::User(UserGuard {
                fun: take_field(&mut obj, kind, "fun")?,
                args: take_args(&mut obj, kind, "args")?,
            }),
            GuardKind::Capability => Guard::Capability(CapabilityGuard {
                name: take_field(&mut obj, kind, "cgName")?,
                args: take_args(&mut obj, kind, "cgArgs")?,
                pact_id: take_field(&mut obj, kind, "cgPactId")?,
            }),
        };
        Ok(guard)
    }
}

impl<A: Serialize> Guard<A> {
    /// Encode to a structured value
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

// Fields are written in the same sorted order the decoder matches on.
impl<A: Serialize> Serialize for Guard<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.kind().field_names().len()))?;
        match self {
            Guard::KeySet(ks) => {
                map.serialize_entry("keys", &ks.keys)?;
                map.serialize_entry("pred", &ks.pred)?;
            }
            Guard::KeySetRef(name) => {
                map.serialize_entry("keysetref", name)?;
            }
            Guard::Pact(pg) => {
                map.serialize_entry("name", &pg.name)?;
                map.serialize_entry("pactId", &pg.pact_id)?;
            }
            Guard::Module(mg) => {
                map.serialize_entry("moduleName", &mg.module_name)?;
                map.serialize_entry("name", &mg.name)?;
            }
            Guard::User(ug) => {
                map.serialize_entry("args", &*ug.args)?;
                map.serialize_entry("fun", &ug.fun)?;
            }
            Guard::Capability(cg) => {
                map.serialize_entry("cgArgs", &*cg.args)?;
                map.serialize_entry("cgName", &cg.name)?;
                map.serialize_entry("cgPactId", &cg.pact_id)?;
            }
        }
        map.end()
    }
}

impl<'de, A: DeserializeOwned> Deserialize<'de> for Guard<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Guard::from_value(value).map_err(serde::de::Error::custom)
    }
}
