//! Built-in typeclass metadata
//!
//! Tags, predicates, instance declarations and the class table consumed by
//! constraint resolution. Resolution itself lives with the inference engine.

use crate::types::{PrimType, Type};
use pact_core::names::Field;
use serde::{Deserialize, Serialize};

/// Built-in typeclass tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuiltinTC {
    /// Equality
    Eq,
    /// Ordering
    Ord,
    /// Conversion to string
    Show,
    /// `+`
    Add,
    /// Arithmetic
    Num,
    /// Row lacking the named field
    WithoutField(Field),
}

impl BuiltinTC {
    /// Direct superclasses
    pub fn superclasses(&self) -> Vec<BuiltinTC> {
        match self {
            BuiltinTC::Ord => vec![BuiltinTC::Eq],
            BuiltinTC::Num => vec![BuiltinTC::Add],
            BuiltinTC::Eq | BuiltinTC::Show | BuiltinTC::Add | BuiltinTC::WithoutField(_) => {
                Vec::new()
            }
        }
    }

    /// Whether the tag takes a parameter
    pub fn is_parametric(&self) -> bool {
        matches!(self, BuiltinTC::WithoutField(_))
    }
}

/// A typeclass tag applied to a type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pred<N> {
    /// Constraint
    pub class: BuiltinTC,
    /// Constrained type
    pub ty: Type<N>,
}

impl<N> Pred<N> {
    /// `class(ty)`
    pub fn new(class: BuiltinTC, ty: Type<N>) -> Self {
        Pred { class, ty }
    }

    /// Attach this predicate to its type as a `TCTyCon`
    pub fn into_type(self) -> Type<N> {
        Type::constrained(self.class, self.ty)
    }
}

/// Instance declaration: `context => head`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instance<N> {
    /// Predicates that must hold for the head to hold
    pub context: Vec<Pred<N>>,
    /// Entailed predicate
    pub head: Pred<N>,
}

impl<N> Instance<N> {
    /// Instance with antecedents
    pub fn new(context: Vec<Pred<N>>, head: Pred<N>) -> Self {
        Instance { context, head }
    }

    /// Instance that holds unconditionally
    pub fn fact(head: Pred<N>) -> Self {
        Instance::new(Vec::new(), head)
    }

    /// No antecedents
    pub fn is_fact(&self) -> bool {
        self.context.is_empty()
    }
}

/// A class: its tag, superclasses and known instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class<N> {
    /// Class tag
    pub tag: BuiltinTC,
    /// Superclass tags
    pub superclasses: Vec<BuiltinTC>,
    /// Known instances
    pub instances: Vec<Instance<N>>,
}

impl<N> Class<N> {
    /// Class with the tag's superclasses and no instances
    pub fn new(tag: BuiltinTC) -> Self {
        let superclasses = tag.superclasses();
        Class {
            tag,
            superclasses,
            instances: Vec::new(),
        }
    }

    /// Add an instance
    pub fn with_instance(mut self, instance: Instance<N>) -> Self {
        self.instances.push(instance);
        self
    }

    fn with_prims(self, prims: &[PrimType]) -> Self {
        prims.iter().fold(self, |class, p| {
            let head = Pred::new(class.tag.clone(), Type::TyPrim(*p));
            class.with_instance(Instance::fact(head))
        })
    }
}

/// The built-in class table.
///
/// `var` names the element type variable of the list instances, e.g.
/// `Eq(a) => Eq(list a)`.
pub fn builtin_classes<N: Clone>(var: N) -> Vec<Class<N>> {
    use PrimType::{Bool, Decimal, Integer, String, Time, Unit};

    let a = || Type::TyVar(var.clone());
    let list_a = || Type::list(a());
    let lifted =
        |tag: BuiltinTC| Instance::new(vec![Pred::new(tag.clone(), a())], Pred::new(tag, list_a()));

    vec![
        Class::new(BuiltinTC::Eq)
            .with_prims(&[Integer, Decimal, Time, Bool, String, Unit])
            .with_instance(lifted(BuiltinTC::Eq)),
        Class::new(BuiltinTC::Ord)
            .with_prims(&[Integer, Decimal, Time, String, Unit])
            .with_instance(lifted(BuiltinTC::Ord)),
        Class::new(BuiltinTC::Show)
            .with_prims(&[Integer, Decimal, Time, Bool, String, Unit])
            .with_instance(lifted(BuiltinTC::Show)),
        Class::new(BuiltinTC::Add)
            .with_prims(&[Integer, Decimal, String])
            .with_instance(Instance::fact(Pred::new(BuiltinTC::Add, list_a()))),
        Class::new(BuiltinTC::Num).with_prims(&[Integer, Decimal]),
    ]
}
