//! Core type representation
//!
//! `Type<N>` is generic over the name used for type variables so the same
//! algebra serves the parser (plain text names) and an inference engine
//! (unique ids).

use crate::typeclass::BuiltinTC;
use pact_core::literal::Literal;
use pact_core::names::Field;
use pact_core::object::Object;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors constructing types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A list that must hold at least one element was empty
    #[error("expected a non-empty list")]
    EmptyList,

    /// A quantifier with no variables
    #[error("forall must bind at least one type variable")]
    EmptyForall,

    /// The same variable bound twice by one quantifier
    #[error("type variable {var} bound more than once in forall")]
    DuplicateBinder {
        /// Rendered variable name
        var: String,
    },
}

/// Primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrimType {
    /// Arbitrary precision integer
    Integer,
    /// Arbitrary precision decimal
    Decimal,
    /// UTC timestamp
    Time,
    /// Boolean
    Bool,
    /// String
    String,
    /// Unit
    Unit,
}

impl PrimType {
    /// All primitive types
    pub const ALL: [PrimType; 6] = [
        PrimType::Integer,
        PrimType::Decimal,
        PrimType::Time,
        PrimType::Bool,
        PrimType::String,
        PrimType::Unit,
    ];

    /// Keyword used in source and diagnostics
    pub fn keyword(self) -> &'static str {
        match self {
            PrimType::Integer => "integer",
            PrimType::Decimal => "decimal",
            PrimType::Time => "time",
            PrimType::Bool => "bool",
            PrimType::String => "string",
            PrimType::Unit => "unit",
        }
    }
}

/// A list with at least one element
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmpty<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmpty<T> {
    /// List of `head` followed by `tail`
    pub fn new(head: T, tail: Vec<T>) -> Self {
        NonEmpty { head, tail }
    }

    /// Single element list
    pub fn singleton(head: T) -> Self {
        NonEmpty::new(head, Vec::new())
    }

    /// Fails on an empty vector
    pub fn from_vec(items: Vec<T>) -> Result<Self, TypeError> {
        let mut iter = items.into_iter();
        let head = iter.next().ok_or(TypeError::EmptyList)?;
        Ok(NonEmpty::new(head, iter.collect()))
    }

    /// First element
    pub fn first(&self) -> &T {
        &self.head
    }

    /// Number of elements, never zero
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate in order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Apply `f` to every element
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> NonEmpty<U> {
        NonEmpty {
            head: f(self.head),
            tail: self.tail.into_iter().map(f).collect(),
        }
    }

    /// Convert to a plain vector
    pub fn into_vec(self) -> Vec<T> {
        let mut items = Vec::with_capacity(1 + self.tail.len());
        items.push(self.head);
        items.extend(self.tail);
        items
    }
}

impl<T: Serialize> Serialize for NonEmpty<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmpty<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        NonEmpty::from_vec(items).map_err(serde::de::Error::custom)
    }
}

/// Row of labelled types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Row<N> {
    /// Fields plus an optional row variable standing for further fields
    RowTy(Object<Type<N>>, Option<N>),
    /// A row that is entirely unknown
    RowVar(N),
    /// The row with no fields
    EmptyRow,
}

impl<N> Row<N> {
    /// Row with exactly these fields
    pub fn closed<I: IntoIterator<Item = (Field, Type<N>)>>(fields: I) -> Self {
        Row::RowTy(fields.into_iter().collect(), None)
    }

    /// Row with these fields and possibly more, named by `tail`
    pub fn open<I: IntoIterator<Item = (Field, Type<N>)>>(fields: I, tail: N) -> Self {
        Row::RowTy(fields.into_iter().collect(), Some(tail))
    }

    /// Known field types; empty for `RowVar` and `EmptyRow`
    pub fn field_types(&self) -> Option<&Object<Type<N>>> {
        match self {
            Row::RowTy(fields, _) => Some(fields),
            Row::RowVar(_) | Row::EmptyRow => None,
        }
    }

    /// Row variable, if any
    pub fn tail(&self) -> Option<&N> {
        match self {
            Row::RowTy(_, tail) => tail.as_ref(),
            Row::RowVar(v) => Some(v),
            Row::EmptyRow => None,
        }
    }

    /// See [`map_row_types`]
    pub fn map_types<F: FnMut(Type<N>) -> Type<N>>(self, f: F) -> Self {
        map_row_types(self, f)
    }
}

/// Pact types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Type<N> {
    /// Type variable
    TyVar(N),
    /// Primitive type
    TyPrim(PrimType),
    /// Function from the first type to the second
    TyFun(Box<Type<N>>, Box<Type<N>>),
    /// Object type
    TyRow(Row<N>),
    /// Homogeneous list
    TyList(Box<Type<N>>),
    /// Table of rows
    TyTable(Row<N>),
    /// Capability token
    TyCap,
    /// Type carrying one built-in constraint
    TCTyCon(BuiltinTC, Box<Type<N>>),
    /// Universal quantification
    TyForall(NonEmpty<N>, Box<Type<N>>),
}

impl<N> Type<N> {
    /// `integer`
    pub const INTEGER: Type<N> = Type::TyPrim(PrimType::Integer);
    /// `decimal`
    pub const DECIMAL: Type<N> = Type::TyPrim(PrimType::Decimal);
    /// `time`
    pub const TIME: Type<N> = Type::TyPrim(PrimType::Time);
    /// `bool`
    pub const BOOL: Type<N> = Type::TyPrim(PrimType::Bool);
    /// `string`
    pub const STRING: Type<N> = Type::TyPrim(PrimType::String);
    /// `unit`
    pub const UNIT: Type<N> = Type::TyPrim(PrimType::Unit);

    /// `arg -> ret`
    pub fn fun(arg: Type<N>, ret: Type<N>) -> Self {
        Type::TyFun(Box::new(arg), Box::new(ret))
    }

    /// Curried function `a1 -> a2 -> ... -> ret`; just `ret` when `args` is empty
    pub fn fun_n<I>(args: I, ret: Type<N>) -> Self
    where
        I: IntoIterator<Item = Type<N>>,
        I::IntoIter: DoubleEndedIterator,
    {
        args.into_iter().rev().fold(ret, |acc, arg| Type::fun(arg, acc))
    }

    /// `list t`
    pub fn list(elem: Type<N>) -> Self {
        Type::TyList(Box::new(elem))
    }

    /// Constrain `ty` with `tc`
    pub fn constrained(tc: BuiltinTC, ty: Type<N>) -> Self {
        Type::TCTyCon(tc, Box::new(ty))
    }

    /// Quantify `body` over `vars`, which must be non-empty and distinct
    pub fn forall(vars: Vec<N>, body: Type<N>) -> Result<Self, TypeError>
    where
        N: PartialEq + std::fmt::Display,
    {
        for (i, v) in vars.iter().enumerate() {
            if vars[..i].contains(v) {
                return Err(TypeError::DuplicateBinder { var: v.to_string() });
            }
        }
        let vars = NonEmpty::from_vec(vars).map_err(|_| TypeError::EmptyForall)?;
        Ok(Type::TyForall(vars, Box::new(body)))
    }

    /// Whether this is a function type
    pub fn is_function(&self) -> bool {
        matches!(self, Type::TyFun(..))
    }
}

/// Type of a literal
pub fn type_of_literal<N>(lit: &Literal) -> Type<N> {
    let prim = match lit {
        Literal::LString(_) => PrimType::String,
        Literal::LInteger(_) => PrimType::Integer,
        Literal::LDecimal(_) => PrimType::Decimal,
        Literal::LBool(_) => PrimType::Bool,
        Literal::LTime(_) => PrimType::Time,
        Literal::LUnit => PrimType::Unit,
    };
    Type::TyPrim(prim)
}

/// Flatten a right-nested function type into its arguments and final result.
///
/// `a -> (b -> c)` gives `([a, b], c)`. Returns `None` for non-functions.
pub fn decompose_function<N: Clone>(ty: &Type<N>) -> Option<(Vec<Type<N>>, Type<N>)> {
    let Type::TyFun(..) = ty else {
        return None;
    };
    let mut args = Vec::new();
    let mut current = ty;
    while let Type::TyFun(arg, ret) = current {
        args.push((**arg).clone());
        current = ret;
    }
    Some((args, current.clone()))
}

/// Apply `f` to every field type of `row`. Labels, the row variable and the
/// `RowVar`/`EmptyRow` forms are left unchanged.
pub fn map_row_types<N, F: FnMut(Type<N>) -> Type<N>>(row: Row<N>, f: F) -> Row<N> {
    match row {
        Row::RowTy(fields, tail) => Row::RowTy(fields.map_values(f), tail),
        other => other,
    }
}

/// Fallible [`map_row_types`]
pub fn try_map_row_types<N, E, F>(row: Row<N>, f: F) -> Result<Row<N>, E>
where
    F: FnMut(Type<N>) -> Result<Type<N>, E>,
{
    match row {
        Row::RowTy(fields, tail) => Ok(Row::RowTy(fields.try_map_values(f)?, tail)),
        other => Ok(other),
    }
}
