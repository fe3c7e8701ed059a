//! Generic traversal over types
//!
//! One-layer maps are the primitive; `transform` and `universe` are built on
//! them. `TyVar`, `TyPrim` and `TyCap` have no children. `TCTyCon` is opaque:
//! its constrained type is not a child, so rewrites leave it alone unless the
//! caller matches on it explicitly. `TyForall` has its body as only child.

use crate::types::{map_row_types, try_map_row_types, Row, Type};
use std::collections::BTreeSet;

impl<N> Type<N> {
    /// Apply `f` to each immediate child
    pub fn map_children<F: FnMut(Type<N>) -> Type<N>>(self, mut f: F) -> Type<N> {
        match self {
            Type::TyFun(arg, ret) => {
                let arg = f(*arg);
                Type::fun(arg, f(*ret))
            }
            Type::TyRow(row) => Type::TyRow(map_row_types(row, f)),
            Type::TyList(elem) => Type::list(f(*elem)),
            Type::TyTable(row) => Type::TyTable(map_row_types(row, f)),
            Type::TyForall(vars, body) => Type::TyForall(vars, Box::new(f(*body))),
            leaf @ (Type::TyVar(_) | Type::TyPrim(_) | Type::TyCap | Type::TCTyCon(..)) => leaf,
        }
    }

    /// Fallible [`Type::map_children`]; stops at the first error
    pub fn try_map_children<E, F>(self, mut f: F) -> Result<Type<N>, E>
    where
        F: FnMut(Type<N>) -> Result<Type<N>, E>,
    {
        Ok(match self {
            Type::TyFun(arg, ret) => {
                let arg = f(*arg)?;
                Type::fun(arg, f(*ret)?)
            }
            Type::TyRow(row) => Type::TyRow(try_map_row_types(row, f)?),
            Type::TyList(elem) => Type::list(f(*elem)?),
            Type::TyTable(row) => Type::TyTable(try_map_row_types(row, f)?),
            Type::TyForall(vars, body) => Type::TyForall(vars, Box::new(f(*body)?)),
            leaf @ (Type::TyVar(_) | Type::TyPrim(_) | Type::TyCap | Type::TCTyCon(..)) => leaf,
        })
    }

    /// Bottom-up rewrite: children first, then `f` on the rebuilt node
    pub fn transform<F: FnMut(Type<N>) -> Type<N>>(self, mut f: F) -> Type<N> {
        self.transform_with(&mut f)
    }

    fn transform_with<F: FnMut(Type<N>) -> Type<N>>(self, f: &mut F) -> Type<N> {
        let rebuilt = self.map_children(|child| child.transform_with(&mut *f));
        f(rebuilt)
    }

    /// Immediate children, in the order `map_children` visits them
    pub fn children(&self) -> Vec<&Type<N>> {
        match self {
            Type::TyFun(arg, ret) => vec![&**arg, &**ret],
            Type::TyRow(row) | Type::TyTable(row) => row_children(row),
            Type::TyList(elem) => vec![&**elem],
            Type::TyForall(_, body) => vec![&**body],
            Type::TyVar(_) | Type::TyPrim(_) | Type::TyCap | Type::TCTyCon(..) => Vec::new(),
        }
    }

    /// Every reachable subterm, including `self`, in pre-order
    pub fn universe(&self) -> Vec<&Type<N>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(ty) = stack.pop() {
            out.push(ty);
            stack.extend(ty.children().into_iter().rev());
        }
        out
    }

    /// Type and row variables not bound by an enclosing forall.
    ///
    /// Unlike the generic traversal this looks inside `TCTyCon`.
    pub fn free_vars(&self) -> BTreeSet<&N>
    where
        N: Ord,
    {
        let mut free = BTreeSet::new();
        collect_free(self, &mut Vec::new(), &mut free);
        free
    }
}

fn row_children<N>(row: &Row<N>) -> Vec<&Type<N>> {
    match row {
        Row::RowTy(fields, _) => fields.values().collect(),
        Row::RowVar(_) | Row::EmptyRow => Vec::new(),
    }
}

fn collect_free<'a, N: Ord>(ty: &'a Type<N>, bound: &mut Vec<&'a N>, free: &mut BTreeSet<&'a N>) {
    match ty {
        Type::TyVar(v) => note_free(v, bound, free),
        Type::TyPrim(_) | Type::TyCap => {}
        Type::TyFun(arg, ret) => {
            collect_free(arg, bound, free);
            collect_free(ret, bound, free);
        }
        Type::TyRow(row) | Type::TyTable(row) => {
            if let Some(tail) = row.tail() {
                note_free(tail, bound, free);
            }
            for field in row_children(row) {
                collect_free(field, bound, free);
            }
        }
        Type::TyList(elem) | Type::TCTyCon(_, elem) => collect_free(elem, bound, free),
        Type::TyForall(vars, body) => {
            let depth = bound.len();
            bound.extend(vars.iter());
            collect_free(body, bound, free);
            bound.truncate(depth);
        }
    }
}

fn note_free<'a, N: Ord>(var: &'a N, bound: &[&'a N], free: &mut BTreeSet<&'a N>) {
    if !bound.contains(&var) {
        free.insert(var);
    }
}
