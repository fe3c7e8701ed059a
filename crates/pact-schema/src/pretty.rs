//! Display forms used in diagnostics

use crate::typeclass::{BuiltinTC, Instance, Pred};
use crate::types::{NonEmpty, PrimType, Row, Type};
use std::fmt;

impl fmt::Display for PrimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for BuiltinTC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinTC::Eq => write!(f, "Eq"),
            BuiltinTC::Ord => write!(f, "Ord"),
            BuiltinTC::Show => write!(f, "Show"),
            BuiltinTC::Add => write!(f, "Add"),
            BuiltinTC::Num => write!(f, "Num"),
            BuiltinTC::WithoutField(field) => write!(f, "WithoutField({})", field),
        }
    }
}

impl<N: fmt::Display> fmt::Display for Pred<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.class, self.ty)
    }
}

impl<N: fmt::Display> fmt::Display for Instance<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pred) in self.context.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pred)?;
        }
        if !self.context.is_empty() {
            write!(f, " => ")?;
        }
        write!(f, "{}", self.head)
    }
}

impl<T: fmt::Display> fmt::Display for NonEmpty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Renders the braces contents of a row, without the braces
fn row_body<N: fmt::Display>(row: &Row<N>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match row {
        Row::EmptyRow => Ok(()),
        Row::RowVar(v) => write!(f, "{}", v),
        Row::RowTy(fields, tail) => {
            for (i, (label, ty)) in fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}:{}", label, ty)?;
            }
            match tail {
                Some(v) if fields.is_empty() => write!(f, "| {}", v),
                Some(v) => write!(f, " | {}", v),
                None => Ok(()),
            }
        }
    }
}

impl<N: fmt::Display> fmt::Display for Row<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::RowVar(v) => write!(f, "{}", v),
            _ => {
                write!(f, "{{")?;
                row_body(self, f)?;
                write!(f, "}}")
            }
        }
    }
}

impl<N> Type<N> {
    /// Renders without parentheses as a list element
    fn is_atomic(&self) -> bool {
        matches!(self, Type::TyVar(_) | Type::TyPrim(_) | Type::TyCap | Type::TyRow(_))
    }
}

impl<N: fmt::Display> fmt::Display for Type<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::TyVar(v) => write!(f, "{}", v),
            Type::TyPrim(p) => write!(f, "{}", p),
            Type::TyFun(arg, ret) => match **arg {
                Type::TyFun(..) | Type::TyForall(..) => write!(f, "({}) -> {}", arg, ret),
                _ => write!(f, "{} -> {}", arg, ret),
            },
            Type::TyRow(row) => write!(f, "{}", row),
            Type::TyList(elem) if elem.is_atomic() => write!(f, "list {}", elem),
            Type::TyList(elem) => write!(f, "list ({})", elem),
            Type::TyTable(row) => {
                write!(f, "table{{")?;
                row_body(row, f)?;
                write!(f, "}}")
            }
            Type::TyCap => write!(f, "capability"),
            Type::TCTyCon(tc, ty) => write!(f, "{}({})", tc, ty),
            Type::TyForall(vars, body) => {
                write!(f, "∀")?;
                for v in vars.iter() {
                    write!(f, "({}:TYPE)", v)?;
                }
                write!(f, ".{}", body)
            }
        }
    }
}
