//! Source literals
//!
//! The six literal forms the parser can produce. Their types are assigned by
//! `pact_schema::type_of_literal`.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// String literal
    LString(String),
    /// Arbitrary precision integer
    LInteger(BigInt),
    /// Arbitrary precision decimal
    LDecimal(BigDecimal),
    /// Boolean literal
    LBool(bool),
    /// UTC timestamp
    LTime(DateTime<Utc>),
    /// Unit literal
    LUnit,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::LString(s) => write!(f, "\"{}\"", s),
            Literal::LInteger(i) => write!(f, "{}", i),
            Literal::LDecimal(d) => write!(f, "{}", d),
            Literal::LBool(true) => write!(f, "true"),
            Literal::LBool(false) => write!(f, "false"),
            Literal::LTime(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%SZ")),
            Literal::LUnit => write!(f, "()"),
        }
    }
}
