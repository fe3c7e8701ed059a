//! Gas units
//!
//! Only the units themselves live here; charging policy belongs to the evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milligas per unit of gas
pub const MILLIGAS_PER_GAS: u64 = 1000;

/// Milli-gas, the base unit of gas measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilliGas(pub u64);

impl MilliGas {
    /// No gas
    pub const ZERO: MilliGas = MilliGas(0);

    /// Wrap a raw milligas amount
    pub fn new(value: u64) -> Self {
        MilliGas(value)
    }

    /// Raw milligas amount
    pub fn value(self) -> u64 {
        self.0
    }

    /// Add, returning `None` on overflow
    pub fn checked_add(self, other: MilliGas) -> Option<MilliGas> {
        self.0.checked_add(other.0).map(MilliGas)
    }

    /// Add, clamping at `u64::MAX`
    pub fn saturating_add(self, other: MilliGas) -> MilliGas {
        MilliGas(self.0.saturating_add(other.0))
    }

    /// Whole gas units, rounding any partial unit up
    pub fn to_gas(self) -> Gas {
        Gas(self.0.div_ceil(MILLIGAS_PER_GAS))
    }
}

impl fmt::Display for MilliGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} milligas", self.0)
    }
}

/// User-facing gas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gas(pub u64);

impl Gas {
    /// No gas
    pub const ZERO: Gas = Gas(0);

    /// Wrap a raw gas amount
    pub fn new(value: u64) -> Self {
        Gas(value)
    }

    /// Raw gas amount
    pub fn value(self) -> u64 {
        self.0
    }

    /// Add, returning `None` on overflow
    pub fn checked_add(self, other: Gas) -> Option<Gas> {
        self.0.checked_add(other.0).map(Gas)
    }

    /// Convert to milligas, returning `None` on overflow
    pub fn to_milligas(self) -> Option<MilliGas> {
        self.0.checked_mul(MILLIGAS_PER_GAS).map(MilliGas)
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Gas(3).to_milligas(), Some(MilliGas(3000)));
        assert_eq!(MilliGas(3000).to_gas(), Gas(3));
        assert_eq!(MilliGas(3001).to_gas(), Gas(4));
        assert_eq!(MilliGas::ZERO.to_gas(), Gas::ZERO);
        assert_eq!(Gas(u64::MAX).to_milligas(), None);
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Gas(1).checked_add(Gas(2)), Some(Gas(3)));
        assert_eq!(Gas(u64::MAX).checked_add(Gas(1)), None);
        assert_eq!(MilliGas(u64::MAX).checked_add(MilliGas(1)), None);
        assert_eq!(MilliGas(u64::MAX).saturating_add(MilliGas(1)), MilliGas(u64::MAX));
    }

    #[test]
    fn test_serde_is_bare_number() {
        assert_eq!(serde_json::to_string(&Gas(42)).unwrap(), "42");
        assert_eq!(serde_json::from_str::<MilliGas>("7").unwrap(), MilliGas(7));
    }
}
