//! Binary Operator Codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator joining two columns inside a specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `=` or any unrecognized symbol: leaves the accumulator unchanged
    Identity,
}

impl Operator {
    /// Symbols recognized by the expression scanner
    pub const SYMBOLS: [char; 4] = ['+', '-', '*', '='];

    /// Map an operator symbol to its code.
    ///
    /// `=` and anything unrecognized fall back to [`Operator::Identity`],
    /// which is a no-op rather than addition.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            '*' => Operator::Multiply,
            _ => Operator::Identity,
        }
    }

    /// Get the textual symbol
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Identity => '=',
        }
    }

    /// Get the numeric operator code (0 = add, 1 = subtract, 2 = multiply, 3 = identity)
    pub fn code(&self) -> u8 {
        match self {
            Operator::Add => 0,
            Operator::Subtract => 1,
            Operator::Multiply => 2,
            Operator::Identity => 3,
        }
    }

    /// Fold `value` into the running accumulator
    #[inline]
    pub fn apply(&self, acc: f64, value: f64) -> f64 {
        match self {
            Operator::Add => acc + value,
            Operator::Subtract => acc - value,
            Operator::Multiply => acc * value,
            Operator::Identity => acc,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(Operator::from_symbol('+'), Operator::Add);
        assert_eq!(Operator::from_symbol('-'), Operator::Subtract);
        assert_eq!(Operator::from_symbol('*'), Operator::Multiply);
        assert_eq!(Operator::from_symbol('='), Operator::Identity);
    }

    #[test]
    fn test_unknown_symbol_is_identity() {
        assert_eq!(Operator::from_symbol('/'), Operator::Identity);
        assert_eq!(Operator::from_symbol('^'), Operator::Identity);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(Operator::Identity.apply(2.0, 3.0), 2.0);
    }

    #[test]
    fn test_identity_keeps_nan_out() {
        // the right-hand side is discarded entirely
        assert_eq!(Operator::Identity.apply(1.5, f64::NAN), 1.5);
    }

    #[test]
    fn test_symbol_roundtrip() {
        for symbol in Operator::SYMBOLS {
            assert_eq!(Operator::from_symbol(symbol).symbol(), symbol);
        }
    }
}
