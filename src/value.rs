//! Host values
//!
//! The numeric (and a few non-numeric) values a host language hands to the
//! time core. Only `Int`, `Float` and `BigInt` convert to instants; the rest
//! exist so conversions can report a type mismatch.

use num_bigint::BigInt;
use std::fmt;

/// Runtime values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nil value
    Nil,

    /// Boolean value
    Bool(bool),

    /// Fixed-width integer value
    Int(i64),

    /// Float value
    Float(f64),

    /// Arbitrary-precision integer value
    BigInt(BigInt),

    /// String value
    String(String),
}

impl Value {
    /// Parse a command-line numeral: integers that overflow `i64` become
    /// big integers, anything with a fraction or exponent becomes a float.
    pub fn parse_numeral(s: &str) -> Option<Value> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Some(Value::Int(i));
        }
        if let Ok(b) = s.parse::<BigInt>() {
            return Some(Value::BigInt(b));
        }
        match s.parse::<f64>() {
            Ok(f) => Some(Value::Float(f)),
            Err(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}
