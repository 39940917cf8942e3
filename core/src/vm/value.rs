use core::cmp::Ordering;
use core::fmt;

use super::Opcode;

/// A tagged machine cell.
///
/// The same representation is used for code words, inline operands and
/// register contents. There is deliberately no `Default`: every cell is
/// created with a known tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Op(Opcode),
}

/// The tag of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Op,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "Int"),
            ValueKind::Float => write!(f, "Float"),
            ValueKind::Op => write!(f, "Op"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Op(_) => ValueKind::Op,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<Opcode> {
        match *self {
            Value::Op(op) => Some(op),
            _ => None,
        }
    }

    /// Three-way comparison of two values of the same numeric type.
    ///
    /// Returns `Err` with both tags when the operands are not comparable,
    /// and `Ok(None)` when a float comparison is unordered (NaN).
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, (ValueKind, ValueKind)> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
            (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
            _ => Err((self.kind(), other.kind())),
        }
    }

    /// The zero of this value's numeric type, if it has one.
    pub fn zero_like(&self) -> Option<Value> {
        match self {
            Value::Int(_) => Some(Value::Int(0)),
            Value::Float(_) => Some(Value::Float(0.0)),
            Value::Op(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Opcode> for Value {
    fn from(op: Opcode) -> Self {
        Value::Op(op)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Op(op) => write!(f, "{}", op),
        }
    }
}
