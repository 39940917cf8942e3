//! Arithmetic on register values.

use super::{FaultKind, Opcode, Value};

/// Apply a two-register arithmetic opcode as `lhs OP rhs`.
///
/// `lhs` is the accumulator (the destination register's current value).
/// Integers use wrapping arithmetic; division and remainder by zero fault.
/// Floats follow IEEE 754 semantics. Mixed operands are a type mismatch.
pub(super) fn binary(op: Opcode, lhs: Value, rhs: Value) -> Result<Value, FaultKind> {
    if op == Opcode::Mod {
        return match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => binary_int(op, a, b).map(Value::Int),
            (Value::Int(_), other) | (other, _) => Err(FaultKind::NotAnInteger {
                op: op.mnemonic(),
                found: other.kind(),
            }),
        };
    }

    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => binary_int(op, a, b).map(Value::Int),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(binary_float(op, a, b))),
        _ => Err(FaultKind::TypeMismatch {
            op: op.mnemonic(),
            left: lhs.kind(),
            right: rhs.kind(),
        }),
    }
}

fn binary_int(op: Opcode, left: i64, right: i64) -> Result<i64, FaultKind> {
    match op {
        Opcode::Add => Ok(left.wrapping_add(right)),
        Opcode::Sub => Ok(left.wrapping_sub(right)),
        Opcode::Mul => Ok(left.wrapping_mul(right)),
        Opcode::Div | Opcode::Mod if right == 0 => Err(FaultKind::DivisionByZero),
        // wrapping_* handles i64::MIN / -1
        Opcode::Div => Ok(left.wrapping_div(right)),
        Opcode::Mod => Ok(left.wrapping_rem(right)),
        _ => unreachable!("{} is not an arithmetic opcode", op),
    }
}

fn binary_float(op: Opcode, left: f64, right: f64) -> f64 {
    match op {
        Opcode::Add => left + right,
        Opcode::Sub => left - right,
        Opcode::Mul => left * right,
        Opcode::Div => left / right,
        _ => unreachable!("{} is not a float opcode", op),
    }
}

/// Add `delta` (±1) to a value in its own numeric type.
pub(super) fn offset(op: Opcode, value: Value, delta: i8) -> Result<Value, FaultKind> {
    match value {
        Value::Int(i) => Ok(Value::Int(i.wrapping_add(delta as i64))),
        Value::Float(f) => Ok(Value::Float(f + delta as f64)),
        Value::Op(_) => Err(FaultKind::TypeMismatch {
            op: op.mnemonic(),
            left: value.kind(),
            right: value.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::ValueKind;

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(binary(Opcode::Add, Value::Int(2), Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(binary(Opcode::Sub, Value::Int(10), Value::Int(4)).unwrap(), Value::Int(6));
        assert_eq!(binary(Opcode::Mul, Value::Int(-2), Value::Int(5)).unwrap(), Value::Int(-10));
        assert_eq!(binary(Opcode::Div, Value::Int(7), Value::Int(2)).unwrap(), Value::Int(3));
        assert_eq!(binary(Opcode::Mod, Value::Int(7), Value::Int(3)).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_int_wrapping_overflow() {
        assert_eq!(
            binary(Opcode::Add, Value::Int(i64::MAX), Value::Int(1)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(
            binary(Opcode::Div, Value::Int(i64::MIN), Value::Int(-1)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(offset(Opcode::Inc, Value::Int(i64::MAX), 1).unwrap(), Value::Int(i64::MIN));
    }

    #[test]
    fn test_int_division_by_zero() {
        assert!(matches!(
            binary(Opcode::Div, Value::Int(1), Value::Int(0)),
            Err(FaultKind::DivisionByZero)
        ));
        assert!(matches!(
            binary(Opcode::Mod, Value::Int(1), Value::Int(0)),
            Err(FaultKind::DivisionByZero)
        ));
    }

    #[test]
    fn test_float_arithmetic() {
        assert_eq!(
            binary(Opcode::Div, Value::Float(10.0), Value::Float(4.0)).unwrap(),
            Value::Float(2.5)
        );
        // Float division by zero produces infinity (IEEE 754)
        match binary(Opcode::Div, Value::Float(1.0), Value::Float(0.0)).unwrap() {
            Value::Float(f) => assert!(f.is_infinite() && f.is_sign_positive()),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_operands() {
        assert!(matches!(
            binary(Opcode::Add, Value::Int(1), Value::Float(1.0)),
            Err(FaultKind::TypeMismatch {
                left: ValueKind::Int,
                right: ValueKind::Float,
                ..
            })
        ));
    }

    #[test]
    fn test_mod_requires_integers() {
        assert!(matches!(
            binary(Opcode::Mod, Value::Float(4.0), Value::Float(2.0)),
            Err(FaultKind::NotAnInteger {
                found: ValueKind::Float,
                ..
            })
        ));
        assert!(matches!(
            binary(Opcode::Mod, Value::Int(4), Value::Float(2.0)),
            Err(FaultKind::NotAnInteger {
                found: ValueKind::Float,
                ..
            })
        ));
    }

    #[test]
    fn test_offset_keeps_type() {
        assert_eq!(offset(Opcode::Inc, Value::Float(1.5), 1).unwrap(), Value::Float(2.5));
        assert_eq!(offset(Opcode::Dec, Value::Int(0), -1).unwrap(), Value::Int(-1));
        assert!(offset(Opcode::Inc, Value::Op(Opcode::Halt), 1).is_err());
    }
}
