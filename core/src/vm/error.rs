//! Runtime faults.
//!
//! Every fault is fatal: the interpreter stops at the faulting instruction
//! and reports its program-counter index. Output written before the fault
//! is left as is.
//!
//! # Fault Categories
//!
//! - **Runtime faults**: type mismatches, bad operands, stack underflow,
//!   division by zero and I/O failures.
//!
//! - **Resource exceeded**: the operand or call stack grew past
//!   `ExecutionOptions::max_stack_depth`.

use thiserror::Error;

use super::ValueKind;

/// A fatal runtime condition, tagged with the faulting program counter.
#[derive(Debug, Error)]
#[error("fault at {pc}: {kind}")]
pub struct Fault {
    pub kind: FaultKind,
    pub pc: usize,
}

#[derive(Debug, Error)]
pub enum FaultKind {
    #[error("tried to execute a non-instruction ({found})")]
    NotAnInstruction { found: ValueKind },

    #[error("program counter out of bounds (code length {len})")]
    PcOutOfBounds { len: usize },

    #[error("type mismatch in {op}: {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("{op} expects Int operands, found {found}")]
    NotAnInteger { op: &'static str, found: ValueKind },

    #[error("malformed operand {index} of {op}")]
    BadOperand { op: &'static str, index: usize },

    #[error("register {index} out of range [0, {num_registers})")]
    RegisterOutOfRange { index: i64, num_registers: usize },

    #[error("data index {index} out of range (pool size {len})")]
    DataOutOfRange { index: i64, len: usize },

    #[error("pop from an empty stack")]
    StackUnderflow,

    #[error("ret with an empty call stack")]
    CallStackUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("stack overflow: depth exceeds maximum of {max_depth}")]
    StackOverflow { max_depth: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FaultKind {
    /// Whether this fault is a resource limit rather than a program error.
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, FaultKind::StackOverflow { .. })
    }
}
