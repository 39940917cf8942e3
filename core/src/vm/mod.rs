//! The register machine: values, programs and the interpreter loop.

mod error;
mod instruction_set;
mod operators;
mod program;
mod runtime;
mod stack;
mod value;


pub use error::{Fault, FaultKind};
pub use instruction_set::{Opcode, OperandKind};
pub use program::{Listing, Program};
pub use runtime::{Interpreter, Step};
pub use stack::{Stack, StackFull};
pub use value::{Value, ValueKind};
