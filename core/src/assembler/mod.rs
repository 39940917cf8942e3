//! Two-pass assembler from source text to a [`Program`].
//!
//! Pass 1 walks the source line by line, emitting opcode and operand cells,
//! defining labels and data strings, and recording every label operand as a
//! pending reference with a placeholder cell. Pass 2 patches each pending
//! reference with the label's code index.
//!
//! # Syntax
//!
//! ```text
//! ; comment
//! data greeting "hello\n"
//! @main:
//!     cil 3, 0
//! .loop:
//!     ofv 0
//!     dec 0
//!     cmpz 0
//!     jgt .loop        ; same as @main.loop
//!     ods greeting
//! ```
//!
//! Assembly stops at the first error; no partial program is returned.

mod assembler;
mod error;
mod labels;
mod tokenizer;


pub use error::{AssemblyError, AssemblyErrorKind};

use crate::api::AssemblerOptions;
use crate::vm::Program;

/// Assembles `source` into a program.
///
/// `source_name` is only used in error messages.
pub fn assemble(
    source: &str,
    source_name: &str,
    options: &AssemblerOptions,
) -> Result<Program, AssemblyError> {
    assembler::Assembler::new(source_name, options).assemble(source)
}
