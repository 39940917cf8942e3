//! regvm - a small register-based bytecode virtual machine
//!
//! # Overview
//!
//! Programs are written in a line-oriented assembly language, assembled
//! into a flat buffer of tagged cells, and run by an interpreter with a
//! register file, an operand stack, a call stack and comparison flags.
//!
//! # Quick Start
//!
//! ```
//! use regvm::{Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default());
//! let source = "
//! @main:
//!     cil 3 0
//! .loop:
//!     ofv 0
//!     dec 0
//!     cmpz 0
//!     jgt .loop
//!     onl
//! ";
//! let program = engine.assemble(source, "countdown.asm").unwrap();
//!
//! let mut output = Vec::new();
//! engine.run(&program, std::io::empty(), &mut output).unwrap();
//! assert_eq!(output, b"3 2 1 \n");
//! ```

// Re-export public API from regvm_core
pub use regvm_core::api::{
    AssemblerOptions, Diagnostic, Engine, EngineOptions, Error, ExecutionOptions, RelatedInfo,
    Severity,
};

pub use regvm_core::assembler::{self, AssemblyError, AssemblyErrorKind, assemble};
pub use regvm_core::vm::{self, Fault, FaultKind, Interpreter, Opcode, Program, Step, Value};

pub mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
