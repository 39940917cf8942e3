//! Public API for regvm.
//!
//! # Example
//!
//! ```
//! use regvm_core::api::{Engine, EngineOptions};
//!
//! let options = EngineOptions {
//!     entry_point: Some("@main".to_string()),
//!     ..Default::default()
//! };
//! let engine = Engine::new(options);
//!
//! let source = "
//! data hello \"hi\\n\"
//! @main:
//!     ods hello
//! ";
//! let program = engine.assemble(source, "hello.asm").unwrap();
//!
//! let mut output = Vec::new();
//! engine.run(&program, std::io::empty(), &mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "hi\n");
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::Engine;
pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use options::{AssemblerOptions, EngineOptions, ExecutionOptions};
