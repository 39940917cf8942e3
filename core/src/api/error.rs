//! Public error types for the regvm API.
//!
//! Internal errors ([`AssemblyError`], [`Fault`]) are converted to these
//! public types at API boundaries.

use core::fmt;

use crate::assembler::AssemblyError;
use crate::syntax::Span;
use crate::vm::Fault;

/// Public error type for all regvm operations.
#[derive(Debug)]
pub enum Error {
    /// The source failed to assemble.
    ///
    /// Keeps the source text so diagnostics can be rendered against it.
    Assembly {
        source_name: String,
        source: String,
        diagnostics: Vec<Diagnostic>,
    },

    /// The program faulted while running.
    Runtime { message: String, pc: usize },

    /// Resource limits exceeded (operand or call stack overflow).
    ResourceExceeded(String),
}

impl Error {
    /// Wraps an assembly error together with the source it refers to.
    pub fn assembly(err: &AssemblyError, source: &str) -> Self {
        Error::Assembly {
            source_name: err.source_name.clone(),
            source: source.to_string(),
            diagnostics: vec![err.to_diagnostic()],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Assembly {
                source_name,
                diagnostics,
                ..
            } => match diagnostics.as_slice() {
                [single] => write!(f, "{}: {}", source_name, single.message),
                _ => write!(
                    f,
                    "{}: assembly failed with {} error(s)",
                    source_name,
                    diagnostics.len()
                ),
            },
            Error::Runtime { message, pc } => write!(f, "Runtime error at {}: {}", pc, message),
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "A001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
///
/// Assembly only ever reports errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - assembly cannot succeed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Related information for a diagnostic (e.g., "first defined here").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<Fault> for Error {
    fn from(fault: Fault) -> Self {
        if fault.kind.is_resource_exceeded() {
            Error::ResourceExceeded(format!("{} (at {})", fault.kind, fault.pc))
        } else {
            Error::Runtime {
                message: fault.kind.to_string(),
                pc: fault.pc,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::AssemblyErrorKind;
    use crate::vm::FaultKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fault_conversion() {
        let err = Error::from(Fault {
            kind: FaultKind::CallStackUnderflow,
            pc: 7,
        });
        assert_eq!(err.to_string(), "Runtime error at 7: ret with an empty call stack");

        let err = Error::from(Fault {
            kind: FaultKind::StackOverflow { max_depth: 4 },
            pc: 2,
        });
        assert!(matches!(err, Error::ResourceExceeded(_)));
    }

    #[test]
    fn test_assembly_conversion_keeps_source() {
        let source = "bogus 1";
        let err = AssemblyError::new(
            AssemblyErrorKind::UnknownInstruction {
                name: "bogus".to_string(),
            },
            "prog.asm",
            1,
            Span::new(0, 5),
        );
        let Error::Assembly {
            source_name,
            source: kept,
            diagnostics,
        } = Error::assembly(&err, source)
        else {
            panic!("expected an assembly error");
        };
        assert_eq!(source_name, "prog.asm");
        assert_eq!(kept, source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unknown instruction 'bogus'");
        assert_eq!(diagnostics[0].code.as_deref(), Some("A001"));
    }
}
