//! Assembly errors.
//!
//! Assembly is all-or-nothing: the first error aborts it and no program is
//! produced. Every error carries the source name, the 1-based line number
//! and the byte span of the offending token so it can be rendered with the
//! source underneath.

use thiserror::Error;

use crate::api::{Diagnostic, RelatedInfo, Severity};
use crate::syntax::Span;
use crate::vm::OperandKind;

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyError {
    pub kind: AssemblyErrorKind,
    pub source_name: String,
    /// 1-based line number; 0 for errors not tied to a line.
    pub line: usize,
    pub span: Span,
}

/// Specific kinds of assembly errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyErrorKind {
    #[error("unknown instruction '{name}'")]
    UnknownInstruction { name: String },

    #[error("invalid integer literal '{text}'")]
    InvalidInteger { text: String },

    #[error("invalid float literal '{text}'")]
    InvalidFloat { text: String },

    #[error("invalid register '{text}'")]
    InvalidRegister { text: String },

    #[error("invalid register {index}, should be within range [0, {num_registers})")]
    RegisterOutOfRange { index: i64, num_registers: usize },

    #[error("'{op}' expects {expected}")]
    MissingOperand {
        op: &'static str,
        expected: OperandKind,
    },

    #[error("expected newline but found '{found}'")]
    UnexpectedToken { found: String },

    #[error("expected a quoted string")]
    MissingString,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence '{seq}'")]
    InvalidEscape { seq: String },

    #[error("'data' expects a name")]
    MissingDataName,

    #[error("empty label name")]
    EmptyLabel,

    #[error("label '{name}' is already defined")]
    DuplicateLabel {
        name: String,
        first_line: usize,
        first_span: Span,
    },

    #[error("data '{name}' is already defined")]
    DuplicateData {
        name: String,
        first_line: usize,
        first_span: Span,
    },

    #[error("unknown data '{name}'")]
    UnknownData { name: String },

    #[error("sublabel '{name}' has no enclosing label")]
    SublabelWithoutLabel { name: String },

    #[error("unknown label '{name}'")]
    UnknownLabel { name: String },

    #[error("entry point '{name}' is not defined")]
    MissingEntryPoint { name: String },
}

impl AssemblyError {
    pub fn new(kind: AssemblyErrorKind, source_name: &str, line: usize, span: Span) -> Self {
        Self {
            kind,
            source_name: source_name.to_string(),
            line,
            span,
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        use AssemblyErrorKind::*;

        let (code, help): (&str, Option<String>) = match &self.kind {
            UnknownInstruction { .. } => ("A001", None),
            InvalidInteger { .. } => ("A002", Some("Integers are written in decimal, e.g. -42".to_string())),
            InvalidFloat { .. } => ("A003", Some("Floats are written like 3.14 or 1e-3".to_string())),
            InvalidRegister { .. } => ("A004", Some("Registers are plain indices, e.g. 0".to_string())),
            RegisterOutOfRange { .. } => ("A005", None),
            MissingOperand { .. } => ("A006", None),
            UnexpectedToken { .. } => ("A007", Some("Comments start with ';'".to_string())),
            MissingString | UnterminatedString => ("A008", None),
            InvalidEscape { .. } => (
                "A009",
                Some("Supported escapes are \\n, \\t, \\\\ and \\\"".to_string()),
            ),
            MissingDataName | EmptyLabel => ("A010", None),
            DuplicateLabel { .. } | DuplicateData { .. } => ("A011", None),
            UnknownData { .. } => ("A012", Some("Data must be declared before it is used".to_string())),
            SublabelWithoutLabel { .. } => (
                "A013",
                Some("Define a top-level label before the first sublabel".to_string()),
            ),
            UnknownLabel { .. } => ("A014", None),
            MissingEntryPoint { name } => ("A015", Some(format!("Add a '{}:' label", name))),
        };

        let related = match &self.kind {
            DuplicateLabel {
                first_line,
                first_span,
                ..
            }
            | DuplicateData {
                first_line,
                first_span,
                ..
            } => vec![RelatedInfo {
                span: first_span.clone(),
                message: format!("first defined here, at line {}", first_line),
            }],
            _ => vec![],
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            related,
            help,
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.source_name, self.kind)
        } else {
            write!(f, "{}.{}: {}", self.source_name, self.line, self.kind)
        }
    }
}

impl std::error::Error for AssemblyError {}
