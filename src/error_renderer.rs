//! Error rendering using ariadne
//!
//! Assembly errors are rendered with the offending source line and an
//! underline on the token; runtime faults have no source location and are
//! printed as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use regvm::{Engine, EngineOptions, render_error};
///
/// let engine = Engine::new(EngineOptions::default());
/// if let Err(e) = engine.assemble("frob 1", "bad.asm") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write, use_color: bool) -> std::io::Result<()> {
    render_error_to_writer(error, writer, use_color)
}

/// Render an error to a String (useful for tests, logs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// # Example
/// ```
/// use regvm::{Engine, EngineOptions, render_error_to_string_no_color};
///
/// let engine = Engine::new(EngineOptions::default());
/// let err = engine.assemble("noop\njmp @nowhere", "demo.asm").unwrap_err();
///
/// let text = render_error_to_string_no_color(&err);
/// assert!(text.contains("unknown label '@nowhere'"));
/// assert!(text.contains("jmp @nowhere"));
/// ```
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Assembly {
            source_name,
            source,
            diagnostics,
        } => render_diagnostics(source_name, source, diagnostics, writer, use_color),
        Error::Runtime { .. } | Error::ResourceExceeded(_) => writeln!(writer, "{}", error),
    }
}

fn render_diagnostics(
    source_name: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
        };

        let mut report = Report::build(kind, (source_name, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(
                ariadne::Config::default()
                    .with_color(use_color)
                    .with_index_type(IndexType::Byte),
            );

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((source_name, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(color),
        );

        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((source_name, related.span.0.clone()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        for help_msg in &diag.help {
            report = report.with_help(help_msg);
        }

        report
            .finish()
            .write((source_name, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineOptions};

    fn assembly_error(source: &str) -> Error {
        let engine = Engine::new(EngineOptions::default());
        engine.assemble(source, "test.asm").unwrap_err()
    }

    #[test]
    fn test_render_unknown_instruction() {
        let output = render_error_to_string_no_color(&assembly_error("noop\nfrob 1"));

        assert!(output.contains("Error"));
        assert!(output.contains("unknown instruction 'frob'"));
        assert!(output.contains("frob 1"));
        assert!(output.contains("test.asm"));
    }

    #[test]
    fn test_render_duplicate_label_shows_first_definition() {
        let output = render_error_to_string_no_color(&assembly_error("@a:\nnoop\n@a:"));

        assert!(output.contains("label '@a' is already defined"));
        assert!(output.contains("first defined here, at line 1"));
    }

    #[test]
    fn test_render_includes_help_and_code() {
        let output = render_error_to_string_no_color(&assembly_error("cil x 0"));

        assert!(output.contains("A002"));
        assert!(output.contains("Integers are written in decimal"));
    }

    #[test]
    fn test_render_after_multibyte_text() {
        let source = "data s \"ééé…\"\nnoop\nfrob 1";
        let output = render_error_to_string_no_color(&assembly_error(source));

        assert!(output.contains("unknown instruction 'frob'"));
        assert!(output.contains("3 │ frob 1"), "{}", output);
    }

    #[test]
    fn test_render_runtime_error_is_one_line() {
        let error = Error::Runtime {
            message: "division by zero".to_string(),
            pc: 4,
        };
        assert_eq!(
            render_error_to_string_no_color(&error),
            "Runtime error at 4: division by zero\n"
        );
    }

    #[test]
    fn test_render_to_string_captures_output() {
        let output = render_error_to_string(&assembly_error("halt extra"));

        assert!(!output.is_empty());
        assert!(output.lines().count() > 1);
    }
}
