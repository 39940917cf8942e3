mod cases;

use regvm::{AssemblerOptions, AssemblyErrorKind, Engine, EngineOptions, Error, assemble};

fn assembly_error(source: &str) -> Error {
    let engine = Engine::new(EngineOptions::default());
    engine.assemble(source, "test.asm").unwrap_err()
}

fn code_of(error: &Error) -> Option<&str> {
    match error {
        Error::Assembly { diagnostics, .. } => diagnostics[0].code.as_deref(),
        _ => None,
    }
}

#[test]
fn assembly_failure_prevents_execution() {
    let run = cases::run("data s \"ran\"\nods s\nfrob", "");
    assert!(matches!(run.result, Err(Error::Assembly { .. })));
    pretty_assertions::assert_eq!(run.output, "");
}

#[test]
fn undefined_label_names_label_and_line() {
    let err = assemble("noop\njmp @missing\n", "prog.asm", &AssemblerOptions::default())
        .unwrap_err();
    pretty_assertions::assert_eq!(err.to_string(), "prog.asm.2: unknown label '@missing'");

    let rendered = regvm::render_error_to_string_no_color(&assembly_error("noop\njmp @missing\n"));
    assert!(rendered.contains("unknown label '@missing'"));
    assert!(rendered.contains("jmp @missing"));
}

#[test]
fn error_codes() {
    let cases = [
        ("frob", "A001"),
        ("cil 1.5 0", "A002"),
        ("cfl x 0", "A003"),
        ("ofv x", "A004"),
        ("ofv 16", "A005"),
        ("cil 1", "A006"),
        ("onl 1", "A007"),
        ("data s \"open", "A008"),
        ("data s \"\\x\"", "A009"),
        ("data", "A010"),
        ("@a:\n@a:", "A011"),
        ("ods nothing", "A012"),
        (".x:", "A013"),
        ("jmp @nowhere", "A014"),
    ];
    for (source, code) in cases {
        pretty_assertions::assert_eq!(code_of(&assembly_error(source)), Some(code), "{}", source);
    }
}

#[test]
fn missing_entry_point() {
    let engine = Engine::new(EngineOptions {
        entry_point: Some("@main".to_string()),
        ..Default::default()
    });
    let err = engine.assemble("noop", "test.asm").unwrap_err();
    assert_eq!(code_of(&err), Some("A015"));
    pretty_assertions::assert_eq!(err.to_string(), "test.asm: entry point '@main' is not defined");
}

#[test]
fn register_count_is_configurable() {
    let options = AssemblerOptions {
        num_registers: 2,
        ..Default::default()
    };
    let err = assemble("mov 0 2", "test.asm", &options).unwrap_err();
    assert_eq!(
        err.kind,
        AssemblyErrorKind::RegisterOutOfRange {
            index: 2,
            num_registers: 2
        }
    );
}

#[test]
fn rendered_span_after_non_ascii_data() {
    let err = assembly_error("data greeting \"héllo wörld…\"\nods greeting\nhalt now");
    let rendered = regvm::render_error_to_string_no_color(&err);
    assert!(rendered.contains("expected newline but found 'now'"));
    assert!(rendered.contains("3 │ halt now"), "{}", rendered);
}
