#![allow(dead_code, unused_macros)]

use once_cell::sync::Lazy;
use regvm::{Engine, EngineOptions, Error};

pub struct Run {
    pub result: Result<(), Error>,
    pub output: String,
}

/// Assembles and runs `source` with default options, feeding it `input`.
pub fn run(source: &str, input: &str) -> Run {
    run_with(EngineOptions::default(), source, input)
}

pub fn run_with(options: EngineOptions, source: &str, input: &str) -> Run {
    let engine = Engine::new(options);
    let program = match engine.assemble(source, "test.asm") {
        Ok(program) => program,
        Err(err) => {
            return Run {
                result: Err(err),
                output: String::new(),
            };
        }
    };
    let mut output = Vec::new();
    let result = engine.run(&program, input.as_bytes(), &mut output);
    Run {
        result,
        output: String::from_utf8(output).expect("program output is UTF-8"),
    }
}

/// Defines a test that runs a program and checks its output.
///
/// ```ignore
/// program_case!(
///     print_five,
///     source: "cil 5 0\nofv 0",
///     input: "",          // optional
///     output: "5 ",
/// );
/// ```
macro_rules! program_case {
    ($name:ident, source: $source:expr, $(input: $input:expr,)? output: $output:expr $(,)?) => {
        #[test]
        fn $name() {
            #[allow(unused_variables)]
            let input = "";
            $(let input = $input;)?
            let run = $crate::cases::run($source, input);
            if let Err(err) = &run.result {
                panic!("program failed: {}", err);
            }
            pretty_assertions::assert_eq!(run.output, $output);
        }
    };
}

/// Defines a test that runs a program expected to fail.
macro_rules! failing_case {
    ($name:ident, source: $source:expr, error: $error:pat, output: $output:expr $(,)?) => {
        #[test]
        fn $name() {
            let run = $crate::cases::run($source, "");
            match &run.result {
                Err($error) => {}
                other => panic!("unexpected result: {:?}", other),
            }
            pretty_assertions::assert_eq!(run.output, $output);
        }
    };
}

pub struct SampleProgram {
    pub name: &'static str,
    pub source: &'static str,
    pub input: &'static str,
    pub output: &'static str,
}

pub static SAMPLE_PROGRAMS: Lazy<Vec<SampleProgram>> = Lazy::new(|| {
    vec![
        SampleProgram {
            name: "factorial_loop",
            source: "\
@main:
    cil 5 0         ; n
    cil 1 1         ; acc
.loop:
    cmpz 0
    jeq .done
    mul 0 1
    dec 0
    jmp .loop
.done:
    ofv 1
    onl
",
            input: "",
            output: "120 \n",
        },
        SampleProgram {
            name: "fibonacci",
            source: "\
    cil 0 0         ; a
    cil 1 1         ; b
    cil 10 2        ; count
@loop:
    ofv 0
    mov 1 3
    add 0 3         ; t = b + a
    mov 1 0
    mov 3 1
    dec 2
    cmpz 2
    jgt @loop
    onl
",
            input: "",
            output: "0 1 1 2 3 5 8 13 21 34 \n",
        },
        SampleProgram {
            name: "sum_until_bad_input",
            source: "\
    cil 0 1
@read:
    iiv 0
    ipf 2
    cmpz 2
    jgt @done
    add 0 1
    jmp @read
@done:
    ofv 1
    onl
",
            input: "1\n2\n 3 ignored\n",
            output: "6 \n",
        },
    ]
});
