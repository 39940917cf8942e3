//! The regvm engine.

use std::io::{BufRead, Write};

use super::{EngineOptions, Error};
use crate::assembler;
use crate::vm::{Interpreter, Program};

/// Assembles and runs programs with one shared configuration.
///
/// # Example
///
/// ```
/// use regvm_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default());
/// let program = engine.assemble("cil 5, 0\nofv 0\nonl\n", "five.asm").unwrap();
///
/// let mut output = Vec::new();
/// engine.run(&program, std::io::empty(), &mut output).unwrap();
/// assert_eq!(output, b"5 \n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Assemble `source` into a program.
    ///
    /// On failure the returned [`Error::Assembly`] carries the source text
    /// so it can be rendered with the offending line underneath.
    pub fn assemble(&self, source: &str, source_name: &str) -> Result<Program, Error> {
        assembler::assemble(source, source_name, &self.options.assembler_options())
            .map_err(|err| Error::assembly(&err, source))
    }

    /// Create an interpreter for single-stepping `program`.
    pub fn interpreter<'p, R: BufRead, W: Write>(
        &self,
        program: &'p Program,
        input: R,
        output: W,
    ) -> Interpreter<'p, R, W> {
        Interpreter::new(program, &self.options.execution_options(), input, output)
    }

    /// Run `program` to completion.
    pub fn run<R: BufRead, W: Write>(
        &self,
        program: &Program,
        input: R,
        output: W,
    ) -> Result<(), Error> {
        self.interpreter(program, input, output).run()?;
        Ok(())
    }
}
