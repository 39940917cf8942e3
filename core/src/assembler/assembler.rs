use tracing::{debug, trace};

use super::error::{AssemblyError, AssemblyErrorKind};
use super::labels::{DataPool, LabelTable, PendingRef};
use super::tokenizer::{Token, Tokens};
use crate::api::AssemblerOptions;
use crate::syntax::Span;
use crate::syntax::string_literal::{UnescapeError, parse_quoted};
use crate::vm::{Opcode, OperandKind, Program, Value};

const DATA_DIRECTIVE: &str = "data";
const LABEL_SUFFIX: char = ':';

/// Placeholder emitted for a label operand until pass 2 patches it.
const UNRESOLVED: Value = Value::Int(-1);

type LineResult<T> = Result<T, (AssemblyErrorKind, Span)>;

/// Two-pass assembler state for one source text.
pub(super) struct Assembler<'a> {
    source_name: &'a str,
    options: &'a AssemblerOptions,
    code: Vec<Value>,
    labels: LabelTable,
    data: DataPool,
    entry_point: Option<usize>,
}

impl<'a> Assembler<'a> {
    pub fn new(source_name: &'a str, options: &'a AssemblerOptions) -> Self {
        Self {
            source_name,
            options,
            code: Vec::new(),
            labels: LabelTable::new(),
            data: DataPool::new(),
            entry_point: None,
        }
    }

    pub fn assemble(mut self, source: &str) -> Result<Program, AssemblyError> {
        // Pass 1: emit code, collect labels, data and pending references.
        let mut base = 0;
        for (number, raw) in source.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_no = number + 1;
            self.assemble_line(line, base, line_no)
                .map_err(|(kind, span)| self.error(kind, line_no, span))?;
            base += raw.len() + 1;
        }
        self.code.push(Value::Op(Opcode::Halt));

        // Pass 2: backpatch label operands.
        for pending in self.labels.pending() {
            let target = self
                .labels
                .lookup(&pending.name)
                .ok_or_else(|| {
                    self.error(
                        AssemblyErrorKind::UnknownLabel {
                            name: pending.name.clone(),
                        },
                        pending.line,
                        pending.span.clone(),
                    )
                })?;
            self.code[pending.slot] = Value::Int(target as i64);
        }

        let entry_point = match (&self.options.entry_point, self.entry_point) {
            (None, _) => 0,
            (Some(_), Some(index)) => index,
            (Some(name), None) => {
                return Err(self.error(
                    AssemblyErrorKind::MissingEntryPoint { name: name.clone() },
                    0,
                    Span::new(0, 0),
                ));
            }
        };

        debug!(
            source = self.source_name,
            cells = self.code.len(),
            labels = self.labels.len(),
            entry_point,
            "assembled program"
        );
        Ok(Program::new(self.code, self.data.into_strings(), entry_point))
    }

    fn error(&self, kind: AssemblyErrorKind, line: usize, span: Span) -> AssemblyError {
        AssemblyError::new(kind, self.source_name, line, span)
    }

    fn assemble_line(&mut self, line: &str, base: usize, line_no: usize) -> LineResult<()> {
        let mut tokens = Tokens::new(line, base);
        let Some(first) = tokens.next() else {
            return Ok(());
        };
        if first.is_comment() {
            return Ok(());
        }

        if first.text == DATA_DIRECTIVE {
            self.data_directive(&mut tokens, line_no)?;
        } else if let Some(name) = first.text.strip_suffix(LABEL_SUFFIX) {
            self.label_definition(name, &first, line_no)?;
        } else {
            let op = Opcode::from_mnemonic(first.text).ok_or_else(|| {
                (
                    AssemblyErrorKind::UnknownInstruction {
                        name: first.text.to_string(),
                    },
                    first.span.clone(),
                )
            })?;
            self.instruction(op, &mut tokens, line_no)?;
        }
        expect_end(&mut tokens)
    }

    fn data_directive(&mut self, tokens: &mut Tokens<'_>, line_no: usize) -> LineResult<()> {
        let name = match tokens.next() {
            Some(token) if !token.is_comment() => token,
            _ => return Err((AssemblyErrorKind::MissingDataName, tokens.end_span())),
        };

        let (rest, rest_span) = tokens.remainder();
        let (text, consumed) = parse_quoted(rest).map_err(|err| {
            let start = rest_span.0.start;
            match err {
                UnescapeError::MissingQuote => (AssemblyErrorKind::MissingString, rest_span.clone()),
                UnescapeError::Unterminated => {
                    (AssemblyErrorKind::UnterminatedString, rest_span.clone())
                }
                UnescapeError::InvalidEscape { pos, seq } => {
                    let span = Span::new(start + pos, start + pos + seq.len());
                    (AssemblyErrorKind::InvalidEscape { seq }, span)
                }
            }
        })?;
        tokens.advance(consumed);

        trace!(name = name.text, len = text.len(), "data");
        self.data
            .insert(name.text, text, line_no, name.span.clone())
            .map_err(|kind| (kind, name.span.clone()))?;
        Ok(())
    }

    fn label_definition(&mut self, name: &str, token: &Token<'_>, line_no: usize) -> LineResult<()> {
        let index = self.code.len();
        let full = self
            .labels
            .define(name, index, line_no, token.span.clone())
            .map_err(|kind| (kind, token.span.clone()))?;
        trace!(label = %full, index, "label");
        if self.options.entry_point.as_deref() == Some(full.as_str()) {
            self.entry_point = Some(index);
        }
        Ok(())
    }

    fn instruction(&mut self, op: Opcode, tokens: &mut Tokens<'_>, line_no: usize) -> LineResult<()> {
        self.code.push(Value::Op(op));
        for &kind in op.operands() {
            let token = match tokens.next() {
                Some(token) if !token.is_comment() => token,
                _ => {
                    return Err((
                        AssemblyErrorKind::MissingOperand {
                            op: op.mnemonic(),
                            expected: kind,
                        },
                        tokens.end_span(),
                    ));
                }
            };
            let value = self
                .operand(kind, &token, line_no)
                .map_err(|kind| (kind, token.span.clone()))?;
            self.code.push(value);
        }
        Ok(())
    }

    fn operand(
        &mut self,
        kind: OperandKind,
        token: &Token<'_>,
        line_no: usize,
    ) -> Result<Value, AssemblyErrorKind> {
        let text = token.text;
        match kind {
            OperandKind::Register => {
                let index = text.parse::<i64>().map_err(|_| AssemblyErrorKind::InvalidRegister {
                    text: text.to_string(),
                })?;
                let num_registers = self.options.num_registers;
                if usize::try_from(index).map_or(true, |i| i >= num_registers) {
                    return Err(AssemblyErrorKind::RegisterOutOfRange {
                        index,
                        num_registers,
                    });
                }
                Ok(Value::Int(index))
            }
            OperandKind::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| AssemblyErrorKind::InvalidInteger {
                    text: text.to_string(),
                }),
            OperandKind::Float => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| AssemblyErrorKind::InvalidFloat {
                    text: text.to_string(),
                }),
            OperandKind::Label => {
                let name = self.labels.expand(text)?;
                self.labels.reference(PendingRef {
                    slot: self.code.len(),
                    name,
                    line: line_no,
                    span: token.span.clone(),
                });
                Ok(UNRESOLVED)
            }
            OperandKind::Data => self
                .data
                .lookup(text)
                .map(|index| Value::Int(index as i64))
                .ok_or_else(|| AssemblyErrorKind::UnknownData {
                    name: text.to_string(),
                }),
        }
    }
}

/// Only a comment may follow a complete line form.
fn expect_end(tokens: &mut Tokens<'_>) -> LineResult<()> {
    match tokens.next() {
        Some(token) if !token.is_comment() => Err((
            AssemblyErrorKind::UnexpectedToken {
                found: token.text.to_string(),
            },
            token.span,
        )),
        _ => Ok(()),
    }
}
