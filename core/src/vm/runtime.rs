use core::cmp::Ordering;
use core::str::{self, FromStr};
use std::io::{BufRead, Write};

use tracing::{debug, trace};

use super::{Fault, FaultKind, Opcode, OperandKind, Program, Stack, Value, operators};
use crate::api::ExecutionOptions;

/// Outcome of a single [`Interpreter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction ran and execution can continue.
    Continue,
    /// A `halt` instruction was executed.
    Halted,
}

/// Executes a [`Program`] against an input and an output channel.
///
/// All machine state (registers, stacks, flags) is created fresh in
/// [`Interpreter::new`] and dropped with the interpreter.
pub struct Interpreter<'p, R, W> {
    program: &'p Program,
    pc: usize,
    registers: Vec<Value>,
    stack: Stack<Value>,
    calls: Stack<usize>,
    /// Result of the last comparison; `None` before any comparison and after
    /// an unordered (NaN) one.
    flags: Option<Ordering>,
    stdin_fault: bool,
    input: R,
    output: W,
    steps: u64,
}

impl<'p, R: BufRead, W: Write> Interpreter<'p, R, W> {
    pub fn new(program: &'p Program, options: &ExecutionOptions, input: R, output: W) -> Self {
        Interpreter {
            program,
            pc: program.entry_point,
            registers: vec![Value::Int(0); options.num_registers],
            stack: Stack::new(options.max_stack_depth),
            calls: Stack::new(options.max_stack_depth),
            flags: None,
            stdin_fault: false,
            input,
            output,
            steps: 0,
        }
    }

    /// Runs until `halt` or the first fault.
    pub fn run(&mut self) -> Result<(), Fault> {
        debug!(entry_point = self.pc, "starting execution");
        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Halted) => {
                    debug!(steps = self.steps, "halted");
                    return Ok(());
                }
                Err(fault) => {
                    debug!(steps = self.steps, %fault, "faulted");
                    return Err(fault);
                }
            }
        }
    }

    /// Executes the instruction at the program counter.
    pub fn step(&mut self) -> Result<Step, Fault> {
        let pc = self.pc;
        self.steps += 1;
        self.execute(pc).map_err(|kind| Fault { kind, pc })
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn registers(&self) -> &[Value] {
        &self.registers
    }

    pub fn flags(&self) -> Option<Ordering> {
        self.flags
    }

    pub fn stdin_fault(&self) -> bool {
        self.stdin_fault
    }

    pub fn stack(&self) -> &Stack<Value> {
        &self.stack
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn execute(&mut self, pc: usize) -> Result<Step, FaultKind> {
        let op = self.fetch(pc)?;
        trace!(pc, op = op.mnemonic(), "execute");
        let mut next = pc + op.width();

        match op {
            Opcode::Halt => return Ok(Step::Halted),
            Opcode::Noop => {}

            Opcode::Mov => {
                let src = self.register_operand(pc, op, 0)?;
                let dst = self.register_operand(pc, op, 1)?;
                self.registers[dst] = self.registers[src];
            }
            Opcode::Push => {
                let src = self.register_operand(pc, op, 0)?;
                self.stack.push(self.registers[src]).map_err(|_| self.overflow())?;
            }
            Opcode::Pop => {
                let dst = self.register_operand(pc, op, 0)?;
                self.registers[dst] = self.stack.pop().ok_or(FaultKind::StackUnderflow)?;
            }

            Opcode::Inc | Opcode::Dec => {
                let reg = self.register_operand(pc, op, 0)?;
                let delta = if op == Opcode::Inc { 1 } else { -1 };
                self.registers[reg] = operators::offset(op, self.registers[reg], delta)?;
            }
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod => {
                let src = self.register_operand(pc, op, 0)?;
                let dst = self.register_operand(pc, op, 1)?;
                self.registers[dst] =
                    operators::binary(op, self.registers[dst], self.registers[src])?;
            }
            Opcode::Cil | Opcode::Cfl => {
                let literal = self.operand(pc, op, 0)?;
                let dst = self.register_operand(pc, op, 1)?;
                self.registers[dst] = literal;
            }

            Opcode::Ods => {
                let index = self.data_operand(pc, op, 0)?;
                self.output.write_all(self.program.data[index].as_bytes())?;
            }
            Opcode::Ofv => {
                let src = self.register_operand(pc, op, 0)?;
                write!(self.output, "{} ", self.registers[src])?;
            }
            Opcode::Onl => {
                self.output.write_all(b"\n")?;
                self.output.flush()?;
            }
            Opcode::Iiv => {
                let dst = self.register_operand(pc, op, 0)?;
                if let Some(value) = self.read_token::<i64>()? {
                    self.registers[dst] = Value::Int(value);
                }
            }
            Opcode::Ifv => {
                let dst = self.register_operand(pc, op, 0)?;
                if let Some(value) = self.read_token::<f64>()? {
                    self.registers[dst] = Value::Float(value);
                }
            }
            Opcode::Ipf => {
                let dst = self.register_operand(pc, op, 0)?;
                self.registers[dst] = Value::Int(self.stdin_fault as i64);
            }

            Opcode::Cmp => {
                let src = self.register_operand(pc, op, 0)?;
                let dst = self.register_operand(pc, op, 1)?;
                let (lhs, rhs) = (self.registers[dst], self.registers[src]);
                self.flags = lhs.compare(&rhs).map_err(|(left, right)| {
                    FaultKind::TypeMismatch {
                        op: op.mnemonic(),
                        left,
                        right,
                    }
                })?;
            }
            Opcode::Cmpz => {
                let reg = self.register_operand(pc, op, 0)?;
                let value = self.registers[reg];
                let zero = value.zero_like().ok_or(FaultKind::TypeMismatch {
                    op: op.mnemonic(),
                    left: value.kind(),
                    right: value.kind(),
                })?;
                // Both operands share a numeric type here, so compare cannot fail.
                self.flags = value.compare(&zero).unwrap_or(None);
            }

            Opcode::Jmp => next = self.label_operand(pc, op, 0)?,
            Opcode::Jgt | Opcode::Jeq | Opcode::Jlt => {
                let target = self.label_operand(pc, op, 0)?;
                let wanted = match op {
                    Opcode::Jgt => Ordering::Greater,
                    Opcode::Jeq => Ordering::Equal,
                    _ => Ordering::Less,
                };
                if self.flags == Some(wanted) {
                    next = target;
                }
            }
            Opcode::Call => {
                let target = self.label_operand(pc, op, 0)?;
                self.calls.push(next).map_err(|_| self.overflow())?;
                next = target;
            }
            Opcode::Ret => {
                next = self.calls.pop().ok_or(FaultKind::CallStackUnderflow)?;
            }
        }

        self.pc = next;
        Ok(Step::Continue)
    }

    fn fetch(&self, pc: usize) -> Result<Opcode, FaultKind> {
        let cell = self.program.code.get(pc).ok_or(FaultKind::PcOutOfBounds {
            len: self.program.code.len(),
        })?;
        cell.as_op().ok_or(FaultKind::NotAnInstruction { found: cell.kind() })
    }

    fn operand(&self, pc: usize, op: Opcode, index: usize) -> Result<Value, FaultKind> {
        let bad = || FaultKind::BadOperand {
            op: op.mnemonic(),
            index,
        };
        let value = *self.program.code.get(pc + 1 + index).ok_or_else(bad)?;
        // Operand slots never hold opcodes, and their tag must match the shape.
        match (op.operands()[index], value) {
            (OperandKind::Float, Value::Float(_)) => Ok(value),
            (OperandKind::Float, _) | (_, Value::Float(_)) | (_, Value::Op(_)) => Err(bad()),
            (_, Value::Int(_)) => Ok(value),
        }
    }

    fn int_operand(&self, pc: usize, op: Opcode, index: usize) -> Result<i64, FaultKind> {
        self.operand(pc, op, index)?
            .as_int()
            .ok_or(FaultKind::BadOperand {
                op: op.mnemonic(),
                index,
            })
    }

    fn register_operand(&self, pc: usize, op: Opcode, index: usize) -> Result<usize, FaultKind> {
        let raw = self.int_operand(pc, op, index)?;
        usize::try_from(raw)
            .ok()
            .filter(|r| *r < self.registers.len())
            .ok_or(FaultKind::RegisterOutOfRange {
                index: raw,
                num_registers: self.registers.len(),
            })
    }

    fn data_operand(&self, pc: usize, op: Opcode, index: usize) -> Result<usize, FaultKind> {
        let raw = self.int_operand(pc, op, index)?;
        usize::try_from(raw)
            .ok()
            .filter(|d| *d < self.program.data.len())
            .ok_or(FaultKind::DataOutOfRange {
                index: raw,
                len: self.program.data.len(),
            })
    }

    fn label_operand(&self, pc: usize, op: Opcode, index: usize) -> Result<usize, FaultKind> {
        let raw = self.int_operand(pc, op, index)?;
        usize::try_from(raw).map_err(|_| FaultKind::BadOperand {
            op: op.mnemonic(),
            index,
        })
    }

    fn overflow(&self) -> FaultKind {
        FaultKind::StackOverflow {
            max_depth: self.stack.capacity(),
        }
    }

    /// Reads one line of input and parses its first token.
    ///
    /// The whole line is consumed either way. Sets `stdin_fault` and returns
    /// `None` on a parse failure, a line that is not UTF-8, or end of input.
    /// Only errors from the underlying reader are faults.
    fn read_token<T: FromStr>(&mut self) -> Result<Option<T>, FaultKind> {
        let mut line = Vec::new();
        let read = self.input.read_until(b'\n', &mut line)?;
        let parsed = if read == 0 {
            None
        } else {
            str::from_utf8(&line)
                .ok()
                .and_then(|text| text.split_whitespace().next())
                .and_then(|token| token.parse::<T>().ok())
        };
        self.stdin_fault = parsed.is_none();
        Ok(parsed)
    }
}
