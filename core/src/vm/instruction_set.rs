//! regvm Instruction Set
//!
//! This module defines the opcodes of the register machine and the shape of
//! their operands.
//!
//! # Code Layout
//!
//! Code is a flat sequence of [`Value`](super::Value) cells. Every
//! instruction occupies one `Op` cell followed by its operand cells:
//! ```text
//! ┌────────┬───────────┬───────────┐
//! │ Op(op) │ operand 1 │ operand 2 │
//! └────────┴───────────┴───────────┘
//! ```
//!
//! The number of operand cells is fixed per opcode (see [`Opcode::operands`]),
//! so the interpreter never has to inspect an operand's tag to find the next
//! instruction.
//!
//! # Conventions
//!
//! - **Accumulator-left**: two-register operations compute `r2 = r2 OP r1`.
//! - **Homogeneous**: arithmetic and comparison require both registers to
//!   hold the same numeric type.

use core::fmt;

use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// How the assembler parses an operand and how the interpreter reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// Register index, stored as `Int`.
    Register,
    /// Immediate integer, stored as `Int`.
    Int,
    /// Immediate float, stored as `Float`.
    Float,
    /// Code index of a label, stored as `Int`.
    Label,
    /// Index into the data pool, stored as `Int`.
    Data,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => write!(f, "a register"),
            OperandKind::Int => write!(f, "an integer literal"),
            OperandKind::Float => write!(f, "a float literal"),
            OperandKind::Label => write!(f, "a label"),
            OperandKind::Data => write!(f, "a data name"),
        }
    }
}

use OperandKind::*;

/// A single VM opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // ========================================================================
    // Special
    // ========================================================================
    /// Halt execution successfully.
    Halt,

    /// Do nothing.
    Noop,

    // ========================================================================
    // Data movement
    // ========================================================================
    /// Copy register r1 into r2.
    /// Operands: r1, r2
    Mov,

    /// Push register r1 onto the operand stack.
    /// Operands: r1
    Push,

    /// Pop the operand stack into register r1.
    /// Operands: r1
    Pop,

    // ========================================================================
    // Arithmetic
    // ========================================================================
    /// Increment r1 by one in its own numeric type.
    Inc,

    /// Decrement r1 by one in its own numeric type.
    Dec,

    /// r2 = r2 + r1
    Add,

    /// r2 = r2 - r1
    Sub,

    /// r2 = r2 * r1
    Mul,

    /// r2 = r2 / r1
    Div,

    /// r2 = r2 % r1 (integers only)
    Mod,

    /// Load integer literal into r1.
    /// Operands: literal, r1
    Cil,

    /// Load float literal into r1.
    /// Operands: literal, r1
    Cfl,

    // ========================================================================
    // I/O
    // ========================================================================
    /// Output a string from the data pool.
    Ods,

    /// Output the value of r1 followed by a space.
    Ofv,

    /// Output a newline and flush.
    Onl,

    /// Input an integer into r1.
    Iiv,

    /// Input a float into r1.
    Ifv,

    /// Store whether the last input failed (1) or not (0) into r1.
    Ipf,

    // ========================================================================
    // Comparison & control flow
    // ========================================================================
    /// Compare r2 against r1 and set the flags.
    Cmp,

    /// Compare r1 against zero of its own type and set the flags.
    Cmpz,

    /// Unconditional jump.
    Jmp,

    /// Jump if the last comparison was `>`.
    Jgt,

    /// Jump if the last comparison was `=`.
    Jeq,

    /// Jump if the last comparison was `<`.
    Jlt,

    /// Push the return address and jump.
    Call,

    /// Pop the return address and jump back.
    Ret,
}

impl Opcode {
    /// Every opcode, in declaration order.
    pub const ALL: [Opcode; 28] = [
        Opcode::Halt,
        Opcode::Noop,
        Opcode::Mov,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Cil,
        Opcode::Cfl,
        Opcode::Ods,
        Opcode::Ofv,
        Opcode::Onl,
        Opcode::Iiv,
        Opcode::Ifv,
        Opcode::Ipf,
        Opcode::Cmp,
        Opcode::Cmpz,
        Opcode::Jmp,
        Opcode::Jgt,
        Opcode::Jeq,
        Opcode::Jlt,
        Opcode::Call,
        Opcode::Ret,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Halt => "halt",
            Opcode::Noop => "noop",
            Opcode::Mov => "mov",
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::Cil => "cil",
            Opcode::Cfl => "cfl",
            Opcode::Ods => "ods",
            Opcode::Ofv => "ofv",
            Opcode::Onl => "onl",
            Opcode::Iiv => "iiv",
            Opcode::Ifv => "ifv",
            Opcode::Ipf => "ipf",
            Opcode::Cmp => "cmp",
            Opcode::Cmpz => "cmpz",
            Opcode::Jmp => "jmp",
            Opcode::Jgt => "jgt",
            Opcode::Jeq => "jeq",
            Opcode::Jlt => "jlt",
            Opcode::Call => "call",
            Opcode::Ret => "ret",
        }
    }

    /// Operand shape, in source order.
    pub const fn operands(self) -> &'static [OperandKind] {
        match self {
            Opcode::Halt | Opcode::Noop | Opcode::Onl | Opcode::Ret => &[],
            Opcode::Push
            | Opcode::Pop
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Ofv
            | Opcode::Iiv
            | Opcode::Ifv
            | Opcode::Ipf
            | Opcode::Cmpz => &[Register],
            Opcode::Mov
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Cmp => &[Register, Register],
            Opcode::Cil => &[Int, Register],
            Opcode::Cfl => &[Float, Register],
            Opcode::Ods => &[Data],
            Opcode::Jmp | Opcode::Jgt | Opcode::Jeq | Opcode::Jlt | Opcode::Call => &[Label],
        }
    }

    /// Number of cells the instruction occupies, opcode included.
    pub const fn width(self) -> usize {
        1 + self.operands().len()
    }

    /// Looks up an opcode by its mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        MNEMONICS.get(name).copied()
    }
}

static MNEMONICS: Lazy<HashMap<&'static str, Opcode>> =
    Lazy::new(|| Opcode::ALL.iter().map(|op| (op.mnemonic(), *op)).collect());

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonics_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
        assert_eq!(Opcode::from_mnemonic("jump"), None);
        assert_eq!(Opcode::from_mnemonic("HALT"), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(Opcode::Halt.width(), 1);
        assert_eq!(Opcode::Ofv.width(), 2);
        assert_eq!(Opcode::Cfl.width(), 3);
        assert_eq!(Opcode::Call.width(), 2);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:<5}|", Opcode::Mov), "mov  |");
    }
}
