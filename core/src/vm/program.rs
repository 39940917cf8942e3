use core::fmt::{self, Write};

use hashbrown::{HashMap, HashSet};

use super::{OperandKind, Value};
use crate::syntax::string_literal::escape_string;

/// An assembled program: flat code cells, the string pool and the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub code: Vec<Value>,
    pub data: Vec<String>,
    pub entry_point: usize,
}

impl Program {
    pub fn new(code: Vec<Value>, data: Vec<String>, entry_point: usize) -> Self {
        Self {
            code,
            data,
            entry_point,
        }
    }

    /// Renders the instruction at `index` as its mnemonic and operands.
    ///
    /// Returns the rendered text and the index of the next instruction, or
    /// `None` if `index` does not hold an opcode cell. Label operands render
    /// as `@<index>`, data operands as `$<index>`.
    pub fn render_instruction(&self, index: usize) -> Option<(String, usize)> {
        let op = self.code.get(index)?.as_op()?;
        let mut text = String::from(op.mnemonic());
        for (i, kind) in op.operands().iter().enumerate() {
            text.push(if i == 0 { ' ' } else { ',' });
            match (kind, self.code.get(index + 1 + i)) {
                (OperandKind::Label, Some(Value::Int(target))) => {
                    let _ = write!(text, "@{}", target);
                }
                (OperandKind::Data, Some(Value::Int(slot))) => {
                    let _ = write!(text, "${}", slot);
                }
                (_, Some(Value::Float(x))) => {
                    // `{:?}` prints 3.0 rather than 3
                    let _ = write!(text, "{:?}", x);
                }
                (_, Some(value)) => {
                    let _ = write!(text, "{}", value);
                }
                (_, None) => text.push('?'),
            }
        }
        Some((text, index + op.width()))
    }

    /// A printable listing of the whole program.
    pub fn listing(&self, show_data: bool) -> Listing<'_> {
        Listing {
            program: self,
            show_data,
        }
    }

    /// Code indices that some jump or call refers to.
    fn jump_targets(&self) -> HashSet<usize> {
        let mut targets = HashSet::new();
        let mut index = 0;
        while index < self.code.len() {
            let Some(op) = self.code[index].as_op() else {
                index += 1;
                continue;
            };
            for (i, kind) in op.operands().iter().enumerate() {
                if *kind != OperandKind::Label {
                    continue;
                }
                if let Some(Value::Int(target)) = self.code.get(index + 1 + i) {
                    if let Ok(target) = usize::try_from(*target) {
                        targets.insert(target);
                    }
                }
            }
            index += op.width();
        }
        targets
    }
}

/// Display adaptor returned by [`Program::listing`].
pub struct Listing<'a> {
    program: &'a Program,
    show_data: bool,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program;

        if self.show_data {
            if program.data.is_empty() {
                writeln!(f, "data: []")?;
            } else {
                writeln!(f, "data: [")?;
                for (i, text) in program.data.iter().enumerate() {
                    write!(f, "    ${} = ", i)?;
                    escape_string(f, text)?;
                    writeln!(f)?;
                }
                writeln!(f, "]")?;
            }
        }

        // Assign label numbers to targets (sorted for deterministic output)
        let mut sorted_targets: Vec<_> = program.jump_targets().into_iter().collect();
        sorted_targets.sort();
        let label_map: HashMap<usize, usize> = sorted_targets
            .into_iter()
            .enumerate()
            .map(|(i, addr)| (addr, i))
            .collect();

        writeln!(f, "code:")?;
        let mut index = 0;
        while index < program.code.len() {
            let marker = if index == program.entry_point { '>' } else { ' ' };
            let label_prefix = label_map
                .get(&index)
                .map(|l| format!("L{}:", l))
                .unwrap_or_default();

            match program.render_instruction(index) {
                Some((text, next)) => {
                    let target = program.code[index]
                        .as_op()
                        .filter(|op| op.operands() == [OperandKind::Label])
                        .and_then(|_| program.code.get(index + 1))
                        .and_then(Value::as_int)
                        .and_then(|t| usize::try_from(t).ok())
                        .and_then(|t| label_map.get(&t));
                    match target {
                        Some(label) => writeln!(
                            f,
                            "{} {:4} {:>4}  {} (to L{})",
                            marker, index, label_prefix, text, label
                        )?,
                        None => writeln!(f, "{} {:4} {:>4}  {}", marker, index, label_prefix, text)?,
                    }
                    index = next;
                }
                None => {
                    writeln!(
                        f,
                        "{} {:4} {:>4}  .word {}",
                        marker, index, label_prefix, program.code[index]
                    )?;
                    index += 1;
                }
            }
        }
        Ok(())
    }
}
