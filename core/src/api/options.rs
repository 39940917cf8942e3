//! Configuration options for the regvm engine.

/// Default size of the register file.
pub const DEFAULT_REGISTERS: usize = 16;

/// Default bound on both the operand stack and the call stack.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 65_536;

/// Configuration options for assembly.
///
/// # Example
///
/// ```
/// use regvm_core::api::AssemblerOptions;
///
/// let options = AssemblerOptions {
///     num_registers: 4,
///     entry_point: Some("@main".to_string()),
/// };
/// assert_eq!(AssemblerOptions::default().num_registers, 16);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Register operands must be below this value.
    ///
    /// Default: 16
    pub num_registers: usize,

    /// Label where execution starts. `None` starts at the first cell.
    ///
    /// Default: None
    pub entry_point: Option<String>,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            num_registers: DEFAULT_REGISTERS,
            entry_point: None,
        }
    }
}

/// Configuration options for program execution.
///
/// These options size the machine and bound its stacks.
///
/// # Example
///
/// ```
/// use regvm_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     num_registers: 8,
///     max_stack_depth: 1024,
/// };
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Size of the register file.
    ///
    /// Default: 16
    pub num_registers: usize,

    /// Maximum depth of the operand stack and of the call stack.
    ///
    /// Default: 65536
    pub max_stack_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_registers: DEFAULT_REGISTERS,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
        }
    }
}

/// Configuration options for the regvm engine.
///
/// A single register count feeds both the assembler's range check and the
/// interpreter's register file, so the two cannot disagree.
///
/// # Example
///
/// ```
/// use regvm_core::api::EngineOptions;
///
/// let options = EngineOptions {
///     num_registers: 4,
///     ..Default::default()
/// };
/// assert_eq!(options.assembler_options().num_registers, 4);
/// assert_eq!(options.execution_options().num_registers, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Default: 16
    pub num_registers: usize,

    /// Default: None
    pub entry_point: Option<String>,

    /// Default: 65536
    pub max_stack_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            num_registers: DEFAULT_REGISTERS,
            entry_point: None,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
        }
    }
}

impl EngineOptions {
    pub fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            num_registers: self.num_registers,
            entry_point: self.entry_point.clone(),
        }
    }

    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions {
            num_registers: self.num_registers,
            max_stack_depth: self.max_stack_depth,
        }
    }
}
