//! Symbol tables used while assembling: labels, pending label references
//! and the data pool.

use hashbrown::HashMap;

use super::error::AssemblyErrorKind;
use crate::syntax::Span;

/// Marks a label name as scoped to the enclosing top-level label.
pub(super) const SUBLABEL_MARKER: char = '.';

#[derive(Debug, Clone)]
struct Definition {
    index: usize,
    line: usize,
    span: Span,
}

/// A label operand waiting for pass 2.
#[derive(Debug, Clone)]
pub(super) struct PendingRef {
    /// Code cell holding the placeholder.
    pub slot: usize,
    pub name: String,
    pub line: usize,
    pub span: Span,
}

#[derive(Debug, Default)]
pub(super) struct LabelTable {
    labels: HashMap<String, Definition>,
    refs: Vec<PendingRef>,
    current_top: Option<String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands `.sub` to `top.sub` using the last top-level label.
    pub fn expand(&self, name: &str) -> Result<String, AssemblyErrorKind> {
        if !name.starts_with(SUBLABEL_MARKER) {
            return Ok(name.to_string());
        }
        match &self.current_top {
            Some(top) => Ok(format!("{}{}", top, name)),
            None => Err(AssemblyErrorKind::SublabelWithoutLabel {
                name: name.to_string(),
            }),
        }
    }

    /// Defines `name` at code index `index` and returns the expanded name.
    pub fn define(
        &mut self,
        name: &str,
        index: usize,
        line: usize,
        span: Span,
    ) -> Result<String, AssemblyErrorKind> {
        if name.is_empty() || name == "." {
            return Err(AssemblyErrorKind::EmptyLabel);
        }
        let full = self.expand(name)?;
        if let Some(first) = self.labels.get(&full) {
            return Err(AssemblyErrorKind::DuplicateLabel {
                name: full,
                first_line: first.line,
                first_span: first.span.clone(),
            });
        }
        if !name.starts_with(SUBLABEL_MARKER) {
            self.current_top = Some(full.clone());
        }
        self.labels
            .insert(full.clone(), Definition { index, line, span });
        Ok(full)
    }

    pub fn reference(&mut self, pending: PendingRef) {
        self.refs.push(pending);
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.labels.get(name).map(|def| def.index)
    }

    /// Pending references, in the order they were emitted.
    pub fn pending(&self) -> &[PendingRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Named strings for `ods`, in declaration order.
#[derive(Debug, Default)]
pub(super) struct DataPool {
    names: HashMap<String, Definition>,
    strings: Vec<String>,
}

impl DataPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: &str,
        text: String,
        line: usize,
        span: Span,
    ) -> Result<usize, AssemblyErrorKind> {
        if let Some(first) = self.names.get(name) {
            return Err(AssemblyErrorKind::DuplicateData {
                name: name.to_string(),
                first_line: first.line,
                first_span: first.span.clone(),
            });
        }
        let index = self.strings.len();
        self.strings.push(text);
        self.names
            .insert(name.to_string(), Definition { index, line, span });
        Ok(index)
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.names.get(name).map(|def| def.index)
    }

    pub fn into_strings(self) -> Vec<String> {
        self.strings
    }
}
