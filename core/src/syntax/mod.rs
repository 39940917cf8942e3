//! Lexical building blocks shared by the assembler and the diagnostics.

pub mod string_literal;

use core::ops::Range;

/// A byte range in the assembled source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
}
