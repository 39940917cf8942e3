//! Line tokenizer.
//!
//! Tokens are separated by whitespace or commas. A `;` starts a comment
//! token that runs to the end of the line, so `halt;done` and `halt ; done`
//! tokenize the same way.

use crate::syntax::Span;

pub(super) const COMMENT: char = ';';

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token<'s> {
    pub text: &'s str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_comment(&self) -> bool {
        self.text.starts_with(COMMENT)
    }
}

/// Iterator over the tokens of one source line.
pub(super) struct Tokens<'s> {
    line: &'s str,
    /// Byte offset of `line` within the whole source.
    base: usize,
    pos: usize,
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

impl<'s> Tokens<'s> {
    pub fn new(line: &'s str, base: usize) -> Self {
        Self { line, base, pos: 0 }
    }

    fn skip_separators(&mut self) {
        let rest = &self.line[self.pos..];
        let trimmed = rest.trim_start_matches(is_separator);
        self.pos += rest.len() - trimmed.len();
    }

    /// The unconsumed text after skipping separators, with its span.
    pub fn remainder(&mut self) -> (&'s str, Span) {
        self.skip_separators();
        let span = Span::new(self.base + self.pos, self.base + self.line.len());
        (&self.line[self.pos..], span)
    }

    /// Marks `len` bytes of the remainder as consumed.
    pub fn advance(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.line.len());
    }

    /// Empty span at the end of the line text, used for "missing" errors.
    pub fn end_span(&self) -> Span {
        let end = self.base + self.line.trim_end().len();
        Span::new(end, end)
    }
}

impl<'s> Iterator for Tokens<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        self.skip_separators();
        let rest = &self.line[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let len = if rest.starts_with(COMMENT) {
            rest.trim_end().len()
        } else {
            rest.find(|c: char| is_separator(c) || c == COMMENT)
                .unwrap_or(rest.len())
        };

        let start = self.pos;
        self.pos += len;
        Some(Token {
            text: &self.line[start..self.pos],
            span: Span::new(self.base + start, self.base + self.pos),
        })
    }
}
