use core::fmt;

/// A bounded LIFO stack.
///
/// Used by the interpreter for both the operand stack and the call stack.
/// Unlike a plain `Vec`, pushing past the configured maximum is reported to
/// the caller instead of growing without limit.
///
/// # Examples
///
/// ```ignore
/// use regvm_core::vm::Stack;
///
/// let mut stack = Stack::new(2);
/// assert!(stack.push(42).is_ok());
/// assert!(stack.push(17).is_ok());
/// assert_eq!(stack.push(99), Err(StackFull));
/// assert_eq!(stack.pop(), Some(17));
/// assert_eq!(stack.peek(), Some(&42));
/// ```
pub struct Stack<T> {
    /// The underlying storage for stack elements.
    items: Vec<T>,
    /// Maximum allowed stack size.
    max_size: usize,
}

/// Returned by [`Stack::push`] when the stack is at its maximum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull;

impl<T> Stack<T> {
    /// Creates a new stack with the specified maximum size.
    ///
    /// Pre-allocates a reasonable amount (min of max_size or 256) to avoid
    /// frequent reallocations during normal execution.
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_size.min(256)),
            max_size,
        }
    }

    /// Pushes a value onto the stack.
    ///
    /// Fails with [`StackFull`] if the stack already holds `max_size` values;
    /// the value is dropped in that case.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), StackFull> {
        if self.items.len() >= self.max_size {
            return Err(StackFull);
        }
        self.items.push(value);
        Ok(())
    }

    /// Removes and returns the top value, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum size of the stack.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
