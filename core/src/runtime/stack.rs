use crate::errors::StackError;
use crate::runtime::value::ObjRef;

pub const STACK_MAX: usize = 256;

/// The root set: a bounded LIFO of handles. Every entry is a root, whatever its position.
#[derive(Debug)]
pub struct Stack {
    values: Vec<ObjRef>,
    capacity: usize,
}

impl Stack {
    /// `capacity` is only a bound; storage grows with use and starts at most [`STACK_MAX`].
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity.min(STACK_MAX)),
            capacity,
        }
    }

    pub fn push(&mut self, value: ObjRef) -> Result<(), StackError> {
        self.ensure_room()?;
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<ObjRef, StackError> {
        self.values.pop().ok_or(StackError::Underflow {
            needed: 1,
            available: 0,
        })
    }

    pub fn peek(&self) -> Result<ObjRef, StackError> {
        self.values.last().copied().ok_or(StackError::Underflow {
            needed: 1,
            available: 0,
        })
    }

    pub fn peek_at(&self, offset: usize) -> Result<ObjRef, StackError> {
        if offset >= self.values.len() {
            return Err(StackError::Underflow {
                needed: offset + 1,
                available: self.values.len(),
            });
        }
        let idx = self.values.len() - 1 - offset;
        Ok(self.values[idx])
    }

    /// Fails unless at least `needed` entries can be popped.
    pub fn require(&self, needed: usize) -> Result<(), StackError> {
        if self.values.len() < needed {
            return Err(StackError::Underflow {
                needed,
                available: self.values.len(),
            });
        }
        Ok(())
    }

    /// Fails if one more push would exceed the capacity.
    pub fn ensure_room(&self) -> Result<(), StackError> {
        if self.values.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Drops every root without popping.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn as_slice(&self) -> &[ObjRef] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(STACK_MAX)
    }
}
