//! A homogeneous stack of values.

use crate::value::{StackKind, Value};

/// An ordered sequence of values of one kind. Depth 0 is the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    kind: StackKind,
    items: Vec<Value>,
}

impl Stack {
    pub fn new(kind: StackKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// Whether `value` may be stored here. The exec stack holds code values.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.kind {
            StackKind::Exec => value.kind() == StackKind::Code,
            kind => value.kind() == kind,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn top(&self) -> Option<&Value> {
        self.items.last()
    }

    /// The item `depth` positions below the top
    pub fn nth(&self, depth: usize) -> Option<&Value> {
        let len = self.items.len();
        if depth < len {
            self.items.get(len - 1 - depth)
        } else {
            None
        }
    }

    /// Push onto the top. Values of another kind are refused.
    pub fn push(&mut self, value: Value) {
        debug_assert!(
            self.accepts(&value),
            "{} value pushed onto {} stack",
            value.kind(),
            self.kind
        );
        if self.accepts(&value) {
            self.items.push(value);
        }
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Insert so the value ends up at `depth`; depths past the bottom append at the bottom
    pub fn insert(&mut self, depth: usize, value: Value) {
        debug_assert!(self.accepts(&value));
        if !self.accepts(&value) {
            return;
        }
        let index = self.items.len().saturating_sub(depth);
        self.items.insert(index, value);
    }

    /// Remove and return the item at `depth`
    pub fn remove(&mut self, depth: usize) -> Option<Value> {
        let len = self.items.len();
        if depth < len {
            Some(self.items.remove(len - 1 - depth))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items from the top down
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.items.iter().rev()
    }

    /// Copy of the contents, top first
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }
}
