//! Program structure: literals, instruction references, and nested blocks.

use crate::instruction::Instruction;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// One element of a program
#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    Literal(Value),
    Instruction(Arc<Instruction>),
    Block(CodeBlock),
}

impl Code {
    pub fn literal(value: impl Into<Value>) -> Self {
        Code::Literal(value.into())
    }

    /// Points in this item: 1 for an atom, 1 plus the points of the contents for a block
    pub fn size(&self) -> usize {
        match self {
            Code::Block(block) => 1 + block.size(),
            _ => 1,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Code::Block(_))
    }

    pub fn as_block(&self) -> Option<&CodeBlock> {
        match self {
            Code::Block(block) => Some(block),
            _ => None,
        }
    }

    /// True if `item` is a direct child of this block, or equal to this atom
    pub fn has_member(&self, item: &Code) -> bool {
        match self {
            Code::Block(block) => block.items.contains(item),
            atom => atom == item,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Literal(Value::String(s)) => write!(f, "{:?}", s),
            Code::Literal(Value::Char(c)) => write!(f, "{:?}", c),
            Code::Literal(value) => write!(f, "{}", value),
            Code::Instruction(instruction) => f.write_str(instruction.name()),
            Code::Block(block) => write!(f, "{}", block),
        }
    }
}

impl From<CodeBlock> for Code {
    fn from(block: CodeBlock) -> Self {
        Code::Block(block)
    }
}

impl From<Arc<Instruction>> for Code {
    fn from(instruction: Arc<Instruction>) -> Self {
        Code::Instruction(instruction)
    }
}

/// An ordered sequence of code items; the first item executes first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    items: Vec<Code>,
}

/// The unit the interpreter consumes
pub type Program = CodeBlock;

impl CodeBlock {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_items(items: Vec<Code>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: Code) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Code] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Code> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Code> {
        self.items.iter()
    }

    /// Total points of the contents, excluding the block itself
    pub fn size(&self) -> usize {
        self.items.iter().map(Code::size).sum()
    }
}

impl FromIterator<Code> for CodeBlock {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(")")
    }
}
