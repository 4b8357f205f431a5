//! Instruction descriptors: name, stack preconditions, block arity, and executable.

use crate::code::Code;
use crate::state::State;
use crate::value::{StackKind, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Operation parameterised by the stack kind it targets
pub type StackOp = fn(&mut State, StackKind);

/// Operation fixed to the stacks it names
pub type StateOp = fn(&mut State);

/// Operation that needs a reference to its own instruction, for recursion
pub type RecursiveOp = fn(&mut State, &Arc<Instruction>);

/// How an instruction acts on the state
#[derive(Clone)]
pub enum Executable {
    Generic { target: StackKind, op: StackOp },
    Fixed(StateOp),
    Recursive(RecursiveOp),
    /// Push a copy of the named input binding
    Input(String),
}

impl fmt::Debug for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executable::Generic { target, .. } => write!(f, "Generic({})", target),
            Executable::Fixed(_) => f.write_str("Fixed"),
            Executable::Recursive(_) => f.write_str("Recursive"),
            Executable::Input(name) => write!(f, "Input({})", name),
        }
    }
}

/// A named, executable instruction
#[derive(Clone)]
pub struct Instruction {
    name: String,
    requires: Vec<(StackKind, usize)>,
    code_blocks: usize,
    executable: Executable,
}

impl Instruction {
    /// `requires` lists one entry per item the instruction needs; a kind listed
    /// twice means that stack must hold at least two items.
    pub fn new(
        name: impl Into<String>,
        requires: &[StackKind],
        code_blocks: usize,
        executable: Executable,
    ) -> Self {
        let mut tally: Vec<(StackKind, usize)> = Vec::new();
        for kind in requires {
            match tally.iter_mut().find(|(k, _)| k == kind) {
                Some((_, count)) => *count += 1,
                None => tally.push((*kind, 1)),
            }
        }
        tally.sort();
        Self {
            name: name.into(),
            requires: tally,
            code_blocks,
            executable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum depth per stack for the instruction to run
    pub fn requires(&self) -> &[(StackKind, usize)] {
        &self.requires
    }

    /// Number of code blocks the instruction opens in a translated genome
    pub fn code_blocks(&self) -> usize {
        self.code_blocks
    }

    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    /// Whether every required stack is deep enough
    pub fn is_ready(&self, state: &State) -> bool {
        self.requires
            .iter()
            .all(|(kind, count)| state.depth(*kind) >= *count)
    }

    /// Apply the instruction. Callers check `is_ready` first.
    pub fn execute(instruction: &Arc<Instruction>, state: &mut State) {
        match &instruction.executable {
            Executable::Generic { target, op } => op(state, *target),
            Executable::Fixed(op) => op(state),
            Executable::Recursive(op) => op(state, instruction),
            Executable::Input(name) => match state.input(name).cloned() {
                Some(Value::Code(code)) => state.push_exec(*code),
                Some(value) => state.push(value),
                None => {}
            },
        }
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Instruction {}

impl Hash for Instruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("code_blocks", &self.code_blocks)
            .field("executable", &self.executable)
            .finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<Instruction> for Code {
    fn from(instruction: Instruction) -> Self {
        Code::Instruction(Arc::new(instruction))
    }
}
