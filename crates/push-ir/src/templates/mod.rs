//! Instruction templates and the families they are grouped into.
//!
//! A [`Template`] is instantiated once per stack kind it applies to; a
//! [`FixedSpec`] describes a single instruction tied to particular stacks.

mod code;
mod common;
mod exec;
mod io;
mod logical;
mod numeric;
mod text;
mod vector;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::ToPrimitive;
use push_core::{Executable, Instruction, StackKind, StackOp, State, Value};

/// Every kind except exec
pub(crate) const NON_EXEC: [StackKind; 10] = [
    StackKind::Boolean,
    StackKind::Char,
    StackKind::Integer,
    StackKind::Float,
    StackKind::String,
    StackKind::BooleanVector,
    StackKind::IntegerVector,
    StackKind::FloatVector,
    StackKind::StringVector,
    StackKind::Code,
];

/// A stack a template depends on, resolved per target kind
#[derive(Debug, Clone, Copy)]
pub(crate) enum Dep {
    /// The kind the template is instantiated for
    Target,
    /// The element kind of a vector target
    Element,
    Kind(StackKind),
}

/// A generic instruction, instantiated once per kind in `kinds`
pub(crate) struct Template {
    /// Instruction name with `{}` standing for the kind name
    pub pattern: &'static str,
    pub kinds: &'static [StackKind],
    pub requires: &'static [Dep],
    /// Block arity of the exec instantiation; other kinds open no blocks
    pub exec_blocks: usize,
    pub op: StackOp,
}

impl Template {
    pub fn new(
        pattern: &'static str,
        kinds: &'static [StackKind],
        requires: &'static [Dep],
        op: StackOp,
    ) -> Self {
        Self {
            pattern,
            kinds,
            requires,
            exec_blocks: 0,
            op,
        }
    }

    pub fn with_exec_blocks(mut self, blocks: usize) -> Self {
        self.exec_blocks = blocks;
        self
    }

    pub fn name(&self, kind: StackKind) -> String {
        self.pattern.replace("{}", kind.name())
    }

    pub fn instantiate(&self, kind: StackKind) -> Instruction {
        let requires: Vec<StackKind> = self
            .requires
            .iter()
            .filter_map(|dep| match dep {
                Dep::Target => Some(kind),
                Dep::Element => kind.element(),
                Dep::Kind(k) => Some(*k),
            })
            .collect();
        let code_blocks = if kind == StackKind::Exec {
            self.exec_blocks
        } else {
            0
        };
        Instruction::new(
            self.name(kind),
            &requires,
            code_blocks,
            Executable::Generic {
                target: kind,
                op: self.op,
            },
        )
    }
}

/// A single instruction bound to specific stacks
pub(crate) struct FixedSpec {
    pub name: &'static str,
    pub requires: &'static [StackKind],
    pub code_blocks: usize,
    pub executable: Executable,
}

impl FixedSpec {
    pub fn new(name: &'static str, requires: &'static [StackKind], executable: Executable) -> Self {
        Self {
            name,
            requires,
            code_blocks: 0,
            executable,
        }
    }

    pub fn with_blocks(mut self, blocks: usize) -> Self {
        self.code_blocks = blocks;
        self
    }

    pub fn build(self) -> Instruction {
        Instruction::new(self.name, self.requires, self.code_blocks, self.executable)
    }
}

/// A named group of templates and fixed instructions
pub(crate) struct Family {
    pub name: &'static str,
    pub templates: Vec<Template>,
    pub fixed: Vec<FixedSpec>,
}

pub(crate) fn families() -> Vec<Family> {
    vec![
        common::family(),
        numeric::family(),
        logical::family(),
        text::family(),
        vector::family(),
        exec::family(),
        code::family(),
        io::family(),
    ]
}

/// Replace the top two items of `kind` with `f(second, top)`. A `None` or
/// out-of-limits result leaves the state untouched.
pub(crate) fn apply_binary<F>(state: &mut State, kind: StackKind, f: F)
where
    F: FnOnce(&Value, &Value) -> Option<Value>,
{
    let stack = state.stack(kind);
    let (Some(top), Some(second)) = (stack.nth(0), stack.nth(1)) else {
        return;
    };
    let Some(result) = f(second, top) else {
        return;
    };
    if !state.admits(&result) {
        return;
    }
    let stack = state.stack_mut(kind);
    stack.pop();
    stack.pop();
    state.push(result);
}

/// Replace the top item of `kind` with `f(top)`, under the same rules as
/// [`apply_binary`].
pub(crate) fn apply_unary<F>(state: &mut State, kind: StackKind, f: F)
where
    F: FnOnce(&Value) -> Option<Value>,
{
    let Some(top) = state.top(kind) else {
        return;
    };
    let Some(result) = f(top) else {
        return;
    };
    if !state.admits(&result) {
        return;
    }
    state.pop(kind);
    state.push(result);
}

/// Clamp an index into `0..=max`
pub(crate) fn clamp_index(i: &BigInt, max: usize) -> usize {
    if i.sign() == Sign::Minus {
        0
    } else {
        i.to_usize().map_or(max, |v| v.min(max))
    }
}

/// A non-negative count; negatives are 0, huge values saturate
pub(crate) fn to_count(n: &BigInt) -> usize {
    if n.sign() == Sign::Minus {
        0
    } else {
        n.to_usize().unwrap_or(usize::MAX)
    }
}

/// `i` modulo `len`, for `len > 0`
pub(crate) fn wrap_index(i: &BigInt, len: usize) -> usize {
    i.mod_floor(&BigInt::from(len)).to_usize().unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::InstructionSet;
    use push_core::{Code, Instruction, State};

    /// Run one instruction the way the interpreter does: a no-op unless ready
    pub fn run(set: &InstructionSet, name: &str, state: &mut State) {
        let instruction = set
            .get(name)
            .unwrap_or_else(|| panic!("missing instruction {}", name));
        if instruction.is_ready(state) {
            Instruction::execute(instruction, state);
        }
    }

    pub fn core_set() -> InstructionSet {
        InstructionSet::core().unwrap()
    }

    /// Code item referring to a registered instruction
    pub fn op(set: &InstructionSet, name: &str) -> Code {
        Code::Instruction(
            set.get(name)
                .cloned()
                .unwrap_or_else(|| panic!("missing instruction {}", name)),
        )
    }

    /// Drain the exec stack like the interpreter loop, for at most `limit` steps
    pub fn exhaust(state: &mut State, limit: usize) -> usize {
        let mut steps = 0;
        while steps < limit {
            let Some(code) = state.pop_exec() else {
                break;
            };
            steps += 1;
            match code {
                Code::Literal(value) => state.push(value),
                Code::Block(block) => state.load_program(&block),
                Code::Instruction(instruction) => {
                    if instruction.is_ready(state) {
                        Instruction::execute(&instruction, state);
                    }
                }
            }
        }
        steps
    }
}
