//! The instruction set: every template crossed with its kinds, plus fixed
//! and input instructions, in one immutable lookup table.

use crate::templates::families;
use push_core::{
    Error, Executable, Instruction, InstructionSetConfig, Result, StackKind,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Name-indexed instruction table. Built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct InstructionSet {
    instructions: Vec<Arc<Instruction>>,
    by_name: HashMap<String, usize>,
}

impl InstructionSet {
    /// Synthesise every instruction family, then one `input_<name>`
    /// instruction per configured input.
    pub fn new(config: &InstructionSetConfig) -> Result<Self> {
        let mut set = Self::default();

        for family in families() {
            let before = set.len();
            for template in &family.templates {
                for kind in template.kinds {
                    set.insert(template.instantiate(*kind))?;
                }
            }
            for spec in family.fixed {
                set.insert(spec.build())?;
            }
            debug!(
                family = family.name,
                instructions = set.len() - before,
                "Synthesized instruction family"
            );
        }

        for name in &config.inputs {
            set.insert(Instruction::new(
                format!("input_{}", name),
                &[],
                0,
                Executable::Input(name.clone()),
            ))?;
        }

        info!(
            instructions = set.len(),
            inputs = config.inputs.len(),
            "Instruction set ready"
        );
        Ok(set)
    }

    /// The built-in instructions with no inputs
    pub fn core() -> Result<Self> {
        Self::new(&InstructionSetConfig::default())
    }

    fn insert(&mut self, instruction: Instruction) -> Result<()> {
        if self.by_name.contains_key(instruction.name()) {
            return Err(Error::DuplicateInstruction(instruction.name().to_string()));
        }
        self.by_name
            .insert(instruction.name().to_string(), self.instructions.len());
        self.instructions.push(Arc::new(instruction));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Instruction>> {
        self.by_name.get(name).map(|&i| &self.instructions[i])
    }

    /// Like [`get`](Self::get), but an unknown name is an error
    pub fn lookup(&self, name: &str) -> Result<&Arc<Instruction>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownInstruction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Instructions in synthesis order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Instruction>> + '_ {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.instructions.iter().map(|i| i.name())
    }

    /// Instructions whose required stacks are all among `kinds`. Used to
    /// restrict sampling to the types a problem actually uses.
    pub fn supported_by(&self, kinds: &[StackKind]) -> Vec<&Arc<Instruction>> {
        self.instructions
            .iter()
            .filter(|i| i.requires().iter().all(|(kind, _)| kinds.contains(kind)))
            .collect()
    }
}
