//! Flat genomes as produced by variation operators.

use crate::registry::InstructionSet;
use push_core::{Code, Instruction, Result, Value};
use std::fmt;
use std::sync::Arc;

/// One element of a linear genome
#[derive(Debug, Clone, PartialEq)]
pub enum Gene {
    Literal(Value),
    Instruction(Arc<Instruction>),
    /// Ends the innermost open block during translation
    Close,
}

impl Gene {
    pub fn literal(value: impl Into<Value>) -> Self {
        Gene::Literal(value.into())
    }

    /// Gene referring to the named instruction in `set`
    pub fn instruction(set: &InstructionSet, name: &str) -> Result<Self> {
        Ok(Gene::Instruction(Arc::clone(set.lookup(name)?)))
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gene::Literal(value) => write!(f, "{}", Code::Literal(value.clone())),
            Gene::Instruction(instruction) => f.write_str(instruction.name()),
            Gene::Close => f.write_str("close"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genome {
    genes: Vec<Gene>,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn push(&mut self, gene: Gene) {
        self.genes.push(gene);
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Gene> {
        self.genes.iter()
    }
}

impl FromIterator<Gene> for Genome {
    fn from_iter<I: IntoIterator<Item = Gene>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Genome {
    type Item = &'a Gene;
    type IntoIter = std::slice::Iter<'a, Gene>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", gene)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use push_core::Error;

    #[test]
    fn test_instruction_gene() {
        let set = InstructionSet::core().unwrap();
        let gene = Gene::instruction(&set, "integer_add").unwrap();
        assert!(matches!(&gene, Gene::Instruction(i) if i.name() == "integer_add"));

        let err = Gene::instruction(&set, "integer_teleport").unwrap_err();
        assert!(matches!(err, Error::UnknownInstruction(_)));
    }

    #[test]
    fn test_display() {
        let set = InstructionSet::core().unwrap();
        let genome: Genome = vec![
            Gene::literal(3i64),
            Gene::literal("a b"),
            Gene::instruction(&set, "exec_dup").unwrap(),
            Gene::Close,
        ]
        .into_iter()
        .collect();
        assert_eq!(genome.len(), 4);
        assert_eq!(genome.to_string(), r#"[3 "a b" exec_dup close]"#);
    }
}
