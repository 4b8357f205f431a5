//! Validation of genomes and programs against an instruction set.

use crate::genome::{Gene, Genome};
use crate::registry::InstructionSet;
use push_core::{Code, CodeBlock, Error, Instruction, Result, StackKind, Value};
use std::sync::Arc;

/// Check that every instruction gene belongs to `set` and every literal is
/// a plain value rather than embedded code.
pub fn validate_genome(genome: &Genome, set: &InstructionSet) -> Result<()> {
    for (index, gene) in genome.iter().enumerate() {
        match gene {
            Gene::Instruction(instruction) => check_instruction(instruction, set)?,
            Gene::Literal(value) => check_literal(value, index)?,
            Gene::Close => {}
        }
    }
    Ok(())
}

/// Check that every instruction referenced anywhere in `program` belongs to `set`
pub fn validate_program(program: &CodeBlock, set: &InstructionSet) -> Result<()> {
    for code in program.iter() {
        match code {
            Code::Instruction(instruction) => check_instruction(instruction, set)?,
            Code::Block(block) => validate_program(block, set)?,
            Code::Literal(_) => {}
        }
    }
    Ok(())
}

fn check_instruction(instruction: &Arc<Instruction>, set: &InstructionSet) -> Result<()> {
    let registered = set.lookup(instruction.name())?;
    if registered.code_blocks() != instruction.code_blocks() {
        return Err(Error::Validation(format!(
            "Instruction {} has block arity {}, expected {}",
            instruction.name(),
            instruction.code_blocks(),
            registered.code_blocks()
        )));
    }
    Ok(())
}

fn check_literal(value: &Value, index: usize) -> Result<()> {
    if value.kind() == StackKind::Code {
        return Err(Error::Validation(format!(
            "Gene {} is a code literal",
            index
        )));
    }
    Ok(())
}
