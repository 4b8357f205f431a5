//! Instruction synthesis and genome handling.
//!
//! The [`InstructionSet`] crosses generic instruction templates with the
//! stack kinds they apply to and adds the kind-specific families. Genomes
//! are flat gene sequences that [`translate`] turns into nested programs.

pub mod genome;
pub mod registry;
mod templates;
pub mod translate;
pub mod validation;

pub use genome::{Gene, Genome};
pub use registry::InstructionSet;
pub use translate::translate;
pub use validation::{validate_genome, validate_program};
