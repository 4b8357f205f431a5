//! Core types for the Push interpreter: values, code, stacks, machine state,
//! and instruction descriptors.

pub mod value;
pub mod code;
pub mod stack;
pub mod state;
pub mod instruction;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use value::{StackKind, Value};
pub use code::{Code, CodeBlock, Program};
pub use stack::Stack;
pub use state::{Inputs, State};
pub use instruction::{Executable, Instruction, RecursiveOp, StackOp, StateOp};
pub use config::*;
