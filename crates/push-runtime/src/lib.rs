//! Execution of Push programs.
//!
//! An [`Interpreter`] runs a program against a machine state by repeatedly
//! popping the exec stack. Every run terminates: the step budget bounds
//! even self-expanding code, and instructions that cannot run are no-ops.

pub mod interpreter;

pub use interpreter::{interpret, Execution, Halt, Interpreter};
