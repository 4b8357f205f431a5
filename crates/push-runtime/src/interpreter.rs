//! The exec-stack interpreter.

use push_core::{Code, Inputs, Instruction, InterpreterConfig, Program, Result, StackKind, State};
use push_ir::{translate, validate_genome, Genome, InstructionSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The exec stack emptied
    Completed,
    /// The step budget ran out first
    StepLimit,
}

/// The outcome of one run. Both halt reasons leave a usable state.
#[derive(Debug, Clone)]
pub struct Execution {
    pub state: State,
    /// Exec items processed, including literals and no-ops
    pub steps: usize,
    pub halt: Halt,
}

/// Runs programs under a fixed configuration
#[derive(Debug, Clone)]
pub struct Interpreter {
    instructions: Arc<InstructionSet>,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(instructions: Arc<InstructionSet>, config: InterpreterConfig) -> Self {
        Self {
            instructions,
            config,
        }
    }

    pub fn instructions(&self) -> &InstructionSet {
        &self.instructions
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Run `program` on `state` under the configured step limit and value limits
    #[instrument(
        skip_all,
        fields(step_limit = self.config.step_limit, program_size = program.size())
    )]
    pub fn run(&self, program: &Program, mut state: State) -> Execution {
        state.set_limits(self.config.limits);
        let execution = execute(program, state, self.config.step_limit);
        debug!(steps = execution.steps, halt = ?execution.halt, "Program halted");
        execution
    }

    /// Validate and translate `genome`, then run it on a fresh state bound to `inputs`
    pub fn run_genome(&self, genome: &Genome, inputs: impl Into<Arc<Inputs>>) -> Result<Execution> {
        validate_genome(genome, &self.instructions)?;
        let program = translate(genome);
        Ok(self.run(&program, State::with_inputs(inputs)))
    }
}

/// Run `program` on `state` for at most `step_limit` steps and return the final state
pub fn interpret(program: &Program, state: State, step_limit: usize) -> State {
    execute(program, state, step_limit).state
}

fn execute(program: &Program, mut state: State, step_limit: usize) -> Execution {
    state.load_program(program);
    let mut steps = 0;
    let halt = loop {
        if state.stack(StackKind::Exec).is_empty() {
            break Halt::Completed;
        }
        if steps >= step_limit {
            break Halt::StepLimit;
        }
        let Some(code) = state.pop_exec() else {
            break Halt::Completed;
        };
        steps += 1;
        step(&mut state, code);
    };
    Execution { state, steps, halt }
}

fn step(state: &mut State, code: Code) {
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
