//! Control flow through the exec stack.
//!
//! The block following one of these instructions in a program is the item on
//! top of the exec stack when it runs. Looping forms push themselves back
//! onto the exec stack; the interpreter's step budget bounds them.

use super::{Family, FixedSpec};
use num_bigint::{BigInt, Sign};
use num_traits::One;
use push_core::{Code, CodeBlock, Executable, Instruction, StackKind, State, Value};
use std::cmp::Ordering;
use std::sync::Arc;

const EXEC: &[StackKind] = &[StackKind::Exec];
const EXEC2: &[StackKind] = &[StackKind::Exec, StackKind::Exec];

pub(crate) fn family() -> Family {
    Family {
        name: "exec",
        templates: Vec::new(),
        fixed: vec![
            FixedSpec::new(
                "exec_if",
                &[StackKind::Boolean, StackKind::Exec, StackKind::Exec],
                Executable::Fixed(exec_if),
            )
            .with_blocks(2),
            FixedSpec::new(
                "exec_when",
                &[StackKind::Boolean, StackKind::Exec],
                Executable::Fixed(exec_when),
            )
            .with_blocks(1),
            FixedSpec::new("exec_while", EXEC, Executable::Recursive(exec_while)).with_blocks(1),
            FixedSpec::new(
                "exec_do_range",
                &[StackKind::Integer, StackKind::Integer, StackKind::Exec],
                Executable::Recursive(exec_do_range),
            )
            .with_blocks(1),
            FixedSpec::new(
                "exec_do_times",
                &[StackKind::Integer, StackKind::Exec],
                Executable::Recursive(exec_do_times),
            )
            .with_blocks(1),
            FixedSpec::new("exec_k", EXEC2, Executable::Fixed(exec_k)).with_blocks(2),
            FixedSpec::new(
                "exec_s",
                &[StackKind::Exec, StackKind::Exec, StackKind::Exec],
                Executable::Fixed(exec_s),
            )
            .with_blocks(3),
            FixedSpec::new("exec_y", EXEC, Executable::Recursive(exec_y)).with_blocks(1),
            FixedSpec::new("exec_noop", &[], Executable::Fixed(|_| {})),
        ],
    }
}

fn exec_item(state: &State, depth: usize) -> Option<Code> {
    state
        .stack(StackKind::Exec)
        .nth(depth)
        .and_then(Value::as_code)
        .cloned()
}

/// True keeps the first branch and drops the second; false drops the first
fn exec_if(state: &mut State) {
    let Some(condition) = state.pop_bool() else {
        return;
    };
    let drop_depth = if condition { 1 } else { 0 };
    state.stack_mut(StackKind::Exec).remove(drop_depth);
}

fn exec_when(state: &mut State) {
    let Some(condition) = state.pop_bool() else {
        return;
    };
    if !condition {
        state.pop_exec();
    }
}

/// Runs the body while the boolean on top is true. An empty boolean stack
/// ends the loop.
fn exec_while(state: &mut State, this: &Arc<Instruction>) {
    if !state.pop_bool().unwrap_or(false) {
        state.pop_exec();
        return;
    }
    let Some(body) = exec_item(state, 0) else {
        return;
    };
    state.push_exec(Code::Instruction(Arc::clone(this)));
    state.push_exec(body);
}

/// Counts from the second integer toward the top one, pushing the current
/// index before each run of the body.
fn exec_do_range(state: &mut State, this: &Arc<Instruction>) {
    let (Some(destination), Some(current)) = (state.pop_integer(), state.pop_integer()) else {
        return;
    };
    let Some(body) = state.pop_exec() else {
        return;
    };
    // Step one index toward the destination; equal means this is the last pass
    let next = match current.cmp(&destination) {
        Ordering::Less => Some(&current + 1),
        Ordering::Greater => Some(&current - 1),
        Ordering::Equal => None,
    };
    // Schedule the next iteration beneath the body
    if let Some(next) = next {
        state.push_exec(Code::Block(CodeBlock::with_items(vec![
            Code::literal(next),
            Code::literal(destination),
            Code::Instruction(Arc::clone(this)),
            body.clone(),
        ])));
    }
    // Current index is visible to the body
    state.push(Value::Integer(current));
    state.push_exec(body);
}

/// Runs the body n times; n <= 0 discards it
fn exec_do_times(state: &mut State, this: &Arc<Instruction>) {
    let Some(n) = state.pop_integer() else {
        return;
    };
    let Some(body) = state.pop_exec() else {
        return;
    };
    if n.sign() != Sign::Plus {
        return;
    }
    if !n.is_one() {
        state.push_exec(Code::Block(CodeBlock::with_items(vec![
            Code::literal(n - BigInt::one()),
            Code::Instruction(Arc::clone(this)),
            body.clone(),
        ])));
    }
    state.push_exec(body);
}

/// Keep the top item and discard the one beneath it
fn exec_k(state: &mut State) {
    state.stack_mut(StackKind::Exec).remove(1);
}

/// With a, b, c from the top down, leaves a, c, (b c)
fn exec_s(state: &mut State) {
    let (Some(a), Some(b), Some(c)) = (exec_item(state, 0), exec_item(state, 1), exec_item(state, 2))
    else {
        return;
    };
    let bc = Code::Block(CodeBlock::with_items(vec![b, c.clone()]));
    if !state.admits(&Value::from(bc.clone())) {
        return;
    }
    for _ in 0..3 {
        state.pop_exec();
    }
    state.push_exec(bc);
    state.push_exec(c);
    state.push_exec(a);
}

/// Replaces X with X followed by (exec_y X)
fn exec_y(state: &mut State, this: &Arc<Instruction>) {
    let Some(body) = exec_item(state, 0) else {
        return;
    };
    let again = Code::Block(CodeBlock::with_items(vec![
        Code::Instruction(Arc::clone(this)),
        body.clone(),
    ]));
    if !state.admits(&Value::from(again.clone())) {
        return;
    }
    state.pop_exec();
    state.push_exec(again);
    state.push_exec(body);
}

#[cfg(test)]
mod tests {
    use super::super::testing::{core_set, exhaust, op, run};
    use super::*;

    fn lit(v: impl Into<Value>) -> Code {
        Code::literal(v)
    }

    fn block(items: Vec<Code>) -> Code {
        Code::Block(CodeBlock::with_items(items))
    }

    fn load(state: &mut State, items: Vec<Code>) {
        state.load_program(&CodeBlock::with_items(items));
    }

    fn integers(state: &State) -> Vec<Value> {
        state.stack(StackKind::Integer).to_vec()
    }

    #[test]
    fn test_block_arities() {
        let set = core_set();
        let arity = |name: &str| set.get(name).map(|i| i.code_blocks());
        assert_eq!(arity("exec_if"), Some(2));
        assert_eq!(arity("exec_s"), Some(3));
        assert_eq!(arity("exec_do_range"), Some(1));
        assert_eq!(arity("exec_noop"), Some(0));
    }

    #[test]
    fn test_if_branches() {
        let set = core_set();
        for (condition, expected) in [(true, 1i64), (false, 2i64)] {
            let mut state = State::new();
            state.push(Value::from(condition));
            load(&mut state, vec![op(&set, "exec_if"), lit(1i64), lit(2i64)]);
            exhaust(&mut state, 100);
            assert_eq!(integers(&state), vec![Value::from(expected)]);
        }
    }

    #[test]
    fn test_if_without_boolean_runs_both() {
        let set = core_set();
        let mut state = State::new();
        load(&mut state, vec![op(&set, "exec_if"), lit(1i64), lit(2i64)]);
        exhaust(&mut state, 100);
        assert_eq!(integers(&state), vec![Value::from(2i64), Value::from(1i64)]);
    }

    #[test]
    fn test_when() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::from(false));
        load(&mut state, vec![op(&set, "exec_when"), lit(1i64), lit(2i64)]);
        exhaust(&mut state, 100);
        assert_eq!(integers(&state), vec![Value::from(2i64)]);
    }

    #[test]
    fn test_do_range_counts_up_and_down() {
        let set = core_set();
        let mut state = State::new();
        load(
            &mut state,
            vec![lit(1i64), lit(3i64), op(&set, "exec_do_range"), block(vec![])],
        );
        exhaust(&mut state, 100);
        // 1, 2, 3 pushed in order
        assert_eq!(
            integers(&state),
            vec![Value::from(3i64), Value::from(2i64), Value::from(1i64)]
        );

        let mut state = State::new();
        load(
            &mut state,
            vec![lit(2i64), lit(0i64), op(&set, "exec_do_range"), op(&set, "integer_pop")],
        );
        exhaust(&mut state, 100);
        assert!(integers(&state).is_empty());
    }

    #[test]
    fn test_do_times() {
        let set = core_set();
        let mut state = State::new();
        load(
            &mut state,
            vec![lit(3i64), op(&set, "exec_do_times"), lit(7i64)],
        );
        exhaust(&mut state, 100);
        assert_eq!(integers(&state), vec![Value::from(7i64); 3]);

        let mut state = State::new();
        load(
            &mut state,
            vec![lit(0i64), op(&set, "exec_do_times"), lit(7i64)],
        );
        exhaust(&mut state, 100);
        assert!(integers(&state).is_empty());
    }

    #[test]
    fn test_while_stops_on_false() {
        let set = core_set();
        let mut state = State::new();
        state.extend([Value::from(false), Value::from(true), Value::from(true)]);
        load(&mut state, vec![op(&set, "exec_while"), lit(5i64)]);
        exhaust(&mut state, 100);
        assert_eq!(integers(&state), vec![Value::from(5i64); 2]);
        assert!(state.stack(StackKind::Exec).is_empty());
    }

    #[test]
    fn test_while_on_empty_booleans_skips_body() {
        let set = core_set();
        let mut state = State::new();
        load(&mut state, vec![op(&set, "exec_while"), lit(5i64)]);
        exhaust(&mut state, 100);
        assert!(integers(&state).is_empty());
    }

    #[test]
    fn test_k_and_s() {
        let set = core_set();
        let mut state = State::new();
        load(&mut state, vec![op(&set, "exec_k"), lit(1i64), lit(2i64)]);
        exhaust(&mut state, 100);
        assert_eq!(integers(&state), vec![Value::from(1i64)]);

        // (exec_s a b c) runs a, c, b, c
        let mut state = State::new();
        load(
            &mut state,
            vec![op(&set, "exec_s"), lit(1i64), lit(2i64), lit(3i64)],
        );
        exhaust(&mut state, 100);
        assert_eq!(
            integers(&state),
            vec![
                Value::from(3i64),
                Value::from(2i64),
                Value::from(3i64),
                Value::from(1i64)
            ]
        );
    }

    #[test]
    fn test_y_repeats_until_budget() {
        let set = core_set();
        let mut state = State::new();
        load(&mut state, vec![op(&set, "exec_y"), lit(1i64)]);
        let steps = exhaust(&mut state, 50);
        assert_eq!(steps, 50);
        assert!(state.depth(StackKind::Integer) > 5);
    }

    #[test]
    fn test_noop() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::from(1i64));
        run(&set, "exec_noop", &mut state);
        assert_eq!(state.size(), 1);
    }
}
