//! Boolean logic.

use super::{apply_binary, apply_unary, Family, FixedSpec};
use num_traits::Zero;
use push_core::{Executable, StackKind, State, Value};

const BOOL2: &[StackKind] = &[StackKind::Boolean, StackKind::Boolean];

pub(crate) fn family() -> Family {
    Family {
        name: "logical",
        templates: Vec::new(),
        fixed: vec![
            FixedSpec::new("boolean_and", BOOL2, Executable::Fixed(and)),
            FixedSpec::new("boolean_or", BOOL2, Executable::Fixed(or)),
            FixedSpec::new("boolean_xor", BOOL2, Executable::Fixed(xor)),
            FixedSpec::new(
                "boolean_invert_first_then_and",
                BOOL2,
                Executable::Fixed(invert_first_then_and),
            ),
            FixedSpec::new(
                "boolean_invert_second_then_and",
                BOOL2,
                Executable::Fixed(invert_second_then_and),
            ),
            FixedSpec::new("boolean_not", &[StackKind::Boolean], Executable::Fixed(not)),
            FixedSpec::new(
                "boolean_from_integer",
                &[StackKind::Integer],
                Executable::Fixed(from_integer),
            ),
            FixedSpec::new(
                "boolean_from_float",
                &[StackKind::Float],
                Executable::Fixed(from_float),
            ),
        ],
    }
}

/// `f(second, top)` over the top two booleans
fn logic(state: &mut State, f: fn(bool, bool) -> bool) {
    apply_binary(state, StackKind::Boolean, |second, top| {
        Some(Value::Boolean(f(second.as_bool()?, top.as_bool()?)))
    });
}

fn and(state: &mut State) {
    logic(state, |a, b| a && b);
}

fn or(state: &mut State) {
    logic(state, |a, b| a || b);
}

fn xor(state: &mut State) {
    logic(state, |a, b| a != b);
}

// "first" is the top item
fn invert_first_then_and(state: &mut State) {
    logic(state, |second, top| !top && second);
}

fn invert_second_then_and(state: &mut State) {
    logic(state, |second, top| top && !second);
}

fn not(state: &mut State) {
    apply_unary(state, StackKind::Boolean, |top| Some(Value::Boolean(!top.as_bool()?)));
}

fn from_integer(state: &mut State) {
    apply_unary(state, StackKind::Integer, |top| {
        Some(Value::Boolean(!top.as_integer()?.is_zero()))
    });
}

fn from_float(state: &mut State) {
    apply_unary(state, StackKind::Float, |top| Some(Value::Boolean(top.as_float()? != 0.0)));
}

#[cfg(test)]
mod tests {
    use super::super::testing::{core_set, run};
    use super::*;

    fn eval(name: &str, second: bool, top: bool) -> Vec<Value> {
        let set = core_set();
        let mut state = State::new();
        state.extend([Value::from(second), Value::from(top)]);
        run(&set, name, &mut state);
        state.stack(StackKind::Boolean).to_vec()
    }

    #[test]
    fn test_binary_logic() {
        assert_eq!(eval("boolean_and", true, false), vec![false.into()]);
        assert_eq!(eval("boolean_or", true, false), vec![true.into()]);
        assert_eq!(eval("boolean_xor", true, true), vec![false.into()]);
        assert_eq!(eval("boolean_invert_first_then_and", true, false), vec![true.into()]);
        assert_eq!(eval("boolean_invert_second_then_and", true, false), vec![false.into()]);
        assert_eq!(eval("boolean_invert_second_then_and", false, true), vec![true.into()]);
    }

    #[test]
    fn test_not_and_conversions() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::from(false));
        run(&set, "boolean_not", &mut state);
        assert_eq!(state.top_bool(), Some(true));

        state.push(Value::from(0i64));
        run(&set, "boolean_from_integer", &mut state);
        assert_eq!(state.top_bool(), Some(false));

        state.push(Value::from(-0.1));
        run(&set, "boolean_from_float", &mut state);
        assert_eq!(state.top_bool(), Some(true));
        assert_eq!(state.depth(StackKind::Boolean), 3);
    }

    #[test]
    fn test_and_needs_two() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::from(true));
        run(&set, "boolean_and", &mut state);
        assert_eq!(state.stack(StackKind::Boolean).to_vec(), vec![Value::from(true)]);
    }
}
