//! Instructions over the four vector kinds.

use super::{apply_binary, apply_unary, clamp_index, wrap_index, Dep, Family, Template};
use push_core::{StackKind, State, Value};

const VECTORS: &[StackKind] = &StackKind::VECTORS;
const INT: Dep = Dep::Kind(StackKind::Integer);
const T: Dep = Dep::Target;
const E: Dep = Dep::Element;

pub(crate) fn family() -> Family {
    Family {
        name: "vector",
        templates: vec![
            Template::new("{}_concat", VECTORS, &[T, T], concat),
            Template::new("{}_conj", VECTORS, &[T, E], conj),
            Template::new("{}_length", VECTORS, &[T], length),
            Template::new("{}_first", VECTORS, &[T], first),
            Template::new("{}_last", VECTORS, &[T], last),
            Template::new("{}_nth", VECTORS, &[INT, T], nth),
            Template::new("{}_rest", VECTORS, &[T], rest),
            Template::new("{}_butlast", VECTORS, &[T], butlast),
            Template::new("{}_reverse", VECTORS, &[T], reverse),
            Template::new("{}_take", VECTORS, &[INT, T], take),
            Template::new("{}_contains", VECTORS, &[T, E], contains),
            Template::new("{}_pushall", VECTORS, &[T], push_all),
            Template::new("{}_new", VECTORS, &[], new_vector),
        ],
        fixed: Vec::new(),
    }
}

/// Rebuild the top vector from its elements after `f` reshapes them
fn reshape<F>(state: &mut State, kind: StackKind, f: F)
where
    F: FnOnce(Vec<Value>) -> Vec<Value>,
{
    apply_unary(state, kind, |top| {
        let elements = top.clone().into_elements()?;
        Value::vector(kind, f(elements))
    });
}

/// Replace the top vector with one of its elements
fn extract<F>(state: &mut State, kind: StackKind, pick: F)
where
    F: FnOnce(usize) -> Option<usize>,
{
    apply_unary(state, kind, |top| top.element(pick(top.size())?));
}

fn concat(state: &mut State, kind: StackKind) {
    apply_binary(state, kind, |second, top| {
        let mut elements = second.clone().into_elements()?;
        elements.extend(top.clone().into_elements()?);
        Value::vector(kind, elements)
    });
}

/// Append the top element to the top vector
fn conj(state: &mut State, kind: StackKind) {
    let Some(element_kind) = kind.element() else {
        return;
    };
    let (Some(vector), Some(element)) = (state.top(kind), state.top(element_kind)) else {
        return;
    };
    let Some(mut elements) = vector.clone().into_elements() else {
        return;
    };
    elements.push(element.clone());
    let Some(result) = Value::vector(kind, elements) else {
        return;
    };
    if !state.admits(&result) {
        return;
    }
    state.pop(element_kind);
    state.pop(kind);
    state.push(result);
}

fn length(state: &mut State, kind: StackKind) {
    let Some(vector) = state.pop(kind) else {
        return;
    };
    state.push(Value::integer(vector.size()));
}

fn first(state: &mut State, kind: StackKind) {
    extract(state, kind, |len| (len > 0).then_some(0));
}

fn last(state: &mut State, kind: StackKind) {
    extract(state, kind, |len| len.checked_sub(1));
}

/// Element at the popped index, taken modulo the length. Empty vectors keep the index.
fn nth(state: &mut State, kind: StackKind) {
    let len = state.top(kind).map_or(0, Value::size);
    if len == 0 {
        return;
    }
    let Some(n) = state.pop_integer() else {
        return;
    };
    let index = wrap_index(&n, len);
    extract(state, kind, |_| Some(index));
}

fn rest(state: &mut State, kind: StackKind) {
    reshape(state, kind, |mut elements| {
        if !elements.is_empty() {
            elements.remove(0);
        }
        elements
    });
}

fn butlast(state: &mut State, kind: StackKind) {
    reshape(state, kind, |mut elements| {
        elements.pop();
        elements
    });
}

fn reverse(state: &mut State, kind: StackKind) {
    reshape(state, kind, |mut elements| {
        elements.reverse();
        elements
    });
}

fn take(state: &mut State, kind: StackKind) {
    let Some(n) = state.pop_integer() else {
        return;
    };
    reshape(state, kind, |mut elements| {
        elements.truncate(clamp_index(&n, elements.len()));
        elements
    });
}

fn contains(state: &mut State, kind: StackKind) {
    let Some(element_kind) = kind.element() else {
        return;
    };
    let (Some(element), Some(vector)) = (state.pop(element_kind), state.pop(kind)) else {
        return;
    };
    let found = vector
        .into_elements()
        .is_some_and(|elements| elements.contains(&element));
    state.push(Value::Boolean(found));
}

/// Push every element; the first element ends on top
fn push_all(state: &mut State, kind: StackKind) {
    let Some(elements) = state.pop(kind).and_then(Value::into_elements) else {
        return;
    };
    for element in elements.into_iter().rev() {
        state.push(element);
    }
}

fn new_vector(state: &mut State, kind: StackKind) {
    if let Some(empty) = Value::vector(kind, Vec::new()) {
        state.push(empty);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{core_set, run};
    use super::*;
    use num_bigint::BigInt;
    use proptest::prelude::*;
    use push_core::Limits;

    fn ints(values: &[i64]) -> Value {
        Value::IntegerVector(values.iter().map(|v| BigInt::from(*v)).collect())
    }

    #[test]
    fn test_counts() {
        let set = core_set();
        for kind in StackKind::VECTORS {
            assert!(set.contains(&format!("{}_pushall", kind.name())));
            assert!(set.contains(&format!("{}_new", kind.name())));
        }
        assert!(!set.contains("integer_pushall"));
    }

    #[test]
    fn test_concat_and_conj() {
        let set = core_set();
        let mut state = State::new();
        state.extend([ints(&[1, 2]), ints(&[3])]);
        run(&set, "vector_integer_concat", &mut state);
        assert_eq!(state.top(StackKind::IntegerVector), Some(&ints(&[1, 2, 3])));

        state.push(Value::from(4i64));
        run(&set, "vector_integer_conj", &mut state);
        assert_eq!(state.top(StackKind::IntegerVector), Some(&ints(&[1, 2, 3, 4])));
        assert_eq!(state.depth(StackKind::Integer), 0);
    }

    #[test]
    fn test_conj_respects_cap() {
        let set = core_set();
        let mut state = State::new().with_limits(Limits {
            collection_size_cap: 2,
            ..Limits::default()
        });
        state.extend([Value::BooleanVector(vec![true, true]), Value::from(false)]);
        run(&set, "vector_boolean_conj", &mut state);
        assert_eq!(state.depth(StackKind::Boolean), 1);
        assert_eq!(
            state.top(StackKind::BooleanVector),
            Some(&Value::BooleanVector(vec![true, true]))
        );
    }

    #[test]
    fn test_element_access() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::FloatVector(vec![1.5, 2.5, 3.5]));
        run(&set, "vector_float_dup", &mut state);
        run(&set, "vector_float_last", &mut state);
        assert_eq!(state.top_float(), Some(3.5));

        state.push(Value::from(4i64));
        run(&set, "vector_float_nth", &mut state);
        assert_eq!(state.top_float(), Some(2.5));
        assert_eq!(state.depth(StackKind::FloatVector), 0);

        // Empty vectors have no first element
        state.push(Value::FloatVector(vec![]));
        run(&set, "vector_float_first", &mut state);
        assert_eq!(state.depth(StackKind::FloatVector), 1);
        assert_eq!(state.depth(StackKind::Float), 2);
    }

    #[test]
    fn test_reshaping() {
        let set = core_set();
        let mut state = State::new();
        state.push(ints(&[1, 2, 3, 4]));
        run(&set, "vector_integer_rest", &mut state);
        run(&set, "vector_integer_butlast", &mut state);
        assert_eq!(state.top(StackKind::IntegerVector), Some(&ints(&[2, 3])));

        run(&set, "vector_integer_reverse", &mut state);
        assert_eq!(state.top(StackKind::IntegerVector), Some(&ints(&[3, 2])));

        state.push(Value::from(1i64));
        run(&set, "vector_integer_take", &mut state);
        assert_eq!(state.top(StackKind::IntegerVector), Some(&ints(&[3])));

        run(&set, "vector_integer_length", &mut state);
        assert_eq!(state.top_integer(), Some(&BigInt::from(1)));
    }

    #[test]
    fn test_contains_and_push_all() {
        let set = core_set();
        let mut state = State::new();
        state.push(Value::StringVector(vec!["a".into(), "b".into()]));
        run(&set, "vector_string_dup", &mut state);
        state.push(Value::from("b"));
        run(&set, "vector_string_contains", &mut state);
        assert_eq!(state.top_bool(), Some(true));

        run(&set, "vector_string_pushall", &mut state);
        assert_eq!(
            state.stack(StackKind::String).to_vec(),
            vec![Value::from("a"), Value::from("b")]
        );
        assert_eq!(state.depth(StackKind::StringVector), 0);
    }

    proptest! {
        #[test]
        fn prop_take_never_grows(values in prop::collection::vec(any::<i64>(), 0..20), n in any::<i64>()) {
            let set = core_set();
            let mut state = State::new();
            state.push(ints(&values));
            state.push(Value::from(n));
            run(&set, "vector_integer_take", &mut state);
            let size = state.top(StackKind::IntegerVector).map_or(0, Value::size);
            prop_assert!(size <= values.len());
        }
    }
}
