//! Stack manipulation shared by every kind.

use super::{apply_binary, clamp_index, to_count, Dep, Family, Template};
use num_bigint::Sign;
use push_core::{StackKind, State, Value};

const ALL: &[StackKind] = &StackKind::ALL;
const INT: Dep = Dep::Kind(StackKind::Integer);
const T: Dep = Dep::Target;

pub(crate) fn family() -> Family {
    Family {
        name: "common",
        templates: vec![
            Template::new("{}_dup", ALL, &[], dup).with_exec_blocks(1),
            Template::new("{}_duptimes", ALL, &[INT, T], dup_times).with_exec_blocks(1),
            Template::new("{}_dupitems", ALL, &[INT], dup_items),
            Template::new("{}_empty", ALL, &[], empty),
            Template::new("{}_flush", ALL, &[], flush),
            Template::new("{}_pop", ALL, &[T], pop).with_exec_blocks(1),
            Template::new("{}_rot", ALL, &[T, T, T], rot).with_exec_blocks(3),
            Template::new("{}_shove", ALL, &[INT, T], shove).with_exec_blocks(1),
            Template::new("{}_stackdepth", ALL, &[], stack_depth),
            Template::new("{}_swap", ALL, &[T, T], swap).with_exec_blocks(2),
            Template::new("{}_yank", ALL, &[INT, T], yank),
            Template::new("{}_yankdup", ALL, &[INT, T], yank_dup),
            Template::new("{}_eq", &StackKind::LITERALS, &[T, T], eq),
        ],
        fixed: Vec::new(),
    }
}

fn dup(state: &mut State, kind: StackKind) {
    let stack = state.stack_mut(kind);
    if let Some(top) = stack.top().cloned() {
        stack.push(top);
    }
}

/// Pops n. n <= 0 pops the target; otherwise n - 1 copies of the top are pushed.
fn dup_times(state: &mut State, kind: StackKind) {
    let cap = state.limits().growth_cap;
    let Some(n) = state.pop_integer() else {
        return;
    };
    let stack = state.stack_mut(kind);
    let Some(top) = stack.top().cloned() else {
        return;
    };
    if n.sign() != Sign::Plus {
        stack.pop();
        return;
    }
    let copies = to_count(&n).saturating_sub(1).min(cap);
    for _ in 0..copies {
        stack.push(top.clone());
    }
}

/// Pops n and duplicates the top n items, keeping their order
fn dup_items(state: &mut State, kind: StackKind) {
    let cap = state.limits().growth_cap;
    let Some(n) = state.pop_integer() else {
        return;
    };
    let stack = state.stack_mut(kind);
    let count = to_count(&n).min(stack.len()).min(cap);
    let copies: Vec<Value> = stack.iter().take(count).cloned().collect();
    for value in copies.into_iter().rev() {
        stack.push(value);
    }
}

fn empty(state: &mut State, kind: StackKind) {
    let is_empty = state.stack(kind).is_empty();
    state.push(Value::Boolean(is_empty));
}

fn eq(state: &mut State, kind: StackKind) {
    apply_binary(state, kind, |second, top| Some(Value::Boolean(second == top)));
}

fn flush(state: &mut State, kind: StackKind) {
    state.stack_mut(kind).clear();
}

fn pop(state: &mut State, kind: StackKind) {
    state.stack_mut(kind).pop();
}

/// The third item moves to the top: (a b c ..) becomes (c a b ..)
fn rot(state: &mut State, kind: StackKind) {
    let stack = state.stack_mut(kind);
    if stack.len() < 3 {
        return;
    }
    if let Some(third) = stack.remove(2) {
        stack.push(third);
    }
}

/// Pops an index and moves the top item down to that depth
fn shove(state: &mut State, kind: StackKind) {
    let Some(i) = state.pop_integer() else {
        return;
    };
    let stack = state.stack_mut(kind);
    let Some(item) = stack.pop() else {
        return;
    };
    let depth = clamp_index(&i, stack.len());
    stack.insert(depth, item);
}

fn stack_depth(state: &mut State, kind: StackKind) {
    let depth = state.depth(kind);
    state.push(Value::integer(depth));
}

fn swap(state: &mut State, kind: StackKind) {
    let stack = state.stack_mut(kind);
    if stack.len() < 2 {
        return;
    }
    if let Some(second) = stack.remove(1) {
        stack.push(second);
    }
}

/// Pops an index and moves the item at that depth to the top
fn yank(state: &mut State, kind: StackKind) {
    let Some(i) = state.pop_integer() else {
        return;
    };
    let stack = state.stack_mut(kind);
    if stack.is_empty() {
        return;
    }
    let depth = clamp_index(&i, stack.len() - 1);
    if let Some(item) = stack.remove(depth) {
        stack.push(item);
    }
}

fn yank_dup(state: &mut State, kind: StackKind) {
    let Some(i) = state.pop_integer() else {
        return;
    };
    let stack = state.stack_mut(kind);
    if stack.is_empty() {
        return;
    }
    let depth = clamp_index(&i, stack.len() - 1);
    if let Some(item) = stack.nth(depth).cloned() {
        stack.push(item);
    }
}
