//! Code as data: quoting, inspecting, and running code values.

use super::{apply_binary, apply_unary, wrap_index, Dep, Family, FixedSpec, Template};
use push_core::{Code, CodeBlock, Executable, StackKind, State, Value};

const CODE: &[StackKind] = &[StackKind::Code];
const CODE2: &[StackKind] = &[StackKind::Code, StackKind::Code];

pub(crate) fn family() -> Family {
    Family {
        name: "code",
        templates: vec![Template::new(
            "code_from_{}",
            &StackKind::LITERALS,
            &[Dep::Target],
            quote,
        )],
        fixed: vec![
            FixedSpec::new("code_from_exec", &[StackKind::Exec], Executable::Fixed(from_exec))
                .with_blocks(1),
            FixedSpec::new("code_is_block", CODE, Executable::Fixed(is_block)),
            FixedSpec::new("code_is_singular", CODE, Executable::Fixed(is_singular)),
            FixedSpec::new("code_length", CODE, Executable::Fixed(length)),
            FixedSpec::new("code_first", CODE, Executable::Fixed(first)),
            FixedSpec::new("code_last", CODE, Executable::Fixed(last)),
            FixedSpec::new("code_rest", CODE, Executable::Fixed(rest)),
            FixedSpec::new("code_wrap", CODE, Executable::Fixed(wrap)),
            FixedSpec::new("code_list", CODE2, Executable::Fixed(list)),
            FixedSpec::new("code_combine", CODE2, Executable::Fixed(combine)),
            FixedSpec::new("code_do", CODE, Executable::Fixed(code_do)),
            FixedSpec::new(
                "code_if",
                &[StackKind::Boolean, StackKind::Code, StackKind::Code],
                Executable::Fixed(code_if),
            ),
            FixedSpec::new(
                "code_when",
                &[StackKind::Boolean, StackKind::Code],
                Executable::Fixed(code_when),
            ),
            FixedSpec::new("code_member", CODE2, Executable::Fixed(member)),
            FixedSpec::new(
                "code_nth",
                &[StackKind::Integer, StackKind::Code],
                Executable::Fixed(nth),
            ),
        ],
    }
}

/// The children of a block, or the atom itself
fn items(code: &Code) -> Vec<Code> {
    match code {
        Code::Block(block) => block.items().to_vec(),
        atom => vec![atom.clone()],
    }
}

fn block_of(items: Vec<Code>) -> Value {
    Value::from(Code::Block(CodeBlock::with_items(items)))
}

fn quote(state: &mut State, kind: StackKind) {
    apply_unary(state, kind, |top| Some(Value::from(Code::Literal(top.clone()))));
}

fn from_exec(state: &mut State) {
    if let Some(code) = state.pop_exec() {
        state.push(Value::from(code));
    }
}

/// Replace the top code value with `f(code)`
fn map_code<F>(state: &mut State, f: F)
where
    F: FnOnce(&Code) -> Option<Value>,
{
    apply_unary(state, StackKind::Code, |top| f(top.as_code()?));
}

fn is_block(state: &mut State) {
    map_code(state, |code| Some(Value::Boolean(code.is_block())));
}

fn is_singular(state: &mut State) {
    map_code(state, |code| Some(Value::Boolean(!code.is_block())));
}

/// Number of children of a block; atoms have length 1
fn length(state: &mut State) {
    map_code(state, |code| {
        let len = code.as_block().map_or(1, CodeBlock::len);
        Some(Value::integer(len))
    });
}

/// First child of a non-empty block
fn first(state: &mut State) {
    map_code(state, |code| {
        code.as_block()?.items().first().cloned().map(Value::from)
    });
}

fn last(state: &mut State) {
    map_code(state, |code| {
        code.as_block()?.items().last().cloned().map(Value::from)
    });
}

/// A block without its first child; an atom's rest is the empty block
fn rest(state: &mut State) {
    map_code(state, |code| {
        let rest = match code {
            Code::Block(block) => block.items().iter().skip(1).cloned().collect(),
            _ => Vec::new(),
        };
        Some(block_of(rest))
    });
}

fn wrap(state: &mut State) {
    map_code(state, |code| Some(block_of(vec![code.clone()])));
}

/// A block holding second-from-top then top
fn list(state: &mut State) {
    apply_binary(state, StackKind::Code, |second, top| {
        Some(block_of(vec![second.as_code()?.clone(), top.as_code()?.clone()]))
    });
}

/// Children of second-from-top followed by children of top
fn combine(state: &mut State) {
    apply_binary(state, StackKind::Code, |second, top| {
        let mut combined = items(second.as_code()?);
        combined.extend(items(top.as_code()?));
        Some(block_of(combined))
    });
}

fn code_do(state: &mut State) {
    if let Some(code) = state.pop_code() {
        state.push_exec(code);
    }
}

/// True runs second-from-top, false runs top; both are consumed
fn code_if(state: &mut State) {
    let (Some(condition), Some(top), Some(second)) =
        (state.pop_bool(), state.pop_code(), state.pop_code())
    else {
        return;
    };
    state.push_exec(if condition { second } else { top });
}

fn code_when(state: &mut State) {
    let (Some(condition), Some(code)) = (state.pop_bool(), state.pop_code()) else {
        return;
    };
    if condition {
        state.push_exec(code);
    }
}

/// Whether second-from-top is a child of top
fn member(state: &mut State) {
    let (Some(top), Some(second)) = (state.pop_code(), state.pop_code()) else {
        return;
    };
    state.push(Value::Boolean(top.has_member(&second)));
}

/// Child at the popped index modulo the length. Empty blocks keep the index.
fn nth(state: &mut State) {
    let len = match state.top_code() {
        Some(Code::Block(block)) => block.len(),
        Some(_) => 1,
        None => 0,
    };
    if len == 0 {
        return;
    }
    let Some(n) = state.pop_integer() else {
        return;
    };
    let index = wrap_index(&n, len);
    map_code(state, |code| items(code).into_iter().nth(index).map(Value::from));
}
