//! Character and string instructions.

use super::{apply_binary, apply_unary, clamp_index, wrap_index, Dep, Family, FixedSpec, Template};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;
use push_core::{Executable, StackKind, State, Value};

const STR: &[StackKind] = &[StackKind::String];
const STR2: &[StackKind] = &[StackKind::String, StackKind::String];
const INT_STR: &[StackKind] = &[StackKind::Integer, StackKind::String];

const STRINGABLE: &[StackKind] = &[
    StackKind::Boolean,
    StackKind::Char,
    StackKind::Integer,
    StackKind::Float,
];

pub(crate) fn family() -> Family {
    Family {
        name: "text",
        templates: vec![Template::new("string_from_{}", STRINGABLE, &[Dep::Target], string_from)],
        fixed: vec![
            FixedSpec::new("char_is_letter", &[StackKind::Char], Executable::Fixed(is_letter)),
            FixedSpec::new("char_is_digit", &[StackKind::Char], Executable::Fixed(is_digit)),
            FixedSpec::new(
                "char_is_whitespace",
                &[StackKind::Char],
                Executable::Fixed(is_whitespace),
            ),
            FixedSpec::new(
                "char_from_integer",
                &[StackKind::Integer],
                Executable::Fixed(char_from_integer),
            ),
            FixedSpec::new(
                "char_from_float",
                &[StackKind::Float],
                Executable::Fixed(char_from_float),
            ),
            FixedSpec::new("string_concat", STR2, Executable::Fixed(concat)),
            FixedSpec::new("string_length", STR, Executable::Fixed(length)),
            FixedSpec::new("string_reverse", STR, Executable::Fixed(reverse)),
            FixedSpec::new("string_take", INT_STR, Executable::Fixed(take)),
            FixedSpec::new("string_contains", STR2, Executable::Fixed(contains)),
            FixedSpec::new("string_first_char", STR, Executable::Fixed(first_char)),
            FixedSpec::new("string_last_char", STR, Executable::Fixed(last_char)),
            FixedSpec::new("string_nth_char", INT_STR, Executable::Fixed(nth_char)),
            FixedSpec::new("string_rest", STR, Executable::Fixed(rest)),
            FixedSpec::new("string_butlast", STR, Executable::Fixed(butlast)),
            FixedSpec::new(
                "string_append_char",
                &[StackKind::Char, StackKind::String],
                Executable::Fixed(append_char),
            ),
            FixedSpec::new("string_split_on_space", STR, Executable::Fixed(split_on_space)),
            FixedSpec::new("string_new", &[], Executable::Fixed(new_string)),
        ],
    }
}

fn string_from(state: &mut State, kind: StackKind) {
    apply_unary(state, kind, |top| Some(Value::String(top.to_string())));
}

fn char_test(state: &mut State, f: fn(char) -> bool) {
    apply_unary(state, StackKind::Char, |top| Some(Value::Boolean(f(top.as_char()?))));
}

fn is_letter(state: &mut State) {
    char_test(state, char::is_alphabetic);
}

fn is_digit(state: &mut State) {
    char_test(state, |c| c.is_ascii_digit());
}

fn is_whitespace(state: &mut State) {
    char_test(state, char::is_whitespace);
}

/// ASCII character for the integer modulo 128
fn char_from_integer(state: &mut State) {
    apply_unary(state, StackKind::Integer, |top| {
        let code = top.as_integer()?.mod_floor(&BigInt::from(128)).to_u32()?;
        char::from_u32(code).map(Value::Char)
    });
}

fn char_from_float(state: &mut State) {
    apply_unary(state, StackKind::Float, |top| {
        let x = top.as_float()?;
        if !x.is_finite() {
            return None;
        }
        char::from_u32(x.floor().rem_euclid(128.0) as u32).map(Value::Char)
    });
}

/// Map the top string to a new value
fn map_string<F>(state: &mut State, f: F)
where
    F: FnOnce(&str) -> Option<Value>,
{
    apply_unary(state, StackKind::String, |top| f(top.as_str()?));
}

fn concat(state: &mut State) {
    apply_binary(state, StackKind::String, |second, top| {
        Some(Value::String(format!("{}{}", second.as_str()?, top.as_str()?)))
    });
}

fn length(state: &mut State) {
    map_string(state, |s| Some(Value::integer(s.chars().count())));
}

fn reverse(state: &mut State) {
    map_string(state, |s| Some(Value::String(s.chars().rev().collect())));
}

/// Keep the first n characters
fn take(state: &mut State) {
    let Some(n) = state.pop_integer() else {
        return;
    };
    map_string(state, |s| {
        let len = s.chars().count();
        Some(Value::String(s.chars().take(clamp_index(&n, len)).collect()))
    });
}

/// Whether second-from-top contains top
fn contains(state: &mut State) {
    apply_binary(state, StackKind::String, |second, top| {
        Some(Value::Boolean(second.as_str()?.contains(top.as_str()?)))
    });
}

fn first_char(state: &mut State) {
    map_string(state, |s| s.chars().next().map(Value::Char));
}

fn last_char(state: &mut State) {
    map_string(state, |s| s.chars().last().map(Value::Char));
}

/// Character at the popped index, taken modulo the length
fn nth_char(state: &mut State) {
    let len = state.top_string().map_or(0, |s| s.chars().count());
    if len == 0 {
        return;
    }
    let Some(n) = state.pop_integer() else {
        return;
    };
    let index = wrap_index(&n, len);
    map_string(state, |s| s.chars().nth(index).map(Value::Char));
}

fn rest(state: &mut State) {
    map_string(state, |s| Some(Value::String(s.chars().skip(1).collect())));
}

fn butlast(state: &mut State) {
    map_string(state, |s| {
        let mut chars = s.chars();
        chars.next_back();
        Some(Value::String(chars.collect()))
    });
}

fn append_char(state: &mut State) {
    let (Some(c), Some(s)) = (state.top_char(), state.top_string()) else {
        return;
    };
    let result = Value::String(format!("{}{}", s, c));
    if !state.admits(&result) {
        return;
    }
    state.pop(StackKind::Char);
    state.pop(StackKind::String);
    state.push(result);
}

/// Pushes each word so the first word ends on top
fn split_on_space(state: &mut State) {
    let Some(s) = state.pop_string() else {
        return;
    };
    let words: Vec<&str> = s.split_whitespace().collect();
    for word in words.into_iter().rev() {
        state.push(Value::from(word));
    }
}

fn new_string(state: &mut State) {
    state.push(Value::String(String::new()));
}
