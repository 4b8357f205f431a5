//! Machine state: one stack per kind, read-only inputs, and an output buffer.

use crate::code::{Code, CodeBlock};
use crate::config::Limits;
use crate::stack::Stack;
use crate::value::{StackKind, Value};
use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Input bindings, fixed for the duration of a run
pub type Inputs = BTreeMap<String, Value>;

/// The full machine state for one interpretation run
#[derive(Debug, Clone)]
pub struct State {
    stacks: [Stack; StackKind::COUNT],
    inputs: Arc<Inputs>,
    output: String,
    limits: Limits,
}

impl State {
    pub fn new() -> Self {
        Self::with_inputs(Inputs::new())
    }

    /// A fresh state bound to `inputs`. Passing an `Arc` lets many runs share one binding.
    pub fn with_inputs(inputs: impl Into<Arc<Inputs>>) -> Self {
        Self {
            stacks: std::array::from_fn(|i| Stack::new(StackKind::ALL[i])),
            inputs: inputs.into(),
            output: String::new(),
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn stack(&self, kind: StackKind) -> &Stack {
        &self.stacks[kind.index()]
    }

    pub fn stack_mut(&mut self, kind: StackKind) -> &mut Stack {
        &mut self.stacks[kind.index()]
    }

    pub fn depth(&self, kind: StackKind) -> usize {
        self.stack(kind).len()
    }

    /// Total number of items across all stacks
    pub fn size(&self) -> usize {
        self.stacks.iter().map(Stack::len).sum()
    }

    /// Push onto the stack matching the value's kind
    pub fn push(&mut self, value: Value) {
        let kind = value.kind();
        self.stack_mut(kind).push(value);
    }

    /// Push several values; the last one ends on top
    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        for value in values {
            self.push(value);
        }
    }

    pub fn pop(&mut self, kind: StackKind) -> Option<Value> {
        self.stack_mut(kind).pop()
    }

    /// Top of a stack, or `None` when it is empty
    pub fn top(&self, kind: StackKind) -> Option<&Value> {
        self.stack(kind).top()
    }

    pub fn push_exec(&mut self, code: Code) {
        self.stack_mut(StackKind::Exec).push(Value::from(code));
    }

    pub fn pop_exec(&mut self) -> Option<Code> {
        match self.pop(StackKind::Exec)? {
            Value::Code(code) => Some(*code),
            _ => None,
        }
    }

    pub fn top_exec(&self) -> Option<&Code> {
        self.top(StackKind::Exec).and_then(Value::as_code)
    }

    /// Queue a block on the exec stack so its first item runs next
    pub fn load_program(&mut self, program: &CodeBlock) {
        for item in program.iter().rev() {
            self.push_exec(item.clone());
        }
    }

    pub fn pop_bool(&mut self) -> Option<bool> {
        self.pop(StackKind::Boolean)?.as_bool()
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.pop(StackKind::Char)?.as_char()
    }

    pub fn pop_integer(&mut self) -> Option<BigInt> {
        match self.pop(StackKind::Integer)? {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn pop_float(&mut self) -> Option<f64> {
        self.pop(StackKind::Float)?.as_float()
    }

    pub fn pop_string(&mut self) -> Option<String> {
        match self.pop(StackKind::String)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn pop_code(&mut self) -> Option<Code> {
        match self.pop(StackKind::Code)? {
            Value::Code(code) => Some(*code),
            _ => None,
        }
    }

    pub fn top_bool(&self) -> Option<bool> {
        self.top(StackKind::Boolean)?.as_bool()
    }

    pub fn top_char(&self) -> Option<char> {
        self.top(StackKind::Char)?.as_char()
    }

    pub fn top_integer(&self) -> Option<&BigInt> {
        self.top(StackKind::Integer)?.as_integer()
    }

    pub fn top_float(&self) -> Option<f64> {
        self.top(StackKind::Float)?.as_float()
    }

    pub fn top_string(&self) -> Option<&str> {
        self.top(StackKind::String)?.as_str()
    }

    pub fn top_code(&self) -> Option<&Code> {
        self.top(StackKind::Code)?.as_code()
    }

    /// Read one value per requested kind. A kind requested twice reads the
    /// top item and then the one beneath it. Missing items are `None`.
    pub fn observe(&self, kinds: &[StackKind]) -> Vec<Option<Value>> {
        let mut taken = [0usize; StackKind::COUNT];
        kinds
            .iter()
            .map(|kind| {
                let depth = taken[kind.index()];
                taken[kind.index()] += 1;
                self.stack(*kind).nth(depth).cloned()
            })
            .collect()
    }

    /// Whether `value` fits within the configured limits
    pub fn admits(&self, value: &Value) -> bool {
        let cap = self.limits.collection_size_cap;
        let bits = self.limits.max_integer_bits;
        match value {
            Value::Integer(i) => i.bits() <= bits,
            Value::Float(x) => x.is_finite(),
            Value::IntegerVector(v) => v.len() <= cap && v.iter().all(|i| i.bits() <= bits),
            Value::FloatVector(v) => v.len() <= cap && v.iter().all(|x| x.is_finite()),
            Value::StringVector(v) => v.len() <= cap && v.iter().all(|s| s.chars().count() <= cap),
            Value::String(_) | Value::BooleanVector(_) | Value::Code(_) => value.size() <= cap,
            Value::Boolean(_) | Value::Char(_) => true,
        }
    }

    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Append to the output buffer. Returns false, leaving the buffer
    /// untouched, if the text would overflow the output cap.
    pub fn print(&mut self, text: &str) -> bool {
        if self.output.len() + text.len() > self.limits.output_cap {
            return false;
        }
        self.output.push_str(text);
        true
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_by_kind() {
        let mut state = State::new();
        state.push(Value::from(1i64));
        state.push(Value::from(2.5));
        state.push(Value::from(true));
        state.push(Value::from(Code::literal(3i64)));

        assert_eq!(state.depth(StackKind::Integer), 1);
        assert_eq!(state.depth(StackKind::Float), 1);
        assert_eq!(state.depth(StackKind::Boolean), 1);
        assert_eq!(state.depth(StackKind::Code), 1);
        assert_eq!(state.depth(StackKind::Exec), 0);
        assert_eq!(state.size(), 4);
    }

    #[test]
    fn test_load_program_order() {
        let mut state = State::new();
        let program: CodeBlock = vec![Code::literal(1i64), Code::literal(2i64)]
            .into_iter()
            .collect();
        state.load_program(&program);
        assert_eq!(state.pop_exec(), Some(Code::literal(1i64)));
        assert_eq!(state.pop_exec(), Some(Code::literal(2i64)));
        assert_eq!(state.pop_exec(), None);
    }

    #[test]
    fn test_query_on_empty_is_none() {
        let mut state = State::new();
        assert_eq!(state.top_float(), None);
        assert_eq!(state.top_integer(), None);
        assert_eq!(state.pop_string(), None);
        assert_eq!(state.top(StackKind::Exec), None);
    }

    #[test]
    fn test_observe() {
        let mut state = State::new();
        state.extend([Value::from(1.0), Value::from(2.0), Value::from(0i64)]);

        let observed = state.observe(&[
            StackKind::Float,
            StackKind::Integer,
            StackKind::Float,
            StackKind::Float,
            StackKind::String,
        ]);
        assert_eq!(
            observed,
            vec![
                Some(Value::from(2.0)),
                Some(Value::from(0i64)),
                Some(Value::from(1.0)),
                None,
                None,
            ]
        );
        // Zero is a real value, distinct from the missing-item sentinel
        assert_ne!(observed[1], None);
    }

    #[test]
    fn test_admits() {
        let state = State::new().with_limits(Limits {
            max_integer_bits: 8,
            collection_size_cap: 3,
            ..Limits::default()
        });
        assert!(state.admits(&Value::from(255i64)));
        assert!(!state.admits(&Value::from(256i64)));
        assert!(!state.admits(&Value::from(f64::NAN)));
        assert!(!state.admits(&Value::from(f64::INFINITY)));
        assert!(state.admits(&Value::from("abc")));
        assert!(!state.admits(&Value::from("abcd")));
        assert!(!state.admits(&Value::BooleanVector(vec![true; 4])));
    }

    #[test]
    fn test_print_respects_cap() {
        let mut state = State::new().with_limits(Limits {
            output_cap: 5,
            ..Limits::default()
        });
        assert!(state.print("abc"));
        assert!(!state.print("def"));
        assert_eq!(state.output(), "abc");
        assert!(state.print("de"));
        assert_eq!(state.output(), "abcde");
    }

    #[test]
    fn test_inputs_shared() {
        let mut inputs = Inputs::new();
        inputs.insert("x".to_string(), Value::from(4i64));
        let inputs = Arc::new(inputs);

        let a = State::with_inputs(Arc::clone(&inputs));
        let b = State::with_inputs(Arc::clone(&inputs));
        assert_eq!(a.input("x"), b.input("x"));
        assert_eq!(a.input("y"), None);
    }
}
