//! Values the machine manipulates and the kinds of stacks that hold them.

use crate::code::Code;
use num_bigint::BigInt;
use std::fmt;

/// Identifies one of the machine's stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StackKind {
    Boolean,
    Char,
    Integer,
    Float,
    String,
    BooleanVector,
    IntegerVector,
    FloatVector,
    StringVector,
    Code,
    Exec,
}

impl StackKind {
    pub const COUNT: usize = 11;

    pub const ALL: [StackKind; StackKind::COUNT] = [
        StackKind::Boolean,
        StackKind::Char,
        StackKind::Integer,
        StackKind::Float,
        StackKind::String,
        StackKind::BooleanVector,
        StackKind::IntegerVector,
        StackKind::FloatVector,
        StackKind::StringVector,
        StackKind::Code,
        StackKind::Exec,
    ];

    /// Kinds whose items can appear as literals in a program
    pub const LITERALS: [StackKind; 9] = [
        StackKind::Boolean,
        StackKind::Char,
        StackKind::Integer,
        StackKind::Float,
        StackKind::String,
        StackKind::BooleanVector,
        StackKind::IntegerVector,
        StackKind::FloatVector,
        StackKind::StringVector,
    ];

    pub const VECTORS: [StackKind; 4] = [
        StackKind::BooleanVector,
        StackKind::IntegerVector,
        StackKind::FloatVector,
        StackKind::StringVector,
    ];

    pub const NUMERIC: [StackKind; 2] = [StackKind::Integer, StackKind::Float];

    /// Name used as the prefix of instruction names
    pub fn name(&self) -> &'static str {
        match self {
            StackKind::Boolean => "boolean",
            StackKind::Char => "char",
            StackKind::Integer => "integer",
            StackKind::Float => "float",
            StackKind::String => "string",
            StackKind::BooleanVector => "vector_boolean",
            StackKind::IntegerVector => "vector_integer",
            StackKind::FloatVector => "vector_float",
            StackKind::StringVector => "vector_string",
            StackKind::Code => "code",
            StackKind::Exec => "exec",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Element kind of a vector kind
    pub fn element(self) -> Option<StackKind> {
        match self {
            StackKind::BooleanVector => Some(StackKind::Boolean),
            StackKind::IntegerVector => Some(StackKind::Integer),
            StackKind::FloatVector => Some(StackKind::Float),
            StackKind::StringVector => Some(StackKind::String),
            _ => None,
        }
    }

    pub fn is_vector(self) -> bool {
        self.element().is_some()
    }
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single immutable datum
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Char(char),
    Integer(BigInt),
    Float(f64),
    String(String),
    BooleanVector(Vec<bool>),
    IntegerVector(Vec<BigInt>),
    FloatVector(Vec<f64>),
    StringVector(Vec<String>),
    Code(Box<Code>),
}

impl Value {
    /// The stack this value belongs on. Code values report `Code`; the exec
    /// stack is only ever filled explicitly.
    pub fn kind(&self) -> StackKind {
        match self {
            Value::Boolean(_) => StackKind::Boolean,
            Value::Char(_) => StackKind::Char,
            Value::Integer(_) => StackKind::Integer,
            Value::Float(_) => StackKind::Float,
            Value::String(_) => StackKind::String,
            Value::BooleanVector(_) => StackKind::BooleanVector,
            Value::IntegerVector(_) => StackKind::IntegerVector,
            Value::FloatVector(_) => StackKind::FloatVector,
            Value::StringVector(_) => StackKind::StringVector,
            Value::Code(_) => StackKind::Code,
        }
    }

    pub fn integer(v: impl Into<BigInt>) -> Self {
        Value::Integer(v.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<&Code> {
        match self {
            Value::Code(c) => Some(c),
            _ => None,
        }
    }

    /// Length of a string or vector, points of a code value, 1 otherwise
    pub fn size(&self) -> usize {
        match self {
            Value::String(s) => s.chars().count(),
            Value::BooleanVector(v) => v.len(),
            Value::IntegerVector(v) => v.len(),
            Value::FloatVector(v) => v.len(),
            Value::StringVector(v) => v.len(),
            Value::Code(c) => c.size(),
            _ => 1,
        }
    }

    /// Element `index` of a vector, as a value of the element kind
    pub fn element(&self, index: usize) -> Option<Value> {
        match self {
            Value::BooleanVector(v) => v.get(index).copied().map(Value::Boolean),
            Value::IntegerVector(v) => v.get(index).cloned().map(Value::Integer),
            Value::FloatVector(v) => v.get(index).copied().map(Value::Float),
            Value::StringVector(v) => v.get(index).cloned().map(Value::String),
            _ => None,
        }
    }

    /// Split a vector into its element values
    pub fn into_elements(self) -> Option<Vec<Value>> {
        match self {
            Value::BooleanVector(v) => Some(v.into_iter().map(Value::Boolean).collect()),
            Value::IntegerVector(v) => Some(v.into_iter().map(Value::Integer).collect()),
            Value::FloatVector(v) => Some(v.into_iter().map(Value::Float).collect()),
            Value::StringVector(v) => Some(v.into_iter().map(Value::String).collect()),
            _ => None,
        }
    }

    /// Build a vector of `kind` from elements of its element kind. Returns
    /// `None` if `kind` is not a vector kind or any element has the wrong kind.
    pub fn vector(kind: StackKind, elements: Vec<Value>) -> Option<Value> {
        let items = elements.into_iter();
        match kind {
            StackKind::BooleanVector => items
                .map(|e| e.as_bool())
                .collect::<Option<Vec<_>>>()
                .map(Value::BooleanVector),
            StackKind::IntegerVector => items
                .map(|e| match e {
                    Value::Integer(i) => Some(i),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Value::IntegerVector),
            StackKind::FloatVector => items
                .map(|e| e.as_float())
                .collect::<Option<Vec<_>>>()
                .map(Value::FloatVector),
            StackKind::StringVector => items
                .map(|e| match e {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Value::StringVector),
            _ => None,
        }
    }
}

fn write_seq<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], mut item: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        item(f, v)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::String(s) => f.write_str(s),
            Value::BooleanVector(v) => write_seq(f, v, |f, b| write!(f, "{}", b)),
            Value::IntegerVector(v) => write_seq(f, v, |f, i| write!(f, "{}", i)),
            Value::FloatVector(v) => write_seq(f, v, |f, x| write!(f, "{:?}", x)),
            Value::StringVector(v) => write_seq(f, v, |f, s| write!(f, "{:?}", s)),
            Value::Code(c) => write!(f, "{}", c),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(BigInt::from(v))
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Code> for Value {
    fn from(v: Code) -> Self {
        Value::Code(Box::new(v))
    }
}
