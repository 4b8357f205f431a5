//! Integer and float arithmetic, comparison, and conversion.

use super::{apply_binary, apply_unary, Dep, Family, FixedSpec, Template};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use push_core::{Executable, StackKind, State, Value};

const NUMERIC: &[StackKind] = &StackKind::NUMERIC;
const T: Dep = Dep::Target;

pub(crate) fn family() -> Family {
    Family {
        name: "numeric",
        templates: vec![
            Template::new("{}_add", NUMERIC, &[T, T], add),
            Template::new("{}_subtract", NUMERIC, &[T, T], subtract),
            Template::new("{}_mult", NUMERIC, &[T, T], mult),
            Template::new("{}_quot", NUMERIC, &[T, T], quot),
            Template::new("{}_mod", NUMERIC, &[T, T], modulo),
            Template::new("{}_max", NUMERIC, &[T, T], max),
            Template::new("{}_min", NUMERIC, &[T, T], min),
            Template::new("{}_gt", NUMERIC, &[T, T], gt),
            Template::new("{}_gte", NUMERIC, &[T, T], gte),
            Template::new("{}_lt", NUMERIC, &[T, T], lt),
            Template::new("{}_lte", NUMERIC, &[T, T], lte),
            Template::new("{}_inc", NUMERIC, &[T], inc),
            Template::new("{}_dec", NUMERIC, &[T], dec),
            Template::new("{}_from_boolean", NUMERIC, &[Dep::Kind(StackKind::Boolean)], from_boolean),
            Template::new("{}_from_char", NUMERIC, &[Dep::Kind(StackKind::Char)], from_char),
            Template::new("{}_from_string", NUMERIC, &[Dep::Kind(StackKind::String)], from_string),
        ],
        fixed: vec![
            FixedSpec::new("float_cos", &[StackKind::Float], Executable::Fixed(cos)),
            FixedSpec::new("float_sin", &[StackKind::Float], Executable::Fixed(sin)),
            FixedSpec::new("float_tan", &[StackKind::Float], Executable::Fixed(tan)),
            FixedSpec::new(
                "float_from_integer",
                &[StackKind::Integer],
                Executable::Fixed(float_from_integer),
            ),
            FixedSpec::new(
                "integer_from_float",
                &[StackKind::Float],
                Executable::Fixed(integer_from_float),
            ),
        ],
    }
}

/// Combine second-from-top with top; results past the integer bit limit are refused
fn arithmetic(
    state: &mut State,
    kind: StackKind,
    int_op: fn(&BigInt, &BigInt) -> BigInt,
    float_op: fn(f64, f64) -> f64,
) {
    apply_binary(state, kind, |second, top| match (second, top) {
        (Value::Integer(a), Value::Integer(b)) => Some(Value::Integer(int_op(a, b))),
        (Value::Float(a), Value::Float(b)) => Some(Value::Float(float_op(*a, *b))),
        _ => None,
    });
}

fn compare(
    state: &mut State,
    kind: StackKind,
    int_cmp: fn(&BigInt, &BigInt) -> bool,
    float_cmp: fn(f64, f64) -> bool,
) {
    apply_binary(state, kind, |second, top| match (second, top) {
        (Value::Integer(a), Value::Integer(b)) => Some(Value::Boolean(int_cmp(a, b))),
        (Value::Float(a), Value::Float(b)) => Some(Value::Boolean(float_cmp(*a, *b))),
        _ => None,
    });
}

fn add(state: &mut State, kind: StackKind) {
    arithmetic(state, kind, |a, b| a + b, |a, b| a + b);
}

fn subtract(state: &mut State, kind: StackKind) {
    arithmetic(state, kind, |a, b| a - b, |a, b| a - b);
}

fn mult(state: &mut State, kind: StackKind) {
    arithmetic(state, kind, |a, b| a * b, |a, b| a * b);
}

/// Quotient truncated toward zero; a zero divisor yields 1
fn quot(state: &mut State, kind: StackKind) {
    arithmetic(
        state,
        kind,
        |a, b| if b.is_zero() { BigInt::one() } else { a / b },
        |a, b| if b == 0.0 { 1.0 } else { (a / b).trunc() },
    );
}

/// Remainder after flooring the quotient; a zero divisor yields 1
fn modulo(state: &mut State, kind: StackKind) {
    arithmetic(
        state,
        kind,
        |a, b| {
            if b.is_zero() {
                BigInt::one()
            } else {
                a.mod_floor(b)
            }
        },
        |a, b| if b == 0.0 { 1.0 } else { a - b * (a / b).floor() },
    );
}

fn max(state: &mut State, kind: StackKind) {
    arithmetic(state, kind, |a, b| a.max(b).clone(), f64::max);
}

fn min(state: &mut State, kind: StackKind) {
    arithmetic(state, kind, |a, b| a.min(b).clone(), f64::min);
}

fn gt(state: &mut State, kind: StackKind) {
    compare(state, kind, |a, b| a > b, |a, b| a > b);
}

fn gte(state: &mut State, kind: StackKind) {
    compare(state, kind, |a, b| a >= b, |a, b| a >= b);
}

fn lt(state: &mut State, kind: StackKind) {
    compare(state, kind, |a, b| a < b, |a, b| a < b);
}

fn lte(state: &mut State, kind: StackKind) {
    compare(state, kind, |a, b| a <= b, |a, b| a <= b);
}

fn step(state: &mut State, kind: StackKind, delta: i32) {
    apply_unary(state, kind, |top| match top {
        Value::Integer(i) => Some(Value::Integer(i + BigInt::from(delta))),
        Value::Float(x) => Some(Value::Float(x + f64::from(delta))),
        _ => None,
    });
}

fn inc(state: &mut State, kind: StackKind) {
    step(state, kind, 1);
}

fn dec(state: &mut State, kind: StackKind) {
    step(state, kind, -1);
}

fn number(kind: StackKind, n: u32) -> Option<Value> {
    match kind {
        StackKind::Integer => Some(Value::integer(n)),
        StackKind::Float => Some(Value::Float(f64::from(n))),
        _ => None,
    }
}

fn from_boolean(state: &mut State, kind: StackKind) {
    apply_unary(state, StackKind::Boolean, |top| {
        number(kind, u32::from(top.as_bool()?))
    });
}

fn from_char(state: &mut State, kind: StackKind) {
    apply_unary(state, StackKind::Char, |top| number(kind, u32::from(top.as_char()?)));
}

/// Unparseable strings leave every stack as it was
fn from_string(state: &mut State, kind: StackKind) {
    apply_unary(state, StackKind::String, |top| {
        let text = top.as_str()?.trim();
        match kind {
            StackKind::Integer => text.parse::<BigInt>().ok().map(Value::Integer),
            StackKind::Float => text.parse::<f64>().ok().map(Value::Float),
            _ => None,
        }
    });
}

fn trig(state: &mut State, f: fn(f64) -> f64) {
    apply_unary(state, StackKind::Float, |top| Some(Value::Float(f(top.as_float()?))));
}

fn cos(state: &mut State) {
    trig(state, f64::cos);
}

fn sin(state: &mut State) {
    trig(state, f64::sin);
}

fn tan(state: &mut State) {
    trig(state, f64::tan);
}

fn float_from_integer(state: &mut State) {
    apply_unary(state, StackKind::Integer, |top| {
        top.as_integer()?.to_f64().map(Value::Float)
    });
}

/// Floors toward negative infinity
fn integer_from_float(state: &mut State) {
    apply_unary(state, StackKind::Float, |top| {
        BigInt::from_f64(top.as_float()?.floor()).map(Value::Integer)
    });
}
