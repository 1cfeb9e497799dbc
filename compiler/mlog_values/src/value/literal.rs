//! Literal values and compile-time constant folding.
//!
//! Folding follows the source language's coercion rules: `+` concatenates
//! when either side is a string, other arithmetic converts to numbers,
//! bitwise operators work on 32-bit integers.

use std::cmp::Ordering;
use std::fmt;

use mlog_ir::{BinaryOperator, LitValue, Operator, UnaryOperator};

use super::{runtime, unsupported_operator, Mutability, Value, ValueCapabilities, ValueResult};
use crate::errors::capability_unsupported;
use crate::Scope;

/// A compile-time constant scalar.
#[derive(Clone, Debug)]
pub struct LiteralValue {
    data: LitValue,
}

impl LiteralValue {
    pub fn new(data: LitValue) -> Self {
        LiteralValue { data }
    }

    #[inline]
    pub fn data(&self) -> &LitValue {
        &self.data
    }
}

impl ValueCapabilities for LiteralValue {
    fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    fn eval(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Ok((this.clone(), Vec::new()))
    }

    fn consume(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Ok((this.clone(), Vec::new()))
    }

    fn get(&self, this: &Value, _scope: &mut Scope, key: &Value) -> ValueResult {
        match (&self.data, key.as_literal()) {
            (LitValue::String(s), Some(LitValue::String(k))) if k == "length" => {
                let length = u32::try_from(s.encode_utf16().count()).unwrap_or(u32::MAX);
                Ok((Value::number(f64::from(length)), Vec::new()))
            }
            _ => Err(capability_unsupported("get", this)),
        }
    }

    fn operate(
        &self,
        this: &Value,
        scope: &mut Scope,
        op: Operator,
        operands: &[Value],
    ) -> ValueResult {
        match (op, operands) {
            (Operator::Unary(unary), []) => Ok((
                Value::literal(fold_unary(unary, &self.data)),
                Vec::new(),
            )),
            (Operator::Binary(binary), [rhs]) => match rhs.as_literal() {
                Some(right) => fold_binary(binary, &self.data, right)
                    .map(|folded| (Value::literal(folded), Vec::new()))
                    .ok_or_else(|| unsupported_operator(op, this)),
                None => runtime::emit_binary(scope, binary, this, rhs),
            },
            _ => Err(unsupported_operator(op, this)),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            LitValue::Number(n) => f.write_str(&format_number(*n)),
            LitValue::String(s) => write!(f, "\"{s}\""),
            LitValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render a number the way the source language prints it.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent
/// notation (`1e+21`, `1.23e-18`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n == f64::INFINITY {
        "Infinity".to_owned()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else if n == 0.0 {
        // Covers -0.
        "0".to_owned()
    } else if n < 0.0 {
        format!("-{}", format_positive(-n))
    } else {
        format_positive(n)
    }
}

/// `n` is finite and positive.
fn format_positive(n: f64) -> String {
    // `{:e}` yields the shortest round-tripping digits, e.g. `1.23e-18`.
    let scientific = format!("{n:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let len = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    // Position of the decimal point relative to the start of `digits`.
    let point = exponent + 1;
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));

    if len <= point && point <= 21 {
        format!("{digits}{}", zeros(point - len))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(usize::try_from(point).unwrap_or(0));
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", zeros(-point))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.abs())
        }
    }
}

// Coercions

fn to_number(value: &LitValue) -> f64 {
    match value {
        LitValue::Number(n) => *n,
        LitValue::Bool(b) => f64::from(u8::from(*b)),
        LitValue::String(s) => string_to_number(s),
    }
}

/// String to number conversion with the source language's grammar: decimal
/// literals, `0x`/`0o`/`0b` integers and the exact word `Infinity`.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&trimmed[2..], radix);
    }

    // `f64::from_str` also takes `inf`, `nan` and friends, which are not
    // numeric literals here.
    let decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn parse_radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return f64::NAN;
        };
        value = value * f64::from(radix) + f64::from(digit);
    }
    value
}

/// Exponentiation where a NaN exponent, or `±1` to an infinite power, is NaN.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

fn to_display_string(value: &LitValue) -> String {
    match value {
        LitValue::Number(n) => format_number(*n),
        LitValue::Bool(b) => b.to_string(),
        LitValue::String(s) => s.clone(),
    }
}

fn is_truthy(value: &LitValue) -> bool {
    match value {
        LitValue::Number(n) => *n != 0.0 && !n.is_nan(),
        LitValue::Bool(b) => *b,
        LitValue::String(s) => !s.is_empty(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "modular reduction to 32 bits is the intended semantics"
)]
fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let reduced = n.trunc().rem_euclid(4_294_967_296.0);
    reduced as u32 as i32
}

#[expect(
    clippy::cast_sign_loss,
    reason = "shift counts are masked to 0..32"
)]
fn shift_count(n: f64) -> u32 {
    (to_int32(n) as u32) & 31
}

fn strict_eq(left: &LitValue, right: &LitValue) -> bool {
    match (left, right) {
        (LitValue::Number(a), LitValue::Number(b)) => a == b,
        (LitValue::String(a), LitValue::String(b)) => a == b,
        (LitValue::Bool(a), LitValue::Bool(b)) => a == b,
        _ => false,
    }
}

fn loose_eq(left: &LitValue, right: &LitValue) -> bool {
    if std::mem::discriminant(left) == std::mem::discriminant(right) {
        return strict_eq(left, right);
    }
    to_number(left) == to_number(right)
}

fn compare(left: &LitValue, right: &LitValue) -> Option<Ordering> {
    match (left, right) {
        // UTF-16 code unit order, not UTF-8 byte order.
        (LitValue::String(a), LitValue::String(b)) => {
            Some(a.encode_utf16().cmp(b.encode_utf16()))
        }
        _ => to_number(left).partial_cmp(&to_number(right)),
    }
}

// Folding

fn fold_unary(op: UnaryOperator, value: &LitValue) -> LitValue {
    match op {
        UnaryOperator::Neg => LitValue::Number(-to_number(value)),
        UnaryOperator::Plus => LitValue::Number(to_number(value)),
        UnaryOperator::Not => LitValue::Bool(!is_truthy(value)),
        UnaryOperator::BitNot => LitValue::Number(f64::from(!to_int32(to_number(value)))),
        UnaryOperator::TypeOf => LitValue::String(
            match value {
                LitValue::Number(_) => "number",
                LitValue::String(_) => "string",
                LitValue::Bool(_) => "boolean",
            }
            .to_owned(),
        ),
    }
}

#[expect(
    clippy::cast_sign_loss,
    reason = "`>>>` reinterprets the left operand as unsigned"
)]
fn fold_binary(op: BinaryOperator, left: &LitValue, right: &LitValue) -> Option<LitValue> {
    use BinaryOperator as B;

    let (l, r) = (to_number(left), to_number(right));
    let number = LitValue::Number;
    let int = |v: i32| LitValue::Number(f64::from(v));

    let folded = match op {
        B::Add => match (left, right) {
            (LitValue::String(_), _) | (_, LitValue::String(_)) => LitValue::String(format!(
                "{}{}",
                to_display_string(left),
                to_display_string(right)
            )),
            _ => number(l + r),
        },
        B::Sub => number(l - r),
        B::Mul => number(l * r),
        B::Div => number(l / r),
        B::Mod => number(l % r),
        B::Pow => number(pow(l, r)),

        B::Eq => LitValue::Bool(loose_eq(left, right)),
        B::NotEq => LitValue::Bool(!loose_eq(left, right)),
        B::StrictEq => LitValue::Bool(strict_eq(left, right)),
        B::StrictNotEq => LitValue::Bool(!strict_eq(left, right)),

        B::Lt => LitValue::Bool(compare(left, right) == Some(Ordering::Less)),
        B::LtEq => LitValue::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        B::Gt => LitValue::Bool(compare(left, right) == Some(Ordering::Greater)),
        B::GtEq => LitValue::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),

        B::BitAnd => int(to_int32(l) & to_int32(r)),
        B::BitOr => int(to_int32(l) | to_int32(r)),
        B::BitXor => int(to_int32(l) ^ to_int32(r)),
        B::Shl => int(to_int32(l).wrapping_shl(shift_count(r))),
        B::Shr => int(to_int32(l).wrapping_shr(shift_count(r))),
        B::UnsignedShr => {
            number(f64::from((to_int32(l) as u32).wrapping_shr(shift_count(r))))
        }

        B::And => {
            if is_truthy(left) {
                right.clone()
            } else {
                left.clone()
            }
        }
        B::Or => {
            if is_truthy(left) {
                left.clone()
            } else {
                right.clone()
            }
        }
        // Literals are never nullish.
        B::Coalesce => left.clone(),

        B::In | B::InstanceOf => return None,
    };
    Some(folded)
}
