use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::operator::Operator;

/// Literal values carried by comparison leaves and accepted from records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
}

impl Value {
    /// Compare this value to another using the given comparison operator.
    ///
    /// Integers and floats compare numerically. `=` between incompatible kinds is
    /// simply `false`. Returns `None` when an ordering operator is applied to
    /// incompatible kinds, or when `op` is a logical operator.
    #[must_use]
    pub fn compare(&self, op: Operator, other: &Value) -> Option<bool> {
        match op {
            Operator::Eq => Some(self.partial_cmp_value(other) == Some(Ordering::Equal)),
            Operator::Gt | Operator::Lt | Operator::Gte | Operator::Lte => {
                if !self.is_comparable_with(other) {
                    return None;
                }
                // NaN orders against nothing
                let Some(ord) = self.partial_cmp_value(other) else {
                    return Some(false);
                };
                Some(match op {
                    Operator::Gt => ord == Ordering::Greater,
                    Operator::Gte => ord != Ordering::Less,
                    Operator::Lt => ord == Ordering::Less,
                    _ => ord != Ordering::Greater,
                })
            }
            Operator::And | Operator::Or => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Convert a JSON scalar into a `Value`. Returns `None` for booleans, nulls,
    /// arrays and objects, and for unsigned integers that do not fit in `i64`
    /// (those become floats).
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float)),
            _ => None,
        }
    }

    fn is_comparable_with(&self, other: &Value) -> bool {
        matches!(
            (self, other),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_))
                | (Value::String(_), Value::String(_))
        )
    }

    fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the integer
/// through `f64`.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63 as f64; the i64 range is [-2^63, 2^63)
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= BOUND {
        return Some(Ordering::Less);
    }
    if f < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    // In range and integral, so the cast is exact.
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f),
        ord => Some(ord),
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Value::from(f),
            Value::String(s) => serde_json::Value::String(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(v) => write!(f, "'{v}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_i64() {
        assert_eq!(Value::from(42_i64), Value::Int(42));
    }

    #[test]
    fn from_f64() {
        assert_eq!(Value::from(3.5_f64), Value::Float(3.5));
    }

    #[test]
    fn from_str() {
        assert_eq!(Value::from("hello"), Value::String("hello".to_owned()));
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::String("sales".into()).to_string(), "'sales'");
    }

    #[test]
    fn compare_int() {
        let a = Value::Int(10);
        let b = Value::Int(20);
        assert_eq!(a.compare(Operator::Eq, &b), Some(false));
        assert_eq!(a.compare(Operator::Lt, &b), Some(true));
        assert_eq!(a.compare(Operator::Lte, &b), Some(true));
        assert_eq!(a.compare(Operator::Gt, &b), Some(false));
        assert_eq!(a.compare(Operator::Gte, &b), Some(false));
        assert_eq!(a.compare(Operator::Eq, &a), Some(true));
        assert_eq!(a.compare(Operator::Gte, &a), Some(true));
        assert_eq!(a.compare(Operator::Lte, &a), Some(true));
    }

    #[test]
    fn compare_int_float_cross_type() {
        let i = Value::Int(10);
        let f = Value::Float(10.0);
        assert_eq!(i.compare(Operator::Eq, &f), Some(true));
        assert_eq!(f.compare(Operator::Eq, &i), Some(true));
        let f2 = Value::Float(10.5);
        assert_eq!(i.compare(Operator::Lt, &f2), Some(true));
        assert_eq!(f2.compare(Operator::Gt, &i), Some(true));
    }

    #[test]
    fn compare_int_float_beyond_f64_precision() {
        // 2^53 + 1 has no exact f64; it must not compare equal to 2^53.
        let big = Value::Int(9_007_199_254_740_993);
        let f = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(big.compare(Operator::Eq, &f), Some(false));
        assert_eq!(big.compare(Operator::Gt, &f), Some(true));
        assert_eq!(f.compare(Operator::Lt, &big), Some(true));
    }

    #[test]
    fn compare_int_float_fractions_and_extremes() {
        let neg = Value::Int(-5);
        assert_eq!(neg.compare(Operator::Gt, &Value::Float(-5.5)), Some(true));
        assert_eq!(neg.compare(Operator::Lt, &Value::Float(-4.5)), Some(true));
        let max = Value::Int(i64::MAX);
        assert_eq!(max.compare(Operator::Lt, &Value::Float(9.3e18)), Some(true));
        assert_eq!(
            max.compare(Operator::Lt, &Value::Float(f64::INFINITY)),
            Some(true)
        );
        let min = Value::Int(i64::MIN);
        let min_float = Value::Float(-9_223_372_036_854_775_808.0);
        assert_eq!(min.compare(Operator::Eq, &min_float), Some(true));
        assert_eq!(
            min.compare(Operator::Gt, &Value::Float(f64::NEG_INFINITY)),
            Some(true)
        );
    }

    #[test]
    fn compare_string() {
        let a = Value::String("apple".into());
        let b = Value::String("banana".into());
        assert_eq!(a.compare(Operator::Lt, &b), Some(true));
        assert_eq!(a.compare(Operator::Eq, &b), Some(false));
        assert_eq!(a.compare(Operator::Eq, &a), Some(true));
    }

    #[test]
    fn equality_across_kinds_is_false() {
        let i = Value::Int(1);
        let s = Value::String("1".into());
        assert_eq!(i.compare(Operator::Eq, &s), Some(false));
        assert_eq!(s.compare(Operator::Eq, &i), Some(false));
    }

    #[test]
    fn ordering_across_kinds_is_none() {
        let i = Value::Int(1);
        let s = Value::String("hello".into());
        assert_eq!(i.compare(Operator::Gt, &s), None);
        assert_eq!(s.compare(Operator::Lte, &i), None);
    }

    #[test]
    fn nan_orders_false() {
        let nan = Value::Float(f64::NAN);
        let one = Value::Int(1);
        assert_eq!(nan.compare(Operator::Gt, &one), Some(false));
        assert_eq!(nan.compare(Operator::Lte, &one), Some(false));
        assert_eq!(nan.compare(Operator::Eq, &nan), Some(false));
    }

    #[test]
    fn logical_operator_is_not_a_comparison() {
        let a = Value::Int(1);
        assert_eq!(a.compare(Operator::And, &a), None);
    }

    #[test]
    fn from_json_scalars() {
        assert_eq!(Value::from_json(&serde_json::json!(5)), Some(Value::Int(5)));
        assert_eq!(
            Value::from_json(&serde_json::json!(2.5)),
            Some(Value::Float(2.5))
        );
        assert_eq!(
            Value::from_json(&serde_json::json!("x")),
            Some(Value::String("x".into()))
        );
        assert_eq!(Value::from_json(&serde_json::json!(true)), None);
        assert_eq!(Value::from_json(&serde_json::json!(null)), None);
        assert_eq!(Value::from_json(&serde_json::json!([1])), None);
    }

    #[test]
    fn untagged_serde() {
        let v: Value = serde_json::from_str("30").unwrap();
        assert_eq!(v, Value::Int(30));
        let v: Value = serde_json::from_str("30.5").unwrap();
        assert_eq!(v, Value::Float(30.5));
        let v: Value = serde_json::from_str("\"sales\"").unwrap();
        assert_eq!(v, Value::String("sales".into()));
        assert_eq!(serde_json::to_string(&Value::Float(3.0)).unwrap(), "3.0");
    }
}
