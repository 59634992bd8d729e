//! The scalar coercion engine.
//!
//! Given a present node and a primitive target kind, resolve the node to a
//! scalar of that kind: the native variant is tried first, then a fixed set
//! of cross-type conversions. Loosely-typed producers routinely emit numbers
//! and booleans as strings (and vice versa); the cross rules absorb exactly
//! those cases and nothing more.

use serde::Serialize;

use crate::parser::Json;

/// The primitive target kinds a field can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Bool,
    Str,
    Int,
    UInt,
    Double,
    Float,
}

/// The priority order the generic dispatch cascade tries primitive
/// interpretations in. Order-sensitive; see [`crate::Fields::opt`].
pub const CASCADE: [Kind; 6] = [
    Kind::Str,
    Kind::Bool,
    Kind::Int,
    Kind::UInt,
    Kind::Double,
    Kind::Float,
];

impl Kind {
    pub fn desc(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Str => "string",
            Kind::Int => "integer",
            Kind::UInt => "unsigned integer",
            Kind::Double => "double",
            Kind::Float => "float",
        }
    }

    /// The default substituted when a strictly-decoded primitive member is
    /// absent (or present but unresolvable).
    pub fn default_scalar(self) -> Scalar {
        match self {
            Kind::Bool => Scalar::Bool(false),
            Kind::Str => Scalar::Str(String::new()),
            Kind::Int => Scalar::Int(0),
            Kind::UInt => Scalar::UInt(0),
            Kind::Double => Scalar::Double(0.0),
            Kind::Float => Scalar::Float(0.0),
        }
    }
}

/// A successfully coerced scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Str(String),
    Int(i64),
    UInt(u64),
    Double(f64),
    Float(f32),
}

/// The outcome of a successful coercion. `crossed` is set when a cross-type
/// conversion fired rather than a native match, so callers can report the
/// recovered mismatch to an audit sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub value: Scalar,
    pub crossed: bool,
}

/// Resolve `node` to a scalar of `kind`: native match first, then the
/// cross-type conversion table. `None` means the field is unresolved for
/// this target and the caller may try other targets or fall through.
pub fn coerce(node: &Json, kind: Kind) -> Option<Coerced> {
    if let Some(value) = native(node, kind) {
        return Some(Coerced {
            value,
            crossed: false,
        });
    }
    cross(node, kind).map(|value| Coerced {
        value,
        crossed: true,
    })
}

fn native(node: &Json, kind: Kind) -> Option<Scalar> {
    match (kind, node) {
        (Kind::Bool, Json::Bool(b)) => Some(Scalar::Bool(*b)),
        (Kind::Str, Json::Str(s)) => Some(Scalar::Str(s.clone())),
        (Kind::Int, Json::Num(n)) => integral_i64(*n).map(Scalar::Int),
        (Kind::UInt, Json::Num(n)) => integral_u64(*n).map(Scalar::UInt),
        (Kind::Double, Json::Num(n)) => Some(Scalar::Double(*n)),
        (Kind::Float, Json::Num(n)) => Some(Scalar::Float(*n as f32)),
        _ => None,
    }
}

fn cross(node: &Json, kind: Kind) -> Option<Scalar> {
    match (kind, node) {
        (Kind::Str, Json::Num(n)) => Some(Scalar::Str(number_to_string(*n))),
        (Kind::Str, Json::Bool(b)) => Some(Scalar::Str(bool_to_string(*b))),
        (Kind::Double, Json::Str(s)) => s.parse().ok().map(Scalar::Double),
        (Kind::Float, Json::Str(s)) => s.parse().ok().map(Scalar::Float),
        (Kind::Int, Json::Str(s)) => s.parse().ok().map(Scalar::Int),
        (Kind::UInt, Json::Str(s)) => s.parse().ok().map(Scalar::UInt),
        // No numeric-to-bool rule: `1` stays unresolved for a bool target.
        _ => None,
    }
}

/// The canonical, locale-independent textual form of a JSON number.
/// Integral values render with no fractional part (`3.0` becomes `"3"`).
pub fn number_to_string(n: f64) -> String {
    format!("{n}")
}

fn bool_to_string(b: bool) -> String {
    if b { "true" } else { "false" }.to_owned()
}

/// Per-element rule of the heterogeneous array adapter: scalars stringify,
/// anything else collapses to `""`. The empty-string substitution is the
/// adapter's deliberate lossy fallback; nothing else in the engine does this.
pub fn stringify_element(node: &Json) -> String {
    match node {
        Json::Str(s) => s.clone(),
        Json::Num(n) => number_to_string(*n),
        Json::Bool(b) => bool_to_string(*b),
        _ => String::new(),
    }
}

const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0; // 2^64

fn integral_i64(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

fn integral_u64(n: f64) -> Option<u64> {
    if n.is_finite() && n.fract() == 0.0 && (0.0..U64_LIMIT).contains(&n) {
        Some(n as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossed(node: &Json, kind: Kind) -> Option<Scalar> {
        coerce(node, kind).filter(|c| c.crossed).map(|c| c.value)
    }

    #[test]
    fn native_matches_win_without_crossing() {
        let c = coerce(&Json::Bool(true), Kind::Bool).unwrap();
        assert_eq!(c.value, Scalar::Bool(true));
        assert!(!c.crossed);

        let c = coerce(&Json::Num(3.0), Kind::Int).unwrap();
        assert_eq!(c.value, Scalar::Int(3));
        assert!(!c.crossed);
    }

    #[test]
    fn strings_parse_into_numeric_targets() {
        assert_eq!(
            crossed(&Json::Str("42".to_owned()), Kind::Int),
            Some(Scalar::Int(42))
        );
        assert_eq!(
            crossed(&Json::Str("2.5".to_owned()), Kind::Double),
            Some(Scalar::Double(2.5))
        );
        // Integer targets take integer literals only.
        assert_eq!(coerce(&Json::Str("3.5".to_owned()), Kind::Int), None);
        assert_eq!(coerce(&Json::Str("-1".to_owned()), Kind::UInt), None);
        assert_eq!(coerce(&Json::Str("abc".to_owned()), Kind::Double), None);
    }

    #[test]
    fn numbers_and_bools_render_into_string_targets() {
        assert_eq!(
            crossed(&Json::Num(3.14), Kind::Str),
            Some(Scalar::Str("3.14".to_owned()))
        );
        assert_eq!(
            crossed(&Json::Num(3.0), Kind::Str),
            Some(Scalar::Str("3".to_owned()))
        );
        assert_eq!(
            crossed(&Json::Bool(true), Kind::Str),
            Some(Scalar::Str("true".to_owned()))
        );
    }

    #[test]
    fn no_numeric_to_bool_rule() {
        assert_eq!(coerce(&Json::Num(1.0), Kind::Bool), None);
        assert_eq!(coerce(&Json::Str("true".to_owned()), Kind::Bool), None);
    }

    #[test]
    fn fractional_numbers_stay_out_of_integer_targets() {
        assert_eq!(coerce(&Json::Num(3.14), Kind::Int), None);
        assert_eq!(coerce(&Json::Num(-1.0), Kind::UInt), None);
        assert_eq!(
            coerce(&Json::Num(-3.0), Kind::Int).map(|c| c.value),
            Some(Scalar::Int(-3))
        );
    }

    #[test]
    fn containers_never_coerce_to_scalars() {
        for kind in CASCADE {
            assert_eq!(coerce(&Json::Array(Vec::new()), kind), None);
            assert_eq!(coerce(&Json::Object(Vec::new()), kind), None);
            assert_eq!(coerce(&Json::Null, kind), None);
        }
    }

    #[test]
    fn default_policy_table() {
        assert_eq!(Kind::Bool.default_scalar(), Scalar::Bool(false));
        assert_eq!(Kind::Str.default_scalar(), Scalar::Str(String::new()));
        assert_eq!(Kind::Int.default_scalar(), Scalar::Int(0));
        assert_eq!(Kind::UInt.default_scalar(), Scalar::UInt(0));
        assert_eq!(Kind::Double.default_scalar(), Scalar::Double(0.0));
        assert_eq!(Kind::Float.default_scalar(), Scalar::Float(0.0));
    }

    #[test]
    fn adapter_stringification_is_lossy_for_composites() {
        assert_eq!(stringify_element(&Json::Str("two".to_owned())), "two");
        assert_eq!(stringify_element(&Json::Num(1.0)), "1");
        assert_eq!(stringify_element(&Json::Bool(true)), "true");
        assert_eq!(stringify_element(&Json::Null), "");
        assert_eq!(stringify_element(&Json::Object(Vec::new())), "");
    }
}
