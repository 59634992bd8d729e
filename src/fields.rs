//! The field container: a per-object view over member names and nodes, and
//! the per-key decode entry points.

use chumsky::span::SimpleSpan;
use indexmap::IndexMap;
use tracing::debug;

use crate::audit::{Audit, Event};
use crate::coerce::{self, Kind, CASCADE};
use crate::decode::{self, Decode, Descriptor, Error, Scope};
use crate::edit_distance;
use crate::parser::Json;
use crate::spanned::Spanned;

/// A view bound to one object node: key-presence queries and per-key decode.
///
/// Duplicate member names resolve last-wins (recorded as
/// [`Event::DuplicateMember`]). The view is stateless across calls;
/// querying the same key twice yields identical results.
pub struct Fields<'a> {
    members: IndexMap<&'a str, &'a Spanned<Json>>,
    span: SimpleSpan<usize>,
    scope: Scope<'a>,
}

impl<'a> Fields<'a> {
    /// Bind to a top-level object node.
    pub fn new(root: &'a Spanned<Json>) -> Result<Self, Error> {
        Self::in_scope(root, &Scope::root())
    }

    /// Bind to a top-level object node, reporting every silent recovery to
    /// `sink`.
    pub fn with_audit(root: &'a Spanned<Json>, sink: &'a dyn Audit) -> Result<Self, Error> {
        Self::in_scope(root, &Scope::with_audit(sink))
    }

    /// Bind to an object node inside an ongoing decode. [`Decode`]
    /// implementations call this with the scope they were handed.
    pub fn in_scope(node: &'a Spanned<Json>, scope: &Scope<'a>) -> Result<Self, Error> {
        let Json::Object(raw) = &node.val else {
            return Err(Error::NotAnObject {
                found: node.val.kind_desc(),
                span: node.span,
            });
        };
        let mut members = IndexMap::with_capacity(raw.len());
        for (name, val) in raw {
            if members.insert(name.val.as_str(), val).is_some() {
                debug!(member = %name.val, "member defined multiple times; last definition wins");
                scope.record(Event::DuplicateMember {
                    path: scope.member(&name.val).path().to_owned(),
                    span: name.span,
                });
            }
        }
        Ok(Fields {
            members,
            span: node.span,
            scope: scope.clone(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Spanned<Json>> {
        self.members.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.keys().copied()
    }

    /// Span of the underlying object node.
    pub fn span(&self) -> SimpleSpan<usize> {
        self.span
    }

    // Strict primitive decodes. These never fail: an absent member (or one
    // no coercion rule resolves) yields the kind's default.

    pub fn decode_bool(&self, key: &str) -> bool {
        match self.opt_bool(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::Bool);
                false
            }
        }
    }

    pub fn decode_string(&self, key: &str) -> String {
        match self.opt_string(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::Str);
                String::new()
            }
        }
    }

    pub fn decode_i64(&self, key: &str) -> i64 {
        match self.opt_i64(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::Int);
                0
            }
        }
    }

    pub fn decode_u64(&self, key: &str) -> u64 {
        match self.opt_u64(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::UInt);
                0
            }
        }
    }

    pub fn decode_f64(&self, key: &str) -> f64 {
        match self.opt_f64(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::Double);
                0.0
            }
        }
    }

    pub fn decode_f32(&self, key: &str) -> f32 {
        match self.opt_f32(key) {
            Some(v) => v,
            None => {
                self.record_default(key, Kind::Float);
                0.0
            }
        }
    }

    // Optional primitive decodes: `None` when the key is absent, or present
    // but unresolvable for the target kind. Neither case is an error.

    pub fn opt_bool(&self, key: &str) -> Option<bool> {
        self.opt_primitive::<bool>(key, Kind::Bool)
    }

    pub fn opt_string(&self, key: &str) -> Option<String> {
        self.opt_primitive::<String>(key, Kind::Str)
    }

    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        self.opt_primitive::<i64>(key, Kind::Int)
    }

    pub fn opt_u64(&self, key: &str) -> Option<u64> {
        self.opt_primitive::<u64>(key, Kind::UInt)
    }

    pub fn opt_f64(&self, key: &str) -> Option<f64> {
        self.opt_primitive::<f64>(key, Kind::Double)
    }

    pub fn opt_f32(&self, key: &str) -> Option<f32> {
        self.opt_primitive::<f32>(key, Kind::Float)
    }

    fn opt_primitive<T: Decode>(&self, key: &str, kind: Kind) -> Option<T> {
        let node = self.get(key)?;
        decode::primitive::<T>(node, &self.scope.member(key), kind).ok()
    }

    fn record_default(&self, key: &str, target: Kind) {
        self.scope.record(Event::Defaulted {
            path: self.scope.member(key).path().to_owned(),
            target,
        });
    }

    /// Strict decode of `key` as `T`.
    ///
    /// Primitive-descriptor targets go through the default policy and never
    /// fail. Structured targets try, in order: direct decode of the present
    /// node, decode from the synthesized empty object, decode from the
    /// synthesized empty array. Only when all three fail does the member
    /// fail, atomically, with [`Error::Corrupted`]. No partially-defaulted
    /// composite is ever produced.
    pub fn decode<T: Decode>(&self, key: &str) -> Result<T, Error> {
        if let Descriptor::Primitive(kind) = T::DESCRIPTOR {
            return match self.opt_primitive::<T>(key, kind) {
                Some(v) => Ok(v),
                None => {
                    self.record_default(key, kind);
                    T::accept_scalar(kind.default_scalar()).ok_or_else(|| {
                        self.scope
                            .member(key)
                            .corrupted(self.span, format!("no default for {}", kind.desc()))
                    })
                }
            };
        }

        let scope = self.scope.member(key);
        let node = self.get(key);
        if let Some(node) = node {
            match T::decode(node, &scope) {
                Ok(v) => return Ok(v),
                Err(err) => debug!(%err, "direct decode failed; trying fallbacks"),
            }
        }
        if let Ok(v) = T::decode(&empty_object(), &scope) {
            scope.record(Event::FallbackEmptyObject {
                path: scope.path().to_owned(),
            });
            return Ok(v);
        }
        if let Ok(v) = T::decode(&empty_array(), &scope) {
            scope.record(Event::FallbackEmptyArray {
                path: scope.path().to_owned(),
            });
            return Ok(v);
        }
        let (span, reason) = match node {
            Some(node) => (
                node.span,
                format!(
                    "no decoding strategy accepted {}",
                    node.val.kind_desc()
                ),
            ),
            None => {
                let reason = match edit_distance::find_best_match_for_name(self.keys(), key, None) {
                    Some(found) => {
                        format!("member is missing; a member named `{found}` is present, possibly misspelled")
                    }
                    None => "member is missing".to_owned(),
                };
                (self.span, reason)
            }
        };
        Err(scope.corrupted(span, reason))
    }

    /// Lenient decode-if-present of `key` as any `T`: the generic dispatch
    /// cascade.
    ///
    /// A present key is first offered to each primitive interpretation in
    /// the fixed priority order [`CASCADE`]: the first kind that both
    /// coerces successfully and passes `T`'s acceptance check wins. The
    /// order is deliberately left-biased and order-sensitive: a member
    /// holding the literal string `"true"` asked for as `bool` resolves
    /// through the string branch, fails acceptance, and (there being no
    /// string-to-bool cross rule) ends up as `None`. Callers relying on
    /// such a member should declare it `String`.
    ///
    /// After the primitive table: an absent key is `None`; otherwise a
    /// direct structural decode is attempted; failing that, an array node is
    /// run through the heterogeneous array adapter if `T` accepts a sequence
    /// of strings. Anything else is `None`, never an error.
    pub fn opt<T: Decode>(&self, key: &str) -> Option<T> {
        let node = self.get(key)?;
        let scope = self.scope.member(key);
        for kind in CASCADE {
            let Some(coerced) = coerce::coerce(&node.val, kind) else {
                continue;
            };
            let crossed = coerced.crossed;
            if let Some(value) = T::accept_scalar(coerced.value) {
                if crossed {
                    scope.record(Event::Coerced {
                        path: scope.path().to_owned(),
                        span: node.span,
                        from: node.val.kind_desc(),
                        to: kind,
                    });
                }
                return Some(value);
            }
        }
        if let Ok(value) = T::decode(node, &scope) {
            return Some(value);
        }
        if let Json::Array(elems) = &node.val {
            let lossy = elems
                .iter()
                .filter(|e| !matches!(e.val, Json::Str(_) | Json::Num(_) | Json::Bool(_)))
                .count();
            let items: Vec<String> = elems
                .iter()
                .map(|e| coerce::stringify_element(&e.val))
                .collect();
            if let Some(value) = T::accept_string_seq(items) {
                scope.record(Event::ArrayAdapted {
                    path: scope.path().to_owned(),
                    span: node.span,
                    lossy,
                });
                return Some(value);
            }
        }
        None
    }
}

fn empty_object() -> Spanned<Json> {
    Spanned::synthetic(Json::Object(Vec::new()))
}

fn empty_array() -> Spanned<Json> {
    Spanned::synthetic(Json::Array(Vec::new()))
}
