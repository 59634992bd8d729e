//! The typed decode surface: target descriptors, the [`Decode`] trait,
//! decode scopes, and the error type.

use std::collections::BTreeMap;

use chumsky::span::SimpleSpan;

use crate::audit::{Audit, Event};
use crate::coerce::{self, Kind, Scalar};
use crate::parser::Json;
use crate::spanned::Spanned;

/// What shape a decode target asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    /// One of the six primitive kinds; strict decode never fails for these.
    Primitive(Kind),
    /// An opaque composite; strict decode runs the fallback chain.
    Structured,
}

/// Decode failure. Lenient decoding rarely produces one: primitive members
/// default, optional decodes collapse to "no value", and only the structured
/// fallback chain fails, atomically, after all three strategies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("member `{path}` cannot be decoded: {reason}")]
    Corrupted {
        path: String,
        span: SimpleSpan<usize>,
        reason: String,
    },
    #[error("expected an object, found {found}")]
    NotAnObject {
        found: &'static str,
        span: SimpleSpan<usize>,
    },
}

impl Error {
    /// The span the failure should be reported against.
    pub fn span(&self) -> SimpleSpan<usize> {
        match self {
            Error::Corrupted { span, .. } | Error::NotAnObject { span, .. } => *span,
        }
    }
}

/// The key path from the decode root to the value being decoded, plus the
/// optional audit sink. Scoped to one decode invocation.
#[derive(Clone)]
pub struct Scope<'a> {
    path: String,
    audit: Option<&'a dyn Audit>,
}

impl<'a> Scope<'a> {
    pub fn root() -> Self {
        Scope {
            path: String::new(),
            audit: None,
        }
    }

    pub fn with_audit(sink: &'a dyn Audit) -> Self {
        Scope {
            path: String::new(),
            audit: Some(sink),
        }
    }

    /// The dotted key path from the root, e.g. `escort.limits[2].max`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn member(&self, key: &str) -> Scope<'a> {
        let path = if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        };
        Scope {
            path,
            audit: self.audit,
        }
    }

    pub fn element(&self, index: usize) -> Scope<'a> {
        Scope {
            path: format!("{}[{index}]", self.path),
            audit: self.audit,
        }
    }

    pub(crate) fn record(&self, event: Event) {
        if let Some(sink) = self.audit {
            sink.record(event);
        }
    }

    pub(crate) fn corrupted(&self, span: SimpleSpan<usize>, reason: impl Into<String>) -> Error {
        let path = if self.path.is_empty() {
            "<root>".to_owned()
        } else {
            self.path.clone()
        };
        Error::Corrupted {
            path,
            span,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("path", &self.path)
            .field("audited", &self.audit.is_some())
            .finish()
    }
}

/// A type decodable from the node tree under lenient rules.
///
/// Structured schema types implement [`Decode::decode`] by binding a
/// [`crate::Fields`] container and decoding their members through it. The
/// two acceptance hooks matter only to types that participate in the generic
/// dispatch cascade (see [`crate::Fields::opt`]): `accept_scalar` is the
/// cascade's runtime is-a check, `accept_string_seq` admits the
/// heterogeneous array adapter's output.
pub trait Decode: Sized {
    /// Target type descriptor; drives strict-decode dispatch.
    const DESCRIPTOR: Descriptor = Descriptor::Structured;

    /// Structural decode of a present node.
    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error>;

    /// Whether a coerced scalar is a legal instance of this type.
    fn accept_scalar(_value: Scalar) -> Option<Self> {
        None
    }

    /// Whether a stringified array is a legal instance of this type. Only
    /// sequence-of-string-shaped types should accept.
    fn accept_string_seq(_items: Vec<String>) -> Option<Self> {
        None
    }
}

/// Decode a whole document: structural decode of the root node as `T`.
pub fn decode_node<T: Decode>(root: &Spanned<Json>) -> Result<T, Error> {
    T::decode(root, &Scope::root())
}

/// Like [`decode_node`], reporting every silent recovery to `sink`.
pub fn decode_node_with_audit<T: Decode>(
    root: &Spanned<Json>,
    sink: &dyn Audit,
) -> Result<T, Error> {
    T::decode(root, &Scope::with_audit(sink))
}

/// Run the scalar engine against a present node, recording the recovered
/// mismatch when a cross conversion fires.
pub(crate) fn primitive<T: Decode>(
    node: &Spanned<Json>,
    scope: &Scope<'_>,
    kind: Kind,
) -> Result<T, Error> {
    let coerced = coerce::coerce(&node.val, kind).ok_or_else(|| {
        scope.corrupted(
            node.span,
            format!(
                "expected {}, found {}",
                kind.desc(),
                node.val.kind_desc()
            ),
        )
    })?;
    if coerced.crossed {
        scope.record(Event::Coerced {
            path: scope.path().to_owned(),
            span: node.span,
            from: node.val.kind_desc(),
            to: kind,
        });
    }
    T::accept_scalar(coerced.value).ok_or_else(|| {
        scope.corrupted(
            node.span,
            format!("coerced value is not a legal {}", kind.desc()),
        )
    })
}

impl Decode for bool {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::Bool);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<bool>(node, scope, Kind::Bool)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Decode for String {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::Str);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<String>(node, scope, Kind::Str)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Decode for i64 {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::Int);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<i64>(node, scope, Kind::Int)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl Decode for u64 {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::UInt);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<u64>(node, scope, Kind::UInt)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::UInt(n) => Some(n),
            _ => None,
        }
    }
}

impl Decode for f64 {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::Double);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<f64>(node, scope, Kind::Double)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Double(n) => Some(n),
            _ => None,
        }
    }
}

impl Decode for f32 {
    const DESCRIPTOR: Descriptor = Descriptor::Primitive(Kind::Float);

    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        primitive::<f32>(node, scope, Kind::Float)
    }

    fn accept_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        let Json::Array(elems) = &node.val else {
            return Err(scope.corrupted(
                node.span,
                format!("expected array, found {}", node.val.kind_desc()),
            ));
        };
        elems
            .iter()
            .enumerate()
            .map(|(i, elem)| T::decode(elem, &scope.element(i)))
            .collect()
    }

    fn accept_string_seq(items: Vec<String>) -> Option<Self> {
        items
            .into_iter()
            .map(|s| T::accept_scalar(Scalar::Str(s)))
            .collect()
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        let Json::Object(members) = &node.val else {
            return Err(scope.corrupted(
                node.span,
                format!("expected object, found {}", node.val.kind_desc()),
            ));
        };
        members
            .iter()
            .map(|(name, val)| {
                let decoded = T::decode(val, &scope.member(&name.val))?;
                Ok((name.val.clone(), decoded))
            })
            .collect()
    }
}
