//! laxjson is a lenient deserialization layer over a parsed JSON node tree.
//! The intention is to keep decoding sloppy-but-well-meaning documents from
//! loosely-typed producers. A missing member resolves to its type's default,
//! a number or boolean smuggled inside a string cross-converts, and a
//! composite that arrives as `null` or the wrong shape falls back to its
//! zero value instead of failing the whole decode.
//!
//! We deviate from typical deserialization libraries in that our primary
//! goal is not to be *fast* or *strict*, but to be predictable about
//! recovery: every field is resolved through an explicit, testable cascade
//! of attempts (native kind, cross-type coercion, composite fallbacks, the
//! stringified-array adapter), and every silent recovery can be observed
//! through an optional audit sink. Spans are preserved throughout so
//! failures and findings can be reported against the original source.
//!
//! The parser in [`parser`] owns raw text; the engine itself only ever reads
//! the node tree it produces. Schema types implement [`Decode`] by binding a
//! [`Fields`] container over an object node and pulling their members
//! through it:
//!
//! ```
//! use laxjson::{Decode, Error, Fields, Json, Scope, Spanned};
//!
//! struct Profile {
//!     name: String,
//!     verified: bool,
//!     score: f64,
//! }
//!
//! impl Decode for Profile {
//!     fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
//!         let fields = Fields::in_scope(node, scope)?;
//!         Ok(Profile {
//!             name: fields.decode_string("name"),
//!             verified: fields.decode_bool("verified"),
//!             score: fields.decode_f64("score"),
//!         })
//!     }
//! }
//! ```

mod audit;
mod coerce;
mod decode;
mod edit_distance;
mod fields;
pub mod parser;
mod spanned;

pub use audit::{Audit, Event, Recorder};
pub use coerce::{coerce, number_to_string, stringify_element, Coerced, Kind, Scalar, CASCADE};
pub use decode::{decode_node, decode_node_with_audit, Decode, Descriptor, Error, Scope};
pub use fields::Fields;
pub use parser::{parser, Json};
pub use spanned::{dummy_span, Spanned};
