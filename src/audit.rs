//! Optional observability for silent recoveries.
//!
//! Leniency is the whole point of this crate, so recoveries are never
//! surfaced to the caller as errors. They are still worth counting: a sink
//! implementing [`Audit`] receives one [`Event`] per recovery, letting
//! implementers measure how often coercion fires against a given producer.
//! Decode results are identical with or without a sink.

use std::cell::RefCell;

use chumsky::span::SimpleSpan;
use serde::Serialize;
use tracing::debug;

use crate::coerce::Kind;

/// A silent recovery performed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A cross-type conversion resolved a member whose node kind differed
    /// from the target.
    Coerced {
        path: String,
        span: SimpleSpan<usize>,
        from: &'static str,
        to: Kind,
    },
    /// An absent (or unresolvable) member was substituted with the target
    /// kind's default.
    Defaulted { path: String, target: Kind },
    /// A structured member decoded from the synthesized empty object.
    FallbackEmptyObject { path: String },
    /// A structured member decoded from the synthesized empty array.
    FallbackEmptyArray { path: String },
    /// An array was reinterpreted as a sequence of stringified elements;
    /// `lossy` counts the elements that collapsed to `""`.
    ArrayAdapted {
        path: String,
        span: SimpleSpan<usize>,
        lossy: usize,
    },
    /// An object defined the same member more than once; the last
    /// definition won.
    DuplicateMember { path: String, span: SimpleSpan<usize> },
}

/// A sink for [`Event`]s. Implementations must not assume any ordering
/// between sibling members beyond the order the caller decodes them in.
pub trait Audit {
    fn record(&self, event: Event);
}

/// A sink that retains every event, for tests and offline inspection.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<Event> {
        self.events.take()
    }
}

impl Audit for Recorder {
    fn record(&self, event: Event) {
        debug!(?event, "recovery");
        self.events.borrow_mut().push(event);
    }
}
