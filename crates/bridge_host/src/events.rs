//! Observability sink for bridge calls.
//!
//! Every attempt and outcome of a bridge call is reported here before the client moves on. The
//! sink is advisory only; nothing in the navigator reads events back.

use std::{cell::RefCell, fmt, rc::Rc};

use leptos::logging;

use crate::bridge::candidates::{BridgeOperation, Candidate};
use crate::error::BridgeError;
use crate::normalize::listing::ListingShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity of a [`BridgeEvent`].
pub enum EventLevel {
    /// Normal progress.
    Info,
    /// A candidate failed but the sequence continues.
    Warn,
    /// An operation failed.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
/// Significant step of a bridge interaction.
pub enum BridgeEvent {
    /// The capability handshake was sent.
    HandshakeAttempted {
        /// Capabilities requested.
        capabilities: Vec<String>,
    },
    /// The bridge acknowledged the handshake.
    HandshakeSucceeded,
    /// A candidate call is about to be tried.
    CandidateAttempted {
        /// Operation being served.
        operation: BridgeOperation,
        /// Candidate label.
        candidate: String,
    },
    /// A candidate call resolved.
    CandidateSucceeded {
        /// Operation being served.
        operation: BridgeOperation,
        /// Candidate label.
        candidate: String,
    },
    /// A candidate call failed; the next candidate will be tried.
    CandidateFailed {
        /// Operation being served.
        operation: BridgeOperation,
        /// Candidate label.
        candidate: String,
        /// Transport failure text.
        reason: String,
    },
    /// A listing payload was recognized.
    ShapeRecognized {
        /// Shape that produced the listing.
        shape: ListingShape,
        /// Number of entries produced.
        entries: usize,
    },
    /// A navigator-level operation failed.
    OperationFailed {
        /// Label of the failed operation.
        operation: String,
        /// Terminal error.
        error: BridgeError,
    },
}

impl BridgeEvent {
    pub(crate) fn attempted(operation: BridgeOperation, candidate: &Candidate) -> Self {
        Self::CandidateAttempted {
            operation,
            candidate: candidate.to_string(),
        }
    }

    pub(crate) fn succeeded(operation: BridgeOperation, candidate: &Candidate) -> Self {
        Self::CandidateSucceeded {
            operation,
            candidate: candidate.to_string(),
        }
    }

    /// Returns the event severity.
    pub fn level(&self) -> EventLevel {
        match self {
            Self::CandidateFailed { .. } => EventLevel::Warn,
            Self::OperationFailed { .. } => EventLevel::Error,
            _ => EventLevel::Info,
        }
    }
}

impl fmt::Display for BridgeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeAttempted { capabilities } => {
                write!(f, "connecting with capabilities [{}]", capabilities.join(", "))
            }
            Self::HandshakeSucceeded => f.write_str("connected"),
            Self::CandidateAttempted {
                operation,
                candidate,
            } => write!(f, "{operation}: trying {candidate}"),
            Self::CandidateSucceeded {
                operation,
                candidate,
            } => write!(f, "{operation}: {candidate} succeeded"),
            Self::CandidateFailed {
                operation,
                candidate,
                reason,
            } => write!(f, "{operation}: {candidate} failed: {reason}"),
            Self::ShapeRecognized { shape, entries } => {
                write!(f, "listing recognized as {} ({entries} entries)", shape.as_str())
            }
            Self::OperationFailed { operation, error } => write!(f, "{operation} failed: {error}"),
        }
    }
}

/// Receiver for [`BridgeEvent`]s.
pub trait BridgeEventSink {
    /// Records one event.
    fn record(&self, event: &BridgeEvent);
}

#[derive(Debug, Clone)]
/// Sink writing leveled lines to the browser console (stdout/stderr off-browser).
pub struct ConsoleEventSink {
    prefix: String,
}

impl ConsoleEventSink {
    /// Builds a sink tagging every line with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for ConsoleEventSink {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOG_PREFIX)
    }
}

impl BridgeEventSink for ConsoleEventSink {
    fn record(&self, event: &BridgeEvent) {
        let prefix = &self.prefix;
        match event.level() {
            EventLevel::Info => logging::log!("{prefix} {event}"),
            EventLevel::Warn => logging::warn!("{prefix} {event}"),
            EventLevel::Error => logging::error!("{prefix} {event}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink discarding every event.
pub struct NoopEventSink;

impl BridgeEventSink for NoopEventSink {
    fn record(&self, _event: &BridgeEvent) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory sink keeping every event, used to observe call sequencing.
pub struct MemoryEventSink {
    inner: Rc<RefCell<Vec<BridgeEvent>>>,
}

impl MemoryEventSink {
    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.inner.borrow().clone()
    }

    /// Returns the rendered text of every recorded event.
    pub fn lines(&self) -> Vec<String> {
        self.inner.borrow().iter().map(ToString::to_string).collect()
    }
}

impl BridgeEventSink for MemoryEventSink {
    fn record(&self, event: &BridgeEvent) {
        self.inner.borrow_mut().push(event.clone());
    }
}
