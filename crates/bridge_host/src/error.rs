//! Typed errors for bridge calls and response normalization.

use thiserror::Error;

use crate::bridge::candidates::BridgeOperation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of a navigator-level bridge operation.
///
/// The `Display` text of every variant is the message surfaced in the status line.
pub enum BridgeError {
    /// The bridge global object is absent from the page.
    #[error("Bridge extension not found. Please install it first.")]
    BridgeUnavailable,
    /// The capability handshake failed or returned no success flag.
    #[error("Connection error: {0}")]
    HandshakeRejected(String),
    /// Every candidate in the operation's sequence failed.
    #[error(
        "No supported bridge call for {operation} (tried {tried}){last}",
        tried = .attempted.join(", "),
        last = failure_suffix(.last_failure)
    )]
    NoSupportedOperation {
        /// Operation whose candidate sequence was exhausted.
        operation: BridgeOperation,
        /// Candidates tried, in order.
        attempted: Vec<String>,
        /// Failure reported by the last candidate, if any candidate was tried.
        last_failure: Option<String>,
    },
    /// The listing payload matched none of the known response shapes.
    #[error("Invalid folder contents returned")]
    UnrecognizedListingShape,
    /// The folder-selection response carried no usable path.
    #[error("No folder path was returned by the bridge")]
    NoPathInResponse,
    /// The read response carried no usable content.
    #[error("Unreadable file content returned")]
    UnreadableContent,
    /// A fault was raised while performing a candidate call.
    #[error("Unexpected bridge failure: {0}")]
    UnexpectedException(String),
}

impl BridgeError {
    /// Returns `true` when the error should show the manual folder-picker instructions.
    pub fn needs_manual_picker(&self) -> bool {
        matches!(self, Self::NoPathInResponse)
    }
}

fn failure_suffix(last_failure: &Option<String>) -> String {
    match last_failure {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of a single call through a [`crate::BridgeTransport`].
pub enum TransportError {
    /// The bridge object has no callable member with this name.
    #[error("bridge method `{0}` is not available")]
    MissingMethod(String),
    /// The bridge accepted the call and then rejected it.
    #[error("{0}")]
    Rejected(String),
    /// The call could not be performed or its result could not be read.
    #[error("{0}")]
    Fault(String),
}
