//! Bridge client: capability handshake plus candidate-sequenced folder, listing, and read calls.

use std::rc::Rc;

use serde_json::Value;

use super::candidates::{BridgeOperation, Candidate, CandidateSequences};
use super::transport::{BridgeCall, BridgeTransport, CONNECT_METHOD};
use crate::config::NavigatorConfig;
use crate::error::{BridgeError, TransportError};
use crate::events::{BridgeEvent, BridgeEventSink};
use crate::normalize::{
    content::normalize_file_content, folder::normalize_folder_path, is_truthy,
    listing::{normalize_listing, Listing},
};

#[derive(Debug, Clone, PartialEq)]
/// Successful handshake acknowledgement.
pub struct ConnectionAck {
    /// Capabilities that were requested.
    pub capabilities: Vec<String>,
    /// Raw handshake response.
    pub response: Value,
}

#[derive(Clone)]
/// Client for the bridge global object.
///
/// Each operation checks bridge presence, walks its candidate sequence in order, and stops at the
/// first candidate that resolves. Missing methods and rejected calls move on to the next
/// candidate; transport faults abort the sequence. Every step is reported to the event sink.
pub struct BridgeClient {
    transport: Rc<dyn BridgeTransport>,
    sink: Rc<dyn BridgeEventSink>,
    candidates: CandidateSequences,
    capabilities: Vec<String>,
}

impl BridgeClient {
    /// Builds a client with default candidate sequences and capabilities.
    pub fn new(transport: Rc<dyn BridgeTransport>, sink: Rc<dyn BridgeEventSink>) -> Self {
        Self::from_config(transport, sink, &NavigatorConfig::default())
    }

    /// Builds a client using the sequences and capabilities from `config`.
    pub fn from_config(
        transport: Rc<dyn BridgeTransport>,
        sink: Rc<dyn BridgeEventSink>,
        config: &NavigatorConfig,
    ) -> Self {
        Self {
            transport,
            sink,
            candidates: config.candidates.clone(),
            capabilities: config.capabilities.clone(),
        }
    }

    /// Returns whether the bridge global object currently exists.
    pub fn is_bridge_present(&self) -> bool {
        self.transport.is_present()
    }

    /// Performs the capability handshake with the configured capabilities.
    ///
    /// # Errors
    ///
    /// Same as [`Self::connect_with`].
    pub async fn connect(&self) -> Result<ConnectionAck, BridgeError> {
        self.connect_with(&self.capabilities).await
    }

    /// Performs the capability handshake requesting `capabilities`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::BridgeUnavailable`] when the bridge is absent,
    /// [`BridgeError::HandshakeRejected`] when the bridge answers without a truthy `success` flag
    /// or rejects the call, and [`BridgeError::UnexpectedException`] on transport faults.
    pub async fn connect_with(&self, capabilities: &[String]) -> Result<ConnectionAck, BridgeError> {
        if !self.is_bridge_present() {
            return self.fail(CONNECT_METHOD, BridgeError::BridgeUnavailable);
        }

        self.sink.record(&BridgeEvent::HandshakeAttempted {
            capabilities: capabilities.to_vec(),
        });
        let call = BridgeCall::Method {
            name: CONNECT_METHOD.to_string(),
            arg: Some(Value::from(capabilities.to_vec())),
        };

        let result = match self.transport.invoke(&call).await {
            Ok(response) if is_truthy(response.get("success")) => Ok(response),
            Ok(response) => Err(BridgeError::HandshakeRejected(
                response
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("Failed to connect to the bridge.")
                    .to_string(),
            )),
            Err(TransportError::Fault(reason)) => Err(BridgeError::UnexpectedException(reason)),
            Err(err) => Err(BridgeError::HandshakeRejected(err.to_string())),
        };

        match result {
            Ok(response) => {
                self.sink.record(&BridgeEvent::HandshakeSucceeded);
                Ok(ConnectionAck {
                    capabilities: capabilities.to_vec(),
                    response,
                })
            }
            Err(err) => self.fail(CONNECT_METHOD, err),
        }
    }

    /// Asks the bridge for a root folder and returns its path.
    ///
    /// # Errors
    ///
    /// Returns the sequencing errors of [`Self::list_directory`], or
    /// [`BridgeError::NoPathInResponse`] when the first resolving candidate carries no path.
    pub async fn select_folder(&self) -> Result<String, BridgeError> {
        let operation = BridgeOperation::SelectFolder;
        let (_, payload) = self.run_candidates(operation, None).await?;
        normalize_folder_path(&payload).or_else(|err| self.fail(operation.as_str(), err))
    }

    /// Returns the raw listing payload for `path` from the browse sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::BridgeUnavailable`] when the bridge is absent,
    /// [`BridgeError::NoSupportedOperation`] when every candidate fails, and
    /// [`BridgeError::UnexpectedException`] on transport faults.
    pub async fn list_directory(&self, path: &str) -> Result<Value, BridgeError> {
        self.run_candidates(BridgeOperation::ListDirectory, Some(path))
            .await
            .map(|(_, payload)| payload)
    }

    /// Lists `path` and normalizes the payload into canonical entries.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::list_directory`], or
    /// [`BridgeError::UnrecognizedListingShape`] for unreadable payloads.
    pub async fn browse(&self, path: &str) -> Result<Listing, BridgeError> {
        let payload = self.list_directory(path).await?;
        match normalize_listing(&payload) {
            Ok(listing) => {
                self.sink.record(&BridgeEvent::ShapeRecognized {
                    shape: listing.shape,
                    entries: listing.entries.len(),
                });
                Ok(listing)
            }
            Err(err) => self.fail(BridgeOperation::ListDirectory.as_str(), err),
        }
    }

    /// Returns the raw read payload for `path` from the read sequence.
    ///
    /// # Errors
    ///
    /// Same sequencing errors as [`Self::list_directory`].
    pub async fn read_file(&self, path: &str) -> Result<Value, BridgeError> {
        self.run_candidates(BridgeOperation::ReadFile, Some(path))
            .await
            .map(|(_, payload)| payload)
    }

    /// Reads `path` and normalizes the payload into displayable text.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::read_file`], or [`BridgeError::UnreadableContent`].
    pub async fn read_text(&self, path: &str) -> Result<String, BridgeError> {
        let payload = self.read_file(path).await?;
        normalize_file_content(&payload)
            .or_else(|err| self.fail(BridgeOperation::ReadFile.as_str(), err))
    }

    async fn run_candidates(
        &self,
        operation: BridgeOperation,
        path: Option<&str>,
    ) -> Result<(Candidate, Value), BridgeError> {
        if !self.is_bridge_present() {
            return self.fail(operation.as_str(), BridgeError::BridgeUnavailable);
        }

        let candidates = self.candidates.for_operation(operation);
        let mut attempted = Vec::with_capacity(candidates.len());
        let mut last_failure = None;

        for candidate in candidates {
            self.sink.record(&BridgeEvent::attempted(operation, candidate));
            attempted.push(candidate.to_string());

            let call = candidate.to_call(path);
            match self.transport.invoke(&call).await {
                Ok(payload) => {
                    self.sink.record(&BridgeEvent::succeeded(operation, candidate));
                    return Ok((candidate.clone(), payload));
                }
                Err(TransportError::Fault(reason)) => {
                    return self.fail(operation.as_str(), BridgeError::UnexpectedException(reason));
                }
                Err(err) => {
                    let reason = err.to_string();
                    self.sink.record(&BridgeEvent::CandidateFailed {
                        operation,
                        candidate: candidate.to_string(),
                        reason: reason.clone(),
                    });
                    last_failure = Some(reason);
                }
            }
        }

        self.fail(
            operation.as_str(),
            BridgeError::NoSupportedOperation {
                operation,
                attempted,
                last_failure,
            },
        )
    }

    fn fail<T>(&self, operation: &str, error: BridgeError) -> Result<T, BridgeError> {
        self.sink.record(&BridgeEvent::OperationFailed {
            operation: operation.to_string(),
            error: error.clone(),
        });
        Err(error)
    }
}
