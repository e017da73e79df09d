//! Object-safe transport contract for calls into the bridge global object.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TransportError;

/// Object-safe boxed future used by [`BridgeTransport`] async methods.
pub type BridgeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Bridge method performing the capability handshake.
pub const CONNECT_METHOD: &str = "connect";
/// Bridge method accepting `{ operation, path }` dispatch requests.
pub const DISPATCH_METHOD: &str = "processFile";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// One concrete call against the bridge object.
pub enum BridgeCall {
    /// `bridge[name](arg?)`.
    Method {
        /// Method name on the bridge object.
        name: String,
        /// Optional single argument.
        arg: Option<Value>,
    },
    /// `bridge.processFile({ operation, path? })`.
    Dispatch {
        /// Operation tag understood by the bridge.
        operation: String,
        /// Target path, omitted for path-less operations.
        path: Option<String>,
    },
}

impl BridgeCall {
    /// Returns the bridge method this call invokes.
    pub fn method_name(&self) -> &str {
        match self {
            Self::Method { name, .. } => name,
            Self::Dispatch { .. } => DISPATCH_METHOD,
        }
    }

    /// Returns the argument passed to [`Self::method_name`].
    pub fn argument(&self) -> Option<Value> {
        match self {
            Self::Method { arg, .. } => arg.clone(),
            Self::Dispatch { operation, path } => {
                let mut request = json!({ "operation": operation });
                if let Some(path) = path {
                    request["path"] = Value::String(path.clone());
                }
                Some(request)
            }
        }
    }

    /// Returns the script key used by [`ScriptedBridgeTransport`], e.g. `processFile:read`.
    pub fn script_key(&self) -> String {
        match self {
            Self::Method { name, .. } => name.clone(),
            Self::Dispatch { operation, .. } => format!("{DISPATCH_METHOD}:{operation}"),
        }
    }

    fn target_path(&self) -> Option<&str> {
        match self {
            Self::Method { arg, .. } => arg.as_ref().and_then(Value::as_str),
            Self::Dispatch { path, .. } => path.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Page-level availability of the bridge global object.
pub enum BridgePresence {
    /// Still waiting for the ready event or the detection timeout.
    #[default]
    Detecting,
    /// The bridge global object is available.
    Ready,
    /// The detection timeout elapsed without the bridge appearing; terminal for the session.
    Missing,
}

/// Host transport for raw calls into the bridge global object.
pub trait BridgeTransport {
    /// Returns whether the bridge global object currently exists.
    fn is_present(&self) -> bool;

    /// Performs one call and resolves with the raw JSON payload.
    fn invoke<'a>(&'a self, call: &'a BridgeCall) -> BridgeFuture<'a, Result<Value, TransportError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Transport for hosts without a bridge; reports absence for every call.
pub struct NoopBridgeTransport;

impl BridgeTransport for NoopBridgeTransport {
    fn is_present(&self) -> bool {
        false
    }

    fn invoke<'a>(&'a self, call: &'a BridgeCall) -> BridgeFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            Err(TransportError::Fault(format!(
                "bridge unavailable: {}",
                call.method_name()
            )))
        })
    }
}

#[derive(Debug, Clone)]
enum ScriptedReply {
    Respond(Value),
    Reject(String),
    Fault(String),
}

#[derive(Debug, Clone)]
/// In-memory transport replaying canned replies keyed by [`BridgeCall::script_key`].
///
/// A key suffixed with `@<path>` only matches calls targeting that path and takes precedence
/// over the bare key. Unscripted dedicated methods report [`TransportError::MissingMethod`];
/// unscripted dispatch operations are rejected, as a real bridge rejects unknown operation tags.
pub struct ScriptedBridgeTransport {
    present: bool,
    replies: Rc<RefCell<HashMap<String, ScriptedReply>>>,
    calls: Rc<RefCell<Vec<BridgeCall>>>,
}

impl Default for ScriptedBridgeTransport {
    fn default() -> Self {
        Self {
            present: true,
            replies: Rc::new(RefCell::new(HashMap::new())),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ScriptedBridgeTransport {
    /// Builds a transport whose bridge global object is absent.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::default()
        }
    }

    /// Scripts a successful reply.
    pub fn respond(self, key: impl Into<String>, payload: Value) -> Self {
        self.script(key, ScriptedReply::Respond(payload))
    }

    /// Scripts a rejected promise.
    pub fn reject(self, key: impl Into<String>, reason: impl Into<String>) -> Self {
        self.script(key, ScriptedReply::Reject(reason.into()))
    }

    /// Scripts a transport fault.
    pub fn fault(self, key: impl Into<String>, reason: impl Into<String>) -> Self {
        self.script(key, ScriptedReply::Fault(reason.into()))
    }

    /// Returns every call performed so far, in order.
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.borrow().clone()
    }

    fn script(self, key: impl Into<String>, reply: ScriptedReply) -> Self {
        self.replies.borrow_mut().insert(key.into(), reply);
        self
    }

    fn lookup(&self, call: &BridgeCall) -> Option<ScriptedReply> {
        let key = call.script_key();
        let replies = self.replies.borrow();
        call.target_path()
            .and_then(|path| replies.get(&format!("{key}@{path}")))
            .or_else(|| replies.get(&key))
            .cloned()
    }
}

impl BridgeTransport for ScriptedBridgeTransport {
    fn is_present(&self) -> bool {
        self.present
    }

    fn invoke<'a>(&'a self, call: &'a BridgeCall) -> BridgeFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            self.calls.borrow_mut().push(call.clone());
            match self.lookup(call) {
                Some(ScriptedReply::Respond(payload)) => Ok(payload),
                Some(ScriptedReply::Reject(reason)) => Err(TransportError::Rejected(reason)),
                Some(ScriptedReply::Fault(reason)) => Err(TransportError::Fault(reason)),
                None => match call {
                    BridgeCall::Method { name, .. } => {
                        Err(TransportError::MissingMethod(name.clone()))
                    }
                    BridgeCall::Dispatch { operation, .. } => Err(TransportError::Rejected(
                        format!("unsupported operation `{operation}`"),
                    )),
                },
            }
        })
    }
}
