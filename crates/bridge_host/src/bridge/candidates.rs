//! Candidate call sequences tried against bridges whose supported API is unknown in advance.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{BridgeCall, DISPATCH_METHOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Navigator-level operation served by a candidate sequence.
pub enum BridgeOperation {
    /// Initial root-folder selection.
    SelectFolder,
    /// Directory listing while browsing.
    ListDirectory,
    /// File content read.
    ReadFile,
}

impl BridgeOperation {
    /// Returns a stable label for diagnostics and status messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectFolder => "folder selection",
            Self::ListDirectory => "directory listing",
            Self::ReadFile => "file read",
        }
    }
}

impl fmt::Display for BridgeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "kebab-case")]
/// One alternative call shape in a candidate sequence.
pub enum Candidate {
    /// A dedicated method on the bridge object, e.g. `bridge.requestFolder()`.
    Method(String),
    /// The generic dispatch method carrying an operation tag, e.g.
    /// `bridge.processFile({ operation: "read", path })`.
    Dispatch(String),
}

impl Candidate {
    /// Builds a dedicated-method candidate.
    pub fn method(name: impl Into<String>) -> Self {
        Self::Method(name.into())
    }

    /// Builds a generic-dispatch candidate.
    pub fn dispatch(operation: impl Into<String>) -> Self {
        Self::Dispatch(operation.into())
    }

    /// Builds the concrete call for this candidate, targeting `path` when one is given.
    ///
    /// Dedicated methods receive the path as their only argument.
    pub fn to_call(&self, path: Option<&str>) -> BridgeCall {
        match self {
            Self::Method(name) => BridgeCall::Method {
                name: name.clone(),
                arg: path.map(|p| Value::String(p.to_string())),
            },
            Self::Dispatch(operation) => BridgeCall::Dispatch {
                operation: operation.clone(),
                path: path.map(str::to_string),
            },
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(name) => f.write_str(name),
            Self::Dispatch(operation) => write!(f, "{DISPATCH_METHOD}({operation})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Ordered candidate sequences per operation.
///
/// Folder selection and browsing deliberately use different sequences: selection may open a
/// picker through any of several method names, while browsing only ever dispatches a listing
/// operation for a known path.
pub struct CandidateSequences {
    /// Sequence used for initial folder selection.
    pub folder_selection: Vec<Candidate>,
    /// Sequence used for directory listing while browsing.
    pub browse: Vec<Candidate>,
    /// Sequence used for reading file content.
    pub read: Vec<Candidate>,
}

impl Default for CandidateSequences {
    fn default() -> Self {
        Self {
            folder_selection: vec![
                Candidate::method("selectFolder"),
                Candidate::method("requestFolder"),
                Candidate::method("openFolderPicker"),
                Candidate::dispatch("listContents"),
                Candidate::dispatch("listFolder"),
            ],
            browse: vec![Candidate::dispatch("listContents")],
            read: vec![
                Candidate::method("readFile"),
                Candidate::dispatch("read"),
                Candidate::dispatch("readFile"),
                Candidate::dispatch("getFileContents"),
                Candidate::dispatch("getContent"),
            ],
        }
    }
}

impl CandidateSequences {
    /// Returns the sequence configured for `operation`.
    pub fn for_operation(&self, operation: BridgeOperation) -> &[Candidate] {
        match operation {
            BridgeOperation::SelectFolder => &self.folder_selection,
            BridgeOperation::ListDirectory => &self.browse,
            BridgeOperation::ReadFile => &self.read,
        }
    }
}
