//! Navigation stack for one browsing descent below the selected root folder.
//!
//! The stack is never empty: it is created with the selected root and every operation keeps at
//! least that element. The current path is always the last element.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fs::path::{join_child_path, path_segments};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Behavior of [`NavigationState::jump_to`] for a path absent from the stack.
pub enum JumpPolicy {
    /// Reset the stack to the root folder.
    #[default]
    ResetToRoot,
    /// Leave the stack untouched and report [`NavigationError::PathNotInHistory`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a successful [`NavigationState::jump_to`].
pub enum JumpOutcome {
    /// The stack was truncated at the first occurrence of the target.
    Truncated,
    /// The target was not recorded and the stack was reset to the root.
    ResetToRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Navigation failures.
pub enum NavigationError {
    /// A jump targeted a path never recorded in the current descent.
    #[error("path not in navigation history: {0}")]
    PathNotInHistory(String),
    /// A restored stack had no root folder.
    #[error("navigation history is empty")]
    EmptyHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One breadcrumb segment.
pub struct Breadcrumb {
    /// Display label.
    pub label: String,
    /// Jump target, `None` for the current directory.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavigationState")]
/// Ordered, duplicate-permitting stack of visited paths.
pub struct NavigationState {
    stack: Vec<String>,
}

#[derive(Deserialize)]
struct RawNavigationState {
    stack: Vec<String>,
}

impl TryFrom<RawNavigationState> for NavigationState {
    type Error = NavigationError;

    fn try_from(raw: RawNavigationState) -> Result<Self, Self::Error> {
        if raw.stack.is_empty() {
            return Err(NavigationError::EmptyHistory);
        }
        Ok(Self { stack: raw.stack })
    }
}

impl NavigationState {
    /// Starts a descent at `root`, which stays the Home target for the session.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: vec![root.into()],
        }
    }

    /// Returns the root folder.
    pub fn root(&self) -> &str {
        &self.stack[0]
    }

    /// Returns the current path.
    pub fn current_path(&self) -> &str {
        &self.stack[self.stack.len() - 1]
    }

    /// Returns the visited paths, root first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Returns `true` when [`Self::ascend`] would move.
    pub fn can_ascend(&self) -> bool {
        self.stack.len() > 1
    }

    /// Returns the path of child `name` under the current path.
    pub fn child_path(&self, name: &str) -> String {
        join_child_path(self.current_path(), name)
    }

    /// Descends into child directory `name` and returns the new current path.
    pub fn descend(&mut self, name: &str) -> &str {
        let next = self.child_path(name);
        self.stack.push(next);
        self.current_path()
    }

    /// Pops the current path; a no-op at the root. Returns whether the stack moved.
    pub fn ascend(&mut self) -> bool {
        if !self.can_ascend() {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Resets the stack to the root folder.
    pub fn jump_home(&mut self) {
        self.stack.truncate(1);
    }

    /// Jumps to a previously visited `path`.
    ///
    /// A recorded path truncates the stack after its first occurrence. An unrecorded path is
    /// handled by `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::PathNotInHistory`] for an unrecorded path under
    /// [`JumpPolicy::Reject`]; the stack is left unchanged.
    pub fn jump_to(&mut self, path: &str, policy: JumpPolicy) -> Result<JumpOutcome, NavigationError> {
        if let Some(index) = self.stack.iter().position(|visited| visited == path) {
            self.stack.truncate(index + 1);
            return Ok(JumpOutcome::Truncated);
        }

        match policy {
            JumpPolicy::ResetToRoot => {
                self.jump_home();
                Ok(JumpOutcome::ResetToRoot)
            }
            JumpPolicy::Reject => Err(NavigationError::PathNotInHistory(path.to_string())),
        }
    }

    /// Rebuilds the breadcrumb trail for the current path.
    ///
    /// The trail starts with a `Home` crumb targeting the root, followed by one crumb per path
    /// segment. Every segment except the last targets the cumulative path up to that segment.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let segments = path_segments(self.current_path());
        let mut crumbs = Vec::with_capacity(segments.len() + 1);
        crumbs.push(Breadcrumb {
            label: "Home".to_string(),
            target: Some(self.root().to_string()),
        });

        let mut cumulative = String::new();
        for (index, segment) in segments.iter().enumerate() {
            let target = if index + 1 < segments.len() {
                cumulative.push('/');
                cumulative.push_str(segment);
                Some(cumulative.clone())
            } else {
                None
            };
            crumbs.push(Breadcrumb {
                label: (*segment).to_string(),
                target,
            });
        }
        crumbs
    }
}
