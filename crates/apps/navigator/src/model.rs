use bridge_host::{
    Breadcrumb, BridgePresence, ConnectionPolicy, Entry, JumpPolicy, NavigationState,
    NavigatorConfig,
};

pub const DETECTING_STATUS: &str = "Checking for the bridge extension...";
pub const DETECTED_STATUS: &str =
    "Bridge detected. Click \"Connect\" to start using the file navigator.";
pub const MISSING_STATUS: &str =
    "Bridge extension not detected. Please install it to use this file navigator.";
pub const CONNECTED_STATUS: &str = "Connected to the bridge. Select a folder to begin browsing.";
pub const CONNECT_FIRST_STATUS: &str = "Please connect to the bridge first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Connected,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub text: String,
}

impl StatusLine {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Neutral,
            text: text.into(),
        }
    }

    pub fn connected(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Connected,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Error,
            text: text.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.tone {
            StatusTone::Neutral => "status-bar",
            StatusTone::Connected => "status-bar connected",
            StatusTone::Error => "status-bar error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Listing area state for the current directory.
pub enum ListingView {
    /// No folder has been selected yet.
    #[default]
    Idle,
    /// A listing request for `path` is in flight.
    Loading { path: String },
    /// Sorted entries of `path`.
    Ready { path: String, entries: Vec<Entry> },
    /// The listing of `path` failed; the status line carries the reason.
    Failed { path: String },
}

impl ListingView {
    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            Self::Ready { entries, .. } => Some(entries),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub path: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Session record for one page load of the navigator.
pub struct NavigatorState {
    pub presence: BridgePresence,
    pub connected: bool,
    pub navigation: Option<NavigationState>,
    pub listing: ListingView,
    pub file: Option<FileView>,
    /// File read whose result may still be shown; cleared when the listing changes.
    pub pending_read: Option<String>,
    pub status: StatusLine,
    pub help_open: bool,
    pub manual_picker_open: bool,
    pub install_guide_open: bool,
    pub consecutive_failures: u32,
    pub jump_policy: JumpPolicy,
    pub connection_policy: ConnectionPolicy,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self::new(&NavigatorConfig::default())
    }
}

impl NavigatorState {
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            presence: BridgePresence::Detecting,
            connected: false,
            navigation: None,
            listing: ListingView::Idle,
            file: None,
            pending_read: None,
            status: StatusLine::neutral(DETECTING_STATUS),
            help_open: false,
            manual_picker_open: false,
            install_guide_open: false,
            consecutive_failures: 0,
            jump_policy: config.jump_policy,
            connection_policy: config.connection_policy,
        }
    }

    pub fn current_path(&self) -> Option<&str> {
        self.navigation.as_ref().map(NavigationState::current_path)
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.navigation
            .as_ref()
            .map(NavigationState::breadcrumbs)
            .unwrap_or_default()
    }

    pub fn can_connect(&self) -> bool {
        self.presence == BridgePresence::Ready
    }

    pub fn can_select_folder(&self) -> bool {
        self.connected
    }

    /// The back control stays enabled once a folder is selected; at the root it does nothing.
    pub fn can_go_back(&self) -> bool {
        self.navigation.is_some()
    }

    /// Status line for informational messages, keeping the connected tone while connected.
    pub(crate) fn info_status(&self, text: impl Into<String>) -> StatusLine {
        if self.connected {
            StatusLine::connected(text)
        } else {
            StatusLine::neutral(text)
        }
    }
}
