use crate::{Notification, Phase, SubmissionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub input: String,
    /// Show the busy indicator.
    pub busy: bool,
    /// Whether the submit control accepts activation.
    pub submit_enabled: bool,
    /// Most recent first.
    pub history: Vec<HistoryRowView>,
    pub notification: Option<Notification>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    /// `"<status> - <url>"`
    pub primary: String,
    pub secondary: String,
    pub status: SubmissionStatus,
}
