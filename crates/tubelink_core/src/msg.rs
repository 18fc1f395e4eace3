#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input.
    SubmitClicked,
    /// History read from durable storage at startup.
    HistoryLoaded(Vec<crate::SubmissionRecord>),
    /// The webhook call finished. `timestamp` is the display time of completion.
    SubmissionCompleted {
        outcome: crate::SubmitOutcome,
        timestamp: String,
    },
    /// User asked to open one of the static links.
    OpenLinkClicked(crate::LinkTarget),
    /// The transient notification timed out or was closed.
    NotificationDismissed,
    /// Writing the history to durable storage failed.
    HistoryPersistFailed(String),
    /// Launching the browser for a static link failed.
    ExternalOpenFailed(String),
}
