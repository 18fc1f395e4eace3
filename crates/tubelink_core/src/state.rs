use crate::view_model::{AppViewModel, HistoryRowView};
use crate::{SubmissionRecord, SubmitOutcome};

/// Where the submission form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

/// Transient user-facing message. Replaced by the next one, cleared on dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub hint: Option<String>,
}

impl Notification {
    pub(crate) fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            hint: None,
        }
    }

    pub(crate) fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    input: String,
    /// URL captured when the current submission started.
    in_flight: Option<String>,
    history: Vec<SubmissionRecord>,
    notification: Option<Notification>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &[SubmissionRecord] {
        &self.history
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.phase == Phase::Submitting;
        AppViewModel {
            phase: self.phase,
            input: self.input.clone(),
            busy,
            submit_enabled: !busy,
            history: self
                .history
                .iter()
                .map(|record| HistoryRowView {
                    primary: format!("{} - {}", record.status, record.url),
                    secondary: record.timestamp.clone(),
                    status: record.status,
                })
                .collect(),
            notification: self.notification.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.mark_dirty();
    }

    /// Adds `extra` to the current notification's hint. Returns false when
    /// nothing is showing.
    pub(crate) fn append_hint(&mut self, extra: &str) -> bool {
        let Some(note) = self.notification.as_mut() else {
            return false;
        };
        note.hint = Some(match note.hint.take() {
            Some(hint) => format!("{hint} {extra}"),
            None => extra.to_string(),
        });
        self.mark_dirty();
        true
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_history(&mut self, records: Vec<SubmissionRecord>) {
        self.history = records;
        self.mark_dirty();
    }

    /// Idle -> Submitting. Returns the URL to send.
    pub(crate) fn begin_submission(&mut self) -> String {
        let url = self.input.clone();
        self.phase = Phase::Submitting;
        self.in_flight = Some(url.clone());
        self.mark_dirty();
        url
    }

    /// Submitting -> Idle. Prepends exactly one record and returns it.
    pub(crate) fn finish_submission(
        &mut self,
        outcome: &SubmitOutcome,
        timestamp: String,
    ) -> SubmissionRecord {
        let url = self
            .in_flight
            .take()
            .unwrap_or_else(|| self.input.clone());
        let record = SubmissionRecord {
            url,
            status: outcome.status(),
            timestamp,
        };
        self.history.insert(0, record.clone());
        if matches!(outcome, SubmitOutcome::Succeeded { .. }) {
            self.input.clear();
        }
        self.phase = Phase::Idle;
        self.mark_dirty();
        record
    }
}
