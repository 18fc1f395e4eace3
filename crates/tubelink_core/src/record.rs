use std::fmt;

/// Outcome label stored with each history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    /// The webhook answered with a 2xx status.
    Succeeded,
    /// The webhook answered with any other status.
    Failed,
    /// The request could not complete at all.
    Errored,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Succeeded => "succeeded",
            SubmissionStatus::Failed => "failed",
            SubmissionStatus::Errored => "errored",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submission attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub url: String,
    pub status: SubmissionStatus,
    pub timestamp: String,
}

/// Classified result of a webhook call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded { response: String },
    Failed { status: u16, response: String },
    Errored { reason: String },
}

impl SubmitOutcome {
    pub fn status(&self) -> SubmissionStatus {
        match self {
            SubmitOutcome::Succeeded { .. } => SubmissionStatus::Succeeded,
            SubmitOutcome::Failed { .. } => SubmissionStatus::Failed,
            SubmitOutcome::Errored { .. } => SubmissionStatus::Errored,
        }
    }
}
