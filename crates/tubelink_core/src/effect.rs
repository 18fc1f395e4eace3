use crate::SubmissionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the URL to the webhook. At most one is outstanding at a time.
    SubmitUrl { url: String },
    /// Overwrite durable storage with the full history, most recent first.
    PersistHistory { records: Vec<SubmissionRecord> },
    /// Open one of the static links in the system browser.
    OpenExternal { target: LinkTarget },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Folder,
    Spreadsheet,
}
