//! Tubelink core: pure submission state machine, validator and view-model helpers.
mod effect;
mod msg;
mod record;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, LinkTarget};
pub use msg::Msg;
pub use record::{SubmissionRecord, SubmissionStatus, SubmitOutcome};
pub use state::{AppState, Notification, NotificationKind, Phase};
pub use update::update;
pub use validate::is_valid_youtube_url;
pub use view_model::{AppViewModel, HistoryRowView};
