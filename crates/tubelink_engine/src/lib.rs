//! Tubelink engine: webhook dispatch and file persistence.
mod engine;
mod persist;
mod types;
mod webhook;

pub use engine::EngineHandle;
pub use persist::{ensure_parent_dir, AtomicFileWriter, PersistError};
pub use types::{DispatchError, DispatchOutcome, EngineError, EngineEvent, FailureKind};
pub use webhook::{ReqwestSubmitter, Submitter, WebhookSettings, DEFAULT_ENDPOINT};
