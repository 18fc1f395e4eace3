use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tubelink_core::{Effect, LinkTarget, Msg, SubmitOutcome};
use tubelink_engine::{DispatchOutcome, EngineEvent, EngineHandle};
use tubelink_logging::{tl_error, tl_info, tl_warn};

use super::config::AppConfig;
use super::persistence::HistoryStore;

/// Produces the display timestamp for a new record.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;
/// Opens a URL outside the app.
pub type Opener = Arc<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

pub fn local_clock(format: &str) -> Clock {
    let format = format.to_string();
    Arc::new(move || Local::now().format(&format).to_string())
}

/// Executes effects emitted by `update` and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: HistoryStore,
    folder_url: String,
    spreadsheet_url: String,
    clock: Clock,
    opener: Opener,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: HistoryStore, config: &AppConfig) -> Self {
        Self {
            engine,
            store,
            folder_url: config.link_url(LinkTarget::Folder).to_string(),
            spreadsheet_url: config.link_url(LinkTarget::Spreadsheet).to_string(),
            clock: local_clock(&config.timestamp_format),
            opener: Arc::new(super::browser::open_url),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Runs effects in order. Returns follow-up messages for failures that the
    /// user should hear about.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut feedback = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitUrl { url } => {
                    tl_info!("SubmitUrl url_len={} url={}", url.len(), url);
                    self.engine.submit(url);
                }
                Effect::PersistHistory { records } => {
                    if let Err(err) = self.store.save(&records) {
                        tl_error!(
                            "Failed to write history to {:?}: {}",
                            self.store.path(),
                            err
                        );
                        feedback.push(Msg::HistoryPersistFailed(err.to_string()));
                    }
                }
                Effect::OpenExternal { target } => {
                    let url = match target {
                        LinkTarget::Folder => &self.folder_url,
                        LinkTarget::Spreadsheet => &self.spreadsheet_url,
                    };
                    tl_info!("Opening {:?} link {}", target, url);
                    if let Err(err) = (self.opener)(url) {
                        tl_warn!("Failed to open {}: {}", url, err);
                        feedback.push(Msg::ExternalOpenFailed(err.to_string()));
                    }
                }
            }
        }
        feedback
    }

    /// Drains finished submissions without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(self.event_to_msg(event));
        }
        msgs
    }

    /// Waits up to `timeout` for one finished submission.
    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine
            .recv_timeout(timeout)
            .map(|event| self.event_to_msg(event))
    }

    fn event_to_msg(&self, event: EngineEvent) -> Msg {
        match event {
            EngineEvent::SubmissionCompleted { url, outcome } => {
                if let DispatchOutcome::Errored(err) = &outcome {
                    tl_warn!("Submission of {} errored: {}", url, err);
                }
                Msg::SubmissionCompleted {
                    outcome: map_outcome(outcome),
                    // Stamped when the outcome reaches the UI thread.
                    timestamp: (self.clock)(),
                }
            }
        }
    }
}

fn map_outcome(outcome: DispatchOutcome) -> SubmitOutcome {
    match outcome {
        DispatchOutcome::Succeeded { body, .. } => SubmitOutcome::Succeeded { response: body },
        DispatchOutcome::Failed { status, body } => SubmitOutcome::Failed {
            status,
            response: body,
        },
        DispatchOutcome::Errored(err) => SubmitOutcome::Errored {
            reason: err.to_string(),
        },
    }
}
