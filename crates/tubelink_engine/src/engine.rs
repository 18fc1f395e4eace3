use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tubelink_logging::{tl_debug, tl_error};

use crate::webhook::{ReqwestSubmitter, Submitter, WebhookSettings};
use crate::{DispatchError, DispatchOutcome, EngineError, EngineEvent, FailureKind};

enum EngineCommand {
    Submit { url: String },
}

/// Owns the engine thread. Commands go in, completion events come out.
///
/// Dropping the handle closes the command channel, which stops the thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &WebhookSettings) -> Result<Self, EngineError> {
        let submitter = ReqwestSubmitter::new(settings)?;
        Self::with_submitter(Arc::new(submitter))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("tubelink-engine")
            .build()?;

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(submitter, command, event_tx).await;
                });
            }
            tl_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    /// Queues one submission. Exactly one `SubmissionCompleted` follows,
    /// even when the engine thread is gone.
    pub fn submit(&self, url: impl Into<String>) {
        let url = url.into();
        if let Err(mpsc::SendError(EngineCommand::Submit { url })) =
            self.cmd_tx.send(EngineCommand::Submit { url })
        {
            tl_error!("Engine thread stopped; cannot submit {}", url);
            let outcome = DispatchOutcome::Errored(DispatchError::new(
                FailureKind::Aborted,
                "engine thread stopped",
            ));
            let _ = self
                .event_tx
                .send(EngineEvent::SubmissionCompleted { url, outcome });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: Arc<dyn Submitter>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { url } => {
            let task_url = url.clone();
            let task = tokio::spawn(async move { submitter.submit(&task_url).await });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tl_error!("Submit task for {} did not finish: {}", url, err);
                    DispatchOutcome::Errored(DispatchError::new(
                        FailureKind::Aborted,
                        err.to_string(),
                    ))
                }
            };
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { url, outcome });
        }
    }
}
