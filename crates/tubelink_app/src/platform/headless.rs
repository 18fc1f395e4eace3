//! Non-interactive commands: one-shot submit, history listing, link opening.

use std::io::{self, Write};
use std::time::Duration;

use tubelink_core::{
    LinkTarget, Msg, Notification, NotificationKind, Phase, SubmissionRecord, SubmissionStatus,
};

use super::app::Controller;
use super::browser;
use super::config::AppConfig;

const WAIT_STEP: Duration = Duration::from_millis(250);

/// Runs one submission to completion. Returns true when the webhook accepted it.
pub fn submit_once(
    controller: &mut Controller,
    url: &str,
    out: &mut impl Write,
) -> io::Result<bool> {
    controller.dispatch(Msg::InputChanged(url.to_string()));
    controller.dispatch(Msg::SubmitClicked);

    if controller.state().phase() == Phase::Idle {
        // Rejected by the validator before anything was sent.
        if let Some(note) = controller.state().notification() {
            write_notification(out, note)?;
        }
        return Ok(false);
    }

    while controller.state().phase() == Phase::Submitting {
        controller.wait(WAIT_STEP);
    }

    if let Some(note) = controller.state().notification() {
        write_notification(out, note)?;
    }
    let accepted = controller
        .state()
        .history()
        .first()
        .map(|record| record.status == SubmissionStatus::Succeeded)
        .unwrap_or(false);
    Ok(accepted)
}

pub fn print_history(records: &[SubmissionRecord], out: &mut impl Write) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No history yet.")?;
        return Ok(());
    }
    for record in records {
        writeln!(out, "{} - {}", record.status, record.url)?;
        writeln!(out, "    {}", record.timestamp)?;
    }
    Ok(())
}

pub fn open_link(config: &AppConfig, target: LinkTarget) -> io::Result<()> {
    browser::open_url(config.link_url(target))
}

fn write_notification(out: &mut impl Write, note: &Notification) -> io::Result<()> {
    let label = match note.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Warning => "warning",
    };
    writeln!(out, "[{label}] {}", note.message)?;
    if let Some(hint) = &note.hint {
        writeln!(out, "        {hint}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;
    use tubelink_engine::{DispatchOutcome, EngineHandle, Submitter};

    use super::*;
    use crate::platform::effects::EffectRunner;
    use crate::platform::persistence::HistoryStore;

    struct Unreachable;

    #[async_trait::async_trait]
    impl Submitter for Unreachable {
        async fn submit(&self, _url: &str) -> DispatchOutcome {
            panic!("validator should have stopped the request");
        }
    }

    fn controller(temp: &TempDir, submitter: Arc<dyn Submitter>) -> Controller {
        let engine = EngineHandle::with_submitter(submitter).unwrap();
        let store = HistoryStore::new(temp.path().join("link_history.json"));
        Controller::new(EffectRunner::new(engine, store, &AppConfig::default()))
    }

    #[test]
    fn rejected_url_prints_error_and_records_nothing() {
        let temp = TempDir::new().unwrap();
        let mut controller = controller(&temp, Arc::new(Unreachable));
        let mut out = Vec::new();

        let accepted = submit_once(&mut controller, "https://vimeo.com/12345", &mut out).unwrap();

        assert!(!accepted);
        assert!(controller.state().history().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[error] Invalid YouTube link\n"
        );
        assert!(!temp.path().join("link_history.json").exists());
    }

    struct Exploding;

    #[async_trait::async_trait]
    impl Submitter for Exploding {
        async fn submit(&self, _url: &str) -> DispatchOutcome {
            panic!("submit task crashed");
        }
    }

    struct Accepting;

    #[async_trait::async_trait]
    impl Submitter for Accepting {
        async fn submit(&self, _url: &str) -> DispatchOutcome {
            DispatchOutcome::Succeeded {
                status: 200,
                body: String::new(),
            }
        }
    }

    #[test]
    fn crashed_submit_returns_to_idle_as_error() {
        let temp = TempDir::new().unwrap();
        let mut controller = controller(&temp, Arc::new(Exploding));
        let mut out = Vec::new();

        let accepted =
            submit_once(&mut controller, "https://youtu.be/dQw4w9WgXcQ", &mut out).unwrap();

        assert!(!accepted);
        assert_eq!(controller.state().phase(), Phase::Idle);
        assert_eq!(
            controller.state().history()[0].status,
            SubmissionStatus::Errored
        );
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("[warning] Something went wrong"), "{printed}");
    }

    #[test]
    fn unsaved_history_still_reports_success() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let engine = EngineHandle::with_submitter(Arc::new(Accepting)).unwrap();
        let store = HistoryStore::new(blocker.join("link_history.json"));
        let mut controller =
            Controller::new(EffectRunner::new(engine, store, &AppConfig::default()));
        let mut out = Vec::new();

        let accepted =
            submit_once(&mut controller, "https://youtu.be/dQw4w9WgXcQ", &mut out).unwrap();

        assert!(accepted);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("[ok] Link sent!\n"), "{printed}");
        assert!(printed.contains("Could not save history"), "{printed}");
    }

    #[test]
    fn print_history_lists_newest_first() {
        let mut out = Vec::new();
        let records = vec![
            SubmissionRecord {
                url: "https://youtu.be/bbbbbbbbbbb".to_string(),
                status: SubmissionStatus::Errored,
                timestamp: "t2".to_string(),
            },
            SubmissionRecord {
                url: "https://youtu.be/aaaaaaaaaaa".to_string(),
                status: SubmissionStatus::Succeeded,
                timestamp: "t1".to_string(),
            },
        ];

        print_history(&records, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "errored - https://youtu.be/bbbbbbbbbbb\n    t2\nsucceeded - https://youtu.be/aaaaaaaaaaa\n    t1\n"
        );
    }

    #[test]
    fn empty_history_prints_placeholder() {
        let mut out = Vec::new();
        print_history(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No history yet.\n");
    }
}
