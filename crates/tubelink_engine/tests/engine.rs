use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tubelink_engine::{
    DispatchOutcome, EngineEvent, EngineHandle, FailureKind, Submitter, WebhookSettings,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingSubmitter {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Submitter for CountingSubmitter {
    async fn submit(&self, url: &str) -> DispatchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DispatchOutcome::Succeeded {
            status: 200,
            body: format!("got {url}"),
        }
    }
}

struct PanickingSubmitter;

#[async_trait::async_trait]
impl Submitter for PanickingSubmitter {
    async fn submit(&self, _url: &str) -> DispatchOutcome {
        panic!("submitter blew up");
    }
}

async fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "engine event not received");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[test]
fn submit_produces_one_completion_event() {
    let submitter = Arc::new(CountingSubmitter::default());
    let engine = EngineHandle::with_submitter(submitter.clone()).expect("engine");

    engine.submit("https://youtu.be/dQw4w9WgXcQ");
    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");

    assert_eq!(
        event,
        EngineEvent::SubmissionCompleted {
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            outcome: DispatchOutcome::Succeeded {
                status: 200,
                body: "got https://youtu.be/dQw4w9WgXcQ".to_string(),
            },
        }
    );
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_posts_to_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = WebhookSettings {
        endpoint: format!("{}/webhook/youtube", server.uri()),
        ..WebhookSettings::default()
    };
    let engine = EngineHandle::new(&settings).expect("engine");
    engine.submit("https://youtu.be/dQw4w9WgXcQ");

    let EngineEvent::SubmissionCompleted { outcome, .. } = wait_for_event(&engine).await;
    assert_eq!(
        outcome,
        DispatchOutcome::Failed {
            status: 503,
            body: "down".to_string(),
        }
    );
}

#[test]
fn panicking_submitter_still_completes() {
    let engine = EngineHandle::with_submitter(Arc::new(PanickingSubmitter)).expect("engine");

    engine.submit("https://youtu.be/dQw4w9WgXcQ");
    let EngineEvent::SubmissionCompleted { url, outcome } = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event after panic");

    assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
    match outcome {
        DispatchOutcome::Errored(err) => assert_eq!(err.kind, FailureKind::Aborted),
        other => panic!("expected errored outcome, got {other:?}"),
    }

    // The engine keeps serving after a panicked task.
    engine.submit("https://youtu.be/aaaaaaaaaaa");
    assert!(engine.recv_timeout(Duration::from_secs(5)).is_some());
}
