use crate::{
    is_valid_youtube_url, AppState, Effect, Msg, Notification, NotificationKind, Phase,
    SubmitOutcome,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Single flight: the trigger is not accepted again until the outcome arrives.
            if state.phase() == Phase::Submitting {
                return (state, Vec::new());
            }
            if !is_valid_youtube_url(state.input()) {
                state.notify(Notification::new(
                    NotificationKind::Error,
                    "Invalid YouTube link",
                ));
                return (state, Vec::new());
            }
            let url = state.begin_submission();
            vec![Effect::SubmitUrl { url }]
        }
        Msg::SubmissionCompleted { outcome, timestamp } => {
            if state.phase() != Phase::Submitting {
                return (state, Vec::new());
            }
            state.finish_submission(&outcome, timestamp);
            state.notify(outcome_notification(&outcome));
            vec![Effect::PersistHistory {
                records: state.history().to_vec(),
            }]
        }
        Msg::HistoryLoaded(records) => {
            state.replace_history(records);
            Vec::new()
        }
        Msg::OpenLinkClicked(target) => vec![Effect::OpenExternal { target }],
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::HistoryPersistFailed(reason) => {
            // The outcome message stays; the save error rides along as its hint.
            let detail = format!("Could not save history: {reason}");
            if !state.append_hint(&detail) {
                state.notify(
                    Notification::new(NotificationKind::Warning, "Could not save history")
                        .with_hint(reason),
                );
            }
            Vec::new()
        }
        Msg::ExternalOpenFailed(reason) => {
            state.notify(
                Notification::new(NotificationKind::Warning, "Could not open link")
                    .with_hint(reason),
            );
            Vec::new()
        }
    };

    (state, effects)
}

fn outcome_notification(outcome: &SubmitOutcome) -> Notification {
    match outcome {
        SubmitOutcome::Succeeded { .. } => {
            Notification::new(NotificationKind::Success, "Link sent!")
                .with_hint("Please wait a moment...")
        }
        SubmitOutcome::Failed { status, .. } => Notification::new(
            NotificationKind::Error,
            "Failed to send link. Check the webhook workflow.",
        )
        .with_hint(format!("HTTP {status}")),
        SubmitOutcome::Errored { reason } => Notification::new(
            NotificationKind::Warning,
            "Something went wrong while contacting the server",
        )
        .with_hint(reason.clone()),
    }
}
