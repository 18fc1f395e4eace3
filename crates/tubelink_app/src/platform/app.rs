use std::collections::VecDeque;
use std::time::Duration;

use tubelink_core::{update, AppState, AppViewModel, Msg};

use super::effects::EffectRunner;

/// Owns the application state and feeds every message through `update`.
pub struct Controller {
    state: AppState,
    runner: EffectRunner,
}

impl Controller {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Restores the persisted history. Called once at startup.
    pub fn load_history(&mut self) {
        let records = self.runner.store().load();
        self.dispatch(Msg::HistoryLoaded(records));
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies `msg` and any follow-up messages its effects produce.
    /// Returns whether the view changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
        self.state.consume_dirty()
    }

    /// Applies any finished submissions. Never blocks.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for msg in self.runner.poll() {
            changed |= self.dispatch(msg);
        }
        changed
    }

    /// Blocks up to `timeout` for a finished submission.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.runner.wait(timeout) {
            Some(msg) => self.dispatch(msg),
            None => false,
        }
    }
}
