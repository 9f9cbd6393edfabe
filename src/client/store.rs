use std::collections::VecDeque;

use super::actions::Action;
use super::reducers::reduce;
use super::state::AppState;

/// Owns the state tree and a FIFO queue of pending actions. Dispatch is
/// cooperative and single-threaded; actions enqueued while draining run in
/// arrival order.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    queue: VecDeque<Action>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Enqueue one action and drain the queue.
    pub fn dispatch(&mut self, action: Action) {
        self.queue.push_back(action);
        self.drain();
    }

    /// Enqueue a batch (typically everything one action creator produced)
    /// and drain the queue.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.queue.extend(actions);
        self.drain();
    }

    fn drain(&mut self) {
        while let Some(action) = self.queue.pop_front() {
            let prior = std::mem::take(&mut self.state);
            self.state = reduce(prior, &action);
        }
    }
}
