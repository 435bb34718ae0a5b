use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::NodeId;
use crate::session::transition::TransitionState;

/// Which tree a lifecycle event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The tree being left.
    Source,
    /// The tree being entered.
    Destination,
}

/// Callbacks fired by a session. Every method defaults to doing nothing.
pub trait TransitionObserver {
    /// The transition is about to start animating `root`.
    fn will_start(&mut self, _side: Side, _root: NodeId) {}

    /// The transition finished.
    fn did_end(&mut self, _side: Side, _root: NodeId) {}

    /// The transition was cancelled.
    fn did_cancel(&mut self, _side: Side, _root: NodeId) {}

    /// The session entered `state`.
    fn state_changed(&mut self, _state: TransitionState) {}

    /// Progress changed while animating.
    fn progress_changed(&mut self, _progress: f64) {}
}

/// One observed callback.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TransitionEvent {
    /// `will_start`.
    WillStart {
        /// Tree.
        side: Side,
        /// Root of that tree.
        root: NodeId,
    },
    /// `did_end`.
    DidEnd {
        /// Tree.
        side: Side,
        /// Root of that tree.
        root: NodeId,
    },
    /// `did_cancel`.
    DidCancel {
        /// Tree.
        side: Side,
        /// Root of that tree.
        root: NodeId,
    },
    /// `state_changed`.
    State {
        /// New state.
        state: TransitionState,
    },
    /// `progress_changed`.
    Progress {
        /// New progress.
        progress: f64,
    },
}

/// Shared recorder of every callback. Clones append to the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<TransitionEvent>>>,
}

impl EventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events.borrow().clone()
    }

    /// States entered, in order.
    pub fn states(&self) -> Vec<TransitionState> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                TransitionEvent::State { state } => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Forget all events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: TransitionEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TransitionObserver for EventLog {
    fn will_start(&mut self, side: Side, root: NodeId) {
        self.push(TransitionEvent::WillStart { side, root });
    }

    fn did_end(&mut self, side: Side, root: NodeId) {
        self.push(TransitionEvent::DidEnd { side, root });
    }

    fn did_cancel(&mut self, side: Side, root: NodeId) {
        self.push(TransitionEvent::DidCancel { side, root });
    }

    fn state_changed(&mut self, state: TransitionState) {
        self.push(TransitionEvent::State { state });
    }

    fn progress_changed(&mut self, progress: f64) {
        self.push(TransitionEvent::Progress { progress });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/observer.rs"]
mod tests;
