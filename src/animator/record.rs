use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::track::{Curve, Interpolation};
use crate::animation::value::{AnimValue, PropertyKey};
use crate::foundation::core::{NodeId, Point};

/// Receives every interpolation an animator schedules.
pub trait ScheduleObserver {
    /// `track` was (re)started on the proxy of `node`.
    fn scheduled(&mut self, node: NodeId, track: &Interpolation);
}

/// One scheduled interpolation, flattened for logs and JSON output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledInterpolation {
    /// Node whose proxy is animated.
    pub node: NodeId,
    /// Animated property.
    pub key: PropertyKey,
    /// Start value.
    pub from: AnimValue,
    /// End value.
    pub to: AnimValue,
    /// Progress curve.
    pub curve: Curve,
    /// Clock time the interpolation begins.
    pub begin_time: f64,
    /// Seconds from begin to end.
    pub duration: f64,
    /// Control point of an arced path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_control: Option<Point>,
    /// Plays from `to` back to `from`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reversed: bool,
}

impl ScheduledInterpolation {
    fn new(node: NodeId, track: &Interpolation) -> Self {
        Self {
            node,
            key: track.key,
            from: track.from,
            to: track.to,
            curve: track.curve,
            begin_time: track.begin_time,
            duration: track.duration,
            arc_control: track.arc_control,
            reversed: track.reversed,
        }
    }
}

/// Shared in-memory recorder. Clones append to the same log.
#[derive(Clone, Debug, Default)]
pub struct ScheduleLog {
    entries: Rc<RefCell<Vec<ScheduledInterpolation>>>,
}

impl ScheduleLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn entries(&self) -> Vec<ScheduledInterpolation> {
        self.entries.borrow().clone()
    }

    /// Entries for one node and key, oldest first.
    pub fn for_key(&self, node: NodeId, key: PropertyKey) -> Vec<ScheduledInterpolation> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.node == node && e.key == key)
            .cloned()
            .collect()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Return `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget all entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl ScheduleObserver for ScheduleLog {
    fn scheduled(&mut self, node: NodeId, track: &Interpolation) {
        self.entries
            .borrow_mut()
            .push(ScheduledInterpolation::new(node, track));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/record.rs"]
mod tests;
