use std::collections::BTreeMap;

use crate::animation::value::{AnimValue, PropertyKey};
use crate::foundation::core::{NodeId, Point};
use crate::scene::host::CaptureHandle;

/// What stands in for a node on screen while it animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProxyContent {
    /// Host-produced capture.
    Snapshot(CaptureHandle),
    /// Capture failed; an empty stand-in keeps the animation going.
    Placeholder,
    /// The node itself, detached from its parent until cleanup.
    InPlace {
        /// Where to put the node back: parent and child index.
        restore: Option<(NodeId, usize)>,
    },
}

/// Disposable visual stand-in for one node, the thing actually animated.
///
/// `values` holds the current presentation value of every animatable key. Positions are
/// expressed relative to `origin`, the top-left corner (in container coordinates) of the space
/// the proxy lives in: the container for global proxies, the parent proxy's node frame for local
/// ones.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderProxy {
    /// The node this proxy stands for.
    pub node: NodeId,
    /// Visual contents.
    pub content: ProxyContent,
    /// Node whose proxy this one is nested under, if any.
    pub parent: Option<NodeId>,
    /// Origin of the proxy's coordinate space, in container coordinates.
    pub origin: Point,
    /// Clip flag copied from the node and updated by `masksToBounds`.
    pub masks_to_bounds: bool,
    pub(crate) values: BTreeMap<PropertyKey, AnimValue>,
}

impl RenderProxy {
    /// Current value of `key`.
    pub fn value(&self, key: PropertyKey) -> Option<AnimValue> {
        self.values.get(&key).copied()
    }

    /// Overwrite the current value of `key`.
    pub fn set(&mut self, key: PropertyKey, value: AnimValue) {
        self.values.insert(key, value);
    }

    /// Every key with its current value, in key order.
    pub fn values(&self) -> impl Iterator<Item = (PropertyKey, AnimValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Return `true` when the proxy is an empty stand-in.
    pub fn is_placeholder(&self) -> bool {
        self.content == ProxyContent::Placeholder
    }
}
