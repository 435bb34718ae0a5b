use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::animation::value::{AnimValue, PropertyKey};
use crate::context::proxy::{ProxyContent, RenderProxy};
use crate::foundation::core::{NodeId, Point, Rect, Rgba};
use crate::modifier::state::{CoordinateSpace, SnapshotStrategy, TargetState};
use crate::scene::host::{CaptureMode, NodeKind, SceneHost};

/// Per-transition working set: flattened trees, pairing maps, target states, hidden nodes and
/// the render-proxy cache.
///
/// The host is passed into every call that reads or mutates the tree; the context never holds on
/// to it.
#[derive(Clone, Debug)]
pub struct TransitionContext {
    container: NodeId,
    container_frame: Rect,
    source_root: Option<NodeId>,
    destination_root: Option<NodeId>,
    from_nodes: Vec<NodeId>,
    to_nodes: Vec<NodeId>,
    appearing: BTreeSet<NodeId>,
    from_ids: HashMap<String, NodeId>,
    to_ids: HashMap<String, NodeId>,
    states: BTreeMap<NodeId, TargetState>,
    proxies: BTreeMap<NodeId, RenderProxy>,
    stack: Vec<NodeId>,
    detached: Vec<NodeId>,
    hidden_before: BTreeMap<NodeId, bool>,
    insert_to_first: bool,
}

impl TransitionContext {
    /// Empty context animating inside `container`.
    pub fn new(host: &dyn SceneHost, container: NodeId) -> Self {
        Self {
            container,
            container_frame: host.frame(container),
            source_root: None,
            destination_root: None,
            from_nodes: Vec::new(),
            to_nodes: Vec::new(),
            appearing: BTreeSet::new(),
            from_ids: HashMap::new(),
            to_ids: HashMap::new(),
            states: BTreeMap::new(),
            proxies: BTreeMap::new(),
            stack: Vec::new(),
            detached: Vec::new(),
            hidden_before: BTreeMap::new(),
            insert_to_first: false,
        }
    }

    /// Flatten both trees, register identifiers and fold each node's modifiers.
    ///
    /// Nodes whose frame misses the container are left out unless they force animation; their
    /// children are still visited. Only the first node carrying a given identifier in each tree
    /// is registered for pairing.
    pub fn set(&mut self, host: &dyn SceneHost, source: NodeId, destination: NodeId) {
        self.container_frame = host.frame(self.container);
        self.source_root = Some(source);
        self.destination_root = Some(destination);
        self.from_ids.clear();
        self.to_ids.clear();
        self.states.clear();
        self.from_nodes = self.flatten(host, source, false);
        self.to_nodes = self.flatten(host, destination, true);
        self.appearing = self.to_nodes.iter().copied().collect();
        tracing::debug!(
            from = self.from_nodes.len(),
            to = self.to_nodes.len(),
            states = self.states.len(),
            "flattened transition trees"
        );
    }

    fn flatten(&mut self, host: &dyn SceneHost, root: NodeId, appearing: bool) -> Vec<NodeId> {
        let bounds = self.container_bounds();
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let mut children = host.children(node);
            children.reverse();
            stack.extend(children);

            let modifiers = host.modifiers(node);
            let state = (!modifiers.is_empty()).then(|| TargetState::from_modifiers(modifiers));
            let forced = state.as_ref().is_some_and(|s| s.force_animate);
            if !forced && !overlaps(self.frame_in_container(host, node), bounds) {
                continue;
            }
            out.push(node);
            if let Some(id) = host.identifier(node) {
                let ids = if appearing {
                    &mut self.to_ids
                } else {
                    &mut self.from_ids
                };
                ids.entry(id.to_owned()).or_insert(node);
            }
            if let Some(state) = state {
                self.states.insert(node, state);
            }
        }
        out
    }

    /// Animation container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Container bounds in its own coordinates (origin at zero).
    pub fn container_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.container_frame.size())
    }

    /// Frame of `node` in container coordinates.
    pub fn frame_in_container(&self, host: &dyn SceneHost, node: NodeId) -> Rect {
        host.frame(node) - self.container_frame.origin().to_vec2()
    }

    /// Root of the tree being left.
    pub fn source_root(&self) -> Option<NodeId> {
        self.source_root
    }

    /// Root of the tree being entered.
    pub fn destination_root(&self) -> Option<NodeId> {
        self.destination_root
    }

    /// Working set of the source tree, pre-order.
    pub fn from_nodes(&self) -> &[NodeId] {
        &self.from_nodes
    }

    /// Working set of the destination tree, pre-order.
    pub fn to_nodes(&self) -> &[NodeId] {
        &self.to_nodes
    }

    /// Return `true` when `node` is in the destination working set.
    pub fn is_appearing(&self, node: NodeId) -> bool {
        self.appearing.contains(&node)
    }

    /// Source node registered under `identifier`.
    pub fn source_node(&self, identifier: &str) -> Option<NodeId> {
        self.from_ids.get(identifier).copied()
    }

    /// Destination node registered under `identifier`.
    pub fn destination_node(&self, identifier: &str) -> Option<NodeId> {
        self.to_ids.get(identifier).copied()
    }

    /// Counterpart of `node` in the other tree.
    ///
    /// Only the node registered for an identifier pairs; later duplicates get `None`.
    pub fn paired_node(&self, host: &dyn SceneHost, node: NodeId) -> Option<NodeId> {
        let id = host.identifier(node)?;
        if self.from_ids.get(id) == Some(&node) {
            self.destination_node(id)
        } else if self.to_ids.get(id) == Some(&node) {
            self.source_node(id)
        } else {
            None
        }
    }

    /// Nearest ancestor (below the container) that has a counterpart, with that counterpart.
    pub fn matched_ancestor(&self, host: &dyn SceneHost, node: NodeId) -> Option<(NodeId, NodeId)> {
        let mut current = host.parent(node);
        while let Some(a) = current {
            if a == self.container {
                break;
            }
            if let Some(pair) = self.paired_node(host, a) {
                return Some((a, pair));
            }
            current = host.parent(a);
        }
        None
    }

    /// Resolved state of `node`.
    pub fn state(&self, node: NodeId) -> Option<&TargetState> {
        self.states.get(&node)
    }

    /// Mutable resolved state of `node`.
    pub fn state_mut(&mut self, node: NodeId) -> Option<&mut TargetState> {
        self.states.get_mut(&node)
    }

    /// Replace the state of `node`.
    pub fn set_state(&mut self, node: NodeId, state: TargetState) {
        self.states.insert(node, state);
    }

    /// Drop the state of `node`.
    pub fn clear_state(&mut self, node: NodeId) -> Option<TargetState> {
        self.states.remove(&node)
    }

    /// Every node with a state, in id order.
    pub fn states(&self) -> impl Iterator<Item = (NodeId, &TargetState)> + '_ {
        self.states.iter().map(|(n, s)| (*n, s))
    }

    /// Destination proxies are created (and stacked) before source proxies.
    pub fn insert_to_first(&self) -> bool {
        self.insert_to_first
    }

    /// Set the proxy creation order.
    pub fn set_insert_to_first(&mut self, value: bool) {
        self.insert_to_first = value;
    }

    /// Hide `node`, remembering its visibility the first time.
    pub fn hide(&mut self, host: &mut dyn SceneHost, node: NodeId) {
        if self.hidden_before.contains_key(&node) {
            return;
        }
        self.hidden_before.insert(node, host.is_hidden(node));
        host.set_hidden(node, true);
    }

    /// Restore the visibility `node` had before [`TransitionContext::hide`].
    pub fn unhide(&mut self, host: &mut dyn SceneHost, node: NodeId) {
        if let Some(was_hidden) = self.hidden_before.remove(&node) {
            host.set_hidden(node, was_hidden);
        }
    }

    /// Restore every node hidden during the transition.
    pub fn unhide_all(&mut self, host: &mut dyn SceneHost) {
        for (node, was_hidden) in std::mem::take(&mut self.hidden_before) {
            host.set_hidden(node, was_hidden);
        }
    }

    /// Return `true` when the transition has hidden `node`.
    pub fn is_hidden_by_transition(&self, node: NodeId) -> bool {
        self.hidden_before.contains_key(&node)
    }

    /// The proxy for `node`, created on first use.
    ///
    /// Creation captures the node as it is currently rendered (animating descendants are already
    /// hidden), then hides it. A failed capture yields a placeholder. A proxy is stacked right
    /// above its counterpart's proxy when that one exists.
    pub fn proxy(&mut self, host: &mut dyn SceneHost, node: NodeId) -> &RenderProxy {
        if !self.proxies.contains_key(&node) {
            let proxy = self.make_proxy(host, node);
            let above = self
                .paired_node(host, node)
                .and_then(|p| self.stack.iter().position(|n| *n == p));
            match above {
                Some(i) => self.stack.insert(i + 1, node),
                None => self.stack.push(node),
            }
            self.proxies.insert(node, proxy);
        }
        &self.proxies[&node]
    }

    /// The proxy for `node`, if it was created.
    pub fn existing_proxy(&self, node: NodeId) -> Option<&RenderProxy> {
        self.proxies.get(&node)
    }

    /// Mutable proxy for `node`, if it was created.
    pub fn proxy_mut(&mut self, node: NodeId) -> Option<&mut RenderProxy> {
        self.proxies.get_mut(&node)
    }

    /// Proxies back to front.
    pub fn proxies_in_order(&self) -> impl Iterator<Item = &RenderProxy> + '_ {
        self.stack.iter().filter_map(|n| self.proxies.get(n))
    }

    fn make_proxy(&mut self, host: &mut dyn SceneHost, node: NodeId) -> RenderProxy {
        let (strategy, space, z_position) = match self.states.get(&node) {
            Some(s) => (s.snapshot, s.coordinate_space, s.z_position),
            None => Default::default(),
        };
        let frame = self.frame_in_container(host, node);
        let layer = host.layer(node);
        let parent = match space {
            CoordinateSpace::Global => None,
            CoordinateSpace::Local => self.nearest_proxied_ancestor(host, node),
        };
        let origin = parent.map_or(Point::ORIGIN, |p| self.frame_in_container(host, p).origin());

        self.unhide(host, node);
        let content = if strategy == SnapshotStrategy::NoSnapshot {
            let restore = host
                .parent(node)
                .and_then(|p| host.detach(node).map(|i| (p, i)));
            if restore.is_some() {
                self.detached.push(node);
            }
            ProxyContent::InPlace { restore }
        } else {
            let mode = capture_mode(strategy, host.kind(node), host.children(node).is_empty());
            let content = match host.capture(node, mode) {
                Ok(handle) => ProxyContent::Snapshot(handle),
                Err(e) => {
                    tracing::warn!(node = %node, error = %e, "capture failed, using placeholder");
                    ProxyContent::Placeholder
                }
            };
            self.hide(host, node);
            content
        };
        tracing::trace!(node = %node, ?content, ?parent, "created proxy");

        let values = [
            (PropertyKey::Position, AnimValue::Point(frame.center() - origin.to_vec2())),
            (PropertyKey::Size, AnimValue::Size(frame.size())),
            (PropertyKey::Transform, AnimValue::Transform(layer.transform)),
            (PropertyKey::Opacity, AnimValue::Scalar(layer.opacity)),
            (PropertyKey::CornerRadius, AnimValue::Scalar(layer.corner_radius)),
            (
                PropertyKey::BackgroundColor,
                AnimValue::Color(layer.background_color.unwrap_or(Rgba::TRANSPARENT)),
            ),
            (PropertyKey::BorderColor, AnimValue::Color(layer.border_color)),
            (PropertyKey::BorderWidth, AnimValue::Scalar(layer.border_width)),
            (PropertyKey::ShadowColor, AnimValue::Color(layer.shadow_color)),
            (PropertyKey::ShadowOpacity, AnimValue::Scalar(layer.shadow_opacity)),
            (PropertyKey::ShadowRadius, AnimValue::Scalar(layer.shadow_radius)),
            (PropertyKey::ShadowOffset, AnimValue::Offset(layer.shadow_offset)),
            (
                PropertyKey::ZPosition,
                AnimValue::Scalar(z_position.unwrap_or(layer.z_position)),
            ),
            (PropertyKey::OverlayColor, AnimValue::Color(Rgba::TRANSPARENT)),
            (PropertyKey::OverlayOpacity, AnimValue::Scalar(0.0)),
        ];
        RenderProxy {
            node,
            content,
            parent,
            origin,
            masks_to_bounds: layer.masks_to_bounds,
            values: values.into_iter().collect(),
        }
    }

    fn nearest_proxied_ancestor(&self, host: &dyn SceneHost, node: NodeId) -> Option<NodeId> {
        let mut current = host.parent(node);
        while let Some(a) = current {
            if a == self.container {
                return None;
            }
            if self.proxies.contains_key(&a) {
                return Some(a);
            }
            current = host.parent(a);
        }
        None
    }

    /// Put nodes moved out for in-place proxies back where they were.
    pub fn clean(&mut self, host: &mut dyn SceneHost) {
        for node in std::mem::take(&mut self.detached).into_iter().rev() {
            let Some(proxy) = self.proxies.get_mut(&node) else {
                continue;
            };
            if let ProxyContent::InPlace { restore } = &mut proxy.content
                && let Some((parent, index)) = restore.take()
            {
                host.reattach(node, parent, index);
            }
        }
    }

    /// Release every capture and forget all proxies.
    pub fn remove_proxies(&mut self, host: &mut dyn SceneHost) {
        for (_, proxy) in std::mem::take(&mut self.proxies) {
            if let ProxyContent::Snapshot(handle) = proxy.content {
                host.release(handle);
            }
        }
        self.stack.clear();
    }
}

/// Capture mode for a node given its strategy and kind.
pub fn capture_mode(strategy: SnapshotStrategy, kind: NodeKind, is_leaf: bool) -> CaptureMode {
    match strategy {
        SnapshotStrategy::Normal | SnapshotStrategy::NoSnapshot => CaptureMode::Render,
        SnapshotStrategy::LayerRender => CaptureMode::PixelExact,
        SnapshotStrategy::Optimized => match kind {
            NodeKind::Stack => CaptureMode::PixelExact,
            NodeKind::Image if is_leaf => CaptureMode::CopyContents,
            NodeKind::TranslucentBar => CaptureMode::Recreate,
            _ => CaptureMode::Render,
        },
    }
}

// Closed intersection: zero-size nodes on the container edge still count.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

#[cfg(test)]
#[path = "../../tests/unit/context/transition.rs"]
mod tests;
