use std::collections::{BTreeMap, BTreeSet};

use crate::animation::value::{AnimValue, PropertyKey};
use crate::foundation::core::{NodeId, Point, Rect, Size, Vec2, rect_from_center};
use crate::foundation::error::{CrossmorphError, CrossmorphResult};
use crate::modifier::apply::Modifier;
use crate::scene::host::{CaptureHandle, CaptureMode, LayerProps, NodeKind, SceneHost};

/// One node of a [`SceneGraph`].
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Children, back to front.
    pub children: Vec<NodeId>,
    /// Pairing identifier.
    pub identifier: Option<String>,
    /// Attached modifiers.
    pub modifiers: Vec<Modifier>,
    /// Center relative to the parent's top-left corner.
    pub position: Point,
    /// Bounds size.
    pub size: Size,
    /// Layer attributes.
    pub layer: LayerProps,
    /// Node category.
    pub kind: NodeKind,
    /// Visibility flag.
    pub hidden: bool,
}

impl SceneNode {
    /// Detached node covering `frame` (parent-relative).
    pub fn new(frame: Rect) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            identifier: None,
            modifiers: Vec::new(),
            position: frame.center(),
            size: frame.size(),
            layer: LayerProps::default(),
            kind: NodeKind::Generic,
            hidden: false,
        }
    }
}

/// A capture request the graph answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRecord {
    /// Captured node.
    pub node: NodeId,
    /// Requested mode.
    pub mode: CaptureMode,
    /// Issued handle.
    pub handle: CaptureHandle,
}

/// In-memory [`SceneHost`] used by the CLI, tests and headless callers.
///
/// Besides the tree itself it records every capture, release and presented value so callers can
/// inspect what a transition did.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    next_handle: u64,
    captures: Vec<CaptureRecord>,
    live: BTreeSet<CaptureHandle>,
    failing: BTreeSet<NodeId>,
    presented: BTreeMap<(NodeId, PropertyKey), AnimValue>,
}

impl SceneGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `parent` (or as a root) and return its id.
    pub fn add(&mut self, parent: Option<NodeId>, mut node: SceneNode) -> CrossmorphResult<NodeId> {
        let id = NodeId(
            u32::try_from(self.nodes.len())
                .map_err(|_| CrossmorphError::validation("scene graph is full"))?,
        );
        if let Some(p) = parent {
            let parent_node = self
                .node_mut(p)
                .ok_or_else(|| CrossmorphError::validation(format!("unknown parent node {p}")))?;
            parent_node.children.push(id);
        }
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        Ok(id)
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make every future capture of `node` fail.
    pub fn fail_captures_for(&mut self, node: NodeId) {
        self.failing.insert(node);
    }

    /// Every capture answered so far, in order.
    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }

    /// Number of captures not yet released.
    pub fn live_captures(&self) -> usize {
        self.live.len()
    }

    /// Last value presented for a proxy property.
    pub fn presented(&self, node: NodeId, key: PropertyKey) -> Option<AnimValue> {
        self.presented.get(&(node, key)).copied()
    }

    /// Node ids of `root` and its descendants in pre-order.
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl SceneHost for SceneGraph {
    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn identifier(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.identifier.as_deref())
    }

    fn modifiers(&self, node: NodeId) -> &[Modifier] {
        match self.node(node) {
            Some(n) => &n.modifiers,
            None => &[],
        }
    }

    fn frame(&self, node: NodeId) -> Rect {
        let Some(n) = self.node(node) else {
            return Rect::ZERO;
        };
        let offset = match n.parent {
            Some(p) => self.frame(p).origin().to_vec2(),
            None => Vec2::ZERO,
        };
        rect_from_center(n.position + offset, n.size)
    }

    fn layer(&self, node: NodeId) -> LayerProps {
        self.node(node).map(|n| n.layer).unwrap_or_default()
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.node(node).map(|n| n.kind).unwrap_or_default()
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.hidden)
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(n) = self.node_mut(node) {
            n.hidden = hidden;
        }
    }

    fn capture(&mut self, node: NodeId, mode: CaptureMode) -> CrossmorphResult<CaptureHandle> {
        if !self.contains(node) {
            return Err(CrossmorphError::capture(format!("unknown node {node}")));
        }
        if self.failing.contains(&node) {
            return Err(CrossmorphError::capture(format!(
                "node {node} cannot be captured"
            )));
        }
        self.next_handle += 1;
        let handle = CaptureHandle(self.next_handle);
        self.captures.push(CaptureRecord { node, mode, handle });
        self.live.insert(handle);
        Ok(handle)
    }

    fn release(&mut self, handle: CaptureHandle) {
        self.live.remove(&handle);
    }

    fn detach(&mut self, node: NodeId) -> Option<usize> {
        let parent = self.node(node)?.parent?;
        let center = self.frame(node).center();
        let siblings = &mut self.node_mut(parent)?.children;
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.remove(index);
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
            n.position = center;
        }
        Some(index)
    }

    fn reattach(&mut self, node: NodeId, parent: NodeId, index: usize) {
        if !self.contains(node) || !self.contains(parent) {
            return;
        }
        let offset = self.frame(parent).origin().to_vec2();
        if let Some(p) = self.node_mut(parent) {
            let index = index.min(p.children.len());
            p.children.insert(index, node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = Some(parent);
            n.position -= offset;
        }
    }

    fn present(&mut self, node: NodeId, key: PropertyKey, value: AnimValue) {
        self.presented.insert((node, key), value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
