use crate::foundation::core::{NodeId, Point, Rect, Rgba, Size};
use crate::foundation::error::{CrossmorphError, CrossmorphResult};
use crate::modifier::apply::Modifier;
use crate::modifier::text::parse_modifiers;
use crate::scene::graph::{SceneGraph, SceneNode};
use crate::scene::host::{LayerProps, NodeKind};

/// A built scene: container plus source and destination roots in one graph.
#[derive(Clone, Debug)]
pub struct Scene {
    /// The tree holding every node.
    pub graph: SceneGraph,
    /// Animation container; both roots are its children.
    pub container: NodeId,
    /// Root of the tree being left.
    pub source: NodeId,
    /// Root of the tree being entered.
    pub destination: NodeId,
}

impl Scene {
    /// First node in the graph carrying `identifier` below `root`.
    pub fn find(&self, root: NodeId, identifier: &str) -> Option<NodeId> {
        self.graph.subtree(root).into_iter().find(|id| {
            self.graph
                .node(*id)
                .and_then(|n| n.identifier.as_deref())
                .is_some_and(|i| i == identifier)
        })
    }
}

/// Builds a [`Scene`] from a container size and two root node builders.
pub struct SceneBuilder {
    container: Size,
    source: Option<NodeBuilder>,
    destination: Option<NodeBuilder>,
}

impl SceneBuilder {
    /// Builder for a container of `container` size.
    pub fn new(container: Size) -> Self {
        Self {
            container,
            source: None,
            destination: None,
        }
    }

    /// Root of the tree being left.
    pub fn source(mut self, root: NodeBuilder) -> Self {
        self.source = Some(root);
        self
    }

    /// Root of the tree being entered.
    pub fn destination(mut self, root: NodeBuilder) -> Self {
        self.destination = Some(root);
        self
    }

    /// Validate and assemble the graph.
    pub fn build(self) -> CrossmorphResult<Scene> {
        if !(self.container.width > 0.0 && self.container.height > 0.0) {
            return Err(CrossmorphError::validation(
                "container width/height must be > 0",
            ));
        }
        let source = self
            .source
            .ok_or_else(|| CrossmorphError::validation("scene needs a source root"))?;
        let destination = self
            .destination
            .ok_or_else(|| CrossmorphError::validation("scene needs a destination root"))?;

        let mut graph = SceneGraph::new();
        let container = graph.add(
            None,
            SceneNode::new(Rect::from_origin_size(Point::ORIGIN, self.container)),
        )?;
        let source = source.insert(&mut graph, container)?;
        let destination = destination.insert(&mut graph, container)?;
        Ok(Scene {
            graph,
            container,
            source,
            destination,
        })
    }
}

/// Describes one node and its subtree.
pub struct NodeBuilder {
    frame: Rect,
    identifier: Option<String>,
    modifiers: Vec<Modifier>,
    layer: LayerProps,
    kind: NodeKind,
    hidden: bool,
    children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    /// Node covering `frame` in its parent's coordinates.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            identifier: None,
            modifiers: Vec::new(),
            layer: LayerProps::default(),
            kind: NodeKind::Generic,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Node of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(Rect::from_center_size(center, size))
    }

    /// Pairing identifier.
    pub fn id(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Append one modifier.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Append modifiers.
    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    /// Append modifiers written in the text form, e.g. `"fade scale(0.8)"`.
    pub fn modifier_text(mut self, src: &str) -> CrossmorphResult<Self> {
        self.modifiers.extend(parse_modifiers(src)?);
        Ok(self)
    }

    /// Replace all layer attributes.
    pub fn layer(mut self, layer: LayerProps) -> Self {
        self.layer = layer;
        self
    }

    /// Layer opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.layer.opacity = opacity;
        self
    }

    /// Background fill.
    pub fn background(mut self, color: Rgba) -> Self {
        self.layer.background_color = Some(color);
        self
    }

    /// Opaque-content flag.
    pub fn opaque(mut self, opaque: bool) -> Self {
        self.layer.is_opaque = opaque;
        self
    }

    /// Corner radius.
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.layer.corner_radius = radius;
        self
    }

    /// Node category.
    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Initial visibility flag.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Append a child.
    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    pub fn children(mut self, children: impl IntoIterator<Item = NodeBuilder>) -> Self {
        self.children.extend(children);
        self
    }

    fn validate(&self) -> CrossmorphResult<()> {
        let f = self.frame;
        if ![f.x0, f.y0, f.x1, f.y1].iter().all(|v| v.is_finite()) {
            return Err(CrossmorphError::validation("node frame must be finite"));
        }
        if f.width() < 0.0 || f.height() < 0.0 {
            return Err(CrossmorphError::validation(
                "node frame must have non-negative size",
            ));
        }
        if !(0.0..=1.0).contains(&self.layer.opacity) {
            return Err(CrossmorphError::validation("node opacity must be in [0, 1]"));
        }
        if let Some(id) = &self.identifier
            && id.trim().is_empty()
        {
            return Err(CrossmorphError::validation("node id must be non-empty"));
        }
        Ok(())
    }

    /// Insert this node and its subtree under `parent`.
    pub fn insert(self, graph: &mut SceneGraph, parent: NodeId) -> CrossmorphResult<NodeId> {
        self.validate()?;
        let mut node = SceneNode::new(self.frame);
        node.identifier = self.identifier;
        node.modifiers = self.modifiers;
        node.layer = self.layer;
        node.kind = self.kind;
        node.hidden = self.hidden;
        let id = graph.add(Some(parent), node)?;
        for child in self.children {
            child.insert(graph, id)?;
        }
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
