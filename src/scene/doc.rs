use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{CrossmorphError, CrossmorphResult};
use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};
use crate::scene::host::{LayerProps, NodeKind};
use crate::session::opts::TransitionOpts;

/// JSON description of a transition: container, both trees and session options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDoc {
    /// Container size; the container sits at the origin.
    pub container: SizeDoc,
    /// Root of the tree being left.
    pub source: NodeDoc,
    /// Root of the tree being entered.
    pub destination: NodeDoc,
    /// Session options.
    #[serde(default)]
    pub opts: TransitionOpts,
}

/// Width and height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SizeDoc {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Parent-relative frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameDoc {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One node and its subtree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDoc {
    /// Pairing identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Frame relative to the parent's top-left corner.
    pub frame: FrameDoc,
    /// Modifiers in text form.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modifiers: String,
    /// Layer attributes; omitted fields take their defaults.
    #[serde(default)]
    pub layer: LayerProps,
    /// Node category.
    #[serde(default)]
    pub kind: NodeKind,
    /// Initial visibility flag.
    #[serde(default)]
    pub hidden: bool,
    /// Children, back to front.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDoc>,
}

impl SceneDoc {
    /// Parse a document from JSON text.
    pub fn from_json(src: &str) -> CrossmorphResult<Self> {
        Ok(serde_json::from_str(src)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CrossmorphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the in-memory scene. Modifier text is parsed strictly.
    pub fn build(&self) -> CrossmorphResult<Scene> {
        SceneBuilder::new(Size::new(self.container.width, self.container.height))
            .source(self.source.builder()?)
            .destination(self.destination.builder()?)
            .build()
    }
}

impl NodeDoc {
    fn builder(&self) -> CrossmorphResult<NodeBuilder> {
        let f = self.frame;
        let mut b = NodeBuilder::new(Rect::new(f.x, f.y, f.x + f.width, f.y + f.height))
            .modifier_text(&self.modifiers)
            .map_err(|e| match &self.id {
                Some(id) => CrossmorphError::parse(format!("node \"{id}\": {e}")),
                None => e,
            })?
            .layer(self.layer)
            .kind(self.kind)
            .hidden(self.hidden);
        if let Some(id) = &self.id {
            b = b.id(id.clone());
        }
        for child in &self.children {
            b = b.child(child.builder()?);
        }
        Ok(b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/doc.rs"]
mod tests;
