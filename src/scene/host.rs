use crate::animation::value::{AnimValue, PropertyKey};
use crate::foundation::core::{NodeId, Rect, Rgba, Vec2};
use crate::foundation::error::CrossmorphResult;
use crate::foundation::math::Transform3D;
use crate::modifier::apply::Modifier;

/// Broad category of a host node, used to pick a capture strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Any node without special handling.
    #[default]
    Generic,
    /// Leaf node showing a bitmap; its contents can be copied instead of rendered.
    Image,
    /// Layout container that needs a slow, full render to capture.
    Stack,
    /// Translucent toolbar; recreated rather than captured so its blur stays live.
    TranslucentBar,
    /// Scrolling list whose rows live under a single wrapper child.
    WrappedList,
}

/// How the host should produce the visual contents of a proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureMode {
    /// Regular render of the node and its visible descendants.
    Render,
    /// Exact pixel capture of the node's layer.
    PixelExact,
    /// Copy the node's bitmap contents.
    CopyContents,
    /// Build a fresh node of the same kind with the same styling.
    Recreate,
}

/// Opaque token for captured contents issued by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CaptureHandle(pub u64);

/// Visual layer attributes of a node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerProps {
    /// Layer transform about the node's center.
    pub transform: Transform3D,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Corner radius.
    pub corner_radius: f64,
    /// Background fill, if any.
    pub background_color: Option<Rgba>,
    /// Border color.
    pub border_color: Rgba,
    /// Border width.
    pub border_width: f64,
    /// Shadow color.
    pub shadow_color: Rgba,
    /// Shadow opacity.
    pub shadow_opacity: f64,
    /// Shadow blur radius.
    pub shadow_radius: f64,
    /// Shadow offset.
    pub shadow_offset: Vec2,
    /// Clip descendants to the bounds.
    pub masks_to_bounds: bool,
    /// Depth hint.
    pub z_position: f64,
    /// The node promises to fill its bounds with opaque content.
    pub is_opaque: bool,
}

impl Default for LayerProps {
    fn default() -> Self {
        Self {
            transform: Transform3D::IDENTITY,
            opacity: 1.0,
            corner_radius: 0.0,
            background_color: None,
            border_color: Rgba::BLACK,
            border_width: 0.0,
            shadow_color: Rgba::BLACK,
            shadow_opacity: 0.0,
            shadow_radius: 3.0,
            shadow_offset: Vec2::new(0.0, -3.0),
            masks_to_bounds: false,
            z_position: 0.0,
            is_opaque: true,
        }
    }
}

impl LayerProps {
    /// Alpha of the background fill; a missing fill counts as opaque.
    pub fn background_alpha(&self) -> f64 {
        self.background_color.map_or(1.0, |c| c.a)
    }
}

/// The engine's view of a host visual tree.
///
/// Hosts own their nodes. The engine reads geometry and attributes, toggles visibility, asks for
/// proxy contents and reports presentation values back. Frames are in one shared coordinate
/// space (typically the window) and ignore layer transforms.
pub trait SceneHost {
    /// Return `true` when `node` exists.
    fn contains(&self, node: NodeId) -> bool;

    /// Children in back-to-front order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Parent, or `None` for a root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Pairing identifier.
    fn identifier(&self, node: NodeId) -> Option<&str>;

    /// Modifiers attached to the node, in declaration order.
    fn modifiers(&self, node: NodeId) -> &[Modifier];

    /// Frame in the shared coordinate space.
    fn frame(&self, node: NodeId) -> Rect;

    /// Layer attributes.
    fn layer(&self, node: NodeId) -> LayerProps;

    /// Node category.
    fn kind(&self, _node: NodeId) -> NodeKind {
        NodeKind::Generic
    }

    /// Current visibility flag.
    fn is_hidden(&self, node: NodeId) -> bool;

    /// Toggle visibility without touching anything else.
    fn set_hidden(&mut self, node: NodeId, hidden: bool);

    /// Produce proxy contents for `node` as currently rendered.
    ///
    /// Hidden descendants are not part of the capture.
    fn capture(&mut self, node: NodeId, mode: CaptureMode) -> CrossmorphResult<CaptureHandle>;

    /// Drop contents previously returned by [`SceneHost::capture`].
    fn release(&mut self, _handle: CaptureHandle) {}

    /// Take `node` out of its parent, returning the index it occupied.
    ///
    /// The node keeps its frame in the shared coordinate space while detached.
    fn detach(&mut self, node: NodeId) -> Option<usize>;

    /// Put `node` back under `parent` at `index`.
    fn reattach(&mut self, node: NodeId, parent: NodeId, index: usize);

    /// Presentation value of a proxy property changed.
    fn present(&mut self, _node: NodeId, _key: PropertyKey, _value: AnimValue) {}
}
