use crate::animation::ease::TimingFunction;
use crate::animation::spring::Spring;
use crate::foundation::core::{Point, Rgba, Size, Vec2};
use crate::foundation::math::Transform3D;
use crate::modifier::apply::Modifier;
use crate::modifier::condition::Condition;

/// How long a node animates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationSpec {
    /// Explicit duration in seconds.
    Fixed(f64),
    /// Resolved to the longest duration among all participating nodes.
    MatchLongest,
}

impl DurationSpec {
    /// Seconds, if already fixed.
    pub fn seconds(self) -> Option<f64> {
        match self {
            Self::Fixed(s) => Some(s),
            Self::MatchLongest => None,
        }
    }
}

/// Tint layer drawn over a proxy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Overlay {
    /// Tint color.
    pub color: Rgba,
    /// Target opacity of the tint.
    pub opacity: f64,
}

/// Sort order used when staggering children.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CascadeDirection {
    /// Smallest min-y first.
    TopToBottom,
    /// Largest max-y first; ties go to the larger max-x.
    BottomToTop,
    /// Smallest min-x first.
    LeftToRight,
    /// Largest max-x first.
    RightToLeft,
    /// Closest center to the point first.
    Radial(Point),
    /// Farthest center from the point first.
    InverseRadial(Point),
}

impl CascadeDirection {
    /// Parse one of the argument-free direction names.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "topToBottom" => Self::TopToBottom,
            "bottomToTop" => Self::BottomToTop,
            "leftToRight" => Self::LeftToRight,
            "rightToLeft" => Self::RightToLeft,
            _ => return None,
        })
    }
}

/// Staggered-start request for a node's children.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CascadeSpec {
    /// Delay added per sorted child.
    pub delta: f64,
    /// Sort order.
    pub direction: CascadeDirection,
    /// Start matched descendants after the whole cascade instead of leaving them alone.
    pub delay_matched: bool,
}

impl Default for CascadeSpec {
    fn default() -> Self {
        Self {
            delta: 0.02,
            direction: CascadeDirection::TopToBottom,
            delay_matched: false,
        }
    }
}

/// How the render proxy of a node is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotStrategy {
    /// Pick a capture per node kind.
    #[default]
    Optimized,
    /// Regular capture.
    Normal,
    /// Exact pixel capture (slower).
    LayerRender,
    /// Reuse the node itself, moved out of its parent for the duration.
    NoSnapshot,
}

/// Where a proxy is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinateSpace {
    /// Nested under the proxy of the nearest animating ancestor.
    #[default]
    Local,
    /// Directly in the animation container.
    Global,
}

/// Modifiers held back until pairing is known.
#[derive(Clone, Debug)]
pub struct ConditionalModifiers {
    /// Predicate.
    pub condition: Condition,
    /// Applied when the predicate holds.
    pub modifiers: Vec<Modifier>,
}

/// Resolved animatable properties and timing metadata for one node.
///
/// Built by folding a node's modifier list, then refined by the preprocessing stages.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetState {
    /// Center in container coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Bounds size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Accumulated transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform3D>,
    /// Opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Corner radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba>,
    /// Border color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Rgba>,
    /// Border width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Shadow color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Rgba>,
    /// Shadow opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_opacity: Option<f64>,
    /// Shadow offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset: Option<Vec2>,
    /// Shadow radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_radius: Option<f64>,
    /// Tint overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
    /// Depth hint applied to the proxy when it is created (not animated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_position: Option<f64>,
    /// Clipping flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masks_to_bounds: Option<bool>,
    /// When false, shadow properties are not animated.
    pub display_shadow: bool,

    /// Start delay in seconds.
    pub delay: f64,
    /// Duration; `None` means automatic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationSpec>,
    /// Timing curve; `None` means automatic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_function: Option<TimingFunction>,
    /// Spring physics for every key but corner radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spring: Option<Spring>,
    /// Arc intensity for position paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<f64>,
    /// Child stagger request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade: Option<CascadeSpec>,
    /// One-way alignment target identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Values written to the proxy before interpolation starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_state: Option<Box<TargetState>>,
    /// Deferred `when` modifiers.
    #[serde(skip)]
    pub conditional: Vec<ConditionalModifiers>,

    /// Proxy capture strategy.
    pub snapshot: SnapshotStrategy,
    /// Clear descendant states; the flag is the `recursive` switch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_subtree_modifiers: Option<bool>,
    /// Animate even without animatable fields and even when off-screen.
    pub force_animate: bool,
    /// Never cross-fade this node when matched.
    pub force_non_fade: bool,
    /// Proxy placement.
    pub coordinate_space: CoordinateSpace,
    /// Express size changes as a scale transform.
    pub scale_based_size_change: bool,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            position: None,
            size: None,
            transform: None,
            opacity: None,
            corner_radius: None,
            background_color: None,
            border_color: None,
            border_width: None,
            shadow_color: None,
            shadow_opacity: None,
            shadow_offset: None,
            shadow_radius: None,
            overlay: None,
            z_position: None,
            masks_to_bounds: None,
            display_shadow: true,
            delay: 0.0,
            duration: None,
            timing_function: None,
            spring: None,
            arc: None,
            cascade: None,
            source: None,
            begin_state: None,
            conditional: Vec::new(),
            snapshot: SnapshotStrategy::Optimized,
            ignore_subtree_modifiers: None,
            force_animate: false,
            force_non_fade: false,
            coordinate_space: CoordinateSpace::Local,
            scale_based_size_change: false,
        }
    }
}

impl TargetState {
    /// Fold `modifiers` in declaration order onto an empty state.
    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        let mut state = Self::default();
        state.extend(modifiers);
        state
    }

    /// Apply one modifier.
    pub fn append(&mut self, modifier: &Modifier) {
        modifier.apply(self);
    }

    /// Apply modifiers in order.
    pub fn extend(&mut self, modifiers: &[Modifier]) {
        for m in modifiers {
            m.apply(self);
        }
    }

    /// Return `true` when at least one animatable property is set.
    pub fn has_animatable_fields(&self) -> bool {
        self.position.is_some()
            || self.size.is_some()
            || self.transform.is_some()
            || self.opacity.is_some()
            || self.corner_radius.is_some()
            || self.background_color.is_some()
            || self.border_color.is_some()
            || self.border_width.is_some()
            || self.shadow_color.is_some()
            || self.shadow_opacity.is_some()
            || self.shadow_offset.is_some()
            || self.shadow_radius.is_some()
            || self.overlay.is_some()
    }

    /// Return `true` when the default animator should animate this state.
    pub fn can_animate(&self) -> bool {
        self.has_animatable_fields() || self.force_animate
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modifier/state.rs"]
mod tests;
