use crate::animation::ease::TimingFunction;
use crate::animation::spring::Spring;
use crate::foundation::core::{Point, Rgba, Size, Vec2};
use crate::foundation::math::Transform3D;
use crate::modifier::condition::Condition;
use crate::modifier::state::{
    CascadeSpec, ConditionalModifiers, CoordinateSpace, DurationSpec, Overlay, SnapshotStrategy,
    TargetState,
};

/// A composable mutation of a [`TargetState`].
///
/// Transform modifiers (`Scale`, `Rotate`, `Translate`, `Perspective`) accumulate into the
/// existing transform; every other modifier overwrites its field.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    /// Opacity 0.
    Fade,
    /// Explicit opacity.
    Opacity(f64),
    /// Center position in container coordinates.
    Position(Point),
    /// Bounds size.
    Size(Size),
    /// Replace the transform outright.
    Transform(Transform3D),
    /// Perspective distance (sets `m34 = -1/d`).
    Perspective(f64),
    /// Scale along each axis.
    Scale {
        /// X factor.
        x: f64,
        /// Y factor.
        y: f64,
        /// Z factor.
        z: f64,
    },
    /// Rotation about each axis, radians.
    Rotate {
        /// About X.
        x: f64,
        /// About Y.
        y: f64,
        /// About Z.
        z: f64,
    },
    /// Translation.
    Translate {
        /// X offset.
        x: f64,
        /// Y offset.
        y: f64,
        /// Z offset.
        z: f64,
    },
    /// Corner radius.
    CornerRadius(f64),
    /// Depth hint.
    ZPosition(f64),
    /// Background color.
    BackgroundColor(Rgba),
    /// Border color.
    BorderColor(Rgba),
    /// Border width.
    BorderWidth(f64),
    /// Shadow color.
    ShadowColor(Rgba),
    /// Shadow opacity.
    ShadowOpacity(f64),
    /// Shadow offset.
    ShadowOffset(Vec2),
    /// Shadow radius.
    ShadowRadius(f64),
    /// Clipping flag.
    MasksToBounds(bool),
    /// Tint overlay.
    Overlay {
        /// Tint color.
        color: Rgba,
        /// Tint opacity.
        opacity: f64,
    },
    /// Fixed duration in seconds.
    Duration(f64),
    /// Match the longest animation of the transition.
    DurationMatchLongest,
    /// Start delay in seconds.
    Delay(f64),
    /// Timing curve.
    TimingFunction(TimingFunction),
    /// Spring physics.
    Spring(Spring),
    /// Arced position path.
    Arc(f64),
    /// Stagger children.
    Cascade(CascadeSpec),
    /// Align geometry with the node carrying this identifier in the other tree.
    Source(String),
    /// Proxy placement.
    CoordinateSpace(CoordinateSpace),
    /// Clear descendant states (direct children unless `recursive`).
    IgnoreSubtreeModifiers {
        /// Clear the whole subtree.
        recursive: bool,
    },
    /// Proxy capture strategy.
    Snapshot(SnapshotStrategy),
    /// Animate regardless of animatable fields and visibility.
    ForceAnimate,
    /// Never cross-fade when matched.
    ForceNonFade,
    /// Turn size changes into scale changes.
    ScaleBasedSizeChange,
    /// Values applied before the animation starts, unanimated.
    BeginWith(Vec<Modifier>),
    /// Modifiers applied later, only if the condition holds.
    When(Condition, Vec<Modifier>),
}

impl Modifier {
    /// Uniform 2D scale.
    pub fn scale(s: f64) -> Self {
        Self::Scale { x: s, y: s, z: 1.0 }
    }

    /// 2D translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self::Translate { x, y, z: 0.0 }
    }

    /// Rotation about Z.
    pub fn rotate(z: f64) -> Self {
        Self::Rotate { x: 0.0, y: 0.0, z }
    }

    /// Overlay tint.
    pub fn overlay(color: Rgba, opacity: f64) -> Self {
        Self::Overlay { color, opacity }
    }

    /// Spring physics with unit mass.
    pub fn spring(stiffness: f64, damping: f64) -> Self {
        Self::Spring(Spring::new(stiffness, damping))
    }

    /// Apply this modifier to `state`.
    pub fn apply(&self, state: &mut TargetState) {
        let transform = |state: &TargetState| state.transform.unwrap_or(Transform3D::IDENTITY);
        match self {
            Self::Fade => state.opacity = Some(0.0),
            Self::Opacity(v) => state.opacity = Some(*v),
            Self::Position(p) => state.position = Some(*p),
            Self::Size(s) => state.size = Some(*s),
            Self::Transform(t) => state.transform = Some(*t),
            Self::Perspective(d) => state.transform = Some(transform(state).with_perspective(*d)),
            Self::Scale { x, y, z } => state.transform = Some(transform(state).scaled(*x, *y, *z)),
            Self::Rotate { x, y, z } => {
                state.transform = Some(transform(state).rotated(*x, *y, *z));
            }
            Self::Translate { x, y, z } => {
                state.transform = Some(transform(state).translated(*x, *y, *z));
            }
            Self::CornerRadius(r) => state.corner_radius = Some(*r),
            Self::ZPosition(z) => state.z_position = Some(*z),
            Self::BackgroundColor(c) => state.background_color = Some(*c),
            Self::BorderColor(c) => state.border_color = Some(*c),
            Self::BorderWidth(w) => state.border_width = Some(*w),
            Self::ShadowColor(c) => state.shadow_color = Some(*c),
            Self::ShadowOpacity(o) => state.shadow_opacity = Some(*o),
            Self::ShadowOffset(o) => state.shadow_offset = Some(*o),
            Self::ShadowRadius(r) => state.shadow_radius = Some(*r),
            Self::MasksToBounds(m) => state.masks_to_bounds = Some(*m),
            Self::Overlay { color, opacity } => {
                state.overlay = Some(Overlay {
                    color: *color,
                    opacity: *opacity,
                });
            }
            Self::Duration(d) => state.duration = Some(DurationSpec::Fixed(*d)),
            Self::DurationMatchLongest => state.duration = Some(DurationSpec::MatchLongest),
            Self::Delay(d) => state.delay = *d,
            Self::TimingFunction(tf) => state.timing_function = Some(*tf),
            Self::Spring(s) => state.spring = Some(*s),
            Self::Arc(i) => state.arc = Some(*i),
            Self::Cascade(c) => state.cascade = Some(*c),
            Self::Source(id) => state.source = Some(id.clone()),
            Self::CoordinateSpace(cs) => state.coordinate_space = *cs,
            Self::IgnoreSubtreeModifiers { recursive } => {
                state.ignore_subtree_modifiers = Some(*recursive);
            }
            Self::Snapshot(s) => state.snapshot = *s,
            Self::ForceAnimate => state.force_animate = true,
            Self::ForceNonFade => state.force_non_fade = true,
            Self::ScaleBasedSizeChange => state.scale_based_size_change = true,
            Self::BeginWith(mods) => state
                .begin_state
                .get_or_insert_with(Box::default)
                .extend(mods),
            Self::When(condition, mods) => state.conditional.push(ConditionalModifiers {
                condition: condition.clone(),
                modifiers: mods.clone(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modifier/apply.rs"]
mod tests;
