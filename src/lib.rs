//! Crossmorph runs interruptible cross-fade and morph transitions between two visual trees.
//!
//! The engine is host-agnostic: it reads geometry from a [`SceneHost`], animates disposable
//! render proxies and reports their values back. A transition goes through three phases:
//!
//! - Resolve a [`TargetState`] per node from its [`Modifier`]s and the built-in
//!   [`Preprocessor`] stages (pairing by identifier, presets, cascades, automatic durations)
//! - Launch the [`Animator`]s on the nodes that have something to animate
//! - Play to the end, or follow [`TransitionSession::update`] until `finish` or `cancel`
//!
//! [`SceneGraph`] is an in-memory host, built with [`SceneBuilder`] or from a JSON
//! [`SceneDoc`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod animator;
pub(crate) mod context;
pub(crate) mod foundation;
pub(crate) mod modifier;
pub(crate) mod preprocess;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{NodeId, Point, Rect, Rgba, Size, Vec2};
pub use crate::foundation::error::{CrossmorphError, CrossmorphResult};
pub use crate::foundation::math::Transform3D;

pub use crate::animation::ease::TimingFunction;
pub use crate::animation::spring::Spring;
pub use crate::animation::track::{Curve, Interpolation, arc_control_point};
pub use crate::animation::value::{AnimValue, PropertyKey};

pub use crate::modifier::apply::Modifier;
pub use crate::modifier::condition::{Condition, ConditionalContext, Predicate};
pub use crate::modifier::error::ParseError;
pub use crate::modifier::state::{
    CascadeDirection, CascadeSpec, ConditionalModifiers, CoordinateSpace, DurationSpec, Overlay,
    SnapshotStrategy, TargetState,
};
pub use crate::modifier::text::{parse_modifiers, parse_modifiers_lossy};

pub use crate::scene::doc::{FrameDoc, NodeDoc, SceneDoc, SizeDoc};
pub use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};
pub use crate::scene::graph::{CaptureRecord, SceneGraph, SceneNode};
pub use crate::scene::host::{CaptureHandle, CaptureMode, LayerProps, NodeKind, SceneHost};

pub use crate::context::proxy::{ProxyContent, RenderProxy};
pub use crate::context::transition::{TransitionContext, capture_mode};

pub use crate::preprocess::cascade::Cascade;
pub use crate::preprocess::conditional::Conditional;
pub use crate::preprocess::default_animation::{
    DefaultAnimation, DefaultAnimationPreset, Direction, DirectionStrategy,
};
pub use crate::preprocess::duration::DurationNormalization;
pub use crate::preprocess::ignore_subtree::IgnoreSubtreeModifiers;
pub use crate::preprocess::matching::Match;
pub use crate::preprocess::source::SourceAlignment;
pub use crate::preprocess::{Preprocessor, StageInput, default_pipeline};

pub use crate::animator::default::DefaultAnimator;
pub use crate::animator::record::{ScheduleLog, ScheduleObserver, ScheduledInterpolation};
pub use crate::animator::timing::{Geometry, default_timing, optimized_duration};
pub use crate::animator::{Animator, AnimatorCx, Playback};

pub use crate::session::observer::{EventLog, Side, TransitionEvent, TransitionObserver};
pub use crate::session::opts::{ProxyOrdering, TransitionOpts};
pub use crate::session::progress::{ManualTicker, ProgressRunner, RunnerStep, TickSource};
pub use crate::session::transition::{TransitionSession, TransitionState};
