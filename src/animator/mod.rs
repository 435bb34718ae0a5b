use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::modifier::state::TargetState;
use crate::scene::host::SceneHost;

pub(crate) mod default;
pub(crate) mod node_animation;
pub(crate) mod record;
pub(crate) mod timing;

/// What an animator reports after starting its nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Playback {
    /// Every animation completes within this many seconds.
    Timed(f64),
    /// The animator has no natural end; the caller drives progress.
    Interactive,
}

/// Mutable access an animator gets while it runs.
pub struct AnimatorCx<'a> {
    /// Host tree, for presenting values.
    pub host: &'a mut dyn SceneHost,
    /// Transition context holding states and proxies.
    pub context: &'a mut TransitionContext,
    /// Session clock, in seconds.
    pub now: f64,
}

/// Drives the render proxies of the nodes it accepts.
///
/// The session calls `animate` once per transition, then any mix of `seek_to`, `resume` and
/// `apply` while the user interacts, `present` once per frame and finally `clean`.
pub trait Animator {
    /// Return `true` when this animator wants to animate `node`.
    fn can_animate(&self, context: &TransitionContext, node: NodeId, appearing: bool) -> bool;

    /// Start animating the accepted source (`from`) and destination (`to`) nodes.
    fn animate(&mut self, cx: &mut AnimatorCx<'_>, from: &[NodeId], to: &[NodeId]) -> Playback;

    /// Freeze every animation at `time_passed` seconds into the transition.
    fn seek_to(&mut self, cx: &mut AnimatorCx<'_>, time_passed: f64);

    /// Continue from `time_passed` toward the end, or back toward the start when `reverse`.
    ///
    /// Returns the seconds needed to get there.
    fn resume(&mut self, cx: &mut AnimatorCx<'_>, time_passed: f64, reverse: bool) -> f64;

    /// Override live target values of `node`.
    fn apply(
        &mut self,
        cx: &mut AnimatorCx<'_>,
        state: &TargetState,
        node: NodeId,
        time_passed: f64,
    );

    /// Write current values to the proxies and report them to the host.
    fn present(&mut self, cx: &mut AnimatorCx<'_>);

    /// Drop per-transition bookkeeping.
    fn clean(&mut self);
}
