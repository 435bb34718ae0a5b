use crate::animator::default::DefaultAnimator;
use crate::animator::{Animator, AnimatorCx, Playback};
use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::foundation::error::{CrossmorphError, CrossmorphResult};
use crate::modifier::apply::Modifier;
use crate::modifier::state::TargetState;
use crate::preprocess::{Preprocessor, StageInput, default_pipeline, run_pipeline};
use crate::scene::host::SceneHost;
use crate::session::observer::{Side, TransitionObserver};
use crate::session::opts::TransitionOpts;
use crate::session::progress::{
    COMPLETION_EPSILON, ManualTicker, ProgressRunner, RunnerStep, TickSource,
};

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    /// No transition.
    #[default]
    Idle,
    /// A transition was requested but not prepared yet.
    Notified,
    /// Target states are resolved; animation launches on the next tick.
    Preparing,
    /// Proxies are animating.
    Animating,
    /// Cleaning up.
    Completing,
}

type Completion = Box<dyn FnOnce(bool)>;

/// Runs one transition at a time between a source and a destination tree of a host.
///
/// `start_transition` resolves every node's target state and hides the destination; the next
/// `tick` creates the proxies and launches the animators. From then on the session either plays
/// to the end on its own or follows `update` calls until `finish` or `cancel`, and always ends
/// back in [`TransitionState::Idle`] with the host restored.
pub struct TransitionSession<H: SceneHost> {
    host: H,
    container: NodeId,
    opts: TransitionOpts,
    stages: Vec<Box<dyn Preprocessor>>,
    animators: Vec<Box<dyn Animator>>,
    observers: Vec<Box<dyn TransitionObserver>>,
    ticker: Box<dyn TickSource>,
    runner: ProgressRunner,
    completion: Option<Completion>,

    state: TransitionState,
    context: Option<TransitionContext>,
    roots: Option<(NodeId, NodeId)>,
    animating_from: Vec<NodeId>,
    animating_to: Vec<NodeId>,
    progress: f64,
    total_duration: f64,
    clock: f64,
    starting_progress: Option<f64>,
    force_finishing: Option<bool>,
}

impl<H: SceneHost> TransitionSession<H> {
    /// Session animating inside `container` with the built-in stages and the default animator.
    pub fn new(host: H, container: NodeId, opts: TransitionOpts) -> CrossmorphResult<Self> {
        if !host.contains(container) {
            return Err(CrossmorphError::validation(format!(
                "container {container} is not part of the host"
            )));
        }
        Ok(Self {
            host,
            container,
            opts,
            stages: default_pipeline(),
            animators: vec![Box::new(DefaultAnimator::new())],
            observers: Vec::new(),
            ticker: Box::new(ManualTicker::new()),
            runner: ProgressRunner::new(),
            completion: None,
            state: TransitionState::Idle,
            context: None,
            roots: None,
            animating_from: Vec::new(),
            animating_to: Vec::new(),
            progress: 0.0,
            total_duration: 0.0,
            clock: 0.0,
            starting_progress: None,
            force_finishing: None,
        })
    }

    /// Append a stage after the built-in ones.
    pub fn with_preprocessor(mut self, stage: impl Preprocessor + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append an animator after the default one.
    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animators.push(Box::new(animator));
        self
    }

    /// Replace every animator, the default one included.
    pub fn with_animators(mut self, animators: Vec<Box<dyn Animator>>) -> Self {
        self.animators = animators;
        self
    }

    /// Drive the session from `ticker` instead of a [`ManualTicker`].
    pub fn with_ticker(mut self, ticker: impl TickSource + 'static) -> Self {
        self.ticker = Box::new(ticker);
        self
    }

    /// Register a lifecycle observer.
    pub fn add_observer(&mut self, observer: impl TransitionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Call `callback` with the outcome when the current (or next) transition completes.
    pub fn on_complete(&mut self, callback: impl FnOnce(bool) + 'static) {
        self.completion = Some(Box::new(callback));
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Session options.
    pub fn opts(&self) -> &TransitionOpts {
        &self.opts
    }

    /// Replace the options used by the next transition.
    pub fn set_opts(&mut self, opts: TransitionOpts) {
        self.opts = opts;
    }

    /// Context of the running transition.
    pub fn context(&self) -> Option<&TransitionContext> {
        self.context.as_ref()
    }

    /// Current state.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Seconds the whole transition takes at normal speed.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Session clock, in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Return `true` when progress follows `update` rather than the clock.
    pub fn is_interactive(&self) -> bool {
        !self.runner.is_running()
    }

    /// The tick source.
    pub fn ticker(&self) -> &dyn TickSource {
        self.ticker.as_ref()
    }

    /// Source nodes being animated.
    pub fn animating_from(&self) -> &[NodeId] {
        &self.animating_from
    }

    /// Destination nodes being animated.
    pub fn animating_to(&self) -> &[NodeId] {
        &self.animating_to
    }

    fn set_state(&mut self, state: TransitionState) {
        tracing::debug!(from = ?self.state, to = ?state, "transition state");
        self.state = state;
        for o in &mut self.observers {
            o.state_changed(state);
        }
    }

    /// Request a transition from `source` to `destination` without preparing it yet.
    ///
    /// Returns `false` (and does nothing) unless the session is idle.
    ///
    /// # Panics
    ///
    /// Panics when either root is not part of the host.
    pub fn notify(&mut self, source: NodeId, destination: NodeId) -> bool {
        if self.state != TransitionState::Idle {
            tracing::debug!(state = ?self.state, "transition already in flight, ignoring start");
            return false;
        }
        assert!(self.host.contains(source), "source root {source} is not part of the host");
        assert!(
            self.host.contains(destination),
            "destination root {destination} is not part of the host"
        );
        self.roots = Some((source, destination));
        self.set_state(TransitionState::Notified);
        true
    }

    /// [`notify`](Self::notify) followed by [`start`](Self::start).
    pub fn start_transition(&mut self, source: NodeId, destination: NodeId) -> bool {
        if !self.notify(source, destination) {
            return false;
        }
        self.start();
        true
    }

    /// Resolve target states and pick the nodes to animate.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) {
        if self.state != TransitionState::Notified {
            return;
        }
        let Some((source, destination)) = self.roots else {
            return;
        };
        self.set_state(TransitionState::Preparing);
        for o in &mut self.observers {
            o.will_start(Side::Source, source);
            o.will_start(Side::Destination, destination);
        }

        let mut ctx = TransitionContext::new(&self.host, self.container);
        ctx.set(&self.host, source, destination);
        ctx.set_insert_to_first(self.opts.insert_to_first());
        let from = ctx.from_nodes().to_vec();
        let to = ctx.to_nodes().to_vec();
        let input = StageInput {
            host: &self.host,
            opts: &self.opts,
            animators: &self.animators,
            from_nodes: &from,
            to_nodes: &to,
        };
        run_pipeline(&mut self.stages, &mut ctx, &input);

        let wanted = |node: NodeId, appearing: bool| {
            self.animators
                .iter()
                .any(|a| a.can_animate(&ctx, node, appearing))
        };
        self.animating_from = from.iter().copied().filter(|n| wanted(*n, false)).collect();
        self.animating_to = to.iter().copied().filter(|n| wanted(*n, true)).collect();
        tracing::debug!(
            from = self.animating_from.len(),
            to = self.animating_to.len(),
            "selected animating nodes"
        );

        ctx.hide(&mut self.host, destination);
        self.context = Some(ctx);
    }

    /// Create proxies and launch every animator.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn animate(&mut self) {
        if self.state != TransitionState::Preparing {
            return;
        }
        let Some((_, destination)) = self.roots else {
            return;
        };
        self.set_state(TransitionState::Animating);

        let Self {
            host,
            context,
            animators,
            animating_from,
            animating_to,
            clock,
            ..
        } = self;
        let Some(ctx) = context.as_mut() else {
            return;
        };
        let host: &mut dyn SceneHost = host;
        ctx.unhide(host, destination);
        for &node in animating_from.iter().chain(animating_to.iter()) {
            ctx.hide(host, node);
        }
        let (first, second) = if ctx.insert_to_first() {
            (&*animating_to, &*animating_from)
        } else {
            (&*animating_from, &*animating_to)
        };
        for &node in first.iter().chain(second) {
            ctx.proxy(host, node);
        }

        let mut total: f64 = 0.0;
        let mut wants_interactive = false;
        for animator in animators.iter_mut() {
            let from: Vec<_> = animating_from
                .iter()
                .copied()
                .filter(|n| animator.can_animate(&*ctx, *n, false))
                .collect();
            let to: Vec<_> = animating_to
                .iter()
                .copied()
                .filter(|n| animator.can_animate(&*ctx, *n, true))
                .collect();
            let mut cx = AnimatorCx {
                host: &mut *host,
                context: &mut *ctx,
                now: *clock,
            };
            match animator.animate(&mut cx, &from, &to) {
                Playback::Timed(d) => total = total.max(d),
                Playback::Interactive => wants_interactive = true,
            }
            animator.present(&mut cx);
        }
        self.total_duration = total;
        tracing::debug!(total, wants_interactive, "animation launched");

        if let Some(finished) = self.force_finishing {
            self.complete(finished);
        } else if let Some(p) = self.starting_progress {
            self.update(p);
        } else if wants_interactive {
            self.update(0.0);
        } else {
            self.complete_after(total, true);
        }
    }

    /// Advance the session clock by one frame of `dt` seconds.
    ///
    /// A prepared transition launches on the first tick without consuming time.
    pub fn tick(&mut self, dt: f64) {
        match self.state {
            TransitionState::Preparing => self.animate(),
            TransitionState::Animating => {
                self.clock += dt;
                self.present();
                match self.runner.advance(dt) {
                    Some(RunnerStep::Progress(p)) => self.set_progress(p),
                    Some(RunnerStep::Complete(finished)) => {
                        self.ticker.stop();
                        self.complete(finished);
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn present(&mut self) {
        let Self {
            host,
            context,
            animators,
            clock,
            ..
        } = self;
        let Some(ctx) = context.as_mut() else {
            return;
        };
        let mut cx = AnimatorCx {
            host,
            context: ctx,
            now: *clock,
        };
        for animator in animators.iter_mut() {
            animator.present(&mut cx);
        }
    }

    fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
        if self.state != TransitionState::Animating {
            return;
        }
        for o in &mut self.observers {
            o.progress_changed(progress);
        }
        if self.is_interactive() {
            let time_passed = progress * self.total_duration;
            self.for_each_animator(|animator, cx| animator.seek_to(cx, time_passed));
            self.present();
        }
    }

    fn for_each_animator(&mut self, mut f: impl FnMut(&mut dyn Animator, &mut AnimatorCx<'_>)) {
        let Self {
            host,
            context,
            animators,
            clock,
            ..
        } = self;
        let Some(ctx) = context.as_mut() else {
            return;
        };
        let mut cx = AnimatorCx {
            host,
            context: ctx,
            now: *clock,
        };
        for animator in animators.iter_mut() {
            f(animator.as_mut(), &mut cx);
        }
    }

    /// Take over progress and move to `progress` (clamped to `[0, 1]`).
    ///
    /// Before animation starts the value is kept and applied at launch.
    pub fn update(&mut self, progress: f64) {
        match self.state {
            TransitionState::Animating => {
                self.runner.stop();
                self.ticker.stop();
                self.set_progress(progress.clamp(0.0, 1.0));
            }
            TransitionState::Notified | TransitionState::Preparing => {
                self.starting_progress = Some(progress);
            }
            _ => tracing::debug!(state = ?self.state, "update outside a transition ignored"),
        }
    }

    /// Play to the end, or jump there when `animated` is false.
    pub fn finish(&mut self, animated: bool) {
        self.end(animated, true);
    }

    /// Play back to the start, or jump there when `animated` is false.
    pub fn cancel(&mut self, animated: bool) {
        self.end(animated, false);
    }

    fn end(&mut self, animated: bool, finishing: bool) {
        if !matches!(
            self.state,
            TransitionState::Animating | TransitionState::Notified | TransitionState::Preparing
        ) {
            tracing::debug!(state = ?self.state, finishing, "end outside a transition ignored");
            return;
        }
        if !animated {
            self.complete(finishing);
            return;
        }
        let time_passed = self.progress.abs() * self.total_duration;
        let mut residual: f64 = 0.0;
        self.for_each_animator(|animator, cx| {
            residual = residual.max(animator.resume(cx, time_passed, !finishing));
        });
        self.complete_after(residual, finishing);
    }

    /// Override target values of `node` (and its counterpart) while animating.
    pub fn apply(&mut self, modifiers: &[Modifier], node: NodeId) {
        if self.state != TransitionState::Animating {
            tracing::debug!(state = ?self.state, "apply outside an animation ignored");
            return;
        }
        let state = TargetState::from_modifiers(modifiers);
        let time_passed = self.progress * self.total_duration;
        let paired = self
            .context
            .as_ref()
            .and_then(|ctx| ctx.paired_node(&self.host, node));
        for target in paired.into_iter().chain(std::iter::once(node)) {
            self.for_each_animator(|animator, cx| animator.apply(cx, &state, target, time_passed));
        }
        self.present();
    }

    fn complete_after(&mut self, after: f64, finishing: bool) {
        if !matches!(
            self.state,
            TransitionState::Animating | TransitionState::Notified | TransitionState::Preparing
        ) {
            return;
        }
        if after <= COMPLETION_EPSILON {
            self.complete(finishing);
            return;
        }
        let total = if finishing {
            after / (1.0 - self.progress).max(0.01)
        } else {
            after / self.progress.max(0.01)
        };
        tracing::debug!(after, total, finishing, "scheduling completion");
        self.runner.start(self.progress * total, total, !finishing);
        self.ticker.start();
    }

    /// Tear the transition down and return to idle.
    ///
    /// Before preparation this only records the outcome, which is applied at launch.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn complete(&mut self, finished: bool) {
        if self.state == TransitionState::Notified {
            self.force_finishing = Some(finished);
            return;
        }
        if !matches!(
            self.state,
            TransitionState::Animating | TransitionState::Preparing
        ) {
            return;
        }
        self.set_state(TransitionState::Completing);
        self.runner.stop();
        self.ticker.stop();

        if let Some(mut ctx) = self.context.take() {
            ctx.clean(&mut self.host);
            ctx.unhide_all(&mut self.host);
            ctx.remove_proxies(&mut self.host);
        }
        for animator in &mut self.animators {
            animator.clean();
        }
        if let Some(callback) = self.completion.take() {
            callback(finished);
        }
        if let Some((source, destination)) = self.roots.take() {
            for o in &mut self.observers {
                if finished {
                    o.did_end(Side::Source, source);
                    o.did_end(Side::Destination, destination);
                } else {
                    o.did_cancel(Side::Source, source);
                    o.did_cancel(Side::Destination, destination);
                }
            }
        }

        self.animating_from.clear();
        self.animating_to.clear();
        self.starting_progress = None;
        self.force_finishing = None;
        self.progress = 0.0;
        self.total_duration = 0.0;
        self.set_state(TransitionState::Idle);
    }
}

impl<H: SceneHost> std::fmt::Debug for TransitionSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionSession")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("total_duration", &self.total_duration)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/transition.rs"]
mod tests;
