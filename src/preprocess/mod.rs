use crate::animator::Animator;
use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::scene::host::{NodeKind, SceneHost};
use crate::session::opts::TransitionOpts;

pub(crate) mod cascade;
pub(crate) mod conditional;
pub(crate) mod default_animation;
pub(crate) mod duration;
pub(crate) mod ignore_subtree;
pub(crate) mod matching;
pub(crate) mod source;

/// Read-only inputs shared by every stage of one pipeline run.
pub struct StageInput<'a> {
    /// Host tree.
    pub host: &'a dyn SceneHost,
    /// Session options.
    pub opts: &'a TransitionOpts,
    /// Animators active for this transition.
    pub animators: &'a [Box<dyn Animator>],
    /// Source working set, pre-order.
    pub from_nodes: &'a [NodeId],
    /// Destination working set, pre-order.
    pub to_nodes: &'a [NodeId],
}

/// One stage of target-state resolution.
///
/// Stages run in a fixed order and mutate the context's state map in place.
pub trait Preprocessor {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the stage.
    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>);
}

/// The built-in stages in their required order.
pub fn default_pipeline() -> Vec<Box<dyn Preprocessor>> {
    vec![
        Box::new(ignore_subtree::IgnoreSubtreeModifiers),
        Box::new(conditional::Conditional),
        Box::new(default_animation::DefaultAnimationPreset),
        Box::new(matching::Match),
        Box::new(source::SourceAlignment),
        Box::new(cascade::Cascade),
        Box::new(duration::DurationNormalization),
    ]
}

#[tracing::instrument(level = "debug", skip_all, fields(stages = stages.len()))]
pub(crate) fn run_pipeline(
    stages: &mut [Box<dyn Preprocessor>],
    ctx: &mut TransitionContext,
    input: &StageInput<'_>,
) {
    for stage in stages.iter_mut() {
        tracing::debug!(stage = stage.name(), "running stage");
        stage.process(ctx, input);
    }
}

/// Node whose children hold the content of `node`: the wrapper of a wrapped list, else itself.
pub(crate) fn content_parent(host: &dyn SceneHost, node: NodeId) -> NodeId {
    if host.kind(node) == NodeKind::WrappedList
        && let Some(wrapper) = host.children(node).first()
    {
        return *wrapper;
    }
    node
}

#[cfg(test)]
pub(crate) fn run_stages_for_test(
    stages: &mut [Box<dyn Preprocessor>],
    scene: &crate::scene::dsl::Scene,
    opts: &TransitionOpts,
) -> TransitionContext {
    let mut ctx = TransitionContext::new(&scene.graph, scene.container);
    ctx.set(&scene.graph, scene.source, scene.destination);
    ctx.set_insert_to_first(opts.insert_to_first());
    let from = ctx.from_nodes().to_vec();
    let to = ctx.to_nodes().to_vec();
    let animators: Vec<Box<dyn Animator>> =
        vec![Box::new(crate::animator::default::DefaultAnimator::new())];
    let input = StageInput {
        host: &scene.graph,
        opts,
        animators: &animators,
        from_nodes: &from,
        to_nodes: &to,
    };
    run_pipeline(stages, &mut ctx, &input);
    ctx
}
