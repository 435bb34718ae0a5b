use crate::animator::timing::{Geometry, optimized_duration};
use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::modifier::state::DurationSpec;
use crate::preprocess::{Preprocessor, StageInput};
use crate::scene::host::SceneHost;

/// Fills in automatic durations and resolves `durationMatchLongest`.
///
/// Every node with a state and no duration gets the automatic one. Nodes asking to match the
/// longest animation then get the maximum over all nodes, where match-longest nodes contribute
/// their own automatic duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DurationNormalization;

impl Preprocessor for DurationNormalization {
    fn name(&self) -> &str {
        "duration"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        let nodes = || input.from_nodes.iter().chain(input.to_nodes).copied();
        let mut longest: f64 = 0.0;
        for node in nodes() {
            let Some(duration) = ctx.state(node).map(|s| s.duration) else {
                continue;
            };
            let own = match duration {
                Some(DurationSpec::Fixed(d)) => d,
                Some(DurationSpec::MatchLongest) => auto_duration(ctx, input.host, node),
                None => {
                    let d = auto_duration(ctx, input.host, node);
                    if let Some(s) = ctx.state_mut(node) {
                        s.duration = Some(DurationSpec::Fixed(d));
                    }
                    d
                }
            };
            longest = longest.max(own);
        }
        for node in nodes() {
            if let Some(s) = ctx.state_mut(node)
                && s.duration == Some(DurationSpec::MatchLongest)
            {
                s.duration = Some(DurationSpec::Fixed(longest));
            }
        }
        tracing::debug!(longest, "normalized durations");
    }
}

/// Automatic duration of `node` from its current geometry to its target state.
pub(crate) fn auto_duration(ctx: &TransitionContext, host: &dyn SceneHost, node: NodeId) -> f64 {
    let frame = ctx.frame_in_container(host, node);
    let from = Geometry {
        position: frame.center(),
        size: frame.size(),
        transform: host.layer(node).transform,
    };
    let to = match ctx.state(node) {
        Some(s) => Geometry {
            position: s.position.unwrap_or(from.position),
            size: s.size.unwrap_or(from.size),
            transform: s.transform.unwrap_or(from.transform),
        },
        None => from,
    };
    optimized_duration(&from, &to)
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/duration.rs"]
mod tests;
