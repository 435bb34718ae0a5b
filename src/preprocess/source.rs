use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::modifier::state::CoordinateSpace;
use crate::preprocess::{Preprocessor, StageInput};
use crate::scene::host::SceneHost;

/// Aligns nodes carrying `source(id)` with the geometry of the node `id` in the other tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceAlignment;

impl Preprocessor for SourceAlignment {
    fn name(&self) -> &str {
        "source"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        for &fv in input.from_nodes {
            let target = ctx
                .state(fv)
                .and_then(|s| s.source.as_deref())
                .and_then(|id| ctx.destination_node(id));
            if let Some(tv) = target {
                prepare_for(ctx, input.host, fv, tv);
            }
        }
        for &tv in input.to_nodes {
            let target = ctx
                .state(tv)
                .and_then(|s| s.source.as_deref())
                .and_then(|id| ctx.source_node(id));
            if let Some(fv) = target {
                prepare_for(ctx, input.host, tv, fv);
            }
        }
    }
}

fn prepare_for(ctx: &mut TransitionContext, host: &dyn SceneHost, node: NodeId, target: NodeId) {
    let frame = ctx.frame_in_container(host, node);
    let target_frame = ctx.frame_in_container(host, target);
    let (layer, tl) = (host.layer(node), host.layer(target));
    let Some(state) = ctx.state_mut(node) else {
        return;
    };

    // The target position is in container coordinates.
    state.coordinate_space = CoordinateSpace::Global;
    state.position = Some(target_frame.center());
    state.transform = None;
    state.size = None;
    state.corner_radius = None;

    if frame.size() != target_frame.size() {
        state.size = Some(target_frame.size());
    }
    if layer.corner_radius != tl.corner_radius {
        state.corner_radius = Some(tl.corner_radius);
    }
    if layer.transform != tl.transform {
        state.transform = Some(tl.transform);
    }
    if layer.shadow_color != tl.shadow_color {
        state.shadow_color = Some(tl.shadow_color);
    }
    if layer.shadow_opacity != tl.shadow_opacity {
        state.shadow_opacity = Some(tl.shadow_opacity);
    }
    if layer.shadow_offset != tl.shadow_offset {
        state.shadow_offset = Some(tl.shadow_offset);
    }
    if layer.shadow_radius != tl.shadow_radius {
        state.shadow_radius = Some(tl.shadow_radius);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/source.rs"]
mod tests;
