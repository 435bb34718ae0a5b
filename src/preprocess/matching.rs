use crate::context::transition::TransitionContext;
use crate::preprocess::{Preprocessor, StageInput};

/// Pairs destination nodes with their source counterparts and decides the cross-fade.
///
/// Both members get `source` pointing at each other, the destination's timing is mirrored onto
/// the source, and one of the two is faded so the pair reads as a single element. When both are
/// opaque (or either forces non-fade) only the member stacked below fades, and the top member's
/// shadow is left to the other one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Match;

impl Preprocessor for Match {
    fn name(&self) -> &str {
        "match"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        let host = input.host;
        for &tv in input.to_nodes {
            let (Some(id), Some(fv)) = (host.identifier(tv), ctx.paired_node(host, tv)) else {
                continue;
            };
            let mut tv_state = ctx.state(tv).cloned().unwrap_or_default();
            let mut fv_state = ctx.state(fv).cloned().unwrap_or_default();
            tv_state.source = Some(id.to_owned());
            fv_state.source = Some(id.to_owned());
            fv_state.arc = tv_state.arc;
            fv_state.duration = tv_state.duration;
            fv_state.timing_function = tv_state.timing_function;
            fv_state.delay = tv_state.delay;
            fv_state.spring = tv_state.spring;

            let (tl, fl) = (host.layer(tv), host.layer(fv));
            let force_non_fade = tv_state.force_non_fade || fv_state.force_non_fade;
            let non_opaque =
                !fl.is_opaque || fl.opacity < 1.0 || !tl.is_opaque || tl.opacity < 1.0;
            let cross_fade = !force_non_fade && non_opaque;

            if ctx.insert_to_first() {
                fv_state.opacity = Some(0.0);
                if cross_fade {
                    tv_state.opacity = Some(0.0);
                } else {
                    tv_state.opacity = None;
                    if !tl.masks_to_bounds && tv_state.display_shadow {
                        fv_state.display_shadow = false;
                    }
                }
            } else {
                tv_state.opacity = Some(0.0);
                if cross_fade {
                    fv_state.opacity = Some(0.0);
                } else {
                    fv_state.opacity = None;
                    if !fl.masks_to_bounds && fv_state.display_shadow {
                        tv_state.display_shadow = false;
                    }
                }
            }
            tracing::trace!(id, from = %fv, to = %tv, cross_fade, "matched pair");
            ctx.set_state(tv, tv_state);
            ctx.set_state(fv, fv_state);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/matching.rs"]
mod tests;
