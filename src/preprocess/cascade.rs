use std::cmp::Ordering;

use crate::context::transition::TransitionContext;
use crate::foundation::core::{NodeId, Rect};
use crate::modifier::state::{CascadeDirection, CascadeSpec};
use crate::preprocess::{Preprocessor, StageInput, content_parent};
use crate::scene::host::SceneHost;

/// Staggers the children of nodes carrying `cascade(...)`.
///
/// Children are sorted by the direction comparator and the `i`-th one (with its whole subtree)
/// starts `i * delta` after the cascading node's own delay. Matched descendants keep their
/// delay unless `delay_matched` is set, in which case the pair starts after the last child.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cascade;

impl Preprocessor for Cascade {
    fn name(&self) -> &str {
        "cascade"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        for &node in input.from_nodes.iter().chain(input.to_nodes) {
            let Some((spec, base)) = ctx.state(node).and_then(|s| Some((s.cascade?, s.delay)))
            else {
                continue;
            };
            cascade(ctx, input.host, node, spec, base);
        }
    }
}

fn cascade(
    ctx: &mut TransitionContext,
    host: &dyn SceneHost,
    node: NodeId,
    spec: CascadeSpec,
    base: f64,
) {
    let parent = content_parent(host, node);
    let parent_origin = host.frame(parent).origin().to_vec2();
    let mut children: Vec<(NodeId, Rect)> = host
        .children(parent)
        .into_iter()
        .map(|c| (c, host.frame(c) - parent_origin))
        .collect();
    children.sort_by(|a, b| compare(spec.direction, a.1, b.1));

    let last = children.len() as f64 * spec.delta + base;
    for (i, (child, _)) in children.into_iter().enumerate() {
        let delay = i as f64 * spec.delta + base;
        apply_delay(ctx, host, child, delay, last, spec.delay_matched);
    }
}

fn apply_delay(
    ctx: &mut TransitionContext,
    host: &dyn SceneHost,
    node: NodeId,
    delay: f64,
    last: f64,
    delay_matched: bool,
) {
    match ctx.paired_node(host, node) {
        None => {
            if let Some(s) = ctx.state_mut(node) {
                s.delay = delay;
            }
        }
        Some(pair) if delay_matched => {
            for n in [node, pair] {
                if let Some(s) = ctx.state_mut(n) {
                    s.delay = last;
                }
            }
        }
        Some(_) => {}
    }
    for child in host.children(node) {
        apply_delay(ctx, host, child, delay, last, delay_matched);
    }
}

/// Sort order of two sibling frames (parent coordinates) for a cascade direction.
pub fn compare(direction: CascadeDirection, a: Rect, b: Rect) -> Ordering {
    let asc = |x: f64, y: f64| x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    match direction {
        CascadeDirection::TopToBottom => asc(a.y0, b.y0),
        CascadeDirection::BottomToTop => {
            if a.y1 == b.y1 {
                asc(b.x1, a.x1)
            } else {
                asc(b.y1, a.y1)
            }
        }
        CascadeDirection::LeftToRight => asc(a.x0, b.x0),
        CascadeDirection::RightToLeft => asc(b.x1, a.x1),
        CascadeDirection::Radial(p) => asc(a.center().distance(p), b.center().distance(p)),
        CascadeDirection::InverseRadial(p) => asc(b.center().distance(p), a.center().distance(p)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/cascade.rs"]
mod tests;
