use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::preprocess::{Preprocessor, StageInput, content_parent};
use crate::scene::host::SceneHost;

/// Clears the states of the children (or the whole subtree) of nodes carrying
/// `ignoreSubviewModifiers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreSubtreeModifiers;

impl Preprocessor for IgnoreSubtreeModifiers {
    fn name(&self) -> &str {
        "ignore_subtree_modifiers"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        for &node in input.from_nodes.iter().chain(input.to_nodes) {
            let Some(recursive) = ctx.state(node).and_then(|s| s.ignore_subtree_modifiers) else {
                continue;
            };
            let parent = content_parent(input.host, node);
            let cleared = if recursive {
                descendants(input.host, parent)
            } else {
                input.host.children(parent)
            };
            for n in cleared {
                ctx.clear_state(n);
            }
        }
    }
}

fn descendants(host: &dyn SceneHost, node: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = host.children(node);
    while let Some(n) = stack.pop() {
        out.push(n);
        stack.extend(host.children(n));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/ignore_subtree.rs"]
mod tests;
