use crate::context::transition::TransitionContext;
use crate::modifier::condition::ConditionalContext;
use crate::preprocess::{Preprocessor, StageInput};

/// Folds in `when(...)` modifiers whose condition holds now that pairing is known.
#[derive(Clone, Copy, Debug, Default)]
pub struct Conditional;

impl Preprocessor for Conditional {
    fn name(&self) -> &str {
        "conditional"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        let groups = [(input.from_nodes, false), (input.to_nodes, true)];
        for (nodes, appearing) in groups {
            for &node in nodes {
                if ctx.state(node).is_none_or(|s| s.conditional.is_empty()) {
                    continue;
                }
                let cx = ConditionalContext {
                    node,
                    appearing,
                    presenting: input.opts.presenting,
                    in_navigation: input.opts.in_navigation,
                    in_tab: input.opts.in_tab,
                    matched: ctx.paired_node(input.host, node),
                    matched_ancestor: ctx.matched_ancestor(input.host, node),
                };
                let Some(state) = ctx.state_mut(node) else {
                    continue;
                };
                for group in std::mem::take(&mut state.conditional) {
                    if group.condition.eval(&cx) {
                        state.extend(&group.modifiers);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/conditional.rs"]
mod tests;
