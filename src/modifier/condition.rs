use std::fmt;
use std::sync::Arc;

use crate::foundation::core::NodeId;

/// Facts about one node that become known only once both trees are flattened and paired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConditionalContext {
    /// The node being evaluated.
    pub node: NodeId,
    /// Node belongs to the destination tree.
    pub appearing: bool,
    /// The transition presents the destination.
    pub presenting: bool,
    /// The transition runs inside a stacked navigation container.
    pub in_navigation: bool,
    /// The transition runs inside a tabbed container.
    pub in_tab: bool,
    /// Counterpart node in the other tree.
    pub matched: Option<NodeId>,
    /// Nearest matched ancestor (below the container) and its counterpart.
    pub matched_ancestor: Option<(NodeId, NodeId)>,
}

/// Caller-supplied predicate.
#[derive(Clone)]
pub struct Predicate(pub Arc<dyn Fn(&ConditionalContext) -> bool + Send + Sync>);

impl Predicate {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&ConditionalContext) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Predicate guarding a deferred group of modifiers.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Node has a counterpart.
    Matched,
    /// Node has no counterpart.
    NotMatched,
    /// Transition presents.
    Presenting,
    /// Transition dismisses.
    Dismissing,
    /// Node is in the destination tree.
    Appearing,
    /// Node is in the source tree.
    Disappearing,
    /// Some ancestor below the container has a counterpart.
    AncestorMatched,
    /// Inside a navigation container.
    InNavigation,
    /// Inside a tab container.
    InTab,
    /// All conditions hold.
    All(Vec<Condition>),
    /// Negation.
    Not(Box<Condition>),
    /// Arbitrary closure.
    #[serde(skip_serializing)]
    Custom(Predicate),
}

impl Condition {
    /// Evaluate against a node's context.
    pub fn eval(&self, cx: &ConditionalContext) -> bool {
        match self {
            Self::Matched => cx.matched.is_some(),
            Self::NotMatched => cx.matched.is_none(),
            Self::Presenting => cx.presenting,
            Self::Dismissing => !cx.presenting,
            Self::Appearing => cx.appearing,
            Self::Disappearing => !cx.appearing,
            Self::AncestorMatched => cx.matched_ancestor.is_some(),
            Self::InNavigation => cx.in_navigation,
            Self::InTab => cx.in_tab,
            Self::All(all) => all.iter().all(|c| c.eval(cx)),
            Self::Not(c) => !c.eval(cx),
            Self::Custom(p) => (p.0)(cx),
        }
    }
}
