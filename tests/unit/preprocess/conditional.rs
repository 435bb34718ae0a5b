use super::*;
use crate::foundation::core::{Rect, Size};
use crate::modifier::apply::Modifier;
use crate::modifier::condition::Condition;
use crate::preprocess::run_stages_for_test;
use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};
use crate::scene::host::SceneHost;
use crate::session::opts::TransitionOpts;

fn full() -> NodeBuilder {
    NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
}

fn card(id: &str) -> NodeBuilder {
    NodeBuilder::new(Rect::new(10.0, 10.0, 60.0, 60.0)).id(id)
}

fn scene(source: NodeBuilder, destination: NodeBuilder) -> Scene {
    SceneBuilder::new(Size::new(200.0, 200.0))
        .source(source)
        .destination(destination)
        .build()
        .unwrap()
}

#[test]
fn groups_apply_only_when_their_condition_holds() {
    let guarded = card("a").modifiers([
        Modifier::When(Condition::Matched, vec![Modifier::Fade]),
        Modifier::When(Condition::NotMatched, vec![Modifier::scale(0.5)]),
    ]);
    let s = scene(full().child(guarded), full().child(card("a")));
    let ctx = run_stages_for_test(&mut [Box::new(Conditional)], &s, &TransitionOpts::default());
    let node = s.find(s.source, "a").unwrap();
    let state = ctx.state(node).unwrap();

    assert_eq!(state.opacity, Some(0.0));
    assert_eq!(state.transform, None);
    assert!(state.conditional.is_empty());
}

#[test]
fn session_flags_reach_the_conditions() {
    let guarded = card("b").modifiers([
        Modifier::When(Condition::Dismissing, vec![Modifier::Opacity(0.5)]),
        Modifier::When(Condition::Appearing, vec![Modifier::CornerRadius(4.0)]),
    ]);
    let s = scene(full(), full().child(guarded));
    let opts = TransitionOpts {
        presenting: false,
        ..TransitionOpts::default()
    };
    let ctx = run_stages_for_test(&mut [Box::new(Conditional)], &s, &opts);
    let state = ctx.state(s.find(s.destination, "b").unwrap()).unwrap();

    assert_eq!(state.opacity, Some(0.5));
    assert_eq!(state.corner_radius, Some(4.0));
}

#[test]
fn ancestor_match_is_seen_by_descendants() {
    let inner = NodeBuilder::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .modifier(Modifier::When(Condition::AncestorMatched, vec![Modifier::Fade]));
    let s = scene(full().child(card("p").child(inner)), full().child(card("p")));
    let ctx = run_stages_for_test(&mut [Box::new(Conditional)], &s, &TransitionOpts::default());
    let panel = s.find(s.source, "p").unwrap();
    let inner = s.graph.children(panel)[0];

    assert_eq!(ctx.state(inner).unwrap().opacity, Some(0.0));
}
