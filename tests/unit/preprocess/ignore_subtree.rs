use super::*;
use crate::foundation::core::{Rect, Size};
use crate::modifier::apply::Modifier;
use crate::preprocess::run_stages_for_test;
use crate::scene::dsl::{NodeBuilder, SceneBuilder};
use crate::scene::host::{NodeKind, SceneHost};
use crate::session::opts::TransitionOpts;

fn cell(y: f64) -> NodeBuilder {
    NodeBuilder::new(Rect::new(0.0, y, 100.0, y + 20.0)).modifier(Modifier::Fade)
}

fn run(root: NodeBuilder) -> (crate::scene::dsl::Scene, TransitionContext) {
    let scene = SceneBuilder::new(Size::new(200.0, 200.0))
        .source(root)
        .destination(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)))
        .build()
        .unwrap();
    let ctx = run_stages_for_test(
        &mut [Box::new(IgnoreSubtreeModifiers)],
        &scene,
        &TransitionOpts::default(),
    );
    (scene, ctx)
}

#[test]
fn direct_children_are_cleared_grandchildren_kept() {
    let (s, ctx) = run(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
        .modifier(Modifier::IgnoreSubtreeModifiers { recursive: false })
        .child(cell(0.0).child(cell(0.0))));
    let child = s.graph.children(s.source)[0];
    let grandchild = s.graph.children(child)[0];

    assert!(ctx.state(s.source).is_some());
    assert!(ctx.state(child).is_none());
    assert!(ctx.state(grandchild).is_some());
}

#[test]
fn recursive_clears_the_whole_subtree() {
    let (s, ctx) = run(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
        .modifier(Modifier::IgnoreSubtreeModifiers { recursive: true })
        .child(cell(0.0).child(cell(0.0)))
        .child(cell(40.0)));
    let kids = s.graph.children(s.source);
    let grandchild = s.graph.children(kids[0])[0];

    assert!(ctx.state(kids[0]).is_none());
    assert!(ctx.state(kids[1]).is_none());
    assert!(ctx.state(grandchild).is_none());
}

#[test]
fn wrapped_lists_clear_the_rows() {
    let (s, ctx) = run(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
        .kind(NodeKind::WrappedList)
        .modifier(Modifier::IgnoreSubtreeModifiers { recursive: false })
        .child(
            NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
                .modifier(Modifier::Fade)
                .child(cell(0.0))
                .child(cell(20.0)),
        ));
    let wrapper = s.graph.children(s.source)[0];
    let rows = s.graph.children(wrapper);

    assert!(ctx.state(wrapper).is_some());
    assert!(rows.iter().all(|r| ctx.state(*r).is_none()));
}
