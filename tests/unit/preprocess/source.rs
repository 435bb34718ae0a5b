use super::*;
use crate::foundation::core::{Point, Rect, Size};
use crate::modifier::apply::Modifier;
use crate::preprocess::run_stages_for_test;
use crate::scene::dsl::{NodeBuilder, SceneBuilder};
use crate::session::opts::TransitionOpts;

#[test]
fn source_takes_the_target_geometry() {
    let s = SceneBuilder::new(Size::new(200.0, 200.0))
        .source(
            NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)).child(
                NodeBuilder::new(Rect::new(10.0, 10.0, 50.0, 50.0))
                    .id("a")
                    .modifiers([Modifier::Source("b".into()), Modifier::scale(2.0)]),
            ),
        )
        .destination(
            NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)).child(
                NodeBuilder::new(Rect::new(100.0, 100.0, 180.0, 160.0))
                    .id("b")
                    .corner_radius(8.0),
            ),
        )
        .build()
        .unwrap();
    let ctx = run_stages_for_test(&mut [Box::new(SourceAlignment)], &s, &TransitionOpts::default());
    let state = ctx.state(s.find(s.source, "a").unwrap()).unwrap();

    assert_eq!(state.coordinate_space, CoordinateSpace::Global);
    assert_eq!(state.position, Some(Point::new(140.0, 130.0)));
    assert_eq!(state.size, Some(Size::new(80.0, 60.0)));
    assert_eq!(state.corner_radius, Some(8.0));
    assert_eq!(state.transform, None);
    assert_eq!(state.shadow_radius, None);
}

#[test]
fn unknown_source_ids_are_ignored() {
    let s = SceneBuilder::new(Size::new(200.0, 200.0))
        .source(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)))
        .destination(
            NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
                .modifier(Modifier::Source("missing".into())),
        )
        .build()
        .unwrap();
    let ctx = run_stages_for_test(&mut [Box::new(SourceAlignment)], &s, &TransitionOpts::default());
    let state = ctx.state(s.destination).unwrap();

    assert_eq!(state.position, None);
    assert_eq!(state.coordinate_space, CoordinateSpace::default());
}
