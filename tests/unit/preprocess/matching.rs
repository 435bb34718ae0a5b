use super::*;
use crate::animation::ease::TimingFunction;
use crate::foundation::core::{Rect, Size};
use crate::modifier::apply::Modifier;
use crate::modifier::state::{DurationSpec, TargetState};
use crate::preprocess::run_stages_for_test;
use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};
use crate::session::opts::{ProxyOrdering, TransitionOpts};

fn full() -> NodeBuilder {
    NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0))
}

fn scene(from: NodeBuilder, to: NodeBuilder) -> Scene {
    SceneBuilder::new(Size::new(200.0, 200.0))
        .source(full().child(from.id("card")))
        .destination(full().child(to.id("card")))
        .build()
        .unwrap()
}

fn small() -> NodeBuilder {
    NodeBuilder::new(Rect::new(10.0, 10.0, 50.0, 50.0))
}

fn pair(s: &Scene, opts: &TransitionOpts) -> (TargetState, TargetState) {
    let ctx = run_stages_for_test(&mut [Box::new(Match)], s, opts);
    let f = s.find(s.source, "card").unwrap();
    let t = s.find(s.destination, "card").unwrap();
    (ctx.state(f).cloned().unwrap(), ctx.state(t).cloned().unwrap())
}

#[test]
fn opaque_pair_fades_only_the_destination() {
    let s = scene(small(), small());
    let (from, to) = pair(&s, &TransitionOpts::default());

    assert_eq!(from.source.as_deref(), Some("card"));
    assert_eq!(to.source.as_deref(), Some("card"));
    assert_eq!(to.opacity, Some(0.0));
    assert_eq!(from.opacity, None);
    assert!(!to.display_shadow);
    assert!(from.display_shadow);
}

#[test]
fn translucent_pair_cross_fades() {
    let s = scene(small().opacity(0.5), small());
    let (from, to) = pair(&s, &TransitionOpts::default());

    assert_eq!(from.opacity, Some(0.0));
    assert_eq!(to.opacity, Some(0.0));
    assert!(to.display_shadow);
}

#[test]
fn force_non_fade_wins_over_translucency() {
    let s = scene(small().opaque(false), small().modifier(Modifier::ForceNonFade));
    let (from, to) = pair(&s, &TransitionOpts::default());

    assert_eq!(from.opacity, None);
    assert_eq!(to.opacity, Some(0.0));
}

#[test]
fn source_on_top_fades_the_source_instead() {
    let s = scene(small(), small());
    let opts = TransitionOpts {
        ordering: ProxyOrdering::SourceOnTop,
        ..TransitionOpts::default()
    };
    let (from, to) = pair(&s, &opts);

    assert_eq!(from.opacity, Some(0.0));
    assert_eq!(to.opacity, None);
    assert!(!from.display_shadow);
}

#[test]
fn destination_timing_is_mirrored_onto_the_source() {
    let s = scene(
        small().modifiers([Modifier::Duration(2.0), Modifier::Delay(0.5)]),
        small().modifiers([
            Modifier::Duration(0.4),
            Modifier::TimingFunction(TimingFunction::Linear),
            Modifier::Arc(0.3),
        ]),
    );
    let (from, to) = pair(&s, &TransitionOpts::default());

    assert_eq!(from.duration, Some(DurationSpec::Fixed(0.4)));
    assert_eq!(from.delay, 0.0);
    assert_eq!(from.timing_function, Some(TimingFunction::Linear));
    assert_eq!(from.arc, to.arc);
}

#[test]
fn unpaired_nodes_are_left_alone() {
    let s = SceneBuilder::new(Size::new(200.0, 200.0))
        .source(full().child(small().id("a").modifier(Modifier::Fade)))
        .destination(full().child(small().id("b")))
        .build()
        .unwrap();
    let ctx = run_stages_for_test(&mut [Box::new(Match)], &s, &TransitionOpts::default());
    let a = s.find(s.source, "a").unwrap();

    assert_eq!(ctx.state(a).unwrap().source, None);
    assert!(ctx.state(s.find(s.destination, "b").unwrap()).is_none());
}
