use super::*;
use crate::animation::ease::TimingFunction;
use crate::animation::value::{AnimValue, PropertyKey};
use crate::animator::record::ScheduleLog;
use crate::foundation::core::{Point, Rect, Size};
use crate::modifier::apply::Modifier;
use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};

fn tile(id: &str, x: f64, modifiers: Vec<Modifier>) -> NodeBuilder {
    NodeBuilder::new(Rect::new(x, 0.0, x + 40.0, 40.0))
        .id(id)
        .modifiers(modifiers)
}

fn scene(tiles: Vec<NodeBuilder>) -> (Scene, TransitionContext) {
    let s = SceneBuilder::new(Size::new(200.0, 200.0))
        .source(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)).children(tiles))
        .destination(NodeBuilder::new(Rect::new(0.0, 0.0, 200.0, 200.0)))
        .build()
        .unwrap();
    let mut ctx = TransitionContext::new(&s.graph, s.container);
    ctx.set(&s.graph, s.source, s.destination);
    (s, ctx)
}

fn animating(ctx: &TransitionContext, animator: &DefaultAnimator) -> Vec<NodeId> {
    ctx.from_nodes()
        .iter()
        .copied()
        .filter(|n| animator.can_animate(ctx, *n, false))
        .collect()
}

#[test]
fn accepts_nodes_with_animatable_fields() {
    let (s, ctx) = scene(vec![
        tile("fade", 0.0, vec![Modifier::Fade]),
        tile("delay", 50.0, vec![Modifier::Delay(0.1)]),
        tile("forced", 100.0, vec![Modifier::ForceAnimate]),
        tile("plain", 150.0, vec![]),
    ]);
    let animator = DefaultAnimator::new();
    let yes = |id| animator.can_animate(&ctx, s.find(s.source, id).unwrap(), false);

    assert!(yes("fade"));
    assert!(!yes("delay"));
    assert!(yes("forced"));
    assert!(!yes("plain"));
}

#[test]
fn animate_reports_the_longest_node() {
    let (mut s, mut ctx) = scene(vec![
        tile("slow", 0.0, vec![Modifier::Fade, Modifier::Duration(0.4)]),
        tile("auto", 50.0, vec![Modifier::Fade]),
    ]);
    let log = ScheduleLog::new();
    let mut animator = DefaultAnimator::new().with_observer(log.clone());
    let from = animating(&ctx, &animator);
    let mut cx = AnimatorCx {
        host: &mut s.graph,
        context: &mut ctx,
        now: 0.0,
    };

    assert_eq!(animator.animate(&mut cx, &from, &[]), Playback::Timed(0.4));
    assert_eq!(animator.len(), 2);
    assert_eq!(log.len(), 2);

    let auto = s.find(s.source, "auto").unwrap();
    let entry = &log.for_key(auto, PropertyKey::Opacity)[0];
    assert_eq!(entry.duration, 0.208);
    assert!(ctx.existing_proxy(auto).is_some());
}

#[test]
fn match_longest_nodes_follow_the_longest() {
    let (mut s, mut ctx) = scene(vec![
        tile("slow", 0.0, vec![Modifier::Fade, Modifier::Duration(0.6)]),
        tile("follow", 50.0, vec![Modifier::Fade, Modifier::DurationMatchLongest]),
    ]);
    let log = ScheduleLog::new();
    let mut animator = DefaultAnimator::new().with_observer(log.clone());
    let from = animating(&ctx, &animator);
    let mut cx = AnimatorCx {
        host: &mut s.graph,
        context: &mut ctx,
        now: 0.0,
    };
    animator.animate(&mut cx, &from, &[]);

    let follow = s.find(s.source, "follow").unwrap();
    assert_eq!(log.for_key(follow, PropertyKey::Opacity)[0].duration, 0.6);
}

#[test]
fn unresolved_match_longest_is_left_out_of_the_maximum() {
    let (mut s, mut ctx) = scene(vec![
        tile("quick", 0.0, vec![Modifier::Fade, Modifier::Duration(0.1)]),
        tile(
            "far",
            50.0,
            vec![Modifier::Position(Point::new(180.0, 180.0)), Modifier::DurationMatchLongest],
        ),
    ]);
    let log = ScheduleLog::new();
    let mut animator = DefaultAnimator::new().with_observer(log.clone());
    let from = animating(&ctx, &animator);
    let mut cx = AnimatorCx {
        host: &mut s.graph,
        context: &mut ctx,
        now: 0.0,
    };

    assert_eq!(animator.animate(&mut cx, &from, &[]), Playback::Timed(0.1));
    let far = s.find(s.source, "far").unwrap();
    assert_eq!(log.for_key(far, PropertyKey::Position)[0].duration, 0.1);
}

#[test]
fn present_pushes_sampled_values_to_the_host() {
    let linear = Modifier::TimingFunction(TimingFunction::Linear);
    let (mut s, mut ctx) = scene(vec![tile(
        "a",
        0.0,
        vec![Modifier::Fade, Modifier::Duration(1.0), linear],
    )]);
    let mut animator = DefaultAnimator::new();
    let from = animating(&ctx, &animator);
    let a = s.find(s.source, "a").unwrap();
    {
        let mut cx = AnimatorCx {
            host: &mut s.graph,
            context: &mut ctx,
            now: 0.0,
        };
        animator.animate(&mut cx, &from, &[]);
        cx.now = 0.5;
        animator.present(&mut cx);
    }

    assert_eq!(s.graph.presented(a, PropertyKey::Opacity), Some(AnimValue::Scalar(0.5)));
    assert_eq!(
        ctx.existing_proxy(a).unwrap().value(PropertyKey::Opacity),
        Some(AnimValue::Scalar(0.5))
    );
}

#[test]
fn seek_then_resume_plays_the_rest() {
    let (mut s, mut ctx) = scene(vec![tile(
        "a",
        0.0,
        vec![Modifier::Fade, Modifier::Duration(0.4)],
    )]);
    let log = ScheduleLog::new();
    let mut animator = DefaultAnimator::new().with_observer(log.clone());
    let from = animating(&ctx, &animator);
    let mut cx = AnimatorCx {
        host: &mut s.graph,
        context: &mut ctx,
        now: 0.0,
    };
    animator.animate(&mut cx, &from, &[]);
    animator.seek_to(&mut cx, 0.1);
    cx.now = 0.1;

    let left = animator.resume(&mut cx, 0.1, false);
    assert!((left - 0.3).abs() < 1e-12);
    assert_eq!(log.len(), 2);
}

#[test]
fn apply_ignores_unknown_nodes_and_clean_forgets() {
    let (mut s, mut ctx) = scene(vec![tile("a", 0.0, vec![Modifier::Fade])]);
    let log = ScheduleLog::new();
    let mut animator = DefaultAnimator::new().with_observer(log.clone());
    let from = animating(&ctx, &animator);
    let mut cx = AnimatorCx {
        host: &mut s.graph,
        context: &mut ctx,
        now: 0.0,
    };
    animator.animate(&mut cx, &from, &[]);
    let before = log.len();

    let state = TargetState::from_modifiers(&[Modifier::Opacity(0.5)]);
    animator.apply(&mut cx, &state, NodeId(999), 0.0);
    assert_eq!(log.len(), before);
    animator.apply(&mut cx, &state, from[0], 0.0);
    assert_eq!(log.len(), before + 1);

    animator.clean();
    assert!(animator.is_empty());
}
