use super::*;
use crate::foundation::core::{Point, Rect};
use crate::modifier::state::DurationSpec;
use crate::preprocess::run_stages_for_test;
use crate::scene::dsl::{NodeBuilder, Scene, SceneBuilder};
use crate::session::opts::TransitionOpts;

fn root() -> NodeBuilder {
    NodeBuilder::new(Rect::new(0.0, 0.0, 300.0, 200.0))
}

fn scene(source: NodeBuilder) -> Scene {
    SceneBuilder::new(Size::new(300.0, 200.0))
        .source(source)
        .destination(root())
        .build()
        .unwrap()
}

fn run(s: &Scene, opts: &TransitionOpts) -> TransitionContext {
    run_stages_for_test(&mut [Box::new(DefaultAnimationPreset)], s, opts)
}

fn offset(state: &TargetState) -> Vec2 {
    state
        .transform
        .map(|t| t.apply_point(Point::ZERO).to_vec2())
        .unwrap_or(Vec2::ZERO)
}

#[test]
fn auto_outside_containers_fades_the_destination() {
    let s = scene(root());
    let ctx = run(&s, &TransitionOpts::default());
    let to = ctx.state(s.destination).unwrap();
    let from = ctx.state(s.source).unwrap();

    assert_eq!(to.opacity, Some(0.0));
    assert_eq!(to.duration, Some(DurationSpec::MatchLongest));
    assert_eq!(from.opacity, None);
    assert_eq!(from.duration, Some(DurationSpec::MatchLongest));
    assert_eq!(to.timing_function, Some(TimingFunction::Standard));
}

#[test]
fn translucent_source_also_fades() {
    let s = scene(root().background(Rgba::WHITE.with_alpha(0.5)));
    let ctx = run(&s, &TransitionOpts::default());

    assert_eq!(ctx.state(s.source).unwrap().opacity, Some(0.0));
}

#[test]
fn navigation_pushes_when_presenting() {
    let s = scene(root());
    let opts = TransitionOpts {
        in_navigation: true,
        ..TransitionOpts::default()
    };
    let ctx = run(&s, &opts);
    let to = ctx.state(s.destination).unwrap();
    let from = ctx.state(s.source).unwrap();

    assert!(!ctx.insert_to_first());
    assert_eq!(offset(to), Vec2::new(300.0, 0.0));
    assert_eq!(offset(from), Vec2::new(-100.0, 0.0));
    assert_eq!(from.overlay.map(|o| o.opacity), Some(0.1));
    assert_eq!(to.duration, Some(DurationSpec::Fixed(0.35)));
    assert_eq!(to.timing_function, Some(TimingFunction::Deceleration));
    let begin = to.begin_state.as_deref().unwrap();
    assert_eq!(begin.shadow_opacity, Some(0.5));
    assert_eq!(to.shadow_opacity, Some(0.0));
}

#[test]
fn navigation_pulls_when_dismissing() {
    let s = scene(root());
    let opts = TransitionOpts {
        in_navigation: true,
        presenting: false,
        ..TransitionOpts::default()
    };
    let ctx = run(&s, &opts);

    assert!(ctx.insert_to_first());
    assert_eq!(offset(ctx.state(s.source).unwrap()), Vec2::new(300.0, 0.0));
    assert_eq!(offset(ctx.state(s.destination).unwrap()), Vec2::new(-100.0, 0.0));
}

#[test]
fn tabs_slide_both_roots() {
    let s = scene(root());
    let opts = TransitionOpts {
        in_tab: true,
        ..TransitionOpts::default()
    };
    let ctx = run(&s, &opts);

    assert_eq!(offset(ctx.state(s.source).unwrap()), Vec2::new(-300.0, 0.0));
    assert_eq!(offset(ctx.state(s.destination).unwrap()), Vec2::new(300.0, 0.0));
}

#[test]
fn claimed_roots_get_no_preset() {
    let s = scene(root().modifier(Modifier::scale(0.5)));
    let ctx = run(&s, &TransitionOpts::default());

    assert!(ctx.state(s.destination).is_none());
    assert_eq!(ctx.state(s.source).unwrap().duration, None);
}

#[test]
fn none_leaves_states_alone() {
    let s = scene(root());
    let opts = TransitionOpts {
        default_animation: DefaultAnimation::None,
        ..TransitionOpts::default()
    };
    let ctx = run(&s, &opts);

    assert!(ctx.state(s.source).is_none());
    assert!(ctx.state(s.destination).is_none());
}

#[test]
fn select_by_and_auto_reverse_resolve_per_direction() {
    let a: DefaultAnimation = "selectBy(push(left), fade)".parse().unwrap();
    assert_eq!(a.select(true), DefaultAnimation::Push(Direction::Left));
    assert_eq!(a.select(false), DefaultAnimation::Fade);

    let r: DefaultAnimation = "autoReverse(cover(up))".parse().unwrap();
    assert_eq!(r.select(true), DefaultAnimation::Cover(Direction::Up));
    assert_eq!(r.select(false), DefaultAnimation::Uncover(Direction::Down));
    assert_eq!(r.to_string(), "autoReverse(cover(up))");
}

#[test]
fn bad_preset_text_is_rejected() {
    assert!("push".parse::<DefaultAnimation>().is_err());
    assert!("push(sideways)".parse::<DefaultAnimation>().is_err());
    assert!("wobble".parse::<DefaultAnimation>().is_err());
    assert!("fade zoom".parse::<DefaultAnimation>().is_err());
    assert!("".parse::<DefaultAnimation>().is_err());
}

#[test]
fn shift_places_roots_outside_the_container() {
    let size = Size::new(300.0, 200.0);
    assert_eq!(shift(Direction::Left, true, size), Vec2::new(300.0, 0.0));
    assert_eq!(shift(Direction::Left, false, size), Vec2::new(-300.0, 0.0));
    assert_eq!(shift(Direction::Right, true, size), Vec2::new(-300.0, 0.0));
    assert_eq!(shift(Direction::Up, true, size), Vec2::new(0.0, 200.0));
    assert_eq!(shift(Direction::Down, false, size), Vec2::new(0.0, 200.0));
}

#[test]
fn direction_strategy_defaults() {
    let s = DirectionStrategy::ForceLeftToRight;
    assert_eq!(s.default_direction(true), Direction::Left);
    assert_eq!(s.default_direction(false), Direction::Right);
    let s = DirectionStrategy::ForceRightToLeft;
    assert_eq!(s.default_direction(true), Direction::Right);
}
