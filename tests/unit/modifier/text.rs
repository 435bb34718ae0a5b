use super::*;
use crate::modifier::state::TargetState;

#[test]
fn compiles_to_same_state_as_programmatic_modifiers() {
    let parsed = parse_modifiers("fade translate(0, 150) scale(0.8)").unwrap();
    let from_text = TargetState::from_modifiers(&parsed);
    let built = TargetState::from_modifiers(&[
        Modifier::Fade,
        Modifier::translate(0.0, 150.0),
        Modifier::scale(0.8),
    ]);
    assert_eq!(from_text.opacity, built.opacity);
    assert_eq!(from_text.transform, built.transform);
}

#[test]
fn scale_and_rotate_arities() {
    let s = TargetState::from_modifiers(&parse_modifiers("scale(2)").unwrap());
    let t = s.transform.unwrap();
    assert_eq!((t.cols[0][0], t.cols[1][1], t.cols[2][2]), (2.0, 2.0, 1.0));

    let s = TargetState::from_modifiers(&parse_modifiers("scale(2, 3)").unwrap());
    let t = s.transform.unwrap();
    assert_eq!((t.cols[0][0], t.cols[1][1], t.cols[2][2]), (2.0, 3.0, 1.0));

    let m = parse_modifiers("rotate(1.5)").unwrap();
    assert!(matches!(m[0], Modifier::Rotate { x, y, z } if x == 0.0 && y == 0.0 && z == 1.5));
}

#[test]
fn defaults_for_optional_arguments() {
    let m = parse_modifiers("spring arc cascade opacity").unwrap();
    let s = TargetState::from_modifiers(&m);
    let spring = s.spring.unwrap();
    assert_eq!((spring.stiffness, spring.damping), (250.0, 30.0));
    assert_eq!(s.arc, Some(1.0));
    assert_eq!(s.cascade, Some(CascadeSpec::default()));
    assert_eq!(s.opacity, Some(1.0));
}

#[test]
fn cascade_with_direction_and_flag() {
    let m = parse_modifiers("cascade(0.05, bottomToTop, true)").unwrap();
    let Modifier::Cascade(spec) = &m[0] else {
        panic!("expected cascade");
    };
    assert_eq!(spec.delta, 0.05);
    assert_eq!(spec.direction, CascadeDirection::BottomToTop);
    assert!(spec.delay_matched);

    let m = parse_modifiers("cascade(0.1, radial(50, 60))").unwrap();
    let Modifier::Cascade(spec) = &m[0] else {
        panic!("expected cascade");
    };
    assert_eq!(spec.direction, CascadeDirection::Radial(Point::new(50.0, 60.0)));
}

#[test]
fn timing_function_by_name_or_points() {
    let m = parse_modifiers("timingFunction(deceleration)").unwrap();
    assert!(matches!(m[0], Modifier::TimingFunction(TimingFunction::Deceleration)));
    let m = parse_modifiers("timingFunction(0.1, 0.2, 0.3, 0.4)").unwrap();
    assert!(matches!(
        m[0],
        Modifier::TimingFunction(TimingFunction::CubicBezier { x1, .. }) if x1 == 0.1
    ));
    assert!(parse_modifiers("timingFunction(wobbly)").is_err());
}

#[test]
fn source_nested_and_conditional_forms() {
    let m = parse_modifiers(
        "source(hero) beginWith(shadowOpacity(0.5) shadowRadius(5)) whenMatched(fade)",
    )
    .unwrap();
    let s = TargetState::from_modifiers(&m);
    assert_eq!(s.source.as_deref(), Some("hero"));
    assert_eq!(s.begin_state.as_ref().unwrap().shadow_radius, Some(5.0));
    assert_eq!(s.conditional.len(), 1);
    assert!(matches!(s.conditional[0].condition, Condition::Matched));
}

#[test]
fn strict_rejects_unknown_names_and_lossy_skips_them() {
    let err = parse_modifiers("fade sparkle(3)").unwrap_err();
    assert_eq!(err.offset, 5);

    let m = parse_modifiers_lossy("fade sparkle(3) position(1) delay(0.1)");
    assert_eq!(m.len(), 2);
    assert!(matches!(m[0], Modifier::Fade));
    assert!(matches!(m[1], Modifier::Delay(d) if d == 0.1));
}

#[test]
fn lossy_drops_everything_on_syntax_error() {
    assert!(parse_modifiers_lossy("fade scale(").is_empty());
}

#[test]
fn flags_and_snapshot_strategies() {
    let m = parse_modifiers(
        "useGlobalCoordinateSpace ignoreSubviewModifiers(true) useNoSnapshot forceNonFade useScaleBasedSizeChange masksToBounds(false)",
    )
    .unwrap();
    let s = TargetState::from_modifiers(&m);
    assert_eq!(s.coordinate_space, CoordinateSpace::Global);
    assert_eq!(s.ignore_subtree_modifiers, Some(true));
    assert_eq!(s.snapshot, SnapshotStrategy::NoSnapshot);
    assert!(s.force_non_fade);
    assert!(s.scale_based_size_change);
    assert_eq!(s.masks_to_bounds, Some(false));
}
