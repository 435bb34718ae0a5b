use super::*;

#[test]
fn empty_state_is_not_animatable() {
    let s = TargetState::default();
    assert!(!s.can_animate());
    assert!(s.display_shadow);
    assert_eq!(s.delay, 0.0);
}

#[test]
fn timing_only_state_is_not_animatable() {
    let s = TargetState::from_modifiers(&[
        Modifier::Duration(1.0),
        Modifier::Delay(0.2),
        Modifier::TimingFunction(TimingFunction::Sharp),
    ]);
    assert!(!s.can_animate());
}

#[test]
fn force_animate_or_any_property_enables_animation() {
    assert!(TargetState::from_modifiers(&[Modifier::ForceAnimate]).can_animate());
    assert!(TargetState::from_modifiers(&[Modifier::BorderWidth(2.0)]).can_animate());
    assert!(
        TargetState::from_modifiers(&[Modifier::overlay(Rgba::BLACK, 0.1)]).can_animate()
    );
}

#[test]
fn cascade_defaults() {
    let c = CascadeSpec::default();
    assert_eq!(c.delta, 0.02);
    assert_eq!(c.direction, CascadeDirection::TopToBottom);
    assert!(!c.delay_matched);
    assert_eq!(
        CascadeDirection::from_name("rightToLeft"),
        Some(CascadeDirection::RightToLeft)
    );
    assert!(CascadeDirection::from_name("diagonal").is_none());
}

#[test]
fn serializes_only_set_fields() {
    let s = TargetState::from_modifiers(&[Modifier::Fade]);
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["opacity"], serde_json::json!(0.0));
    assert!(v.get("position").is_none());
}
