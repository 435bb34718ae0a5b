use super::*;

#[test]
fn endpoints_are_fixed_for_every_named_curve() {
    for name in [
        "linear",
        "easeIn",
        "easeOut",
        "easeInOut",
        "standard",
        "deceleration",
        "acceleration",
        "sharp",
        "easeOutBack",
    ] {
        let f = TimingFunction::from_name(name).unwrap();
        assert_eq!(f.apply(0.0), 0.0, "{name}");
        assert_eq!(f.apply(1.0), 1.0, "{name}");
    }
}

#[test]
fn unknown_name_is_none() {
    assert!(TimingFunction::from_name("bouncy").is_none());
}

#[test]
fn symmetric_curve_passes_through_center() {
    let v = TimingFunction::EaseInOut.apply(0.5);
    assert!((v - 0.5).abs() < 1e-6, "v={v}");
}

#[test]
fn deceleration_runs_ahead_and_acceleration_lags() {
    assert!(TimingFunction::Deceleration.apply(0.3) > 0.3);
    assert!(TimingFunction::Acceleration.apply(0.3) < 0.3);
}

#[test]
fn linear_bezier_matches_identity() {
    let f = TimingFunction::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for i in 1..10 {
        let t = f64::from(i) / 10.0;
        assert!((f.apply(t) - t).abs() < 1e-6);
    }
}

#[test]
fn ease_out_back_overshoots() {
    let peak = (1..100)
        .map(|i| TimingFunction::EaseOutBack.apply(f64::from(i) / 100.0))
        .fold(0.0_f64, f64::max);
    assert!(peak > 1.0);
}
