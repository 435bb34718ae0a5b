use super::*;

fn scalar_track(begin: f64, duration: f64) -> Interpolation {
    Interpolation {
        key: PropertyKey::Opacity,
        from: AnimValue::Scalar(0.0),
        to: AnimValue::Scalar(1.0),
        curve: Curve::Timing(TimingFunction::Linear),
        arc_control: None,
        begin_time: begin,
        duration,
        paused_at: None,
        reversed: false,
    }
}

#[test]
fn holds_from_before_begin_and_to_after_end() {
    let tr = scalar_track(1.0, 2.0);
    assert_eq!(tr.value_at(0.0), AnimValue::Scalar(0.0));
    assert_eq!(tr.value_at(2.0), AnimValue::Scalar(0.5));
    assert_eq!(tr.value_at(5.0), AnimValue::Scalar(1.0));
    assert!(tr.is_finished(3.0));
    assert!(!tr.is_finished(2.9));
}

#[test]
fn paused_track_ignores_clock() {
    let mut tr = scalar_track(0.0, 1.0);
    tr.pause_at(0.25);
    assert_eq!(tr.value_at(100.0), AnimValue::Scalar(0.25));
    assert!(!tr.is_finished(100.0));
}

#[test]
fn zero_duration_jumps() {
    let tr = scalar_track(1.0, 0.0);
    assert_eq!(tr.value_at(0.5), AnimValue::Scalar(0.0));
    assert_eq!(tr.value_at(1.0), AnimValue::Scalar(1.0));
}

#[test]
fn arc_control_requires_motion_on_both_axes() {
    assert!(arc_control_point(Point::new(0.0, 0.0), Point::new(100.0, 0.5), 1.0).is_none());
    assert!(arc_control_point(Point::new(0.0, 0.0), Point::new(0.2, 100.0), 1.0).is_none());
}

#[test]
fn arc_control_intensity_blends_midpoint_and_elbow() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(100.0, 200.0);
    // from.y < to.y so the elbow is (from.x, to.y)
    assert_eq!(arc_control_point(from, to, 1.0), Some(Point::new(0.0, 200.0)));
    assert_eq!(arc_control_point(from, to, 0.0), Some(Point::new(50.0, 100.0)));
    assert_eq!(arc_control_point(from, to, -1.0), Some(Point::new(100.0, 0.0)));
}

#[test]
fn reversed_track_walks_back_to_from() {
    let mut tr = scalar_track(0.0, 1.0);
    tr.pause_at(0.75);
    tr.resume_at(10.0, 0.75, true);

    assert_eq!(tr.value_at(10.0), AnimValue::Scalar(0.75));
    assert_eq!(tr.value_at(10.5), AnimValue::Scalar(0.25));
    assert_eq!(tr.value_at(11.0), AnimValue::Scalar(0.0));
    assert_eq!(tr.end_time(), 10.75);
    assert!(tr.is_finished(10.75));
    assert!(!tr.is_finished(10.7));
}

#[test]
fn arced_track_leaves_straight_line_but_keeps_endpoints() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(100.0, 100.0);
    let tr = Interpolation {
        key: PropertyKey::Position,
        from: AnimValue::Point(from),
        to: AnimValue::Point(to),
        curve: Curve::Timing(TimingFunction::Linear),
        arc_control: arc_control_point(from, to, 1.0),
        begin_time: 0.0,
        duration: 1.0,
        paused_at: None,
        reversed: false,
    };
    assert_eq!(tr.value_at(0.0), AnimValue::Point(from));
    assert_eq!(tr.value_at(1.0), AnimValue::Point(to));
    let mid = tr.value_at(0.5).as_point().unwrap();
    assert!(mid.x < mid.y, "mid={mid:?}");
}

#[test]
fn spring_track_settles_on_target() {
    let spring = Spring::new(250.0, 30.0);
    let tr = Interpolation {
        curve: Curve::Spring(spring),
        duration: spring.settling_duration(),
        ..scalar_track(0.0, 1.0)
    };
    let end = tr.value_at(tr.end_time()).as_scalar().unwrap();
    assert!((end - 1.0).abs() < 1e-9);
}
