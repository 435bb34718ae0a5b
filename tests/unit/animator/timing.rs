use super::*;

fn at(x: f64, y: f64, side: f64) -> Geometry {
    Geometry {
        position: Point::new(x, y),
        size: Size::new(side, side),
        transform: Transform3D::IDENTITY,
    }
}

#[test]
fn resting_geometry_gets_the_minimum() {
    assert_eq!(optimized_duration(&at(10.0, 10.0, 20.0), &at(10.0, 10.0, 20.0)), 0.208);
}

#[test]
fn duration_grows_with_travel_and_resize() {
    let d = optimized_duration(&at(0.0, 0.0, 100.0), &at(300.0, 300.0, 50.0));
    let travel = 300.0f64.hypot(300.0) + 50.0f64.hypot(50.0);
    assert!((d - (0.208 + travel / 3000.0)).abs() < 1e-12);
}

#[test]
fn travel_is_capped() {
    let d = optimized_duration(&at(0.0, 0.0, 10.0), &at(5000.0, 0.0, 10.0));
    assert!((d - (0.208 + 500.0 / 3000.0)).abs() < 1e-12);
}

#[test]
fn transforms_count_as_travel() {
    let moved = Geometry {
        transform: Transform3D::from_translation(30.0, 40.0, 0.0),
        ..at(0.0, 0.0, 10.0)
    };
    assert_eq!(moved.real_position(), Point::new(30.0, 40.0));
    let d = optimized_duration(&at(0.0, 0.0, 10.0), &moved);
    assert!((d - (0.208 + 50.0 / 3000.0)).abs() < 1e-12);

    let grown = Geometry {
        transform: Transform3D::from_scale(2.0, 2.0, 1.0),
        ..at(0.0, 0.0, 10.0)
    };
    assert_eq!(grown.real_size(), Size::new(20.0, 20.0));
}

#[test]
fn timing_depends_on_leaving_or_entering_the_bounds() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inside = Point::new(50.0, 50.0);
    let outside = Point::new(150.0, 50.0);

    assert_eq!(default_timing(inside, outside, bounds), TimingFunction::Acceleration);
    assert_eq!(default_timing(outside, inside, bounds), TimingFunction::Deceleration);
    assert_eq!(default_timing(inside, inside, bounds), TimingFunction::Standard);
    assert_eq!(default_timing(outside, outside, bounds), TimingFunction::Acceleration);
}
