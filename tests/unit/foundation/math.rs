use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_is_identity() {
    assert!(Transform3D::default().is_identity());
}

#[test]
fn translation_moves_origin() {
    let t = Transform3D::IDENTITY.translated(10.0, -4.0, 0.0);
    let p = t.apply_point(Point::ZERO);
    assert!(approx(p.x, 10.0));
    assert!(approx(p.y, -4.0));
}

#[test]
fn scale_then_translate_accumulates_in_local_space() {
    // translate is applied in the already scaled space
    let t = Transform3D::IDENTITY.scaled(2.0, 2.0, 1.0).translated(5.0, 0.0, 0.0);
    let p = t.apply_point(Point::ZERO);
    assert!(approx(p.x, 10.0));

    let s = t.apply_size(Size::new(10.0, 20.0));
    assert!(approx(s.width, 20.0));
    assert!(approx(s.height, 40.0));
}

#[test]
fn rotation_z_quarter_turn() {
    let t = Transform3D::from_rotation_z(std::f64::consts::FRAC_PI_2);
    let p = t.apply_point(Point::new(1.0, 0.0));
    assert!(approx(p.x, 0.0));
    assert!(approx(p.y, 1.0));
}

#[test]
fn perspective_sets_m34() {
    let t = Transform3D::IDENTITY.with_perspective(500.0);
    assert!(approx(t.m34(), -1.0 / 500.0));
    assert!(!t.is_identity());
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Transform3D::IDENTITY;
    let b = Transform3D::from_scale(3.0, 3.0, 1.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    assert!(approx(a.lerp(&b, 0.5).cols[0][0], 2.0));
}

#[test]
fn identity_is_neutral_for_mul() {
    let t = Transform3D::from_rotation_x(0.3).translated(1.0, 2.0, 3.0);
    assert_eq!(Transform3D::IDENTITY * t, t);
    assert_eq!(t * Transform3D::IDENTITY, t);
}
