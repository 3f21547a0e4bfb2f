use super::{
    modular_arithmetics::{approach, fmod_f32, wrap_degrees},
    vec3d::Vec3D,
};

#[test]
fn test_wrap_degrees_range() {
    for angle in [-720.5, -360.0, -0.0001, 0.0, 12.5, 359.999, 360.0, 725.0] {
        let wrapped = wrap_degrees(angle);
        assert!((0.0..360.0).contains(&wrapped), "{angle} wrapped to {wrapped}");
    }
    assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
    assert!((wrap_degrees(450.0) - 90.0).abs() < 1e-4);
}

#[test]
fn test_fmod_sign() {
    assert!((fmod_f32(-1.0, 4.0) - 3.0).abs() < f32::EPSILON);
    assert!((fmod_f32(5.0, 4.0) - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_approach() {
    assert!((approach(0.0, 10.0, 0.2) - 2.0).abs() < f32::EPSILON);
    assert!((approach(10.0, 10.0, 0.5) - 10.0).abs() < f32::EPSILON);
}

#[test]
fn test_distances() {
    let a = Vec3D::new(0.0f32, 0.0, 0.0);
    let b = Vec3D::new(3.0f32, 12.0, 4.0);
    assert!((a.planar_distance(&b) - 5.0).abs() < 1e-5);
    assert!((a.euclid_distance(&b) - 13.0).abs() < 1e-5);
}

#[test]
fn test_wrap_and_clamp_coordinates() {
    assert!((Vec3D::<f32>::wrap_coordinate(1001.0, 1000.0) + 999.0).abs() < 1e-3);
    assert!((Vec3D::<f32>::wrap_coordinate(-1001.0, 1000.0) - 999.0).abs() < 1e-3);
    assert!((Vec3D::<f32>::wrap_coordinate(10.0, 1000.0) - 10.0).abs() < 1e-3);
    let clamped = Vec3D::new(1500.0f32, 7.0, -1200.0).clamp_planar(1000.0);
    assert_eq!(clamped, Vec3D::new(1000.0, 7.0, -1000.0));
}

#[test]
fn test_wrap_planar_keeps_height() {
    let wrapped = Vec3D::new(1003.0f32, 12.0, -1001.0).wrap_planar(1000.0);
    assert!((wrapped.x() + 997.0).abs() < 1e-3, "{wrapped}");
    assert!((wrapped.z() - 999.0).abs() < 1e-3, "{wrapped}");
    assert_eq!(wrapped.y(), 12.0);
    assert_eq!(Vec3D::new(-1000.0f32, 0.0, 0.0).wrap_planar(1000.0).x(), -1000.0);
}
