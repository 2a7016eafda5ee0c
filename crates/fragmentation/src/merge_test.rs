use approx::assert_relative_eq;
use bodies::{radius_from_mass, Body, BodyId};
use nalgebra::{Point3, Vector3};

use crate::merge::merge_into;

fn body(id: u64, mass: f64, density: f64, position: Point3<f64>, velocity: Vector3<f64>) -> Body {
    Body::new(
        BodyId(id),
        mass,
        radius_from_mass(mass, density),
        position,
        velocity,
    )
}

#[test]
fn test_mass_conservation() {
    let mut target = body(0, 2.0, 1.0, Point3::origin(), Vector3::new(0.0, 1.0, 0.0));
    let projectile = body(1, 1.0, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());

    merge_into(&mut target, &projectile, 5.0);

    assert_relative_eq!(target.mass, 3.0, max_relative = 1e-12);
}

#[test]
fn test_momentum_conservation() {
    let mut target = body(0, 2.0, 1.0, Point3::origin(), Vector3::new(0.5, 1.0, -0.25));
    let projectile = body(
        1,
        1.0,
        1.0,
        Point3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 2.0, 0.5),
    );

    let p_before = target.momentum() + projectile.momentum();
    merge_into(&mut target, &projectile, 5.0);
    let p_after = target.momentum();

    assert_relative_eq!(p_after.x, p_before.x, max_relative = 1e-12);
    assert_relative_eq!(p_after.y, p_before.y, max_relative = 1e-12);
    assert_relative_eq!(p_after.z, p_before.z, max_relative = 1e-12);
}

#[test]
fn test_position_is_center_of_mass() {
    let mut target = body(0, 1.0, 1.0, Point3::origin(), Vector3::zeros());
    let projectile = body(1, 1.0, 1.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());

    merge_into(&mut target, &projectile, 0.0);

    assert_relative_eq!(target.position.x, 1.0, max_relative = 1e-12);
    assert_relative_eq!(target.position.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_radius_from_combined_mass_at_target_density() {
    // Two unit-density unit-mass spheres: the merged body keeps density 1,
    // so its radius is (3·2 / 4π)^(1/3)
    let mut target = body(0, 1.0, 1.0, Point3::origin(), Vector3::zeros());
    let projectile = body(1, 1.0, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());

    merge_into(&mut target, &projectile, 0.0);

    let expected = (3.0 * 2.0 / (4.0 * std::f64::consts::PI)).powf(1.0 / 3.0);
    assert_relative_eq!(target.radius, expected, max_relative = 1e-12);
}

#[test]
fn test_target_density_governs_even_when_projectile_differs() {
    // The projectile is much fluffier; the merged radius still follows the
    // target's own density
    let mut target = body(0, 4.0, 2.0, Point3::origin(), Vector3::zeros());
    let projectile = body(1, 1.0, 0.1, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());

    merge_into(&mut target, &projectile, 0.0);

    assert_relative_eq!(
        target.radius,
        radius_from_mass(5.0, 2.0),
        max_relative = 1e-10
    );
}

#[test]
fn test_collision_time_recorded() {
    let mut target = body(0, 2.0, 1.0, Point3::origin(), Vector3::zeros());
    let projectile = body(1, 1.0, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());

    merge_into(&mut target, &projectile, 7.25);

    assert_eq!(target.last_collision, 7.25);
}
