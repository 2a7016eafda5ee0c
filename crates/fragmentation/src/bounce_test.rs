use approx::assert_relative_eq;
use bodies::{Body, BodyId};
use nalgebra::{Point3, Vector3};

use crate::bounce::{BounceModel, HardSphere};

fn pair(v_target: f64, v_projectile: f64) -> (Body, Body) {
    let target = Body::new(
        BodyId(0),
        1.0,
        0.5,
        Point3::new(1.0, 0.0, 0.0),
        Vector3::new(v_target, 0.0, 0.0),
    );
    let projectile = Body::new(
        BodyId(1),
        1.0,
        0.5,
        Point3::origin(),
        Vector3::new(v_projectile, 0.0, 0.0),
    );
    (target, projectile)
}

#[test]
fn test_elastic_head_on_swaps_velocities() {
    let (mut target, mut projectile) = pair(-1.0, 1.0);

    HardSphere::constant(1.0).bounce(&mut target, &mut projectile);

    assert_relative_eq!(target.velocity.x, 1.0, max_relative = 1e-12);
    assert_relative_eq!(projectile.velocity.x, -1.0, max_relative = 1e-12);
}

#[test]
fn test_momentum_conserved_for_any_coefficient() {
    let (mut target, mut projectile) = pair(-2.0, 3.0);
    let p_before = target.momentum() + projectile.momentum();

    HardSphere::constant(0.37).bounce(&mut target, &mut projectile);

    let p_after = target.momentum() + projectile.momentum();
    for k in 0..3 {
        assert_relative_eq!(p_after[k], p_before[k], epsilon = 1e-12);
    }
}

#[test]
fn test_fully_inelastic_kills_normal_approach() {
    let (mut target, mut projectile) = pair(-1.0, 1.0);

    HardSphere::constant(0.0).bounce(&mut target, &mut projectile);

    let closing = (target.velocity - projectile.velocity).x;
    assert_relative_eq!(closing, 0.0, epsilon = 1e-12);
}

#[test]
fn test_separating_pair_untouched() {
    let (mut target, mut projectile) = pair(1.0, -1.0);

    HardSphere::bridges().bounce(&mut target, &mut projectile);

    assert_relative_eq!(target.velocity.x, 1.0, max_relative = 1e-12);
    assert_relative_eq!(projectile.velocity.x, -1.0, max_relative = 1e-12);
}

#[test]
fn test_bridges_law_dissipates_energy() {
    let (mut target, mut projectile) = pair(-1.0, 1.0);
    let energy_before = target.kinetic_energy() + projectile.kinetic_energy();

    HardSphere::bridges().bounce(&mut target, &mut projectile);

    let energy_after = target.kinetic_energy() + projectile.kinetic_energy();
    assert!(energy_after < energy_before);
    // Still rebounding, not sticking
    assert!((target.velocity - projectile.velocity).x > 0.0);
}

#[test]
fn test_masses_and_radii_untouched() {
    let (mut target, mut projectile) = pair(-1.0, 1.0);

    HardSphere::bridges().bounce(&mut target, &mut projectile);

    assert_eq!(target.mass, 1.0);
    assert_eq!(projectile.mass, 1.0);
    assert_eq!(target.radius, 0.5);
    assert_eq!(projectile.radius, 0.5);
}
