use approx::assert_relative_eq;
use bodies::{radius_from_mass, Body, BodyId};
use nalgebra::{Point3, Vector3};

use crate::config::ResolverConfig;
use crate::context::CollisionContext;
use crate::error::Error;

fn body(id: u64, mass: f64, position: Point3<f64>, velocity: Vector3<f64>) -> Body {
    // Bodies of unit bulk density
    Body::new(BodyId(id), mass, radius_from_mass(mass, 1.0), position, velocity)
}

#[test]
fn test_head_on_equal_mass_uses_reference_energy() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    // Overlapping, approaching along the line of centers: b = 0
    let projectile = body(1, 1.0, Point3::new(1.8 * r, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert_eq!(ctx.b, 0.0);
    let rc1 = radius_from_mass(2.0, 1.0);
    let q0 = 0.8 * config.cstar * std::f64::consts::PI * 1.0 * 1.0 * rc1.powi(2);
    assert_relative_eq!(ctx.q_star, q0, max_relative = 1e-12);
}

#[test]
fn test_focusing_ignored_past_contact() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    // Centers already closer than the touching distance
    let projectile = body(1, 1.0, Point3::new(1.5 * r, 0.0, 0.0), Vector3::new(-3.0, 0.0, 0.0));

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert_relative_eq!(ctx.vi, ctx.vrel, max_relative = 1e-12);
}

#[test]
fn test_focusing_raises_impact_speed_before_contact() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    let projectile = body(1, 1.0, Point3::new(3.0 * r, 0.0, 0.0), Vector3::new(-3.0, 0.0, 0.0));

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    let r_total = 2.0 * r;
    let expected =
        (9.0 + 2.0 * 1.0 * 2.0 * (1.0 / r_total - 1.0 / (3.0 * r))).sqrt();
    assert_relative_eq!(ctx.vi, expected, max_relative = 1e-12);
    assert!(ctx.vi > ctx.vrel);
}

#[test]
fn test_impact_parameter_recovered_from_offset() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    let b0 = 0.5 * r;
    // Overlapping so that gravitational focusing is switched off
    let projectile = body(
        1,
        1.0,
        Point3::new(-r, -b0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
    );

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert_relative_eq!(ctx.b, b0, max_relative = 1e-12);
}

#[test]
fn test_coincident_centers_are_fatal() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let projectile = body(1, 1.0, Point3::origin(), Vector3::zeros());

    let err = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap_err();
    assert!(matches!(err, Error::DegenerateGeometry));
}

#[test]
fn test_mlr_clamped_to_min_fragment_mass() {
    let config = ResolverConfig::cgs(0.05);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    // Violent head-on impact: the raw largest-remnant mass collapses to
    // effectively zero and must be lifted to one minimum fragment mass
    let projectile = body(
        1,
        1.0,
        Point3::new(1.8 * r, 0.0, 0.0),
        Vector3::new(-1e6, 0.0, 0.0),
    );

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert_relative_eq!(ctx.mlr, config.min_fragment_mass, max_relative = 1e-12);
}

#[test]
fn test_mlr_never_exceeds_total_mass() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    let projectile = body(
        1,
        0.5,
        Point3::new(1.6 * r, 0.0, 0.0),
        Vector3::new(-1e-4, 0.0, 0.0),
    );

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert!(ctx.mlr <= ctx.m_total);
    assert!(ctx.mlr >= config.min_fragment_mass);
}

#[test]
fn test_zero_interacting_fraction_forbids_disruption() {
    let config = ResolverConfig::cgs(1e-6);
    // Zero gravity keeps the impact speed equal to the relative speed, so
    // the impact parameter equals the geometric offset exactly
    let target = body(0, 1.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    let b0 = 2.0 * r; // grazing exactly at the summed radii
    let projectile = body(
        1,
        1.0,
        Point3::new(0.0, -b0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
    );

    let ctx = CollisionContext::build(&target, &projectile, 0.0, &config).unwrap();

    assert_eq!(ctx.alpha, 0.0);
    assert!(ctx.q_star.is_infinite());
    // No disruption possible: the largest remnant is the whole pair
    assert_relative_eq!(ctx.mlr, ctx.m_total, max_relative = 1e-12);
}

#[test]
fn test_separation_distance_is_four_summed_radii() {
    let config = ResolverConfig::cgs(1e-6);
    let target = body(0, 2.0, Point3::origin(), Vector3::zeros());
    let r = target.radius;
    let projectile = body(
        1,
        1.0,
        Point3::new(1.5 * r, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
    );

    let ctx = CollisionContext::build(&target, &projectile, 1.0, &config).unwrap();

    assert_relative_eq!(
        ctx.separation_distance,
        4.0 * (target.radius + projectile.radius),
        max_relative = 1e-12
    );
}
