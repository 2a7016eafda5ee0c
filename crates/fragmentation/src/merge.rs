//! Momentum-conserving merger of a projectile into a target.

use bodies::Body;
use nalgebra::Point3;

/// Folds the projectile into the target in place.
///
/// Conserves mass and linear momentum: position and velocity become the
/// mass-weighted averages of the pair, mass becomes the sum. The combined
/// radius is recomputed from the target's own pre-merge density rather
/// than a global constant, so different regions of a simulation can carry
/// different effective densities. The caller discards the projectile.
pub fn merge_into(target: &mut Body, projectile: &Body, time: f64) {
    let inv_mass = 1.0 / (target.mass + projectile.mass);
    let target_density = target.density();

    target.velocity =
        (target.velocity * target.mass + projectile.velocity * projectile.mass) * inv_mass;
    target.position = Point3::from(
        (target.position.coords * target.mass + projectile.position.coords * projectile.mass)
            * inv_mass,
    );

    target.mass += projectile.mass;
    target.rescale_radius(target_density);
    target.last_collision = time;
}
