//! Elastic hard-sphere rebound.
//!
//! The terminal action for encounters that neither merge nor fragment. The
//! host may supply its own restitution resolver through [`BounceModel`];
//! [`HardSphere`] is the reference implementation.

use bodies::Body;
use serde::{Deserialize, Serialize};

/// Externally-supplied restitution resolver.
pub trait BounceModel {
    /// Updates the velocities of a rebounding pair in place. Masses and
    /// radii are untouched.
    fn bounce(&self, target: &mut Body, projectile: &mut Body);
}

/// Coefficient-of-restitution law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Restitution {
    /// Fixed coefficient in `[0, 1]`.
    Constant(f64),
    /// Velocity-dependent law of Bridges et al. (1984),
    /// `eps = 0.32 (100 v_n)^(-0.234)` with `v_n` in m/s, clamped to
    /// `[0, 1]`. Calibrated for icy ring particles in SI units.
    Bridges,
}

/// Hard-sphere rebound along the line of centers, conserving linear
/// momentum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardSphere {
    pub restitution: Restitution,
}

impl HardSphere {
    pub fn constant(eps: f64) -> Self {
        Self {
            restitution: Restitution::Constant(eps),
        }
    }

    pub fn bridges() -> Self {
        Self {
            restitution: Restitution::Bridges,
        }
    }

    fn coefficient(&self, v_normal: f64) -> f64 {
        match self.restitution {
            Restitution::Constant(eps) => eps,
            Restitution::Bridges => {
                (0.32 * (v_normal.abs() * 100.0).powf(-0.234)).clamp(0.0, 1.0)
            }
        }
    }
}

impl BounceModel for HardSphere {
    fn bounce(&self, target: &mut Body, projectile: &mut Body) {
        let offset = target.position - projectile.position;
        let distance = offset.magnitude();
        if distance == 0.0 {
            return;
        }
        let normal = offset / distance;

        let v_normal = (target.velocity - projectile.velocity).dot(&normal);
        if v_normal >= 0.0 {
            // Already separating
            return;
        }

        let eps = self.coefficient(v_normal);
        let reduced_mass = target.mass * projectile.mass / (target.mass + projectile.mass);
        let impulse = -(1.0 + eps) * reduced_mass * v_normal;

        target.velocity += normal * (impulse / target.mass);
        projectile.velocity -= normal * (impulse / projectile.mass);
    }
}
