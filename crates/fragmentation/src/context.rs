//! Pairwise encounter dynamics.
//!
//! [`CollisionContext::build`] derives the full physical context of a
//! two-body encounter from first principles: impact geometry, gravitational
//! focusing, reduced mass, critical disruption energy, mutual escape
//! velocity, and the provisional largest-remnant mass that the classifier
//! branches on.

use bodies::{radius_from_mass, Body};
use nalgebra::Vector3;

use crate::config::ResolverConfig;
use crate::error::{Error, Result};

/// Derived physical context of one collision event.
///
/// Built once per event from the target (heavier) and projectile (lighter)
/// bodies, consumed by the classifier and the outcome operators, then
/// discarded.
#[derive(Debug, Clone)]
pub struct CollisionContext {
    pub m_target: f64,
    pub m_projectile: f64,
    pub m_total: f64,
    pub r_target: f64,
    pub r_projectile: f64,
    pub r_total: f64,
    /// Relative position, target minus projectile.
    pub dx: Vector3<f64>,
    /// Relative velocity, target minus projectile.
    pub dv: Vector3<f64>,
    /// Separation of centers at detection.
    pub xrel: f64,
    /// Relative speed at detection.
    pub vrel: f64,
    /// Impact speed corrected for mutual gravitational focusing.
    pub vi: f64,
    /// Impact parameter.
    pub b: f64,
    /// Overlap length of the two spheres along the encounter.
    pub l: f64,
    /// Fraction of the projectile mass taking part in the impact.
    pub alpha: f64,
    /// Reduced mass of the pair.
    pub mu: f64,
    /// Specific impact energy.
    pub q: f64,
    /// Critical disruption energy.
    pub q_star: f64,
    /// Mutual escape velocity.
    pub v_esc: f64,
    /// Assumed constant bulk density (configuration).
    pub rho1: f64,
    /// Disruption-scaling constant (configuration).
    pub cstar: f64,
    /// Largest-remnant mass, clamped into
    /// `[min_fragment_mass, m_total]` as soon as it is computed.
    pub mlr: f64,
    /// Second-largest-remnant mass, set by the hit-and-run sub-resolver.
    pub mslr: Option<f64>,
    /// Radius of the circle fragments are placed on.
    pub separation_distance: f64,
}

impl CollisionContext {
    /// Derives the encounter context for an ordered pair.
    ///
    /// The caller must pass the heavier body as `target`. Fails with
    /// [`Error::DegenerateGeometry`] when the impact parameter is not a
    /// real number (typically coincident centers) — a fatal condition.
    pub fn build(
        target: &Body,
        projectile: &Body,
        gravity: f64,
        config: &ResolverConfig,
    ) -> Result<Self> {
        let m_t = target.mass;
        let m_p = projectile.mass;
        let m_total = m_t + m_p;
        let r_t = target.radius;
        let r_p = projectile.radius;
        let r_total = r_t + r_p;

        let dx = target.position - projectile.position;
        let dv = target.velocity - projectile.velocity;
        let xrel = dx.magnitude();
        let v2rel = dv.magnitude_squared();

        // Specific angular momentum of the encounter
        let h2 = dx.cross(&dv).magnitude_squared();

        // Impact speed with gravitational focusing; when the pair is
        // detected past contact the focusing term goes negative and the
        // plain relative speed is used instead.
        let focusing = 2.0 * gravity * m_total * (1.0 / r_total - 1.0 / xrel);
        let v2imp = if focusing < 0.0 {
            v2rel
        } else {
            v2rel + focusing
        };
        let vi = v2imp.sqrt();

        let b = (h2 / v2imp).sqrt();
        if !b.is_finite() {
            return Err(Error::DegenerateGeometry);
        }

        // Overlap length, capped at the projectile diameter
        let l = (r_total - b).min(2.0 * r_p);
        let alpha = ((l.powi(2) * (3.0 * r_p - l)) / (4.0 * r_p.powi(3))).min(1.0);

        let mu = m_t * m_p / m_total;
        let q = 0.5 * v2imp * m_t * m_p / m_total.powi(2);
        let v_esc = (2.0 * gravity * m_total / r_total).sqrt();

        let alpha_mu = (alpha * m_t * m_p) / (alpha * m_p + m_t);
        let gamma = m_p / m_t;
        let rho1 = config.bulk_density;
        let cstar = config.cstar;

        // Critical disruption energy, Leinhardt & Stewart (2012) scaling
        let rc1 = radius_from_mass(m_total, rho1);
        let q0 = 0.8 * cstar * std::f64::consts::PI * rho1 * gravity * rc1.powi(2);
        let q_star = if alpha == 0.0 {
            // No interacting mass: disruption is impossible
            f64::INFINITY
        } else if b == 0.0 && m_p == m_t {
            // Head-on equal-mass impact reduces to the reference energy
            q0
        } else {
            (mu / alpha_mu).powf(1.5) * ((1.0 + gamma).powi(2) / (4.0 * gamma)) * q0
        };

        // Largest remnant: linear law below 1.8 Q*, power-law tail above
        let q_ratio = q / q_star;
        let mlr_raw = if q_ratio < 1.8 {
            m_total * (1.0 - 0.5 * q_ratio)
        } else {
            0.1 * m_total * (q_ratio / 1.8).powf(-1.5)
        };
        let mlr = mlr_raw.max(config.min_fragment_mass).min(m_total);

        Ok(Self {
            m_target: m_t,
            m_projectile: m_p,
            m_total,
            r_target: r_t,
            r_projectile: r_p,
            r_total,
            dx,
            dv,
            xrel,
            vrel: v2rel.sqrt(),
            vi,
            b,
            l,
            alpha,
            mu,
            q,
            q_star,
            v_esc,
            rho1,
            cstar,
            mlr,
            mslr: None,
            separation_distance: 4.0 * r_total,
        })
    }

    /// Ratio of impact energy to critical disruption energy.
    pub fn q_ratio(&self) -> f64 {
        self.q / self.q_star
    }
}
