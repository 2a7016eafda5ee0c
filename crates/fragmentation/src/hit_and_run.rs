//! Grazing-encounter sub-resolver.
//!
//! Invoked when the impact parameter reaches the target radius. Only part
//! of the projectile intersects the target, so the critical disruption
//! energy is recomputed for the interacting fraction (Leinhardt & Stewart
//! 2012, Eqs. 46–47; Chambers 2013, Eqs. 11–13) and the outcome is decided
//! against an empirical critical velocity.

use bodies::{BodyId, ParticleStore};
use std::f64::consts::PI;

use crate::bounce::BounceModel;
use crate::config::{GrazeCoefficients, ResolverConfig};
use crate::context::CollisionContext;
use crate::error::{Error, Result};
use crate::merge::merge_into;
use crate::outcome::OutcomeKind;
use crate::synthesis::{add_fragments, FragmentCounter, SynthesisReport};

/// Critical velocity separating graze-and-merge from hit-and-run, as a
/// function of mass asymmetry and normalized impact parameter.
pub fn critical_velocity(ctx: &CollisionContext, coeffs: &GrazeCoefficients) -> f64 {
    let zeta = ((ctx.m_target - ctx.m_projectile) / ctx.m_total).powi(2);
    let fac = (1.0 - ctx.b / ctx.r_total).powf(2.5);
    ctx.v_esc * (coeffs.c1 * zeta * fac + coeffs.c2 * zeta + coeffs.c3 * fac + coeffs.c4)
}

/// Resolves a grazing encounter.
///
/// Terminal states: graze-and-merge (below the critical velocity), grazing
/// partial erosion, elastic bounce (not enough residual mass for any
/// fragment), or hit-and-run with a second-largest remnant.
pub fn resolve_grazing<S: ParticleStore + ?Sized>(
    store: &mut S,
    target_id: BodyId,
    projectile_id: BodyId,
    ctx: &mut CollisionContext,
    config: &ResolverConfig,
    counter: &mut FragmentCounter,
    bounce: &dyn BounceModel,
) -> Result<(OutcomeKind, SynthesisReport)> {
    let m_t = ctx.m_target;
    let m_p = ctx.m_projectile;
    let r_t = ctx.r_target;
    let r_p = ctx.r_projectile;
    let time = store.time();

    if ctx.vi <= critical_velocity(ctx, &config.graze) {
        let projectile = *store
            .body(projectile_id)
            .ok_or(Error::BodyNotFound(projectile_id))?;
        let target = store
            .body_mut(target_id)
            .ok_or(Error::BodyNotFound(target_id))?;
        merge_into(target, &projectile, time);
        return Ok((OutcomeKind::GrazeAndMerge, SynthesisReport::default()));
    }

    // Critical energy restricted to the interacting fraction of the pair
    let phi = 2.0 * ((ctx.l - r_p) / r_p).clamp(-1.0, 1.0).acos();
    let a_interact = r_p.powi(2) * (PI - (phi - phi.sin()) / 2.0);
    let l_interact = 2.0 * (r_t.powi(2) - (r_t - ctx.l / 2.0).powi(2)).max(0.0).sqrt();
    let beta = a_interact * l_interact / m_t;

    let rc1 = (3.0 / (4.0 * PI * ctx.rho1) * (beta * m_t + m_p)).powf(1.0 / 3.0);
    let q0 = 0.8 * ctx.cstar * PI * ctx.rho1 * store.gravity() * rc1.powi(2);
    let gamma = beta * m_t / m_p;
    let q_star = (1.0 + gamma).powi(2) / (4.0 * gamma) * q0;
    let mu = beta * m_t * m_p / (beta * m_t + m_p);
    let q = 0.5 * mu * ctx.vi.powi(2) / (beta * m_t + m_p);

    // ctx.mlr is already clamped to at least one minimum fragment mass
    if ctx.mlr < m_t {
        if ctx.m_total - ctx.mlr <= config.min_fragment_mass {
            // Not enough mass for even one fragment
            apply_bounce(store, target_id, projectile_id, bounce, time)?;
            return Ok((OutcomeKind::ElasticBounce, SynthesisReport::default()));
        }
        let report = add_fragments(store, target_id, projectile_id, ctx, config, counter)?;
        return Ok((OutcomeKind::GrazingPartialErosion, report));
    }

    // Target survives intact or grows; the projectile's fate hinges on its
    // residual mass after accretion
    let mlr_dag_raw = if q < 1.8 * q_star {
        (beta * m_t + m_p) * (1.0 - q / (2.0 * q_star))
    } else {
        (beta * m_t + m_p) / 10.0 * (q / (1.8 * q_star)).powf(-1.5)
    };
    let mlr_dag = mlr_dag_raw.max(config.min_fragment_mass);

    let projectile_mass_accreted = ctx.mlr - m_t;
    let new_projectile_mass = m_p - projectile_mass_accreted;

    if new_projectile_mass - mlr_dag < config.min_fragment_mass {
        apply_bounce(store, target_id, projectile_id, bounce, time)?;
        return Ok((OutcomeKind::ElasticBounce, SynthesisReport::default()));
    }

    ctx.mslr = Some(mlr_dag);
    let report = add_fragments(store, target_id, projectile_id, ctx, config, counter)?;
    Ok((OutcomeKind::HitAndRun, report))
}

/// Runs the external restitution model on the pair and stamps both bodies
/// so the same-timestep guard catches a re-reported event.
fn apply_bounce<S: ParticleStore + ?Sized>(
    store: &mut S,
    target_id: BodyId,
    projectile_id: BodyId,
    bounce: &dyn BounceModel,
    time: f64,
) -> Result<()> {
    let mut target = *store.body(target_id).ok_or(Error::BodyNotFound(target_id))?;
    let mut projectile = *store
        .body(projectile_id)
        .ok_or(Error::BodyNotFound(projectile_id))?;

    bounce.bounce(&mut target, &mut projectile);
    target.last_collision = time;
    projectile.last_collision = time;

    *store
        .body_mut(target_id)
        .ok_or(Error::BodyNotFound(target_id))? = target;
    *store
        .body_mut(projectile_id)
        .ok_or(Error::BodyNotFound(projectile_id))? = projectile;
    Ok(())
}
