//! Fragment synthesis.
//!
//! Partitions the residual mass of a disruptive collision into equal-mass
//! fragments (plus an optional second-largest remnant), places them on a
//! circle in the collision plane, assigns a common outward ejection speed,
//! and applies a final correction pass that pins the center of mass of the
//! post-collision system to that of the original pair.

use bodies::{radius_from_mass, Body, BodyId, ParticleStore};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::context::CollisionContext;
use crate::error::{Error, Result};
use crate::geometry::{pair_center_of_mass, CollisionBasis};

/// Authority for fragment identifiers.
///
/// Strictly increasing, never reused within a run. Owned by the resolver;
/// reseed explicitly when restarting from a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentCounter {
    next: u64,
}

impl FragmentCounter {
    /// Counter whose first issued id will be `next`.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// The id the next fragment will receive.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Resets the counter, e.g. after restoring a checkpoint.
    pub fn reseed(&mut self, next: u64) {
        self.next = next;
    }

    pub(crate) fn take(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }
}

/// Bodies created by one synthesis pass, in creation order.
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    /// Identifier and mass of every new body.
    pub created: Vec<(BodyId, f64)>,
}

/// Replaces the colliding pair with the largest remnant plus fragments.
///
/// The target keeps its storage slot: it is moved to the pair's center of
/// mass, assigned the largest-remnant mass `ctx.mlr`, and its radius is
/// rederived at its own pre-collision density. Fragments share the
/// residual mass equally and are appended to the store; if the store has a
/// periodic box the new positions are wrapped into it.
///
/// Fatal preconditions, never recoverable: positive minimum fragment
/// mass, positive residual mass, fragment count inside
/// `(0, max_fragments)`.
pub fn add_fragments<S: ParticleStore + ?Sized>(
    store: &mut S,
    target_id: BodyId,
    projectile_id: BodyId,
    ctx: &CollisionContext,
    config: &ResolverConfig,
    counter: &mut FragmentCounter,
) -> Result<SynthesisReport> {
    if config.min_fragment_mass <= 0.0 {
        return Err(Error::BadMinFragmentMass(config.min_fragment_mass));
    }

    let target = *store.body(target_id).ok_or(Error::BodyNotFound(target_id))?;
    let projectile = *store
        .body(projectile_id)
        .ok_or(Error::BodyNotFound(projectile_id))?;

    let time = store.time();
    let gravity = store.gravity();
    let boundary = store.periodic_box();

    let initial_mass = target.mass + projectile.mass;
    let mslr = ctx.mslr.unwrap_or(0.0);
    let remaining_mass = initial_mass - ctx.mlr - mslr;
    if remaining_mass <= 0.0 {
        return Err(Error::NoResidualMass(remaining_mass));
    }

    // Equal partition of the residual; no size distribution within fragments
    let no_frags = (remaining_mass / config.min_fragment_mass) as usize;
    if no_frags == 0 || no_frags >= config.max_fragments {
        return Err(Error::FragmentCountOutOfRange {
            count: no_frags,
            max: config.max_fragments,
        });
    }
    let mut frag_mass = remaining_mass / no_frags as f64;

    let density = target.density();
    let new_bodies = no_frags + ctx.mslr.is_some() as usize;
    let (com_position, com_velocity) = pair_center_of_mass(&target, &projectile);

    // The body in the target slot must stay the more massive of the two;
    // with a single fragment outweighing Mlr the masses swap.
    let mut target_mass = ctx.mlr;
    if no_frags == 1 && ctx.mlr <= frag_mass {
        target_mass = frag_mass;
        frag_mass = ctx.mlr;
    }

    {
        let slot = store
            .body_mut(target_id)
            .ok_or(Error::BodyNotFound(target_id))?;
        slot.last_collision = time;
        slot.mass = target_mass;
        slot.rescale_radius(density);
        slot.position = com_position;
        slot.velocity = com_velocity;
    }

    // Mass-weighted sums over the new system, accumulated at the unwrapped
    // placement coordinates
    let mut mxsum = com_position.coords * target_mass;
    let mut mvsum = com_velocity * target_mass;

    let basis = CollisionBasis::from_encounter(ctx.dv, ctx.dx);
    let separation = ctx.separation_distance;

    // Common outward ejection speed, just above the mutual escape speed at
    // the placement radius
    let fragment_velocity = (1.1 * ctx.v_esc.powi(2)
        - 2.0 * gravity * initial_mass * (1.0 / ctx.r_total - 1.0 / separation))
        .sqrt();

    let mut created = Vec::with_capacity(new_bodies);
    let mut created_indices = Vec::with_capacity(new_bodies);

    // Second-largest remnant leads at angle zero, along the impact direction
    if ctx.mslr.is_some() {
        let id = counter.take();
        let mut remnant = Body::new(
            id,
            mslr,
            radius_from_mass(mslr, density),
            com_position + separation * basis.along,
            com_velocity + fragment_velocity * basis.along,
        );
        remnant.last_collision = time;
        debug!("second-largest remnant {:?}: mass {:e}", id, remnant.mass);

        mxsum += remnant.position.coords * remnant.mass;
        mvsum += remnant.velocity * remnant.mass;
        if let Some(boundary) = boundary {
            remnant.position = boundary.wrap(remnant.position);
        }
        created.push((id, remnant.mass));
        created_indices.push(store.append(remnant));
    }

    let theta_inc = 2.0 * std::f64::consts::PI / new_bodies as f64;
    for j in 1..=no_frags {
        let theta = theta_inc * j as f64;
        let direction = theta.cos() * basis.along + theta.sin() * basis.ortho;

        let id = counter.take();
        let mut fragment = Body::new(
            id,
            frag_mass,
            radius_from_mass(frag_mass, density),
            com_position + separation * direction,
            com_velocity + fragment_velocity * direction,
        );
        fragment.last_collision = time;
        debug!("fragment {:?}: mass {:e}", id, fragment.mass);

        mxsum += fragment.position.coords * fragment.mass;
        mvsum += fragment.velocity * fragment.mass;
        if let Some(boundary) = boundary {
            fragment.position = boundary.wrap(fragment.position);
        }
        created.push((id, fragment.mass));
        created_indices.push(store.append(fragment));
    }

    // Distribute the center-of-mass discrepancy over every body in
    // proportion to its mass share, conserving the pair's center of mass
    // position and velocity to floating-point precision
    let xoff = com_position.coords - mxsum / initial_mass;
    let voff = com_velocity - mvsum / initial_mass;

    if let Some(slot) = store.body_mut(target_id) {
        let fraction = slot.mass / initial_mass;
        slot.position += xoff * fraction;
        slot.velocity += voff * fraction;
    }
    for &index in &created_indices {
        // An index that no longer resolves is skipped, never a fault
        if let Some(body) = store.body_at_mut(index) {
            let fraction = body.mass / initial_mass;
            body.position += xoff * fraction;
            body.velocity += voff * fraction;
        }
    }

    Ok(SynthesisReport { created })
}
