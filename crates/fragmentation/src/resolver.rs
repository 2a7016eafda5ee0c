//! Resolution front-end.
//!
//! Orders the colliding pair, guards against double-processing, builds the
//! encounter context, classifies, runs the matching operator, and tells
//! the caller which body slot to discard.

use bodies::{BodyId, ParticleStore};
use log::{debug, info};

use crate::bounce::BounceModel;
use crate::config::ResolverConfig;
use crate::context::CollisionContext;
use crate::error::{Error, Result};
use crate::hit_and_run::resolve_grazing;
use crate::merge::merge_into;
use crate::outcome::{classify, Classification, OutcomeKind};
use crate::recorder::{CollisionRecord, CollisionRecorder};
use crate::synthesis::{add_fragments, FragmentCounter, SynthesisReport};

/// A detected collision between two stored bodies, in the order the host
/// reported them.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub first: BodyId,
    pub second: BodyId,
}

/// Which of the two original bodies the host must discard.
///
/// The heavier body always survives in its storage slot; an elastic bounce
/// keeps both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    KeepBoth,
    DiscardFirst,
    DiscardSecond,
}

impl Disposition {
    /// Numeric convention of the host interface: 0 = neither removed,
    /// 1 = remove the first-named body, 2 = remove the second-named body.
    pub fn code(&self) -> u8 {
        match self {
            Self::KeepBoth => 0,
            Self::DiscardFirst => 1,
            Self::DiscardSecond => 2,
        }
    }
}

/// Collision-outcome resolver.
///
/// Owns the configuration and the fragment-identifier counter. Invoked
/// synchronously, once per detected collision, from the host's time-step
/// loop; never concurrently with itself.
///
/// # Examples
///
/// ```
/// use bodies::{ParticleSet, ParticleStore};
/// use fragmentation::{
///     CollisionEvent, Disposition, HardSphere, MemoryRecorder, Resolver, ResolverConfig,
/// };
/// use nalgebra::{Point3, Vector3};
///
/// let mut set = ParticleSet::new(1.0);
/// let r = bodies::radius_from_mass(1.0, 1.0);
/// let a = set.add_body(1.0, r, Point3::origin(), Vector3::zeros());
/// let b = set.add_body(1.0, r, Point3::new(1.9 * r, 0.0, 0.0), Vector3::new(-1e-3, 0.0, 0.0));
///
/// let mut resolver = Resolver::new(ResolverConfig::cgs(0.1), 1_000).unwrap();
/// let mut recorder = MemoryRecorder::default();
/// let disposition = resolver
///     .resolve(&mut set, CollisionEvent { first: a, second: b }, &HardSphere::bridges(), &mut recorder)
///     .unwrap();
///
/// // Slow contact: the pair merges and the second slot is discarded
/// assert_eq!(disposition, Disposition::DiscardSecond);
/// assert!((set.body(a).unwrap().mass - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
    fragments: FragmentCounter,
}

impl Resolver {
    /// Creates a resolver whose first fragment id will be
    /// `first_fragment_id`. The host picks a value above every id it will
    /// assign itself.
    pub fn new(config: ResolverConfig, first_fragment_id: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fragments: FragmentCounter::starting_at(first_fragment_id),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The id the next fragment will receive; persist this alongside a
    /// checkpoint.
    pub fn next_fragment_id(&self) -> u64 {
        self.fragments.peek()
    }

    /// Re-seeds the fragment counter after restoring a checkpoint.
    pub fn reseed_fragments(&mut self, next: u64) {
        self.fragments.reseed(next);
    }

    /// Resolves one collision event.
    ///
    /// Mutates the heavier body in place, appends any fragments, notifies
    /// the recorder, and returns the disposition for the caller's original
    /// ordering. An event naming a body that already collided at the
    /// current simulation time is a no-op returning
    /// [`Disposition::KeepBoth`].
    pub fn resolve<S: ParticleStore + ?Sized>(
        &mut self,
        store: &mut S,
        event: CollisionEvent,
        bounce: &dyn BounceModel,
        recorder: &mut dyn CollisionRecorder,
    ) -> Result<Disposition> {
        let now = store.time();
        let first = *store.body(event.first).ok_or(Error::BodyNotFound(event.first))?;
        let second = *store
            .body(event.second)
            .ok_or(Error::BodyNotFound(event.second))?;

        // Both orderings of a pair may be reported within one timestep;
        // only the first is processed
        if first.last_collision == now || second.last_collision == now {
            return Ok(Disposition::KeepBoth);
        }

        let (target, projectile) = if first.mass < second.mass {
            (second, first)
        } else {
            (first, second)
        };

        let mut ctx = CollisionContext::build(&target, &projectile, store.gravity(), &self.config)?;
        debug!(
            "collision at t={:e}: mp/mt={:.4} mlr/mt={:.4} b/rt={:.4} vi/vesc={:.4} q/q*={:.4}",
            now,
            ctx.m_projectile / ctx.m_target,
            ctx.mlr / ctx.m_target,
            ctx.b / ctx.r_target,
            ctx.vi / ctx.v_esc,
            ctx.q_ratio(),
        );

        let (outcome, report) = match classify(&ctx, &self.config) {
            Classification::Merge => {
                self.merge(store, target.id, &projectile, now)?;
                (OutcomeKind::Merge, SynthesisReport::default())
            }
            Classification::EffectiveMerge => {
                self.merge(store, target.id, &projectile, now)?;
                (OutcomeKind::EffectiveMerge, SynthesisReport::default())
            }
            Classification::PartialAccretion => {
                let report = add_fragments(
                    store,
                    target.id,
                    projectile.id,
                    &ctx,
                    &self.config,
                    &mut self.fragments,
                )?;
                (OutcomeKind::PartialAccretion, report)
            }
            Classification::PartialErosion => {
                let report = add_fragments(
                    store,
                    target.id,
                    projectile.id,
                    &ctx,
                    &self.config,
                    &mut self.fragments,
                )?;
                (OutcomeKind::PartialErosion, report)
            }
            Classification::SuperCatastrophic => {
                let report = add_fragments(
                    store,
                    target.id,
                    projectile.id,
                    &ctx,
                    &self.config,
                    &mut self.fragments,
                )?;
                (OutcomeKind::SuperCatastrophic, report)
            }
            Classification::Grazing => resolve_grazing(
                store,
                target.id,
                projectile.id,
                &mut ctx,
                &self.config,
                &mut self.fragments,
                bounce,
            )?,
        };

        let target_mass = store.body(target.id).map_or(0.0, |b| b.mass);
        info!(
            "{} at t={:e}: target {} ({:e}), projectile {}, {} new bodies",
            outcome.label(),
            now,
            target.id.0,
            target_mass,
            projectile.id.0,
            report.created.len(),
        );

        recorder.record(&CollisionRecord {
            time: now,
            outcome,
            target: target.id,
            target_mass,
            projectile: projectile.id,
            fragments: report.created,
        });

        Ok(if outcome == OutcomeKind::ElasticBounce {
            Disposition::KeepBoth
        } else if projectile.id == event.first {
            Disposition::DiscardFirst
        } else {
            Disposition::DiscardSecond
        })
    }

    fn merge<S: ParticleStore + ?Sized>(
        &self,
        store: &mut S,
        target_id: BodyId,
        projectile: &bodies::Body,
        time: f64,
    ) -> Result<()> {
        let target = store
            .body_mut(target_id)
            .ok_or(Error::BodyNotFound(target_id))?;
        merge_into(target, projectile, time);
        Ok(())
    }
}
