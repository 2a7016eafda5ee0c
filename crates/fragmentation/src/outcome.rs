//! Collision classification.
//!
//! Maps a derived [`CollisionContext`] onto a terminal outcome, applying
//! the empirical threshold rules of the disruption scaling laws in a fixed
//! order. Grazing encounters transfer to the hit-and-run sub-resolver for
//! a second, geometry-corrected classification.

use crate::config::ResolverConfig;
use crate::context::CollisionContext;

/// Terminal outcome of a resolved collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Hard-sphere rebound; both bodies survive unchanged in mass.
    ElasticBounce,
    /// Impact speed below mutual escape velocity; bodies merge.
    Merge,
    /// Too little residual mass to fragment; bodies merge.
    EffectiveMerge,
    /// Grazing encounter below the critical velocity; bodies merge.
    GrazeAndMerge,
    /// Target grows; residue is shed as fragments.
    PartialAccretion,
    /// Grazing encounter where target and projectile both survive.
    HitAndRun,
    /// Target loses mass to fragments.
    PartialErosion,
    /// Grazing variant of partial erosion.
    GrazingPartialErosion,
    /// Largest remnant retains at most a configured fraction of the
    /// target mass.
    SuperCatastrophic,
}

impl OutcomeKind {
    /// Outcome code written to the collision record: 0 = elastic bounce,
    /// 1 = merge, 2 = partial accretion, 3 = partial erosion,
    /// 4 = super-catastrophic. Hit-and-run outcomes reuse 1–3.
    pub fn report_code(&self) -> u8 {
        match self {
            Self::ElasticBounce => 0,
            Self::Merge | Self::EffectiveMerge | Self::GrazeAndMerge => 1,
            Self::PartialAccretion | Self::HitAndRun => 2,
            Self::PartialErosion | Self::GrazingPartialErosion => 3,
            Self::SuperCatastrophic => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ElasticBounce => "elastic bounce",
            Self::Merge => "merge",
            Self::EffectiveMerge => "effective merge",
            Self::GrazeAndMerge => "graze and merge",
            Self::PartialAccretion => "partial accretion",
            Self::HitAndRun => "hit and run",
            Self::PartialErosion => "partial erosion",
            Self::GrazingPartialErosion => "grazing partial erosion",
            Self::SuperCatastrophic => "super-catastrophic",
        }
    }
}

/// First-stage classification of a central (non-grazing) encounter, or a
/// transfer to the grazing sub-resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Merge,
    EffectiveMerge,
    PartialAccretion,
    PartialErosion,
    SuperCatastrophic,
    /// Impact parameter at or beyond the target radius; the hit-and-run
    /// sub-resolver decides.
    Grazing,
}

/// Classifies an encounter. Every valid context reaches exactly one
/// branch; thresholds are deterministic functions of the context and
/// configuration.
pub fn classify(ctx: &CollisionContext, config: &ResolverConfig) -> Classification {
    if ctx.vi <= ctx.v_esc {
        return Classification::Merge;
    }

    if ctx.b >= ctx.r_target {
        return Classification::Grazing;
    }

    if ctx.m_total - ctx.mlr < config.min_fragment_mass {
        return Classification::EffectiveMerge;
    }

    if ctx.mlr < ctx.m_target {
        if ctx.mlr <= config.supercatastrophic_fraction * ctx.m_target {
            Classification::SuperCatastrophic
        } else {
            Classification::PartialErosion
        }
    } else {
        Classification::PartialAccretion
    }
}
