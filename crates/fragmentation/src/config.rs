use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Empirical coefficients of the grazing-regime critical velocity
/// (Chambers 2013, Eq. 17).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrazeCoefficients {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
}

impl Default for GrazeCoefficients {
    fn default() -> Self {
        Self {
            c1: 2.43,
            c2: -0.0408,
            c3: 1.86,
            c4: 1.08,
        }
    }
}

/// Resolver configuration, fixed at setup time.
///
/// The bulk density and the minimum fragment mass are expressed in the unit
/// system the host simulation runs in; the resolver never infers units from
/// the numeric value of the gravitational constant.
///
/// # Examples
///
/// ```
/// use fragmentation::ResolverConfig;
///
/// // cgs host: 1 g/cm³ reference density, 1 g minimum fragment
/// let config = ResolverConfig::cgs(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Assumed constant bulk density entering the critical disruption
    /// energy, in the host's units.
    pub bulk_density: f64,

    /// Smallest body the synthesizer may create. Residual mass is
    /// partitioned into equal fragments of at least this mass.
    pub min_fragment_mass: f64,

    /// Dimensionless disruption-scaling constant (Leinhardt & Stewart
    /// 2012 use 1.8 for small rocky bodies).
    #[serde(default = "default_cstar")]
    pub cstar: f64,

    /// Largest-remnant fraction of the target mass at or below which a
    /// disruption counts as super-catastrophic.
    #[serde(default = "default_supercatastrophic_fraction")]
    pub supercatastrophic_fraction: f64,

    /// Sanity ceiling on the number of fragments created per collision.
    #[serde(default = "default_max_fragments")]
    pub max_fragments: usize,

    /// Grazing-regime critical velocity coefficients.
    #[serde(default)]
    pub graze: GrazeCoefficients,
}

fn default_cstar() -> f64 {
    1.8
}

fn default_supercatastrophic_fraction() -> f64 {
    0.1
}

fn default_max_fragments() -> usize {
    1_000_000
}

impl ResolverConfig {
    /// Configuration with an explicit bulk density.
    pub fn new(bulk_density: f64, min_fragment_mass: f64) -> Self {
        Self {
            bulk_density,
            min_fragment_mass,
            cstar: default_cstar(),
            supercatastrophic_fraction: default_supercatastrophic_fraction(),
            max_fragments: default_max_fragments(),
            graze: GrazeCoefficients::default(),
        }
    }

    /// 1 g/cm³ reference density for a host running in cgs units.
    pub fn cgs(min_fragment_mass: f64) -> Self {
        Self::new(1.0, min_fragment_mass)
    }

    /// 1000 kg/m³ reference density for a host running in SI units.
    pub fn si(min_fragment_mass: f64) -> Self {
        Self::new(1000.0, min_fragment_mass)
    }

    /// 1 g/cm³ expressed in solar masses per cubic AU, for a host running
    /// in solar-mass/AU/year units.
    pub fn solar(min_fragment_mass: f64) -> Self {
        Self::new(1.684e6, min_fragment_mass)
    }

    /// Checks the setup-time invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.bulk_density.is_finite() && self.bulk_density > 0.0) {
            return Err(Error::BadBulkDensity(self.bulk_density));
        }
        if !(self.min_fragment_mass.is_finite() && self.min_fragment_mass > 0.0) {
            return Err(Error::BadMinFragmentMass(self.min_fragment_mass));
        }
        Ok(())
    }
}
