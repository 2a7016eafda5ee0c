use nalgebra::{Point3, Vector3};

/// Sentinel for a body that has never participated in a collision.
pub const NEVER_COLLIDED: f64 = f64::NEG_INFINITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

/// A single simulated body.
///
/// Units are whatever consistent system the host simulation runs in
/// (cgs, SI, or solar-mass/AU/year); the resolver never assumes one.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,
    pub radius: f64,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    /// Simulation time of the last collision this body took part in.
    ///
    /// Used to reject a second resolution of the same pair within one
    /// timestep. [`NEVER_COLLIDED`] until the first collision.
    pub last_collision: f64,
}

impl Body {
    /// Creates a body that has not collided yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use bodies::{Body, BodyId, NEVER_COLLIDED};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let b = Body::new(BodyId(0), 1.0, 1.0, Point3::origin(), Vector3::zeros());
    /// assert_eq!(b.last_collision, NEVER_COLLIDED);
    /// ```
    pub fn new(
        id: BodyId,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            id,
            mass,
            radius,
            position,
            velocity,
            last_collision: NEVER_COLLIDED,
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Bulk density implied by the body's own mass and radius.
    pub fn density(&self) -> f64 {
        self.mass / (4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3))
    }

    /// Recomputes the radius from the current mass at the given density.
    ///
    /// The radius is never set independently after formation; any change
    /// of mass goes through this.
    pub fn rescale_radius(&mut self, density: f64) {
        self.radius = radius_from_mass(self.mass, density);
    }
}

/// Radius of a sphere of the given mass and density, `(3m / 4πρ)^(1/3)`.
///
/// # Examples
///
/// ```
/// use bodies::radius_from_mass;
///
/// // Unit density, mass 4π/3 → unit radius
/// let r = radius_from_mass(4.0 / 3.0 * std::f64::consts::PI, 1.0);
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn radius_from_mass(mass: f64, density: f64) -> f64 {
    (3.0 * mass / (4.0 * std::f64::consts::PI * density)).powf(1.0 / 3.0)
}
