use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId};

/// Periodic domain extents on the two in-plane axes.
///
/// Shearing-sheet style hosts wrap freshly placed bodies back into the box;
/// the z axis is left open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicBox {
    pub lx: f64,
    pub ly: f64,
}

impl PeriodicBox {
    pub fn new(lx: f64, ly: f64) -> Self {
        Self { lx, ly }
    }

    /// Wraps a position into `[-L/2, L/2)` on x and y.
    ///
    /// # Examples
    ///
    /// ```
    /// use bodies::PeriodicBox;
    /// use nalgebra::Point3;
    ///
    /// let wrapped = PeriodicBox::new(10.0, 10.0).wrap(Point3::new(6.0, -7.0, 3.0));
    /// assert!((wrapped.x - -4.0).abs() < 1e-12);
    /// assert!((wrapped.y - 3.0).abs() < 1e-12);
    /// assert!((wrapped.z - 3.0).abs() < 1e-12);
    /// ```
    pub fn wrap(&self, mut position: Point3<f64>) -> Point3<f64> {
        position.x -= self.lx * ((position.x + 0.5 * self.lx) / self.lx).floor();
        position.y -= self.ly * ((position.y + 0.5 * self.ly) / self.ly).floor();
        position
    }
}

/// The narrow contract a host simulation exposes to the collision resolver.
///
/// The store owns every body; the resolver reads and mutates bodies through
/// this trait, appends fragments, and never removes anything itself.
pub trait ParticleStore {
    /// Number of bodies currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current simulation time.
    fn time(&self) -> f64;

    /// Gravitational constant of the host's unit system.
    fn gravity(&self) -> f64;

    /// Periodic domain, if the host runs one.
    fn periodic_box(&self) -> Option<PeriodicBox> {
        None
    }

    fn body(&self, id: BodyId) -> Option<&Body>;

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body>;

    fn body_at(&self, index: usize) -> Option<&Body>;

    fn body_at_mut(&mut self, index: usize) -> Option<&mut Body>;

    /// Appends a freshly created body and returns its index.
    fn append(&mut self, body: Body) -> usize;
}

/// Reference in-memory particle store.
///
/// Plays the role the external simulation engine plays in production:
/// tests and examples drive the resolver against it directly.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    /// Current simulation time.
    pub time: f64,
    /// Gravitational constant in the set's unit system.
    pub gravity: f64,
    /// Optional periodic domain for fragment wrap-around.
    pub boundary: Option<PeriodicBox>,
    bodies: Vec<Body>,
    next_id: u64,
}

impl ParticleSet {
    /// Creates an empty set with the given gravitational constant.
    ///
    /// # Examples
    ///
    /// ```
    /// use bodies::{ParticleSet, ParticleStore};
    ///
    /// let set = ParticleSet::new(1.0);
    /// assert!(set.is_empty());
    /// ```
    pub fn new(gravity: f64) -> Self {
        Self {
            time: 0.0,
            gravity,
            boundary: None,
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Creates an empty set with a periodic domain.
    pub fn with_boundary(gravity: f64, boundary: PeriodicBox) -> Self {
        Self {
            boundary: Some(boundary),
            ..Self::new(gravity)
        }
    }

    /// Adds a new body and returns its id.
    ///
    /// # Examples
    ///
    /// ```
    /// use bodies::{ParticleSet, ParticleStore};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut set = ParticleSet::new(1.0);
    /// let id = set.add_body(1.0, 1.0, Point3::origin(), Vector3::zeros());
    /// assert_eq!(set.len(), 1);
    /// assert!(set.body(id).is_some());
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(id, mass, radius, position, velocity));
        id
    }

    /// Removes a body, returning it if present.
    ///
    /// Hosts call this to apply a resolver disposition; the resolver never
    /// removes bodies itself.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Total mass over all bodies.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total linear momentum over all bodies.
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position over all bodies.
    pub fn center_of_mass(&self) -> Point3<f64> {
        let total = self.total_mass();
        let weighted = self
            .bodies
            .iter()
            .fold(Vector3::zeros(), |acc, b| acc + b.position.coords * b.mass);
        Point3::from(weighted / total)
    }
}

impl ParticleStore for ParticleSet {
    fn len(&self) -> usize {
        self.bodies.len()
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn gravity(&self) -> f64 {
        self.gravity
    }

    fn periodic_box(&self) -> Option<PeriodicBox> {
        self.boundary
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    fn body_at(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    fn body_at_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    fn append(&mut self, body: Body) -> usize {
        self.next_id = self.next_id.max(body.id.0 + 1);
        self.bodies.push(body);
        self.bodies.len() - 1
    }
}
