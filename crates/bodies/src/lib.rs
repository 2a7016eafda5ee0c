//! Particle vocabulary shared between the collision resolver and a host
//! N-body simulation.
//!
//! The host owns the particles for their full lifetime; the resolver only
//! reads and mutates them through the [`ParticleStore`] contract. A concrete
//! in-memory store, [`ParticleSet`], is provided for tests, examples, and
//! hosts that do not bring their own storage.

pub mod body;
pub mod store;


pub use body::{radius_from_mass, Body, BodyId, NEVER_COLLIDED};
pub use store::{ParticleSet, ParticleStore, PeriodicBox};
