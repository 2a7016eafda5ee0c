//! Collision-plane geometry.

use bodies::Body;
use nalgebra::{Point3, Vector3};

/// Right-handed orthonormal basis of the collision plane.
#[derive(Debug, Clone, Copy)]
pub struct CollisionBasis {
    /// Unit vector along the pre-collision relative velocity.
    pub along: Vector3<f64>,
    /// Unit normal of the collision plane (relative velocity × relative
    /// position).
    pub normal: Vector3<f64>,
    /// Unit vector completing the basis (normal × relative velocity).
    pub ortho: Vector3<f64>,
}

impl CollisionBasis {
    /// Builds the basis from the relative velocity and position of an
    /// encounter.
    ///
    /// For an exactly head-on encounter the plane normal is undefined; any
    /// direction perpendicular to the relative velocity serves, so one is
    /// picked deterministically.
    ///
    /// # Examples
    ///
    /// ```
    /// use fragmentation::geometry::CollisionBasis;
    /// use nalgebra::Vector3;
    ///
    /// let basis = CollisionBasis::from_encounter(
    ///     Vector3::new(2.0, 0.0, 0.0),
    ///     Vector3::new(1.0, 1.0, 0.0),
    /// );
    /// assert!((basis.along.x - 1.0).abs() < 1e-12);
    /// assert!(basis.normal.dot(&basis.along).abs() < 1e-12);
    /// assert!(basis.ortho.dot(&basis.along).abs() < 1e-12);
    /// ```
    pub fn from_encounter(dv: Vector3<f64>, dx: Vector3<f64>) -> Self {
        let along = dv.normalize();

        let cross = dv.cross(&dx);
        let normal = if cross.magnitude() > f64::EPSILON * dv.magnitude() * dx.magnitude() {
            cross.normalize()
        } else {
            perpendicular_to(&along)
        };

        let ortho = normal.cross(&dv).normalize();

        Self {
            along,
            normal,
            ortho,
        }
    }
}

/// A unit vector perpendicular to `v`, chosen from the coordinate axis
/// least aligned with it.
fn perpendicular_to(v: &Vector3<f64>) -> Vector3<f64> {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis).normalize()
}

/// Center-of-mass position and velocity of a body pair.
pub fn pair_center_of_mass(a: &Body, b: &Body) -> (Point3<f64>, Vector3<f64>) {
    let total_mass = a.mass + b.mass;
    let position = Point3::from(
        (a.position.coords * a.mass + b.position.coords * b.mass) / total_mass,
    );
    let velocity = (a.momentum() + b.momentum()) / total_mass;
    (position, velocity)
}
