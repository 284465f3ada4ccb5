//! Closed-form unit icosahedron, the level-0 geodesic dome

use crate::float_types::{FRAC_PI_5, Real, snap};
use crate::mesh::{Face, TriangleMesh};
use nalgebra::Point3;

/// Index of the north pole `(0, 0, 1)`.
pub const NORTH_POLE: usize = 0;

/// Index of the south pole `(0, 0, -1)`.
pub const SOUTH_POLE: usize = 11;

/// 20 faces (counter-clockwise when viewed from outside)
const FACES: [Face; 20] = [
    // north cap
    [2, 0, 1],
    [3, 0, 2],
    [4, 0, 3],
    [5, 0, 4],
    [1, 0, 5],
    // band: alternating down- and up-pointing triangles
    [2, 1, 6],
    [7, 2, 6],
    [3, 2, 7],
    [8, 3, 7],
    [4, 3, 8],
    [9, 4, 8],
    [5, 4, 9],
    [10, 5, 9],
    [6, 1, 10],
    [1, 5, 10],
    // south cap
    [6, 11, 7],
    [7, 11, 8],
    [8, 11, 9],
    [9, 11, 10],
    [10, 11, 6],
];

impl TriangleMesh {
    /// **Mathematical Foundations for the Polar Icosahedron**
    ///
    /// Builds a regular icosahedron with two vertices on the *z* axis and two
    /// staggered pentagon rings between them, scaled onto the unit sphere.
    ///
    /// ## **Construction (unit edge length)**
    /// With `φ = π/5`:
    /// - `b = 1 / (2 sin φ)`: ring radius from the polar axis
    /// - `a = 1 / (2 tan φ)`: pentagon apothem
    /// - `c = √(3/4 − a²)`: height of a pole above its ring
    /// - `d = √(3/4 − (b − a)²)`: gap between the two rings
    ///
    /// The circumradius of that solid is `c + d/2` (≈ 0.951), so every vertex
    /// is divided by it.
    ///
    /// ## **Vertex Layout (12 vertices total)**
    /// - `0`: north pole
    /// - `1..=5`: upper ring at `θ = 2nπ/5`, `z = d/2`
    /// - `6..=10`: lower ring at `θ = (2n+1)π/5`, `z = −d/2`
    /// - `11`: south pole
    ///
    /// Subdivision never renumbers existing vertices, so these indices hold at
    /// every level.
    pub fn icosahedron() -> TriangleMesh {
        let b = 1.0 / (2.0 * FRAC_PI_5.sin());
        let a = 1.0 / (2.0 * FRAC_PI_5.tan());
        let c = (0.75 - a * a).sqrt();
        let d = (0.75 - (b - a) * (b - a)).sqrt();
        let radius = c + d / 2.0;

        // (r, theta, z) == cylindrical coordinates
        let mut cylindrical: Vec<(Real, Real, Real)> = Vec::with_capacity(12);
        cylindrical.push((0.0, 0.0, radius));
        for n in 0..5 {
            cylindrical.push((b, (2 * n) as Real * FRAC_PI_5, d / 2.0));
        }
        for n in 0..5 {
            cylindrical.push((b, (2 * n + 1) as Real * FRAC_PI_5, -d / 2.0));
        }
        cylindrical.push((0.0, 0.0, -radius));

        let vertices = cylindrical
            .into_iter()
            .map(|(r, theta, z)| {
                Point3::new(
                    snap(r * theta.cos() / radius),
                    snap(r * theta.sin() / radius),
                    snap(z / radius),
                )
            })
            .collect();

        TriangleMesh {
            vertices,
            faces: FACES.to_vec(),
        }
    }
}
