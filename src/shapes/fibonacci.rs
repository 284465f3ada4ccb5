//! Fibonacci sphere: points on a golden-angle spiral, triangulated by their
//! convex hull.

use crate::errors::GeodomeError;
use crate::float_types::{PI, Real, snap};
use crate::mesh::{Face, TriangleMesh};
use chull::ConvexHullWrapper;
use nalgebra::Point3;
use tracing::trace;

/// Golden angle in radians, `π(√5 − 1)`.
pub const GOLDEN_ANGLE: Real = PI * 1.236_067_977_499_789_7;

/// Smallest sample count whose hull has no facet through the origin. With
/// 4 points both poles and one spiral point share a facet whose plane
/// contains the z axis, so that facet has no outward side.
pub const MIN_SAMPLES: usize = 5;

/// `samples` points spread evenly over the unit sphere along a Fibonacci
/// spiral, from `(0, 0, 1)` down to `(0, 0, -1)`.
///
/// Point `i` sits at height `z = 1 − 2i/(samples − 1)` and azimuth
/// `i · GOLDEN_ANGLE`. Fewer than [`MIN_SAMPLES`] points is rejected with
/// [`GeodomeError::TooFewPoints`].
pub fn fibonacci_points(samples: usize) -> Result<Vec<Point3<Real>>, GeodomeError> {
    if samples < MIN_SAMPLES {
        return Err(GeodomeError::TooFewPoints(samples));
    }

    let last = (samples - 1) as Real;
    Ok((0..samples)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as Real / last);
            let radius = (1.0 - z * z).max(0.0).sqrt();
            let theta = GOLDEN_ANGLE * i as Real;
            Point3::new(snap(theta.sin() * radius), snap(theta.cos() * radius), z)
        })
        .collect())
}

impl TriangleMesh {
    /// **Mathematical Foundation: Fibonacci Sphere Triangulation**
    ///
    /// Every point of [`fibonacci_points`] lies on the unit sphere, so all of
    /// them are vertices of their convex hull and the hull's facets are a
    /// triangulation of the sphere with `F = 2V − 4`.
    ///
    /// ## **Algorithm**
    /// 1. **Point Generation**: golden-angle spiral
    /// 2. **Hull Computation**: QuickHull via the chull library
    /// 3. **Winding Repair**: [`TriangleMesh::force_ccw`], since hull facets
    ///    carry no guaranteed orientation
    /// 4. **Canonical Order**: each face rotated to start at its smallest
    ///    index, faces sorted, so the output does not depend on hull
    ///    iteration order
    pub fn fibonacci_sphere(samples: usize) -> Result<TriangleMesh, GeodomeError> {
        let points: Vec<Vec<Real>> = fibonacci_points(samples)?
            .iter()
            .map(|p| vec![p.x, p.y, p.z])
            .collect();

        let hull = ConvexHullWrapper::try_new(&points, None)
            .map_err(|e| GeodomeError::ConvexHull(format!("{e:?}")))?;
        let (hull_vertices, hull_indices) = hull.vertices_indices();
        trace!(
            "Convex hull of {} points: {} facets",
            samples,
            hull_indices.len() / 3
        );

        let vertices = hull_vertices
            .iter()
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect();
        let faces = hull_indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();

        let mut mesh = TriangleMesh::new(vertices, faces)?;
        mesh.force_ccw();
        if !mesh.is_ccw() {
            return Err(GeodomeError::ConvexHull(
                "hull has a facet through the origin".to_string(),
            ));
        }
        for face in &mut mesh.faces {
            *face = rotate_to_min(*face);
        }
        mesh.faces.sort_unstable();
        Ok(mesh)
    }
}

/// Cyclically rotate a face so its smallest index comes first; winding is
/// unchanged.
fn rotate_to_min(face: Face) -> Face {
    let [a, b, c] = face;
    if a <= b && a <= c {
        [a, b, c]
    } else if b <= c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}
