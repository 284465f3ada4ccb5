//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use geodome::TriangleMesh;
use geodome::float_types::Real;
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// `true` if `p` and `q` coincide within `eps` on every axis.
pub fn same_point(p: &Point3<Real>, q: &Point3<Real>, eps: Real) -> bool {
    approx_eq(p.x, q.x, eps) && approx_eq(p.y, q.y, eps) && approx_eq(p.z, q.z, eps)
}

/// Geodesic sphere at `levels`, panicking on failure.
pub fn dome(levels: i32) -> TriangleMesh {
    TriangleMesh::geodesic_sphere(levels).expect("geodesic sphere")
}

/// Pairs of vertex indices whose positions coincide within `eps`.
///
/// Sorts by `x` and only compares neighbours inside the `eps` window, so it
/// stays cheap for a few thousand vertices.
pub fn coincident_vertices(mesh: &TriangleMesh, eps: Real) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..mesh.vertices.len()).collect();
    order.sort_by(|&a, &b| mesh.vertices[a].x.total_cmp(&mesh.vertices[b].x));

    let mut pairs = Vec::new();
    for (n, &a) in order.iter().enumerate() {
        for &b in &order[n + 1..] {
            if mesh.vertices[b].x - mesh.vertices[a].x >= eps {
                break;
            }
            if same_point(&mesh.vertices[a], &mesh.vertices[b], eps) {
                pairs.push((a.min(b), a.max(b)));
            }
        }
    }
    pairs
}
