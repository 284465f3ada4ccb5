//! Sphere-approximating shapes as `TriangleMesh`es

/// Level-0 geodesic dome
pub mod icosahedron;

/// Icosahedron plus repeated subdivision
pub mod geodesic;

/// Golden-spiral point cloud triangulated by its convex hull
#[cfg(feature = "chull-io")]
pub mod fibonacci;

pub use geodesic::GeodesicDome;
