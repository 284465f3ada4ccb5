//! Polyhedral approximations of the **unit sphere** as indexed triangle meshes.
//!
//! The core is the *geodesic dome*: a closed-form icosahedron whose faces are
//! split into four, over and over, with every new vertex pushed back onto the
//! sphere. Shared edges are tracked by vertex index so each edge yields exactly
//! one midpoint, and existing vertices never move or get renumbered.
//!
//! ```
//! use geodome::TriangleMesh;
//!
//! let dome = TriangleMesh::icosahedron().tessellate(3)?;
//! assert_eq!(dome.vertex_count(), 642);
//! assert_eq!(dome.face_count(), 1280);
//! assert!(dome.is_ccw());
//! # Ok::<(), geodome::errors::GeodomeError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **chull-io**: Fibonacci sphere triangulated by its convex hull
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! ASCII [PLY](https://en.wikipedia.org/wiki/PLY_(file_format)) export is always available.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod manifold;
pub mod mesh;
pub mod shapes;
pub mod subdivide;
pub mod triangulated;

pub use mesh::{Face, TriangleMesh};
pub use shapes::GeodesicDome;
pub use subdivide::{EdgeKey, subdivide, tessellate};

#[cfg(feature = "chull-io")]
pub use shapes::fibonacci::fibonacci_points;
