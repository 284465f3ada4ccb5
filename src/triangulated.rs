/// A trait for any shape which can be represented by indexed triangles
use crate::float_types::Real;
use crate::mesh::{Face, face_corners};
use nalgebra::{Point3, Vector3};

/// An indexed triangulated 3D surface.
///
/// Anything that can present itself as a vertex block plus a face block
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// The vertex block, in index order.
    fn vertex_positions(&self) -> &[Point3<Real>];

    /// Call `f` for each face, in order.
    fn visit_faces<F>(&self, f: F)
    where
        F: FnMut(&Face);

    /// Call `f` for each triangle with its positions and flat facet normal.
    /// Faces that reference a missing vertex are skipped.
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Point3<Real>; 3], Vector3<Real>),
    {
        let positions = self.vertex_positions();
        self.visit_faces(|face| {
            let Some(tri) = face_corners(positions, face) else {
                return;
            };
            let normal = (tri[1] - tri[0])
                .cross(&(tri[2] - tri[0]))
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector3::zeros);
            f(tri, normal);
        });
    }
}
