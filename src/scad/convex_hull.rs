//! Convex hull evaluation of expression trees.

use super::Shape;
use crate::float_types::Real;
use chull::ConvexHullWrapper;
use nalgebra::Point3;

impl Shape {
    /// Vertices of the convex hull of this shape's characteristic points.
    ///
    /// Degenerate input (fewer than four points, or all of them coplanar)
    /// has no 3D hull; the characteristic points are returned unchanged.
    pub fn hull_vertices(&self) -> Vec<Point3<Real>> {
        let points = self.characteristic_points();
        let points_for_hull: Vec<Vec<Real>> =
            points.iter().map(|p| vec![p.x, p.y, p.z]).collect();

        let hull = match ConvexHullWrapper::try_new(&points_for_hull, None) {
            Ok(h) => h,
            Err(err) => {
                log::debug!("convex hull of {} points failed: {err:?}", points.len());
                return points;
            },
        };

        let (verts, _indices) = hull.vertices_indices();
        verts
            .into_iter()
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_vertices_span_the_same_box() {
        let a = Shape::cube(1.0, 1.0, 1.0);
        let b = a.translate(4.0, 2.0, 1.0);
        let hull = Shape::hull_all([a, b]);
        let verts = hull.hull_vertices();
        assert!(verts.len() >= 8 && verts.len() <= 16);
        let bb = crate::aabb::Aabb::from_points(&verts).unwrap();
        assert_eq!(Some(bb), hull.bounding_box());
    }
}
