//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use keyscad::{Key, Shape, aabb::Aabb, float_types::Real};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn points_close(a: &Point3<Real>, b: &Point3<Real>, eps: Real) -> bool {
    (a - b).norm() < eps
}

/// A shape with eight well separated characteristic points.
pub fn sample_block() -> Shape {
    Shape::cube(2.0, 4.0, 6.0).translate(1.0, 2.0, 3.0)
}

/// Box spanned by every corner frame origin of `keys`, with `margin` added
/// on all sides.
pub fn corner_region(keys: &[&Key], margin: Real) -> Aabb {
    let origins: Vec<Point3<Real>> = keys
        .iter()
        .flat_map(|k| k.corners(0.0))
        .map(|t| t.origin())
        .collect();
    let bb = Aabb::from_points(&origins).expect("keys have corners");
    let m = nalgebra::Vector3::repeat(margin);
    Aabb::new(bb.mins - m, bb.maxs + m)
}
