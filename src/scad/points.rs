//! Characteristic points of an expression tree.
//!
//! For primitives these are the vertices OpenSCAD itself would generate
//! (box corners, facet rings). Transforms map them exactly. Combinators are
//! approximated: unions and hulls keep every operand's points, differences
//! and intersections keep only the first operand's, minkowski sums add
//! operand points pairwise. Imports contribute nothing.

use super::params::Resolution;
use super::{BooleanOp, Node, Shape};
use crate::aabb::Aabb;
use crate::float_types::{Real, TAU};
use nalgebra::{Point3, Rotation3, Unit, Vector3};

fn ring(r: Real, z: Real, res: &Resolution) -> Vec<Point3<Real>> {
    let n = res.fragments(r);
    (0..n)
        .map(|i| {
            let a = TAU * i as Real / n as Real;
            Point3::new(r * a.cos(), r * a.sin(), z)
        })
        .collect()
}

fn flatten(points: Vec<Point3<Real>>) -> Vec<Point3<Real>> {
    points.into_iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect()
}

impl Shape {
    pub fn characteristic_points(&self) -> Vec<Point3<Real>> {
        match self.node() {
            Node::Cube(p) => {
                let (lo, hi) = if p.center {
                    (Vector3::new(-p.x, -p.y, -p.z) / 2.0, Vector3::new(p.x, p.y, p.z) / 2.0)
                } else {
                    (Vector3::zeros(), Vector3::new(p.x, p.y, p.z))
                };
                let mut corners = Vec::with_capacity(8);
                for x in [lo.x, hi.x] {
                    for y in [lo.y, hi.y] {
                        for z in [lo.z, hi.z] {
                            corners.push(Point3::new(x, y, z));
                        }
                    }
                }
                corners
            },
            Node::Sphere(p) => {
                // Same latitude rings OpenSCAD uses: no vertex at the poles.
                let fragments = p.resolution.fragments(p.r);
                let rings = fragments.div_ceil(2);
                (0..rings)
                    .flat_map(|i| {
                        let phi = (180.0 * (i as Real + 0.5) / rings as Real).to_radians();
                        let r = p.r * phi.sin();
                        let z = p.r * phi.cos();
                        let n = fragments;
                        (0..n).map(move |j| {
                            let a = TAU * j as Real / n as Real;
                            Point3::new(r * a.cos(), r * a.sin(), z)
                        })
                    })
                    .collect()
            },
            Node::Cylinder(p) => {
                let (z0, z1) = if p.center { (-p.h / 2.0, p.h / 2.0) } else { (0.0, p.h) };
                let res = Resolution {
                    segments: Some(p.resolution.fragments(p.r1.max(p.r2)) as u32),
                    ..p.resolution
                };
                let mut pts = ring(p.r1, z0, &res);
                pts.extend(ring(p.r2, z1, &res));
                pts
            },
            Node::Square { x, y, center } => {
                let (x0, y0) = if *center { (-x / 2.0, -y / 2.0) } else { (0.0, 0.0) };
                vec![
                    Point3::new(x0, y0, 0.0),
                    Point3::new(x0 + x, y0, 0.0),
                    Point3::new(x0 + x, y0 + y, 0.0),
                    Point3::new(x0, y0 + y, 0.0),
                ]
            },
            Node::Circle(p) => ring(p.r, 0.0, &p.resolution),
            Node::Polygon(points) => points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
            Node::Import { .. } => Vec::new(),

            Node::Translate(v, child) => {
                child.characteristic_points().into_iter().map(|p| p + v).collect()
            },
            Node::Rotate { degrees, axis, child } => {
                let pts = child.characteristic_points();
                if axis.norm_squared() == 0.0 {
                    return pts;
                }
                let rot = Rotation3::from_axis_angle(
                    &Unit::new_normalize(*axis),
                    degrees.to_radians(),
                );
                pts.iter().map(|p| rot.transform_point(p)).collect()
            },
            Node::Mirror(n, child) => {
                let pts = child.characteristic_points();
                let len2 = n.norm_squared();
                if len2 == 0.0 {
                    return pts;
                }
                pts.into_iter()
                    .map(|p| p - n * (2.0 * p.coords.dot(n) / len2))
                    .collect()
            },
            Node::Scale(s, child) => child
                .characteristic_points()
                .into_iter()
                .map(|p| Point3::from(p.coords.component_mul(s)))
                .collect(),
            Node::Color { child, .. } | Node::Comment(_, child) => child.characteristic_points(),
            Node::LinearExtrude(p, child) => {
                let outline = child.characteristic_points();
                let (z0, z1) = if p.center {
                    (-p.height / 2.0, p.height / 2.0)
                } else {
                    (0.0, p.height)
                };
                // OpenSCAD twists clockwise when looking down Z.
                let twist = Rotation3::from_axis_angle(&Vector3::z_axis(), (-p.twist).to_radians());
                let bottom = outline.iter().map(|q| Point3::new(q.x, q.y, z0));
                let top = outline.iter().map(|q| {
                    let scaled = Point3::new(q.x * p.scale, q.y * p.scale, 0.0);
                    twist.transform_point(&scaled) + Vector3::new(0.0, 0.0, z1)
                });
                bottom.chain(top).collect()
            },
            Node::Projection { child, .. } => flatten(child.characteristic_points()),
            Node::Offset { amount, child, .. } => {
                let pts = child.characteristic_points();
                let d = amount.value();
                if d <= 0.0 {
                    return pts;
                }
                pts.iter()
                    .flat_map(|p| {
                        [
                            *p,
                            p + Vector3::new(d, 0.0, 0.0),
                            p - Vector3::new(d, 0.0, 0.0),
                            p + Vector3::new(0.0, d, 0.0),
                            p - Vector3::new(0.0, d, 0.0),
                        ]
                    })
                    .collect()
            },
            Node::Group(op, shapes) => match op {
                BooleanOp::Union | BooleanOp::Hull => shapes
                    .iter()
                    .flat_map(|s| s.characteristic_points())
                    .collect(),
                BooleanOp::Difference | BooleanOp::Intersection => shapes
                    .first()
                    .map(|s| s.characteristic_points())
                    .unwrap_or_default(),
                BooleanOp::Minkowski => {
                    let mut iter = shapes.iter();
                    let Some(first) = iter.next() else {
                        return Vec::new();
                    };
                    iter.fold(first.characteristic_points(), |acc, s| {
                        let other = s.characteristic_points();
                        acc.iter()
                            .flat_map(|a| other.iter().map(move |b| a + b.coords))
                            .collect()
                    })
                },
            },
        }
    }

    /// Bounding box of [`characteristic_points`](Self::characteristic_points).
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.characteristic_points())
    }
}
