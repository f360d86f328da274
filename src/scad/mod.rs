//! Immutable OpenSCAD expression trees.
//!
//! A [`Shape`] is a cheap handle to a node; every operation wraps the
//! receiver in a new node and leaves it untouched. Nothing here evaluates
//! geometry beyond the characteristic points in [`points`], which are enough
//! to reason about placement without a kernel.

pub mod params;
pub mod points;
pub mod writer;

#[cfg(feature = "chull-io")]
pub mod convex_hull;

use crate::float_types::Real;
use crate::traits::Placeable;
use crate::transform::RigidTransform;
use nalgebra::{Point2, Vector3};
use params::{
    CircleParams, ColorSpec, CubeParams, CylinderParams, LinearExtrudeParams, OffsetAmount,
    Resolution, SphereParams,
};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::sync::Arc;

/// N-ary combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
    Hull,
    Minkowski,
}

impl BooleanOp {
    pub const fn keyword(&self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Difference => "difference",
            BooleanOp::Intersection => "intersection",
            BooleanOp::Hull => "hull",
            BooleanOp::Minkowski => "minkowski",
        }
    }
}

#[derive(Debug)]
pub(crate) enum Node {
    Cube(CubeParams),
    Sphere(SphereParams),
    Cylinder(CylinderParams),
    Square { x: Real, y: Real, center: bool },
    Circle(CircleParams),
    Polygon(Vec<Point2<Real>>),
    Import { file: String, convexity: Option<u32> },

    Translate(Vector3<Real>, Shape),
    Rotate { degrees: Real, axis: Vector3<Real>, child: Shape },
    Mirror(Vector3<Real>, Shape),
    Scale(Vector3<Real>, Shape),
    Color { color: Option<ColorSpec>, alpha: Real, child: Shape },
    LinearExtrude(LinearExtrudeParams, Shape),
    Projection { cut: bool, child: Shape },
    Offset { amount: OffsetAmount, chamfer: bool, child: Shape },
    Comment(String, Shape),

    Group(BooleanOp, Vec<Shape>),
}

#[derive(Debug, Clone)]
pub struct Shape {
    node: Arc<Node>,
}

impl Shape {
    fn wrap(node: Node) -> Self {
        Self { node: Arc::new(node) }
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// An empty union, the identity for [`Shape::union_all`].
    pub fn empty() -> Self {
        Self::wrap(Node::Group(BooleanOp::Union, Vec::new()))
    }

    // ---------------------------------------------------------------
    // Primitives
    // ---------------------------------------------------------------

    pub fn cube_with(params: CubeParams) -> Self {
        Self::wrap(Node::Cube(params))
    }

    /// Centered box.
    pub fn cube(x: Real, y: Real, z: Real) -> Self {
        Self::cube_with(CubeParams { x, y, z, center: true })
    }

    pub fn sphere_with(params: SphereParams) -> Self {
        Self::wrap(Node::Sphere(params))
    }

    pub fn sphere(r: Real, segments: Option<u32>) -> Self {
        Self::sphere_with(SphereParams {
            r,
            resolution: Resolution { segments, ..Default::default() },
        })
    }

    pub fn cylinder_with(params: CylinderParams) -> Self {
        Self::wrap(Node::Cylinder(params))
    }

    /// Centered straight cylinder along Z.
    pub fn cylinder(h: Real, r: Real, segments: Option<u32>) -> Self {
        Self::cylinder_with(CylinderParams {
            h,
            r1: r,
            r2: r,
            resolution: Resolution { segments, ..Default::default() },
            center: true,
        })
    }

    /// Centered rectangle in the XY plane.
    pub fn square(x: Real, y: Real) -> Self {
        Self::wrap(Node::Square { x, y, center: true })
    }

    pub fn circle_with(params: CircleParams) -> Self {
        Self::wrap(Node::Circle(params))
    }

    pub fn circle(r: Real, segments: Option<u32>) -> Self {
        Self::circle_with(CircleParams {
            r,
            resolution: Resolution { segments, ..Default::default() },
        })
    }

    pub fn polygon(points: &[[Real; 2]]) -> Self {
        Self::wrap(Node::Polygon(
            points.iter().map(|&[x, y]| Point2::new(x, y)).collect(),
        ))
    }

    /// External mesh, e.g. a reference board exported as STL.
    pub fn import(file: impl Into<String>, convexity: Option<u32>) -> Self {
        Self::wrap(Node::Import { file: file.into(), convexity })
    }

    // ---------------------------------------------------------------
    // Combinators
    // ---------------------------------------------------------------

    pub fn group<I: IntoIterator<Item = Shape>>(op: BooleanOp, shapes: I) -> Self {
        Self::wrap(Node::Group(op, shapes.into_iter().collect()))
    }

    pub fn union_all<I: IntoIterator<Item = Shape>>(shapes: I) -> Self {
        Self::group(BooleanOp::Union, shapes)
    }

    pub fn hull_all<I: IntoIterator<Item = Shape>>(shapes: I) -> Self {
        Self::group(BooleanOp::Hull, shapes)
    }

    /// The first shape minus every following one.
    pub fn difference_all<I: IntoIterator<Item = Shape>>(shapes: I) -> Self {
        Self::group(BooleanOp::Difference, shapes)
    }

    pub fn intersection_all<I: IntoIterator<Item = Shape>>(shapes: I) -> Self {
        Self::group(BooleanOp::Intersection, shapes)
    }

    pub fn minkowski(first: &Shape, second: &Shape) -> Self {
        Self::group(BooleanOp::Minkowski, [first.clone(), second.clone()])
    }

    pub fn union(&self, other: &Shape) -> Self {
        Self::union_all([self.clone(), other.clone()])
    }

    pub fn subtract(&self, other: &Shape) -> Self {
        Self::difference_all([self.clone(), other.clone()])
    }

    pub fn intersect(&self, other: &Shape) -> Self {
        Self::intersection_all([self.clone(), other.clone()])
    }

    /// Convex hull of this shape alone.
    pub fn hull(&self) -> Self {
        Self::hull_all([self.clone()])
    }

    /// The combinator at the root, if the root is one.
    pub fn op(&self) -> Option<BooleanOp> {
        match self.node() {
            Node::Group(op, _) => Some(*op),
            _ => None,
        }
    }

    /// Operands of a root combinator; empty for anything else.
    pub fn operands(&self) -> &[Shape] {
        match self.node() {
            Node::Group(_, shapes) => shapes,
            _ => &[],
        }
    }

    // ---------------------------------------------------------------
    // Transforms and modifiers
    // ---------------------------------------------------------------

    pub fn translate_vector(&self, v: Vector3<Real>) -> Self {
        Self::wrap(Node::Translate(v, self.clone()))
    }

    pub fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    pub fn translate_x(&self, x: Real) -> Self {
        self.translate(x, 0.0, 0.0)
    }

    pub fn translate_y(&self, y: Real) -> Self {
        self.translate(0.0, y, 0.0)
    }

    pub fn translate_z(&self, z: Real) -> Self {
        self.translate(0.0, 0.0, z)
    }

    /// Rotation by `degrees` about `axis` through the origin.
    pub fn rotate(&self, degrees: Real, axis: Vector3<Real>) -> Self {
        Self::wrap(Node::Rotate { degrees, axis, child: self.clone() })
    }

    pub fn rotate_x(&self, degrees: Real) -> Self {
        self.rotate(degrees, Vector3::x())
    }

    pub fn rotate_y(&self, degrees: Real) -> Self {
        self.rotate(degrees, Vector3::y())
    }

    pub fn rotate_z(&self, degrees: Real) -> Self {
        self.rotate(degrees, Vector3::z())
    }

    /// Reflect across the plane through the origin with normal `(x, y, z)`.
    pub fn mirror(&self, x: Real, y: Real, z: Real) -> Self {
        Self::wrap(Node::Mirror(Vector3::new(x, y, z), self.clone()))
    }

    pub fn mirror_x(&self) -> Self {
        self.mirror(1.0, 0.0, 0.0)
    }

    pub fn scale(&self, x: Real, y: Real, z: Real) -> Self {
        Self::wrap(Node::Scale(Vector3::new(x, y, z), self.clone()))
    }

    pub fn scale_uniform(&self, s: Real) -> Self {
        self.scale(s, s, s)
    }

    pub fn linear_extrude_with(&self, params: LinearExtrudeParams) -> Self {
        Self::wrap(Node::LinearExtrude(params, self.clone()))
    }

    pub fn linear_extrude(&self, height: Real) -> Self {
        self.linear_extrude_with(LinearExtrudeParams { height, ..Default::default() })
    }

    pub fn projection(&self, cut: bool) -> Self {
        Self::wrap(Node::Projection { cut, child: self.clone() })
    }

    pub fn offset_radius(&self, r: Real, chamfer: bool) -> Self {
        Self::wrap(Node::Offset {
            amount: OffsetAmount::Radius(r),
            chamfer,
            child: self.clone(),
        })
    }

    pub fn offset_delta(&self, delta: Real, chamfer: bool) -> Self {
        Self::wrap(Node::Offset {
            amount: OffsetAmount::Delta(delta),
            chamfer,
            child: self.clone(),
        })
    }

    pub fn color(&self, name: impl Into<String>, alpha: Real) -> Self {
        Self::wrap(Node::Color {
            color: Some(ColorSpec::Named(name.into())),
            alpha,
            child: self.clone(),
        })
    }

    pub fn color_rgb(&self, r: Real, g: Real, b: Real, alpha: Real) -> Self {
        Self::wrap(Node::Color {
            color: Some(ColorSpec::Rgb(r, g, b)),
            alpha,
            child: self.clone(),
        })
    }

    pub fn alpha(&self, alpha: Real) -> Self {
        Self::wrap(Node::Color { color: None, alpha, child: self.clone() })
    }

    /// Emits `// text` above this shape in the generated script.
    pub fn comment(&self, text: impl Into<String>) -> Self {
        Self::wrap(Node::Comment(text.into(), self.clone()))
    }
}

impl Placeable for Shape {
    fn rotate_x(&self, degrees: Real) -> Self {
        Shape::rotate_x(self, degrees)
    }

    fn rotate_y(&self, degrees: Real) -> Self {
        Shape::rotate_y(self, degrees)
    }

    fn rotate_z(&self, degrees: Real) -> Self {
        Shape::rotate_z(self, degrees)
    }

    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        Shape::translate(self, x, y, z)
    }

    /// Same order as the point implementation, but zero components are not
    /// emitted so long key chains stay readable in the output.
    fn place(&self, step: &RigidTransform) -> Self {
        let mut shape = self.clone();
        if step.rx != 0.0 {
            shape = Shape::rotate_x(&shape, step.rx);
        }
        if step.ry != 0.0 {
            shape = Shape::rotate_y(&shape, step.ry);
        }
        if step.rz != 0.0 {
            shape = Shape::rotate_z(&shape, step.rz);
        }
        if step.x != 0.0 || step.y != 0.0 || step.z != 0.0 {
            shape = Shape::translate(&shape, step.x, step.y, step.z);
        }
        shape
    }
}

impl Add for Shape {
    type Output = Shape;

    fn add(self, other: Shape) -> Shape {
        self.union(&other)
    }
}

impl Add<&Shape> for &Shape {
    type Output = Shape;

    fn add(self, other: &Shape) -> Shape {
        self.union(other)
    }
}

impl AddAssign for Shape {
    fn add_assign(&mut self, other: Shape) {
        *self = self.union(&other);
    }
}

impl Sub for Shape {
    type Output = Shape;

    fn sub(self, other: Shape) -> Shape {
        self.subtract(&other)
    }
}

impl Sub<&Shape> for &Shape {
    type Output = Shape;

    fn sub(self, other: &Shape) -> Shape {
        self.subtract(other)
    }
}

impl SubAssign for Shape {
    fn sub_assign(&mut self, other: Shape) {
        *self = self.subtract(&other);
    }
}
