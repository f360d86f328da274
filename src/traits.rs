use crate::float_types::Real;
use crate::transform::RigidTransform;
use nalgebra::{Point3, Rotation3, Vector3};

/// Rigid placement shared by points and shape expressions.
///
/// Both implementations must agree exactly: anchor points computed with
/// [`Point3`] are where connector geometry is placed, while switch solids are
/// placed through [`Shape`](crate::scad::Shape). A mismatch shows up as
/// webbing that floats next to the plate it should join.
pub trait Placeable: Sized + Clone {
    fn rotate_x(&self, degrees: Real) -> Self;
    fn rotate_y(&self, degrees: Real) -> Self;
    fn rotate_z(&self, degrees: Real) -> Self;
    fn translate(&self, x: Real, y: Real, z: Real) -> Self;

    /// Applies one rigid step: rotate about X, then Y, then Z, then translate.
    fn place(&self, step: &RigidTransform) -> Self {
        self.rotate_x(step.rx)
            .rotate_y(step.ry)
            .rotate_z(step.rz)
            .translate(step.x, step.y, step.z)
    }
}

impl Placeable for Point3<Real> {
    fn rotate_x(&self, degrees: Real) -> Self {
        Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.to_radians()).transform_point(self)
    }

    fn rotate_y(&self, degrees: Real) -> Self {
        Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians()).transform_point(self)
    }

    fn rotate_z(&self, degrees: Real) -> Self {
        Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians()).transform_point(self)
    }

    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self + Vector3::new(x, y, z)
    }
}
