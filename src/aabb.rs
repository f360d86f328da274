use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box holding every point, `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |bb, p| bb.grow(p)))
    }

    #[inline]
    pub fn grow(&self, p: &Point3<Real>) -> Self {
        Self {
            mins: self.mins.inf(p),
            maxs: self.maxs.sup(p),
        }
    }

    /// Containment test with `eps` of slack on every face.
    #[inline]
    pub fn contains_point(&self, p: &Point3<Real>, eps: Real) -> bool {
        (0..3).all(|i| p[i] >= self.mins[i] - eps && p[i] <= self.maxs[i] + eps)
    }

    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }
}
