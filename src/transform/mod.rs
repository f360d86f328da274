//! Rigid transforms and ordered transform chains.
//!
//! A [`TransformList`] stores its steps in application order: the step at
//! index 0 touches a point first and every later step wraps around it. A key
//! resolves its absolute pose with `local.append(parent)`, so its own steps
//! run inside the frame its parent produced.

use crate::float_types::Real;
use crate::traits::Placeable;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// One rotation + translation step.
///
/// Rotations are in degrees and applied about X, then Y, then Z; the
/// translation is applied last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidTransform {
    pub x: Real,
    pub y: Real,
    pub z: Real,

    pub rx: Real,
    pub ry: Real,
    pub rz: Real,
}

impl RigidTransform {
    pub const IDENTITY: RigidTransform = RigidTransform {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        rx: 0.0,
        ry: 0.0,
        rz: 0.0,
    };

    /// A pure translation step.
    pub const fn offset(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z, rx: 0.0, ry: 0.0, rz: 0.0 }
    }

    /// A pure rotation step, angles in degrees.
    pub const fn rotation(rx: Real, ry: Real, rz: Real) -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, rx, ry, rz }
    }

    pub const fn with_translation(self, x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z, ..self }
    }

    pub const fn with_rotation(self, rx: Real, ry: Real, rz: Real) -> Self {
        Self { rx, ry, rz, ..self }
    }

    /// Adds to the current rotation angles.
    pub fn turned(self, drx: Real, dry: Real, drz: Real) -> Self {
        Self { rx: self.rx + drx, ry: self.ry + dry, rz: self.rz + drz, ..self }
    }

    pub fn apply<T: Placeable>(&self, item: &T) -> T {
        item.place(self)
    }

    pub fn apply_point(&self, p: &Point3<Real>) -> Point3<Real> {
        p.place(self)
    }
}

/// Ordered chain of [`RigidTransform`]s.
///
/// Builder methods consume the list and return the extended one, so a list
/// handed to another key can never be edited behind its back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformList {
    steps: Vec<RigidTransform>,
}

impl TransformList {
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[RigidTransform] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Adds `step` after every step already in the list.
    pub fn then(mut self, step: RigidTransform) -> Self {
        self.steps.push(step);
        self
    }

    pub fn rotate_x(self, degrees: Real) -> Self {
        self.then(RigidTransform::rotation(degrees, 0.0, 0.0))
    }

    pub fn rotate_y(self, degrees: Real) -> Self {
        self.then(RigidTransform::rotation(0.0, degrees, 0.0))
    }

    pub fn rotate_z(self, degrees: Real) -> Self {
        self.then(RigidTransform::rotation(0.0, 0.0, degrees))
    }

    pub fn translate(self, x: Real, y: Real, z: Real) -> Self {
        self.then(RigidTransform::offset(x, y, z))
    }

    pub fn translate_x(self, x: Real) -> Self {
        self.translate(x, 0.0, 0.0)
    }

    pub fn translate_y(self, y: Real) -> Self {
        self.translate(0.0, y, 0.0)
    }

    pub fn translate_z(self, z: Real) -> Self {
        self.translate(0.0, 0.0, z)
    }

    /// The first step to be applied, or identity for an empty list.
    pub fn front(&self) -> RigidTransform {
        self.steps.first().copied().unwrap_or_default()
    }

    /// Returns the list with its first step replaced by `f(front)`.
    ///
    /// An empty list gets an identity step first, mirroring how a freshly
    /// built key starts with a single editable frame.
    pub fn with_front(mut self, f: impl FnOnce(RigidTransform) -> RigidTransform) -> Self {
        match self.steps.first_mut() {
            Some(front) => *front = f(*front),
            None => self.steps.push(f(RigidTransform::IDENTITY)),
        }
        self
    }

    /// Starts a new nested frame ahead of every existing step.
    ///
    /// Front edits made afterwards happen in the frame the older steps have
    /// already rotated into, e.g. "move forward along the current tilt".
    pub fn push_frame(mut self, step: RigidTransform) -> Self {
        self.steps.insert(0, step);
        self
    }

    /// [`push_frame`](Self::push_frame) with an identity step.
    pub fn add_transform(self) -> Self {
        self.push_frame(RigidTransform::IDENTITY)
    }

    /// Concatenation: the result applies every step of `self`, then every
    /// step of `other`.
    pub fn append(mut self, other: &TransformList) -> Self {
        self.steps.extend_from_slice(&other.steps);
        self
    }

    pub fn apply<T: Placeable>(&self, item: &T) -> T {
        self.steps
            .iter()
            .fold(item.clone(), |acc, step| acc.place(step))
    }

    pub fn apply_point(&self, p: &Point3<Real>) -> Point3<Real> {
        self.apply(p)
    }

    /// Where this frame puts the origin.
    pub fn origin(&self) -> Point3<Real> {
        self.apply_point(&Point3::origin())
    }
}

impl From<RigidTransform> for TransformList {
    fn from(step: RigidTransform) -> Self {
        Self { steps: vec![step] }
    }
}

impl FromIterator<RigidTransform> for TransformList {
    fn from_iter<I: IntoIterator<Item = RigidTransform>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}
