//! Keys: a switch mount placed by a transform chain.
//!
//! A key's pose is its own local steps followed by a snapshot of its parent's
//! resolved pose. The switch plate hangs `switch_z_offset + extra_z` below
//! the key origin, which sits at the top of the keycap.

pub mod cap;
pub mod search;
pub mod switch;

pub use cap::{CapSegment, dsa_cap, make_cap};
pub use search::{bowl_key, find_radius, find_rotated_key};
pub use switch::{
    DEFAULT_MID_WALL_THRESHOLD, SWITCH_HORIZONTAL_OFFSET, SWITCH_THICKNESS, SWITCH_WIDTH,
    WALL_WIDTH, make_raised_switch, make_switch,
};

use crate::connect::post_connector;
use crate::float_types::Real;
use crate::scad::Shape;
use crate::transform::{RigidTransform, TransformList};
use cap::DSA_HEIGHT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance from the key origin down to the top of the switch plate.
pub const DEFAULT_SWITCH_Z_OFFSET: Real = DSA_HEIGHT + 6.4;

/// One of the four outer corners of a switch plate, seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Unit direction of this corner in the plate's XY plane.
    pub const fn signs(self) -> (Real, Real) {
        match self {
            Corner::TopLeft => (-1.0, 1.0),
            Corner::TopRight => (1.0, 1.0),
            Corner::BottomLeft => (-1.0, -1.0),
            Corner::BottomRight => (1.0, -1.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown corner `{0}`, expected top-left, top-right, bottom-left or bottom-right")]
pub struct ParseCornerError(pub String);

impl FromStr for Corner {
    type Err = ParseCornerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" | "tl" => Ok(Corner::TopLeft),
            "top-right" | "tr" => Ok(Corner::TopRight),
            "bottom-left" | "bl" => Ok(Corner::BottomLeft),
            "bottom-right" | "br" => Ok(Corner::BottomRight),
            other => Err(ParseCornerError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub name: Option<String>,

    pub local_transforms: TransformList,
    /// Resolved pose of the parent when it was attached.
    pub parent_transforms: TransformList,

    pub extra_width_left: Real,
    pub extra_width_right: Real,
    pub extra_height_top: Real,
    pub extra_height_bottom: Real,

    /// Lowers the switch plate and its corners by this much while the top
    /// plate stays where it was.
    pub extra_z: Real,
    pub add_side_nub: bool,
    pub switch_z_offset: Real,
    pub mid_wall_threshold: Real,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            name: None,
            local_transforms: TransformList::new(),
            parent_transforms: TransformList::new(),
            extra_width_left: 0.0,
            extra_width_right: 0.0,
            extra_height_top: 0.0,
            extra_height_bottom: 0.0,
            extra_z: 0.0,
            add_side_nub: true,
            switch_z_offset: DEFAULT_SWITCH_Z_OFFSET,
            mid_wall_threshold: DEFAULT_MID_WALL_THRESHOLD,
        }
    }
}

impl Key {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key whose first local step translates to `(x, y, z)`.
    pub fn at(x: Real, y: Real, z: Real) -> Self {
        Self::new().set_position(x, y, z)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, `"<unnamed>"` when none was set.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn set_position(self, x: Real, y: Real, z: Real) -> Self {
        self.adjust(|t| t.with_translation(x, y, z))
    }

    /// Amends the first local step.
    pub fn adjust(mut self, f: impl FnOnce(RigidTransform) -> RigidTransform) -> Self {
        self.local_transforms = self.local_transforms.with_front(f);
        self
    }

    /// Starts a new local frame; following [`adjust`](Self::adjust) calls
    /// edit it inside the frame built so far.
    pub fn add_transform(mut self) -> Self {
        self.local_transforms = self.local_transforms.add_transform();
        self
    }

    /// Rebuilds the local list, e.g. to add a bowl tilt after the fact.
    pub fn map_local(mut self, f: impl FnOnce(TransformList) -> TransformList) -> Self {
        self.local_transforms = f(self.local_transforms);
        self
    }

    /// Snapshots `parent`'s current pose. Later edits to `parent` are not
    /// seen by this key.
    pub fn set_parent(self, parent: &Key) -> Self {
        self.set_parent_transforms(parent.transforms())
    }

    pub fn set_parent_transforms(mut self, transforms: TransformList) -> Self {
        self.parent_transforms = transforms;
        self
    }

    /// Applies an arbitrary edit and hands the key back, for fields that
    /// have no dedicated builder.
    pub fn configure(mut self, f: impl FnOnce(&mut Key)) -> Self {
        f(&mut self);
        self
    }

    /// The first local step, identity when there is none.
    pub fn front(&self) -> RigidTransform {
        self.local_transforms.front()
    }

    // ---------------------------------------------------------------
    // Frames
    // ---------------------------------------------------------------

    /// Absolute pose of the key origin.
    pub fn transforms(&self) -> TransformList {
        self.local_transforms.clone().append(&self.parent_transforms)
    }

    /// Frame whose origin is the top center of the switch plate.
    pub fn switch_transforms(&self) -> TransformList {
        TransformList::from(RigidTransform::offset(
            0.0,
            0.0,
            -(self.switch_z_offset + self.extra_z),
        ))
        .append(&self.transforms())
    }

    fn internal_corner(&self, corner: Corner) -> TransformList {
        let (sx, sy) = corner.signs();
        TransformList::from(RigidTransform::offset(
            sx * SWITCH_HORIZONTAL_OFFSET,
            sy * SWITCH_HORIZONTAL_OFFSET,
            0.0,
        ))
        .append(&self.switch_transforms())
    }

    /// Outer corner frame, pushed outward diagonally by `offset`.
    /// A negative offset moves the corner inward.
    pub fn corner_with_offset(&self, corner: Corner, offset: Real) -> TransformList {
        let (sx, sy) = corner.signs();
        let extra_x = if sx > 0.0 { self.extra_width_right } else { self.extra_width_left };
        let extra_y = if sy > 0.0 { self.extra_height_top } else { self.extra_height_bottom };
        let mut frame = TransformList::from(RigidTransform::offset(sx * extra_x, sy * extra_y, 0.0))
            .append(&self.internal_corner(corner));
        if offset != 0.0 {
            frame = frame.push_frame(RigidTransform::offset(sx * offset, sy * offset, 0.0));
        }
        frame
    }

    pub fn corner(&self, corner: Corner) -> TransformList {
        self.corner_with_offset(corner, 0.0)
    }

    pub fn top_left(&self) -> TransformList {
        self.corner(Corner::TopLeft)
    }

    pub fn top_right(&self) -> TransformList {
        self.corner(Corner::TopRight)
    }

    pub fn bottom_left(&self) -> TransformList {
        self.corner(Corner::BottomLeft)
    }

    pub fn bottom_right(&self) -> TransformList {
        self.corner(Corner::BottomRight)
    }

    /// All four corners, clockwise from top-left.
    pub fn corners(&self, offset: Real) -> [TransformList; 4] {
        Corner::ALL.map(|c| self.corner_with_offset(c, offset))
    }

    // ---------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------

    /// Switch plate in the switch frame plus any widening lips.
    pub fn switch(&self) -> Shape {
        let plate = make_raised_switch(self.add_side_nub, self.extra_z, self.mid_wall_threshold);
        let mut shapes = vec![self.switch_transforms().apply(&plate)];

        let post = post_connector();
        let lip = |a: Corner, b: Corner| {
            Shape::hull_all([
                self.corner(a).apply(&post),
                self.internal_corner(a).apply(&post),
                self.internal_corner(b).apply(&post),
                self.corner(b).apply(&post),
            ])
        };
        if self.extra_height_top > 0.0 {
            shapes.push(lip(Corner::TopRight, Corner::TopLeft));
        }
        if self.extra_height_bottom > 0.0 {
            shapes.push(lip(Corner::BottomLeft, Corner::BottomRight));
        }
        if self.extra_width_left > 0.0 {
            shapes.push(lip(Corner::BottomLeft, Corner::TopLeft));
        }
        if self.extra_width_right > 0.0 {
            shapes.push(lip(Corner::BottomRight, Corner::TopRight));
        }
        Shape::union_all(shapes)
    }

    /// Everything inside the plate's hull that the plate itself does not
    /// fill, for carving a pocket into surrounding geometry.
    pub fn inverse_switch(&self) -> Shape {
        let switch = self.switch();
        switch.hull().subtract(&switch)
    }

    pub fn cap(&self) -> Shape {
        self.transforms().apply(&dsa_cap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn default_corners_form_a_square() {
        let key = Key::new();
        let expected = [
            (Corner::TopLeft, Point3::new(-9.2, 9.2, -14.4)),
            (Corner::TopRight, Point3::new(9.2, 9.2, -14.4)),
            (Corner::BottomLeft, Point3::new(-9.2, -9.2, -14.4)),
            (Corner::BottomRight, Point3::new(9.2, -9.2, -14.4)),
        ];
        for (corner, point) in expected {
            assert_relative_eq!(key.corner(corner).origin(), point, epsilon = 1e-9);
        }
    }

    #[test]
    fn extras_and_offset_push_corners_out() {
        let key = Key::new().configure(|k| {
            k.extra_width_left = 2.0;
            k.extra_height_top = 3.0;
            k.extra_z = 1.5;
        });
        assert_relative_eq!(
            key.top_left().origin(),
            Point3::new(-11.2, 12.2, -15.9),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            key.corner_with_offset(Corner::BottomRight, -1.0).origin(),
            Point3::new(8.2, -8.2, -15.9),
            epsilon = 1e-9
        );
    }

    #[test]
    fn set_position_keeps_rotation() {
        let key = Key::new()
            .adjust(|t| t.with_rotation(10.0, 0.0, 0.0))
            .set_position(1.0, 2.0, 3.0);
        assert_eq!(key.local_transforms.len(), 1);
        assert_eq!(key.front().rx, 10.0);
        assert_eq!(key.front().x, 1.0);
    }

    #[test]
    fn lips_only_for_nonzero_extras() {
        assert_eq!(Key::new().switch().operands().len(), 1);
        let key = Key::new().configure(|k| {
            k.extra_height_top = 2.0;
            k.extra_width_right = 1.0;
        });
        assert_eq!(key.switch().operands().len(), 3);
    }

    #[test]
    fn corner_names_parse() {
        for corner in Corner::ALL {
            assert_eq!(corner.name().parse::<Corner>(), Ok(corner));
        }
        assert!("middle".parse::<Corner>().is_err());
    }
}
