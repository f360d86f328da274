//! Stacked-frustum keycap models.

use crate::float_types::Real;
use crate::scad::Shape;
use crate::scad::params::LinearExtrudeParams;

pub const DSA_HEIGHT: Real = 8.0;
pub const DSA_TOP_SIZE: Real = 13.2;
pub const DSA_BOTTOM_SIZE: Real = 18.4;
pub const DSA_HALF_SIZE: Real = 16.2;

/// One level of a cap profile: a square of side `width` that rises `height`
/// to the next level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapSegment {
    pub height: Real,
    pub width: Real,
}

impl CapSegment {
    pub const fn new(height: Real, width: Real) -> Self {
        Self { height, width }
    }
}

pub const DSA_PROFILE: [CapSegment; 3] = [
    CapSegment::new(DSA_HEIGHT / 2.0, DSA_BOTTOM_SIZE),
    CapSegment::new(DSA_HEIGHT / 2.0, DSA_HALF_SIZE),
    CapSegment::new(0.0, DSA_TOP_SIZE),
];

/// Extrudes each consecutive pair of segments into a tapered square and
/// stacks them. The top of the last segment ends at z = 0.
///
/// The last segment's `height` is ignored; a profile with fewer than two
/// segments yields an empty shape.
pub fn make_cap(segments: &[CapSegment]) -> Shape {
    let mut height_so_far = 0.0;
    let mut levels = Vec::with_capacity(segments.len().saturating_sub(1));

    for pair in segments.windows(2) {
        let (bottom, top) = (pair[0], pair[1]);
        height_so_far += bottom.height;
        let params = LinearExtrudeParams {
            height: bottom.height,
            scale: top.width / bottom.width,
            ..Default::default()
        };
        levels.push(
            Shape::square(bottom.width, bottom.width)
                .linear_extrude_with(params)
                .translate_z(height_so_far - bottom.height / 2.0),
        );
    }

    Shape::union_all(levels).translate_z(-height_so_far)
}

pub fn dsa_cap() -> Shape {
    make_cap(&DSA_PROFILE)
}
