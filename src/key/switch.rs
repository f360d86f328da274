//! Switch mount plate geometry. All sizes in mm.

use crate::float_types::Real;
use crate::scad::Shape;

/// Width of the square hole a switch clips into.
pub const SWITCH_WIDTH: Real = 14.4;
pub const SWITCH_THICKNESS: Real = 4.0;
pub const WALL_WIDTH: Real = 2.0;

/// Distance from a switch center to the outside of its walls.
pub const SWITCH_HORIZONTAL_OFFSET: Real = SWITCH_WIDTH / 2.0 + WALL_WIDTH;

/// `extra_z` above which a third wall slab is stacked between the base and
/// the raised plate. Hand tuned for the walls above; re-derive before using
/// it with a different switch.
pub const DEFAULT_MID_WALL_THRESHOLD: Real = 4.0;

const NUB_LENGTH: Real = 2.75;
const NUB_RADIUS: Real = 1.0;
const NUB_SEGMENTS: u32 = 30;

/// Four walls around the switch hole, top face at z = 0.
pub fn make_switch(add_side_nub: bool) -> Shape {
    let top_wall = Shape::cube(SWITCH_WIDTH + WALL_WIDTH * 2.0, WALL_WIDTH, SWITCH_THICKNESS)
        .translate(0.0, WALL_WIDTH / 2.0 + SWITCH_WIDTH / 2.0, SWITCH_THICKNESS / 2.0);

    let mut shapes = vec![
        top_wall.clone(),
        top_wall.rotate_z(90.0),
        top_wall.rotate_z(180.0),
        top_wall.rotate_z(270.0),
    ];

    if add_side_nub {
        let side_nub = Shape::hull_all([
            Shape::cube(WALL_WIDTH, NUB_LENGTH, SWITCH_THICKNESS).translate(
                WALL_WIDTH / 2.0 + SWITCH_WIDTH / 2.0,
                0.0,
                SWITCH_THICKNESS / 2.0,
            ),
            Shape::cylinder(NUB_LENGTH, NUB_RADIUS, Some(NUB_SEGMENTS))
                .rotate_x(90.0)
                .translate(SWITCH_WIDTH / 2.0, 0.0, 1.0),
        ]);
        shapes.push(side_nub.rotate_z(180.0));
        shapes.push(side_nub);
    }

    Shape::union_all(shapes).translate_z(-SWITCH_THICKNESS)
}

/// Mount plate for a switch whose floor sits `extra_z` below its top plate.
///
/// The nubbed plate is raised by `extra_z` over a plain base so the top
/// surface stays put; past `mid_wall_threshold` another plain slab is placed
/// at the threshold height to close the gap between the two.
pub fn make_raised_switch(add_side_nub: bool, extra_z: Real, mid_wall_threshold: Real) -> Shape {
    if extra_z <= 0.0 {
        return make_switch(add_side_nub);
    }
    let mut shape = make_switch(false) + make_switch(add_side_nub).translate_z(extra_z);
    if extra_z > mid_wall_threshold {
        shape += make_switch(false).translate_z(mid_wall_threshold);
    }
    shape
}
