mod support;

use keyscad::Key;
use keyscad::key::{Corner, DEFAULT_SWITCH_Z_OFFSET, SWITCH_HORIZONTAL_OFFSET, make_raised_switch};
use keyscad::scad::BooleanOp;
use nalgebra::Point3;
use support::{approx_eq, points_close};

#[test]
fn default_corners_square_below_origin() {
    let key = Key::new();
    let corners = key.corners(0.0).map(|t| t.origin());

    let half = SWITCH_HORIZONTAL_OFFSET;
    let z = -DEFAULT_SWITCH_Z_OFFSET;
    assert!(approx_eq(z, -14.4, 1e-12));
    let expected = [
        Point3::new(-half, half, z),
        Point3::new(half, half, z),
        Point3::new(half, -half, z),
        Point3::new(-half, -half, z),
    ];
    for (got, want) in corners.iter().zip(&expected) {
        assert!(points_close(got, want, 1e-9), "{got} != {want}");
    }

    // Side of the square is 18.4 mm.
    assert!(approx_eq((corners[1] - corners[0]).norm(), 18.4, 1e-9));
    assert!(approx_eq((corners[2] - corners[1]).norm(), 18.4, 1e-9));
}

#[test]
fn corners_follow_the_key_pose() {
    let key = Key::at(10.0, 20.0, 30.0).adjust(|t| t.with_rotation(0.0, 0.0, 90.0));
    // Rotating a quarter turn about Z moves the top-left corner to
    // bottom-left before the translation.
    let tl = key.top_left().origin();
    assert!(points_close(&tl, &Point3::new(10.0 - 9.2, 20.0 - 9.2, 30.0 - 14.4), 1e-9));
}

#[test]
fn parent_is_a_snapshot() {
    let parent = Key::at(0.0, 0.0, 10.0);
    let child = Key::at(19.0, 0.0, 0.0).set_parent(&parent);
    let before = child.transforms().origin();

    let moved = parent.clone().set_position(100.0, 100.0, 100.0);
    assert_ne!(moved.transforms(), parent.transforms());
    assert_eq!(child.transforms().origin(), before);
    assert!(points_close(&before, &Point3::new(19.0, 0.0, 10.0), 1e-9));

    // Re-attaching picks up the new pose.
    let reattached = child.set_parent(&moved);
    assert!(points_close(
        &reattached.transforms().origin(),
        &Point3::new(119.0, 100.0, 100.0),
        1e-9
    ));
}

#[test]
fn child_of_tilted_parent_moves_in_the_tilted_frame() {
    let parent = Key::at(0.0, 0.0, 0.0).adjust(|t| t.with_rotation(0.0, 0.0, 90.0));
    let child = Key::at(19.0, 0.0, 0.0).set_parent(&parent);
    assert!(points_close(&child.transforms().origin(), &Point3::new(0.0, 19.0, 0.0), 1e-9));
}

#[test]
fn nested_frame_moves_along_the_local_axes() {
    let key = Key::at(0.0, 0.0, 0.0)
        .adjust(|t| t.with_rotation(0.0, 90.0, 0.0))
        .add_transform()
        .adjust(|t| t.with_translation(0.0, 0.0, 1.0));
    // Local +Z turned 90 degrees about Y points along +X.
    assert!(points_close(&key.transforms().origin(), &Point3::new(1.0, 0.0, 0.0), 1e-9));
}

#[test]
fn extra_z_lowers_the_plate_only() {
    let flat = Key::new();
    let raised = Key::new().configure(|k| k.extra_z = 3.0);

    let top = |k: &Key| k.switch().bounding_box().unwrap().maxs.z;
    let bottom = |k: &Key| k.switch().bounding_box().unwrap().mins.z;
    assert!(approx_eq(top(&flat), top(&raised), 1e-9));
    assert!(approx_eq(bottom(&flat) - bottom(&raised), 3.0, 1e-9));
    assert!(approx_eq(
        raised.corner(Corner::TopRight).origin().z,
        -DEFAULT_SWITCH_Z_OFFSET - 3.0,
        1e-9
    ));
}

#[test]
fn mid_slab_threshold_is_per_key() {
    let stack = |key: &Key| make_raised_switch(key.add_side_nub, key.extra_z, key.mid_wall_threshold);

    // Past the default threshold: (base + raised plate) + mid slab.
    let tall = Key::new().configure(|k| k.extra_z = 5.0);
    let with_slab = stack(&tall);
    assert_eq!(with_slab.operands().len(), 2);
    assert_eq!(with_slab.operands()[0].op(), Some(BooleanOp::Union));

    // Raising the threshold drops the slab: just base + raised plate.
    let relaxed = tall.configure(|k| k.mid_wall_threshold = 6.0);
    let without_slab = stack(&relaxed);
    assert_eq!(without_slab.operands().len(), 2);
    assert_eq!(without_slab.operands()[0].op(), None);
}

#[test]
fn inverse_switch_is_hull_minus_plate() {
    let key = Key::at(0.0, 0.0, 20.0);
    let inverse = key.inverse_switch();
    assert_eq!(inverse.op(), Some(BooleanOp::Difference));
    assert_eq!(inverse.operands()[0].op(), Some(BooleanOp::Hull));
}

#[test]
fn cap_top_sits_at_key_origin() {
    let key = Key::at(5.0, 5.0, 40.0);
    let bb = key.cap().bounding_box().unwrap();
    assert!(approx_eq(bb.maxs.z, 40.0, 1e-9));
    assert!(approx_eq(bb.mins.z, 32.0, 1e-9));
    // Cap clears the switch plate.
    let plate_top = key.switch().bounding_box().unwrap().maxs.z;
    assert!(bb.mins.z > plate_top);
}
