//! Enclosure walls and ground supports.
//!
//! Everything here reaches down to the z = 0 plane by hulling a placed
//! connector with its own footprint.

use crate::float_types::Real;
use crate::key::Key;
use crate::scad::Shape;
use crate::transform::TransformList;
use nalgebra::Point3;

/// Depth below a corner frame where ground supports attach.
const SUPPORT_DEPTH: Real = 4.0;

/// `connector` at `frame`, hulled with a 1 mm slab of its floor footprint.
pub fn wall_post(frame: &TransformList, connector: &Shape) -> Shape {
    let top = frame.apply(connector);
    let floor = top.projection(false).linear_extrude(1.0);
    Shape::hull_all([top, floor])
}

/// A closed wall running through `frames` in order, one hulled panel per
/// consecutive pair. The last frame connects back to the first; two frames
/// make a single panel.
pub fn wall_ring(frames: &[TransformList], connector: &Shape) -> Shape {
    let posts: Vec<Shape> = frames.iter().map(|f| wall_post(f, connector)).collect();
    match posts.len() {
        0 | 1 => return Shape::union_all(posts),
        2 => return Shape::union_all([Shape::hull_all(posts)]),
        _ => {},
    }
    let panels = (0..posts.len())
        .map(|i| Shape::hull_all([posts[i].clone(), posts[(i + 1) % posts.len()].clone()]));
    Shape::union_all(panels)
}

/// A thin post under every corner of every key, each standing on the ground.
///
/// `inset` moves the corners toward the key center, see
/// [`Key::corner_with_offset`].
pub fn ground_posts<'a>(keys: impl IntoIterator<Item = &'a Key>, inset: Real) -> Shape {
    let connector = Shape::cube(2.0, 2.0, 0.001).translate_z(-SUPPORT_DEPTH);
    let posts = keys.into_iter().flat_map(|key| key.corners(-inset)).map(|t| {
        let top = t.apply(&connector);
        let floor = top.projection(false).linear_extrude(1.0).translate_z(0.5);
        Shape::hull_all([top, floor])
    });
    Shape::union_all(posts)
}

/// A ground grid tying together every pair of corner footprints that lie
/// between 1 mm and `max_span` apart.
pub fn raft<'a>(keys: impl IntoIterator<Item = &'a Key>, inset: Real, max_span: Real) -> Shape {
    let feet: Vec<Point3<Real>> = keys
        .into_iter()
        .flat_map(|key| key.corners(-inset))
        .map(|t| {
            let p = t.apply_point(&Point3::new(0.0, 0.0, -SUPPORT_DEPTH));
            Point3::new(p.x, p.y, 0.0)
        })
        .collect();

    let block = Shape::cube(1.0, 1.0, 1.0).translate_z(0.5);
    let mut beams = Vec::new();
    for (i, p) in feet.iter().enumerate() {
        for q in &feet[i + 1..] {
            let distance = (q - p).norm();
            if distance > 1.0 && distance < max_span {
                beams.push(Shape::hull_all([
                    block.translate_vector(p.coords),
                    block.translate_vector(q.coords),
                ]));
            }
        }
    }
    log::debug!("raft: {} beams between {} feet", beams.len(), feet.len());
    Shape::union_all(beams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::capsule_connector;
    use approx::assert_relative_eq;

    #[test]
    fn wall_post_reaches_the_ground() {
        let key = Key::at(0.0, 0.0, 30.0);
        let bb = wall_post(&key.top_left(), &capsule_connector()).bounding_box().unwrap();
        assert_relative_eq!(bb.mins.z, -0.5, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.z, 30.0 - 14.4, epsilon = 1e-9);
    }

    #[test]
    fn ring_closes_on_itself() {
        let key = Key::at(0.0, 0.0, 30.0);
        let ring = wall_ring(&key.corners(0.0), &capsule_connector());
        assert_eq!(ring.operands().len(), 4);
        assert!(wall_ring(&[], &capsule_connector()).operands().is_empty());
    }

    #[test]
    fn two_frames_make_one_panel() {
        let key = Key::at(0.0, 0.0, 30.0);
        let edge = wall_ring(&[key.top_left(), key.top_right()], &capsule_connector());
        assert_eq!(edge.operands().len(), 1);
        assert_eq!(edge.operands()[0].operands().len(), 2);
    }

    #[test]
    fn raft_joins_nearby_feet_only() {
        let keys = [Key::at(0.0, 0.0, 30.0), Key::at(100.0, 0.0, 30.0)];
        // Each key's four inset feet form a 16.4 mm square: four sides and
        // two diagonals of 23.2 mm, which is past the span.
        let grid = raft(&keys, 1.0, 22.0);
        assert_eq!(grid.operands().len(), 8);
        assert_eq!(ground_posts(&keys, 1.0).operands().len(), 8);
    }
}
