//! Webbing between neighbouring keys.
//!
//! Every connector is a small solid placed at two or three corner frames and
//! hulled. Corners must be passed in a consistent winding; nothing here
//! checks that the resulting quads are planar or non-overlapping.

use crate::key::{Key, SWITCH_THICKNESS};
use crate::scad::Shape;
use crate::transform::TransformList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2 x 2 block as thick as the switch plate, flush with its top.
pub fn capsule_connector() -> Shape {
    Shape::cube(2.0, 2.0, SWITCH_THICKNESS).translate_z(-SWITCH_THICKNESS / 2.0)
}

pub fn sphere_connector() -> Shape {
    Shape::sphere(2.0, Some(30)).translate_z(-2.0)
}

/// A needle as thick as the plate; hulls of posts follow plate edges exactly.
pub fn post_connector() -> Shape {
    Shape::cube(0.01, 0.01, SWITCH_THICKNESS).translate_z(-SWITCH_THICKNESS / 2.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    Capsule,
    #[default]
    Post,
    Sphere,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 3] =
        [ConnectorKind::Capsule, ConnectorKind::Post, ConnectorKind::Sphere];

    pub const fn name(self) -> &'static str {
        match self {
            ConnectorKind::Capsule => "capsule",
            ConnectorKind::Post => "post",
            ConnectorKind::Sphere => "sphere",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            ConnectorKind::Capsule => capsule_connector(),
            ConnectorKind::Post => post_connector(),
            ConnectorKind::Sphere => sphere_connector(),
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connector `{0}`, expected capsule, post or sphere")]
pub struct ParseConnectorError(pub String);

impl FromStr for ConnectorKind {
    type Err = ParseConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseConnectorError(s.to_string()))
    }
}

fn hull_at(frames: [&TransformList; 3], connector: &Shape) -> Shape {
    Shape::hull_all(frames.map(|t| t.apply(connector)))
}

/// Joins `left`'s right edge to `right`'s left edge.
pub fn connect_horizontal(left: &Key, right: &Key, connector: &Shape) -> Shape {
    let (l_tr, l_br) = (left.top_right(), left.bottom_right());
    let (r_bl, r_tl) = (right.bottom_left(), right.top_left());
    hull_at([&l_tr, &l_br, &r_bl], connector) + hull_at([&r_bl, &r_tl, &l_tr], connector)
}

/// Joins `top`'s bottom edge to `bottom`'s top edge.
pub fn connect_vertical(top: &Key, bottom: &Key, connector: &Shape) -> Shape {
    let (t_br, t_bl) = (top.bottom_right(), top.bottom_left());
    let (b_tl, b_tr) = (bottom.top_left(), bottom.top_right());
    hull_at([&t_br, &t_bl, &b_tl], connector) + hull_at([&b_tl, &b_tr, &t_br], connector)
}

/// Fills the gap where four keys meet.
pub fn connect_diagonal(
    top_left: &Key,
    top_right: &Key,
    bottom_right: &Key,
    bottom_left: &Key,
    connector: &Shape,
) -> Shape {
    let tl = top_left.bottom_right();
    let tr = top_right.bottom_left();
    let br = bottom_right.top_left();
    let bl = bottom_left.top_right();
    hull_at([&tl, &tr, &br], connector) + hull_at([&br, &bl, &tl], connector)
}

pub fn tri(t1: &TransformList, t2: &TransformList, t3: &TransformList, connector: &Shape) -> Shape {
    hull_at([t1, t2, t3], connector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn connectors_hang_below_the_frame() {
        for kind in ConnectorKind::ALL {
            let bb = kind.shape().bounding_box().unwrap();
            assert!(bb.maxs.z <= 1e-9, "{kind:?} pokes above its frame");
            assert!(bb.mins.z >= -SWITCH_THICKNESS - 1e-9);
        }
        assert_relative_eq!(
            capsule_connector().bounding_box().unwrap().extents().x,
            2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn connector_names_parse() {
        for kind in ConnectorKind::ALL {
            assert_eq!(kind.to_string().parse::<ConnectorKind>(), Ok(kind));
        }
        assert_eq!(
            "cube".parse::<ConnectorKind>(),
            Err(ParseConnectorError("cube".to_string()))
        );
    }

    #[test]
    fn each_connection_is_two_triangles() {
        let a = Key::new();
        let b = Key::at(19.0, 0.0, 0.0);
        let joined = connect_horizontal(&a, &b, &post_connector());
        assert_eq!(joined.operands().len(), 2);
        assert!(joined.operands().iter().all(|h| h.operands().len() == 3));
    }
}
