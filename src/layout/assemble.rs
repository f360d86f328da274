use super::{Board, BoardLayout};
use crate::connect::{ConnectorKind, connect_diagonal, connect_horizontal, connect_vertical, tri};
use crate::errors::LayoutError;
use crate::float_types::Real;
use crate::scad::Shape;
use crate::walls::{ground_posts, raft, wall_ring};
use serde::Deserialize;

/// Origins closer than this almost certainly overlap.
const OVERLAP_DISTANCE: Real = 10.0;
/// How far ground supports sit inside the key corners.
const SUPPORT_INSET: Real = 1.0;
/// Longest raft beam.
const RAFT_SPAN: Real = 22.0;

/// What [`assemble`] puts in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub include_connectors: bool,
    pub connector: ConnectorKind,
    pub show_caps: bool,
    pub include_walls: bool,
    pub show_reference: bool,
    /// Posts under every key corner plus a raft joining them.
    pub ground_supports: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            include_connectors: true,
            connector: ConnectorKind::default(),
            show_caps: false,
            include_walls: true,
            show_reference: false,
            ground_supports: false,
        }
    }
}

/// Resolves `layout` and builds the whole board.
pub fn assemble(layout: &BoardLayout, options: &AssemblyOptions) -> Result<Shape, LayoutError> {
    let board = Board::resolve(layout)?;
    board.assemble(layout, options)
}

impl Board {
    /// Builds the scene for an already resolved `layout`.
    pub fn assemble(
        &self,
        layout: &BoardLayout,
        options: &AssemblyOptions,
    ) -> Result<Shape, LayoutError> {
        for pair in close_key_pairs(self, OVERLAP_DISTANCE) {
            log::warn!(
                "keys `{}` and `{}` are only {:.1} mm apart",
                pair.first,
                pair.second,
                pair.distance
            );
        }

        let mut shapes = Vec::new();
        for key in self.keys() {
            shapes.push(key.switch());
            if options.show_caps {
                shapes.push(key.cap().color("red", 0.6));
            }
        }

        let connector = options.connector.shape();
        if options.include_connectors {
            shapes.extend(self.connections(layout, &connector)?);
        }

        if options.include_walls && !layout.wall.is_empty() {
            let frames = layout
                .wall
                .iter()
                .map(|r| self.corner("wall", r))
                .collect::<Result<Vec<_>, _>>()?;
            shapes.push(wall_ring(&frames, &connector));
        }

        if options.ground_supports {
            shapes.push(ground_posts(self.keys(), SUPPORT_INSET));
            shapes.push(raft(self.keys(), SUPPORT_INSET, RAFT_SPAN));
        }

        if options.show_reference {
            match &layout.reference {
                Some(model) => shapes.push(
                    Shape::import(model.file.clone(), None).color(model.color.clone(), model.alpha),
                ),
                None => log::warn!("reference model requested but the layout names none"),
            }
        }

        log::info!(
            "assembled {} keys, {} connections, {} wall corners",
            self.len(),
            if options.include_connectors { layout.connect.len() } else { 0 },
            if options.include_walls { layout.wall.len() } else { 0 },
        );
        Ok(Shape::union_all(shapes))
    }

    fn connections(&self, layout: &BoardLayout, connector: &Shape) -> Result<Vec<Shape>, LayoutError> {
        let connect = &layout.connect;
        let mut shapes = Vec::with_capacity(connect.len());

        for [left, right] in &connect.horizontal {
            let context = format!("horizontal connection {left}/{right}");
            shapes.push(connect_horizontal(
                self.lookup(&context, left)?,
                self.lookup(&context, right)?,
                connector,
            ));
        }
        for [top, bottom] in &connect.vertical {
            let context = format!("vertical connection {top}/{bottom}");
            shapes.push(connect_vertical(
                self.lookup(&context, top)?,
                self.lookup(&context, bottom)?,
                connector,
            ));
        }
        for names in &connect.diagonal {
            let context = format!("diagonal connection {}", names.join("/"));
            let [tl, tr, br, bl] = names;
            shapes.push(connect_diagonal(
                self.lookup(&context, tl)?,
                self.lookup(&context, tr)?,
                self.lookup(&context, br)?,
                self.lookup(&context, bl)?,
                connector,
            ));
        }
        for [a, b, c] in &connect.tri {
            let context = format!("tri {a} {b} {c}");
            shapes.push(tri(
                &self.corner(&context, a)?,
                &self.corner(&context, b)?,
                &self.corner(&context, c)?,
                connector,
            ));
        }
        Ok(shapes)
    }
}

/// Two keys and the distance between their origins.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    pub first: String,
    pub second: String,
    pub distance: Real,
}

/// Every pair of keys whose origins are closer than `limit`, in layout
/// order.
pub fn close_key_pairs(board: &Board, limit: Real) -> Vec<KeyPair> {
    let origins: Vec<_> = board
        .keys()
        .iter()
        .map(|k| (k.label(), k.transforms().origin()))
        .collect();

    let mut pairs = Vec::new();
    for (i, (first, a)) in origins.iter().enumerate() {
        for (second, b) in &origins[i + 1..] {
            let distance = (b - a).norm();
            if distance < limit {
                pairs.push(KeyPair {
                    first: first.to_string(),
                    second: second.to_string(),
                    distance,
                });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"
        wall = ["a.top-left", "b.top-right", "b.bottom-right", "a.bottom-left"]

        [[keys]]
        name = "a"
        position = [0.0, 0.0, 30.0]

        [[keys]]
        name = "b"
        parent = "a"
        position = [19.0, 0.0, 0.0]

        [connect]
        horizontal = [["a", "b"]]
    "#;

    #[test]
    fn options_select_parts() {
        let layout = BoardLayout::from_toml_str(ROW).unwrap();
        let full = assemble(&layout, &AssemblyOptions::default()).unwrap();
        // two switches, one connection, one wall
        assert_eq!(full.operands().len(), 4);

        let bare = AssemblyOptions {
            include_connectors: false,
            include_walls: false,
            show_caps: true,
            ..Default::default()
        };
        assert_eq!(assemble(&layout, &bare).unwrap().operands().len(), 4);
    }

    #[test]
    fn unknown_connection_key() {
        let mut layout = BoardLayout::from_toml_str(ROW).unwrap();
        layout.connect.vertical.push(["a".into(), "nope".into()]);
        let err = assemble(&layout, &AssemblyOptions::default()).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownKey { ref key, .. } if key == "nope"));
    }

    #[test]
    fn close_pairs_respect_limit() {
        let board = Board::resolve(&BoardLayout::from_toml_str(ROW).unwrap()).unwrap();
        assert!(close_key_pairs(&board, 18.0).is_empty());
        let pairs = close_key_pairs(&board, 20.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].first.as_str(), pairs[0].second.as_str()), ("a", "b"));
        approx::assert_relative_eq!(pairs[0].distance, 19.0, epsilon = 1e-9);
    }
}
