mod support;

use keyscad::connect::ConnectorKind;
use keyscad::errors::LayoutError;
use keyscad::layout::{AssemblyOptions, Board, BoardLayout, assemble, close_key_pairs};
use keyscad::{RigidTransform, TransformList};
use nalgebra::Point3;
use support::points_close;

const DACTYL: &str = include_str!("../layouts/dactyl_manuform.toml");

fn dactyl() -> BoardLayout {
    BoardLayout::from_toml_str(DACTYL).unwrap()
}

#[test]
fn bundled_layout_parses() {
    let layout = dactyl();
    assert_eq!(layout.name.as_deref(), Some("dactyl-manuform"));
    assert_eq!(layout.keys.len(), 31);
    assert_eq!(layout.connect.len(), 77);
    assert_eq!(layout.wall.len(), 42);
    assert_eq!(layout.options.connector, ConnectorKind::Capsule);
    assert!(layout.options.include_walls);
}

#[test]
fn bundled_layout_assembles() {
    let layout = dactyl();
    let scene = assemble(&layout, &layout.options).unwrap();
    // One plate per key, one entry per connection and the wall ring.
    assert_eq!(scene.operands().len(), 31 + 77 + 1);
    assert!(scene.to_scad().contains("hull() {"));

    let plates_only = AssemblyOptions {
        include_connectors: false,
        include_walls: false,
        ..layout.options
    };
    assert_eq!(assemble(&layout, &plates_only).unwrap().operands().len(), 31);
}

#[test]
fn home_key_matches_hand_built_chain() {
    let board = Board::resolve(&dactyl()).unwrap();
    let m2 = board.get("m2").unwrap();
    let expected = TransformList::new()
        .then(RigidTransform::offset(-0.3, 0.0, 1.0))
        .then(RigidTransform { x: -3.0, y: 3.0, z: 28.5, ry: -15.0, ..Default::default() });
    assert_eq!(m2.transforms(), expected);
    assert_eq!(m2.extra_z, 1.0);
    assert_eq!(m2.extra_width_left, 1.0);
}

#[test]
fn defaults_apply_unless_overridden() {
    let board = Board::resolve(&dactyl()).unwrap();
    assert_eq!(board.get("t2").unwrap().extra_z, 1.0);
    assert_eq!(board.get("tt1").unwrap().extra_z, 3.0);
    assert_eq!(board.get("th3_t").unwrap().extra_z, 3.5);
}

#[test]
fn top_row_sits_forward_of_home_row() {
    let board = Board::resolve(&dactyl()).unwrap();
    for column in 0..6 {
        let origin = |name: String| board.get(&name).unwrap().transforms().origin();
        let (m, t, tt) = (
            origin(format!("m{column}")),
            origin(format!("t{column}")),
            origin(format!("tt{column}")),
        );
        assert!(t.y > m.y && tt.y > t.y, "column {column} is not ordered");
        // Bowl keys rise as they tilt away from home.
        assert!(tt.z > m.z);
    }
}

#[test]
fn no_keys_overlap_in_bundled_layout() {
    let board = Board::resolve(&dactyl()).unwrap();
    assert!(close_key_pairs(&board, 10.0).is_empty());
    assert!(!close_key_pairs(&board, 20.0).is_empty());
}

#[test]
fn wall_with_unknown_key_is_rejected() {
    let mut layout = dactyl();
    layout.wall.push("th9.top-left".parse().unwrap());
    match assemble(&layout, &AssemblyOptions::default()) {
        Err(LayoutError::UnknownKey { context, key }) => {
            assert_eq!(context, "wall");
            assert_eq!(key, "th9");
        },
        other => panic!("expected unknown key, got {other:?}"),
    }
    // Without walls the bad corner is never looked at.
    let no_walls = AssemblyOptions { include_walls: false, ..Default::default() };
    assert!(assemble(&layout, &no_walls).is_ok());
}

#[test]
fn cycle_through_bundled_keys() {
    let mut layout = dactyl();
    let m2 = layout.keys.iter_mut().find(|k| k.name == "m2").unwrap();
    m2.parent = Some("t2".to_string());
    let err = Board::resolve(&layout).unwrap_err();
    match err {
        LayoutError::ParentCycle(names) => {
            assert_eq!(names.first(), names.last());
            assert!(names.contains(&"m2".to_string()) && names.contains(&"t2".to_string()));
        },
        other => panic!("expected a cycle, got {other}"),
    }
}

#[test]
fn arc_templates() {
    let layout = BoardLayout::from_toml_str(
        r#"
        [templates.up]
        arc = { distance = 17.7, radius = 60.0 }

        [templates.far]
        arc = { distance = 200.0, radius = 60.0 }

        [[keys]]
        name = "home"
        position = [0.0, 0.0, 30.0]

        [[keys]]
        name = "above"
        template = "up"
        parent = "home"
        "#,
    )
    .unwrap();
    let board = Board::resolve(&layout).unwrap();
    let home = board.get("home").unwrap().transforms().origin();
    let above = board.get("above").unwrap().transforms().origin();
    assert!((above - home).norm() > 17.7);
    assert!(points_close(&home, &Point3::new(0.0, 0.0, 30.0), 1e-12));

    let mut unreachable = layout.clone();
    unreachable.keys[1].template = Some("far".to_string());
    assert!(matches!(
        Board::resolve(&unreachable),
        Err(LayoutError::UnreachableArc { .. })
    ));
}

#[test]
fn connector_choice_changes_output() {
    let layout = dactyl();
    let with = |connector| {
        let options = AssemblyOptions { connector, ..layout.options };
        assemble(&layout, &options).unwrap().to_scad()
    };
    let posts = with(ConnectorKind::Post);
    let spheres = with(ConnectorKind::Sphere);
    assert!(!posts.contains("sphere("));
    assert!(spheres.contains("sphere(r = 2, $fn = 30);"));
}
