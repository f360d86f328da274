//! Parametric keyboard cases, emitted as **OpenSCAD** scripts.
//!
//! Keys are placed by chains of rigid transforms, each key optionally hanging
//! off another, and the four corners of every switch plate become anchors
//! for webbing and walls. Geometry is built as an immutable OpenSCAD
//! expression tree ([`Shape`]) and serialized once; rendering is left to
//! OpenSCAD.
//!
//! ```
//! use keyscad::{Key, Shape, connect::{connect_horizontal, post_connector}};
//!
//! let home = Key::at(0.0, 0.0, 30.0).adjust(|t| t.with_rotation(0.0, -15.0, 0.0));
//! let next = Key::at(19.0, 0.0, 0.0).set_parent(&home);
//!
//! let board = Shape::union_all([
//!     home.switch(),
//!     next.switch(),
//!     connect_horizontal(&home, &next, &post_connector()),
//! ]);
//! assert!(board.to_scad().starts_with("union() {"));
//! ```
//!
//! # Features
//! #### Default
//! - **chull-io**: [`Shape::hull_vertices`] evaluates real convex hulls of
//!   characteristic points

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod connect;
pub mod errors;
pub mod float_types;
pub mod key;
pub mod layout;
pub mod scad;
pub mod traits;
pub mod transform;
pub mod walls;

pub use key::Key;
pub use scad::Shape;
pub use transform::{RigidTransform, TransformList};
