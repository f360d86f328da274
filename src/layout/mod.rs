//! Boards described as data.
//!
//! A [`BoardLayout`] is read from TOML and names every key, the key it hangs
//! from, the webbing between keys and the outline of the enclosure wall.
//! [`Board::resolve`] turns it into placed [`Key`](crate::key::Key)s and
//! [`assemble`] into one scene.
//!
//! ```toml
//! [defaults]
//! extra_z = 1.0
//!
//! [templates.top]
//! bowl = { radius = 60.0, degrees = 17.0 }
//!
//! [[keys]]
//! name = "home"
//! position = [0.0, 0.0, 28.5]
//! rotation = [0.0, -15.0, 0.0]
//!
//! [[keys]]
//! name = "above"
//! template = "top"
//! parent = "home"
//!
//! [connect]
//! vertical = [["above", "home"]]
//! ```

mod assemble;
mod resolve;

pub use assemble::{AssemblyOptions, KeyPair, assemble, close_key_pairs};
pub use resolve::Board;

use crate::errors::LayoutError;
use crate::float_types::Real;
use crate::key::{Corner, Key, ParseCornerError, bowl_key, find_rotated_key};
use crate::transform::{RigidTransform, TransformList};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Arc step used when a template does not set one, in degrees.
const DEFAULT_ARC_STEP: Real = 0.1;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardLayout {
    #[serde(default)]
    pub name: Option<String>,
    /// Geometry applied to every key before its own settings.
    #[serde(default)]
    pub defaults: KeyGeometry,
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateDef>,
    #[serde(default)]
    pub keys: Vec<KeyDef>,
    #[serde(default)]
    pub connect: Connections,
    /// Corners the enclosure wall runs through, in order.
    #[serde(default)]
    pub wall: Vec<CornerRef>,
    #[serde(default)]
    pub reference: Option<ReferenceModel>,
    #[serde(default)]
    pub options: AssemblyOptions,
}

impl BoardLayout {
    pub fn from_toml_str(text: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(text)?)
    }
}

impl FromStr for BoardLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

/// Per-key geometry overrides. Unset fields keep the previous value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct KeyGeometry {
    pub extra_width_left: Option<Real>,
    pub extra_width_right: Option<Real>,
    pub extra_height_top: Option<Real>,
    pub extra_height_bottom: Option<Real>,
    pub extra_z: Option<Real>,
    pub add_side_nub: Option<bool>,
    pub switch_z_offset: Option<Real>,
    pub mid_wall_threshold: Option<Real>,
}

impl KeyGeometry {
    pub fn apply_to(&self, key: &mut Key) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field { key.$field = v; })*
            };
        }
        set!(
            extra_width_left,
            extra_width_right,
            extra_height_top,
            extra_height_bottom,
            extra_z,
            add_side_nub,
            switch_z_offset,
            mid_wall_threshold
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bowl {
    pub radius: Real,
    pub degrees: Real,
}

/// Tilt chosen so the key lands `distance` mm from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Chord {
    pub distance: Real,
    pub radius: Real,
    #[serde(default = "default_up")]
    pub up: bool,
    #[serde(default = "default_arc_step")]
    pub step: Real,
}

fn default_up() -> bool {
    true
}

fn default_arc_step() -> Real {
    DEFAULT_ARC_STEP
}

/// Starting local transforms shared by several keys.
///
/// `arc` wins over `bowl`; `steps` run after either.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateDef {
    #[serde(default)]
    pub bowl: Option<Bowl>,
    #[serde(default)]
    pub arc: Option<Chord>,
    #[serde(default)]
    pub steps: TransformList,
}

impl TemplateDef {
    pub fn instantiate(&self, name: &str) -> Result<Key, LayoutError> {
        let key = if let Some(arc) = self.arc {
            find_rotated_key(arc.distance, arc.radius, arc.up, arc.step).ok_or_else(|| {
                LayoutError::UnreachableArc {
                    template: name.to_string(),
                    distance: arc.distance,
                    radius: arc.radius,
                }
            })?
        } else if let Some(bowl) = self.bowl {
            bowl_key(bowl.radius, bowl.degrees)
        } else {
            Key::new()
        };
        Ok(key.map_local(|local| local.append(&self.steps)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyDef {
    pub name: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Translation of the first local step.
    #[serde(default)]
    pub position: Option<[Real; 3]>,
    /// Rotation of the first local step, degrees about X, Y and Z.
    #[serde(default)]
    pub rotation: Option<[Real; 3]>,
    /// Nested frames, each started ahead of every step before it.
    #[serde(default)]
    pub frames: Vec<RigidTransform>,
    #[serde(flatten)]
    pub geometry: KeyGeometry,
}

/// Webbing to build, by key name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Connections {
    /// `[left, right]`
    #[serde(default)]
    pub horizontal: Vec<[String; 2]>,
    /// `[top, bottom]`
    #[serde(default)]
    pub vertical: Vec<[String; 2]>,
    /// `[top_left, top_right, bottom_right, bottom_left]`
    #[serde(default)]
    pub diagonal: Vec<[String; 4]>,
    #[serde(default)]
    pub tri: Vec<[CornerRef; 3]>,
}

impl Connections {
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len() + self.diagonal.len() + self.tri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A key corner written as `"<key>.<corner>"`, e.g. `"th1.top-right"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct CornerRef {
    pub key: String,
    pub corner: Corner,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCornerRefError {
    #[error("expected `<key>.<corner>`, got `{0}`")]
    MissingSeparator(String),
    #[error(transparent)]
    Corner(#[from] ParseCornerError),
}

impl FromStr for CornerRef {
    type Err = ParseCornerRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, corner) = s
            .rsplit_once('.')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| ParseCornerRefError::MissingSeparator(s.to_string()))?;
        Ok(Self { key: key.to_string(), corner: corner.parse()? })
    }
}

impl TryFrom<String> for CornerRef {
    type Error = ParseCornerRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CornerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.key, self.corner)
    }
}

/// An external mesh shown next to the board for comparison.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceModel {
    pub file: String,
    #[serde(default = "default_reference_color")]
    pub color: String,
    #[serde(default = "default_reference_alpha")]
    pub alpha: Real,
}

fn default_reference_color() -> String {
    "green".to_string()
}

fn default_reference_alpha() -> Real {
    0.3
}
