//! Layout and output errors

use crate::float_types::Real;
use std::path::PathBuf;

/// Problems found while resolving a data-driven board layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Two keys (or two templates) share a name
    #[error("duplicate {kind} name `{name}`")]
    Duplicate { kind: &'static str, name: String },
    /// A key names a parent that is not defined
    #[error("key `{key}` references unknown parent `{parent}`")]
    UnknownParent { key: String, parent: String },
    /// A key names a template that is not defined
    #[error("key `{key}` references unknown template `{template}`")]
    UnknownTemplate { key: String, template: String },
    /// An arc template asks for a chord its radius cannot produce
    #[error("template `{template}` cannot reach {distance} mm on a {radius} mm radius")]
    UnreachableArc { template: String, distance: Real, radius: Real },
    /// Parent references loop back on themselves
    #[error("parent cycle: {}", .0.join(" -> "))]
    ParentCycle(Vec<String>),
    /// A connector, wall or post references a key that is not defined
    #[error("{context} references unknown key `{key}`")]
    UnknownKey { context: String, key: String },
    /// The layout file is not valid TOML for a board layout
    #[error("could not parse layout: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures while producing a scene file.
#[derive(Debug, thiserror::Error)]
pub enum ScadError {
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
