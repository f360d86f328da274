//! Parameter blocks for OpenSCAD primitives.

use crate::float_types::{Real, TAU};

/// Fragment controls (`$fn`, `$fa`, `$fs`).
///
/// Unset values are left out of the emitted script so the renderer's own
/// defaults apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    pub segments: Option<u32>,
    pub min_angle: Option<Real>,
    pub min_size: Option<Real>,
}

impl Resolution {
    pub const fn segments(n: u32) -> Self {
        Self { segments: Some(n), min_angle: None, min_size: None }
    }

    /// Number of facets OpenSCAD will use for a circle of radius `r`.
    pub fn fragments(&self, r: Real) -> usize {
        const GRID_FINE: Real = 0.000_001;
        const DEFAULT_FA: Real = 12.0;
        const DEFAULT_FS: Real = 2.0;
        if r < GRID_FINE {
            return 3;
        }
        if let Some(n) = self.segments.filter(|n| *n > 0) {
            return n.max(3) as usize;
        }
        let fa = self.min_angle.unwrap_or(DEFAULT_FA);
        let fs = self.min_size.unwrap_or(DEFAULT_FS);
        (360.0 / fa).min(r * TAU / fs).max(5.0).ceil() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub center: bool,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0, z: 1.0, center: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub r: Real,
    pub resolution: Resolution,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self { r: 1.0, resolution: Resolution::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub h: Real,
    pub r1: Real,
    pub r2: Real,
    pub resolution: Resolution,
    pub center: bool,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            h: 1.0,
            r1: 1.0,
            r2: 1.0,
            resolution: Resolution::default(),
            center: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub r: Real,
    pub resolution: Resolution,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self { r: 1.0, resolution: Resolution::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearExtrudeParams {
    pub height: Real,
    pub twist: Real,
    pub convexity: u32,
    pub slices: u32,
    /// Scale of the top outline relative to the bottom one.
    pub scale: Real,
    pub center: bool,
}

impl Default for LinearExtrudeParams {
    fn default() -> Self {
        Self {
            height: 0.0,
            twist: 0.0,
            convexity: 10,
            slices: 20,
            scale: 1.0,
            center: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Named(String),
    Rgb(Real, Real, Real),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetAmount {
    Radius(Real),
    Delta(Real),
}

impl OffsetAmount {
    pub const fn value(&self) -> Real {
        match self {
            OffsetAmount::Radius(v) | OffsetAmount::Delta(v) => *v,
        }
    }
}
