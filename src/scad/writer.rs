//! OpenSCAD text serialization.

use super::params::{ColorSpec, OffsetAmount, Resolution};
use super::{Node, Shape};
use crate::errors::ScadError;
use crate::float_types::{Real, tolerance};
use nalgebra::Vector3;
use std::fmt::{self, Write};
use std::path::Path;

const INDENT: &str = "  ";

/// Formats a coordinate, snapping values within tolerance of zero so that
/// rotation noise does not show up as `-0.0000000001` in the script.
pub fn format_real(v: Real) -> String {
    if v.abs() < tolerance() { "0".to_string() } else { format!("{v}") }
}

fn format_vec3(v: &Vector3<Real>) -> String {
    format!("[{}, {}, {}]", format_real(v.x), format_real(v.y), format_real(v.z))
}

fn resolution_args(res: &Resolution) -> String {
    let mut out = String::new();
    if let Some(n) = res.segments {
        out.push_str(&format!(", $fn = {n}"));
    }
    if let Some(fa) = res.min_angle {
        out.push_str(&format!(", $fa = {}", format_real(fa)));
    }
    if let Some(fs) = res.min_size {
        out.push_str(&format!(", $fs = {}", format_real(fs)));
    }
    out
}

impl Shape {
    /// The full OpenSCAD script for this shape.
    pub fn to_scad(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_scad(&mut out, 0);
        out
    }

    /// Serializes the scene. This is the only I/O the library performs.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ScadError> {
        let path = path.as_ref();
        let text = self.to_scad();
        std::fs::write(path, &text).map_err(|source| ScadError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} bytes of OpenSCAD to {}", text.len(), path.display());
        Ok(())
    }

    pub fn write_scad<W: Write>(&self, out: &mut W, depth: usize) -> fmt::Result {
        let pad = INDENT.repeat(depth);
        match self.node() {
            Node::Cube(p) => writeln!(
                out,
                "{pad}cube(size = [{}, {}, {}], center = {});",
                format_real(p.x),
                format_real(p.y),
                format_real(p.z),
                p.center
            ),
            Node::Sphere(p) => writeln!(
                out,
                "{pad}sphere(r = {}{});",
                format_real(p.r),
                resolution_args(&p.resolution)
            ),
            Node::Cylinder(p) => writeln!(
                out,
                "{pad}cylinder(h = {}, r1 = {}, r2 = {}, center = {}{});",
                format_real(p.h),
                format_real(p.r1),
                format_real(p.r2),
                p.center,
                resolution_args(&p.resolution)
            ),
            Node::Square { x, y, center } => writeln!(
                out,
                "{pad}square(size = [{}, {}], center = {center});",
                format_real(*x),
                format_real(*y)
            ),
            Node::Circle(p) => writeln!(
                out,
                "{pad}circle(r = {}{});",
                format_real(p.r),
                resolution_args(&p.resolution)
            ),
            Node::Polygon(points) => {
                let pts = points
                    .iter()
                    .map(|p| format!("[{}, {}]", format_real(p.x), format_real(p.y)))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "{pad}polygon(points = [{pts}]);")
            },
            Node::Import { file, convexity } => match convexity {
                Some(c) => writeln!(out, "{pad}import(file = {file:?}, convexity = {c});"),
                None => writeln!(out, "{pad}import(file = {file:?});"),
            },
            Node::Translate(v, child) => {
                write_wrapped(out, &pad, &format!("translate({})", format_vec3(v)), child, depth)
            },
            Node::Rotate { degrees, axis, child } => write_wrapped(
                out,
                &pad,
                &format!("rotate(a = {}, v = {})", format_real(*degrees), format_vec3(axis)),
                child,
                depth,
            ),
            Node::Mirror(v, child) => {
                write_wrapped(out, &pad, &format!("mirror({})", format_vec3(v)), child, depth)
            },
            Node::Scale(v, child) => {
                write_wrapped(out, &pad, &format!("scale({})", format_vec3(v)), child, depth)
            },
            Node::Color { color, alpha, child } => {
                let header = match color {
                    Some(ColorSpec::Named(name)) => {
                        format!("color({name:?}, {})", format_real(*alpha))
                    },
                    Some(ColorSpec::Rgb(r, g, b)) => format!(
                        "color([{}, {}, {}, {}])",
                        format_real(*r),
                        format_real(*g),
                        format_real(*b),
                        format_real(*alpha)
                    ),
                    None => format!("color(alpha = {})", format_real(*alpha)),
                };
                write_wrapped(out, &pad, &header, child, depth)
            },
            Node::LinearExtrude(p, child) => write_wrapped(
                out,
                &pad,
                &format!(
                    "linear_extrude(height = {}, twist = {}, convexity = {}, slices = {}, scale = {}, center = {})",
                    format_real(p.height),
                    format_real(p.twist),
                    p.convexity,
                    p.slices,
                    format_real(p.scale),
                    p.center
                ),
                child,
                depth,
            ),
            Node::Projection { cut, child } => {
                write_wrapped(out, &pad, &format!("projection(cut = {cut})"), child, depth)
            },
            Node::Offset { amount, chamfer, child } => {
                let header = match amount {
                    OffsetAmount::Radius(r) => format!("offset(r = {})", format_real(*r)),
                    OffsetAmount::Delta(d) => {
                        format!("offset(delta = {}, chamfer = {chamfer})", format_real(*d))
                    },
                };
                write_wrapped(out, &pad, &header, child, depth)
            },
            Node::Comment(text, child) => {
                for line in text.lines() {
                    writeln!(out, "{pad}// {line}")?;
                }
                child.write_scad(out, depth)
            },
            Node::Group(op, shapes) => {
                writeln!(out, "{pad}{}() {{", op.keyword())?;
                for shape in shapes {
                    shape.write_scad(out, depth + 1)?;
                }
                writeln!(out, "{pad}}}")
            },
        }
    }
}

fn write_wrapped<W: Write>(
    out: &mut W,
    pad: &str,
    header: &str,
    child: &Shape,
    depth: usize,
) -> fmt::Result {
    writeln!(out, "{pad}{header} {{")?;
    child.write_scad(out, depth + 1)?;
    writeln!(out, "{pad}}}")
}
