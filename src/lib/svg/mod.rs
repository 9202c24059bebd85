//! Minimal SVG output of flattened profiles, viewed down the gear axis.
use nalgebra::Point3;
use std::io::{Result, Write};

/// Margin around the drawing, as a fraction of its larger extent
const MARGIN: f64 = 0.05;

/// Write `polylines` as an SVG document, one `<path>` each.
/// Only x and y are drawn. SVG's y axis points down, so y is flipped.
pub fn write_svg(file: &mut dyn Write, polylines: &[Vec<Point3<f64>>]) -> Result<()> {
    let (min_x, min_y, max_x, max_y) = bounds(polylines);
    let extent = (max_x - min_x).max(max_y - min_y).max(f64::EPSILON);
    let margin = extent * MARGIN;
    let stroke = extent / 1000.0;

    writeln!(file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        file,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.4} {:.4} {:.4} {:.4}">"#,
        min_x - margin,
        flip(max_y) - margin,
        max_x - min_x + 2.0 * margin,
        max_y - min_y + 2.0 * margin
    )?;
    for poly in polylines {
        write_path(file, poly, stroke)?;
    }
    writeln!(file, "</svg>")?;
    Ok(())
}

fn write_path(file: &mut dyn Write, poly: &[Point3<f64>], stroke: f64) -> Result<()> {
    if poly.is_empty() {
        return Ok(());
    }
    write!(file, r#"  <path fill="none" stroke="black" stroke-width="{stroke:.4}" d=""#)?;
    for (i, p) in poly.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        write!(file, "{} {:.4} {:.4}", cmd, p.x, flip(p.y))?;
    }
    if poly.len() > 2 && (poly[0] - poly[poly.len() - 1]).norm() < 1e-9 {
        write!(file, " Z")?;
    }
    writeln!(file, r#""/>"#)
}

/// SVG y grows downwards. Subtracting from zero keeps 0 from printing as -0.
fn flip(y: f64) -> f64 {
    0.0 - y
}

fn bounds(polylines: &[Vec<Point3<f64>>]) -> (f64, f64, f64, f64) {
    let mut points = polylines.iter().flatten().peekable();
    if points.peek().is_none() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        },
    )
}
