use nalgebra::Point3;

use crate::{invalid, Result};

/// Sample the involute of the base circle, returning `samples + 1` points in the xy plane.
///
/// The generating parameter `pos` (the unwound string length, in base radii) steps evenly from
/// `angle_offset` up to `start_angle - end_angle`. `angle_offset` is non-zero when the root circle
/// lies outside the base circle, so that the flank starts at the root rather than at the base.
/// `start_angle` is the polar angle at which the involute leaves the base circle.
pub fn involute_points(
    base_circle_diam: f64,
    start_angle: f64,
    end_angle: f64,
    angle_offset: f64,
    samples: usize,
) -> Result<Vec<Point3<f64>>> {
    if !(base_circle_diam.is_finite() && base_circle_diam > 0.0) {
        return Err(invalid(
            "base_circle_diameter",
            format!("must be positive, got {base_circle_diam}"),
        ));
    }
    if samples < 1 {
        return Err(invalid("involute_samples", "need at least one sample step"));
    }

    let base_r = base_circle_diam / 2.0;
    let step = (start_angle - angle_offset - end_angle) / samples as f64;

    Ok((0..=samples)
        .map(|i| {
            let pos = angle_offset + i as f64 * step;
            let height = base_r * (pos * pos + 1.0).sqrt();
            let theta = start_angle - pos + pos.atan();
            Point3::new(height * theta.cos(), height * theta.sin(), 0.0)
        })
        .collect())
}
