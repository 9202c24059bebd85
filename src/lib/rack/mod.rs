//! Straight rack, as a trapezoidal polyline along the pitch line (the x axis).
use log::debug;
use nalgebra::Point3;

use crate::params::RackSpec;
use crate::{degenerate, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RackProfile {
    /// Open polyline, from the most negative x to the most positive
    pub points: Vec<Point3<f64>>,
    /// Whole teeth on each side of x = 0
    pub instance_count: usize,
}

impl RackProfile {
    /// Total number of trapezoid repeats, both sides of the center
    pub fn repeats(&self) -> usize {
        self.instance_count * 2
    }

    /// Distance along x from the first point to the last
    pub fn span(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.x - first.x,
            _ => 0.0,
        }
    }
}

/// Running total of `vals`
fn accumulate(vals: &[f64]) -> Vec<f64> {
    vals.iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}

/// Build a rack covering at least `spec.length`, centered on x = 0 with a tooth tip there.
///
/// Tooth tips sit at y = +module and roots at y = -module. Each repeat is one circular pitch
/// long: a flank, a root flat, a flank and a tip flat.
pub fn build_rack(spec: &RackSpec) -> Result<RackProfile> {
    spec.validate()?;
    let module = spec.module;
    let circular_pitch = spec.circular_pitch();
    let tip_w = spec.tip_width();
    if !(tip_w > 0.0) {
        return Err(degenerate(
            "tip_width",
            format!(
                "a {} degree pressure angle leaves rack teeth {tip_w} wide at the tip",
                spec.pressure_angle
            ),
        ));
    }
    let flank_run = circular_pitch / 2.0 - tip_w;

    let instance_count = ((spec.length - tip_w).max(0.0) / 2.0 / circular_pitch).floor() as usize + 1;

    let mut y_vals = vec![module];
    let mut x_steps = vec![tip_w / 2.0];
    for _ in 0..instance_count {
        y_vals.extend_from_slice(&[-module, -module, module, module]);
        x_steps.extend_from_slice(&[flank_run, tip_w, flank_run, tip_w]);
    }
    let x_vals = accumulate(&x_steps);

    // Mirror about x = 0, negative side first
    let points: Vec<Point3<f64>> = x_vals
        .iter()
        .zip(y_vals.iter())
        .rev()
        .map(|(x, y)| Point3::new(-x, *y, 0.0))
        .chain(
            x_vals
                .iter()
                .zip(y_vals.iter())
                .map(|(x, y)| Point3::new(*x, *y, 0.0)),
        )
        .collect();

    debug!(
        "Rack with {instance_count} teeth each side, {} points, tip width {tip_w}",
        points.len()
    );
    Ok(RackProfile {
        points,
        instance_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GearError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_accumulate() {
        assert_eq!(accumulate(&[1.0, 2.0, 3.5]), vec![1.0, 3.0, 6.5]);
        assert!(accumulate(&[]).is_empty());
    }

    #[test]
    fn test_fifty_mm_rack() {
        let rack = build_rack(&RackSpec::new(50.0, 2.0, 20.0)).unwrap();
        assert_eq!(rack.instance_count, 4);
        assert_eq!(rack.repeats(), 8);
        assert_eq!(rack.points.len(), 4 * rack.repeats() + 2);
        assert!(rack.span() >= 50.0);
        let tip_w = PI - 4.0 * 20f64.to_radians().tan();
        assert_relative_eq!(rack.span(), 8.0 * 2.0 * PI + tip_w, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_about_center() {
        let rack = build_rack(&RackSpec::new(30.0, 1.5, 20.0)).unwrap();
        let n = rack.points.len();
        for i in 0..n / 2 {
            let a = rack.points[i];
            let b = rack.points[n - 1 - i];
            assert_relative_eq!(a.x, -b.x, epsilon = 1e-12);
            assert_eq!(a.y, b.y);
        }
        // Tooth tip straddles the center
        let mid = &rack.points[n / 2 - 1..=n / 2];
        assert!(mid.iter().all(|p| p.y == 1.5));
    }

    #[test]
    fn test_x_increases() {
        for pa in [0.0, 14.5, 20.0, 25.0] {
            let rack = build_rack(&RackSpec::new(40.0, 1.0, pa)).unwrap();
            for pair in rack.points.windows(2) {
                assert!(pair[1].x >= pair[0].x);
            }
        }
    }

    #[test]
    fn test_y_alternates_in_flats() {
        let m = 1.25;
        let rack = build_rack(&RackSpec::new(25.0, m, 20.0)).unwrap();
        assert!(rack.points.iter().all(|p| p.y == m || p.y == -m));
        // Points pair up into horizontal flats, and the flats alternate tip, root, tip...
        let flats: Vec<f64> = rack
            .points
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0].y, pair[1].y);
                pair[0].y
            })
            .collect();
        for pair in flats.windows(2) {
            assert_eq!(pair[0], -pair[1]);
        }
    }

    #[test]
    fn test_flank_matches_pressure_angle() {
        let rack = build_rack(&RackSpec::new(10.0, 2.0, 20.0)).unwrap();
        let n = rack.points.len();
        // First flank right of center, going from tip down to root
        let a = rack.points[n / 2];
        let b = rack.points[n / 2 + 1];
        assert_relative_eq!(
            (b.x - a.x) / (a.y - b.y),
            20f64.to_radians().tan(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_short_rack_still_has_a_tooth() {
        let rack = build_rack(&RackSpec::new(0.5, 1.0, 20.0)).unwrap();
        assert_eq!(rack.instance_count, 1);
        assert_eq!(rack.points.len(), 10);
    }

    #[test]
    fn test_steep_pressure_angle_has_no_tip() {
        let err = build_rack(&RackSpec::new(50.0, 1.0, 40.0)).unwrap_err();
        assert!(matches!(
            err,
            GearError::DegenerateGeometry {
                quantity: "tip_width",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_invalid_rack() {
        let err = build_rack(&RackSpec::new(50.0, 0.0, 20.0)).unwrap_err();
        assert!(matches!(err, GearError::InvalidParameter { field: "module", .. }));
    }
}
