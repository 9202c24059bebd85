//! Outline of a single gear tooth.
//!
//! A tooth is a chain of curve segments, each starting where the previous one ends. The chain
//! runs counter-clockwise around the gear axis: up the right flank, over the tip, down the left
//! flank, and across the root to the start of the next tooth. So the end of a tooth is its own
//! start rotated by one angular pitch, and `teeth` rotated copies close into a single loop.
use log::{debug, trace};
use nalgebra::Point3;

use crate::geometry::{mirror_x, rotate_z};
use crate::involute::involute_points;
use crate::params::{Dimensions, GearSpec};
use crate::{degenerate, Result};

/// Degree of the spline a backend should fit through the involute samples
pub const FLANK_DEGREE: u32 = 3;

/// One piece of a tooth outline. Points are in the gear's local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// A smooth curve of the given degree, interpolating `points` in order
    Interpolated {
        points: Vec<Point3<f64>>,
        degree: u32,
    },
    /// A circular arc from `start` to `end`, passing through `through`
    Arc3Point {
        start: Point3<f64>,
        end: Point3<f64>,
        through: Point3<f64>,
    },
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
}

impl CurveSegment {
    pub fn start(&self) -> Point3<f64> {
        match self {
            // Interpolated segments are never built empty
            CurveSegment::Interpolated { points, .. } => points[0],
            CurveSegment::Arc3Point { start, .. } => *start,
            CurveSegment::Line { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point3<f64> {
        match self {
            CurveSegment::Interpolated { points, .. } => points[points.len() - 1],
            CurveSegment::Arc3Point { end, .. } => *end,
            CurveSegment::Line { end, .. } => *end,
        }
    }

    /// Apply `f` to every defining point of the segment
    pub fn map_points<F>(&self, f: F) -> CurveSegment
    where
        F: Fn(&Point3<f64>) -> Point3<f64>,
    {
        match self {
            CurveSegment::Interpolated { points, degree } => CurveSegment::Interpolated {
                points: points.iter().map(&f).collect(),
                degree: *degree,
            },
            CurveSegment::Arc3Point {
                start,
                end,
                through,
            } => CurveSegment::Arc3Point {
                start: f(start),
                end: f(end),
                through: f(through),
            },
            CurveSegment::Line { start, end } => CurveSegment::Line {
                start: f(start),
                end: f(end),
            },
        }
    }

    /// Rotate about the z axis by `angle` radians
    pub fn rotated(&self, angle: f64) -> CurveSegment {
        self.map_points(|p| rotate_z(p, angle))
    }
}

/// The chain of segments making up one tooth, spanning one angular pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothOutline {
    pub segments: Vec<CurveSegment>,
    /// Angle between this tooth and the next, in radians
    pub angular_pitch: f64,
}

impl ToothOutline {
    pub fn start(&self) -> Point3<f64> {
        self.segments[0].start()
    }

    pub fn end(&self) -> Point3<f64> {
        self.segments[self.segments.len() - 1].end()
    }

    pub fn rotated(&self, angle: f64) -> ToothOutline {
        ToothOutline {
            segments: self.segments.iter().map(|s| s.rotated(angle)).collect(),
            angular_pitch: self.angular_pitch,
        }
    }

    /// True if every segment starts within `tolerance` of where the previous one ended
    pub fn is_chained(&self, tolerance: f64) -> bool {
        self.segments
            .windows(2)
            .all(|pair| (pair[1].start() - pair[0].end()).norm() <= tolerance)
    }
}

/// Polar angles that place the involute flank, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlankAngles {
    /// Where the involute leaves the base circle
    pub start: f64,
    /// `start` minus the roll angle at the outside diameter
    pub end: f64,
    /// Roll angle at the root circle, if that is outside the base circle
    pub offset: f64,
}

/// `sqrt((diameter / base)^2 - 1)`, the involute roll parameter at `diameter`
fn roll_parameter(quantity: &'static str, diameter: f64, base: f64) -> Result<f64> {
    let ratio = diameter / base;
    if !(ratio >= 1.0) {
        return Err(degenerate(
            quantity,
            format!("ratio to the base circle diameter is {ratio}, must be at least 1"),
        ));
    }
    Ok((ratio * ratio - 1.0).sqrt())
}

pub fn flank_angles(spec: &GearSpec, dims: &Dimensions) -> Result<FlankAngles> {
    let base = dims.base_circle_diameter;
    if !(base > 0.0) {
        return Err(degenerate(
            "base_circle_diameter",
            format!("must be positive, got {base}"),
        ));
    }
    if !(dims.root_diameter > 0.0) {
        return Err(degenerate(
            "root_diameter",
            format!(
                "dedendum of {} leaves no root circle, got {}",
                dims.dedendum, dims.root_diameter
            ),
        ));
    }

    let start = std::f64::consts::FRAC_PI_2 + (dims.chordal_thickness / dims.pitch_diameter).asin()
        - spec.pressure_angle.to_radians()
        + roll_parameter("pitch_diameter", dims.pitch_diameter, base)?;
    let end = start - roll_parameter("outside_diameter", dims.outside_diameter, base)?;
    let offset = if dims.root_diameter > base {
        roll_parameter("root_diameter", dims.root_diameter, base)?
    } else {
        0.0
    };

    Ok(FlankAngles { start, end, offset })
}

/// Build the outline of tooth 0, which is symmetric about the +y axis.
///
/// `tilt` is applied to every computed point; pass the identity for a cylindrical gear, or a
/// [`crate::ConicalTilt`] for a bevel gear.
pub fn assemble_tooth<F>(spec: &GearSpec, tilt: F) -> Result<ToothOutline>
where
    F: Fn(&Point3<f64>) -> Point3<f64>,
{
    spec.validate()?;
    let dims = spec.dimensions();
    let angles = flank_angles(spec, &dims)?;
    debug!("Tooth dimensions {dims:?}, flank angles {angles:?}");

    // Left flank, from the root end outwards
    let flank: Vec<Point3<f64>> = involute_points(
        dims.base_circle_diameter,
        angles.start,
        angles.end,
        angles.offset,
        spec.involute_samples,
    )?
    .iter()
    .map(&tilt)
    .collect();
    let mirror_flank: Vec<Point3<f64>> = flank.iter().map(mirror_x).collect();

    let flank_inner = flank[0];
    let flank_outer = flank[flank.len() - 1];

    // The involute stops at the base circle, so carry on to the root with a straight line
    let dedendum_end = if dims.root_diameter < dims.base_circle_diameter {
        let root_r = dims.root_diameter / 2.0;
        Some(tilt(&Point3::new(
            root_r * angles.start.cos(),
            root_r * angles.start.sin(),
            0.0,
        )))
    } else {
        None
    };

    let mut segments = Vec::with_capacity(6);
    if let Some(ded) = dedendum_end {
        segments.push(CurveSegment::Line {
            start: mirror_x(&ded),
            end: mirror_x(&flank_inner),
        });
    }
    segments.push(CurveSegment::Interpolated {
        points: mirror_flank,
        degree: FLANK_DEGREE,
    });
    segments.push(CurveSegment::Arc3Point {
        start: mirror_x(&flank_outer),
        end: flank_outer,
        through: tilt(&Point3::new(0.0, dims.outside_diameter / 2.0, 0.0)),
    });
    segments.push(CurveSegment::Interpolated {
        points: flank.iter().rev().cloned().collect(),
        degree: FLANK_DEGREE,
    });
    if let Some(ded) = dedendum_end {
        segments.push(CurveSegment::Line {
            start: flank_inner,
            end: ded,
        });
    }

    // Root fillet across the gap, to where the next tooth starts
    let pitch = spec.angular_pitch();
    let left_root = dedendum_end.unwrap_or(flank_inner);
    let next_start = rotate_z(&mirror_x(&left_root), pitch);
    let root_r = dims.root_diameter / 2.0;
    segments.push(CurveSegment::Arc3Point {
        start: left_root,
        end: next_start,
        through: tilt(&Point3::new(
            -(pitch / 2.0).sin() * root_r,
            (pitch / 2.0).cos() * root_r,
            0.0,
        )),
    });

    trace!("Assembled tooth from {} segments", segments.len());
    Ok(ToothOutline {
        segments,
        angular_pitch: pitch,
    })
}
