use nalgebra::Point3;

use super::GeometryBackend;
use crate::gear::Helix;
use crate::geometry::{arc_points, catmull_rom, circle_points};
use crate::{degenerate, GearError};

pub type Polyline = Vec<Point3<f64>>;

/// What a surface would be built from. The flattening backend stops at this description.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceRecipe {
    ExtrudeToPoint {
        profile: Polyline,
        apex: Point3<f64>,
    },
    ExtrudeStraight {
        profile: Polyline,
        start: Point3<f64>,
        end: Point3<f64>,
    },
    Sweep {
        profile: Polyline,
        helix: Helix,
    },
}

impl SurfaceRecipe {
    /// The flattened curve the surface is built from
    pub fn profile(&self) -> &Polyline {
        match self {
            SurfaceRecipe::ExtrudeToPoint { profile, .. } => profile,
            SurfaceRecipe::ExtrudeStraight { profile, .. } => profile,
            SurfaceRecipe::Sweep { profile, .. } => profile,
        }
    }
}

/// Backend that turns every curve into a polyline. Good enough for drawings and previews, and
/// has no dependencies on a CAD kernel.
#[derive(Debug, Clone)]
pub struct FlattenBackend {
    /// Straight pieces per circular arc
    pub arc_segments: usize,
    /// Straight pieces between each pair of interpolated points
    pub spline_segments: usize,
    /// Straight pieces in a full circle
    pub circle_segments: usize,
    /// Largest gap allowed between curves being joined
    pub join_tolerance: f64,
}

impl Default for FlattenBackend {
    fn default() -> Self {
        FlattenBackend {
            arc_segments: 8,
            spline_segments: 4,
            circle_segments: 180,
            join_tolerance: 1e-6,
        }
    }
}

impl GeometryBackend for FlattenBackend {
    type Curve = Polyline;
    type Surface = SurfaceRecipe;
    type Error = GearError;

    fn curve_fit(&mut self, points: &[Point3<f64>], degree: u32) -> Result<Polyline, GearError> {
        if points.len() < 2 {
            return Err(degenerate("curve", "need at least two points to fit a curve"));
        }
        if degree <= 1 {
            return Ok(points.to_vec());
        }
        Ok(catmull_rom(points, self.spline_segments))
    }

    fn arc_through_3_points(
        &mut self,
        start: &Point3<f64>,
        end: &Point3<f64>,
        through: &Point3<f64>,
    ) -> Result<Polyline, GearError> {
        arc_points(start, end, through, self.arc_segments)
            .ok_or_else(|| degenerate("arc", "the three points are collinear"))
    }

    fn line(&mut self, start: &Point3<f64>, end: &Point3<f64>) -> Result<Polyline, GearError> {
        Ok(vec![*start, *end])
    }

    fn polyline(&mut self, points: &[Point3<f64>]) -> Result<Polyline, GearError> {
        if points.len() < 2 {
            return Err(degenerate("polyline", "need at least two points"));
        }
        Ok(points.to_vec())
    }

    fn circle(&mut self, center: &Point3<f64>, radius: f64) -> Result<Polyline, GearError> {
        if !(radius > 0.0) {
            return Err(degenerate("circle", format!("radius must be positive, got {radius}")));
        }
        Ok(circle_points(center, radius, self.circle_segments))
    }

    fn join_curves(&mut self, curves: Vec<Polyline>) -> Result<Polyline, GearError> {
        let mut joined: Polyline = Vec::new();
        for (i, curve) in curves.into_iter().enumerate() {
            let gap = match (joined.last(), curve.first()) {
                (Some(last), Some(first)) => Some((first - last).norm()),
                _ => None,
            };
            match gap {
                Some(gap) => {
                    if gap > self.join_tolerance {
                        return Err(degenerate(
                            "join",
                            format!("curve {i} starts {gap} away from the end of curve {}", i - 1),
                        ));
                    }
                    joined.extend_from_slice(&curve[1..]);
                }
                None => joined.extend(curve),
            }
        }
        Ok(joined)
    }

    fn extrude_to_point(
        &mut self,
        profile: &Polyline,
        apex: &Point3<f64>,
    ) -> Result<SurfaceRecipe, GearError> {
        Ok(SurfaceRecipe::ExtrudeToPoint {
            profile: profile.clone(),
            apex: *apex,
        })
    }

    fn extrude_straight(
        &mut self,
        profile: &Polyline,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Result<SurfaceRecipe, GearError> {
        Ok(SurfaceRecipe::ExtrudeStraight {
            profile: profile.clone(),
            start: *start,
            end: *end,
        })
    }

    fn sweep_along_helix(&mut self, profile: &Polyline, helix: &Helix) -> Result<SurfaceRecipe, GearError> {
        Ok(SurfaceRecipe::Sweep {
            profile: profile.clone(),
            helix: helix.clone(),
        })
    }
}
