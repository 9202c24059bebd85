//! Handing profiles to a geometry engine.
//!
//! The profile math only produces points and segment descriptions. Fitting splines, joining
//! curves and building surfaces is left to whatever implements [`GeometryBackend`]: a CAD kernel,
//! or the pure-data [`FlattenBackend`] used by the command line tools.
use anyhow::{Context, Result};
use log::debug;
use nalgebra::Point3;

use crate::gear::{build_gear, cone_apex, helix, Helix};
use crate::params::{GearSpec, HelixSpec, RackSpec};
use crate::rack::build_rack;
use crate::tooth::CurveSegment;
use crate::invalid;

mod flatten;
pub use flatten::{FlattenBackend, Polyline, SurfaceRecipe};

/// Curve and surface construction that the profile drivers rely on.
pub trait GeometryBackend {
    type Curve;
    type Surface;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Smooth curve of `degree` through `points`, in order
    fn curve_fit(&mut self, points: &[Point3<f64>], degree: u32) -> Result<Self::Curve, Self::Error>;

    /// Circular arc from `start` to `end` passing through `through`
    fn arc_through_3_points(
        &mut self,
        start: &Point3<f64>,
        end: &Point3<f64>,
        through: &Point3<f64>,
    ) -> Result<Self::Curve, Self::Error>;

    fn line(&mut self, start: &Point3<f64>, end: &Point3<f64>) -> Result<Self::Curve, Self::Error>;

    fn polyline(&mut self, points: &[Point3<f64>]) -> Result<Self::Curve, Self::Error>;

    /// Full circle in the xy plane
    fn circle(&mut self, center: &Point3<f64>, radius: f64) -> Result<Self::Curve, Self::Error>;

    /// Stitch curves that meet end to start into one curve
    fn join_curves(&mut self, curves: Vec<Self::Curve>) -> Result<Self::Curve, Self::Error>;

    /// Ruled surface from `profile` to a single point
    fn extrude_to_point(
        &mut self,
        profile: &Self::Curve,
        apex: &Point3<f64>,
    ) -> Result<Self::Surface, Self::Error>;

    /// Straight extrusion of `profile` along the vector from `start` to `end`
    fn extrude_straight(
        &mut self,
        profile: &Self::Curve,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Result<Self::Surface, Self::Error>;

    /// Sweep `profile` up the gear axis, twisting it to follow `helix`
    fn sweep_along_helix(
        &mut self,
        profile: &Self::Curve,
        helix: &Helix,
    ) -> Result<Self::Surface, Self::Error>;
}

/// A gear outline as backend curves
#[derive(Debug)]
pub struct GearCurves<C> {
    pub gear: C,
    pub pitch_circle: Option<C>,
}

/// A gear as backend surfaces. `pitch` is the pitch cone or cylinder, if asked for.
#[derive(Debug)]
pub struct GearSurfaces<S> {
    pub gear: S,
    pub pitch: Option<S>,
}

pub fn draw_segment<B: GeometryBackend>(backend: &mut B, seg: &CurveSegment) -> Result<B::Curve> {
    match seg {
        CurveSegment::Interpolated { points, degree } => backend
            .curve_fit(points, *degree)
            .context("fitting involute flank"),
        CurveSegment::Arc3Point {
            start,
            end,
            through,
        } => backend
            .arc_through_3_points(start, end, through)
            .context("building tooth arc"),
        CurveSegment::Line { start, end } => {
            backend.line(start, end).context("building dedendum line")
        }
    }
}

/// Draw a gear as one closed curve, plus its pitch circle if `spec.pitch_circle` is set
pub fn draw_gear<B: GeometryBackend>(spec: &GearSpec, backend: &mut B) -> Result<GearCurves<B::Curve>> {
    let outline = build_gear(spec)?;
    let curves = outline
        .segments()
        .map(|seg| draw_segment(backend, seg))
        .collect::<Result<Vec<_>>>()?;
    debug!("Joining {} curves", curves.len());
    let gear = backend.join_curves(curves).context("joining gear outline")?;

    let pitch_circle = match &outline.reference {
        Some(circle) => Some(
            backend
                .circle(&circle.center, circle.radius)
                .context("building pitch circle")?,
        ),
        None => None,
    };

    Ok(GearCurves { gear, pitch_circle })
}

/// Bevel gear surface: the tilted outline extruded to the cone apex, and optionally the pitch cone
pub fn draw_bevel_gear<B: GeometryBackend>(
    spec: &GearSpec,
    backend: &mut B,
) -> Result<GearSurfaces<B::Surface>> {
    let apex = cone_apex(spec)?;
    let curves = draw_gear(spec, backend)?;
    let gear = backend
        .extrude_to_point(&curves.gear, &apex)
        .context("extruding bevel gear to cone apex")?;
    let pitch = match &curves.pitch_circle {
        Some(circle) => Some(
            backend
                .extrude_to_point(circle, &apex)
                .context("extruding pitch cone")?,
        ),
        None => None,
    };
    Ok(GearSurfaces { gear, pitch })
}

/// Helical gear surface: the flat outline swept along a helix, and optionally the pitch cylinder
pub fn draw_helical_gear<B: GeometryBackend>(
    spec: &GearSpec,
    helix_spec: &HelixSpec,
    backend: &mut B,
) -> Result<GearSurfaces<B::Surface>> {
    if spec.is_bevel() {
        return Err(invalid("cone_angle", "a helical gear must be cylindrical").into());
    }
    let rail = helix(spec, helix_spec)?;
    let curves = draw_gear(spec, backend)?;
    let bottom = Point3::origin();
    let top = Point3::new(0.0, 0.0, helix_spec.thickness);

    let gear = if rail.pitch.is_some() {
        backend
            .sweep_along_helix(&curves.gear, &rail)
            .context("sweeping helical gear")?
    } else {
        backend
            .extrude_straight(&curves.gear, &bottom, &top)
            .context("extruding spur gear")?
    };
    let pitch = match &curves.pitch_circle {
        Some(circle) => Some(
            backend
                .extrude_straight(circle, &bottom, &top)
                .context("extruding pitch cylinder")?,
        ),
        None => None,
    };
    Ok(GearSurfaces { gear, pitch })
}

pub fn draw_rack<B: GeometryBackend>(spec: &RackSpec, backend: &mut B) -> Result<B::Curve> {
    let rack = build_rack(spec)?;
    backend.polyline(&rack.points).context("building rack polyline")
}
