//! Whole gears: the single tooth replicated around the axis, plus what the bevel and helical
//! variants need to turn that outline into a surface.
use log::debug;
use nalgebra::Point3;
use std::f64::consts::PI;

use crate::params::{GearSpec, HelixSpec};
use crate::tilt::ConicalTilt;
use crate::tooth::{assemble_tooth, CurveSegment, ToothOutline};
use crate::{degenerate, Result};

/// Reference circle around the gear axis, in the xy plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCircle {
    pub center: Point3<f64>,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GearOutline {
    /// Tooth `k` is tooth 0 rotated by `k` angular pitches, counter-clockwise
    pub teeth: Vec<ToothOutline>,
    /// Pitch circle, if it was asked for
    pub reference: Option<ReferenceCircle>,
}

impl GearOutline {
    /// Every segment of every tooth, in order around the gear
    pub fn segments(&self) -> impl Iterator<Item = &CurveSegment> {
        self.teeth.iter().flat_map(|t| t.segments.iter())
    }

    /// True if the teeth form one loop, with no gap bigger than `tolerance`
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let n = self.teeth.len();
        n > 0
            && self.teeth.iter().all(|t| t.is_chained(tolerance))
            && (0..n).all(|k| {
                let next = &self.teeth[(k + 1) % n];
                (next.start() - self.teeth[k].end()).norm() <= tolerance
            })
    }
}

/// Build the full outline of a gear. A non-zero cone angle tilts every point onto the bevel's
/// back cone.
pub fn build_gear(spec: &GearSpec) -> Result<GearOutline> {
    spec.validate()?;
    let dims = spec.dimensions();
    let tilt = ConicalTilt::new(spec.cone_angle / 2.0, dims.pitch_diameter);
    let tooth = assemble_tooth(spec, |p| tilt.apply(p))?;

    let pitch = spec.angular_pitch();
    let teeth = (0..spec.teeth)
        .map(|k| tooth.rotated(k as f64 * pitch))
        .collect();

    let reference = if spec.pitch_circle {
        Some(ReferenceCircle {
            center: Point3::origin(),
            radius: dims.pitch_diameter / 2.0,
        })
    } else {
        None
    };

    debug!(
        "Built {} tooth gear, module {}, pitch diameter {}",
        spec.teeth, spec.module, dims.pitch_diameter
    );
    Ok(GearOutline { teeth, reference })
}

/// Tip of the pitch cone of a bevel gear, on the gear axis. Bevel surfaces are the gear outline
/// extruded towards this point.
pub fn cone_apex(spec: &GearSpec) -> Result<Point3<f64>> {
    spec.validate()?;
    if !spec.is_bevel() {
        return Err(degenerate("cone_apex", "a cylindrical gear has no cone apex"));
    }
    let height = spec.dimensions().pitch_diameter / 2.0 * (spec.cone_angle / 2.0).to_radians().tan();
    if !height.is_finite() || height.abs() > 1e12 {
        return Err(degenerate(
            "cone_apex",
            format!("a {} degree cone has its apex at infinity", spec.cone_angle),
        ));
    }
    Ok(Point3::new(0.0, 0.0, height))
}

/// Rail for sweeping a gear outline into a helical gear.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    /// Radius of the rail, the pitch radius of the gear
    pub radius: f64,
    /// Rise of the rail along +z
    pub height: f64,
    /// Axial distance for one full turn. None for a straight (spur) sweep.
    pub pitch: Option<f64>,
    /// Turns over `height`, negative for a left-handed helix
    pub turns: f64,
}

impl Helix {
    /// Total twist of the profile between the bottom and top face, in radians
    pub fn twist(&self) -> f64 {
        self.turns * 2.0 * PI
    }
}

pub fn helix(spec: &GearSpec, helix: &HelixSpec) -> Result<Helix> {
    spec.validate()?;
    helix.validate()?;
    let radius = spec.dimensions().pitch_diameter / 2.0;

    if helix.helix_angle == 0.0 {
        return Ok(Helix {
            radius,
            height: helix.thickness,
            pitch: None,
            turns: 0.0,
        });
    }

    let circumference = spec.teeth as f64 * spec.module * PI;
    let pitch = (circumference / helix.helix_angle.to_radians().tan()).abs();
    let mut turns = helix.thickness / pitch;
    if helix.helix_angle < 0.0 {
        // Left handed helix
        turns = -turns;
    }

    debug!("Helix pitch {pitch}, {turns} turns over {}", helix.thickness);
    Ok(Helix {
        radius,
        height: helix.thickness,
        pitch: Some(pitch),
        turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotate_z;
    use crate::GearError;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    fn points_equal(p1: &Point3<f64>, p2: &Point3<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    #[test]
    fn test_one_copy_per_tooth() {
        for teeth in [4, 7, 30, 61] {
            let gear = build_gear(&GearSpec::new(teeth, 1.0, 20.0)).unwrap();
            assert_eq!(gear.teeth.len(), teeth as usize);
            assert!(gear.reference.is_none());
        }
    }

    #[test]
    fn test_teeth_are_evenly_spaced() {
        let spec = GearSpec::new(12, 2.0, 20.0);
        let gear = build_gear(&spec).unwrap();
        let step = (360.0f64 / 12.0).to_radians();
        for pair in gear.teeth.windows(2) {
            let expected = pair[0].rotated(step);
            for (a, b) in expected.segments.iter().zip(pair[1].segments.iter()) {
                assert!(points_equal(&a.start(), &b.start()));
                assert!(points_equal(&a.end(), &b.end()));
            }
        }
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let spec = GearSpec::new(9, 1.0, 20.0);
        let gear = build_gear(&spec).unwrap();
        let first = &gear.teeth[0];
        let mut tooth = first.clone();
        for _ in 0..spec.teeth {
            tooth = tooth.rotated(spec.angular_pitch());
        }
        for (a, b) in tooth.segments.iter().zip(first.segments.iter()) {
            assert!(points_equal(&a.start(), &b.start()));
            assert!(points_equal(&a.end(), &b.end()));
        }
    }

    #[test]
    fn test_outline_is_one_loop() {
        for spec in [
            GearSpec::new(30, 1.0, 20.0),
            GearSpec::new(80, 0.5, 14.5),
            GearSpec::bevel(16, 1.0, 20.0),
        ] {
            let gear = build_gear(&spec).unwrap();
            assert!(gear.is_closed(EPSILON));
        }
    }

    #[test]
    fn test_pitch_circle_reference() {
        let spec = GearSpec {
            pitch_circle: true,
            ..GearSpec::new(30, 1.0, 20.0)
        };
        let gear = build_gear(&spec).unwrap();
        let reference = gear.reference.unwrap();
        assert_relative_eq!(reference.radius, 15.0);
        assert_eq!(reference.center, Point3::origin());
    }

    #[test]
    fn test_cylindrical_gear_is_flat() {
        let gear = build_gear(&GearSpec::new(20, 1.0, 20.0)).unwrap();
        assert!(gear.segments().all(|s| s.start().z == 0.0 && s.end().z == 0.0));
    }

    #[test]
    fn test_bevel_gear_leaves_the_plane() {
        let spec = GearSpec::bevel(20, 1.0, 20.0);
        let gear = build_gear(&spec).unwrap();
        assert!(gear.segments().any(|s| s.start().z > 0.0));
        assert!(gear.segments().any(|s| s.start().z < 0.0));
        // Tilting commutes with rotation about the axis
        let t0 = gear.teeth[0].start();
        let t5 = gear.teeth[5].start();
        assert!(points_equal(&rotate_z(&t0, 5.0 * spec.angular_pitch()), &t5));
    }

    #[test]
    fn test_rejects_bad_specs() {
        let err = build_gear(&GearSpec::new(3, 1.0, 20.0)).unwrap_err();
        assert!(matches!(err, GearError::InvalidParameter { field: "teeth", .. }));
        let err = build_gear(&GearSpec::new(30, 1.0, 50.0)).unwrap_err();
        assert!(matches!(
            err,
            GearError::InvalidParameter {
                field: "pressure_angle",
                ..
            }
        ));
    }

    #[test]
    fn test_cone_apex() {
        let apex = cone_apex(&GearSpec::bevel(30, 1.0, 20.0)).unwrap();
        // 90 degree cone, so the apex is one pitch radius up
        assert!(points_equal(&apex, &Point3::new(0.0, 0.0, 15.0)));

        let spec = GearSpec {
            cone_angle: 60.0,
            ..GearSpec::new(20, 2.0, 20.0)
        };
        let apex = cone_apex(&spec).unwrap();
        assert_relative_eq!(apex.z, 20.0 * 30f64.to_radians().tan(), epsilon = EPSILON);

        assert!(cone_apex(&GearSpec::default()).is_err());
        let flat = GearSpec {
            cone_angle: 180.0,
            ..Default::default()
        };
        assert!(matches!(
            cone_apex(&flat).unwrap_err(),
            GearError::DegenerateGeometry {
                quantity: "cone_apex",
                ..
            }
        ));
    }

    #[test]
    fn test_helix() {
        let spec = GearSpec::new(30, 1.0, 20.0);
        let h = helix(
            &spec,
            &HelixSpec {
                helix_angle: 45.0,
                thickness: 10.0,
            },
        )
        .unwrap();
        assert_relative_eq!(h.radius, 15.0);
        assert_relative_eq!(h.pitch.unwrap(), 30.0 * PI, epsilon = 1e-9);
        assert_relative_eq!(h.turns, 10.0 / (30.0 * PI), epsilon = 1e-12);
        assert_relative_eq!(h.twist(), 2.0 * 10.0 / 30.0, epsilon = 1e-12);

        let left = helix(
            &spec,
            &HelixSpec {
                helix_angle: -45.0,
                thickness: 10.0,
            },
        )
        .unwrap();
        assert_relative_eq!(left.pitch.unwrap(), h.pitch.unwrap());
        assert_relative_eq!(left.turns, -h.turns);
    }

    #[test]
    fn test_straight_helix() {
        let h = helix(
            &GearSpec::default(),
            &HelixSpec {
                helix_angle: 0.0,
                thickness: 4.0,
            },
        )
        .unwrap();
        assert_eq!(h.pitch, None);
        assert_eq!(h.turns, 0.0);
        assert_eq!(h.height, 4.0);
    }
}
