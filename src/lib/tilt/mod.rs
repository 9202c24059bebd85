//! Conical tilt, which maps a flat profile onto the back cone of a bevel gear.
use nalgebra::Point3;

/// Tilt `pt` around the circle of diameter `circle_diam` in the xy plane, by `angle` degrees.
///
/// Points keep their signed distance `d` from the circle, but that distance is rotated out of the
/// plane: the radial part shrinks to `d * cos(angle)` and `d * sin(angle)` becomes the height.
/// Points outside the circle lift towards +z, points inside drop towards -z.
pub fn tilt_point(pt: &Point3<f64>, angle: f64, circle_diam: f64) -> Point3<f64> {
    if angle == 0.0 {
        return *pt;
    }

    let angle = angle.to_radians();
    let circle_r = circle_diam / 2.0;
    let r = pt.coords.xy().norm();
    let dist_to_circle = r - circle_r;
    let z = dist_to_circle * angle.sin();
    // Only the gear axis itself has no direction to scale along
    if r == 0.0 {
        return Point3::new(0.0, 0.0, z);
    }
    let scale = (circle_r + dist_to_circle * angle.cos()) / (circle_r + dist_to_circle);

    Point3::new(scale * pt.x, scale * pt.y, z)
}

/// [`tilt_point`] with its angle and circle fixed, for one gear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicalTilt {
    /// Half the cone angle, in degrees
    pub cone_half_angle: f64,
    pub pitch_diameter: f64,
}

impl ConicalTilt {
    pub fn new(cone_half_angle: f64, pitch_diameter: f64) -> Self {
        ConicalTilt {
            cone_half_angle,
            pitch_diameter,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.cone_half_angle == 0.0
    }

    pub fn apply(&self, pt: &Point3<f64>) -> Point3<f64> {
        tilt_point(pt, self.cone_half_angle, self.pitch_diameter)
    }
}
