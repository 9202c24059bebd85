//! Caller-owned parameter sets, and the dimensions derived from them.
//! Angles are given in degrees, lengths in whatever unit the module is in (usually mm).
use std::f64::consts::PI;
use std::ops::RangeInclusive;

use crate::{invalid, Result};

/// Fewer teeth than this and the involute and base circle stop making sense together.
pub const MIN_TEETH: u32 = 4;
pub const DEFAULT_CLEARANCE: f64 = 0.167;
pub const DEFAULT_INVOLUTE_SAMPLES: usize = 5;

const PRESSURE_ANGLE_RANGE: RangeInclusive<f64> = 0.0..=45.0;
const CONE_ANGLE_RANGE: RangeInclusive<f64> = 0.0..=180.0;
const HELIX_ANGLE_RANGE: RangeInclusive<f64> = -45.0..=45.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GearSpec {
    /// Number of teeth
    pub teeth: u32,
    /// Gear module (pitch diameter / teeth)
    pub module: f64,
    /// Pressure angle, in degrees
    pub pressure_angle: f64,
    /// Full cone angle at the apex, in degrees. 0 for a cylindrical gear.
    pub cone_angle: f64,
    /// Extra dedendum depth, as a fraction of the module
    pub clearance: f64,
    /// Number of steps along each involute flank
    pub involute_samples: usize,
    /// Add the pitch circle to the outline as a reference curve
    pub pitch_circle: bool,
}

impl Default for GearSpec {
    fn default() -> Self {
        GearSpec {
            teeth: 30,
            module: 1.0,
            pressure_angle: 20.0,
            cone_angle: 0.0,
            clearance: DEFAULT_CLEARANCE,
            involute_samples: DEFAULT_INVOLUTE_SAMPLES,
            pitch_circle: false,
        }
    }
}

impl GearSpec {
    pub fn new(teeth: u32, module: f64, pressure_angle: f64) -> Self {
        GearSpec {
            teeth,
            module,
            pressure_angle,
            ..Default::default()
        }
    }

    /// A bevel gear with the interactive default cone angle of 90 degrees
    pub fn bevel(teeth: u32, module: f64, pressure_angle: f64) -> Self {
        GearSpec {
            cone_angle: 90.0,
            ..GearSpec::new(teeth, module, pressure_angle)
        }
    }

    pub fn is_bevel(&self) -> bool {
        self.cone_angle != 0.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.teeth < MIN_TEETH {
            return Err(invalid(
                "teeth",
                format!("need at least {MIN_TEETH} teeth, got {}", self.teeth),
            ));
        }
        positive("module", self.module)?;
        in_range("pressure_angle", self.pressure_angle, PRESSURE_ANGLE_RANGE)?;
        in_range("cone_angle", self.cone_angle, CONE_ANGLE_RANGE)?;
        if !self.clearance.is_finite() || self.clearance < 0.0 {
            return Err(invalid(
                "clearance",
                format!("must be zero or more, got {}", self.clearance),
            ));
        }
        if self.involute_samples < 1 {
            return Err(invalid("involute_samples", "need at least one sample step"));
        }
        Ok(())
    }

    /// Dimensions derived from this spec. Recomputed on every call.
    pub fn dimensions(&self) -> Dimensions {
        let teeth = self.teeth as f64;
        let pitch_diameter = self.module * teeth;
        let addendum = self.module;
        let dedendum = (1.0 + self.clearance) * self.module;
        Dimensions {
            pitch_diameter,
            base_circle_diameter: pitch_diameter * self.pressure_angle.to_radians().cos(),
            addendum,
            dedendum,
            outside_diameter: pitch_diameter + 2.0 * addendum,
            root_diameter: pitch_diameter - 2.0 * dedendum,
            chordal_thickness: pitch_diameter * ((PI / 2.0) / teeth).sin(),
        }
    }

    /// Angle between neighbouring teeth, in radians
    pub fn angular_pitch(&self) -> f64 {
        2.0 * PI / self.teeth as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub pitch_diameter: f64,
    pub base_circle_diameter: f64,
    pub addendum: f64,
    pub dedendum: f64,
    pub outside_diameter: f64,
    pub root_diameter: f64,
    pub chordal_thickness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RackSpec {
    /// Length of the pitch line to cover
    pub length: f64,
    /// Rack module, must match the mating gear
    pub module: f64,
    /// Pressure angle, in degrees
    pub pressure_angle: f64,
}

impl RackSpec {
    pub fn new(length: f64, module: f64, pressure_angle: f64) -> Self {
        RackSpec {
            length,
            module,
            pressure_angle,
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("length", self.length)?;
        positive("module", self.module)?;
        in_range("pressure_angle", self.pressure_angle, PRESSURE_ANGLE_RANGE)
    }

    pub fn circular_pitch(&self) -> f64 {
        self.module * PI
    }

    /// Width of the flat at the tip of each rack tooth
    pub fn tip_width(&self) -> f64 {
        self.circular_pitch() / 2.0 - 2.0 * self.module * self.pressure_angle.to_radians().tan()
    }
}

/// Twist for a helical gear, swept along the gear axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixSpec {
    /// Helix angle, in degrees. Negative for a left-handed helix.
    pub helix_angle: f64,
    /// Face width of the gear, along its axis
    pub thickness: f64,
}

impl Default for HelixSpec {
    fn default() -> Self {
        HelixSpec {
            helix_angle: 15.0,
            thickness: 10.0,
        }
    }
}

impl HelixSpec {
    pub fn validate(&self) -> Result<()> {
        in_range("helix_angle", self.helix_angle, HELIX_ANGLE_RANGE)?;
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(invalid(
                "thickness",
                format!("must be zero or more, got {}", self.thickness),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {v}")))
    }
}

fn in_range(field: &'static str, v: f64, range: RangeInclusive<f64>) -> Result<()> {
    if range.contains(&v) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!(
                "{v} is outside {}..={} degrees",
                range.start(),
                range.end()
            ),
        ))
    }
}
