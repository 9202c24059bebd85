//! Involute gear and rack profile generation.
//!
//! Everything here is computed in the gear's local frame: the gear axis is z, and tooth 0 is
//! centered on the +y axis. Placing the result into a world frame, turning curves into splines or
//! solids, is the job of a [`backend::GeometryBackend`].
use thiserror::Error;

pub mod backend;
pub mod gear;
mod geometry;
pub mod involute;
pub mod params;
pub mod rack;
pub mod svg;
pub mod tilt;
pub mod tooth;

pub use gear::{build_gear, cone_apex, helix, GearOutline, Helix, ReferenceCircle};
pub use involute::involute_points;
pub use params::{GearSpec, HelixSpec, RackSpec};
pub use rack::{build_rack, RackProfile};
pub use tilt::{tilt_point, ConicalTilt};
pub use tooth::{assemble_tooth, CurveSegment, ToothOutline};

/// Why a profile could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GearError {
    /// A caller-supplied parameter is out of range.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// The parameters are individually fine, but a derived quantity makes the profile impossible.
    #[error("degenerate geometry, {quantity}: {reason}")]
    DegenerateGeometry {
        quantity: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, GearError>;

pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> GearError {
    GearError::InvalidParameter {
        field,
        reason: reason.into(),
    }
}

pub(crate) fn degenerate(quantity: &'static str, reason: impl Into<String>) -> GearError {
    GearError::DegenerateGeometry {
        quantity,
        reason: reason.into(),
    }
}
