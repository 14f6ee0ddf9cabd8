use glam::{Mat4, Quat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw device orientation reading, in degrees.
///
/// Any component may be unknown. Unknown and non-finite (`NaN`, `inf`)
/// components count as 0 in every calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Rotation around the device Z axis (0..360).
    pub alpha: Option<f64>,
    /// Front-to-back tilt, around the device X axis (-180..180).
    pub beta: Option<f64>,
    /// Left-to-right tilt, around the device Y axis (-90..90).
    pub gamma: Option<f64>,
}

impl OrientationSample {
    /// Level device: every component known and zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    pub fn alpha_or_zero(&self) -> f64 {
        or_zero(self.alpha)
    }

    pub fn beta_or_zero(&self) -> f64 {
        or_zero(self.beta)
    }

    pub fn gamma_or_zero(&self) -> f64 {
        or_zero(self.gamma)
    }
}

fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Sign applied to one output rotation axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    #[default]
    #[serde(alias = "None")]
    Normal,
    Reverse,
}

impl AxisDirection {
    pub fn apply(self, degrees: f64) -> f64 {
        match self {
            AxisDirection::Normal => degrees,
            AxisDirection::Reverse => -degrees,
        }
    }
}

/// How raw samples are turned into a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Subtract the first reading (the pivot) from every later reading.
    pub enable_calibration: bool,
    /// Sign of rotation around X (driven by `beta`).
    pub direction_x: AxisDirection,
    /// Sign of rotation around Y (driven by `gamma`).
    pub direction_y: AxisDirection,
    /// Sign of rotation around Z (driven by `alpha`).
    pub direction_z: AxisDirection,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            enable_calibration: true,
            direction_x: AxisDirection::Normal,
            direction_y: AxisDirection::Reverse,
            direction_z: AxisDirection::Reverse,
        }
    }
}

/// Signed rotation angles (degrees) around the screen X, Y and Z axes.
///
/// `Display` renders the CSS transform form
/// `rotateX(<x>deg) rotateY(<y>deg) rotateZ(<z>deg)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationDescriptor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationDescriptor {
    /// Rotation as a quaternion, composed X then Y then Z like the CSS string.
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_x(self.x.to_radians() as f32)
            * Quat::from_rotation_y(self.y.to_radians() as f32)
            * Quat::from_rotation_z(self.z.to_radians() as f32)
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_quat(self.to_quat())
    }
}

impl fmt::Display for RotationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotateX({}deg) rotateY({}deg) rotateZ({}deg)",
            css_number(self.x),
            css_number(self.y),
            css_number(self.z)
        )
    }
}

/// `-0` renders as `0`.
fn css_number(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Output of one transformer call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Orientation after subtracting the pivot (or the raw reading if
    /// calibration was skipped).
    pub corrected: OrientationSample,
    pub rotation: RotationDescriptor,
}
