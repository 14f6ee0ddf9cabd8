use crate::types::{OrientationSample, RotationDescriptor, TransformConfig, TransformResult};

/// Turn one raw sample into a corrected orientation and a rotation.
///
/// With calibration enabled and a pivot present, the pivot is subtracted
/// component-wise and every component of the corrected orientation becomes
/// known. Otherwise the raw sample is passed through as-is, unknown
/// components included. Axis directions are applied afterwards:
/// `beta` drives X, `gamma` drives Y and `alpha` drives Z.
pub fn compute(
    raw: &OrientationSample,
    reference: Option<&OrientationSample>,
    config: &TransformConfig,
) -> TransformResult {
    let corrected = match reference {
        Some(pivot) if config.enable_calibration => OrientationSample::new(
            raw.alpha_or_zero() - pivot.alpha_or_zero(),
            raw.beta_or_zero() - pivot.beta_or_zero(),
            raw.gamma_or_zero() - pivot.gamma_or_zero(),
        ),
        _ => *raw,
    };

    let rotation = RotationDescriptor {
        x: config.direction_x.apply(corrected.beta_or_zero()),
        y: config.direction_y.apply(corrected.gamma_or_zero()),
        z: config.direction_z.apply(corrected.alpha_or_zero()),
    };

    TransformResult {
        corrected,
        rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AxisDirection;

    fn uncalibrated() -> TransformConfig {
        TransformConfig {
            enable_calibration: false,
            ..TransformConfig::default()
        }
    }

    fn all_normal() -> TransformConfig {
        TransformConfig {
            enable_calibration: false,
            direction_x: AxisDirection::Normal,
            direction_y: AxisDirection::Normal,
            direction_z: AxisDirection::Normal,
        }
    }

    #[test]
    fn calibration_disabled_passes_raw_through() {
        let raw = OrientationSample::new(10.0, 20.0, 30.0);
        let pivot = OrientationSample::new(1.0, 2.0, 3.0);

        let result = compute(&raw, Some(&pivot), &uncalibrated());
        assert_eq!(result.corrected, raw);
    }

    #[test]
    fn calibration_without_pivot_passes_raw_through() {
        let raw = OrientationSample::new(10.0, 20.0, 30.0);
        let result = compute(&raw, None, &TransformConfig::default());
        assert_eq!(result.corrected, raw);
    }

    #[test]
    fn sample_equal_to_pivot_is_zeroed() {
        let raw = OrientationSample::new(123.5, -45.0, 7.25);
        let result = compute(&raw, Some(&raw), &TransformConfig::default());

        assert_eq!(result.corrected, OrientationSample::ZERO);
        assert_eq!(
            result.rotation.to_string(),
            "rotateX(0deg) rotateY(0deg) rotateZ(0deg)"
        );
    }

    #[test]
    fn pivot_is_subtracted_component_wise() {
        let raw = OrientationSample::new(15.0, 25.0, 35.0);
        let pivot = OrientationSample::new(5.0, 5.0, 5.0);

        let result = compute(&raw, Some(&pivot), &TransformConfig::default());
        assert_eq!(result.corrected, OrientationSample::new(10.0, 20.0, 30.0));
        assert_eq!(
            result.rotation.to_string(),
            "rotateX(20deg) rotateY(-30deg) rotateZ(-10deg)"
        );
    }

    #[test]
    fn unknown_components_subtract_as_zero() {
        let raw = OrientationSample {
            alpha: None,
            beta: Some(10.0),
            gamma: Some(4.0),
        };
        let pivot = OrientationSample {
            alpha: Some(3.0),
            beta: None,
            gamma: Some(f64::NAN),
        };

        let result = compute(&raw, Some(&pivot), &TransformConfig::default());
        assert_eq!(result.corrected, OrientationSample::new(-3.0, 10.0, 4.0));
    }

    #[test]
    fn infinite_components_never_reach_output() {
        let raw = OrientationSample {
            alpha: Some(f64::INFINITY),
            beta: Some(f64::NEG_INFINITY),
            gamma: Some(12.0),
        };

        let calibrated = compute(&raw, Some(&raw), &TransformConfig::default());
        assert_eq!(calibrated.corrected, OrientationSample::ZERO);

        let passthrough = compute(&raw, None, &uncalibrated());
        assert_eq!(
            passthrough.rotation.to_string(),
            "rotateX(0deg) rotateY(-12deg) rotateZ(0deg)"
        );
    }

    #[test]
    fn axis_mapping_uses_default_directions() {
        let raw = OrientationSample::new(10.0, 20.0, 30.0);
        let result = compute(&raw, None, &uncalibrated());

        assert_eq!(
            result.rotation.to_string(),
            "rotateX(20deg) rotateY(-30deg) rotateZ(-10deg)"
        );
    }

    #[test]
    fn reversing_each_axis_negates_only_that_axis() {
        let raw = OrientationSample::new(10.0, 20.0, 30.0);
        let base = compute(&raw, None, &all_normal()).rotation;
        assert_eq!(
            base,
            RotationDescriptor {
                x: 20.0,
                y: 30.0,
                z: 10.0
            }
        );

        let flipped_x = TransformConfig {
            direction_x: AxisDirection::Reverse,
            ..all_normal()
        };
        let r = compute(&raw, None, &flipped_x).rotation;
        assert_eq!((r.x, r.y, r.z), (-base.x, base.y, base.z));

        let flipped_y = TransformConfig {
            direction_y: AxisDirection::Reverse,
            ..all_normal()
        };
        let r = compute(&raw, None, &flipped_y).rotation;
        assert_eq!((r.x, r.y, r.z), (base.x, -base.y, base.z));

        let flipped_z = TransformConfig {
            direction_z: AxisDirection::Reverse,
            ..all_normal()
        };
        let r = compute(&raw, None, &flipped_z).rotation;
        assert_eq!((r.x, r.y, r.z), (base.x, base.y, -base.z));
    }

    #[test]
    fn direction_applies_after_calibration() {
        let raw = OrientationSample::new(0.0, 50.0, 0.0);
        let pivot = OrientationSample::new(0.0, 80.0, 0.0);
        let config = TransformConfig {
            enable_calibration: true,
            direction_x: AxisDirection::Reverse,
            ..all_normal()
        };

        // (50 - 80) reversed, not (-50) - 80.
        let result = compute(&raw, Some(&pivot), &config);
        assert_eq!(result.rotation.x, 30.0);
    }

    #[test]
    fn unknown_components_stay_unknown_when_uncalibrated() {
        let raw = OrientationSample {
            alpha: None,
            beta: Some(10.0),
            gamma: None,
        };

        let result = compute(&raw, None, &uncalibrated());
        assert_eq!(result.corrected, raw);
        assert_eq!(
            result.rotation.to_string(),
            "rotateX(10deg) rotateY(0deg) rotateZ(0deg)"
        );
    }
}
