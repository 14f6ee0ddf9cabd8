use crate::transform;
use crate::types::{OrientationSample, TransformConfig, TransformResult};

/// Whether a pivot reading has been captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uncalibrated,
    Calibrated,
}

/// Tracks the pivot (zero) reading across a stream of samples.
///
/// The first sample after creation or after [`reset`](Self::reset) becomes
/// the pivot. The pivot is captured whether or not calibration is enabled;
/// the config only decides whether it is subtracted.
#[derive(Debug, Clone)]
pub struct OrientationSession {
    config: TransformConfig,
    /// Pivot reading. Replaced wholesale, never edited.
    reference: Option<OrientationSample>,
    /// Latest raw reading.
    origin: OrientationSample,
    /// Result for the latest reading.
    latest: Option<TransformResult>,
}

impl OrientationSession {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            reference: None,
            origin: OrientationSample::ZERO,
            latest: None,
        }
    }

    /// Process one raw sample.
    pub fn on_sample(&mut self, raw: OrientationSample) -> TransformResult {
        self.origin = raw;

        let reference = match self.reference {
            Some(reference) => reference,
            None => {
                tracing::debug!(
                    alpha = ?raw.alpha,
                    beta = ?raw.beta,
                    gamma = ?raw.gamma,
                    "Pivot orientation captured"
                );
                *self.reference.insert(raw)
            }
        };

        let result = transform::compute(&raw, Some(&reference), &self.config);
        self.latest = Some(result);
        result
    }

    /// Drop the pivot. The next sample becomes the new one.
    pub fn reset(&mut self) {
        if self.reference.take().is_some() {
            tracing::debug!("Pivot orientation reset");
        }
    }

    pub fn state(&self) -> SessionState {
        match self.reference {
            Some(_) => SessionState::Calibrated,
            None => SessionState::Uncalibrated,
        }
    }

    pub fn reference(&self) -> Option<&OrientationSample> {
        self.reference.as_ref()
    }

    /// Latest raw reading, `{0, 0, 0}` before the first sample.
    pub fn origin_orientation(&self) -> &OrientationSample {
        &self.origin
    }

    /// Result for the latest reading, `None` before the first sample.
    pub fn latest(&self) -> Option<&TransformResult> {
        self.latest.as_ref()
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }
}

impl Default for OrientationSession {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}
