use serde::{Deserialize, Serialize};
use tilt_orientation::types::TransformConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Calibration and per-axis direction settings.
    pub orientation: TransformConfig,
    /// Where orientation samples come from.
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// TCP address of the sample producer, e.g. `127.0.0.1:7878`.
    /// `None` means the environment has no orientation sensor.
    pub address: Option<String>,
}
