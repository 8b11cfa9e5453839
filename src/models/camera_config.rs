use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subset of the backend `config` object this crate reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub cameras: Map<String, Value>,
}

impl CameraConfig {
    /// Camera names offered by the create-export selector
    pub fn camera_names(&self) -> Vec<String> {
        self.cameras.keys().cloned().collect()
    }

    pub fn has_camera(&self, name: &str) -> bool {
        self.cameras.contains_key(name)
    }
}
