use serde::{Deserialize, Serialize};

/// One stored export artifact as listed by `GET exports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub id: String,
    pub name: String,
    pub video_path: String,
    #[serde(default)]
    pub camera: String,
    /// Epoch seconds of the export's start
    #[serde(default)]
    pub date: f64,
    #[serde(default)]
    pub thumb_path: String,
    #[serde(default)]
    pub in_progress: bool,
}

impl Export {
    /// Label shown in cards and the viewer title
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Storage-level identifier used by delete and rename
    pub fn file(&self) -> &str {
        &self.id
    }

    pub fn video_url(&self, base_url: &str, media_root: &str) -> String {
        servable_url(base_url, media_root, &self.video_path)
    }

    pub fn thumbnail_url(&self, base_url: &str, media_root: &str) -> Option<String> {
        if self.thumb_path.is_empty() {
            return None;
        }
        Some(servable_url(base_url, media_root, &self.thumb_path))
    }

    pub fn delete_clip(&self) -> DeleteClip {
        DeleteClip {
            file: self.file().to_string(),
            export_name: self.display_name(),
        }
    }
}

/// Rewrites a backend storage path into a URL served under `base_url`
pub fn servable_url(base_url: &str, media_root: &str, path: &str) -> String {
    format!("{}{}", base_url, path.replacen(media_root, "", 1))
}

/// Delete request awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClip {
    pub file: String,
    pub export_name: String,
}
