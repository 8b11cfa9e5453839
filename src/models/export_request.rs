use serde::{Deserialize, Serialize};

/// Playback mode requested for a new export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    #[default]
    Realtime,
    #[serde(rename = "timelapse_25x")]
    Timelapse25x,
}

impl ExportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Timelapse25x => "timelapse_25x",
        }
    }

    pub fn speed_factor(&self) -> u32 {
        match self {
            Self::Realtime => 1,
            Self::Timelapse25x => 25,
        }
    }

    /// Timelapse output is rendered without audio
    pub fn has_audio(&self) -> bool {
        matches!(self, Self::Realtime)
    }
}

/// Validated create-export request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExportRequest {
    pub camera: String,
    pub name: String,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub mode: ExportMode,
}

impl CreateExportRequest {
    pub fn body(&self) -> ExportBody<'_> {
        ExportBody {
            playback: self.mode,
            name: &self.name,
        }
    }
}

/// JSON body of `POST export/{camera}/start/{start}/end/{end}`
#[derive(Debug, Serialize)]
pub struct ExportBody<'a> {
    pub playback: ExportMode,
    pub name: &'a str,
}
