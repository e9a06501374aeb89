//! Camera records served by `/api/cameras`

use serde::{Deserialize, Deserializer, Serialize};

/// One playable stream of a camera
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamSource {
    pub src: String,
}

/// Physical camera as described by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Camera {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub storage_host: String,
    #[serde(default)]
    pub streams: Vec<StreamSource>,
}

/// Which of the camera's streams a panel plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSlot {
    /// Front camera, `streams[0]`
    Front,
    /// Bird's-eye view, `streams[1]`
    BirdsEye,
}

impl StreamSlot {
    pub fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::BirdsEye => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Front => "Camera Feed",
            Self::BirdsEye => "Bird's View",
        }
    }
}

impl Camera {
    /// Source URL of the given stream, if the camera has it
    pub fn stream(&self, slot: StreamSlot) -> Option<&str> {
        self.streams.get(slot.index()).map(|s| s.src.as_str())
    }

    /// URL of the objects log for `date` (`YYYY-MM-DD`)
    pub fn objects_log_url(&self, date: &str) -> String {
        format!(
            "{}/static/data/{}/objects_log/{}.csv",
            self.storage_host.trim_end_matches('/'),
            self.id,
            date
        )
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
