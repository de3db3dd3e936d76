// Model asset locations and metadata.json parsing.
//
// A model is published as two files under one base location: the network
// topology (`model.json`) and the class metadata (`metadata.json`). The base
// may be a local directory or an http(s) URL.

use serde::Deserialize;
use tracing::debug;

use crate::error::SetupError;
use crate::sign::HandSign;

pub const MODEL_FILE: &str = "model.json";
pub const METADATA_FILE: &str = "metadata.json";

/// The two resolved asset locations for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssets {
    pub model_url: String,
    pub metadata_url: String,
}

impl ModelAssets {
    /// Resolve both asset locations under `base_path`, adding the trailing
    /// separator when it is missing.
    pub fn resolve(base_path: &str) -> Self {
        let base = base_path.trim();
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        ModelAssets {
            model_url: format!("{base}{MODEL_FILE}"),
            metadata_url: format!("{base}{METADATA_FILE}"),
        }
    }
}

/// The subset of the exported `metadata.json` this crate reads.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub labels: Vec<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub image_size: Option<u32>,
}

impl ModelMetadata {
    pub fn parse(text: &str, location: &str) -> Result<Self, SetupError> {
        serde_json::from_str(text).map_err(|e| SetupError::Metadata {
            location: location.to_string(),
            message: e.to_string(),
        })
    }

    /// Map every label onto a hand sign, in label order. Each of the three
    /// signs must appear exactly once.
    pub fn hand_signs(&self, location: &str) -> Result<Vec<HandSign>, SetupError> {
        let mut signs = Vec::with_capacity(self.labels.len());
        for label in &self.labels {
            let sign = HandSign::from_label(label).ok_or_else(|| SetupError::Metadata {
                location: location.to_string(),
                message: format!("label {label:?} is not a hand sign"),
            })?;
            if signs.contains(&sign) {
                return Err(SetupError::Metadata {
                    location: location.to_string(),
                    message: format!("label {label:?} duplicates {sign}"),
                });
            }
            signs.push(sign);
        }
        if signs.len() != HandSign::ALL.len() {
            return Err(SetupError::Metadata {
                location: location.to_string(),
                message: format!("expected 3 hand-sign labels, found {}", signs.len()),
            });
        }
        Ok(signs)
    }
}

/// Read an asset as text, from disk or over HTTP.
pub async fn fetch_text(location: &str) -> Result<String, SetupError> {
    debug!("Fetching model asset {}", location);
    let load_err = |message: String| SetupError::ModelLoad {
        location: location.to_string(),
        message,
    };

    if location.starts_with("http://") || location.starts_with("https://") {
        let response = reqwest::get(location)
            .await
            .map_err(|e| load_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| load_err(e.to_string()))?;
        response.text().await.map_err(|e| load_err(e.to_string()))
    } else {
        tokio::fs::read_to_string(location)
            .await
            .map_err(|e| load_err(e.to_string()))
    }
}

/// Fetch and parse `metadata.json` for the given assets.
pub async fn load_metadata(assets: &ModelAssets) -> Result<ModelMetadata, SetupError> {
    let text = fetch_text(&assets.metadata_url).await?;
    ModelMetadata::parse(&text, &assets.metadata_url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
