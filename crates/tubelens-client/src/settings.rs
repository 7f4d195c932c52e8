//! Provider settings wire types and endpoints.
//!
//! GET /settings returns the current configuration plus `has_*_api_key`
//! presence flags; stored secret values are never echoed back. PUT /settings
//! takes a partial body: omitted fields keep their server-side value, and an
//! empty string clears a stored secret.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::Result;

/// Error code the server attaches when an update selects the local Whisper
/// provider while the service is unreachable.
pub const CODE_LOCAL_WHISPER_UNAVAILABLE: &str = "LOCAL_WHISPER_UNAVAILABLE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptProvider {
    #[default]
    Youtube,
    Groq,
    Local,
    Huggingface,
}

impl TranscriptProvider {
    pub const ALL: [TranscriptProvider; 4] = [
        TranscriptProvider::Youtube,
        TranscriptProvider::Groq,
        TranscriptProvider::Huggingface,
        TranscriptProvider::Local,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TranscriptProvider::Youtube => "YouTube Captions",
            TranscriptProvider::Groq => "Groq Whisper (Cloud)",
            TranscriptProvider::Local => "Local Whisper",
            TranscriptProvider::Huggingface => "Hugging Face Whisper (Cloud)",
        }
    }
}

impl fmt::Display for TranscriptProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Backend for summarization, embeddings, and audio analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
    Ollama,
}

impl ModelProvider {
    pub const ALL: [ModelProvider; 2] = [ModelProvider::Gemini, ModelProvider::Ollama];

    pub fn label(&self) -> &'static str {
        match self {
            ModelProvider::Gemini => "Google Gemini (Cloud)",
            ModelProvider::Ollama => "Ollama (Local)",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current provider configuration as returned by GET /settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transcript_provider: TranscriptProvider,
    #[serde(default)]
    pub summary_provider: ModelProvider,
    #[serde(default)]
    pub embedding_provider: ModelProvider,
    #[serde(default)]
    pub audio_analysis_provider: ModelProvider,
    #[serde(default)]
    pub ollama_model: String,
    #[serde(default)]
    pub whisper_model: String,
    #[serde(default)]
    pub gemini_model: String,
    #[serde(default)]
    pub ollama_url: String,
    #[serde(default)]
    pub local_whisper_url: String,
    #[serde(default)]
    pub summary_language: String,
    #[serde(default)]
    pub has_gemini_api_key: bool,
    #[serde(default)]
    pub has_groq_api_key: bool,
    #[serde(default)]
    pub has_huggingface_api_key: bool,
}

/// Partial update body for PUT /settings. `None` fields are omitted from
/// the payload, which the server reads as "leave unchanged". Secrets use an
/// empty string as the explicit-clear sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_provider: Option<TranscriptProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_provider: Option<ModelProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_provider: Option<ModelProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_analysis_provider: Option<ModelProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whisper_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_whisper_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huggingface_api_key: Option<String>,
}

/// Reachability of the local Whisper service.
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperHealth {
    pub available: bool,
    #[serde(default)]
    pub url: String,
}

impl ApiClient {
    pub async fn get_settings(&self) -> Result<Settings> {
        self.get_json("/settings", &[]).await
    }

    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        self.put_json("/settings", update).await
    }

    pub async fn local_whisper_health(&self) -> Result<WhisperHealth> {
        self.get_json("/settings/health/local-whisper", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn none_fields_are_omitted_from_update_payload() {
        let update = SettingsUpdate {
            transcript_provider: Some(TranscriptProvider::Groq),
            groq_api_key: Some("sk-test-123".into()),
            ..Default::default()
        };
        let payload = serde_json::to_value(&update).unwrap();
        assert_eq!(
            payload,
            json!({
                "transcript_provider": "groq",
                "groq_api_key": "sk-test-123"
            })
        );
    }

    #[test]
    fn empty_string_secret_survives_serialization() {
        let update = SettingsUpdate {
            huggingface_api_key: Some(String::new()),
            ..Default::default()
        };
        let payload = serde_json::to_value(&update).unwrap();
        assert_eq!(payload, json!({ "huggingface_api_key": "" }));
    }

    #[test]
    fn settings_deserialize_with_presence_flags() {
        let settings: Settings = serde_json::from_value(json!({
            "transcript_provider": "local",
            "summary_provider": "ollama",
            "embedding_provider": "gemini",
            "audio_analysis_provider": "gemini",
            "ollama_model": "llama3.2",
            "whisper_model": "base",
            "local_whisper_url": "http://localhost:8001",
            "has_gemini_api_key": true,
            "has_groq_api_key": false,
            "has_huggingface_api_key": false
        }))
        .unwrap();
        assert_eq!(settings.transcript_provider, TranscriptProvider::Local);
        assert_eq!(settings.summary_provider, ModelProvider::Ollama);
        assert!(settings.has_gemini_api_key);
        assert!(!settings.has_groq_api_key);
    }
}
