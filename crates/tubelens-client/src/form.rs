//! Provider settings form state machine.
//!
//! Shared by the CLI `settings set` command and the desktop settings panel.
//! Three state cells with one-way synchronization: the remote snapshot seeds
//! the draft exactly once (at construction), the health probe feeds only a
//! derived selectability flag, and the draft changes only through explicit
//! edit operations. A health tick can therefore never clobber unsaved edits,
//! and a background settings refetch is never pushed into a live form.

use log::warn;

use crate::error::ClientError;
use crate::settings::{ModelProvider, Settings, SettingsUpdate, TranscriptProvider, WhisperHealth};

pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_WHISPER_MODEL: &str = "base";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_LOCAL_WHISPER_URL: &str = "http://localhost:8001";
pub const DEFAULT_SUMMARY_LANGUAGE: &str = "auto";

/// Pending edit for one stored secret.
///
/// `Unchanged` is omitted from the save payload, `SetTo` sends the value,
/// `Cleared` sends the empty-string sentinel. `SetTo` and `Cleared` are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecretEdit {
    #[default]
    Unchanged,
    SetTo(String),
    Cleared,
}

impl SecretEdit {
    /// Apply typed input. Non-empty input always wins over a previous clear;
    /// erasing a typed value falls back to untouched, while an explicit
    /// clear survives whitespace-only input.
    pub fn edit(&mut self, value: &str) {
        if value.trim().is_empty() {
            if matches!(self, SecretEdit::SetTo(_)) {
                *self = SecretEdit::Unchanged;
            }
        } else {
            *self = SecretEdit::SetTo(value.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = SecretEdit::Cleared;
    }

    /// Value to include in the save payload, if any.
    pub fn payload_value(&self) -> Option<String> {
        match self {
            SecretEdit::Unchanged => None,
            SecretEdit::SetTo(value) => Some(value.trim().to_string()),
            SecretEdit::Cleared => Some(String::new()),
        }
    }

    /// Text currently shown in the input field.
    pub fn typed(&self) -> &str {
        match self {
            SecretEdit::SetTo(value) => value,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretField {
    Gemini,
    Groq,
    Huggingface,
}

/// Last observed reachability of the local Whisper service.
///
/// A probe that fails outright maps to `Unknown`, which is treated as
/// unavailable: selecting or saving the local provider requires a positive
/// signal, not the absence of a negative one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HealthState {
    #[default]
    Unknown,
    Up {
        url: String,
    },
    Down {
        url: String,
    },
}

impl HealthState {
    pub fn local_selectable(&self) -> bool {
        matches!(self, HealthState::Up { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            HealthState::Up { url } | HealthState::Down { url } => Some(url),
            HealthState::Unknown => None,
        }
    }
}

/// Editable draft of the provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub transcript_provider: TranscriptProvider,
    pub summary_provider: ModelProvider,
    pub embedding_provider: ModelProvider,
    pub audio_analysis_provider: ModelProvider,
    pub ollama_model: String,
    pub whisper_model: String,
    pub gemini_model: String,
    pub ollama_url: String,
    pub local_whisper_url: String,
    pub summary_language: String,
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub struct SettingsForm {
    draft: Draft,
    gemini_key: SecretEdit,
    groq_key: SecretEdit,
    huggingface_key: SecretEdit,
    health: HealthState,
    has_gemini_key: bool,
    has_groq_key: bool,
    has_huggingface_key: bool,
}

impl SettingsForm {
    /// Seed a fresh form from a settings snapshot. Seeding happens exactly
    /// once, here; later snapshots are never pushed into a live form.
    pub fn new(settings: &Settings) -> Self {
        Self {
            draft: Draft {
                transcript_provider: settings.transcript_provider,
                summary_provider: settings.summary_provider,
                embedding_provider: settings.embedding_provider,
                audio_analysis_provider: settings.audio_analysis_provider,
                ollama_model: or_default(&settings.ollama_model, DEFAULT_OLLAMA_MODEL),
                whisper_model: or_default(&settings.whisper_model, DEFAULT_WHISPER_MODEL),
                gemini_model: settings.gemini_model.clone(),
                ollama_url: or_default(&settings.ollama_url, DEFAULT_OLLAMA_URL),
                local_whisper_url: or_default(
                    &settings.local_whisper_url,
                    DEFAULT_LOCAL_WHISPER_URL,
                ),
                summary_language: or_default(&settings.summary_language, DEFAULT_SUMMARY_LANGUAGE),
            },
            gemini_key: SecretEdit::Unchanged,
            groq_key: SecretEdit::Unchanged,
            huggingface_key: SecretEdit::Unchanged,
            health: HealthState::Unknown,
            has_gemini_key: settings.has_gemini_api_key,
            has_groq_key: settings.has_groq_api_key,
            has_huggingface_key: settings.has_huggingface_api_key,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn local_whisper_selectable(&self) -> bool {
        self.health.local_selectable()
    }

    /// Whether the server currently has a stored key for `field`.
    pub fn has_stored_key(&self, field: SecretField) -> bool {
        match field {
            SecretField::Gemini => self.has_gemini_key,
            SecretField::Groq => self.has_groq_key,
            SecretField::Huggingface => self.has_huggingface_key,
        }
    }

    /// Record a health probe result. Touches only the derived selectability
    /// state, never the draft.
    pub fn observe_health(&mut self, health: WhisperHealth) {
        self.health = if health.available {
            HealthState::Up { url: health.url }
        } else {
            HealthState::Down { url: health.url }
        };
    }

    /// Record a failed health probe. Treated as unavailable.
    pub fn health_probe_failed(&mut self) {
        warn!("local whisper health probe failed; treating service as unavailable");
        self.health = HealthState::Unknown;
    }

    /// Change the transcript provider. Selecting the local provider requires
    /// a positive health signal; on rejection the draft is unchanged.
    pub fn select_transcript_provider(
        &mut self,
        provider: TranscriptProvider,
    ) -> Result<(), ClientError> {
        if provider == TranscriptProvider::Local && !self.health.local_selectable() {
            return Err(ClientError::ProviderUnavailable);
        }
        self.draft.transcript_provider = provider;
        Ok(())
    }

    pub fn set_summary_provider(&mut self, provider: ModelProvider) {
        self.draft.summary_provider = provider;
    }

    pub fn set_embedding_provider(&mut self, provider: ModelProvider) {
        self.draft.embedding_provider = provider;
    }

    pub fn set_audio_analysis_provider(&mut self, provider: ModelProvider) {
        self.draft.audio_analysis_provider = provider;
    }

    pub fn set_ollama_model(&mut self, value: String) {
        self.draft.ollama_model = value;
    }

    pub fn set_whisper_model(&mut self, value: String) {
        self.draft.whisper_model = value;
    }

    pub fn set_gemini_model(&mut self, value: String) {
        self.draft.gemini_model = value;
    }

    pub fn set_ollama_url(&mut self, value: String) {
        self.draft.ollama_url = value;
    }

    pub fn set_local_whisper_url(&mut self, value: String) {
        self.draft.local_whisper_url = value;
    }

    pub fn set_summary_language(&mut self, value: String) {
        self.draft.summary_language = value;
    }

    pub fn secret(&self, field: SecretField) -> &SecretEdit {
        match field {
            SecretField::Gemini => &self.gemini_key,
            SecretField::Groq => &self.groq_key,
            SecretField::Huggingface => &self.huggingface_key,
        }
    }

    fn secret_mut(&mut self, field: SecretField) -> &mut SecretEdit {
        match field {
            SecretField::Gemini => &mut self.gemini_key,
            SecretField::Groq => &mut self.groq_key,
            SecretField::Huggingface => &mut self.huggingface_key,
        }
    }

    pub fn edit_secret(&mut self, field: SecretField, value: &str) {
        self.secret_mut(field).edit(value);
    }

    pub fn clear_secret(&mut self, field: SecretField) {
        self.secret_mut(field).clear();
    }

    /// Build the partial update payload.
    ///
    /// Fails fast with [`ClientError::ProviderUnavailable`] when the draft
    /// still points at the local provider without a positive health signal,
    /// which also covers a persisted selection that is already dead. All
    /// non-secret fields are always included; secrets only when edited.
    pub fn build_update(&self) -> Result<SettingsUpdate, ClientError> {
        if self.draft.transcript_provider == TranscriptProvider::Local
            && !self.health.local_selectable()
        {
            return Err(ClientError::ProviderUnavailable);
        }
        Ok(SettingsUpdate {
            transcript_provider: Some(self.draft.transcript_provider),
            summary_provider: Some(self.draft.summary_provider),
            embedding_provider: Some(self.draft.embedding_provider),
            audio_analysis_provider: Some(self.draft.audio_analysis_provider),
            ollama_model: Some(self.draft.ollama_model.clone()),
            whisper_model: Some(self.draft.whisper_model.clone()),
            gemini_model: Some(self.draft.gemini_model.clone()),
            ollama_url: Some(self.draft.ollama_url.clone()),
            local_whisper_url: Some(self.draft.local_whisper_url.clone()),
            summary_language: Some(self.draft.summary_language.clone()),
            gemini_api_key: self.gemini_key.payload_value(),
            groq_api_key: self.groq_key.payload_value(),
            huggingface_api_key: self.huggingface_key.payload_value(),
        })
    }

    /// Acknowledge a successful save. Secret edits reset to untouched (the
    /// server never echoes secrets back); presence flags refresh from the
    /// response. The draft itself is left as the user set it.
    pub fn saved(&mut self, fresh: &Settings) {
        self.gemini_key = SecretEdit::Unchanged;
        self.groq_key = SecretEdit::Unchanged;
        self.huggingface_key = SecretEdit::Unchanged;
        self.has_gemini_key = fresh.has_gemini_api_key;
        self.has_groq_key = fresh.has_groq_api_key;
        self.has_huggingface_key = fresh.has_huggingface_api_key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        serde_json::from_value(serde_json::json!({
            "transcript_provider": "youtube",
            "summary_provider": "gemini",
            "embedding_provider": "gemini",
            "audio_analysis_provider": "gemini",
            "ollama_model": "llama3.2",
            "whisper_model": "base",
            "ollama_url": "http://localhost:11434",
            "local_whisper_url": "http://localhost:8001",
            "summary_language": "auto"
        }))
        .unwrap()
    }

    fn up() -> WhisperHealth {
        WhisperHealth {
            available: true,
            url: "http://localhost:8001".into(),
        }
    }

    fn down() -> WhisperHealth {
        WhisperHealth {
            available: false,
            url: "http://localhost:8001".into(),
        }
    }

    #[test]
    fn seeding_selects_one_provider_per_capability() {
        let form = SettingsForm::new(&base_settings());
        assert_eq!(form.draft().transcript_provider, TranscriptProvider::Youtube);
        assert_eq!(form.draft().summary_provider, ModelProvider::Gemini);
        assert_eq!(form.draft().embedding_provider, ModelProvider::Gemini);
        assert_eq!(form.draft().audio_analysis_provider, ModelProvider::Gemini);
    }

    #[test]
    fn seeding_fills_empty_fields_with_defaults() {
        let mut settings = base_settings();
        settings.ollama_model = String::new();
        settings.summary_language = "  ".into();
        let form = SettingsForm::new(&settings);
        assert_eq!(form.draft().ollama_model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(form.draft().summary_language, DEFAULT_SUMMARY_LANGUAGE);
    }

    #[test]
    fn local_selection_rejected_while_service_down() {
        let mut form = SettingsForm::new(&base_settings());
        form.observe_health(down());
        let err = form
            .select_transcript_provider(TranscriptProvider::Local)
            .unwrap_err();
        assert!(matches!(err, ClientError::ProviderUnavailable));
        assert_eq!(form.draft().transcript_provider, TranscriptProvider::Youtube);
    }

    #[test]
    fn local_selection_rejected_while_health_unknown() {
        let mut form = SettingsForm::new(&base_settings());
        assert_eq!(form.health(), &HealthState::Unknown);
        assert!(
            form.select_transcript_provider(TranscriptProvider::Local)
                .is_err()
        );

        form.observe_health(up());
        form.health_probe_failed();
        assert!(!form.local_whisper_selectable());
        assert!(
            form.select_transcript_provider(TranscriptProvider::Local)
                .is_err()
        );
    }

    #[test]
    fn local_selection_allowed_while_service_up() {
        let mut form = SettingsForm::new(&base_settings());
        form.observe_health(up());
        form.select_transcript_provider(TranscriptProvider::Local)
            .unwrap();
        assert_eq!(form.draft().transcript_provider, TranscriptProvider::Local);
    }

    #[test]
    fn typing_a_value_supersedes_a_pending_clear() {
        let mut form = SettingsForm::new(&base_settings());
        form.clear_secret(SecretField::Groq);
        form.edit_secret(SecretField::Groq, "sk-test-123");
        assert_eq!(
            form.secret(SecretField::Groq),
            &SecretEdit::SetTo("sk-test-123".into())
        );
    }

    #[test]
    fn clearing_discards_a_pending_typed_value() {
        let mut form = SettingsForm::new(&base_settings());
        form.edit_secret(SecretField::Huggingface, "hf_abc");
        form.clear_secret(SecretField::Huggingface);
        assert_eq!(form.secret(SecretField::Huggingface), &SecretEdit::Cleared);
        assert_eq!(form.secret(SecretField::Huggingface).typed(), "");
    }

    #[test]
    fn erasing_typed_input_returns_to_untouched() {
        let mut form = SettingsForm::new(&base_settings());
        form.edit_secret(SecretField::Gemini, "AIza-x");
        form.edit_secret(SecretField::Gemini, "");
        assert_eq!(form.secret(SecretField::Gemini), &SecretEdit::Unchanged);
    }

    #[test]
    fn whitespace_input_does_not_cancel_an_explicit_clear() {
        let mut form = SettingsForm::new(&base_settings());
        form.clear_secret(SecretField::Groq);
        form.edit_secret(SecretField::Groq, "   ");
        assert_eq!(form.secret(SecretField::Groq), &SecretEdit::Cleared);
    }

    #[test]
    fn untouched_secrets_are_omitted_from_payload() {
        let form = SettingsForm::new(&base_settings());
        let update = form.build_update().unwrap();
        assert_eq!(update.gemini_api_key, None);
        assert_eq!(update.groq_api_key, None);
        assert_eq!(update.huggingface_api_key, None);
        // Non-secret fields are always included.
        assert_eq!(update.transcript_provider, Some(TranscriptProvider::Youtube));
        assert_eq!(update.ollama_model.as_deref(), Some("llama3.2"));
    }

    #[test]
    fn typed_and_cleared_secrets_reach_the_payload() {
        let mut form = SettingsForm::new(&base_settings());
        form.observe_health(up());
        form.select_transcript_provider(TranscriptProvider::Groq)
            .unwrap();
        form.edit_secret(SecretField::Groq, "sk-test-123");
        form.clear_secret(SecretField::Huggingface);

        let update = form.build_update().unwrap();
        assert_eq!(update.groq_api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(update.huggingface_api_key.as_deref(), Some(""));
        assert_eq!(update.gemini_api_key, None);
    }

    #[test]
    fn secrets_reset_to_untouched_after_save() {
        let mut form = SettingsForm::new(&base_settings());
        form.edit_secret(SecretField::Groq, "sk-test-123");

        let mut fresh = base_settings();
        fresh.has_groq_api_key = true;
        form.saved(&fresh);

        assert!(form.has_stored_key(SecretField::Groq));
        let update = form.build_update().unwrap();
        assert_eq!(update.groq_api_key, None);
    }

    #[test]
    fn health_tick_never_touches_the_chosen_provider() {
        let mut form = SettingsForm::new(&base_settings());
        form.observe_health(up());
        form.select_transcript_provider(TranscriptProvider::Local)
            .unwrap();
        form.set_ollama_model("mistral".into());

        form.observe_health(down());
        assert_eq!(form.draft().transcript_provider, TranscriptProvider::Local);
        assert_eq!(form.draft().ollama_model, "mistral");
        assert!(!form.local_whisper_selectable());
    }

    #[test]
    fn save_fails_fast_when_persisted_selection_points_at_dead_service() {
        // Initial load already says "local", then the probe reports down.
        let mut settings = base_settings();
        settings.transcript_provider = TranscriptProvider::Local;
        let mut form = SettingsForm::new(&settings);
        form.observe_health(down());

        let err = form.build_update().unwrap_err();
        assert!(matches!(err, ClientError::ProviderUnavailable));
    }

    #[test]
    fn unrelated_edit_after_save_omits_previous_secret() {
        let mut form = SettingsForm::new(&base_settings());
        form.edit_secret(SecretField::Groq, "sk-test-123");
        let first = form.build_update().unwrap();
        assert_eq!(first.groq_api_key.as_deref(), Some("sk-test-123"));

        form.saved(&base_settings());
        form.set_summary_language("en".into());
        let second = form.build_update().unwrap();
        assert_eq!(second.groq_api_key, None);
        assert_eq!(second.summary_language.as_deref(), Some("en"));
    }

    #[test]
    fn typed_secret_is_trimmed_in_payload() {
        let mut form = SettingsForm::new(&base_settings());
        form.edit_secret(SecretField::Gemini, "  AIza-x  ");
        let update = form.build_update().unwrap();
        assert_eq!(update.gemini_api_key.as_deref(), Some("AIza-x"));
    }
}
