//! Desktop provider settings panel.
//!
//! Drives the [`SettingsForm`] state machine from `tubelens-client`: the
//! first successful settings fetch seeds the form, a 10 second subscription
//! probes local Whisper health, and every failure lands in a dismissible
//! status line while the form stays editable.

use std::time::Duration;

use iced::widget::{button, column, pick_list, row, scrollable, text, text_input};
use iced::{Element, Subscription, Task, time};

use tubelens_client::{
    ApiClient, ModelProvider, SecretField, Settings, SettingsForm, SettingsUpdate,
    TranscriptProvider, WhisperHealth,
};

const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(10);

const LANGUAGES: [&str; 20] = [
    "auto", "en", "tr", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar", "hi", "nl",
    "pl", "sv", "da", "no", "fi",
];

fn main() -> iced::Result {
    env_logger::init();
    iced::application("Tubelens Settings", App::update, App::view)
        .subscription(App::subscription)
        .run_with(App::new)
}

struct App {
    client: Option<ApiClient>,
    form: Option<SettingsForm>,
    status: Option<String>,
    saving: bool,
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<Settings, String>),
    HealthTick,
    HealthChecked(Result<WhisperHealth, String>),
    SelectTranscript(TranscriptProvider),
    SelectSummary(ModelProvider),
    SelectEmbedding(ModelProvider),
    SelectAudio(ModelProvider),
    OllamaModel(String),
    WhisperModel(String),
    GeminiModel(String),
    OllamaUrl(String),
    LocalWhisperUrl(String),
    Language(String),
    SecretEdited(SecretField, String),
    SecretCleared(SecretField),
    Save,
    Saved(Result<Settings, String>),
    DismissStatus,
}

fn api_url() -> String {
    std::env::var("TUBELENS_API_URL").unwrap_or_else(|_| ApiClient::DEFAULT_BASE_URL.to_string())
}

async fn load_settings(client: ApiClient) -> Result<Settings, String> {
    client.get_settings().await.map_err(|e| e.to_string())
}

async fn probe_health(client: ApiClient) -> Result<WhisperHealth, String> {
    client
        .local_whisper_health()
        .await
        .map_err(|e| e.to_string())
}

async fn save_settings(client: ApiClient, update: SettingsUpdate) -> Result<Settings, String> {
    client
        .update_settings(&update)
        .await
        .map_err(|e| e.to_string())
}

impl App {
    fn new() -> (Self, Task<Message>) {
        match ApiClient::new(api_url()) {
            Ok(client) => {
                let load = Task::perform(load_settings(client.clone()), Message::Loaded);
                let probe = Task::perform(probe_health(client.clone()), Message::HealthChecked);
                (
                    Self {
                        client: Some(client),
                        form: None,
                        status: None,
                        saving: false,
                    },
                    Task::batch([load, probe]),
                )
            }
            Err(e) => (
                Self {
                    client: None,
                    form: None,
                    status: Some(e.to_string()),
                    saving: false,
                },
                Task::none(),
            ),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.client.is_some() {
            time::every(HEALTH_POLL_INTERVAL).map(|_| Message::HealthTick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(settings)) => {
                // Seed exactly once; a refetch never replaces a live form.
                if self.form.is_none() {
                    self.form = Some(SettingsForm::new(&settings));
                }
            }
            Message::Loaded(Err(e)) => {
                self.status = Some(format!("Failed to load settings: {e}"));
            }
            Message::HealthTick => {
                if let Some(client) = self.client.clone() {
                    return Task::perform(probe_health(client), Message::HealthChecked);
                }
            }
            Message::HealthChecked(result) => {
                if let Some(form) = self.form.as_mut() {
                    match result {
                        Ok(health) => form.observe_health(health),
                        Err(_) => form.health_probe_failed(),
                    }
                }
            }
            Message::SelectTranscript(provider) => {
                if let Some(form) = self.form.as_mut()
                    && let Err(e) = form.select_transcript_provider(provider)
                {
                    self.status = Some(e.to_string());
                }
            }
            Message::SelectSummary(provider) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_summary_provider(provider);
                }
            }
            Message::SelectEmbedding(provider) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_embedding_provider(provider);
                }
            }
            Message::SelectAudio(provider) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_audio_analysis_provider(provider);
                }
            }
            Message::OllamaModel(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_ollama_model(value);
                }
            }
            Message::WhisperModel(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_whisper_model(value);
                }
            }
            Message::GeminiModel(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_gemini_model(value);
                }
            }
            Message::OllamaUrl(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_ollama_url(value);
                }
            }
            Message::LocalWhisperUrl(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_local_whisper_url(value);
                }
            }
            Message::Language(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_summary_language(value);
                }
            }
            Message::SecretEdited(field, value) => {
                if let Some(form) = self.form.as_mut() {
                    form.edit_secret(field, &value);
                }
            }
            Message::SecretCleared(field) => {
                if let Some(form) = self.form.as_mut() {
                    form.clear_secret(field);
                }
            }
            Message::Save => {
                if let (Some(form), Some(client)) = (self.form.as_ref(), self.client.clone()) {
                    match form.build_update() {
                        Ok(update) => {
                            self.saving = true;
                            self.status = None;
                            return Task::perform(save_settings(client, update), Message::Saved);
                        }
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            }
            Message::Saved(Ok(fresh)) => {
                self.saving = false;
                if let Some(form) = self.form.as_mut() {
                    form.saved(&fresh);
                }
                self.status = Some("Settings saved".to_string());
            }
            Message::Saved(Err(e)) => {
                // Draft stays as the user left it.
                self.saving = false;
                self.status = Some(e);
            }
            Message::DismissStatus => {
                self.status = None;
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let Some(form) = self.form.as_ref() else {
            let message = self
                .status
                .clone()
                .unwrap_or_else(|| "Loading settings...".to_string());
            return column![text("Tubelens Settings").size(24), text(message)]
                .padding(20)
                .spacing(10)
                .into();
        };

        let draft = form.draft();

        let health_line = if form.local_whisper_selectable() {
            let url = form.health().url().unwrap_or_default().to_string();
            text(format!("Local Whisper: available at {url}"))
        } else if let Some(url) = form.health().url() {
            text(format!("Local Whisper: not responding at {url}"))
        } else {
            text("Local Whisper: status unknown (treated as unavailable)")
        };

        let mut content = column![
            text("Tubelens Settings").size(24),
            health_line,
            text("Transcript provider"),
            pick_list(
                TranscriptProvider::ALL,
                Some(draft.transcript_provider),
                Message::SelectTranscript,
            ),
        ]
        .padding(20)
        .spacing(10);

        if draft.transcript_provider == TranscriptProvider::Local
            && !form.local_whisper_selectable()
        {
            content = content.push(text(
                "Local Whisper service is not available. Start the service or choose another provider.",
            ));
        }

        if draft.transcript_provider == TranscriptProvider::Groq {
            content = content.push(secret_row(form, SecretField::Groq, "Groq API key"));
        }
        if draft.transcript_provider == TranscriptProvider::Huggingface {
            content = content.push(secret_row(
                form,
                SecretField::Huggingface,
                "Hugging Face API key",
            ));
        }
        if draft.transcript_provider == TranscriptProvider::Local {
            content = content
                .push(text("Whisper model"))
                .push(
                    text_input("base", &draft.whisper_model).on_input(Message::WhisperModel),
                )
                .push(text("Local Whisper URL"))
                .push(
                    text_input("http://localhost:8001", &draft.local_whisper_url)
                        .on_input(Message::LocalWhisperUrl),
                );
        }

        content = content
            .push(text("Summary provider"))
            .push(pick_list(
                ModelProvider::ALL,
                Some(draft.summary_provider),
                Message::SelectSummary,
            ))
            .push(text("Embedding provider"))
            .push(pick_list(
                ModelProvider::ALL,
                Some(draft.embedding_provider),
                Message::SelectEmbedding,
            ))
            .push(text("Audio analysis provider"))
            .push(pick_list(
                ModelProvider::ALL,
                Some(draft.audio_analysis_provider),
                Message::SelectAudio,
            ));

        let uses_gemini = draft.summary_provider == ModelProvider::Gemini
            || draft.embedding_provider == ModelProvider::Gemini
            || draft.audio_analysis_provider == ModelProvider::Gemini;
        if uses_gemini {
            content = content
                .push(secret_row(form, SecretField::Gemini, "Gemini API key"))
                .push(text("Gemini model (empty = auto-detect)"))
                .push(
                    text_input("gemini-1.5-flash", &draft.gemini_model)
                        .on_input(Message::GeminiModel),
                );
        }

        let uses_ollama = draft.summary_provider == ModelProvider::Ollama
            || draft.embedding_provider == ModelProvider::Ollama
            || draft.audio_analysis_provider == ModelProvider::Ollama;
        if uses_ollama {
            content = content
                .push(text("Ollama model"))
                .push(text_input("llama3.2", &draft.ollama_model).on_input(Message::OllamaModel))
                .push(text("Ollama URL"))
                .push(
                    text_input("http://localhost:11434", &draft.ollama_url)
                        .on_input(Message::OllamaUrl),
                );
        }

        content = content.push(text("Summary language")).push(pick_list(
            LANGUAGES,
            LANGUAGES
                .iter()
                .copied()
                .find(|l| *l == draft.summary_language),
            |code| Message::Language(code.to_string()),
        ));

        let save_label = if self.saving { "Saving..." } else { "Save changes" };
        let mut save = button(save_label);
        if !self.saving {
            save = save.on_press(Message::Save);
        }
        content = content.push(save);

        if let Some(status) = &self.status {
            content = content.push(
                row![
                    text(status.clone()),
                    button("Dismiss").on_press(Message::DismissStatus),
                ]
                .spacing(10),
            );
        }

        scrollable(content).into()
    }
}

fn secret_row<'a>(
    form: &'a SettingsForm,
    field: SecretField,
    label: &'static str,
) -> Element<'a, Message> {
    let placeholder = if form.has_stored_key(field) {
        "Configured (enter to replace)"
    } else {
        "Enter key (optional)"
    };
    column![
        text(label),
        row![
            text_input(placeholder, form.secret(field).typed())
                .secure(true)
                .on_input(move |value| Message::SecretEdited(field, value)),
            button("Clear stored key").on_press(Message::SecretCleared(field)),
        ]
        .spacing(10),
    ]
    .spacing(5)
    .into()
}
