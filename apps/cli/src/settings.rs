//! `tubelens settings` subcommand: inspect provider configuration, probe
//! local Whisper health, and apply changes through the settings form state
//! machine.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use console::style;

use tubelens_client::{
    ApiClient, ModelProvider, SecretField, Settings, SettingsForm, TranscriptProvider,
};

use crate::create_spinner;

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show the current provider configuration
    Show,
    /// Probe the local Whisper service
    Health,
    /// Update provider configuration
    Set(SetArgs),
}

/// CLI wrapper for TranscriptProvider (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
pub enum CliTranscriptProvider {
    Youtube,
    Groq,
    Local,
    Huggingface,
}

impl From<CliTranscriptProvider> for TranscriptProvider {
    fn from(cli: CliTranscriptProvider) -> Self {
        match cli {
            CliTranscriptProvider::Youtube => TranscriptProvider::Youtube,
            CliTranscriptProvider::Groq => TranscriptProvider::Groq,
            CliTranscriptProvider::Local => TranscriptProvider::Local,
            CliTranscriptProvider::Huggingface => TranscriptProvider::Huggingface,
        }
    }
}

/// CLI wrapper for ModelProvider (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
pub enum CliModelProvider {
    Gemini,
    Ollama,
}

impl From<CliModelProvider> for ModelProvider {
    fn from(cli: CliModelProvider) -> Self {
        match cli {
            CliModelProvider::Gemini => ModelProvider::Gemini,
            CliModelProvider::Ollama => ModelProvider::Ollama,
        }
    }
}

#[derive(Args)]
pub struct SetArgs {
    /// Transcript extraction provider
    #[arg(long, value_enum)]
    transcript_provider: Option<CliTranscriptProvider>,

    /// Summary generation provider
    #[arg(long, value_enum)]
    summary_provider: Option<CliModelProvider>,

    /// Embedding generation provider
    #[arg(long, value_enum)]
    embedding_provider: Option<CliModelProvider>,

    /// Audio analysis provider
    #[arg(long, value_enum)]
    audio_provider: Option<CliModelProvider>,

    /// Ollama model name (e.g. llama3.2, mistral)
    #[arg(long)]
    ollama_model: Option<String>,

    /// Local Whisper model (base, small, medium, large-v3)
    #[arg(long)]
    whisper_model: Option<String>,

    /// Gemini model name; empty string means auto-detect
    #[arg(long)]
    gemini_model: Option<String>,

    /// URL where Ollama is running
    #[arg(long)]
    ollama_url: Option<String>,

    /// URL of the local Whisper service
    #[arg(long)]
    local_whisper_url: Option<String>,

    /// Summary language code, or "auto" to follow the transcript
    #[arg(long)]
    language: Option<String>,

    /// Store a new Gemini API key
    #[arg(long, value_name = "KEY")]
    gemini_key: Option<String>,

    /// Store a new Groq API key
    #[arg(long, value_name = "KEY")]
    groq_key: Option<String>,

    /// Store a new Hugging Face API key
    #[arg(long, value_name = "KEY")]
    huggingface_key: Option<String>,

    /// Remove the stored Gemini API key
    #[arg(long, conflicts_with = "gemini_key")]
    clear_gemini_key: bool,

    /// Remove the stored Groq API key
    #[arg(long, conflicts_with = "groq_key")]
    clear_groq_key: bool,

    /// Remove the stored Hugging Face API key
    #[arg(long, conflicts_with = "huggingface_key")]
    clear_huggingface_key: bool,
}

pub async fn run(client: &ApiClient, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => show(client).await,
        SettingsCommand::Health => health(client).await,
        SettingsCommand::Set(args) => set(client, args).await,
    }
}

fn print_settings(settings: &Settings) {
    let key = |present: bool| {
        if present {
            style("configured").green().to_string()
        } else {
            style("not set").dim().to_string()
        }
    };
    println!("Transcript provider:      {}", settings.transcript_provider);
    println!("Summary provider:         {}", settings.summary_provider);
    println!("Embedding provider:       {}", settings.embedding_provider);
    println!(
        "Audio analysis provider:  {}",
        settings.audio_analysis_provider
    );
    println!("Ollama model:             {}", settings.ollama_model);
    println!("Ollama URL:               {}", settings.ollama_url);
    println!("Whisper model:            {}", settings.whisper_model);
    println!("Local Whisper URL:        {}", settings.local_whisper_url);
    if settings.gemini_model.is_empty() {
        println!("Gemini model:             (auto-detect)");
    } else {
        println!("Gemini model:             {}", settings.gemini_model);
    }
    println!("Summary language:         {}", settings.summary_language);
    println!("Gemini API key:           {}", key(settings.has_gemini_api_key));
    println!("Groq API key:             {}", key(settings.has_groq_api_key));
    println!(
        "Hugging Face API key:     {}",
        key(settings.has_huggingface_api_key)
    );
}

async fn show(client: &ApiClient) -> Result<()> {
    let spinner = create_spinner("Loading settings...");
    let settings = client.get_settings().await?;
    spinner.finish_and_clear();
    print_settings(&settings);
    Ok(())
}

async fn health(client: &ApiClient) -> Result<()> {
    let spinner = create_spinner("Probing local Whisper...");
    let probe = client.local_whisper_health().await;
    spinner.finish_and_clear();
    match probe {
        Ok(health) if health.available => {
            println!(
                "{} Local Whisper is available at {}",
                style("✓").green().bold(),
                health.url
            );
        }
        Ok(health) => {
            println!(
                "{} Local Whisper is not responding at {}",
                style("✗").red().bold(),
                health.url
            );
        }
        Err(err) => {
            println!(
                "{} Health probe failed ({err}); treating the service as unavailable",
                style("✗").red().bold(),
            );
        }
    }
    Ok(())
}

async fn set(client: &ApiClient, args: SetArgs) -> Result<()> {
    let spinner = create_spinner("Loading settings...");
    let settings = client.get_settings().await?;
    let mut form = SettingsForm::new(&settings);

    // One probe before editing; the desktop panel polls, the CLI is
    // one-shot so a single point-in-time check is enough.
    match client.local_whisper_health().await {
        Ok(health) => form.observe_health(health),
        Err(_) => form.health_probe_failed(),
    }
    spinner.finish_and_clear();

    if let Some(provider) = args.transcript_provider {
        form.select_transcript_provider(provider.into())?;
    }
    if let Some(provider) = args.summary_provider {
        form.set_summary_provider(provider.into());
    }
    if let Some(provider) = args.embedding_provider {
        form.set_embedding_provider(provider.into());
    }
    if let Some(provider) = args.audio_provider {
        form.set_audio_analysis_provider(provider.into());
    }
    if let Some(value) = args.ollama_model {
        form.set_ollama_model(value);
    }
    if let Some(value) = args.whisper_model {
        form.set_whisper_model(value);
    }
    if let Some(value) = args.gemini_model {
        form.set_gemini_model(value);
    }
    if let Some(value) = args.ollama_url {
        form.set_ollama_url(value);
    }
    if let Some(value) = args.local_whisper_url {
        form.set_local_whisper_url(value);
    }
    if let Some(value) = args.language {
        form.set_summary_language(value);
    }

    if let Some(key) = args.gemini_key.as_deref() {
        form.edit_secret(SecretField::Gemini, key);
    }
    if let Some(key) = args.groq_key.as_deref() {
        form.edit_secret(SecretField::Groq, key);
    }
    if let Some(key) = args.huggingface_key.as_deref() {
        form.edit_secret(SecretField::Huggingface, key);
    }
    if args.clear_gemini_key {
        form.clear_secret(SecretField::Gemini);
    }
    if args.clear_groq_key {
        form.clear_secret(SecretField::Groq);
    }
    if args.clear_huggingface_key {
        form.clear_secret(SecretField::Huggingface);
    }

    let update = form.build_update()?;

    let spinner = create_spinner("Saving settings...");
    let result = client.update_settings(&update).await;
    spinner.finish_and_clear();

    let fresh = result?;
    form.saved(&fresh);
    println!("{} Settings saved", style("✓").green().bold());
    print_settings(&fresh);
    Ok(())
}
