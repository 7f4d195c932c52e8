//! Tubelens Client Library
//!
//! Typed access to the tubelens video analysis API: videos, transcripts,
//! AI summaries, similarity results, token-cost accounting, and provider
//! settings. Also home of the provider settings form state machine shared
//! by the CLI and desktop frontends.

pub mod api;
pub mod costs;
pub mod error;
pub mod form;
pub mod settings;
pub mod stats;
pub mod types;
pub mod videos;

// Re-export commonly used items at crate root
pub use api::ApiClient;
pub use costs::CostPeriod;
pub use error::{ClientError, Result};
pub use form::{HealthState, SecretEdit, SecretField, SettingsForm};
pub use settings::{ModelProvider, Settings, SettingsUpdate, TranscriptProvider, WhisperHealth};
pub use stats::{LibraryStats, SearchFilter};
pub use types::{
    CostSummary, SimilarVideo, Summary, TokenUsage, Transcript, TranscriptLanguage,
    TranscriptSegment, Video, VideoPage, VideoStatus,
};
pub use videos::ListQuery;
