//! View models for the tubelens API.
//!
//! The server speaks snake_case; older deployments emitted camelCase for
//! some payloads (costs in particular). Fields therefore carry a camelCase
//! `alias` alongside the canonical snake_case name, and `default` so a
//! missing field never fails the whole payload.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Error,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "pending",
            VideoStatus::Processing => "processing",
            VideoStatus::Completed => "completed",
            VideoStatus::Error => "error",
        }
    }

    /// Whether processing has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Error)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default, alias = "youtubeId")]
    pub youtube_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "channelId")]
    pub channel_id: String,
    #[serde(default, alias = "channelName")]
    pub channel_name: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default, alias = "viewCount")]
    pub view_count: u64,
    #[serde(default, alias = "likeCount")]
    pub like_count: u64,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: VideoStatus,
    #[serde(default, alias = "hasTranscript")]
    pub has_transcript: bool,
    #[serde(default, alias = "hasSummary")]
    pub has_summary: bool,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the video listing.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "videoId")]
    pub video_id: String,
    #[serde(default)]
    pub language: String,
    /// Where the transcript came from (youtube captions, whisper, ...).
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptLanguage {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "isAutoGenerated")]
    pub is_auto_generated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "videoId")]
    pub video_id: String,
    #[serde(default, alias = "modelUsed")]
    pub model_used: String,
    #[serde(default, alias = "summaryType")]
    pub summary_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "keyPoints")]
    pub key_points: Vec<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarVideo {
    pub video: Video,
    #[serde(default, alias = "similarityScore")]
    pub similarity_score: f64,
    #[serde(default, alias = "comparisonType")]
    pub comparison_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "videoId")]
    pub video_id: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, alias = "inputTokens")]
    pub input_tokens: u64,
    #[serde(default, alias = "outputTokens")]
    pub output_tokens: u64,
    #[serde(default, alias = "totalTokens")]
    pub total_tokens: u64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostSummary {
    #[serde(default, alias = "totalCost")]
    pub total_cost: f64,
    #[serde(default, alias = "totalTokens")]
    pub total_tokens: u64,
    #[serde(default, alias = "byProvider")]
    pub by_provider: BTreeMap<String, f64>,
    #[serde(default, alias = "byOperation")]
    pub by_operation: BTreeMap<String, f64>,
    #[serde(default, alias = "byModel")]
    pub by_model: BTreeMap<String, f64>,
    #[serde(default)]
    pub period: String,
    #[serde(default, alias = "videoCount")]
    pub video_count: u64,
    #[serde(default, alias = "averageCostPerVideo")]
    pub average_cost_per_video: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_accepts_snake_case() {
        let video: Video = serde_json::from_value(json!({
            "id": "v1",
            "youtube_id": "abc123",
            "title": "Intro to Rust",
            "channel_name": "RustConf",
            "view_count": 1200,
            "status": "completed",
            "has_transcript": true,
            "has_summary": false
        }))
        .unwrap();
        assert_eq!(video.youtube_id, "abc123");
        assert_eq!(video.channel_name, "RustConf");
        assert_eq!(video.view_count, 1200);
        assert_eq!(video.status, VideoStatus::Completed);
        assert!(video.has_transcript);
        assert!(!video.has_summary);
    }

    #[test]
    fn video_accepts_camel_case() {
        let video: Video = serde_json::from_value(json!({
            "id": "v1",
            "youtubeId": "abc123",
            "channelName": "RustConf",
            "viewCount": 7,
            "hasTranscript": true
        }))
        .unwrap();
        assert_eq!(video.youtube_id, "abc123");
        assert_eq!(video.channel_name, "RustConf");
        assert_eq!(video.view_count, 7);
        assert!(video.has_transcript);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let video: Video = serde_json::from_value(json!({ "id": "v1" })).unwrap();
        assert_eq!(video.title, "");
        assert_eq!(video.status, VideoStatus::Pending);
        assert!(video.tags.is_empty());
        assert!(video.published_at.is_none());
    }

    #[test]
    fn cost_summary_accepts_camel_case() {
        let summary: CostSummary = serde_json::from_value(json!({
            "totalCost": 1.25,
            "totalTokens": 40000,
            "byProvider": { "gemini": 1.0, "groq": 0.25 },
            "period": "month",
            "videoCount": 5,
            "averageCostPerVideo": 0.25
        }))
        .unwrap();
        assert_eq!(summary.total_cost, 1.25);
        assert_eq!(summary.by_provider["gemini"], 1.0);
        assert_eq!(summary.video_count, 5);
    }

    #[test]
    fn terminal_statuses() {
        assert!(VideoStatus::Completed.is_terminal());
        assert!(VideoStatus::Error.is_terminal());
        assert!(!VideoStatus::Processing.is_terminal());
        assert!(!VideoStatus::Pending.is_terminal());
    }
}
