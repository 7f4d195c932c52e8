//! Video endpoints: listing, ingestion, analysis, transcripts, summaries,
//! and similarity results.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::{SimilarVideo, Summary, Transcript, TranscriptLanguage, Video, VideoPage};

/// Pagination for the video listing. The backend speaks offsets; callers
/// that think in pages are converted with `offset = (page - 1) * limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    fn to_params(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT);
        if self.limit.is_some() {
            params.push(("limit", limit.to_string()));
        }
        let offset = match (self.offset, self.page) {
            (Some(offset), _) => Some(offset),
            (None, Some(page)) => Some(page.saturating_sub(1) * limit),
            (None, None) => None,
        };
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

#[derive(Deserialize)]
struct LanguagesBody {
    #[serde(default)]
    languages: Vec<TranscriptLanguage>,
}

#[derive(Deserialize)]
struct SimilarBody {
    #[serde(default)]
    similar_videos: Vec<SimilarVideo>,
}

impl ApiClient {
    pub async fn list_videos(&self, query: ListQuery) -> Result<VideoPage> {
        self.get_json("/videos", &query.to_params()).await
    }

    pub async fn get_video(&self, id: &str) -> Result<Video> {
        self.get_json(&format!("/videos/{id}"), &[]).await
    }

    /// Submit a video URL for ingestion.
    pub async fn add_video(&self, url: &str) -> Result<Video> {
        self.post_json("/videos", &json!({ "url": url })).await
    }

    pub async fn delete_video(&self, id: &str) -> Result<()> {
        self.delete(&format!("/videos/{id}")).await
    }

    /// Trigger transcript + summary + embedding analysis. Long-running, so
    /// this goes through the extended-timeout client.
    pub async fn analyze_video(&self, id: &str) -> Result<()> {
        self.post_empty_slow(&format!("/videos/{id}/analyze")).await
    }

    pub async fn get_transcript(&self, id: &str, language: Option<&str>) -> Result<Transcript> {
        let params = lang_params(language);
        self.get_json(&format!("/videos/{id}/transcript"), &params)
            .await
    }

    pub async fn transcript_languages(&self, id: &str) -> Result<Vec<TranscriptLanguage>> {
        let body: LanguagesBody = self
            .get_json(&format!("/videos/{id}/transcript/languages"), &[])
            .await?;
        Ok(body.languages)
    }

    /// Summary generation may run transcription plus an LLM call behind
    /// this endpoint, hence the extended timeout.
    pub async fn get_summary(&self, id: &str, language: Option<&str>) -> Result<Summary> {
        let params = lang_params(language);
        self.get_json_slow(&format!("/videos/{id}/summary"), &params)
            .await
    }

    pub async fn similar_videos(
        &self,
        id: &str,
        limit: Option<u32>,
        min_score: Option<f64>,
    ) -> Result<Vec<SimilarVideo>> {
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(min_score) = min_score {
            params.push(("min_score", min_score.to_string()));
        }
        let body: SimilarBody = self
            .get_json(&format!("/videos/{id}/similar"), &params)
            .await?;
        Ok(body.similar_videos)
    }

    /// Poll a video until it leaves the pending/processing states, checking
    /// every `poll_interval`. Returns the final snapshot.
    pub async fn wait_for_completion(&self, id: &str, poll_interval: Duration) -> Result<Video> {
        loop {
            let video = self.get_video(id).await?;
            if video.status.is_terminal() {
                return Ok(video);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

fn lang_params(language: Option<&str>) -> Vec<(&'static str, String)> {
    language
        .map(|lang| vec![("language", lang.to_string())])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_converts_to_offset() {
        let query = ListQuery {
            page: Some(3),
            limit: Some(12),
            offset: None,
        };
        assert_eq!(
            query.to_params(),
            vec![("limit", "12".to_string()), ("offset", "24".to_string())]
        );
    }

    #[test]
    fn explicit_offset_wins_over_page() {
        let query = ListQuery {
            page: Some(5),
            limit: Some(10),
            offset: Some(7),
        };
        assert_eq!(
            query.to_params(),
            vec![("limit", "10".to_string()), ("offset", "7".to_string())]
        );
    }

    #[test]
    fn page_one_maps_to_offset_zero() {
        let query = ListQuery {
            page: Some(1),
            limit: None,
            offset: None,
        };
        // Default limit applies to the conversion but is not transmitted.
        assert_eq!(query.to_params(), vec![("offset", "0".to_string())]);
    }

    #[test]
    fn empty_query_sends_no_params() {
        assert!(ListQuery::default().to_params().is_empty());
    }
}
