//! Client-side library statistics and search filtering.
//!
//! The backend has no search endpoint; the dashboard fetches a page of
//! videos and filters locally.

use crate::types::{Video, VideoStatus};

/// Ingestion statistics over a set of videos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    pub completed: usize,
    pub processing: usize,
    pub pending: usize,
    pub error: usize,
    pub with_transcript: usize,
    pub with_summary: usize,
}

impl LibraryStats {
    pub fn from_videos(videos: &[Video]) -> Self {
        let mut stats = Self {
            total: videos.len(),
            ..Default::default()
        };
        for video in videos {
            match video.status {
                VideoStatus::Completed => stats.completed += 1,
                VideoStatus::Processing => stats.processing += 1,
                VideoStatus::Pending => stats.pending += 1,
                VideoStatus::Error => stats.error += 1,
            }
            if video.has_transcript {
                stats.with_transcript += 1;
            }
            if video.has_summary {
                stats.with_summary += 1;
            }
        }
        stats
    }

    /// Share of `part` in the library as a percentage; 0 when empty.
    pub fn percentage(&self, part: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            part as f64 * 100.0 / self.total as f64
        }
    }

    pub fn completed_percentage(&self) -> f64 {
        self.percentage(self.completed)
    }

    pub fn summarized_percentage(&self) -> f64 {
        self.percentage(self.with_summary)
    }
}

/// Client-side search filter over title, description, and channel name.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: String,
    pub status: Option<VideoStatus>,
    pub channel: String,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.status.is_none() && self.channel.is_empty()
    }

    pub fn matches(&self, video: &Video) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = query.is_empty()
            || video.title.to_lowercase().contains(&query)
            || video.description.to_lowercase().contains(&query)
            || video.channel_name.to_lowercase().contains(&query);

        let matches_status = self.status.is_none_or(|status| video.status == status);

        let matches_channel = self.channel.is_empty()
            || video
                .channel_name
                .to_lowercase()
                .contains(&self.channel.to_lowercase());

        matches_query && matches_status && matches_channel
    }

    pub fn apply<'a>(&self, videos: &'a [Video]) -> Vec<&'a Video> {
        videos.iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video(title: &str, channel: &str, status: &str, transcript: bool, summary: bool) -> Video {
        serde_json::from_value(json!({
            "id": title,
            "title": title,
            "description": format!("about {title}"),
            "channel_name": channel,
            "status": status,
            "has_transcript": transcript,
            "has_summary": summary
        }))
        .unwrap()
    }

    fn library() -> Vec<Video> {
        vec![
            video("Intro to Rust", "RustConf", "completed", true, true),
            video("Async Deep Dive", "RustConf", "processing", true, false),
            video("Cooking Pasta", "FoodTube", "pending", false, false),
            video("Broken Upload", "FoodTube", "error", false, false),
        ]
    }

    #[test]
    fn stats_count_statuses_and_artifacts() {
        let stats = LibraryStats::from_videos(&library());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.processing, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.with_transcript, 2);
        assert_eq!(stats.with_summary, 1);
    }

    #[test]
    fn percentages_are_zero_for_empty_library() {
        let stats = LibraryStats::from_videos(&[]);
        assert_eq!(stats.completed_percentage(), 0.0);
        assert_eq!(stats.summarized_percentage(), 0.0);
    }

    #[test]
    fn percentages_reflect_share() {
        let stats = LibraryStats::from_videos(&library());
        assert_eq!(stats.completed_percentage(), 25.0);
        assert_eq!(stats.percentage(stats.with_transcript), 50.0);
    }

    #[test]
    fn query_matches_title_description_and_channel() {
        let videos = library();
        let by_title = SearchFilter {
            query: "rust".into(),
            ..Default::default()
        };
        assert_eq!(by_title.apply(&videos).len(), 2);

        let by_channel = SearchFilter {
            query: "foodtube".into(),
            ..Default::default()
        };
        assert_eq!(by_channel.apply(&videos).len(), 2);
    }

    #[test]
    fn status_and_channel_filters_combine() {
        let videos = library();
        let filter = SearchFilter {
            query: String::new(),
            status: Some(VideoStatus::Processing),
            channel: "rustconf".into(),
        };
        let hits = filter.apply(&videos);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Async Deep Dive");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let videos = library();
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&videos).len(), videos.len());
    }
}
