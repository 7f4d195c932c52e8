//! Plain-text rendering of API payloads for the terminal.

use tubelens_client::{
    CostSummary, LibraryStats, SimilarVideo, Summary, TokenUsage, Transcript, Video, VideoStatus,
};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a duration in seconds as H:MM:SS, or MM:SS under an hour
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

pub fn status_glyph(status: VideoStatus) -> &'static str {
    match status {
        VideoStatus::Pending => "·",
        VideoStatus::Processing => "…",
        VideoStatus::Completed => "✓",
        VideoStatus::Error => "✗",
    }
}

pub fn format_video_row(video: &Video) -> String {
    format!(
        "{} [{}] {}  {} · {} · {} views",
        status_glyph(video.status),
        video.id,
        video.title,
        video.channel_name,
        format_duration(video.duration),
        video.view_count,
    )
}

pub fn format_video_detail(video: &Video) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", video.title));
    output.push_str(&format!(
        "**Channel:** {} | **Duration:** {} | **Status:** {}\n",
        video.channel_name,
        format_duration(video.duration),
        video.status.as_str(),
    ));
    output.push_str(&format!(
        "**Views:** {} | **Likes:** {} | **Transcript:** {} | **Summary:** {}\n\n",
        video.view_count,
        video.like_count,
        if video.has_transcript { "yes" } else { "no" },
        if video.has_summary { "yes" } else { "no" },
    ));
    if !video.description.is_empty() {
        output.push_str(&video.description);
        output.push('\n');
    }
    if !video.tags.is_empty() {
        output.push_str(&format!("\nTags: {}\n", video.tags.join(", ")));
    }
    output
}

/// Format transcript segments with timestamps, falling back to the raw
/// content when no segments came back.
pub fn format_transcript(transcript: &Transcript) -> String {
    if transcript.segments.is_empty() {
        return transcript.content.clone();
    }
    transcript
        .segments
        .iter()
        .map(|seg| format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a summary as human-readable markdown
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str("## Summary\n\n");
    output.push_str(&summary.content);
    output.push_str("\n\n");

    if !summary.key_points.is_empty() {
        output.push_str("## Key Points\n\n");
        for (i, point) in summary.key_points.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, point));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "_Generated by {} ({})_\n",
        summary.model_used, summary.summary_type
    ));
    output
}

pub fn format_similar(similar: &[SimilarVideo]) -> String {
    let mut output = String::new();
    for item in similar {
        output.push_str(&format!(
            "{:>5.1}%  [{}] {}  ({})\n",
            item.similarity_score * 100.0,
            item.video.id,
            item.video.title,
            item.comparison_type,
        ));
    }
    output
}

pub fn format_stats(stats: &LibraryStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Videos:       {}\n", stats.total));
    output.push_str(&format!(
        "Completed:    {} ({:.0}%)\n",
        stats.completed,
        stats.completed_percentage()
    ));
    output.push_str(&format!("Processing:   {}\n", stats.processing));
    output.push_str(&format!("Pending:      {}\n", stats.pending));
    output.push_str(&format!("Failed:       {}\n", stats.error));
    output.push_str(&format!(
        "Transcribed:  {} ({:.0}%)\n",
        stats.with_transcript,
        stats.percentage(stats.with_transcript)
    ));
    output.push_str(&format!(
        "Summarized:   {} ({:.0}%)\n",
        stats.with_summary,
        stats.summarized_percentage()
    ));
    output
}

pub fn format_cost_summary(summary: &CostSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Costs ({})\n\n", summary.period));
    output.push_str(&format!(
        "**Total:** ${:.4} | **Tokens:** {} | **Videos:** {} | **Avg/video:** ${:.4}\n\n",
        summary.total_cost, summary.total_tokens, summary.video_count, summary.average_cost_per_video
    ));

    if !summary.by_provider.is_empty() {
        output.push_str("## By Provider\n\n");
        for (provider, cost) in &summary.by_provider {
            output.push_str(&format!("• {provider}: ${cost:.4}\n"));
        }
        output.push('\n');
    }

    if !summary.by_operation.is_empty() {
        output.push_str("## By Operation\n\n");
        for (operation, cost) in &summary.by_operation {
            output.push_str(&format!("• {operation}: ${cost:.4}\n"));
        }
        output.push('\n');
    }

    if !summary.by_model.is_empty() {
        output.push_str("## By Model\n\n");
        for (model, cost) in &summary.by_model {
            output.push_str(&format!("• {model}: ${cost:.4}\n"));
        }
    }
    output
}

pub fn format_usage(usage: &[TokenUsage]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<14} {:<20} {:>10} {:>10} {:>10}\n",
        "operation", "provider", "model", "input", "output", "cost"
    ));
    for row in usage {
        output.push_str(&format!(
            "{:<12} {:<14} {:<20} {:>10} {:>10} {:>9.4}$\n",
            row.operation, row.provider, row.model, row.input_tokens, row.output_tokens, row.cost
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_minute_second() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.4), "01:05");
    }

    #[test]
    fn durations_grow_an_hour_field() {
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(615), "10:15");
        assert_eq!(format_duration(3600 + 125), "1:02:05");
    }

    #[test]
    fn transcript_without_segments_falls_back_to_content() {
        let transcript = Transcript {
            id: String::new(),
            video_id: "v1".into(),
            language: "en".into(),
            source: "youtube".into(),
            content: "full text".into(),
            segments: Vec::new(),
        };
        assert_eq!(format_transcript(&transcript), "full text");
    }
}
