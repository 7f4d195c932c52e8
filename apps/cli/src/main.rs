mod output;
mod settings;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use tubelens_client::{ApiClient, CostPeriod, LibraryStats, ListQuery, SearchFilter, VideoStatus};

use crate::settings::SettingsCommand;

const ANALYZE_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "tubelens")]
#[command(about = "Terminal dashboard for the tubelens video analysis service")]
struct Cli {
    /// Base URL of the tubelens API
    #[arg(
        long,
        global = true,
        env = "TUBELENS_API_URL",
        default_value = ApiClient::DEFAULT_BASE_URL
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Library overview with ingestion statistics
    Dashboard,
    /// Manage the video library
    #[command(subcommand)]
    Videos(VideosCommand),
    /// Show a video's transcript
    Transcript {
        id: String,
        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show a video's AI summary
    Summary {
        id: String,
        /// Summary language code
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List videos similar to the given one
    Similar {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
        /// Minimum similarity score (0.0 - 1.0)
        #[arg(long)]
        min_score: Option<f64>,
    },
    /// Search the library (client-side; the backend has no search endpoint)
    Search {
        query: Option<String>,
        #[arg(long, value_enum)]
        status: Option<CliStatus>,
        #[arg(long)]
        channel: Option<String>,
    },
    /// Token-cost accounting
    #[command(subcommand)]
    Costs(CostsCommand),
    /// Provider configuration
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum VideosCommand {
    /// List videos, newest first
    List {
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one video's metadata
    Show { id: String },
    /// Submit a video URL for ingestion
    Add {
        url: String,
        /// Wait for processing to finish
        #[arg(short, long)]
        wait: bool,
    },
    /// Delete a video and its artifacts
    Delete { id: String },
    /// Re-run transcript, summary, and embedding analysis
    Analyze {
        id: String,
        /// Wait for processing to finish
        #[arg(short, long)]
        wait: bool,
    },
}

#[derive(Subcommand)]
enum CostsCommand {
    /// Aggregated cost summary for a period
    Summary {
        #[arg(long, value_enum, default_value = "month")]
        period: CliPeriod,
    },
    /// Per-call token usage, optionally scoped to one video
    Usage {
        #[arg(long, value_enum, default_value = "month")]
        period: CliPeriod,
        #[arg(long)]
        video: Option<String>,
    },
}

/// CLI wrapper for VideoStatus (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl From<CliStatus> for VideoStatus {
    fn from(cli: CliStatus) -> Self {
        match cli {
            CliStatus::Pending => VideoStatus::Pending,
            CliStatus::Processing => VideoStatus::Processing,
            CliStatus::Completed => VideoStatus::Completed,
            CliStatus::Error => VideoStatus::Error,
        }
    }
}

/// CLI wrapper for CostPeriod (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliPeriod {
    Today,
    Week,
    #[default]
    Month,
    All,
}

impl From<CliPeriod> for CostPeriod {
    fn from(cli: CliPeriod) -> Self {
        match cli {
            CliPeriod::Today => CostPeriod::Today,
            CliPeriod::Week => CostPeriod::Week,
            CliPeriod::Month => CostPeriod::Month,
            CliPeriod::All => CostPeriod::All,
        }
    }
}

pub(crate) fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;

    let result = match cli.command {
        Command::Dashboard => dashboard(&client).await,
        Command::Videos(command) => videos(&client, command).await,
        Command::Transcript { id, language } => transcript(&client, &id, language.as_deref()).await,
        Command::Summary { id, language } => summary(&client, &id, language.as_deref()).await,
        Command::Similar {
            id,
            limit,
            min_score,
        } => similar(&client, &id, limit, min_score).await,
        Command::Search {
            query,
            status,
            channel,
        } => search(&client, query, status, channel).await,
        Command::Costs(command) => costs(&client, command).await,
        Command::Settings(command) => settings::run(&client, command).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

async fn dashboard(client: &ApiClient) -> Result<()> {
    let spinner = create_spinner("Loading library...");
    let page = client.list_videos(ListQuery::default()).await?;
    spinner.finish_and_clear();

    println!(
        "\n{}  {}\n",
        style("tubelens").cyan().bold(),
        style("Video Library").dim()
    );
    let stats = LibraryStats::from_videos(&page.videos);
    print!("{}", output::format_stats(&stats));

    if !page.videos.is_empty() {
        println!("\n{}", style("Recent videos").bold());
        for video in page.videos.iter().take(6) {
            println!("  {}", output::format_video_row(video));
        }
    }
    Ok(())
}

async fn videos(client: &ApiClient, command: VideosCommand) -> Result<()> {
    match command {
        VideosCommand::List { page, limit } => {
            let spinner = create_spinner("Loading videos...");
            let result = client
                .list_videos(ListQuery {
                    page,
                    limit,
                    offset: None,
                })
                .await?;
            spinner.finish_and_clear();
            for video in &result.videos {
                println!("{}", output::format_video_row(video));
            }
            println!(
                "\n{}",
                style(format!(
                    "{} of {} videos (offset {})",
                    result.videos.len(),
                    result.total,
                    result.offset
                ))
                .dim()
            );
        }
        VideosCommand::Show { id } => {
            let video = client.get_video(&id).await?;
            println!("{}", output::format_video_detail(&video));
        }
        VideosCommand::Add { url, wait } => {
            let spinner = create_spinner("Submitting video...");
            let video = client.add_video(&url).await?;
            spinner.finish_with_message(format!(
                "{} Added: {}",
                style("✓").green().bold(),
                style(&video.title).dim()
            ));
            if wait {
                wait_for(client, &video.id).await?;
            } else {
                println!("{}", output::format_video_row(&video));
            }
        }
        VideosCommand::Delete { id } => {
            client.delete_video(&id).await?;
            println!("{} Deleted {}", style("✓").green().bold(), id);
        }
        VideosCommand::Analyze { id, wait } => {
            let spinner = create_spinner("Starting analysis...");
            client.analyze_video(&id).await?;
            spinner.finish_with_message(format!("{} Analysis started", style("✓").green().bold()));
            if wait {
                wait_for(client, &id).await?;
            }
        }
    }
    Ok(())
}

async fn wait_for(client: &ApiClient, id: &str) -> Result<()> {
    let spinner = create_spinner("Processing...");
    let video = client.wait_for_completion(id, ANALYZE_POLL_INTERVAL).await?;
    match video.status {
        VideoStatus::Completed => {
            spinner.finish_with_message(format!(
                "{} Processing finished",
                style("✓").green().bold()
            ));
            println!("{}", output::format_video_row(&video));
        }
        _ => {
            spinner.finish_with_message(format!("{} Processing failed", style("✗").red().bold()));
        }
    }
    Ok(())
}

async fn transcript(client: &ApiClient, id: &str, language: Option<&str>) -> Result<()> {
    let spinner = create_spinner("Fetching transcript...");
    let transcript = client.get_transcript(id, language).await?;
    spinner.finish_and_clear();

    let languages = client.transcript_languages(id).await.unwrap_or_default();
    if languages.len() > 1 {
        let codes: Vec<&str> = languages.iter().map(|l| l.code.as_str()).collect();
        println!(
            "{}",
            style(format!("Available languages: {}", codes.join(", "))).dim()
        );
    }
    println!(
        "{}",
        style(format!(
            "Transcript ({}, {})",
            transcript.language, transcript.source
        ))
        .bold()
    );
    println!("{}", output::format_transcript(&transcript));
    Ok(())
}

async fn summary(client: &ApiClient, id: &str, language: Option<&str>) -> Result<()> {
    let spinner = create_spinner("Fetching summary (may trigger generation)...");
    let summary = client.get_summary(id, language).await?;
    spinner.finish_and_clear();
    println!("{}", output::format_summary(&summary));
    Ok(())
}

async fn similar(
    client: &ApiClient,
    id: &str,
    limit: Option<u32>,
    min_score: Option<f64>,
) -> Result<()> {
    let spinner = create_spinner("Finding similar videos...");
    let similar = client.similar_videos(id, limit, min_score).await?;
    spinner.finish_and_clear();
    if similar.is_empty() {
        println!("No similar videos found.");
    } else {
        print!("{}", output::format_similar(&similar));
    }
    Ok(())
}

async fn search(
    client: &ApiClient,
    query: Option<String>,
    status: Option<CliStatus>,
    channel: Option<String>,
) -> Result<()> {
    let spinner = create_spinner("Searching...");
    let page = client.list_videos(ListQuery::with_limit(50)).await?;
    spinner.finish_and_clear();

    let filter = SearchFilter {
        query: query.unwrap_or_default(),
        status: status.map(Into::into),
        channel: channel.unwrap_or_default(),
    };
    let hits = filter.apply(&page.videos);
    if hits.is_empty() {
        println!("No videos matched.");
    } else {
        for video in hits {
            println!("{}", output::format_video_row(video));
        }
    }
    Ok(())
}

async fn costs(client: &ApiClient, command: CostsCommand) -> Result<()> {
    match command {
        CostsCommand::Summary { period } => {
            let spinner = create_spinner("Loading cost summary...");
            let summary = client.cost_summary(period.into()).await?;
            spinner.finish_and_clear();
            print!("{}", output::format_cost_summary(&summary));
        }
        CostsCommand::Usage { period, video } => {
            let spinner = create_spinner("Loading usage...");
            let usage = match video {
                Some(video_id) => client.video_usage(&video_id).await?,
                None => client.cost_usage(period.into()).await?,
            };
            spinner.finish_and_clear();
            if usage.is_empty() {
                println!("No usage recorded.");
            } else {
                print!("{}", output::format_usage(&usage));
            }
        }
    }
    Ok(())
}
