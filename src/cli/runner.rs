//! Command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::api::{ApiClientConfig, PopularQuery, SearchQuery, VideoApi};
use crate::config::AppConfig;
use crate::error::Result;
use crate::feed::{FeedController, FeedMode, PageSource, PopularSource, SearchSource};
use crate::history::{FileStore, HistoryEntry, WatchHistory};
use crate::types::{embed_url, Category, Video};
use tracing::debug;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(self) -> Result<()> {
        let config = AppConfig::load(self.cli.config.as_deref())?;

        match &self.cli.command {
            Commands::Trending {
                category,
                region,
                pages,
            } => {
                self.run_trending(&config, *category, region.as_deref(), *pages)
                    .await
            }
            Commands::Search { query, pages } => self.run_search(&config, query, *pages).await,
            Commands::Watch {
                video_id,
                title,
                channel,
            } => self.run_watch(&config, video_id, title.as_deref(), channel.as_deref()),
            Commands::History { clear } => self.run_history(&config, *clear),
        }
    }

    async fn run_trending(
        &self,
        config: &AppConfig,
        category: Option<Category>,
        region: Option<&str>,
        pages: u32,
    ) -> Result<()> {
        let api = VideoApi::new(ApiClientConfig::from_app_config(config)?)?;

        // Shorts are served by the search endpoint, everything else by
        // the popular listing.
        let videos = if category.is_some_and(|c| c.uses_search()) {
            let query = SearchQuery {
                query: "shorts".to_string(),
                max_results: config.page_size,
                short_duration: true,
            };
            self.browse(SearchSource::new(api, query), pages).await?
        } else {
            let query = PopularQuery {
                region: region.unwrap_or(&config.region).to_string(),
                category,
                max_results: config.page_size,
            };
            self.browse(PopularSource::new(api, query), pages).await?
        };

        self.print_videos(&videos)
    }

    async fn run_search(&self, config: &AppConfig, text: &str, pages: u32) -> Result<()> {
        let api = VideoApi::new(ApiClientConfig::from_app_config(config)?)?;
        let query = SearchQuery {
            query: text.to_string(),
            max_results: config.page_size,
            short_duration: false,
        };
        let videos = self.browse(SearchSource::new(api, query), pages).await?;
        self.print_videos(&videos)
    }

    /// Walk up to `pages` pages of a source, appending as a scroll would
    async fn browse<S: PageSource>(&self, source: S, pages: u32) -> Result<Vec<Video>> {
        let controller = FeedController::new(source, FeedMode::Append);
        controller.fetch_initial().await?;
        for _ in 1..pages {
            if !controller.fetch_next().await?.fetched() {
                break;
            }
        }
        let snapshot = controller.snapshot().await;
        debug!(count = snapshot.items.len(), "browse complete");
        Ok(snapshot.items)
    }

    fn run_watch(
        &self,
        config: &AppConfig,
        video_id: &str,
        title: Option<&str>,
        channel: Option<&str>,
    ) -> Result<()> {
        let history = self.open_history(config)?;
        let mut entry = HistoryEntry::from_id(video_id);
        if let Some(title) = title {
            entry.title = title.to_string();
        }
        if let Some(channel) = channel {
            entry.channel = channel.to_string();
        }
        history.record(entry)?;
        println!("{}", embed_url(video_id));
        Ok(())
    }

    fn run_history(&self, config: &AppConfig, clear: bool) -> Result<()> {
        let history = self.open_history(config)?;
        if clear {
            history.clear()?;
            println!("History cleared");
            return Ok(());
        }

        let entries = history.entries()?;
        if entries.is_empty() {
            println!("No watch history yet");
            return Ok(());
        }
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Pretty => {
                for entry in entries {
                    println!(
                        "{}  {}  ({})  watched {}",
                        entry.id,
                        entry.title,
                        entry.channel,
                        entry.watched_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        Ok(())
    }

    fn open_history(&self, config: &AppConfig) -> Result<WatchHistory<FileStore>> {
        Ok(WatchHistory::new(FileStore::new(&config.data_dir)?))
    }

    fn print_videos(&self, videos: &[Video]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(videos)?),
            OutputFormat::Pretty => {
                if videos.is_empty() {
                    println!("No results");
                }
                for video in videos {
                    println!("{}  {}  ({})", video.id, video.title, video.channel);
                }
            }
        }
        Ok(())
    }
}
