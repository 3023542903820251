//! One-shot CLI commands.

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use curator_core::{AdminService, SyncScheduler};
use curator_types::models::{KeepAliveOutcome, SyncOutcome, YouTubeChannel};

use crate::cli::ChannelCommands;

pub async fn handle_sync(scheduler: &SyncScheduler) -> Result<()> {
    println!("{}", "Running remote video sync...".cyan());
    match scheduler.sync().await {
        SyncOutcome::Completed { report } => {
            println!("{} {} new videos", "✓".green().bold(), report.new_videos_count);
            if let Some(channels) = report.channels_processed {
                println!("  Channels processed: {}", channels);
            }
            if let Some(message) = report.message {
                println!("  {}", message);
            }
            Ok(())
        },
        SyncOutcome::Skipped => {
            println!("{}", "A sync is already running.".yellow());
            Ok(())
        },
        SyncOutcome::Failed { error } => anyhow::bail!(error),
    }
}

pub async fn handle_ping(scheduler: &SyncScheduler) -> Result<()> {
    match scheduler.keep_alive().await {
        KeepAliveOutcome::Alive => {
            println!("{} Backend is awake", "✓".green().bold());
            Ok(())
        },
        KeepAliveOutcome::Failed { error } => anyhow::bail!("Ping failed: {}", error),
    }
}

pub async fn handle_channel_command(admin: &AdminService, cmd: ChannelCommands) -> Result<()> {
    match cmd {
        ChannelCommands::List { json } => list_channels(admin, json).await,
        ChannelCommands::Add { channel } => add_channel(admin, &channel).await,
    }
}

async fn list_channels(admin: &AdminService, json: bool) -> Result<()> {
    let channels = admin.list_channels().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&channels)?);
        return Ok(());
    }

    if channels.is_empty() {
        println!("{}", "No channels tracked.".yellow());
        return Ok(());
    }

    println!("{}", channel_table(&channels));
    println!("\n{} channels total", channels.len());
    Ok(())
}

fn channel_table(channels: &[YouTubeChannel]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Channel ID", "Name", "Subscribers", "Videos", "Status"]);

    for channel in channels {
        let status = if channel.is_active {
            Cell::new("Active").fg(Color::Green)
        } else {
            Cell::new("Paused").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&channel.channel_id),
            Cell::new(&channel.channel_name),
            Cell::new(channel.subscriber_count),
            Cell::new(channel.video_count),
            status,
        ]);
    }
    table
}

async fn add_channel(admin: &AdminService, input: &str) -> Result<()> {
    println!("{}", format!("Looking up {}...", input).cyan());
    let channel = admin.add_channel(input).await?;
    println!(
        "{} Tracking {} ({})",
        "✓".green().bold(),
        channel.channel_name.bold(),
        channel.channel_id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use curator_core::test_utils::{FakeBackend, FakeReply};
    use serde_json::json;

    #[test]
    fn test_channel_table_rows() {
        let channel = YouTubeChannel {
            id: "c1".to_string(),
            channel_id: "UC123".to_string(),
            channel_name: "BCH Podcast".to_string(),
            channel_description: None,
            channel_thumbnail: None,
            subscriber_count: 1200,
            video_count: 85,
            is_active: false,
            created_at: None,
        };
        let rendered = channel_table(&[channel]).to_string();
        assert!(rendered.contains("UC123"));
        assert!(rendered.contains("Paused"));
    }

    #[tokio::test]
    async fn test_sync_command_reports_failure() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_reply(
            curator_core::scheduler::SYNC_FUNCTION,
            FakeReply::Json(json!({ "success": false, "error": "quota exceeded" })),
        );
        let scheduler = SyncScheduler::with_system_clock(backend);

        let err = handle_sync(&scheduler).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_ping_command() {
        let backend = Arc::new(FakeBackend::new());
        let scheduler = SyncScheduler::with_system_clock(backend.clone());
        handle_ping(&scheduler).await.unwrap();

        backend.fail_selects_on("youtube_channels", 500, "down");
        assert!(handle_ping(&scheduler).await.is_err());
    }
}
