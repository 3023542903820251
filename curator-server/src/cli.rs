use clap::{Parser, Subcommand};
use curator_types::models::{DEFAULT_KEEP_ALIVE_INTERVAL_MINUTES, DEFAULT_SYNC_INTERVAL_MINUTES};
use curator_types::SyncConfig;

pub const DEFAULT_PORT: u16 = 8046;

#[derive(Parser)]
#[command(
    name = "curator",
    about = "BCH Curator Server - content API and backend keep-alive daemon",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "CURATOR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "CURATOR_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    #[arg(
        long,
        env = "CURATOR_SYNC_INTERVAL",
        default_value_t = DEFAULT_SYNC_INTERVAL_MINUTES,
        help = "Minutes between remote video syncs"
    )]
    pub sync_interval: u64,

    #[arg(
        long,
        env = "CURATOR_KEEP_ALIVE_INTERVAL",
        default_value_t = DEFAULT_KEEP_ALIVE_INTERVAL_MINUTES,
        help = "Minutes between keep-alive pings"
    )]
    pub keep_alive_interval: u64,

    #[arg(long, help = "Do not start the background sync/keep-alive timers")]
    pub no_auto_sync: bool,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            enabled: !self.no_auto_sync,
            interval_minutes: self.sync_interval,
            keep_alive_interval_minutes: self.keep_alive_interval,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(about = "Run the remote video sync once and print the report")]
    Sync,

    #[command(about = "Send one keep-alive ping to the backend")]
    Ping,

    #[command(subcommand, about = "Manage tracked YouTube channels")]
    Channel(ChannelCommands),
}

#[derive(Subcommand)]
pub enum ChannelCommands {
    #[command(about = "List tracked channels")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Look up a channel and start tracking it")]
    Add {
        #[arg(help = "Channel id (UC...), @handle, or legacy username")]
        channel: String,
    },
}
