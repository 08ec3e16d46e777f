use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use harvester_engine::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(about = "Harvest videos, channels, playlists and comments from the video platform")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "HARVESTER_CONFIG", default_value = "harvester.ron")]
    pub config: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One page of a listing: items `(page-1)*limit .. page*limit`.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Items per page
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: u32,
}

impl Paging {
    /// Items that must be harvested to serve this page.
    pub fn fetch_count(&self) -> usize {
        self.page as usize * self.limit as usize
    }

    pub fn start(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search videos by keyword
    Search {
        query: String,
        /// relevance, upload_date, view_count or rating
        #[arg(long, default_value = "relevance")]
        sort: SortOrder,
        #[command(flatten)]
        paging: Paging,
    },

    /// Uploads of a channel (`@handle` or `UC…` id)
    ChannelVideos {
        channel: String,
        #[command(flatten)]
        paging: Paging,
    },

    /// Profile of a channel (`@handle` or `UC…` id)
    ChannelInfo { channel: String },

    /// Playlists published by a channel (`@handle` or `UC…` id)
    ChannelPlaylists {
        channel: String,
        #[command(flatten)]
        paging: Paging,
    },

    /// Videos of a playlist
    PlaylistVideos {
        playlist_id: String,
        #[command(flatten)]
        paging: Paging,
    },

    /// Comments of a video, with replies
    Comments {
        video_id: String,
        #[command(flatten)]
        paging: Paging,
    },

    /// Live broadcasts matching a keyword
    Live {
        query: String,
        #[command(flatten)]
        paging: Paging,
    },

    /// Trending videos
    Trending {
        #[command(flatten)]
        paging: Paging,
    },

    /// Geotagged videos around a coordinate
    Located {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Total search radius in km (1 to 500)
        #[arg(long, default_value_t = 50.0, value_parser = parse_radius_km)]
        radius_km: f64,
        /// Distance between grid points in km (1 to 100)
        #[arg(long, default_value_t = 10.0, value_parser = parse_step_km)]
        step_km: f64,
        /// Maximum videos per grid point
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=50))]
        per_location_limit: u32,
        /// Cap on the merged result
        #[arg(long)]
        max: Option<usize>,
    },

    /// Player metadata of a single video
    Video { video_id: String },
}

fn km_within(raw: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in {min}..={max}"))
    }
}

fn parse_radius_km(raw: &str) -> Result<f64, String> {
    km_within(raw, 1.0, 500.0)
}

fn parse_step_km(raw: &str) -> Result<f64, String> {
    km_within(raw, 1.0, 100.0)
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "search",
            Command::ChannelVideos { .. } => "channel-videos",
            Command::ChannelInfo { .. } => "channel-info",
            Command::ChannelPlaylists { .. } => "channel-playlists",
            Command::PlaylistVideos { .. } => "playlist-videos",
            Command::Comments { .. } => "comments",
            Command::Live { .. } => "live",
            Command::Trending { .. } => "trending",
            Command::Located { .. } => "located",
            Command::Video { .. } => "video",
        }
    }
}
