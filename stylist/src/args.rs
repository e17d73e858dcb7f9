use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Stylist hairstyle suggestion service
#[derive(Debug, Parser)]
#[command(name = "stylist", about = "Hairstyle suggestions and trending styles over HTTP")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "stylist.toml", env = "STYLIST_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "STYLIST_LISTEN")]
    pub listen: Option<SocketAddr>,
}
