//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;

/// Posts a rental listing and pays for its promotion.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Path to the listing file to post.
    ///
    /// Only the promotion price list is printed if omitted.
    pub listing: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
