use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::DEFAULT_TOP_N;
use crate::data::loader::LoadOptions;

/// Command-line arguments for streamboard
#[derive(Parser, Debug, Clone)]
#[command(name = "streamboard")]
#[command(about = "Dashboard of the most streamed songs")]
#[command(version)]
pub struct Config {
    /// Dataset to open at startup (.csv or .json)
    #[arg(
        short,
        long,
        default_value = "Spotify Most Streamed Songs.csv",
        env = "STREAMBOARD_DATA"
    )]
    pub data: PathBuf,

    /// Sidebar branding image
    #[arg(long, default_value = "assets/logo.png", env = "STREAMBOARD_LOGO")]
    pub logo: PathBuf,

    /// How many tracks the ranking keeps
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, env = "STREAMBOARD_TOP_N")]
    pub top_n: usize,

    /// Keep the first data row of CSV files instead of discarding it
    #[arg(long)]
    pub keep_first_row: bool,
}

impl Config {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_first_row: !self.keep_first_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["streamboard"]).unwrap();
        assert_eq!(config.data, PathBuf::from("Spotify Most Streamed Songs.csv"));
        assert_eq!(config.top_n, 10);
        assert!(config.load_options().skip_first_row);
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "streamboard",
            "--data",
            "songs.json",
            "-n",
            "5",
            "--keep-first-row",
        ])
        .unwrap();
        assert_eq!(config.data, PathBuf::from("songs.json"));
        assert_eq!(config.top_n, 5);
        assert!(!config.load_options().skip_first_row);
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
