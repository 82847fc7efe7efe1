//! CLI - Command line flags for radiotui
//!
//! The program is interactive only; flags tune where it reads and writes
//! and how it plays.
//!
//! # Examples
//!
//! ```bash
//! radiotui
//! radiotui --player vlc
//! radiotui --api-url https://nl1.api.radio-browser.info --page-size 20
//! radiotui --no-persist --debounce-ms 250
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::stream::PlayerType;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// radiotui - Internet radio in your terminal
///
/// Browse the Radio Browser directory, keep favorites and play streams
/// through mpv or VLC.
#[derive(Parser, Debug)]
#[command(
    name = "radiotui",
    version,
    author = "Gorka & Hermes",
    about = "Internet radio browser for the terminal",
    after_help = "KEYS:\n\
                  /            Search by name\n\
                  Enter        Play highlighted station\n\
                  Space        Pause / resume\n\
                  f            Add or remove favorite\n\
                  e / d        Edit / delete favorite\n\
                  [ ]          Previous / next page\n\
                  Tab          Switch pane\n\
                  q            Quit"
)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Path to the favorites file
    #[arg(long, short = 'f')]
    pub favorites: Option<PathBuf>,

    /// Player used for streams
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,

    /// Radio Browser mirror base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Stations per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page_size: Option<u32>,

    /// Delay after typing before a search is sent
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Keep favorites in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Write logs to this file instead of the default location
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn player_type(&self) -> Option<PlayerType> {
        self.player.map(PlayerType::from)
    }
}

/// Player names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChoice {
    /// mpv media player
    Mpv,
    /// VLC media player
    Vlc,
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Mpv => PlayerType::Mpv,
            PlayerChoice::Vlc => PlayerType::Vlc,
        }
    }
}
