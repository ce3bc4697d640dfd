use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Column names of the source file
// ---------------------------------------------------------------------------

pub mod columns {
    pub const TRACK_NAME: &str = "track_name";
    pub const ARTISTS: &str = "artist(s)_name";
    pub const STREAMS: &str = "streams";
    pub const RELEASED_YEAR: &str = "released_year";
    pub const RELEASED_MONTH: &str = "released_month";
    pub const RELEASED_DAY: &str = "released_day";
    pub const SPOTIFY_PLAYLISTS: &str = "in_spotify_playlists";
    pub const DEEZER_PLAYLISTS: &str = "in_deezer_playlists";
    pub const APPLE_PLAYLISTS: &str = "in_apple_playlists";
    pub const DANCEABILITY: &str = "danceability_%";
    pub const ENERGY: &str = "energy_%";
    pub const ACOUSTICNESS: &str = "acousticness_%";
    pub const BPM: &str = "bpm";

    /// Every column the loader expects to find in the header.
    pub const REQUIRED: [&str; 13] = [
        TRACK_NAME,
        ARTISTS,
        STREAMS,
        RELEASED_YEAR,
        RELEASED_MONTH,
        RELEASED_DAY,
        SPOTIFY_PLAYLISTS,
        DEEZER_PLAYLISTS,
        APPLE_PLAYLISTS,
        DANCEABILITY,
        ENERGY,
        ACOUSTICNESS,
        BPM,
    ];
}

// ---------------------------------------------------------------------------
// Track – one row of the source table
// ---------------------------------------------------------------------------

/// A single song record.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    /// Raw comma-joined artist list, exactly as found in the file.
    pub artists: String,
    /// Total stream count. Rows without a usable value never become tracks.
    pub streams: f64,
    pub released_year: Option<i64>,
    pub released_month: Option<i64>,
    pub released_day: Option<i64>,
    /// First day of the release month; filled in by [`super::derive`].
    pub release_date: Option<NaiveDate>,
    pub spotify_playlists: Option<i64>,
    pub deezer_playlists: Option<i64>,
    pub apple_playlists: Option<i64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub acousticness: Option<f64>,
    pub bpm: Option<f64>,
}

impl Track {
    /// Minimal track with every optional field missing.
    pub fn new(name: impl Into<String>, artists: impl Into<String>, streams: f64) -> Self {
        Track {
            name: name.into(),
            artists: artists.into(),
            streams,
            released_year: None,
            released_month: None,
            released_day: None,
            release_date: None,
            spotify_playlists: None,
            deezer_playlists: None,
            apple_playlists: None,
            danceability: None,
            energy: None,
            acousticness: None,
            bpm: None,
        }
    }

    /// Individual artist names: split on `,`, trimmed, blanks dropped.
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Total streams of all tracks released in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub streams: f64,
}

/// One (track, artist) pair of the exploded artist list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArtistEntry {
    pub name: String,
    /// Row index of the track in [`Dataset::tracks`].
    pub track: usize,
}

// ---------------------------------------------------------------------------
// Dataset – the cleaned table plus everything derived from it
// ---------------------------------------------------------------------------

/// The loaded table with its derived views. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All usable tracks in file order, release dates resolved.
    pub tracks: Vec<Track>,
    /// Chronological month-bucketed stream totals.
    pub monthly: Vec<MonthlyTotal>,
    /// Exploded artist list sorted by artist name. Not deduplicated.
    pub artist_index: Vec<ArtistEntry>,
}

impl Dataset {
    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Earliest and latest release year seen in the monthly aggregate.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.monthly.first()?;
        let last = self.monthly.last()?;
        Some((first.month.year(), last.month.year()))
    }

    /// Unique artist names in alphabetical order, for the selection widget.
    pub fn artist_options(&self) -> Vec<String> {
        self.artist_index
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
