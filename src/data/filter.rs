use std::collections::BTreeSet;

use chrono::Datelike;
use log::debug;

use super::model::{Dataset, Track};

/// How many tracks survive the ranking step unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Filter criteria: what the sidebar controls currently say
// ---------------------------------------------------------------------------

/// User-selected constraints. Both ranges are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Selected artist names. Empty selects nothing.
    pub artists: BTreeSet<String>,
    pub years: (i32, i32),
    pub months: (u32, u32),
    pub top_n: usize,
}

impl FilterCriteria {
    /// Full year span of the dataset, January to July, no artists.
    pub fn for_dataset(dataset: &Dataset, top_n: usize) -> Self {
        FilterCriteria {
            artists: BTreeSet::new(),
            years: dataset.year_bounds().unwrap_or((0, 0)),
            months: (1, 7),
            top_n,
        }
    }
}

/// A track that made it through the pipeline, with its display string.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTrack {
    /// Row index in [`Dataset::tracks`].
    pub row: usize,
    pub track: Track,
    /// `streams` with thousands separators and two decimals.
    pub streams_display: String,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the four filter steps in order:
///
/// 1. keep tracks whose raw artist field contains a selected name,
/// 2. keep the `top_n` of those by streams,
/// 3. attach the formatted stream count,
/// 4. keep those whose release month lies in both ranges.
///
/// The ranking ignores the date ranges, so the result can hold fewer than
/// `top_n` tracks even when more tracks match every constraint.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<RankedTrack> {
    let matched = match_artists(&dataset.tracks, &criteria.artists);
    debug!("artist filter: {} rows", matched.len());

    let top = top_n(&dataset.tracks, &matched, criteria.top_n);
    debug!("ranking: {} rows", top.len());

    let ranked: Vec<RankedTrack> = top
        .into_iter()
        .map(|row| {
            let track = dataset.tracks[row].clone();
            RankedTrack {
                row,
                streams_display: format_streams(track.streams),
                track,
            }
        })
        .collect();
    debug!("formatted: {} rows", ranked.len());

    let result: Vec<RankedTrack> = ranked
        .into_iter()
        .filter(|r| within_date_range(&r.track, criteria.years, criteria.months))
        .collect();
    debug!("date range: {} rows", result.len());
    result
}

/// Indices of tracks whose raw artist field contains any selected name as
/// a literal substring. An empty selection matches nothing.
pub fn match_artists(tracks: &[Track], artists: &BTreeSet<String>) -> Vec<usize> {
    tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| artists.iter().any(|a| track.artists.contains(a.as_str())))
        .map(|(i, _)| i)
        .collect()
}

/// The `n` candidates with the most streams, largest first. Ties keep the
/// candidates' order.
pub fn top_n(tracks: &[Track], candidates: &[usize], n: usize) -> Vec<usize> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|&a, &b| tracks[b].streams.total_cmp(&tracks[a].streams));
    ranked.truncate(n);
    ranked
}

/// Whether the track's release month falls in both inclusive ranges.
/// Undated tracks never do.
pub fn within_date_range(track: &Track, years: (i32, i32), months: (u32, u32)) -> bool {
    track.release_date.is_some_and(|date| {
        (years.0..=years.1).contains(&date.year()) && (months.0..=months.1).contains(&date.month())
    })
}

/// `1234567.0` → `"1,234,567.00"`.
pub fn format_streams(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{frac_part}")
}
