//! Chart-ready view models built from the filtered rows.
//!
//! Every builder is a pure function of the filter result and returns an
//! empty collection for empty input.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::bucket::Metric;
use super::filter::RankedTrack;

// ---------------------------------------------------------------------------
// Top-tracks bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
    /// Value label drawn above the bar.
    pub text: String,
}

pub fn bar_view(rows: &[RankedTrack]) -> Vec<BarEntry> {
    rows.iter()
        .map(|r| BarEntry {
            label: r.track.name.clone(),
            value: r.track.streams,
            text: r.streams_display.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Playlist counts per platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    /// `(position in rows, value)`; rows without a value are skipped.
    pub points: Vec<(usize, f64)>,
}

/// Spotify, Deezer and Apple Music series, always in that order.
pub fn playlist_view(rows: &[RankedTrack]) -> Vec<Series> {
    let series = |name, count: fn(&RankedTrack) -> Option<i64>| Series {
        name,
        points: rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| count(r).map(|c| (i, c as f64)))
            .collect(),
    };
    vec![
        series("Spotify", |r: &RankedTrack| r.track.spotify_playlists),
        series("Deezer", |r: &RankedTrack| r.track.deezer_playlists),
        series("Apple Music", |r: &RankedTrack| r.track.apple_playlists),
    ]
}

/// Category labels for the x axis of the bar and playlist charts.
pub fn track_labels(rows: &[RankedTrack]) -> Vec<String> {
    rows.iter().map(|r| r.track.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Streams by release month
// ---------------------------------------------------------------------------

/// `(release month, streams)` sorted by month. Undated rows are omitted.
pub fn monthly_view(rows: &[RankedTrack]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = rows
        .iter()
        .filter_map(|r| r.track.release_date.map(|d| (d, r.track.streams)))
        .collect();
    points.sort_by_key(|&(date, _)| date);
    points
}

// ---------------------------------------------------------------------------
// Bucketed pie charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub bucket: i64,
    pub count: usize,
    /// Share of all bucketed rows, in `0.0..=1.0`.
    pub fraction: f64,
}

pub fn pie_view(rows: &[RankedTrack], metric: Metric) -> Vec<PieSlice> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for r in rows {
        if let Some(bucket) = metric.bucket_of(&r.track) {
            *counts.entry(bucket).or_default() += 1;
        }
    }
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(bucket, count)| PieSlice {
            bucket,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top tracks table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub track: String,
    pub artists: String,
    pub streams: String,
}

pub fn table_view(rows: &[RankedTrack]) -> Vec<TableRow> {
    rows.iter()
        .map(|r| TableRow {
            track: r.track.name.clone(),
            artists: r.track.artists.clone(),
            streams: r.streams_display.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::format_streams;
    use crate::data::model::Track;

    fn ranked(name: &str, streams: f64) -> RankedTrack {
        RankedTrack {
            row: 0,
            track: Track::new(name, "Artist", streams),
            streams_display: format_streams(streams),
        }
    }

    #[test]
    fn every_view_accepts_empty_input() {
        assert!(bar_view(&[]).is_empty());
        assert!(monthly_view(&[]).is_empty());
        assert!(table_view(&[]).is_empty());
        assert!(track_labels(&[]).is_empty());
        for metric in Metric::ALL {
            assert!(pie_view(&[], metric).is_empty());
        }
        let series = playlist_view(&[]);
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.points.is_empty()));
    }

    #[test]
    fn bar_plots_numbers_and_labels_with_display_text() {
        let bars = bar_view(&[ranked("Flowers", 1_316_855_716.0)]);
        assert_eq!(bars[0].label, "Flowers");
        assert_eq!(bars[0].value, 1_316_855_716.0);
        assert_eq!(bars[0].text, "1,316,855,716.00");
    }

    #[test]
    fn playlist_series_skip_missing_counts() {
        let mut a = ranked("a", 1.0);
        a.track.spotify_playlists = Some(10);
        a.track.apple_playlists = Some(3);
        let mut b = ranked("b", 1.0);
        b.track.spotify_playlists = Some(20);
        b.track.deezer_playlists = Some(7);

        let series = playlist_view(&[a, b]);
        let names: Vec<&str> = series.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Spotify", "Deezer", "Apple Music"]);
        assert_eq!(series[0].points, vec![(0, 10.0), (1, 20.0)]);
        assert_eq!(series[1].points, vec![(1, 7.0)]);
        assert_eq!(series[2].points, vec![(0, 3.0)]);
    }

    #[test]
    fn monthly_points_are_chronological_and_skip_undated() {
        let date = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        let mut late = ranked("late", 5.0);
        late.track.release_date = Some(date(2023, 3));
        let mut early = ranked("early", 9.0);
        early.track.release_date = Some(date(2019, 11));
        let undated = ranked("undated", 1.0);

        let points = monthly_view(&[late, undated, early]);
        assert_eq!(points, vec![(date(2019, 11), 9.0), (date(2023, 3), 5.0)]);
    }

    #[test]
    fn pie_counts_buckets_and_fractions() {
        let rows: Vec<RankedTrack> = [Some(61.0), Some(64.9), Some(70.0), None]
            .into_iter()
            .map(|v| {
                let mut r = ranked("t", 1.0);
                r.track.energy = v;
                r
            })
            .collect();

        let slices = pie_view(&rows, Metric::Energy);
        assert_eq!(slices.len(), 2);
        assert_eq!((slices[0].bucket, slices[0].count), (60, 2));
        assert_eq!((slices[1].bucket, slices[1].count), (70, 1));
        assert!((slices.iter().map(|s| s.fraction).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn table_uses_formatted_streams() {
        let table = table_view(&[ranked("Seven", 100.0)]);
        assert_eq!(
            table,
            vec![TableRow {
                track: "Seven".into(),
                artists: "Artist".into(),
                streams: "100.00".into(),
            }]
        );
    }
}
