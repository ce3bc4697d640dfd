use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use super::model::{ArtistEntry, Dataset, MonthlyTotal, Track};

/// Turn the cleaned rows into a [`Dataset`]: resolve each track's release
/// month, then build the monthly aggregate and the artist index.
pub fn derive(mut tracks: Vec<Track>) -> Dataset {
    for track in &mut tracks {
        track.release_date = release_month(track.released_year, track.released_month);
    }

    let monthly = monthly_totals(&tracks);
    let artist_index = artist_index(&tracks);

    debug!(
        "Derived {} monthly totals and {} artist entries from {} tracks",
        monthly.len(),
        artist_index.len(),
        tracks.len()
    );

    let dataset = Dataset {
        tracks,
        monthly,
        artist_index,
    };
    if let Some((min, max)) = dataset.year_bounds() {
        debug!("Release years span {min}..={max}");
    }
    dataset
}

/// First day of the given month, or `None` if either part is missing or
/// does not name a real month of a four-digit year.
pub fn release_month(year: Option<i64>, month: Option<i64>) -> Option<NaiveDate> {
    let year = year.filter(|y| (1..=9999).contains(y))?;
    let month = u32::try_from(month?).ok()?;
    NaiveDate::from_ymd_opt(year as i32, month, 1)
}

/// Sum of streams per release month, oldest first. Undated tracks are
/// left out.
pub fn monthly_totals(tracks: &[Track]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for track in tracks {
        if let Some(month) = track.release_date {
            *totals.entry(month).or_default() += track.streams;
        }
    }
    totals
        .into_iter()
        .map(|(month, streams)| MonthlyTotal { month, streams })
        .collect()
}

/// One entry per artist per track, sorted by artist name.
pub fn artist_index(tracks: &[Track]) -> Vec<ArtistEntry> {
    let mut entries: Vec<ArtistEntry> = tracks
        .iter()
        .enumerate()
        .flat_map(|(row, track)| {
            track.artist_names().map(move |name| ArtistEntry {
                name: name.to_string(),
                track: row,
            })
        })
        .collect();
    entries.sort();
    entries
}
