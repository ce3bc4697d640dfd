use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{columns, Track};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Knobs for the row-cleaning pass.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Discard the first data row of CSV input. The published export
    /// carries a junk row right below the header.
    pub skip_first_row: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_first_row: true,
        }
    }
}

/// Load the track table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma separated, Latin-1 encoded, header row first
/// * `.json` – `[{ "track_name": ..., "streams": ..., ... }, ...]`
///
/// Cells that fail numeric coercion become missing values; rows whose
/// `streams` is missing are dropped.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Vec<Track>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let read = || {
        std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => parse_csv(&decode_latin1(&read()?), options),
        "json" => parse_json(&String::from_utf8_lossy(&read()?)),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Every Latin-1 byte is the Unicode scalar of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse already-decoded CSV text. The header must name every column in
/// [`columns::REQUIRED`]; extra columns are ignored.
pub fn parse_csv(text: &str, options: &LoadOptions) -> Result<Vec<Track>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut index: BTreeMap<&'static str, usize> = BTreeMap::new();
    for column in columns::REQUIRED {
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or(LoadError::MissingColumn(column))?;
        index.insert(column, idx);
    }

    let mut tracks = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        if row_no == 0 && options.skip_first_row {
            debug!("Discarding first data row");
            continue;
        }
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable CSV row {row_no}: {e}");
                dropped += 1;
                continue;
            }
        };

        let cell = |column: &str| {
            index
                .get(column)
                .and_then(|&idx| record.get(idx))
                .map(str::to_string)
        };
        match track_from_cells(cell) {
            Some(track) => tracks.push(track),
            None => dropped += 1,
        }
    }

    info!(
        "Read {} tracks from CSV, dropped {dropped} rows without usable streams",
        tracks.len()
    );
    Ok(tracks)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// Absent keys are treated like empty cells.
pub fn parse_json(text: &str) -> Result<Vec<Track>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root.as_array().ok_or(LoadError::NotRecords)?;

    let mut tracks = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for (i, rec) in records.iter().enumerate() {
        let Some(obj) = rec.as_object() else {
            warn!("Skipping JSON record {i}: not an object");
            dropped += 1;
            continue;
        };
        match track_from_cells(|column| obj.get(column).and_then(json_cell)) {
            Some(track) => tracks.push(track),
            None => dropped += 1,
        }
    }

    info!(
        "Read {} tracks from JSON, dropped {dropped} records without usable streams",
        tracks.len()
    );
    Ok(tracks)
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Row coercion
// ---------------------------------------------------------------------------

/// Build a track from a cell accessor. `None` when `streams` is unusable.
fn track_from_cells(cell: impl Fn(&str) -> Option<String>) -> Option<Track> {
    let number = |column: &str| cell(column).as_deref().and_then(parse_number);
    let integer = |column: &str| cell(column).as_deref().and_then(parse_integer);
    let count = |column: &str| cell(column).as_deref().and_then(parse_count);

    let streams = number(columns::STREAMS)?;

    let mut track = Track::new(
        cell(columns::TRACK_NAME).unwrap_or_default(),
        cell(columns::ARTISTS).unwrap_or_default(),
        streams,
    );
    track.released_year = integer(columns::RELEASED_YEAR);
    track.released_month = integer(columns::RELEASED_MONTH);
    track.released_day = integer(columns::RELEASED_DAY);
    track.spotify_playlists = count(columns::SPOTIFY_PLAYLISTS);
    track.deezer_playlists = count(columns::DEEZER_PLAYLISTS);
    track.apple_playlists = count(columns::APPLE_PLAYLISTS);
    track.danceability = number(columns::DANCEABILITY);
    track.energy = number(columns::ENERGY);
    track.acousticness = number(columns::ACOUSTICNESS);
    track.bpm = number(columns::BPM);
    Some(track)
}

/// Lenient numeric coercion: anything that is not a finite number is missing.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integral numbers only; `"2023.0"` is accepted, `"2023.5"` is not.
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    parse_number(s)
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}

/// Playlist counts, which the export writes with thousands separators.
fn parse_count(s: &str) -> Option<i64> {
    parse_integer(&s.replace(',', ""))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "track_name,artist(s)_name,artist_count,released_year,released_month,released_day,in_spotify_playlists,streams,in_apple_playlists,in_deezer_playlists,bpm,danceability_%,energy_%,acousticness_%";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        text.push('\n');
        text.push_str("junk,junk,0,0,0,0,0,0,0,0,0,0,0,0\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn coerces_cells_and_drops_rows_without_streams() {
        let text = csv_with_rows(&[
            "Seven,\"Latto, Jung Kook\",2,2023,7,14,553,141381703,43,\"1,263\",125,80,83,31",
            "Broken,Nobody,1,2023,3,1,10,not-a-number,1,1,100,50,50,50",
            "Empty,Nobody,1,2023,3,1,10,,1,1,100,50,50,50",
            "Weird,Someone,1,year,13,x,oops,42,1,1,fast,,70,5",
        ]);
        let tracks = parse_csv(&text, &LoadOptions::default()).unwrap();
        assert_eq!(tracks.len(), 2);

        let seven = &tracks[0];
        assert_eq!(seven.name, "Seven");
        assert_eq!(seven.artists, "Latto, Jung Kook");
        assert_eq!(seven.streams, 141_381_703.0);
        assert_eq!(seven.released_year, Some(2023));
        assert_eq!(seven.released_month, Some(7));
        assert_eq!(seven.deezer_playlists, Some(1263));
        assert_eq!(seven.bpm, Some(125.0));
        assert_eq!(seven.release_date, None);

        let weird = &tracks[1];
        assert_eq!(weird.streams, 42.0);
        assert_eq!(weird.released_year, None);
        assert_eq!(weird.released_month, Some(13));
        assert_eq!(weird.released_day, None);
        assert_eq!(weird.spotify_playlists, None);
        assert_eq!(weird.bpm, None);
        assert_eq!(weird.danceability, None);
        assert_eq!(weird.energy, Some(70.0));
    }

    #[test]
    fn first_data_row_is_discarded_unless_disabled() {
        let text = csv_with_rows(&["Song,A,1,2020,1,1,1,100,1,1,100,1,1,1"]);

        let skipped = parse_csv(&text, &LoadOptions::default()).unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].name, "Song");

        let kept = parse_csv(&text, &LoadOptions { skip_first_row: false }).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "junk");
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "track_name,streams\nx,1\ny,2\n";
        let err = parse_csv(text, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("artist(s)_name")));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = parse_csv("", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn non_finite_streams_are_dropped() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_integer("2023.0"), Some(2023));
        assert_eq!(parse_integer("2023.5"), None);
    }

    #[test]
    fn reads_latin1_csv_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let mut bytes = csv_with_rows(&[]).into_bytes();
        bytes.extend_from_slice(b"Caf\xe9,Beyonc\xe9,1,2016,4,23,10,99,1,1,90,60,70,10\n");
        file.write_all(&bytes).unwrap();

        let tracks = load_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Café");
        assert_eq!(tracks[0].artists, "Beyoncé");
    }

    #[test]
    fn reads_json_records() {
        let text = r#"[
            {"track_name": "A", "artist(s)_name": "X", "streams": 10, "released_year": "2020", "released_month": 5},
            {"track_name": "B", "artist(s)_name": "Y", "streams": null},
            "garbage"
        ]"#;
        let tracks = parse_json(text).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].released_year, Some(2020));
        assert_eq!(tracks[0].released_month, Some(5));
        assert!(matches!(parse_json("{}"), Err(LoadError::NotRecords)));
    }

    #[test]
    fn missing_file_and_unknown_extension_fail() {
        let err = load_file(Path::new("/nonexistent/songs.csv"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));

        let err = load_file(Path::new("songs.xlsx"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }
}
