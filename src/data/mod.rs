/// Data layer: loading, derived views, filtering and chart view models.
///
/// Architecture:
/// ```text
///  .csv (Latin-1) / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, coerce numbers → Vec<Track>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  release months, monthly totals, artist index → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  artists → top N → format → date range → Vec<RankedTrack>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  bar / playlist / monthly / pie / table view models
///   └──────────┘
/// ```

pub mod bucket;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
