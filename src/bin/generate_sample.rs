use anyhow::{anyhow, Context, Result};

const HEADER: [&str; 14] = [
    "track_name",
    "artist(s)_name",
    "artist_count",
    "released_year",
    "released_month",
    "released_day",
    "in_spotify_playlists",
    "in_deezer_playlists",
    "in_apple_playlists",
    "streams",
    "bpm",
    "danceability_%",
    "energy_%",
    "acousticness_%",
];

const ARTISTS: [&str; 8] = [
    "Aurora Vale",
    "The Midnight Ferries",
    "DJ Solén",
    "Kaito",
    "Marisol Peña",
    "Low Tide",
    "Björk Ensemble",
    "Nova & The Echoes",
];

const WORDS: [&str; 12] = [
    "Neon", "Summer", "Ghost", "Paper", "Electric", "Golden", "River", "Heart", "Static",
    "Velvet", "Echo", "Coração",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }
}

fn sample_row(rng: &mut SimpleRng, row: usize) -> Vec<String> {
    let title = format!("{} {}", rng.pick(&WORDS), rng.pick(&WORDS));

    let lead = rng.pick(&ARTISTS);
    let artists = if rng.range(0, 3) == 0 {
        format!("{lead}, {}", rng.pick(&ARTISTS))
    } else {
        lead.to_string()
    };
    let artist_count = artists.split(',').count();

    let streams = rng.range(5_000_000, 3_500_000_000);
    let year = rng.range(1990, 2023);
    let month = rng.range(1, 12);

    let mut cells = vec![
        title,
        artists,
        artist_count.to_string(),
        year.to_string(),
        month.to_string(),
        rng.range(1, 28).to_string(),
        rng.range(100, 50_000).to_string(),
        // Deezer counts carry thousands separators in the published export.
        group_thousands(rng.range(0, 9_000)),
        rng.range(0, 500).to_string(),
        streams.to_string(),
        rng.range(65, 200).to_string(),
        rng.range(20, 95).to_string(),
        rng.range(10, 98).to_string(),
        rng.range(0, 90).to_string(),
    ];

    // A few malformed cells so the loader's coercion has work to do.
    match row % 37 {
        5 => cells[9] = "BPM110KeyAModeMajor".to_string(),
        11 => cells[4] = "13".to_string(),
        17 => cells[3] = String::new(),
        _ => {}
    }
    cells
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(d);
    }
    out
}

/// Characters outside Latin-1 are replaced with `?`.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = 500;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    // The published file has a junk row right below the header.
    writer.write_record(HEADER.iter().map(|_| "--"))?;
    for row in 0..rows {
        writer.write_record(sample_row(&mut rng, row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV: {}", e.error()))?;
    let utf8 = String::from_utf8(bytes).context("CSV output is not UTF-8")?;

    let output_path = "sample_streams.csv";
    std::fs::write(output_path, encode_latin1(&utf8))
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} tracks to {output_path}");
    Ok(())
}
