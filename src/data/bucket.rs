use super::model::Track;

/// Continuous per-track descriptors that the pie charts bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Danceability,
    Energy,
    Acousticness,
    Tempo,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Danceability,
        Metric::Energy,
        Metric::Acousticness,
        Metric::Tempo,
    ];

    /// Bucket width: percentages group by 5, tempo by 10 BPM.
    pub fn step(self) -> f64 {
        match self {
            Metric::Tempo => 10.0,
            _ => 5.0,
        }
    }

    pub fn value(self, track: &Track) -> Option<f64> {
        match self {
            Metric::Danceability => track.danceability,
            Metric::Energy => track.energy,
            Metric::Acousticness => track.acousticness,
            Metric::Tempo => track.bpm,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Danceability => "Danceability (%)",
            Metric::Energy => "Energy (%)",
            Metric::Acousticness => "Acousticness (%)",
            Metric::Tempo => "Tempo (BPM)",
        }
    }

    /// The track's bucket for this metric, if it has a value.
    pub fn bucket_of(self, track: &Track) -> Option<i64> {
        self.value(track).map(|v| bucket(v, self.step()))
    }
}

/// Nearest lower multiple of `step`.
pub fn bucket(value: f64, step: f64) -> i64 {
    ((value / step).floor() * step) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_buckets_are_lower_multiples_of_five() {
        for v in 0..=100 {
            let expected = (v / 5) * 5;
            assert_eq!(bucket(v as f64, 5.0), expected as i64, "value {v}");
        }
        assert_eq!(bucket(84.9, 5.0), 80);
        assert_eq!(bucket(85.0, 5.0), 85);
    }

    #[test]
    fn tempo_buckets_are_lower_multiples_of_ten() {
        assert_eq!(bucket(125.0, 10.0), 120);
        assert_eq!(bucket(79.0, 10.0), 70);
        assert_eq!(bucket(200.0, 10.0), 200);
    }

    #[test]
    fn missing_values_have_no_bucket() {
        let mut track = Track::new("t", "a", 1.0);
        track.bpm = Some(97.0);
        assert_eq!(Metric::Tempo.bucket_of(&track), Some(90));
        assert_eq!(Metric::Energy.bucket_of(&track), None);
    }
}
