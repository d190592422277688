use serde::{Deserialize, Serialize};

use super::number::{parse_finite_prefix, parse_int_prefix};

/// Tempo and sample context applying from `time` onward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub time: f64,
    /// Milliseconds per beat; negative for inherited points (not interpreted here)
    pub beat_length: f64,
    pub meter: i32,
    pub sample_set: i32,
    pub sample_index: i32,
    pub volume: i32,
    pub uninherited: bool,
    pub effects: i32,
}

impl TimingPoint {
    pub const DEFAULT_METER: i32 = 4;
    pub const DEFAULT_VOLUME: i32 = 100;

    pub fn new(time: f64, beat_length: f64) -> Self {
        Self {
            time,
            beat_length,
            meter: Self::DEFAULT_METER,
            sample_set: 0,
            sample_index: 0,
            volume: Self::DEFAULT_VOLUME,
            uninherited: true,
            effects: 0,
        }
    }

    /// Parse one `[TimingPoints]` line.
    ///
    /// At least `time` and `beatLength` are required, both finite. Missing or empty
    /// trailing fields keep their defaults.
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 2 {
            return None;
        }

        let time = parse_finite_prefix(parts[0])?;
        let beat_length = parse_finite_prefix(parts[1])?;
        let mut point = Self::new(time, beat_length);

        let int_field = |index: usize| {
            parts
                .get(index)
                .filter(|field| !field.trim().is_empty())
                .and_then(|field| parse_int_prefix(field))
        };

        if let Some(meter) = int_field(2) {
            point.meter = meter;
        }
        if let Some(sample_set) = int_field(3) {
            point.sample_set = sample_set;
        }
        if let Some(sample_index) = int_field(4) {
            point.sample_index = sample_index;
        }
        if let Some(volume) = int_field(5) {
            point.volume = volume;
        }
        // Present but unparsable still reads as "not 1"
        if let Some(field) = parts.get(6).filter(|field| !field.trim().is_empty()) {
            point.uninherited = parse_int_prefix(field) == Some(1);
        }
        if let Some(effects) = int_field(7) {
            point.effects = effects;
        }

        Some(point)
    }

    /// Serialize back into the 8-field CSV form
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.time,
            self.beat_length,
            self.meter,
            self.sample_set,
            self.sample_index,
            self.volume,
            u8::from(self.uninherited),
            self.effects
        )
    }

    /// Beats per minute for uninherited points with a positive beat length
    pub fn bpm(&self) -> Option<f64> {
        (self.uninherited && self.beat_length > 0.0).then(|| 60_000.0 / self.beat_length)
    }

    /// Whether the kiai effect flag (bit 0) is set
    pub fn is_kiai(&self) -> bool {
        self.effects & 1 != 0
    }
}
