use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Difficulty, HitObject, TimingPoint};

/// Fallback shown for a missing title or artist
pub const UNKNOWN: &str = "Unknown";

/// A decoded beatmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatmapDocument {
    /// `N` from an `osu file format vN` header, when present
    pub format_version: Option<u32>,
    pub general: BTreeMap<String, String>,
    pub editor: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
    pub difficulty: Difficulty,
    /// Raw `[Events]` lines, not interpreted
    pub events: Vec<String>,
    /// File order, not re-sorted
    pub timing_points: Vec<TimingPoint>,
    pub colours: BTreeMap<String, String>,
    /// File order, not re-sorted
    pub hit_objects: Vec<HitObject>,
}

impl BeatmapDocument {
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("Title").map(String::as_str)
    }

    pub fn artist(&self) -> Option<&str> {
        self.metadata.get("Artist").map(String::as_str)
    }

    /// Difficulty name (`Version` metadata key)
    pub fn version(&self) -> Option<&str> {
        self.metadata.get("Version").map(String::as_str)
    }

    pub fn audio_filename(&self) -> Option<&str> {
        self.general.get("AudioFilename").map(String::as_str)
    }

    /// "Artist - Title [Version]" with `Unknown` for a missing artist or title
    pub fn display_name(&self) -> String {
        let base = format!(
            "{} - {}",
            self.artist().unwrap_or(UNKNOWN),
            self.title().unwrap_or(UNKNOWN)
        );
        match self.version() {
            Some(version) => format!("{} [{}]", base, version),
            None => base,
        }
    }

    /// Number of objects that carry a known variant
    pub fn judgeable_count(&self) -> usize {
        self.hit_objects
            .iter()
            .filter(|obj| obj.is_judgeable())
            .count()
    }

    /// Time of the last object end, or 0 for an empty map
    pub fn length_ms(&self) -> f64 {
        self.hit_objects
            .iter()
            .map(HitObject::end_time)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut doc = BeatmapDocument::default();
        assert_eq!(doc.display_name(), "Unknown - Unknown");

        doc.metadata.insert("Title".to_string(), "Song".to_string());
        doc.metadata.insert("Artist".to_string(), "Band".to_string());
        assert_eq!(doc.display_name(), "Band - Song");

        doc.metadata.insert("Version".to_string(), "Insane".to_string());
        assert_eq!(doc.display_name(), "Band - Song [Insane]");
    }

    #[test]
    fn test_length_ms() {
        let mut doc = BeatmapDocument::default();
        assert_eq!(doc.length_ms(), 0.0);

        doc.hit_objects
            .push(HitObject::parse_line("0,0,1000,1,0").unwrap());
        doc.hit_objects
            .push(HitObject::parse_line("256,192,2000,8,0,5000").unwrap());
        doc.hit_objects
            .push(HitObject::parse_line("0,0,3000,1,0").unwrap());
        assert_eq!(doc.length_ms(), 5000.0);
        assert_eq!(doc.judgeable_count(), 3);
    }
}
