//! Beatmap command: decode a beatmap and print it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hitcircle_core::{BeatmapDocument, beatmap};

pub fn run(file: &Path, json: bool) -> Result<()> {
    let bytes =
        fs::read(file).with_context(|| format!("Failed to read beatmap {}", file.display()))?;
    let doc = beatmap::decode_bytes(&bytes);

    if json {
        let content =
            serde_json::to_string_pretty(&doc).context("Failed to serialize beatmap")?;
        println!("{}", content);
    } else {
        print!("{}", describe(&doc));
    }
    Ok(())
}

/// Human-readable overview of a document
pub fn describe(doc: &BeatmapDocument) -> String {
    let mut out = String::new();
    let d = &doc.difficulty;

    let _ = writeln!(out, "{}", doc.display_name());
    if let Some(version) = doc.format_version {
        let _ = writeln!(out, "Format:      v{}", version);
    }
    if let Some(audio) = doc.audio_filename() {
        let _ = writeln!(out, "Audio:       {}", audio);
    }
    let _ = writeln!(
        out,
        "Difficulty:  AR {} / CS {} / OD {} / HP {}",
        d.approach_rate, d.circle_size, d.overall_difficulty, d.hp_drain_rate
    );
    let _ = writeln!(
        out,
        "Sliders:     multiplier {} / tick rate {}",
        d.slider_multiplier, d.slider_tick_rate
    );

    let bpms: Vec<f64> = doc.timing_points.iter().filter_map(|tp| tp.bpm()).collect();
    if let (Some(min), Some(max)) = (
        bpms.iter().copied().reduce(f64::min),
        bpms.iter().copied().reduce(f64::max),
    ) {
        if (max - min).abs() < f64::EPSILON {
            let _ = writeln!(out, "BPM:         {:.0}", min);
        } else {
            let _ = writeln!(out, "BPM:         {:.0}-{:.0}", min, max);
        }
    }
    let _ = writeln!(out, "Timing:      {} points", doc.timing_points.len());

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for obj in &doc.hit_objects {
        *kinds.entry(obj.kind_name().unwrap_or("unknown")).or_default() += 1;
    }
    let breakdown: Vec<String> = kinds
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();
    let _ = writeln!(
        out,
        "Objects:     {} ({})",
        doc.hit_objects.len(),
        if breakdown.is_empty() {
            "none".to_string()
        } else {
            breakdown.join(", ")
        }
    );

    let length = doc.length_ms() / 1000.0;
    let _ = writeln!(
        out,
        "Length:      {}:{:02}",
        (length / 60.0).floor() as u64,
        (length % 60.0).floor() as u64
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let doc = beatmap::decode(
            "osu file format v14\n\
             [General]\nAudioFilename: song.mp3\n\
             [Metadata]\nTitle:Song\nArtist:Band\nVersion:Hard\n\
             [Difficulty]\nAR:9\n\
             [TimingPoints]\n0,500,4,1,0,100,1,0\n\
             [HitObjects]\n0,0,1000,1,0\n0,0,2000,1,0\n256,192,3000,8,0,65000\n0,0,4000,0,0\n",
        );
        let text = describe(&doc);
        assert!(text.starts_with("Band - Song [Hard]\n"));
        assert!(text.contains("Format:      v14"));
        assert!(text.contains("Audio:       song.mp3"));
        assert!(text.contains("AR 9 / CS 5"));
        assert!(text.contains("BPM:         120"));
        assert!(text.contains("Objects:     4 (2 circle, 1 spinner, 1 unknown)"));
        assert!(text.contains("Length:      1:05"));
    }

    #[test]
    fn test_describe_empty() {
        let text = describe(&BeatmapDocument::default());
        assert!(text.starts_with("Unknown - Unknown\n"));
        assert!(text.contains("Objects:     0 (none)"));
        assert!(!text.contains("BPM"));
    }
}
