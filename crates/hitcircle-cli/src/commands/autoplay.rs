//! Autoplay command: judge a beatmap with a scripted cursor.
//!
//! The cursor presses on each judgeable object at the first tick at or after
//! its time, one press per tick, and the resulting hits and misses are
//! exported as a timeline.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hitcircle_core::{
    BeatmapDocument, CursorState, JsonExporter, JudgmentRecord, JudgmentSession, ManualClock,
    SessionSummary, SongClock, TsvExporter, Viewport, beatmap, write_records,
};
use tracing::{debug, info, warn};

use crate::cli::ExportFormat;
use crate::config::CliConfig;

pub struct AutoplayOptions {
    pub tick_ms: Option<f64>,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn run(file: &Path, options: AutoplayOptions) -> Result<()> {
    let mut config = CliConfig::load(options.config.as_deref())?;
    if let Some(tick_ms) = options.tick_ms {
        config.tick_ms = tick_ms;
        config.validate()?;
    }

    let doc = beatmap::read_file(file)
        .with_context(|| format!("Failed to read beatmap {}", file.display()))?;
    eprintln!("Autoplay: {}", doc.display_name());

    let (records, summary) = simulate(&doc, &config);

    let exporter: &dyn hitcircle_core::ExportFormat = match options.format {
        ExportFormat::Tsv => &TsvExporter,
        ExportFormat::Json => &JsonExporter,
    };
    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_records(&mut BufWriter::new(file), exporter, &records)?;
            eprintln!("Exported {} judgments to: {}", records.len(), path.display());
        }
        None => write_records(&mut io::stdout().lock(), exporter, &records)?,
    }

    eprintln!(
        "Score: {}  Max combo: {}x  Hits: {}  Misses: {}  Unjudgeable: {}",
        summary.score, summary.max_combo, summary.hits, summary.misses, summary.unjudgeable
    );
    Ok(())
}

/// Run a full session and collect every judgment
pub fn simulate(doc: &BeatmapDocument, config: &CliConfig) -> (Vec<JudgmentRecord>, SessionSummary) {
    let viewport = Viewport::fit(config.viewport_width, config.viewport_height);
    let mut session = JudgmentSession::with_config(doc, config.session);

    let mut targets: Vec<usize> = (0..doc.hit_objects.len())
        .filter(|&i| doc.hit_objects[i].is_judgeable())
        .collect();
    targets.sort_by(|&a, &b| doc.hit_objects[a].time.total_cmp(&doc.hit_objects[b].time));

    let first_time = targets
        .first()
        .map_or(0.0, |&i| doc.hit_objects[i].time);
    let mut clock = ManualClock::new(f64::min(0.0, first_time - session.params().preempt));
    info!(
        "Autoplay start at {}ms, tick {}ms, {} targets",
        clock.now_ms(),
        config.tick_ms,
        targets.len()
    );

    let mut records = Vec::new();
    let mut next_target = 0;
    while !session.is_finished() {
        let t = clock.now_ms();

        while let Some(&index) = targets.get(next_target) {
            if session
                .lifecycle(index)
                .is_some_and(|state| state.is_terminal())
            {
                next_target += 1;
            } else {
                break;
            }
        }

        match targets.get(next_target) {
            Some(&index) if doc.hit_objects[index].time <= t => {
                let screen = viewport.to_screen_space(doc.hit_objects[index].position());
                session.set_cursor(CursorState::new(screen.x, screen.y, true));
            }
            _ => session.cursor_mut().down = false,
        }

        let report = session.tick(&clock, &viewport);
        records.extend(JudgmentRecord::from_tick(&doc.hit_objects, &report));

        // Skip idle stretches, and step over times too large for the tick to move
        let mut next = t + config.tick_ms;
        if session.active().is_empty() || next <= t {
            if let Some(spawn_at) = session.next_spawn_time() {
                next = next.max(spawn_at);
            }
        }
        if next <= t {
            warn!("Song clock cannot advance past {}ms, stopping autoplay", t);
            break;
        }
        clock.set(next);
    }

    let summary = session.summary();
    debug!(
        "Autoplay finished: {} judgments, {} hit, {} missed",
        records.len(),
        summary.hits,
        summary.misses
    );
    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitcircle_core::Lifecycle;

    fn doc(objects: &str) -> BeatmapDocument {
        beatmap::decode(&format!(
            "[Difficulty]\nApproachRate:9\nCircleSize:4\n[HitObjects]\n{}",
            objects
        ))
    }

    #[test]
    fn test_simulate_hits_everything() {
        let doc = doc("64,64,1000,1,0\n448,320,1500,2,0,L|300:300,1,100\n256,192,2000,8,0,3000\n");
        let (records, summary) = simulate(&doc, &CliConfig::default());

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.outcome == Lifecycle::Hit));
        assert_eq!(records.iter().map(|r| r.combo).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(summary.score, 300 + 600 + 900);
        assert_eq!(summary.max_combo, 3);
        assert!(summary.finished);
        for record in &records {
            assert!(record.offset_ms() >= 0.0);
            assert!(record.offset_ms() < CliConfig::default().tick_ms);
        }
    }

    #[test]
    fn test_simulate_stacked_objects() {
        let doc = doc("100,100,1000,1,0\n100,100,1000,1,0\n");
        let (records, summary) = simulate(&doc, &CliConfig::default());
        assert_eq!(summary.hits, 2);
        assert_eq!(records[1].score, 900);
    }

    #[test]
    fn test_simulate_coarse_ticks_miss() {
        let doc = doc("100,100,1000,1,0\n100,100,1001,1,0\n");
        let config = CliConfig {
            tick_ms: 250.0,
            ..Default::default()
        };
        let (records, summary) = simulate(&doc, &config);
        // One press per tick and the second object falls out of the window
        assert_eq!(summary.hits, 1);
        assert_eq!(summary.misses, 1);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_simulate_skips_unjudgeable() {
        let doc = doc("100,100,1000,0,0\n");
        let (records, summary) = simulate(&doc, &CliConfig::default());
        assert!(records.is_empty());
        assert_eq!(summary.unjudgeable, 1);
    }

    #[test]
    fn test_simulate_empty_map() {
        let (records, summary) = simulate(&BeatmapDocument::default(), &CliConfig::default());
        assert!(records.is_empty());
        assert!(summary.finished);
    }

    #[test]
    fn test_simulate_drops_infinite_time() {
        let doc = doc("0,0,1e400,1,0\n");
        assert!(doc.hit_objects.is_empty());
        let (records, summary) = simulate(&doc, &CliConfig::default());
        assert!(records.is_empty());
        assert!(summary.finished);
    }

    #[test]
    fn test_simulate_far_negative_time() {
        let doc = doc("0,0,-1e300,1,0\n100,100,1000,1,0\n");
        let (records, summary) = simulate(&doc, &CliConfig::default());
        assert_eq!(records.len(), 2);
        assert_eq!(summary.hits, 2);
        assert!(summary.finished);
        assert_eq!(records[1].index, 1);
    }

    #[test]
    fn test_simulate_stops_when_clock_is_stuck() {
        // The tick is lost to rounding at this magnitude and nothing follows
        let doc = doc("0,0,-1e300,1,0\n0,0,-1e300,1,0\n");
        let (_, summary) = simulate(&doc, &CliConfig::default());
        assert_eq!(summary.hits, 1);
        assert!(!summary.finished);
    }

    #[test]
    fn test_simulate_jumps_idle_stretch() {
        let doc = doc("100,100,1000000,1,0\n");
        let config = CliConfig {
            tick_ms: 1.0,
            ..Default::default()
        };
        let (records, summary) = simulate(&doc, &config);
        assert_eq!(summary.hits, 1);
        assert_eq!(records[0].offset_ms(), 0.0);
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("map.osu");
        std::fs::write(&map, "[HitObjects]\n100,100,1000,1,0\n").unwrap();
        let output = dir.path().join("out.tsv");

        run(
            &map,
            AutoplayOptions {
                tick_ms: Some(10.0),
                format: ExportFormat::Tsv,
                output: Some(output.clone()),
                config: None,
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\thit\t"));
    }
}
