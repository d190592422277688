//! Replay command: decode a replay header and print it.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hitcircle_core::{ReplaySummary, replay};
use serde_json::json;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let data =
        fs::read(file).with_context(|| format!("Failed to read replay {}", file.display()))?;
    let summary = replay::decode(&data)
        .with_context(|| format!("Failed to decode replay {}", file.display()))?;

    if json {
        let content = serde_json::to_string_pretty(&to_json(&summary))
            .context("Failed to serialize replay")?;
        println!("{}", content);
    } else {
        print!("{}", describe(&summary));
    }
    Ok(())
}

/// Summary fields plus the derived views
pub fn to_json(summary: &ReplaySummary) -> serde_json::Value {
    json!({
        "summary": summary,
        "game_mode": summary.game_mode().map(|m| m.to_string()),
        "mods_display": summary.mod_flags().to_string(),
        "accuracy": summary.accuracy(),
        "played_at": summary.played_at().map(|t| t.to_rfc3339()),
        "life_bar_points": summary.life_bar().len(),
    })
}

pub fn describe(summary: &ReplaySummary) -> String {
    let mut out = String::new();

    let mode = summary
        .game_mode()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("unknown ({})", summary.mode));
    let _ = writeln!(out, "Player:      {}", summary.player_name);
    let _ = writeln!(out, "Mode:        {}", mode);
    let _ = writeln!(out, "Version:     {}", summary.version);
    let _ = writeln!(out, "Beatmap:     {}", summary.beatmap_hash);
    let _ = writeln!(out, "Score:       {}", summary.score);
    let _ = writeln!(
        out,
        "Combo:       {}x{}",
        summary.max_combo,
        if summary.perfect_combo { " (perfect)" } else { "" }
    );
    let _ = writeln!(out, "Mods:        {}", summary.mod_flags());
    let _ = writeln!(
        out,
        "Hits:        {} / {} / {} / {} miss (geki {}, katu {})",
        summary.count300,
        summary.count100,
        summary.count50,
        summary.count_miss,
        summary.count_geki,
        summary.count_katu
    );
    if let Some(accuracy) = summary.accuracy() {
        let _ = writeln!(out, "Accuracy:    {:.2}%", accuracy * 100.0);
    }
    if let Some(played_at) = summary.played_at() {
        let _ = writeln!(
            out,
            "Played:      {}",
            played_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    let _ = writeln!(out, "Payload:     {} bytes", summary.payload_len());
    if let Some(id) = summary.online_score_id {
        let _ = writeln!(out, "Online ID:   {}", id);
    }
    out
}
