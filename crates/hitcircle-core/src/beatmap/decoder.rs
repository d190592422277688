//! Line-oriented decoder for the text beatmap format.
//!
//! Decoding never fails: a line that can't be read is dropped and the rest of
//! the document is still decoded.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use strum::EnumString;
use tracing::{debug, trace};

use crate::error::Result;

use super::number::parse_float_prefix;
use super::{BeatmapDocument, DifficultyKey, HitObject, TimingPoint};

const FORMAT_HEADER: &str = "osu file format v";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum Section {
    General,
    Editor,
    Metadata,
    Difficulty,
    Events,
    TimingPoints,
    Colours,
    HitObjects,
}

/// Where the decoder currently is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Before the first section header
    Preamble,
    Known(Section),
    /// Inside a section this decoder doesn't handle
    Unknown,
}

/// Incremental decoder fed one line at a time
#[derive(Debug)]
pub struct BeatmapDecoder {
    position: Position,
    document: BeatmapDocument,
    line_number: usize,
    dropped_lines: usize,
}

impl BeatmapDecoder {
    pub fn new() -> Self {
        Self {
            position: Position::Preamble,
            document: BeatmapDocument::default(),
            line_number: 0,
            dropped_lines: 0,
        }
    }

    /// Decode a single raw line (line terminators already removed)
    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;

        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() || line.starts_with("//") {
            return;
        }

        if let Some(name) = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            self.position = match Section::from_str(name) {
                Ok(section) => Position::Known(section),
                Err(_) => {
                    debug!("Unrecognized section [{}] at line {}", name, self.line_number);
                    Position::Unknown
                }
            };
            return;
        }

        let section = match self.position {
            Position::Preamble => {
                if let Some(version) = line.strip_prefix(FORMAT_HEADER) {
                    self.document.format_version = version.trim().parse().ok();
                }
                return;
            }
            Position::Unknown => return,
            Position::Known(section) => section,
        };

        let accepted = match section {
            Section::General => parse_key_value(line, &mut self.document.general),
            Section::Editor => parse_key_value(line, &mut self.document.editor),
            Section::Metadata => parse_key_value(line, &mut self.document.metadata),
            Section::Colours => parse_key_value(line, &mut self.document.colours),
            Section::Difficulty => self.parse_difficulty(line),
            Section::Events => {
                self.document.events.push(line.to_string());
                true
            }
            Section::TimingPoints => match TimingPoint::parse_line(line) {
                Some(point) => {
                    self.document.timing_points.push(point);
                    true
                }
                None => false,
            },
            Section::HitObjects => match HitObject::parse_line(line) {
                Some(obj) => {
                    self.document.hit_objects.push(obj);
                    true
                }
                None => false,
            },
        };

        if !accepted {
            self.dropped_lines += 1;
            trace!(
                "Dropped malformed line {} in {:?}: {:?}",
                self.line_number, section, line
            );
        }
    }

    /// Number of lines dropped so far
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    pub fn finish(self) -> BeatmapDocument {
        debug!(
            "Decoded beatmap: {} hit objects, {} timing points, {} dropped lines",
            self.document.hit_objects.len(),
            self.document.timing_points.len(),
            self.dropped_lines
        );
        self.document
    }

    /// Returns `false` when the line didn't have a `key: value` shape.
    /// A recognized key with a non-numeric value leaves the field untouched.
    fn parse_difficulty(&mut self, line: &str) -> bool {
        let Some((key, value)) = split_key_value(line) else {
            return false;
        };

        if let Ok(key) = DifficultyKey::from_str(key) {
            match parse_float_prefix(value) {
                Some(number) => self.document.difficulty.set(key, number),
                None => trace!("Ignoring non-numeric {}: {:?}", key.canonical_name(), value),
            }
        }
        true
    }
}

impl Default for BeatmapDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode beatmap text into a document
pub fn decode(text: &str) -> BeatmapDocument {
    let mut decoder = BeatmapDecoder::new();
    for line in text.lines() {
        decoder.feed_line(line);
    }
    decoder.finish()
}

/// Decode raw file bytes, sniffing a UTF-8 BOM and replacing invalid sequences
pub fn decode_bytes(bytes: &[u8]) -> BeatmapDocument {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        debug!("Beatmap contains invalid UTF-8, decoded lossily");
    }
    decode(&text)
}

/// Read and decode a beatmap file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<BeatmapDocument> {
    let bytes = fs::read(&path)?;
    debug!("Read beatmap {} ({} bytes)", path.as_ref().display(), bytes.len());
    Ok(decode_bytes(&bytes))
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

fn parse_key_value(line: &str, target: &mut BTreeMap<String, String>) -> bool {
    match split_key_value(line) {
        Some((key, value)) => {
            target.insert(key.to_string(), value.to_string());
            true
        }
        None => false,
    }
}
