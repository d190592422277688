//! # hitcircle-core
//!
//! Codec and judgment engine for a circle-clicking rhythm game.
//!
//! This crate provides:
//! - Beatmap text decoding into a [`BeatmapDocument`]
//! - Replay header decoding into a [`ReplaySummary`]
//! - A per-tick judgment loop ([`JudgmentSession`]) for spawn, hit and miss
//! - Judgment timeline export (TSV, NDJSON)
//!
//! Rendering, audio playback and replay frame decompression are left to the
//! host.

pub mod beatmap;
pub mod error;
pub mod export;
pub mod judge;
pub mod prelude;
pub mod replay;

pub use beatmap::{
    BeatmapDecoder, BeatmapDocument, CurveType, Difficulty, DifficultyKey, HitObject,
    HitObjectKind, Point, SliderData, TimingPoint,
};
pub use error::{Error, Result};
pub use export::{ExportFormat, JsonExporter, JudgmentRecord, TsvExporter, write_records};
pub use judge::{
    ApproachParams, ApproachVisual, CursorState, InstantClock, JudgmentEvent, JudgmentSession,
    Lifecycle, ManualClock, SessionConfig, SessionConfigBuilder, SessionSummary, SongClock,
    TickReport, Viewport,
};
pub use replay::{ByteReader, GameMode, Mod, Mods, ReplaySummary};
