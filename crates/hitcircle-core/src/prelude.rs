//! Prelude module for convenient imports
//!
//! ```ignore
//! use hitcircle_core::prelude::*;
//! ```

// Decoding
pub use crate::beatmap::{BeatmapDocument, HitObject, HitObjectKind, TimingPoint};
pub use crate::replay::ReplaySummary;

// Error handling
pub use crate::error::{Error, Result};

// Judgment
pub use crate::judge::{
    CursorState, JudgmentEvent, JudgmentSession, Lifecycle, SessionConfig, SongClock, TickReport,
    Viewport,
};

// Export format trait
pub use crate::export::{ExportFormat, JudgmentRecord};
