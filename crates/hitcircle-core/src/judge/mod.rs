//! Real-time judgment loop.
//!
//! A [`JudgmentSession`] borrows a decoded document and is advanced once per
//! host tick with the song time (directly or through a [`SongClock`]) and the
//! current [`Viewport`]. The host writes the cursor snapshot between ticks.

mod clock;
mod params;
mod session;
mod viewport;

pub use clock::{InstantClock, ManualClock, SongClock};
pub use params::{ApproachParams, SessionConfig, SessionConfigBuilder};
pub use session::{
    ApproachVisual, JudgmentEvent, JudgmentSession, Lifecycle, SessionSummary, TickReport,
};
pub use viewport::{CursorState, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, Viewport};
