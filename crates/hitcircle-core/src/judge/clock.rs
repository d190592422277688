use std::time::{Duration, Instant};

/// Source of the current song position
pub trait SongClock {
    /// Song time in ms
    fn now_ms(&self) -> f64;
}

/// Clock set explicitly by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    time_ms: f64,
}

impl ManualClock {
    pub fn new(time_ms: f64) -> Self {
        Self { time_ms }
    }

    pub fn set(&mut self, time_ms: f64) {
        self.time_ms = time_ms;
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.time_ms += delta_ms;
    }
}

impl SongClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.time_ms
    }
}

/// Wall clock measured from when playback started.
///
/// Reports 0 while stopped.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock {
    started: Option<Instant>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playback at `offset_ms` into the song.
    ///
    /// An offset that does not fit a `Duration` starts from zero.
    pub fn start(&mut self, offset_ms: f64) {
        let offset = Duration::try_from_secs_f64(offset_ms.max(0.0) / 1000.0).unwrap_or_default();
        let now = Instant::now();
        self.started = Some(now.checked_sub(offset).unwrap_or(now));
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some()
    }
}

impl SongClock for InstantClock {
    fn now_ms(&self) -> f64 {
        match self.started {
            Some(started) => started.elapsed().as_secs_f64() * 1000.0,
            None => 0.0,
        }
    }
}
