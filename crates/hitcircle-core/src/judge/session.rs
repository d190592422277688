//! Per-tick judgment over one beatmap document.
//!
//! The document is borrowed immutably; per-object runtime state lives in the
//! session, indexed by the object's position in `hit_objects`. Each call to
//! [`JudgmentSession::update`] runs one step:
//!
//! 1. spawn every pending object within `preempt` of the song time
//! 2. miss active objects that fell past the miss threshold
//! 3. hit-test active objects against the cursor while the button is held
//!
//! A hit consumes the press, so one press never lands on two objects.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use tracing::{debug, trace};

use super::clock::SongClock;
use super::params::{ApproachParams, SessionConfig};
use super::viewport::{CursorState, Viewport};
use crate::beatmap::{BeatmapDocument, HitObject};

/// Runtime state of one hit object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Lifecycle {
    Unspawned,
    Approaching,
    Hit,
    Missed,
    /// Object has no known variant and is never judged
    Ignored,
}

impl Lifecycle {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Hit | Self::Missed | Self::Ignored)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Lifecycle transition emitted during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum JudgmentEvent {
    Spawned {
        index: usize,
    },
    Hit {
        index: usize,
        score_delta: u64,
        /// Combo after this hit
        combo: u32,
    },
    Missed {
        index: usize,
    },
}

impl JudgmentEvent {
    pub fn index(&self) -> usize {
        match *self {
            Self::Spawned { index } | Self::Hit { index, .. } | Self::Missed { index } => index,
        }
    }
}

/// Everything that changed during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Song time of the tick (ms)
    pub time: f64,
    pub events: Vec<JudgmentEvent>,
    pub score: u64,
    pub combo: u32,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn hits(&self) -> impl Iterator<Item = &JudgmentEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, JudgmentEvent::Hit { .. }))
    }

    pub fn misses(&self) -> impl Iterator<Item = &JudgmentEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, JudgmentEvent::Missed { .. }))
    }
}

/// Render hints for an approaching object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproachVisual {
    /// Approach ring scale, 3 at spawn and 1 at the object's time
    pub approach_scale: f64,
    /// False once the object's time has been reached
    pub approach_visible: bool,
    /// Opacity in 0..=1
    pub alpha: f64,
}

impl ApproachVisual {
    pub fn at(diff: f64, params: &ApproachParams) -> Self {
        let approach_scale = if params.preempt > 0.0 {
            1.0 + 2.0 * (diff / params.preempt)
        } else {
            1.0
        };
        let alpha = if params.fade_in > 0.0 && diff > params.preempt - params.fade_in {
            ((params.preempt - diff) / params.fade_in).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            approach_scale,
            approach_visible: diff > 0.0,
            alpha,
        }
    }
}

/// Snapshot of session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub hits: u32,
    pub misses: u32,
    /// Judgeable objects not yet hit or missed
    pub remaining: usize,
    /// Objects without a known variant
    pub unjudgeable: usize,
    pub finished: bool,
}

/// Judgment state for one play of a document
#[derive(Debug, Clone)]
pub struct JudgmentSession<'a> {
    objects: &'a [HitObject],
    params: ApproachParams,
    config: SessionConfig,
    lifecycle: Vec<Lifecycle>,
    /// Judgeable indices ordered by time, ties in file order
    spawn_queue: Vec<usize>,
    next_spawn: usize,
    /// Spawned and not yet judged, in spawn order
    active: Vec<usize>,
    cursor: CursorState,
    score: u64,
    combo: u32,
    max_combo: u32,
    hits: u32,
    misses: u32,
}

impl<'a> JudgmentSession<'a> {
    /// Start a session with parameters from the document's difficulty block
    pub fn new(document: &'a BeatmapDocument) -> Self {
        Self::with_config(document, SessionConfig::default())
    }

    pub fn with_config(document: &'a BeatmapDocument, config: SessionConfig) -> Self {
        let params = ApproachParams::from_difficulty(&document.difficulty);
        Self::with_params(document, params, config)
    }

    pub fn with_params(
        document: &'a BeatmapDocument,
        params: ApproachParams,
        config: SessionConfig,
    ) -> Self {
        let objects = document.hit_objects.as_slice();

        let lifecycle: Vec<Lifecycle> = objects
            .iter()
            .map(|obj| {
                if obj.is_judgeable() {
                    Lifecycle::Unspawned
                } else {
                    Lifecycle::Ignored
                }
            })
            .collect();

        let mut spawn_queue: Vec<usize> = (0..objects.len())
            .filter(|&i| lifecycle[i] == Lifecycle::Unspawned)
            .collect();
        spawn_queue.sort_by(|&a, &b| objects[a].time.total_cmp(&objects[b].time));

        debug!(
            "Session started: {} objects ({} judgeable), preempt={}ms, fade_in={}ms, radius={}",
            objects.len(),
            spawn_queue.len(),
            params.preempt,
            params.fade_in,
            params.radius
        );

        Self {
            objects,
            params,
            config,
            lifecycle,
            spawn_queue,
            next_spawn: 0,
            active: Vec::new(),
            cursor: CursorState::default(),
            score: 0,
            combo: 0,
            max_combo: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn params(&self) -> &ApproachParams {
        &self.params
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Indices of spawned, unjudged objects in spawn order
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// Song time at which the next queued object spawns
    pub fn next_spawn_time(&self) -> Option<f64> {
        self.spawn_queue
            .get(self.next_spawn)
            .map(|&index| self.objects[index].time - self.params.preempt)
    }

    pub fn lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.lifecycle.get(index).copied()
    }

    pub fn lifecycles(&self) -> &[Lifecycle] {
        &self.lifecycle
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Input side of the session; the only state writable between ticks
    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorState) {
        self.cursor = cursor;
    }

    /// Advance using the clock's current song time
    pub fn tick<C: SongClock + ?Sized>(&mut self, clock: &C, viewport: &Viewport) -> TickReport {
        self.update(clock.now_ms(), viewport)
    }

    /// Run one judgment step at song time `t` (ms)
    pub fn update(&mut self, t: f64, viewport: &Viewport) -> TickReport {
        let mut events = Vec::new();

        self.spawn_due(t, &mut events);

        let objects = self.objects;
        let cursor_map = viewport.to_map_space(self.cursor.position());
        let active = std::mem::take(&mut self.active);
        for &index in &active {
            let obj = &objects[index];
            let diff = obj.time - t;

            if diff <= -self.config.miss_threshold_ms {
                self.record_miss(index, &mut events);
                continue;
            }

            if self.cursor.down
                && diff.abs() < self.config.hit_window_ms
                && cursor_map.distance(obj.position()) < self.params.radius
            {
                self.cursor.down = false;
                self.record_hit(index, &mut events);
            }
        }
        self.active = active;
        let lifecycle = &self.lifecycle;
        self.active
            .retain(|&index| lifecycle[index] == Lifecycle::Approaching);

        TickReport {
            time: t,
            events,
            score: self.score,
            combo: self.combo,
        }
    }

    fn spawn_due(&mut self, t: f64, events: &mut Vec<JudgmentEvent>) {
        let start = self.next_spawn;
        while let Some(&index) = self.spawn_queue.get(self.next_spawn) {
            if self.objects[index].time - t > self.params.preempt {
                break;
            }
            self.next_spawn += 1;
        }

        let mut due = self.spawn_queue[start..self.next_spawn].to_vec();
        due.sort_unstable();
        for index in due {
            self.lifecycle[index] = Lifecycle::Approaching;
            self.active.push(index);
            trace!("spawn #{} at t={}", index, t);
            events.push(JudgmentEvent::Spawned { index });
        }
    }

    fn record_hit(&mut self, index: usize, events: &mut Vec<JudgmentEvent>) {
        self.lifecycle[index] = Lifecycle::Hit;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.hits += 1;
        let score_delta = self.config.base_score.saturating_mul(u64::from(self.combo));
        self.score = self.score.saturating_add(score_delta);
        trace!("hit #{}: +{} (combo {})", index, score_delta, self.combo);
        events.push(JudgmentEvent::Hit {
            index,
            score_delta,
            combo: self.combo,
        });
    }

    fn record_miss(&mut self, index: usize, events: &mut Vec<JudgmentEvent>) {
        self.lifecycle[index] = Lifecycle::Missed;
        self.combo = 0;
        self.misses += 1;
        trace!("miss #{}", index);
        events.push(JudgmentEvent::Missed { index });
    }

    /// Render hints for an active object at song time `t`
    pub fn visual_state(&self, index: usize, t: f64) -> Option<ApproachVisual> {
        if self.lifecycle(index)? != Lifecycle::Approaching {
            return None;
        }
        Some(ApproachVisual::at(self.objects[index].time - t, &self.params))
    }

    /// Render hints for every active object
    pub fn visuals(&self, t: f64) -> Vec<(usize, ApproachVisual)> {
        self.active
            .iter()
            .map(|&index| {
                (
                    index,
                    ApproachVisual::at(self.objects[index].time - t, &self.params),
                )
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.lifecycle
            .iter()
            .filter(|state| !state.is_terminal())
            .count()
    }

    /// True once every judgeable object has been hit or missed
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    pub fn summary(&self) -> SessionSummary {
        let remaining = self.remaining();
        SessionSummary {
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            hits: self.hits,
            misses: self.misses,
            remaining,
            unjudgeable: self
                .lifecycle
                .iter()
                .filter(|&&state| state == Lifecycle::Ignored)
                .count(),
            finished: remaining == 0,
        }
    }
}
