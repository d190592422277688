//! Session constants: approach timing derived from a difficulty block,
//! plus the judgment windows and scoring.

use serde::{Deserialize, Serialize};

use crate::beatmap::Difficulty;
use crate::error::{Error, Result};

/// Approach timing and hit radius derived from AR and CS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproachParams {
    /// Lead time before an object's time at which it spawns (ms)
    pub preempt: f64,
    /// Length of the opacity ramp after spawning (ms)
    pub fade_in: f64,
    /// Hit radius in map-space pixels
    pub radius: f64,
}

impl ApproachParams {
    pub fn from_difficulty(difficulty: &Difficulty) -> Self {
        let ar = difficulty.approach_rate;
        let (preempt, fade_in) = if ar < 5.0 {
            (1200.0 + 120.0 * (5.0 - ar), 800.0 + 120.0 * (5.0 - ar))
        } else {
            (1200.0 - 120.0 * (ar - 5.0), 800.0 - 120.0 * (ar - 5.0))
        };
        Self {
            preempt,
            fade_in,
            radius: 54.4 - 4.48 * difficulty.circle_size,
        }
    }
}

impl Default for ApproachParams {
    fn default() -> Self {
        Self::from_difficulty(&Difficulty::default())
    }
}

/// Judgment windows and scoring for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// A press registers when `|object time - t|` is below this (ms)
    pub hit_window_ms: f64,
    /// An unhit object is missed once it is this far in the past (ms)
    pub miss_threshold_ms: f64,
    /// Score per hit before the combo multiplier
    pub base_score: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hit_window_ms: 150.0,
            miss_threshold_ms: 200.0,
            base_score: 300,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.hit_window_ms.is_finite() && self.hit_window_ms > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "hit window must be positive, got {}",
                self.hit_window_ms
            )));
        }
        if !(self.miss_threshold_ms.is_finite() && self.miss_threshold_ms >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "miss threshold must not be negative, got {}",
                self.miss_threshold_ms
            )));
        }
        Ok(())
    }
}

/// Builder for SessionConfig
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    hit_window_ms: Option<f64>,
    miss_threshold_ms: Option<f64>,
    base_score: Option<u64>,
}

impl SessionConfigBuilder {
    pub fn hit_window_ms(mut self, ms: f64) -> Self {
        self.hit_window_ms = Some(ms);
        self
    }

    pub fn miss_threshold_ms(mut self, ms: f64) -> Self {
        self.miss_threshold_ms = Some(ms);
        self
    }

    pub fn base_score(mut self, score: u64) -> Self {
        self.base_score = Some(score);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            hit_window_ms: self.hit_window_ms.unwrap_or(default.hit_window_ms),
            miss_threshold_ms: self.miss_threshold_ms.unwrap_or(default.miss_threshold_ms),
            base_score: self.base_score.unwrap_or(default.base_score),
        }
    }
}
