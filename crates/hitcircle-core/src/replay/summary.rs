use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

/// .NET ticks (100 ns since 0001-01-01) at the Unix epoch
pub const UNIX_EPOCH_TICKS: i128 = 621_355_968_000_000_000;
const TICKS_PER_SECOND: i128 = 10_000_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRepr, IntoStaticStr, Display,
)]
#[repr(u8)]
pub enum GameMode {
    #[strum(serialize = "osu!")]
    Osu = 0,
    #[strum(serialize = "osu!taiko")]
    Taiko = 1,
    #[strum(serialize = "osu!catch")]
    Catch = 2,
    #[strum(serialize = "osu!mania")]
    Mania = 3,
}

/// Single mod flag, discriminant is its bit in the replay mod mask
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr, Display,
)]
#[repr(u32)]
pub enum Mod {
    #[strum(serialize = "NF")]
    NoFail = 1,
    #[strum(serialize = "EZ")]
    Easy = 1 << 1,
    #[strum(serialize = "TD")]
    TouchDevice = 1 << 2,
    #[strum(serialize = "HD")]
    Hidden = 1 << 3,
    #[strum(serialize = "HR")]
    HardRock = 1 << 4,
    #[strum(serialize = "SD")]
    SuddenDeath = 1 << 5,
    #[strum(serialize = "DT")]
    DoubleTime = 1 << 6,
    #[strum(serialize = "RX")]
    Relax = 1 << 7,
    #[strum(serialize = "HT")]
    HalfTime = 1 << 8,
    #[strum(serialize = "NC")]
    Nightcore = 1 << 9,
    #[strum(serialize = "FL")]
    Flashlight = 1 << 10,
    #[strum(serialize = "AT")]
    Autoplay = 1 << 11,
    #[strum(serialize = "SO")]
    SpunOut = 1 << 12,
    #[strum(serialize = "AP")]
    Autopilot = 1 << 13,
    #[strum(serialize = "PF")]
    Perfect = 1 << 14,
    #[strum(serialize = "CN")]
    Cinema = 1 << 22,
    #[strum(serialize = "V2")]
    ScoreV2 = 1 << 29,
    #[strum(serialize = "MR")]
    Mirror = 1 << 30,
}

impl Mod {
    pub fn bit(self) -> u32 {
        self as u32
    }

    pub fn acronym(self) -> &'static str {
        self.into()
    }
}

/// Read-only view over a replay mod mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mods(pub u32);

impl Mods {
    pub fn contains(self, m: Mod) -> bool {
        self.0 & m.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Known mods present in the mask, in bit order.
    ///
    /// Nightcore and Perfect also set the DoubleTime and SuddenDeath bits;
    /// the implied mod is not listed separately.
    pub fn iter(self) -> impl Iterator<Item = Mod> {
        Mod::iter().filter(move |&m| {
            self.contains(m)
                && !(m == Mod::DoubleTime && self.contains(Mod::Nightcore))
                && !(m == Mod::SuddenDeath && self.contains(Mod::Perfect))
        })
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acronyms: Vec<&str> = self.iter().map(Mod::acronym).collect();
        if acronyms.is_empty() {
            write!(f, "NM")
        } else {
            write!(f, "{}", acronyms.join(""))
        }
    }
}

/// One sample of the life bar graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeBarPoint {
    /// Song time in ms
    pub time: i32,
    /// Health in 0..=1
    pub life: f64,
}

/// Byte range of the compressed input stream inside the replay buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedPayload {
    pub offset: usize,
    pub length: usize,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Header fields of a replay, everything up to and around the compressed frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub mode: u8,
    pub version: i32,
    pub beatmap_hash: String,
    pub player_name: String,
    pub replay_hash: String,
    pub count300: u16,
    pub count100: u16,
    pub count50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
    pub score: i32,
    pub max_combo: u16,
    pub perfect_combo: bool,
    pub mods: i32,
    pub lifebar_graph: String,
    /// .NET ticks
    pub timestamp: u64,
    pub payload: Option<CompressedPayload>,
    pub online_score_id: Option<u64>,
}

impl ReplaySummary {
    pub fn game_mode(&self) -> Option<GameMode> {
        GameMode::from_repr(self.mode)
    }

    pub fn mod_flags(&self) -> Mods {
        Mods(self.mods as u32)
    }

    /// Parse `time|life` pairs from the life bar graph, skipping malformed entries
    pub fn life_bar(&self) -> Vec<LifeBarPoint> {
        self.lifebar_graph
            .split(',')
            .filter_map(|entry| {
                let (time, life) = entry.trim().split_once('|')?;
                Some(LifeBarPoint {
                    time: time.trim().parse().ok()?,
                    life: life.trim().parse().ok()?,
                })
            })
            .collect()
    }

    /// Convert the tick timestamp to UTC, `None` when out of chrono's range
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        let since_epoch = i128::from(self.timestamp) - UNIX_EPOCH_TICKS;
        let secs = i64::try_from(since_epoch.div_euclid(TICKS_PER_SECOND)).ok()?;
        let nanos = (since_epoch.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        DateTime::from_timestamp(secs, nanos)
    }

    pub fn total_hits(&self) -> u32 {
        u32::from(self.count300)
            + u32::from(self.count100)
            + u32::from(self.count50)
            + u32::from(self.count_miss)
    }

    /// Standard-mode accuracy in 0..=1, `None` with no judged objects
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total_hits();
        if total == 0 {
            return None;
        }
        let points = 300 * u32::from(self.count300)
            + 100 * u32::from(self.count100)
            + 50 * u32::from(self.count50);
        Some(f64::from(points) / f64::from(300 * total))
    }

    pub fn payload_len(&self) -> usize {
        self.payload.as_ref().map_or(0, |p| p.length)
    }
}
