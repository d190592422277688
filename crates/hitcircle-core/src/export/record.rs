use serde::{Deserialize, Serialize};

use crate::beatmap::HitObject;
use crate::judge::{JudgmentEvent, Lifecycle, TickReport};

/// One judged object in a session timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRecord {
    /// Index into the document's hit objects
    pub index: usize,
    pub kind: String,
    pub object_time: f64,
    /// Song time of the tick that judged the object
    pub judged_at: f64,
    /// `Hit` or `Missed`
    pub outcome: Lifecycle,
    /// Combo after the judgment
    pub combo: u32,
    /// Cumulative score after the judgment
    pub score: u64,
}

impl JudgmentRecord {
    /// Build records for the hits and misses of one tick, in event order
    pub fn from_tick(objects: &[HitObject], report: &TickReport) -> Vec<Self> {
        let gained: u64 = report
            .events
            .iter()
            .map(|event| match event {
                JudgmentEvent::Hit { score_delta, .. } => *score_delta,
                _ => 0,
            })
            .sum();
        let mut score = report.score.saturating_sub(gained);

        report
            .events
            .iter()
            .filter_map(|event| {
                let (index, outcome, combo) = match *event {
                    JudgmentEvent::Hit {
                        index,
                        score_delta,
                        combo,
                    } => {
                        score += score_delta;
                        (index, Lifecycle::Hit, combo)
                    }
                    JudgmentEvent::Missed { index } => (index, Lifecycle::Missed, 0),
                    JudgmentEvent::Spawned { .. } => return None,
                };
                let obj = objects.get(index)?;
                Some(Self {
                    index,
                    kind: obj.kind_name().unwrap_or("unknown").to_string(),
                    object_time: obj.time,
                    judged_at: report.time,
                    outcome,
                    combo,
                    score,
                })
            })
            .collect()
    }

    /// Judgment offset in ms, negative when early
    pub fn offset_ms(&self) -> f64 {
        self.judged_at - self.object_time
    }
}
