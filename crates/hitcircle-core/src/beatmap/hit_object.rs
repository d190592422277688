use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use super::number::{parse_finite_prefix, parse_float_prefix, parse_int_prefix};

/// Default hit sample string for objects that don't specify one
pub const DEFAULT_HIT_SAMPLE: &str = "0:0:0:0:";

/// Fallback duration of spinners and holds without an end time (ms)
pub const DEFAULT_SUSTAIN_MS: f64 = 1000.0;

/// Type-field bits selecting the object variant
pub mod type_bits {
    pub const CIRCLE: i32 = 1;
    pub const SLIDER: i32 = 1 << 1;
    pub const NEW_COMBO: i32 = 1 << 2;
    pub const SPINNER: i32 = 1 << 3;
    pub const COMBO_SKIP_SHIFT: i32 = 4;
    pub const COMBO_SKIP_MASK: i32 = 0b111;
    pub const HOLD: i32 = 1 << 7;
}

/// A position in map space (512x384 playfield)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Slider path interpolation, from the first token of the curve field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    Bezier,
    Catmull,
    Linear,
    PerfectCircle,
    /// A code this decoder doesn't know; kept for the renderer to decide
    Other(char),
}

impl CurveType {
    pub fn from_code(code: char) -> Self {
        match code {
            'B' => Self::Bezier,
            'C' => Self::Catmull,
            'L' => Self::Linear,
            'P' => Self::PerfectCircle,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Bezier => 'B',
            Self::Catmull => 'C',
            Self::Linear => 'L',
            Self::PerfectCircle => 'P',
            Self::Other(code) => *code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderData {
    pub curve_type: Option<CurveType>,
    pub curve_points: Vec<Point>,
    pub slides: i32,
    pub length: f64,
    pub edge_sounds: Vec<i32>,
    pub edge_sets: Vec<String>,
    pub hit_sample: String,
}

impl Default for SliderData {
    fn default() -> Self {
        Self {
            curve_type: None,
            curve_points: Vec::new(),
            slides: 1,
            length: 0.0,
            edge_sounds: Vec::new(),
            edge_sets: Vec::new(),
            hit_sample: DEFAULT_HIT_SAMPLE.to_string(),
        }
    }
}

/// Variant-specific part of a hit object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HitObjectKind {
    Circle { hit_sample: String },
    Slider(SliderData),
    Spinner { end_time: f64, hit_sample: String },
    Hold { end_time: f64, hit_sample: String },
}

/// A hit object as written in the beatmap.
///
/// This is the immutable definition only; spawn and judgment state belong to
/// a [`crate::judge::JudgmentSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub type_bits: i32,
    pub hit_sound: i32,
    pub new_combo: bool,
    pub combo_skip: u8,
    /// `None` when the type field matches none of the known variant bits
    pub kind: Option<HitObjectKind>,
}

impl HitObject {
    /// Parse one `[HitObjects]` line.
    ///
    /// Returns `None` for lines with fewer than 4 fields or an unreadable or
    /// non-finite position/time. An unreadable type field reads as 0 (no
    /// variant).
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 4 {
            return None;
        }

        let x = parse_finite_prefix(parts[0])?;
        let y = parse_finite_prefix(parts[1])?;
        let time = parse_finite_prefix(parts[2])?;
        let type_value = parse_int_prefix(parts[3]).unwrap_or(0);
        let hit_sound = parts
            .get(4)
            .and_then(|field| parse_int_prefix(field))
            .unwrap_or(0);

        Some(Self {
            x,
            y,
            time,
            type_bits: type_value,
            hit_sound,
            new_combo: type_value & type_bits::NEW_COMBO != 0,
            combo_skip: ((type_value >> type_bits::COMBO_SKIP_SHIFT) & type_bits::COMBO_SKIP_MASK)
                as u8,
            kind: parse_kind(type_value, time, &parts),
        })
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lowercase variant name (`circle`, `slider`, `spinner`, `hold`)
    pub fn kind_name(&self) -> Option<&'static str> {
        self.kind.as_ref().map(<&'static str>::from)
    }

    /// Whether the object carries a variant and can be rendered and judged
    pub fn is_judgeable(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.kind, Some(HitObjectKind::Circle { .. }))
    }

    pub fn is_slider(&self) -> bool {
        matches!(self.kind, Some(HitObjectKind::Slider(_)))
    }

    /// End time for spinners and holds, `time` for everything else
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            Some(HitObjectKind::Spinner { end_time, .. } | HitObjectKind::Hold { end_time, .. }) => {
                *end_time
            }
            _ => self.time,
        }
    }

    pub fn hit_sample(&self) -> Option<&str> {
        match self.kind.as_ref()? {
            HitObjectKind::Circle { hit_sample }
            | HitObjectKind::Spinner { hit_sample, .. }
            | HitObjectKind::Hold { hit_sample, .. } => Some(hit_sample),
            HitObjectKind::Slider(slider) => Some(&slider.hit_sample),
        }
    }
}

/// Select the variant by type bits in priority order; first match wins.
fn parse_kind(type_value: i32, time: f64, parts: &[&str]) -> Option<HitObjectKind> {
    let non_empty = |index: usize| parts.get(index).copied().filter(|field| !field.is_empty());
    let hit_sample_at =
        |index: usize| non_empty(index).unwrap_or(DEFAULT_HIT_SAMPLE).to_string();

    if type_value & type_bits::CIRCLE != 0 {
        Some(HitObjectKind::Circle {
            hit_sample: hit_sample_at(5),
        })
    } else if type_value & type_bits::SLIDER != 0 {
        Some(HitObjectKind::Slider(parse_slider(parts)))
    } else if type_value & type_bits::SPINNER != 0 {
        let end_time = non_empty(5)
            .and_then(parse_finite_prefix)
            .unwrap_or(time + DEFAULT_SUSTAIN_MS);
        Some(HitObjectKind::Spinner {
            end_time,
            hit_sample: hit_sample_at(6),
        })
    } else if type_value & type_bits::HOLD != 0 {
        // Holds pack `endTime:hitSample` into field 5
        let (end_field, packed_sample) = match non_empty(5) {
            Some(field) => match field.split_once(':') {
                Some((end, rest)) => (Some(end), Some(rest).filter(|rest| !rest.is_empty())),
                None => (Some(field), None),
            },
            None => (None, None),
        };
        let end_time = end_field
            .and_then(parse_finite_prefix)
            .unwrap_or(time + DEFAULT_SUSTAIN_MS);
        let hit_sample = packed_sample
            .map(str::to_string)
            .unwrap_or_else(|| hit_sample_at(6));
        Some(HitObjectKind::Hold {
            end_time,
            hit_sample,
        })
    } else {
        None
    }
}

fn parse_slider(parts: &[&str]) -> SliderData {
    let mut slider = SliderData::default();

    if let Some(curve) = parts.get(5) {
        let mut tokens = curve.split('|');
        slider.curve_type = tokens
            .next()
            .and_then(|code| code.chars().next())
            .map(CurveType::from_code);
        slider.curve_points = tokens
            .filter_map(|pair| {
                let mut coords = pair.split(':');
                let x = coords.next()?;
                let y = coords.next()?;
                Some(Point::new(parse_float_prefix(x)?, parse_float_prefix(y)?))
            })
            .collect();
    }

    if let Some(slides) = parts.get(6).and_then(|field| parse_int_prefix(field)) {
        slider.slides = slides.max(1);
    }
    if let Some(length) = parts.get(7).and_then(|field| parse_float_prefix(field)) {
        slider.length = length;
    }
    if let Some(edge_sounds) = parts.get(8) {
        slider.edge_sounds = edge_sounds.split('|').filter_map(parse_int_prefix).collect();
    }
    if let Some(edge_sets) = parts.get(9) {
        slider.edge_sets = edge_sets.split('|').map(str::to_string).collect();
    }
    if let Some(hit_sample) = parts.get(10) {
        slider.hit_sample = hit_sample.to_string();
    }

    slider
}
