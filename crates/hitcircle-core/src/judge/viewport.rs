use serde::{Deserialize, Serialize};

use crate::beatmap::Point;

/// Playfield width in map space
pub const PLAYFIELD_WIDTH: f64 = 512.0;
/// Playfield height in map space
pub const PLAYFIELD_HEIGHT: f64 = 384.0;

/// Screen placement of the playfield: translation then uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

impl Viewport {
    pub fn new(offset: Point, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Screen coordinates equal map coordinates
    pub fn identity() -> Self {
        Self {
            offset: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }

    /// Letterbox the 4:3 playfield into a `width` x `height` screen.
    ///
    /// Screens wider than 4:3 use 80% of the height, others 90% of the width.
    pub fn fit(width: f64, height: f64) -> Self {
        let scale = if width / height > 4.0 / 3.0 {
            height / PLAYFIELD_HEIGHT * 0.8
        } else {
            width / PLAYFIELD_WIDTH * 0.9
        };
        Self {
            offset: Point::new(
                (width - PLAYFIELD_WIDTH * scale) / 2.0,
                (height - PLAYFIELD_HEIGHT * scale) / 2.0,
            ),
            scale,
        }
    }

    pub fn to_map_space(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn to_screen_space(&self, map: Point) -> Point {
        Point::new(
            map.x * self.scale + self.offset.x,
            map.y * self.scale + self.offset.y,
        )
    }
}

/// Pointer snapshot in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    /// Button or key held; cleared by the session when a press lands a hit
    pub down: bool,
}

impl CursorState {
    pub fn new(x: f64, y: f64, down: bool) -> Self {
        Self { x, y, down }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
