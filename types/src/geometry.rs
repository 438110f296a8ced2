//! Virtual display geometry.
//!
//! Gestures and the tap game work in display units of a virtual phone screen.
//! The renderer maps units to terminal cells.

/// Width and height of the square tap target, in display units.
pub const TARGET_SIZE: f32 = 60.0;

const MIN_WIDTH: f32 = 140.0;
const MIN_HEIGHT: f32 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 800.0,
        }
    }
}

impl DisplaySize {
    /// Clamp to the smallest size whose play area is still non-empty.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }

    /// Spawn area for the tap target, kept clear of the header and the quit button.
    #[must_use]
    pub fn play_bounds(self) -> PlayBounds {
        PlayBounds {
            min_x: 10.0,
            max_x: self.width - 70.0,
            min_y: 150.0,
            max_y: self.height - 250.0,
        }
    }

    /// Centered spawn position used before the first respawn.
    #[must_use]
    pub fn center_target(self) -> Point {
        Point::new(self.width / 2.0 - TARGET_SIZE / 2.0, self.height / 2.0)
    }
}

/// Inclusive ranges a target's top-left corner may be spawned at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl PlayBounds {
    /// Map two unit-interval samples onto the bounds.
    #[must_use]
    pub fn lerp(self, u: f32, v: f32) -> Point {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        Point::new(
            self.min_x + u * (self.max_x - self.min_x),
            self.min_y + v * (self.max_y - self.min_y),
        )
    }

    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}
