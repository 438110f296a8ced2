//! Placement of the virtual phone inside the terminal.
//!
//! The engine works in display units; the terminal works in cells. Rendering and
//! mouse hit testing both go through [`PhoneLayout`] so they always agree on
//! where things are.

use ratatui::layout::{Position, Rect};

use katphone_types::{DisplaySize, Point, TARGET_SIZE};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

pub(crate) const HEADER_HEIGHT: u16 = 2;
pub(crate) const DOCK_HEIGHT: u16 = 3;
pub(crate) const ICON_HEIGHT: u16 = 4;
pub(crate) const STORE_LIST_TOP: u16 = 2;
pub(crate) const STORE_ROW_STRIDE: u16 = 2;
pub(crate) const GAME_HUD_HEIGHT: u16 = 3;

const UNLOCK_BUTTON_WIDTH: u16 = 24;
const QUIT_BUTTON_WIDTH: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhoneLayout {
    frame: Rect,
    screen: Rect,
    display: DisplaySize,
    columns: usize,
}

impl PhoneLayout {
    /// Fit the phone into `area`, centered, keeping the display's aspect ratio.
    #[must_use]
    pub fn compute(area: Rect, display: DisplaySize, columns: usize) -> Self {
        let ratio = display.width / display.height * CELL_ASPECT;
        let mut height = area.height;
        let mut width = (f32::from(height) * ratio).round() as u16;
        if width > area.width {
            width = area.width;
            height = ((f32::from(width) / ratio).round() as u16).min(area.height);
        }
        let frame = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let screen = Rect {
            x: frame.x.saturating_add(1),
            y: frame.y.saturating_add(1),
            width: width.saturating_sub(2),
            height: height.saturating_sub(2),
        };
        Self {
            frame,
            screen,
            display,
            columns: columns.max(1),
        }
    }

    /// Outer phone rectangle including the bezel.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Drawable screen inside the bezel.
    #[must_use]
    pub fn screen(&self) -> Rect {
        self.screen
    }

    #[must_use]
    pub fn units_per_row(&self) -> f32 {
        self.display.height / f32::from(self.screen.height.max(1))
    }

    fn units_per_column(&self) -> f32 {
        self.display.width / f32::from(self.screen.width.max(1))
    }

    /// Vertical display position of a row. Unclamped so drags may leave the
    /// screen.
    #[must_use]
    pub fn row_to_units(&self, row: u16) -> f32 {
        (f32::from(row) - f32::from(self.screen.y) + 0.5) * self.units_per_row()
    }

    /// Whole rows covered by a vertical offset in display units.
    #[must_use]
    pub fn offset_rows(&self, offset: f32) -> i32 {
        (offset / self.units_per_row()).round() as i32
    }

    /// Cell holding a display position, clamped to the screen.
    #[must_use]
    pub fn to_cell(&self, p: Point) -> Position {
        let col = (p.x / self.units_per_column()).floor().max(0.0) as u16;
        let row = (p.y / self.units_per_row()).floor().max(0.0) as u16;
        Position::new(
            self.screen.x + col.min(self.screen.width.saturating_sub(1)),
            self.screen.y + row.min(self.screen.height.saturating_sub(1)),
        )
    }

    /// Cells covered by the game target anchored at `top_left`.
    #[must_use]
    pub fn target_rect(&self, top_left: Point) -> Rect {
        let origin = self.to_cell(top_left);
        let width = (TARGET_SIZE / self.units_per_column()).round().max(1.0) as u16;
        let height = (TARGET_SIZE / self.units_per_row()).round().max(1.0) as u16;
        Rect {
            x: origin.x,
            y: origin.y,
            width,
            height,
        }
        .intersection(self.screen)
    }

    #[must_use]
    pub fn header(&self) -> Rect {
        Rect {
            height: HEADER_HEIGHT.min(self.screen.height),
            ..self.screen
        }
    }

    #[must_use]
    pub fn dock(&self) -> Rect {
        let height = DOCK_HEIGHT.min(self.screen.height);
        Rect {
            y: self.screen.bottom() - height,
            height,
            ..self.screen
        }
    }

    /// Dock buttons in order: Messages, Lock, Home.
    #[must_use]
    pub fn dock_buttons(&self) -> [Rect; 3] {
        let dock = self.dock();
        let third = dock.width / 3;
        let mut buttons = [dock; 3];
        for (index, button) in buttons.iter_mut().enumerate() {
            button.x = dock.x + third * index as u16;
            button.width = if index == 2 {
                dock.width - third * 2
            } else {
                third
            };
        }
        buttons
    }

    /// Space between the header and the dock.
    #[must_use]
    pub fn body(&self) -> Rect {
        let top = self.screen.y + HEADER_HEIGHT.min(self.screen.height);
        let bottom = self.dock().y.max(top);
        Rect {
            y: top,
            height: bottom - top,
            ..self.screen
        }
    }

    /// Tile for the home icon at `index`, or `None` when it does not fit.
    #[must_use]
    pub fn home_icon(&self, index: usize) -> Option<Rect> {
        let body = self.body();
        let column_width = body.width / self.columns as u16;
        let row = (index / self.columns) as u16;
        let col = (index % self.columns) as u16;
        let y = body.y + row * ICON_HEIGHT;
        if column_width == 0 || y + ICON_HEIGHT > body.bottom() {
            return None;
        }
        Some(Rect {
            x: body.x + col * column_width,
            y,
            width: column_width,
            height: ICON_HEIGHT,
        })
    }

    /// Single-line store listing row at `index`.
    #[must_use]
    pub fn store_row(&self, index: usize) -> Option<Rect> {
        let body = self.body();
        let y = body.y + STORE_LIST_TOP + index as u16 * STORE_ROW_STRIDE;
        if y >= body.bottom() {
            return None;
        }
        Some(Rect {
            y,
            height: 1,
            ..body
        })
    }

    /// "Swipe up to unlock" button, at rest position.
    #[must_use]
    pub fn unlock_button(&self) -> Rect {
        let width = UNLOCK_BUTTON_WIDTH.min(self.screen.width);
        Rect {
            x: self.screen.x + (self.screen.width - width) / 2,
            y: self.screen.bottom().saturating_sub(3).max(self.screen.y),
            width,
            height: 1.min(self.screen.height),
        }
    }

    #[must_use]
    pub fn game_hud(&self) -> Rect {
        Rect {
            height: GAME_HUD_HEIGHT.min(self.screen.height),
            ..self.screen
        }
    }

    #[must_use]
    pub fn quit_button(&self) -> Rect {
        let width = QUIT_BUTTON_WIDTH.min(self.screen.width);
        Rect {
            x: self.screen.x + (self.screen.width - width) / 2,
            y: self.screen.bottom().saturating_sub(2).max(self.screen.y),
            width,
            height: 1.min(self.screen.height),
        }
    }
}
