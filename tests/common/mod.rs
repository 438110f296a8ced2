//! Shared test utilities and fixtures

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};

use katphone_config::UiOptions;
use katphone_engine::{
    App, AppDeps, AppSettings, FixedClock, HOME_COLUMNS, RecordingOpener, SampleSequence,
};
use katphone_store::{KeyValueStore, MemoryStore};
use katphone_tui::{PhoneLayout, draw};
use katphone_types::DisplaySize;

pub const TERM_WIDTH: u16 = 100;
pub const TERM_HEIGHT: u16 = 42;

pub struct Phone {
    pub app: App,
    pub opener: RecordingOpener,
    pub clock: FixedClock,
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid date")
}

pub fn ascii() -> UiOptions {
    UiOptions {
        ascii_only: true,
        ..UiOptions::default()
    }
}

pub fn phone_with(store: Box<dyn KeyValueStore>, ui: UiOptions, now: NaiveDateTime) -> Phone {
    build_phone(store, ui, now, &[0.0, 0.0, 1.0, 1.0])
}

/// Default phone whose game targets spawn from `samples`.
pub fn phone_with_spawns(samples: &[f32]) -> Phone {
    build_phone(
        Box::new(MemoryStore::new()),
        ascii(),
        at(2026, 10, 19, 12, 0),
        samples,
    )
}

fn build_phone(
    store: Box<dyn KeyValueStore>,
    ui: UiOptions,
    now: NaiveDateTime,
    samples: &[f32],
) -> Phone {
    let opener = RecordingOpener::new();
    let clock = FixedClock::new(now);
    let app = App::new(
        AppDeps {
            store,
            clock: Box::new(clock.clone()),
            opener: Box::new(opener.clone()),
            spawner: Box::new(SampleSequence::new(samples.iter().copied())),
        },
        AppSettings {
            display: DisplaySize::default(),
            ui,
        },
    );
    Phone { app, opener, clock }
}

/// Locked phone on Monday 2026-10-19 at noon, in-memory store, ASCII glyphs.
pub fn phone() -> Phone {
    phone_with(Box::new(MemoryStore::new()), ascii(), at(2026, 10, 19, 12, 0))
}

pub fn layout() -> PhoneLayout {
    PhoneLayout::compute(
        Rect::new(0, 0, TERM_WIDTH, TERM_HEIGHT),
        DisplaySize::default(),
        HOME_COLUMNS,
    )
}

/// Render one frame and return its rows as text.
pub fn render(app: &App) -> Vec<String> {
    let backend = TestBackend::new(TERM_WIDTH, TERM_HEIGHT);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .expect("draw");
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

pub fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

pub fn row_of(rows: &[String], needle: &str) -> Option<usize> {
    rows.iter().position(|row| row.contains(needle))
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

pub fn press(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

pub fn drag(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

pub fn release(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

/// Unlock with the button and let the animation finish.
pub fn unlock(app: &mut App) {
    app.tap_unlock();
    app.frame_tick(katphone_engine::UNLOCK_DURATION);
}
