//! Keyboard and mouse input for the phone.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use katphone_engine::{App, CursorMove};
use katphone_types::ViewState;

use crate::layout::PhoneLayout;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a reader blocked on a full channel wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into `app`. Returns true when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump, layout: &PhoneLayout) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        apply_event(app, layout, &ev);
        if app.should_quit() {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event to `app`.
pub fn apply_event(app: &mut App, layout: &PhoneLayout, ev: &Event) {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, *key),
        Event::Mouse(mouse) => handle_mouse(app, layout, *mouse),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }
    if app.current_alert().is_some() {
        app.dismiss_alert();
        return;
    }

    match app.view() {
        ViewState::Lock => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Up) {
                app.tap_unlock();
            }
        }
        ViewState::Home => match key.code {
            KeyCode::Left => app.move_home_cursor(CursorMove::Left),
            KeyCode::Right => app.move_home_cursor(CursorMove::Right),
            KeyCode::Up => app.move_home_cursor(CursorMove::Up),
            KeyCode::Down => app.move_home_cursor(CursorMove::Down),
            KeyCode::Enter => {
                let outcome = app.launch_selected();
                debug!(?outcome, "Launch from keyboard");
            }
            KeyCode::Char('m') => app.open_chat(),
            KeyCode::Char('s') => app.open_store(),
            KeyCode::Char('l') => app.lock(),
            _ => {}
        },
        ViewState::Chat => match key.code {
            KeyCode::Esc | KeyCode::Char('h') => app.go_home(),
            KeyCode::Char('s') => app.open_store(),
            KeyCode::Char('l') => app.lock(),
            _ => {}
        },
        ViewState::Store => match key.code {
            KeyCode::Esc | KeyCode::Char('h') => app.go_home(),
            KeyCode::Up => app.move_store_cursor(false),
            KeyCode::Down => app.move_store_cursor(true),
            KeyCode::Enter => {
                app.buy_selected();
            }
            KeyCode::Char('m') => app.open_chat(),
            KeyCode::Char('l') => app.lock(),
            _ => {}
        },
        ViewState::Game => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                app.hit_target();
            }
            KeyCode::Esc | KeyCode::Char('q') => app.quit_game(),
            _ => {}
        },
    }
}

fn handle_mouse(app: &mut App, layout: &PhoneLayout, mouse: MouseEvent) {
    let MouseEvent {
        kind, column, row, ..
    } = mouse;
    match kind {
        MouseEventKind::Down(MouseButton::Left) => click(app, layout, column, row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_unlock(layout.row_to_units(row)),
        MouseEventKind::Up(MouseButton::Left) => {
            app.release_unlock();
        }
        _ => {}
    }
}

fn click(app: &mut App, layout: &PhoneLayout, column: u16, row: u16) {
    if app.current_alert().is_some() {
        app.dismiss_alert();
        return;
    }
    let at = Position::new(column, row);

    match app.view() {
        ViewState::Lock => {
            if layout.unlock_button().contains(at) {
                app.tap_unlock();
            } else if layout.screen().contains(at) {
                app.begin_unlock_drag(layout.row_to_units(row));
            }
        }
        ViewState::Game => {
            if layout.quit_button().contains(at) {
                app.quit_game();
            } else if let Some(round) = app.game_round() {
                // Hit test against the drawn cells, not the unsnapped unit box.
                if layout.target_rect(round.target()).contains(at) {
                    let outcome = app.hit_target();
                    debug!(?outcome, column, row, "Game tap");
                } else {
                    debug!(column, row, "Game tap missed");
                }
            }
        }
        view => {
            let [messages, lock, home] = layout.dock_buttons();
            if messages.contains(at) {
                app.open_chat();
            } else if lock.contains(at) {
                app.lock();
            } else if home.contains(at) {
                app.go_home();
            } else if view == ViewState::Home {
                let count = app.home_apps().len();
                let hit = (0..count).find(|&i| layout.home_icon(i).is_some_and(|r| r.contains(at)));
                if let Some(index) = hit {
                    app.select_home_icon(index);
                    app.launch_selected();
                }
            } else if view == ViewState::Store {
                let count = app.available_for_purchase().len();
                let hit = (0..count).find(|&i| layout.store_row(i).is_some_and(|r| r.contains(at)));
                if let Some(index) = hit {
                    app.select_store_row(index);
                    app.buy_selected();
                }
            }
        }
    }
}
