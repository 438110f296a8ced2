//! Terminal events mapped onto phone operations.

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use katphone_engine::UNLOCK_DURATION;
use katphone_tui::apply_event;
use katphone_types::{AppId, ViewState};

use crate::common::{
    ctrl_c, drag, key, layout, phone, phone_with_spawns, press, release, unlock,
};

#[test]
fn mouse_drag_unlocks() {
    let mut p = phone();
    let layout = layout();
    apply_event(&mut p.app, &layout, &press(50, 30));
    apply_event(&mut p.app, &layout, &drag(50, 25));
    assert_eq!(p.app.lock_offset(), -100.0);
    apply_event(&mut p.app, &layout, &drag(50, 20));
    apply_event(&mut p.app, &layout, &release(50, 20));
    assert!(p.app.is_unlocking());
    p.app.frame_tick(UNLOCK_DURATION);
    assert_eq!(p.app.view(), ViewState::Home);
}

#[test]
fn short_mouse_drag_springs_back() {
    let mut p = phone();
    let layout = layout();
    apply_event(&mut p.app, &layout, &press(50, 30));
    apply_event(&mut p.app, &layout, &drag(50, 27));
    apply_event(&mut p.app, &layout, &release(50, 27));
    p.app.frame_tick(Duration::from_secs(10));
    assert_eq!(p.app.view(), ViewState::Lock);
}

#[test]
fn unlock_button_and_keys() {
    let layout = layout();

    let mut p = phone();
    let button = layout.unlock_button();
    apply_event(&mut p.app, &layout, &press(button.x + 1, button.y));
    assert!(p.app.is_unlocking());

    for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Up] {
        let mut p = phone();
        apply_event(&mut p.app, &layout, &key(code));
        p.app.frame_tick(UNLOCK_DURATION);
        assert_eq!(p.app.view(), ViewState::Home, "{code:?}");
    }
}

#[test]
fn home_keys_move_cursor_and_launch() {
    let mut p = phone();
    let layout = layout();
    unlock(&mut p.app);

    apply_event(&mut p.app, &layout, &key(KeyCode::Right));
    apply_event(&mut p.app, &layout, &key(KeyCode::Right));
    assert_eq!(p.app.home_cursor(), 2);
    apply_event(&mut p.app, &layout, &key(KeyCode::Enter));
    assert_eq!(p.app.view(), ViewState::Game);

    apply_event(&mut p.app, &layout, &key(KeyCode::Char(' ')));
    assert_eq!(p.app.game_round().expect("round").score(), 1);
    apply_event(&mut p.app, &layout, &key(KeyCode::Esc));
    assert_eq!(p.app.view(), ViewState::Home);

    apply_event(&mut p.app, &layout, &key(KeyCode::Char('m')));
    assert_eq!(p.app.view(), ViewState::Chat);
    apply_event(&mut p.app, &layout, &key(KeyCode::Char('h')));
    apply_event(&mut p.app, &layout, &key(KeyCode::Char('l')));
    assert_eq!(p.app.view(), ViewState::Lock);
}

#[test]
fn store_keys_buy_and_alert_swallows_next_key() {
    let mut p = phone();
    let layout = layout();
    unlock(&mut p.app);

    apply_event(&mut p.app, &layout, &key(KeyCode::Char('s')));
    apply_event(&mut p.app, &layout, &key(KeyCode::Down));
    apply_event(&mut p.app, &layout, &key(KeyCode::Enter));
    assert!(p.app.is_owned(AppId::Spotify));
    assert!(p.app.current_alert().is_some());

    // First key only dismisses the alert.
    apply_event(&mut p.app, &layout, &key(KeyCode::Esc));
    assert!(p.app.current_alert().is_none());
    assert_eq!(p.app.view(), ViewState::Store);
    apply_event(&mut p.app, &layout, &key(KeyCode::Esc));
    assert_eq!(p.app.view(), ViewState::Home);
}

#[test]
fn clicks_hit_icons_dock_and_store_rows() {
    let mut p = phone();
    let layout = layout();
    unlock(&mut p.app);

    let [messages, lock, home] = layout.dock_buttons();
    apply_event(&mut p.app, &layout, &press(messages.x + 1, messages.y + 1));
    assert_eq!(p.app.view(), ViewState::Chat);
    apply_event(&mut p.app, &layout, &press(home.x + 1, home.y + 1));
    assert_eq!(p.app.view(), ViewState::Home);

    // Second icon is the store.
    let store_icon = layout.home_icon(1).expect("icon fits");
    apply_event(&mut p.app, &layout, &press(store_icon.x + 2, store_icon.y));
    assert_eq!(p.app.view(), ViewState::Store);

    let first_row = layout.store_row(0).expect("row fits");
    apply_event(&mut p.app, &layout, &press(first_row.x + 3, first_row.y));
    assert!(p.app.is_owned(AppId::Roblox));
    apply_event(&mut p.app, &layout, &press(0, 0));
    assert!(p.app.current_alert().is_none());

    apply_event(&mut p.app, &layout, &press(lock.x + 1, lock.y + 1));
    assert_eq!(p.app.view(), ViewState::Lock);
}

#[test]
fn external_icon_click_uses_opener() {
    let mut p = phone();
    let layout = layout();
    unlock(&mut p.app);
    let youtube = layout.home_icon(3).expect("icon fits");
    apply_event(&mut p.app, &layout, &press(youtube.x + 2, youtube.y + 1));
    assert_eq!(p.app.view(), ViewState::Home);
    assert_eq!(p.opener.opened(), ["https://youtube.com"]);
}

#[test]
fn game_clicks_hit_target_and_quit() {
    let mut p = phone();
    let layout = layout();
    unlock(&mut p.app);
    p.app.start_game();

    let target = layout.target_rect(p.app.game_round().expect("round").target());
    apply_event(&mut p.app, &layout, &press(target.x + 1, target.y + 1));
    assert_eq!(p.app.game_round().expect("round").score(), 1);

    // Far corner misses.
    apply_event(&mut p.app, &layout, &press(layout.screen().right() - 1, 5));
    assert_eq!(p.app.game_round().expect("round").score(), 1);

    let quit = layout.quit_button();
    apply_event(&mut p.app, &layout, &press(quit.x + 1, quit.y));
    assert_eq!(p.app.view(), ViewState::Home);
}

#[test]
fn every_drawn_target_cell_scores() {
    // Respawns land on (179, 155), which is not aligned to the cell grid.
    let mut p = phone_with_spawns(&[169.0 / 320.0, 5.0 / 400.0]);
    let layout = layout();
    unlock(&mut p.app);
    p.app.start_game();
    p.app.hit_target();

    let target = layout.target_rect(p.app.game_round().expect("round").target());
    assert_eq!(target, Rect::new(47, 8, 6, 3));

    let corners = [
        (target.x, target.y),
        (target.right() - 1, target.y),
        (target.x, target.bottom() - 1),
        (target.right() - 1, target.bottom() - 1),
    ];
    for (expected, (column, row)) in (2..).zip(corners) {
        apply_event(&mut p.app, &layout, &press(column, row));
        assert_eq!(
            p.app.game_round().expect("round").score(),
            expected,
            "cell ({column}, {row})"
        );
        // Same samples every time, so the target comes back to the same cells.
        assert_eq!(
            layout.target_rect(p.app.game_round().expect("round").target()),
            target
        );
    }

    // Cells just outside the drawn target miss.
    for (column, row) in [(target.x - 1, target.y), (target.right(), target.y)] {
        apply_event(&mut p.app, &layout, &press(column, row));
    }
    assert_eq!(p.app.game_round().expect("round").score(), 5);
}

#[test]
fn ctrl_c_quits_from_any_view() {
    let mut p = phone();
    let layout = layout();
    apply_event(&mut p.app, &layout, &ctrl_c());
    assert!(p.app.should_quit());
}
