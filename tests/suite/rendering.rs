//! Render smoke tests for every view on a fixed-size test terminal.

use katphone_config::UiOptions;
use katphone_store::MemoryStore;
use katphone_types::AppId;

use crate::common::{ascii, at, phone, phone_with, render, row_of, screen_contains, unlock};

#[test]
fn lock_screen_shows_time_date_and_button() {
    let p = phone();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "12:00 PM"));
    assert!(screen_contains(&rows, "Monday, October 19"));
    assert!(screen_contains(&rows, "SWIPE UP TO UNLOCK"));
    assert!(screen_contains(&rows, "Cat Phone"));
}

#[test]
fn lock_screen_content_follows_drag() {
    let mut p = phone();
    let resting = row_of(&render(&p.app), "12:00 PM").expect("time row");

    p.app.begin_unlock_drag(600.0);
    p.app.drag_unlock(500.0);
    let dragged = row_of(&render(&p.app), "12:00 PM").expect("time row");
    assert_eq!(resting - dragged, 5);
}

#[test]
fn home_screen_lists_owned_apps() {
    let mut p = phone();
    unlock(&mut p.app);
    let rows = render(&p.app);
    for label in ["Messages", "KatStore", "YouTube", "Maps", "Settings"] {
        assert!(screen_contains(&rows, label), "missing {label}");
    }
    assert!(!screen_contains(&rows, "Spotify"));
    assert!(screen_contains(&rows, "100%"));

    p.app.purchase(AppId::Spotify);
    p.app.dismiss_alert();
    assert!(screen_contains(&render(&p.app), "Spotify"));
}

#[test]
fn chat_shows_todays_script() {
    let mut p = phone_with(
        Box::new(MemoryStore::new()),
        ascii(),
        at(2026, 7, 4, 10, 0),
    );
    unlock(&mut p.app);
    p.app.open_chat();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "Space Messages"));
    assert!(screen_contains(&rows, "Spacekit"));
    assert!(screen_contains(&rows, "Happy 4th of July!"));
}

#[test]
fn store_lists_purchasables_and_alert_overlays() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.open_store();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "KatStore"));
    assert!(screen_contains(&rows, "Roblox"));
    assert!(screen_contains(&rows, "GET"));

    p.app.buy_selected();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "Roblox installed!"));
    assert!(screen_contains(&rows, "OK"));
}

#[test]
fn empty_store_says_so() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.open_store();
    for _ in 0..6 {
        p.app.buy_selected();
    }
    while p.app.dismiss_alert().is_some() {}
    assert!(screen_contains(&render(&p.app), "All apps installed"));
}

#[test]
fn game_shows_score_timer_target_and_quit() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.start_game();
    p.app.hit_target();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "Cat Catcher"));
    assert!(screen_contains(&rows, "Score: 1"));
    assert!(screen_contains(&rows, "################"));
    assert!(screen_contains(&rows, "=^.^="));
    assert!(screen_contains(&rows, "QUIT"));
}

#[test]
fn emoji_and_high_contrast_render_without_panicking() {
    let ui = UiOptions {
        high_contrast: true,
        ..UiOptions::default()
    };
    let mut p = phone_with(Box::new(MemoryStore::new()), ui, at(2026, 12, 25, 0, 5));
    render(&p.app);
    unlock(&mut p.app);
    render(&p.app);
    p.app.open_chat();
    render(&p.app);
    p.app.open_store();
    render(&p.app);
    p.app.go_home();
    p.app.start_game();
    let rows = render(&p.app);
    assert!(screen_contains(&rows, "QUIT"));
}
