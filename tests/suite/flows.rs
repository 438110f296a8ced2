//! End-to-end navigation flows driven through the public `App` operations.

use std::time::Duration;

use katphone_engine::{
    LaunchOutcome, PurchaseOutcome, ReleaseOutcome, TICK_PERIOD, TapOutcome,
};
use katphone_types::{AppId, Point, ViewState, Wallpaper};

use crate::common::{at, phone, unlock};

fn swipe(app: &mut katphone_engine::App, dy: f32) -> ReleaseOutcome {
    app.begin_unlock_drag(600.0);
    app.drag_unlock(600.0 + dy);
    app.release_unlock()
}

#[test]
fn swipe_of_150_up_unlocks() {
    let mut p = phone();
    assert_eq!(swipe(&mut p.app, -150.0), ReleaseOutcome::Unlocking);
    p.app.frame_tick(Duration::from_millis(16));
    assert_eq!(p.app.view(), ViewState::Lock);
    for _ in 0..20 {
        p.app.frame_tick(Duration::from_millis(16));
    }
    assert_eq!(p.app.view(), ViewState::Home);
}

#[test]
fn short_swipes_leave_phone_locked() {
    for dy in [-50.0, 50.0] {
        let mut p = phone();
        assert_eq!(swipe(&mut p.app, dy), ReleaseOutcome::SettlingBack);
        for _ in 0..400 {
            p.app.frame_tick(Duration::from_millis(16));
        }
        assert_eq!(p.app.view(), ViewState::Lock, "dy {dy}");
        assert_eq!(p.app.lock_offset(), 0.0);
    }
}

#[test]
fn idle_round_respawns_once_after_twenty_ticks() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.open_app(AppId::CatCatcher);
    let start = p.app.game_round().expect("round").target();

    for _ in 0..19 {
        p.app.frame_tick(TICK_PERIOD);
    }
    let round = p.app.game_round().expect("round");
    assert_eq!(round.target(), start);
    assert_eq!(round.misses(), 0);

    p.app.frame_tick(TICK_PERIOD);
    let round = p.app.game_round().expect("round");
    assert_eq!(round.misses(), 1);
    assert_eq!(round.score(), 0);
    assert_eq!(round.remaining(), 1.0);
    assert_eq!(round.target(), Point::new(10.0, 150.0));
}

#[test]
fn hit_before_timeout_scores_exactly_one() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.start_game();
    for _ in 0..10 {
        p.app.frame_tick(TICK_PERIOD);
    }
    assert_eq!(p.app.hit_target(), TapOutcome::Hit { score: 1 });
    let round = p.app.game_round().expect("round");
    assert_eq!(round.score(), 1);
    assert_eq!(round.remaining(), 1.0);
}

#[test]
fn quit_always_returns_home_with_score_reset() {
    for hits in [0, 1, 7] {
        let mut p = phone();
        unlock(&mut p.app);
        p.app.start_game();
        for _ in 0..hits {
            p.app.hit_target();
        }
        p.app.quit_game();
        assert_eq!(p.app.view(), ViewState::Home);
        assert!(p.app.game_round().is_none());
        assert_eq!(p.app.scheduled_tasks(), 1, "only the clock timer remains");

        p.app.start_game();
        assert_eq!(p.app.game_round().expect("round").score(), 0);
    }
}

#[test]
fn stopped_round_receives_no_ticks() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.start_game();
    p.app.quit_game();
    for _ in 0..100 {
        p.app.frame_tick(TICK_PERIOD);
    }
    assert!(p.app.game_round().is_none());
    assert_eq!(p.app.view(), ViewState::Home);
}

#[test]
fn buying_twice_installs_once() {
    let mut p = phone();
    unlock(&mut p.app);
    p.app.open_store();
    assert_eq!(
        p.app.purchase(AppId::TikTok),
        PurchaseOutcome::Installed { persisted: true }
    );
    assert_eq!(p.app.purchase(AppId::TikTok), PurchaseOutcome::AlreadyOwned);
    let count = p
        .app
        .home_apps()
        .iter()
        .filter(|id| **id == AppId::TikTok)
        .count();
    assert_eq!(count, 1);

    p.app.go_home();
    assert_eq!(
        p.app.open_app(AppId::TikTok),
        LaunchOutcome::External("snssdk1233://")
    );
    assert_eq!(p.opener.opened(), ["snssdk1233://"]);
}

#[test]
fn built_ins_never_appear_in_store() {
    let mut p = phone();
    unlock(&mut p.app);
    assert_eq!(p.app.purchase(AppId::Maps), PurchaseOutcome::AlreadyOwned);
    for id in p.app.available_for_purchase() {
        assert!(!id.is_built_in());
    }
}

#[test]
fn wallpaper_and_feed_follow_the_clock() {
    let mut p = phone();
    assert_eq!(p.app.wallpaper(), Wallpaper::Default);

    p.clock.set(at(2026, 12, 24, 23, 59));
    p.app.frame_tick(Duration::from_secs(1));
    assert_eq!(p.app.wallpaper(), Wallpaper::Christmas);
    assert_eq!(p.app.clock_snapshot().time, "11:59 PM");

    unlock(&mut p.app);
    p.app.open_chat();
    let texts: Vec<&str> = p.app.feed().iter().map(|e| e.text).collect();
    assert_eq!(
        texts,
        ["Its Christmas Eve Ho Ho Ho!", "I'm excited For Christmas"]
    );
}

#[test]
fn lock_from_any_view_returns_to_lock_screen() {
    let mut p = phone();
    unlock(&mut p.app);
    for enter in [ViewState::Home, ViewState::Chat, ViewState::Store, ViewState::Game] {
        match enter {
            ViewState::Chat => p.app.open_chat(),
            ViewState::Store => p.app.open_store(),
            ViewState::Game => p.app.start_game(),
            _ => {}
        }
        assert_eq!(p.app.view(), enter);
        p.app.lock();
        assert_eq!(p.app.view(), ViewState::Lock);
        unlock(&mut p.app);
    }
    assert_eq!(p.app.scheduled_tasks(), 1);
}
