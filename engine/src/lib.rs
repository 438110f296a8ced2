//! Core state machine for KatPhone.
//!
//! [`App`] owns every piece of phone state: the active view, the lock gesture,
//! the tap game, the owned-app set and the repeating timers. Front ends drive
//! it through the public operations below and call [`App::frame_tick`] once per
//! frame with the real elapsed time. Nothing here touches the terminal.

use std::time::Duration;

use katphone_config::UiOptions;
use katphone_store::KeyValueStore;
use katphone_types::{
    AppAction, AppId, ChatEntry, DisplaySize, Point, ViewState, Wallpaper, generate_feed,
    select_wallpaper,
};

mod animation;
mod clock;
mod game;
mod lock;
mod notifications;
mod opener;
mod ownership;
mod scheduler;

pub use animation::{EffectTimer, Spring, ease_in_out};
pub use clock::{CLOCK_REFRESH, Clock, ClockService, ClockSnapshot, FixedClock, SystemClock};
pub use game::{
    GameRound, Generation, SampleSequence, SpawnSource, TICK_PERIOD, TapGameEngine, TapOutcome,
    ThreadRandom, TickOutcome,
};
pub use lock::{LockScreenController, ReleaseOutcome, UNLOCK_DURATION, UNLOCK_THRESHOLD};
pub use notifications::{Alert, AlertQueue};
pub use opener::{ExternalOpener, RecordingOpener, SystemOpener};
pub use ownership::{OWNED_APPS_KEY, OwnershipController, PurchaseOutcome};
pub use scheduler::{Scheduler, TaskHandle, TaskId};

/// Icons per row on the home screen.
pub const HOME_COLUMNS: usize = 4;

/// Collaborators injected at construction.
pub struct AppDeps {
    pub store: Box<dyn KeyValueStore>,
    pub clock: Box<dyn Clock>,
    pub opener: Box<dyn ExternalOpener>,
    pub spawner: Box<dyn SpawnSource>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppSettings {
    pub display: DisplaySize,
    pub ui: UiOptions,
}

/// Result of launching a home-screen entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Only reachable from the home screen.
    Ignored,
    NotOwned,
    Opened(ViewState),
    /// URI handed to the external opener; view unchanged.
    External(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug)]
struct GameTimer {
    handle: TaskHandle,
    generation: Generation,
}

pub struct App {
    view: ViewState,
    ui: UiOptions,
    display: DisplaySize,
    scheduler: Scheduler,
    clock: ClockService,
    clock_timer: TaskHandle,
    lock: LockScreenController,
    game: TapGameEngine,
    game_timer: Option<GameTimer>,
    ownership: OwnershipController,
    alerts: AlertQueue,
    opener: Box<dyn ExternalOpener>,
    home_cursor: usize,
    store_cursor: usize,
    feed: &'static [ChatEntry],
    should_quit: bool,
}

impl App {
    /// Build the phone in its initial state: locked, owned set loaded, clock
    /// refreshed once and its repeating refresh scheduled.
    #[must_use]
    pub fn new(deps: AppDeps, settings: AppSettings) -> Self {
        let AppDeps {
            store,
            clock,
            opener,
            spawner,
        } = deps;
        let AppSettings { display, ui } = settings;

        let mut scheduler = Scheduler::new();
        let clock_timer = scheduler.schedule(CLOCK_REFRESH);
        let clock = ClockService::new(clock);
        let feed = generate_feed(clock.snapshot().today);

        let DisplaySize { width, height } = display;
        tracing::info!(
            width,
            height,
            reduced_motion = ui.reduced_motion,
            "Phone started"
        );

        Self {
            view: ViewState::Lock,
            ui,
            display,
            scheduler,
            clock,
            clock_timer,
            lock: LockScreenController::new(display.height, ui.reduced_motion),
            game: TapGameEngine::new(display, spawner),
            game_timer: None,
            ownership: OwnershipController::initialize(store),
            alerts: AlertQueue::default(),
            opener,
            home_cursor: 0,
            store_cursor: 0,
            feed,
            should_quit: false,
        }
    }

    // Accessors

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui
    }

    #[must_use]
    pub fn display(&self) -> DisplaySize {
        self.display
    }

    #[must_use]
    pub fn clock_snapshot(&self) -> &ClockSnapshot {
        self.clock.snapshot()
    }

    /// Wallpaper for today's date.
    #[must_use]
    pub fn wallpaper(&self) -> Wallpaper {
        select_wallpaper(self.clock.snapshot().today)
    }

    /// Chat feed computed on the most recent entry to Chat.
    #[must_use]
    pub fn feed(&self) -> &'static [ChatEntry] {
        self.feed
    }

    /// Vertical translation of the lock screen content.
    #[must_use]
    pub fn lock_offset(&self) -> f32 {
        self.lock.offset()
    }

    #[must_use]
    pub fn is_unlocking(&self) -> bool {
        self.lock.is_unlocking()
    }

    #[must_use]
    pub fn game_round(&self) -> Option<&GameRound> {
        self.game.round()
    }

    #[must_use]
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.current()
    }

    #[must_use]
    pub fn is_owned(&self, id: AppId) -> bool {
        self.ownership.is_owned(id)
    }

    /// Owned apps in home-screen order.
    #[must_use]
    pub fn home_apps(&self) -> Vec<AppId> {
        self.ownership.owned_apps()
    }

    /// Store listing: purchasable apps not yet owned.
    #[must_use]
    pub fn available_for_purchase(&self) -> Vec<AppId> {
        self.ownership.available_for_purchase()
    }

    #[must_use]
    pub fn home_cursor(&self) -> usize {
        self.home_cursor
    }

    #[must_use]
    pub fn store_cursor(&self) -> usize {
        self.store_cursor
    }

    #[must_use]
    pub fn scheduled_tasks(&self) -> usize {
        self.scheduler.len()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        tracing::info!("Quit requested");
        self.should_quit = true;
    }

    // Frame loop

    /// Advance timers and animations by `delta`.
    pub fn frame_tick(&mut self, delta: Duration) {
        for id in self.scheduler.advance(delta) {
            if id == self.clock_timer.id() {
                self.clock.refresh();
                continue;
            }
            let Some(timer) = &self.game_timer else {
                continue;
            };
            if timer.handle.id() == id
                && self.game.tick(timer.generation) == TickOutcome::Respawned
            {
                tracing::debug!("Target timed out");
            }
        }

        if self.lock.advance(delta) {
            self.finish_unlock();
        }
    }

    // Lock screen

    pub fn begin_unlock_drag(&mut self, y: f32) {
        if self.view == ViewState::Lock {
            self.lock.begin_drag(y);
        }
    }

    pub fn drag_unlock(&mut self, y: f32) {
        if self.view == ViewState::Lock {
            self.lock.drag_to(y);
        }
    }

    pub fn release_unlock(&mut self) -> ReleaseOutcome {
        if self.view != ViewState::Lock {
            return ReleaseOutcome::Ignored;
        }
        let outcome = self.lock.release();
        if outcome == ReleaseOutcome::Unlocked {
            self.finish_unlock();
        }
        outcome
    }

    /// The "swipe up to unlock" button.
    pub fn tap_unlock(&mut self) -> ReleaseOutcome {
        if self.view != ViewState::Lock {
            return ReleaseOutcome::Ignored;
        }
        let outcome = self.lock.tap_unlock();
        if outcome == ReleaseOutcome::Unlocked {
            self.finish_unlock();
        }
        outcome
    }

    fn finish_unlock(&mut self) {
        if self.view == ViewState::Lock {
            self.set_view(ViewState::Home);
        }
    }

    /// Lock the phone from any view. Leaving a running game ends it first.
    pub fn lock(&mut self) {
        if self.view == ViewState::Game {
            self.quit_game();
        }
        self.lock.reset();
        self.set_view(ViewState::Lock);
    }

    // Navigation

    /// Launch a home-screen entry.
    pub fn open_app(&mut self, id: AppId) -> LaunchOutcome {
        if self.view != ViewState::Home {
            return LaunchOutcome::Ignored;
        }
        if !self.ownership.is_owned(id) {
            tracing::warn!(app = %id, "Refusing to launch app that is not owned");
            return LaunchOutcome::NotOwned;
        }
        match id.entry().action {
            AppAction::OpenView(ViewState::Chat) => {
                self.open_chat();
                LaunchOutcome::Opened(ViewState::Chat)
            }
            AppAction::OpenView(ViewState::Store) => {
                self.open_store();
                LaunchOutcome::Opened(ViewState::Store)
            }
            AppAction::OpenView(ViewState::Game) => {
                self.start_game();
                LaunchOutcome::Opened(ViewState::Game)
            }
            AppAction::OpenView(view) => {
                self.set_view(view);
                LaunchOutcome::Opened(view)
            }
            AppAction::OpenExternal(uri) => {
                tracing::info!(app = %id, uri, "Launching external app");
                self.opener.open(uri);
                LaunchOutcome::External(uri)
            }
        }
    }

    /// Enter Messages; the feed is recomputed for today's date.
    pub fn open_chat(&mut self) {
        if !self.view.has_dock() {
            return;
        }
        self.feed = generate_feed(self.clock.snapshot().today);
        self.set_view(ViewState::Chat);
    }

    pub fn open_store(&mut self) {
        if !self.view.has_dock() {
            return;
        }
        self.store_cursor = 0;
        self.set_view(ViewState::Store);
    }

    /// Return to Home from Chat or Store. Game leaves via [`App::quit_game`].
    pub fn go_home(&mut self) {
        if self.view.has_dock() {
            self.set_view(ViewState::Home);
        }
    }

    fn set_view(&mut self, view: ViewState) {
        if self.view != view {
            tracing::debug!(from = self.view.as_str(), to = view.as_str(), "View changed");
        }
        self.view = view;
    }

    // Game

    /// Begin a Cat Catcher session from Home.
    pub fn start_game(&mut self) {
        if self.view != ViewState::Home {
            return;
        }
        self.cancel_game_timer();
        let generation = self.game.start();
        let handle = self.scheduler.schedule(TICK_PERIOD);
        self.game_timer = Some(GameTimer { handle, generation });
        self.set_view(ViewState::Game);
    }

    /// Leave the game: timer cancelled, round discarded, back to Home.
    pub fn quit_game(&mut self) {
        if self.view != ViewState::Game {
            return;
        }
        self.cancel_game_timer();
        self.game.stop();
        self.set_view(ViewState::Home);
    }

    fn cancel_game_timer(&mut self) {
        if let Some(timer) = self.game_timer.take()
            && !self.scheduler.cancel(timer.handle)
        {
            tracing::warn!("Game timer was already cancelled");
        }
    }

    /// Tap at a display position during the game.
    pub fn tap_target(&mut self, at: Point) -> TapOutcome {
        if self.view != ViewState::Game {
            return TapOutcome::Inactive;
        }
        self.game.tap(at)
    }

    /// Hit the current target without a position (keyboard).
    pub fn hit_target(&mut self) -> TapOutcome {
        if self.view != ViewState::Game {
            return TapOutcome::Inactive;
        }
        self.game.hit()
    }

    // Store

    pub fn purchase(&mut self, id: AppId) -> PurchaseOutcome {
        let outcome = self.ownership.purchase(id, &mut self.alerts);
        self.clamp_store_cursor();
        outcome
    }

    /// Buy the highlighted store row. `None` when the listing is empty or the
    /// store is not open.
    pub fn buy_selected(&mut self) -> Option<PurchaseOutcome> {
        if self.view != ViewState::Store {
            return None;
        }
        let id = *self.available_for_purchase().get(self.store_cursor)?;
        Some(self.purchase(id))
    }

    pub fn select_store_row(&mut self, index: usize) {
        self.store_cursor = index;
        self.clamp_store_cursor();
    }

    pub fn move_store_cursor(&mut self, down: bool) {
        let len = self.available_for_purchase().len();
        if len == 0 {
            self.store_cursor = 0;
        } else if down {
            self.store_cursor = (self.store_cursor + 1).min(len - 1);
        } else {
            self.store_cursor = self.store_cursor.saturating_sub(1);
        }
    }

    fn clamp_store_cursor(&mut self) {
        let len = self.available_for_purchase().len();
        self.store_cursor = self.store_cursor.min(len.saturating_sub(1));
    }

    // Home cursor

    pub fn move_home_cursor(&mut self, direction: CursorMove) {
        let len = self.home_apps().len();
        if len == 0 {
            return;
        }
        let cursor = self.home_cursor.min(len - 1);
        self.home_cursor = match direction {
            CursorMove::Left => cursor.saturating_sub(1),
            CursorMove::Right => (cursor + 1).min(len - 1),
            CursorMove::Up => cursor.checked_sub(HOME_COLUMNS).unwrap_or(cursor),
            CursorMove::Down if cursor + HOME_COLUMNS < len => cursor + HOME_COLUMNS,
            CursorMove::Down => cursor,
        };
    }

    pub fn select_home_icon(&mut self, index: usize) {
        let len = self.home_apps().len();
        self.home_cursor = index.min(len.saturating_sub(1));
    }

    pub fn launch_selected(&mut self) -> LaunchOutcome {
        match self.home_apps().get(self.home_cursor) {
            Some(&id) => self.open_app(id),
            None => LaunchOutcome::Ignored,
        }
    }

    // Alerts

    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alerts.dismiss()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("view", &self.view)
            .field("display", &self.display)
            .field("game", &self.game)
            .field("ownership", &self.ownership)
            .field("alerts", &self.alerts)
            .finish_non_exhaustive()
    }
}
