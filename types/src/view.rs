/// The single top-level screen currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    #[default]
    Lock,
    Home,
    Chat,
    Store,
    Game,
}

impl ViewState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewState::Lock => "lock",
            ViewState::Home => "home",
            ViewState::Chat => "chat",
            ViewState::Store => "store",
            ViewState::Game => "game",
        }
    }

    /// Views that draw the status bar and dock around their content.
    #[must_use]
    pub const fn has_dock(self) -> bool {
        matches!(self, ViewState::Home | ViewState::Chat | ViewState::Store)
    }
}
