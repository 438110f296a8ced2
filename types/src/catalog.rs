//! Static registry of launchable apps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Rgb, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppId {
    Messages,
    KatStore,
    CatCatcher,
    YouTube,
    Roblox,
    Spotify,
    TikTok,
    Instants,
    Discord,
    Catflix,
    Maps,
    Settings,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown app identifier: {0:?}")]
pub struct UnknownAppError(pub String);

impl AppId {
    /// Stable identifier; also the persisted form and the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AppId::Messages => "Messages",
            AppId::KatStore => "KatStore",
            AppId::CatCatcher => "Cat Catcher",
            AppId::YouTube => "YouTube",
            AppId::Roblox => "Roblox",
            AppId::Spotify => "Spotify",
            AppId::TikTok => "TikTok",
            AppId::Instants => "Instants",
            AppId::Discord => "Discord",
            AppId::Catflix => "Catflix",
            AppId::Maps => "Maps",
            AppId::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn entry(self) -> &'static AppCatalogEntry {
        // CATALOG is declared in enum order.
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn is_built_in(self) -> bool {
        self.entry().availability == Availability::BuiltIn
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        CATALOG
            .iter()
            .map(|entry| entry.id)
            .find(|id| id.as_str() == raw)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppId {
    type Err = UnknownAppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppId::parse(s).ok_or_else(|| UnknownAppError(s.to_string()))
    }
}

/// What launching an entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    OpenView(ViewState),
    /// Hand the URI to the platform's external-open facility.
    OpenExternal(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    BuiltIn,
    Purchasable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppCatalogEntry {
    pub id: AppId,
    pub glyph: &'static str,
    /// Fallback for terminals without emoji support.
    pub ascii_glyph: &'static str,
    pub color: Rgb,
    pub action: AppAction,
    pub availability: Availability,
}

const fn entry(
    id: AppId,
    glyph: &'static str,
    ascii_glyph: &'static str,
    color: u32,
    action: AppAction,
    availability: Availability,
) -> AppCatalogEntry {
    AppCatalogEntry {
        id,
        glyph,
        ascii_glyph,
        color: Rgb::hex(color),
        action,
        availability,
    }
}

/// Every entry, in home-screen order.
pub static CATALOG: [AppCatalogEntry; 12] = [
    entry(
        AppId::Messages,
        "✉️",
        "M",
        0x00d4ff,
        AppAction::OpenView(ViewState::Chat),
        Availability::BuiltIn,
    ),
    entry(
        AppId::KatStore,
        "🛍️",
        "$",
        0xffd11a,
        AppAction::OpenView(ViewState::Store),
        Availability::BuiltIn,
    ),
    entry(
        AppId::CatCatcher,
        "🐱",
        "C",
        0x9c27b0,
        AppAction::OpenView(ViewState::Game),
        Availability::BuiltIn,
    ),
    entry(
        AppId::YouTube,
        "📺",
        "Y",
        0xff0000,
        AppAction::OpenExternal("https://youtube.com"),
        Availability::BuiltIn,
    ),
    entry(
        AppId::Roblox,
        "🧱",
        "R",
        0xffffff,
        AppAction::OpenExternal("roblox://"),
        Availability::Purchasable,
    ),
    entry(
        AppId::Spotify,
        "🎧",
        "S",
        0x1db954,
        AppAction::OpenExternal("spotify://"),
        Availability::Purchasable,
    ),
    entry(
        AppId::TikTok,
        "📱",
        "T",
        0x000000,
        AppAction::OpenExternal("snssdk1233://"),
        Availability::Purchasable,
    ),
    entry(
        AppId::Instants,
        "🔊",
        "I",
        0xff9800,
        AppAction::OpenExternal("https://www.myinstants.com"),
        Availability::Purchasable,
    ),
    entry(
        AppId::Discord,
        "💬",
        "D",
        0x5865f2,
        AppAction::OpenExternal("https://discord.com/launch"),
        Availability::Purchasable,
    ),
    entry(
        AppId::Catflix,
        "🐈‍⬛",
        "F",
        0xe50914,
        AppAction::OpenExternal(
            "https://www.youtube.com/watch?v=zzggxCKuAN8&list=PLyLhExcPns9mhcjNROplRMMmjjvuf5bFG",
        ),
        Availability::Purchasable,
    ),
    entry(
        AppId::Maps,
        "🗺️",
        "P",
        0x4caf50,
        AppAction::OpenExternal("geo:0,0?q=cats"),
        Availability::BuiltIn,
    ),
    entry(
        AppId::Settings,
        "⚙️",
        "*",
        0x8e8e93,
        AppAction::OpenExternal("package:com.android.settings"),
        Availability::BuiltIn,
    ),
];
