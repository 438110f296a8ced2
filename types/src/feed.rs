//! Scripted message feed for the chat view.

use chrono::{Datelike, NaiveDate};

use crate::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    Santa,
    Spacekit,
}

impl Speaker {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Speaker::Santa => "Santa",
            Speaker::Spacekit => "Spacekit",
        }
    }

    #[must_use]
    pub const fn accent(self) -> Rgb {
        match self {
            Speaker::Santa => Rgb::hex(0xff4d4d),
            Speaker::Spacekit => Rgb::hex(0x00d4ff),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: &'static str,
    pub accent: Rgb,
}

const fn santa(text: &'static str) -> ChatEntry {
    ChatEntry {
        speaker: Speaker::Santa,
        text,
        accent: Speaker::Santa.accent(),
    }
}

const fn spacekit(text: &'static str) -> ChatEntry {
    ChatEntry {
        speaker: Speaker::Spacekit,
        text,
        accent: Speaker::Spacekit.accent(),
    }
}

const CHRISTMAS_DAY: &[ChatEntry] = &[
    santa("Oh what's this?"),
    spacekit("Happy Birthday!"),
    santa("You mean Christmas"),
    spacekit("yeah...."),
    santa("Merry Christmas Anakin"),
];

const CHRISTMAS_EVE: &[ChatEntry] = &[
    santa("Its Christmas Eve Ho Ho Ho!"),
    spacekit("I'm excited For Christmas"),
];

const DECEMBER: &[ChatEntry] = &[
    santa("Its beginning to look like Christmas"),
    spacekit("it is"),
];

const INDEPENDENCE_DAY: &[ChatEntry] = &[spacekit("Happy 4th of July!")];

// Kept verbatim for July even though it reads like a New Year line.
const JULY: &[ChatEntry] = &[spacekit("New year New me!")];

const JUNE: &[ChatEntry] = &[spacekit("Its Summer TIME!!!")];

const DEFAULT: &[ChatEntry] = &[
    spacekit("System Update: Discord & Settings links fixed."),
    spacekit("No new messages."),
];

/// Conversation shown in the chat view on `date`, branching by month and then day.
#[must_use]
pub fn generate_feed(date: NaiveDate) -> &'static [ChatEntry] {
    match (date.month(), date.day()) {
        (12, 25) => CHRISTMAS_DAY,
        (12, 24) => CHRISTMAS_EVE,
        (12, _) => DECEMBER,
        (7, 4) => INDEPENDENCE_DAY,
        (7, _) => JULY,
        (6, _) => JUNE,
        _ => DEFAULT,
    }
}
