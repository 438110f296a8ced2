//! Core domain types for KatPhone.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the app catalog,
//! the top-level view enumeration, the virtual display geometry, and the two
//! calendar-driven rule chains (wallpaper and message feed).

mod catalog;
mod color;
mod feed;
mod geometry;
mod view;
mod wallpaper;

pub use catalog::{AppAction, AppCatalogEntry, AppId, Availability, CATALOG, UnknownAppError};
pub use color::Rgb;
pub use feed::{ChatEntry, Speaker, generate_feed};
pub use geometry::{DisplaySize, PlayBounds, Point, TARGET_SIZE};
pub use view::ViewState;
pub use wallpaper::{Wallpaper, select_wallpaper};
