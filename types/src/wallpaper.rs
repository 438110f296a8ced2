//! Seasonal wallpaper selection.

use chrono::{Datelike, NaiveDate};

use crate::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wallpaper {
    Birthday,
    January,
    July,
    Christmas,
    Default,
}

impl Wallpaper {
    /// Remote image reference for the wallpaper.
    #[must_use]
    pub const fn image_ref(self) -> &'static str {
        match self {
            Wallpaper::Birthday => "https://i.ibb.co/0RBWwgvK/Birthday-Cat.png",
            Wallpaper::January => "https://i.ibb.co/hRMjZHpR/January-Cat.png",
            Wallpaper::July => "https://i.ibb.co/0Ry75h2J/July-Cat.png",
            Wallpaper::Christmas => "https://i.ibb.co/qL0rs9DW/Christmas-Cat.png",
            Wallpaper::Default => "https://i.ibb.co/ynd5BXtT/Cat-Phone-Bc.png",
        }
    }

    /// Short caption drawn in place of the image.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Wallpaper::Birthday => "Birthday Cat",
            Wallpaper::January => "January Cat",
            Wallpaper::July => "July Cat",
            Wallpaper::Christmas => "Christmas Cat",
            Wallpaper::Default => "Cat Phone",
        }
    }

    /// Dominant tone of the image, used as the terminal background.
    #[must_use]
    pub const fn tint(self) -> Rgb {
        match self {
            Wallpaper::Birthday => Rgb::hex(0x3b1f4a),
            Wallpaper::January => Rgb::hex(0x1c2f45),
            Wallpaper::July => Rgb::hex(0x12324a),
            Wallpaper::Christmas => Rgb::hex(0x14361f),
            Wallpaper::Default => Rgb::hex(0x1f1f2b),
        }
    }
}

/// Pick the wallpaper for `date`. Rules are checked in order and the first match wins,
/// so December 25 resolves to the birthday wallpaper, never the Christmas one.
#[must_use]
pub fn select_wallpaper(date: NaiveDate) -> Wallpaper {
    let (month, day) = (date.month(), date.day());
    if (month == 12 && day == 25) || (month == 6 && day == 22) {
        return Wallpaper::Birthday;
    }
    if month == 1 {
        return Wallpaper::January;
    }
    if month == 7 {
        return Wallpaper::July;
    }
    if month == 12 {
        return Wallpaper::Christmas;
    }
    Wallpaper::Default
}
