//! # Time formats
//!
//! Token based, locale agnostic date/time formats in the style of day.js
//! (`HH:mm`, `YYYY-MM-DD HH:mm:ss`, `ddd h:mm A`, ...).
//!
//! A format string is compiled once into a list of [`Item`]s, each token
//! standing for a chrono strftime specifier. The compiled [`TimeFormat`] can
//! then
//!
//! - **render** any instant (infallible), and
//! - **strictly parse** text back, accepting only input that the same format
//!   would have produced.
//!
//! Letters outside `[...]` must form a known token; anything else is a
//! [`FormatError`]. That is what lets a bad setting be detected up front
//! instead of silently leaking letters into every timestamp.
//!
//! | token  | output            | token  | output          |
//! |--------|-------------------|--------|-----------------|
//! | `YYYY` | 2024              | `H`    | 0-23            |
//! | `YY`   | 24                | `HH`   | 00-23           |
//! | `M`    | 1-12              | `h`    | 1-12            |
//! | `MM`   | 01-12             | `hh`   | 01-12           |
//! | `MMM`  | Jan-Dec           | `m`    | 0-59            |
//! | `MMMM` | January-December  | `mm`   | 00-59           |
//! | `D`    | 1-31              | `s`    | 0-59            |
//! | `DD`   | 01-31             | `ss`   | 00-59           |
//! | `d`    | 0-6 (Sunday = 0)  | `SSS`  | 000-999         |
//! | `dd`   | Su-Sa             | `A`    | AM PM           |
//! | `ddd`  | Sun-Sat           | `a`    | am pm           |
//! | `dddd` | Sunday-Saturday   | `Z`    | +05:00          |
//! |        |                   | `ZZ`   | +0500           |

mod parse;
mod render;
mod tokens;

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};

pub use parse::ParseError;
pub use tokens::{FormatError, Item, Token};

/// A compiled time format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    source: String,
    items: Vec<Item>,
}

impl TimeFormat {
    pub fn parse(format: &str) -> Result<Self, FormatError> {
        Ok(Self {
            source: format.to_string(),
            items: tokens::tokenize(format)?,
        })
    }

    /// The format string this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render `at` in its own offset.
    pub fn render(&self, at: &DateTime<FixedOffset>) -> String {
        render::render(&self.items, at)
    }

    /// Parse `input`, accepting it only if it is exactly what this format
    /// renders for the parsed value.
    ///
    /// `reference` supplies the date when the format has no date tokens.
    /// Without an offset token the result is in UTC.
    pub fn parse_strict(
        &self,
        input: &str,
        reference: NaiveDate,
    ) -> Result<DateTime<FixedOffset>, ParseError> {
        parse::parse_strict(&self.items, input, reference)
    }

    /// Check whether `input` strictly parses under this format.
    pub fn matches(&self, input: &str, reference: NaiveDate) -> bool {
        self.parse_strict(input, reference).is_ok()
    }
}

impl FromStr for TimeFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
