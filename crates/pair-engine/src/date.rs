//! Strict calendar-date parsing over a fixed, ordered list of layouts.
//!
//! Several layouts are lexically ambiguous: `01/02/2024` fits both
//! `MM/DD/YYYY` and `DD/MM/YYYY`. The first layout in [`DATE_FORMATS`] that
//! matches wins, so such a string is read as January 2nd.

use chrono::NaiveDate;
use std::fmt;

/// One accepted date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    /// Human-readable layout, e.g. `DD.MM.YYYY`. Every `Y`, `M` and `D` is
    /// exactly one digit; every other character is a literal separator.
    pub layout: &'static str,
    /// The equivalent `chrono` format string.
    pub pattern: &'static str,
}

/// Accepted layouts, in priority order.
pub static DATE_FORMATS: [DateFormat; 8] = [
    DateFormat {
        layout: "YYYY-MM-DD",
        pattern: "%Y-%m-%d",
    },
    DateFormat {
        layout: "MM/DD/YYYY",
        pattern: "%m/%d/%Y",
    },
    DateFormat {
        layout: "DD/MM/YYYY",
        pattern: "%d/%m/%Y",
    },
    DateFormat {
        layout: "DD-MM-YYYY",
        pattern: "%d-%m-%Y",
    },
    DateFormat {
        layout: "MM-DD-YYYY",
        pattern: "%m-%d-%Y",
    },
    DateFormat {
        layout: "YYYY/MM/DD",
        pattern: "%Y/%m/%d",
    },
    DateFormat {
        layout: "DD.MM.YYYY",
        pattern: "%d.%m.%Y",
    },
    DateFormat {
        layout: "MM.DD.YYYY",
        pattern: "%m.%d.%Y",
    },
];

impl DateFormat {
    /// Parse `input` against this layout only.
    ///
    /// The input must have the layout's exact shape (no single-digit months,
    /// no extra whitespace) and name a real calendar date.
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        if !self.matches_shape(input) {
            return None;
        }
        NaiveDate::parse_from_str(input, self.pattern).ok()
    }

    fn matches_shape(&self, input: &str) -> bool {
        input.len() == self.layout.len()
            && input
                .bytes()
                .zip(self.layout.bytes())
                .all(|(c, l)| match l {
                    b'Y' | b'M' | b'D' => c.is_ascii_digit(),
                    sep => c == sep,
                })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layout)
    }
}

/// Parse a date string using the first matching layout in [`DATE_FORMATS`].
///
/// Surrounding whitespace is ignored. Returns `None` when no layout matches.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    parse_date_with_format(input).map(|(date, _)| date)
}

/// Like [`parse_date`], but also reports which layout matched.
pub fn parse_date_with_format(input: &str) -> Option<(NaiveDate, &'static DateFormat)> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| format.parse(input).map(|date| (date, format)))
}
