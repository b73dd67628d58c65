//! Separator equivalence table
//!
//! Dates are written with whatever dash the writer's keyboard produced. All
//! the look-alike hyphens, minus signs, dashes and box-drawing strokes fold
//! onto [`SeparatorClass::Dash`]; full-width slash and full stop fold onto
//! their ASCII classes.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical separator family; year/month and month/day separators must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeparatorClass {
    /// `年` / `月`, which also requires a trailing `日`.
    Kanji,
    Slash,
    Dash,
    Period,
}

pub const KANJI_YEAR: char = '年';
pub const KANJI_MONTH: char = '月';
pub const KANJI_DAY: char = '日';

static SHARED: Lazy<HashMap<char, SeparatorClass>> = Lazy::new(|| {
    use SeparatorClass::*;
    let mut table = HashMap::new();
    table.insert('/', Slash);
    table.insert('／', Slash);
    table.insert('.', Period);
    table.insert('．', Period);
    for c in [
        // hyphen-minus
        '\u{002D}', '\u{FE63}', '\u{FF0D}',
        // hyphen
        '\u{2010}', '\u{2011}', '\u{2043}',
        // minus
        '\u{02D7}', '\u{2212}', '\u{29FF}', '\u{2796}',
        // dash
        '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2E3A}', '\u{2E3B}', '\u{FE58}',
        // box drawing
        '\u{2500}', '\u{2501}', '\u{2574}', '\u{2576}', '\u{2578}', '\u{257A}', '\u{257C}',
        '\u{257E}',
    ] {
        table.insert(c, Dash);
    }
    table
});

/// Class of a separator found between the year and the month.
pub fn year_separator(c: char) -> Option<SeparatorClass> {
    if c == KANJI_YEAR {
        return Some(SeparatorClass::Kanji);
    }
    SHARED.get(&c).copied()
}

/// Class of a separator found between the month and the day.
pub fn month_separator(c: char) -> Option<SeparatorClass> {
    if c == KANJI_MONTH {
        return Some(SeparatorClass::Kanji);
    }
    SHARED.get(&c).copied()
}

/// Every non-kanji separator rune, for exhaustive tests.
pub fn shared_separators() -> Vec<(char, SeparatorClass)> {
    let mut all: Vec<_> = SHARED.iter().map(|(c, class)| (*c, *class)).collect();
    all.sort();
    all
}
