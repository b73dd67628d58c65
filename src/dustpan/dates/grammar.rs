//! Date and log-date grammars
//!
//! A date is `YYYY <sep> M[M] <sep> D[D]`, whitespace allowed around every
//! component, where both separators belong to the same [`SeparatorClass`].
//! The kanji form additionally ends in `日`: `2019年11月13日`.
//!
//! Only the syntax is checked here. Whether the triple names a real day is
//! decided by [`calendar_date`], so February 30th parses fine and fails later.

use chrono::NaiveDate;

use super::error::DateError;
use super::separators::{month_separator, year_separator, SeparatorClass, KANJI_DAY};
use crate::dustpan::lexing::glyphs::{
    find_rune, is_close_group, is_open_group, is_space, rfind_rune, trim_spaces,
    trim_start_spaces,
};
use crate::dustpan::lexing::{decode_digit_run, DigitRun};

/// A syntactically valid date plus whatever followed it on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate<'a> {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Text after the date, trimmed. Non-empty means a second value followed.
    pub trailing: &'a str,
}

impl ParsedDate<'_> {
    pub fn to_naive_date(&self) -> Result<NaiveDate, DateError> {
        calendar_date(self.year, self.month, self.day)
    }
}

/// A date found in the last parenthesized group of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDate<'a> {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Everything before the opening parenthesis, untouched.
    pub pre: &'a str,
    /// Text after the date inside the parentheses, trimmed.
    pub post: &'a str,
}

impl LogDate<'_> {
    pub fn to_naive_date(&self) -> Result<NaiveDate, DateError> {
        calendar_date(self.year, self.month, self.day)
    }
}

/// Build a calendar date, rejecting triples that do not name a real day.
pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDate)
}

pub fn parse_date(text: &str) -> Result<ParsedDate<'_>, DateError> {
    let year = decode_digit_run(trim_start_spaces(text), 4);
    if year.count != 4 {
        return Err(DateError::YearFormat);
    }

    let rest = trim_start_spaces(year.rest);
    let Some(sep) = rest.chars().next() else {
        return Err(DateError::InvalidFormat);
    };
    let class = year_separator(sep).ok_or(DateError::InvalidFormat)?;
    let rest = &rest[sep.len_utf8()..];

    let month = decode_digit_run(trim_start_spaces(rest), 2);
    check_count(&month, DateError::NoMonthSpecified, DateError::MonthOutOfRange)?;

    let rest = trim_start_spaces(month.rest);
    let sep = rest.chars().next();
    if sep.and_then(month_separator) != Some(class) {
        return Err(DateError::InvalidMonthSuffix);
    }
    let rest = &rest[sep.map_or(0, char::len_utf8)..];

    let day = decode_digit_run(trim_start_spaces(rest), 2);
    check_count(&day, DateError::NoDaySpecified, DateError::DayOutOfRange)?;

    let mut rest = day.rest;
    if class == SeparatorClass::Kanji {
        rest = trim_start_spaces(rest);
        match rest.chars().next() {
            Some(KANJI_DAY) => rest = &rest[KANJI_DAY.len_utf8()..],
            _ => return Err(DateError::InvalidDaySuffix),
        }
    }

    match rest.chars().next() {
        Some(c) if !is_space(c) => Err(DateError::UnknownDateSuffix),
        _ => Ok(ParsedDate {
            year: year.value as i32,
            month: month.value,
            day: day.value,
            trailing: trim_spaces(rest),
        }),
    }
}

fn check_count(run: &DigitRun<'_>, missing: DateError, too_long: DateError) -> Result<(), DateError> {
    match run.count {
        0 => Err(missing),
        1 | 2 => Ok(()),
        _ => Err(too_long),
    }
}

/// Parse the date annotation at the end of a log line: `did the thing (2019/11/13)`.
///
/// The date sits between the last opening parenthesis and the first closing
/// parenthesis after it. Nothing but whitespace may follow that closing
/// parenthesis.
pub fn parse_log_date(text: &str) -> Result<LogDate<'_>, DateError> {
    let (open, open_width) = rfind_rune(text, is_open_group).ok_or(DateError::NoOpenParenthesis)?;
    let pre = &text[..open];
    let inner = &text[open + open_width..];

    let (close, close_width) =
        find_rune(inner, is_close_group).ok_or(DateError::NoCloseParenthesis)?;
    if !trim_start_spaces(&inner[close + close_width..]).is_empty() {
        return Err(DateError::ExtraTextAfterDate);
    }

    let date = parse_date(&inner[..close])?;
    Ok(LogDate {
        year: date.year,
        month: date.month,
        day: date.day,
        pre,
        post: date.trailing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_forms() {
        for text in ["2019/11/13", "2019-11-13", "2019.11.13", "2019年11月13日"] {
            let date = parse_date(text).unwrap();
            assert_eq!((date.year, date.month, date.day), (2019, 11, 13), "{text}");
            assert_eq!(date.trailing, "");
        }
    }

    #[test]
    fn test_trailing_word_is_returned() {
        let date = parse_date("2003年01月   3   日 太郎").unwrap();
        assert_eq!((date.year, date.month, date.day), (2003, 1, 3));
        assert_eq!(date.trailing, "太郎");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse_date(".1.3"), Err(DateError::YearFormat));
        assert_eq!(parse_date("20034.1.3"), Err(DateError::YearFormat));
        assert_eq!(parse_date("2003"), Err(DateError::InvalidFormat));
        assert_eq!(parse_date("2003_1_3"), Err(DateError::InvalidFormat));
        assert_eq!(parse_date("2003..3"), Err(DateError::NoMonthSpecified));
        assert_eq!(parse_date("2003.111.3"), Err(DateError::MonthOutOfRange));
        assert_eq!(parse_date("2003.1-3"), Err(DateError::InvalidMonthSuffix));
        assert_eq!(parse_date("2003.1"), Err(DateError::InvalidMonthSuffix));
        assert_eq!(parse_date("2003.1."), Err(DateError::NoDaySpecified));
        assert_eq!(parse_date("2003.1.333"), Err(DateError::DayOutOfRange));
        assert_eq!(parse_date("2003年1月3"), Err(DateError::InvalidDaySuffix));
        assert_eq!(parse_date("2003.1.3b"), Err(DateError::UnknownDateSuffix));
    }

    #[test]
    fn test_calendar_is_not_checked_by_grammar() {
        let date = parse_date("2019/2/30").unwrap();
        assert_eq!(date.to_naive_date(), Err(DateError::InvalidDate));
        assert_eq!(calendar_date(2019, 13, 1), Err(DateError::InvalidDate));
        assert_eq!(calendar_date(2020, 2, 29), Ok(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()));
    }

    #[test]
    fn test_log_date_pre_and_post() {
        let log = parse_log_date("hello(2003/1/3 world)").unwrap();
        assert_eq!((log.year, log.month, log.day), (2003, 1, 3));
        assert_eq!(log.pre, "hello");
        assert_eq!(log.post, "world");
    }

    #[test]
    fn test_log_date_uses_last_open_group() {
        let log = parse_log_date("call (bob) back (2020/5/6)").unwrap();
        assert_eq!(log.pre, "call (bob) back ");
        assert_eq!((log.year, log.month, log.day), (2020, 5, 6));
    }

    #[test]
    fn test_log_date_errors() {
        assert_eq!(parse_log_date("hello 2003/01/03"), Err(DateError::NoOpenParenthesis));
        assert_eq!(parse_log_date("hello(2003/01/03"), Err(DateError::NoCloseParenthesis));
        assert_eq!(
            parse_log_date("hello( 2003-01-03) world"),
            Err(DateError::ExtraTextAfterDate)
        );
        assert_eq!(parse_log_date("hello(world)"), Err(DateError::YearFormat));
    }
}
