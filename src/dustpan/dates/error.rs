use thiserror::Error;

/// Why a date or log-date annotation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("the year must be exactly four digits")]
    YearFormat,
    #[error("malformed date")]
    InvalidFormat,
    #[error("no month specified")]
    NoMonthSpecified,
    #[error("the month has more than two digits")]
    MonthOutOfRange,
    #[error("month separator does not match the year separator")]
    InvalidMonthSuffix,
    #[error("no day specified")]
    NoDaySpecified,
    #[error("the day has more than two digits")]
    DayOutOfRange,
    #[error("expected '日' after the day")]
    InvalidDaySuffix,
    #[error("unexpected text directly after the date")]
    UnknownDateSuffix,
    #[error("no date in parentheses")]
    NoOpenParenthesis,
    #[error("unclosed parenthesis before the date")]
    NoCloseParenthesis,
    #[error("text follows the parenthesized date")]
    ExtraTextAfterDate,
    #[error("no such calendar date")]
    InvalidDate,
}
