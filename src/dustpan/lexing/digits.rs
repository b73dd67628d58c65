//! Decimal digit decoding
//!
//! Digits may be written as ASCII `0`-`9` or as full-width `０`-`９`
//! (U+FF10..U+FF19); both fold to the same value.

/// Decode the first rune of `input` as a digit.
///
/// Returns the digit value (or `None` when the rune is not a digit, or the
/// input is empty) together with the number of bytes the rune occupies.
pub fn decode_digit(input: &str) -> (Option<u32>, usize) {
    match input.chars().next() {
        Some(c) => (digit_value(c), c.len_utf8()),
        None => (None, 0),
    }
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}

/// Result of decoding a run of consecutive digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitRun<'a> {
    /// Value of the first `max_digits` digits of the run.
    pub value: u32,
    /// Number of digits in the whole run, which may exceed `max_digits`.
    pub count: usize,
    /// First rune after the run, `None` at end of input.
    pub stop: Option<char>,
    /// Input remaining after the run, starting at `stop`.
    pub rest: &'a str,
}

/// Decode every consecutive digit at the start of `input`.
///
/// Only the first `max_digits` digits contribute to `value`; the rest are
/// still consumed and counted so callers can reject over-long runs.
pub fn decode_digit_run(input: &str, max_digits: usize) -> DigitRun<'_> {
    let mut value = 0u32;
    let mut count = 0usize;
    let mut rest = input;
    loop {
        let (digit, size) = decode_digit(rest);
        match digit {
            Some(d) => {
                if count < max_digits {
                    value = value.saturating_mul(10).saturating_add(d);
                }
                count += 1;
                rest = &rest[size..];
            }
            None => break,
        }
    }
    DigitRun {
        value,
        count,
        stop: rest.chars().next(),
        rest,
    }
}
