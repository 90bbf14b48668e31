//! Numeric extraction from scraped text.
//!
//! Holdings tables and quote pages render weights as `"25.50%"` and P/E
//! values as `"12.3"`, `"-4.10"`, `"N/A"` and so on. The scanners here pull
//! the first number out of such text without ever failing: text with no
//! recognisable number degrades to `0.0` for weights and to an absent ratio
//! for P/E values.

/// Cell values that mean "no ratio reported", compared case-insensitively
/// after trimming.
const NOT_AVAILABLE: [&str; 3] = ["n/a", "-", "na"];

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn at(input: &'a str, pos: usize) -> Self {
        Self { input, pos }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_digits(&mut self) -> usize {
        let mut digits = 0;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    /// `digits+ ('.' digits*)? '%'` starting exactly here. Returns the number
    /// text without the percent sign.
    fn percentage(mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.consume_digits() == 0 {
            return None;
        }
        if self.consume_char('.') {
            self.consume_digits();
        }
        let input = self.input;
        let end = self.pos;
        self.consume_char('%').then(|| &input[start..end])
    }

    /// `[+-]? digits* '.'? digits+` starting exactly here.
    fn signed_decimal(mut self) -> Option<&'a str> {
        let input = self.input;
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        let int_digits = self.consume_digits();
        let int_end = self.pos;

        if self.consume_char('.') && self.consume_digits() > 0 {
            return Some(&input[start..self.pos]);
        }
        (int_digits > 0).then(|| &input[start..int_end])
    }
}

/// Leftmost match of `scan` over every start position in `text`.
fn first_match<'a>(text: &'a str, scan: fn(Scanner<'a>) -> Option<&'a str>) -> Option<&'a str> {
    text.char_indices()
        .find_map(|(pos, _)| scan(Scanner::at(text, pos)))
}

/// Extracts the first `12.34%`-style percentage from `text`.
///
/// Returns `0.0` when no number is immediately followed by `%`. The number
/// is unsigned; a leading `-` is treated as surrounding text.
pub fn parse_percentage(text: &str) -> f64 {
    first_match(text, Scanner::percentage)
        .and_then(|num| num.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Outcome of reading a ratio cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioReading {
    Value(f64),
    /// Empty, or one of the explicit "not available" markers.
    NotAvailable,
    /// Non-empty text with no number in it.
    Unrecognised,
}

impl RatioReading {
    pub fn value(self) -> Option<f64> {
        match self {
            RatioReading::Value(v) => Some(v),
            RatioReading::NotAvailable | RatioReading::Unrecognised => None,
        }
    }
}

/// Reads a ratio cell, distinguishing "not available" markers from text
/// that simply contains no number.
pub fn read_ratio(text: &str) -> RatioReading {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RatioReading::NotAvailable;
    }
    let lower = trimmed.to_lowercase();
    if NOT_AVAILABLE.contains(&lower.as_str()) {
        return RatioReading::NotAvailable;
    }

    match first_match(trimmed, Scanner::signed_decimal).and_then(|num| num.parse::<f64>().ok()) {
        Some(v) => RatioReading::Value(v),
        None => RatioReading::Unrecognised,
    }
}

/// Extracts the first optionally signed decimal from `text`.
///
/// `None` for empty input, the markers `n/a`, `-` and `na` (any case), or
/// text without a number. Negative ratios are returned as-is.
pub fn parse_ratio(text: &str) -> Option<f64> {
    read_ratio(text).value()
}
