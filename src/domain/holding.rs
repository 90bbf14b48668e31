//! Basket constituent records.

/// One constituent of a basket.
///
/// `weight` is in percentage points (a 25.5% position has weight `25.5`).
/// `ratio` is the constituent's P/E, `None` when the source reported none.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub name: String,
    pub symbol: String,
    pub weight: f64,
    pub ratio: Option<f64>,
}

impl Holding {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        weight: f64,
        ratio: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            weight,
            ratio,
        }
    }

    /// Builds a holding straight from scraped cell text, e.g. `"25.50%"` and `"12.3"`.
    pub fn from_text(
        name: impl Into<String>,
        symbol: impl Into<String>,
        weight_text: &str,
        ratio_text: &str,
    ) -> Self {
        Self::new(
            name,
            symbol,
            super::text_parse::parse_percentage(weight_text),
            super::text_parse::parse_ratio(ratio_text),
        )
    }

    pub fn has_ratio(&self) -> bool {
        self.ratio.is_some()
    }
}
