//! Capitalization-weighted P/E aggregation.
//!
//! Each listed holding contributes `weight × ratio`, with the default ratio
//! standing in for holdings that reported none. Whatever weight the listed
//! holdings leave unaccounted for (`100 − Σ weight`) is assumed to trade at
//! the default ratio as well.
//!
//! The result stays on the 0–100 weight scale: `weighted_ratio` is the sum of
//! percentage-point × ratio terms and is *not* divided by 100. A basket
//! entirely at P/E 20 therefore reports 2000. [`AggregationResult::normalized_ratio`]
//! gives the conventional per-unit figure for callers that want it.

use super::holding::Holding;

pub const DEFAULT_RATIO: f64 = 20.0;

/// Total weight, in percentage points, a fully described basket sums to.
pub const FULL_WEIGHT: f64 = 100.0;

/// Where a holding's effective ratio came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioSource {
    Reported(f64),
    Default(f64),
}

impl RatioSource {
    pub fn value(self) -> f64 {
        match self {
            RatioSource::Reported(v) | RatioSource::Default(v) => v,
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, RatioSource::Default(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingContribution {
    pub holding: Holding,
    pub ratio: RatioSource,
    pub contribution: f64,
}

impl HoldingContribution {
    pub fn effective_ratio(&self) -> f64 {
        self.ratio.value()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// Per-holding breakdown in input order.
    pub contributions: Vec<HoldingContribution>,
    pub default_ratio: f64,
    pub total_listed_weight: f64,
    pub weighted_sum: f64,
    /// Unclamped; negative when listed weights exceed 100.
    pub residual_weight: f64,
    pub residual_contribution: f64,
    pub weighted_ratio: f64,
}

impl AggregationResult {
    /// `weighted_ratio` rescaled to a 0–1 weight basis.
    pub fn normalized_ratio(&self) -> f64 {
        self.weighted_ratio / FULL_WEIGHT
    }

    pub fn defaulted_count(&self) -> usize {
        self.contributions
            .iter()
            .filter(|c| c.ratio.is_default())
            .count()
    }
}

/// Aggregates `holdings` into a basket-wide weighted ratio.
///
/// Pure and infallible. Weights are not validated: totals above 100 yield a
/// negative residual that flows through the arithmetic.
pub fn aggregate(holdings: &[Holding], default_ratio: f64) -> AggregationResult {
    let mut contributions = Vec::with_capacity(holdings.len());
    let mut total_listed_weight = 0.0_f64;
    let mut weighted_sum = 0.0_f64;

    for holding in holdings {
        let ratio = match holding.ratio {
            Some(v) => RatioSource::Reported(v),
            None => RatioSource::Default(default_ratio),
        };
        let contribution = holding.weight * ratio.value();

        total_listed_weight += holding.weight;
        weighted_sum += contribution;
        contributions.push(HoldingContribution {
            holding: holding.clone(),
            ratio,
            contribution,
        });
    }

    let residual_weight = FULL_WEIGHT - total_listed_weight;
    let residual_contribution = residual_weight * default_ratio;

    AggregationResult {
        contributions,
        default_ratio,
        total_listed_weight,
        weighted_sum,
        residual_weight,
        residual_contribution,
        weighted_ratio: weighted_sum + residual_contribution,
    }
}
