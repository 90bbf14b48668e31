//! Holdings source port trait.

use crate::domain::error::BasketError;
use crate::domain::holding::Holding;

/// Supplies the listed constituents of a basket, in the order the source
/// lists them.
pub trait HoldingsPort {
    fn fetch_holdings(&self) -> Result<Vec<Holding>, BasketError>;
}
