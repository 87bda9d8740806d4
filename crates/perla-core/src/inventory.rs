//! # Inventory Math
//!
//! Gram-precision stock calculations. Stock itself lives in
//! [`BeadColor`](crate::types::BeadColor) documents; everything here is
//! derived on demand and never stored.
//!
//! The studio buys and shelves beads in 13-gram bottles, so bottle counts
//! and restock suggestions all reduce to arithmetic on
//! [`crate::GRAMS_PER_BOTTLE`].

use serde::{Deserialize, Serialize};

use crate::{GRAMS_PER_BOTTLE, RESTOCK_TARGET_GRAM};

// =============================================================================
// Gram / Bottle Conversion
// =============================================================================

/// Whole bottles plus loose grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleCount {
    /// Full 13 g bottles.
    pub bottles: i64,

    /// Loose grams that don't fill a bottle (0-12).
    pub remaining: i64,
}

/// Splits a gram amount into whole bottles and loose grams.
///
/// ## Example
/// ```rust
/// use perla_core::inventory::gram_to_bottle;
///
/// let split = gram_to_bottle(135);
/// assert_eq!((split.bottles, split.remaining), (10, 5));
/// ```
pub fn gram_to_bottle(gram: i64) -> BottleCount {
    BottleCount {
        bottles: gram / GRAMS_PER_BOTTLE,
        remaining: gram % GRAMS_PER_BOTTLE,
    }
}

/// Recombines bottles and loose grams into a gram amount.
pub fn bottle_to_gram(bottles: i64, remaining: i64) -> i64 {
    bottles * GRAMS_PER_BOTTLE + remaining
}

// =============================================================================
// Restock Suggestions
// =============================================================================

/// Restock advice for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockSuggestion {
    /// Whether the color is below the threshold at all.
    pub need_restock: bool,

    /// Grams to order, a whole-bottle multiple. Zero when not needed.
    pub suggested_gram: i64,

    /// The same amount in bottles.
    pub suggested_bottles: i64,

    /// Stock on hand when the suggestion was computed.
    pub current_gram: i64,

    /// The refill target the suggestion tops up to.
    pub target_gram: i64,
}

/// Computes the restock suggestion for a stock level.
///
/// Below the threshold, the color is topped back up to at least
/// [`RESTOCK_TARGET_GRAM`], rounded up to whole bottles (the supplier does
/// not split bottles).
///
/// ## Example
/// ```rust
/// use perla_core::inventory::restock_suggestion;
///
/// let s = restock_suggestion(100, 250);
/// assert!(s.need_restock);
/// assert_eq!(s.suggested_gram % 13, 0);
/// assert!(s.suggested_gram >= 400);
/// ```
pub fn restock_suggestion(current_gram: i64, threshold_gram: i64) -> RestockSuggestion {
    if current_gram >= threshold_gram {
        return RestockSuggestion {
            need_restock: false,
            suggested_gram: 0,
            suggested_bottles: 0,
            current_gram,
            target_gram: RESTOCK_TARGET_GRAM,
        };
    }

    let shortfall = RESTOCK_TARGET_GRAM - current_gram;
    let bottles = (shortfall + GRAMS_PER_BOTTLE - 1) / GRAMS_PER_BOTTLE;
    let suggested_gram = bottles * GRAMS_PER_BOTTLE;

    RestockSuggestion {
        need_restock: true,
        suggested_gram,
        suggested_bottles: bottles,
        current_gram,
        target_gram: RESTOCK_TARGET_GRAM,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_to_bottle_exact() {
        let split = gram_to_bottle(130);
        assert_eq!(split.bottles, 10);
        assert_eq!(split.remaining, 0);
    }

    #[test]
    fn test_gram_to_bottle_with_loose_grams() {
        let split = gram_to_bottle(135);
        assert_eq!(split.bottles, 10);
        assert_eq!(split.remaining, 5);

        let split = gram_to_bottle(12);
        assert_eq!(split.bottles, 0);
        assert_eq!(split.remaining, 12);
    }

    #[test]
    fn test_bottle_round_trip() {
        for gram in [0, 1, 12, 13, 135, 500] {
            let split = gram_to_bottle(gram);
            assert_eq!(bottle_to_gram(split.bottles, split.remaining), gram);
        }
    }

    #[test]
    fn test_restock_below_threshold() {
        let s = restock_suggestion(100, 250);
        assert!(s.need_restock);
        // Covers at least the 400 g shortfall, in whole bottles
        assert!(s.suggested_gram >= 400);
        assert_eq!(s.suggested_gram % GRAMS_PER_BOTTLE, 0);
        assert_eq!(s.suggested_gram, s.suggested_bottles * GRAMS_PER_BOTTLE);
        // 400/13 = 30.77 → 31 bottles = 403 g
        assert_eq!(s.suggested_gram, 403);
    }

    #[test]
    fn test_restock_at_or_above_threshold() {
        for stock in [250, 251, 500, 10_000] {
            let s = restock_suggestion(stock, 250);
            assert!(!s.need_restock);
            assert_eq!(s.suggested_gram, 0);
        }
    }

    #[test]
    fn test_restock_exact_bottle_shortfall() {
        // Shortfall of 390 g is exactly 30 bottles; no round-up
        let s = restock_suggestion(110, 250);
        assert_eq!(s.suggested_gram, 390);
        assert_eq!(s.suggested_bottles, 30);
    }

    #[test]
    fn test_restock_empty_shelf() {
        let s = restock_suggestion(0, 250);
        assert!(s.need_restock);
        // 500/13 = 38.46 → 39 bottles = 507 g
        assert_eq!(s.suggested_gram, 507);
    }
}
