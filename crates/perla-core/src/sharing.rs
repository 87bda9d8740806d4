//! # Cost Sharing
//!
//! Splits proceeds among the studio's enabled partners in proportion to
//! their configured share ratios.
//!
//! ## Rounding Slack
//! Each partner's share rounds to whole fen independently, so the shares
//! may not sum exactly to the base amount (e.g. three equal partners of
//! ¥1.00 each receive ¥0.33, leaving ¥0.01 unassigned). The remainder is
//! intentionally not reconciled; reports show it as slack.

use serde::{Deserialize, Serialize};

use crate::config::{CostSharing, SharingScope};
use crate::money::Money;

/// One partner's computed share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerShare {
    /// Partner display name.
    pub name: String,

    /// The partner's configured ratio weight.
    pub ratio: u32,

    /// The rounded share amount.
    pub amount: Money,
}

/// Splits an amount among the enabled partners.
///
/// Returns an empty set when sharing is disabled, no partner is enabled,
/// or the enabled ratios sum to zero. With `scope == Profit` the base is
/// `total - expenses`, otherwise the gross `total`.
///
/// ## Example
/// ```rust
/// use perla_core::config::{CostSharing, Partner, SharingScope};
/// use perla_core::money::Money;
/// use perla_core::sharing::split;
///
/// let rules = CostSharing {
///     enabled: true,
///     sharing_scope: SharingScope::Revenue,
///     partners: vec![
///         Partner { name: "阿文".into(), share_ratio: 60, enabled: true },
///         Partner { name: "小鱼".into(), share_ratio: 40, enabled: true },
///     ],
/// };
/// let shares = split(Money::from_yuan(100), Money::zero(), &rules);
/// assert_eq!(shares[0].amount.cents(), 6000);
/// assert_eq!(shares[1].amount.cents(), 4000);
/// ```
pub fn split(total: Money, expenses: Money, rules: &CostSharing) -> Vec<PartnerShare> {
    if !rules.enabled {
        return Vec::new();
    }

    let enabled: Vec<_> = rules.partners.iter().filter(|p| p.enabled).collect();
    if enabled.is_empty() {
        return Vec::new();
    }

    let total_ratio: u64 = enabled.iter().map(|p| p.share_ratio as u64).sum();
    if total_ratio == 0 {
        return Vec::new();
    }

    let base = match rules.sharing_scope {
        SharingScope::Profit => total - expenses,
        SharingScope::Revenue => total,
    };

    enabled
        .into_iter()
        .map(|partner| {
            // base × ratio / total_ratio, rounded to whole fen independently
            // per partner (ties away from zero)
            let numerator = base.cents() as i128 * partner.share_ratio as i128;
            let denominator = total_ratio as i128;
            let amount = div_rounded(numerator, denominator);

            PartnerShare {
                name: partner.name.clone(),
                ratio: partner.share_ratio,
                amount: Money::from_cents(amount as i64),
            }
        })
        .collect()
}

/// Rounded division with ties away from zero; `d` must be positive.
fn div_rounded(n: i128, d: i128) -> i128 {
    if n >= 0 {
        (n * 2 + d) / (d * 2)
    } else {
        -(((-n) * 2 + d) / (d * 2))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Partner;

    fn rules(scope: SharingScope, partners: Vec<(&str, u32, bool)>) -> CostSharing {
        CostSharing {
            enabled: true,
            sharing_scope: scope,
            partners: partners
                .into_iter()
                .map(|(name, ratio, enabled)| Partner {
                    name: name.to_string(),
                    share_ratio: ratio,
                    enabled,
                })
                .collect(),
        }
    }

    #[test]
    fn test_disabled_sharing_yields_nothing() {
        let mut r = rules(SharingScope::Revenue, vec![("a", 50, true)]);
        r.enabled = false;
        assert!(split(Money::from_yuan(100), Money::zero(), &r).is_empty());
    }

    #[test]
    fn test_no_enabled_partners_yields_nothing() {
        let r = rules(SharingScope::Revenue, vec![("a", 50, false), ("b", 50, false)]);
        assert!(split(Money::from_yuan(100), Money::zero(), &r).is_empty());
    }

    #[test]
    fn test_zero_ratio_sum_yields_nothing() {
        let r = rules(SharingScope::Revenue, vec![("a", 0, true)]);
        assert!(split(Money::from_yuan(100), Money::zero(), &r).is_empty());
    }

    #[test]
    fn test_revenue_scope_ignores_expenses() {
        let r = rules(SharingScope::Revenue, vec![("a", 60, true), ("b", 40, true)]);
        let shares = split(Money::from_yuan(100), Money::from_yuan(30), &r);
        assert_eq!(shares[0].amount.cents(), 6000);
        assert_eq!(shares[1].amount.cents(), 4000);
    }

    #[test]
    fn test_profit_scope_subtracts_expenses() {
        let r = rules(SharingScope::Profit, vec![("a", 60, true), ("b", 40, true)]);
        let shares = split(Money::from_yuan(100), Money::from_yuan(30), &r);
        assert_eq!(shares[0].amount.cents(), 4200);
        assert_eq!(shares[1].amount.cents(), 2800);
    }

    #[test]
    fn test_disabled_partner_is_skipped_and_renormalized() {
        let r = rules(
            SharingScope::Revenue,
            vec![("a", 50, true), ("b", 30, false), ("c", 50, true)],
        );
        let shares = split(Money::from_yuan(100), Money::zero(), &r);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].amount.cents(), 5000);
        assert_eq!(shares[1].amount.cents(), 5000);
    }

    #[test]
    fn test_rounding_slack_is_tolerated() {
        // ¥1.00 across three equal partners: 33 + 33 + 33 = 99 fen
        let r = rules(
            SharingScope::Revenue,
            vec![("a", 1, true), ("b", 1, true), ("c", 1, true)],
        );
        let shares = split(Money::from_cents(100), Money::zero(), &r);
        let sum: i64 = shares.iter().map(|s| s.amount.cents()).sum();
        assert_eq!(shares[0].amount.cents(), 33);
        assert_eq!(sum, 99); // one fen of documented slack
    }

    #[test]
    fn test_negative_profit_splits_negative() {
        // Expenses above revenue: partners share the loss proportionally
        let r = rules(SharingScope::Profit, vec![("a", 1, true), ("b", 1, true)]);
        let shares = split(Money::from_yuan(10), Money::from_yuan(30), &r);
        assert_eq!(shares[0].amount.cents(), -1000);
        assert_eq!(shares[1].amount.cents(), -1000);
    }
}
