//! # Pricing Engine
//!
//! Converts an elapsed duration, charge mode and customer type into the money
//! fields of an order.
//!
//! ## Billing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Pricing Pipeline                            │
//! │                                                                         │
//! │  duration_ms ──► billable_half_hours ──► × hourly rate ─┐              │
//! │                      (hourly mode)                       │              │
//! │                                                          ▼              │
//! │  (daily mode) ────────────► flat day rate ────► original_price          │
//! │                                                          │              │
//! │                                    one discount ─────────▼              │
//! │                                    (member/vip/student)  actual_payment │
//! │                                                          │              │
//! │                                    platform fee ─────────▼              │
//! │                                    (meituan/douyin/...)  net_income     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Half-Hour Buckets
//! Partial hours round up in half-hour steps: a remainder of 1-30 minutes
//! bills as half an hour, 31-59 minutes as a full hour. 90 minutes bills
//! 1.5 h, 121 minutes bills 2.5 h.
//!
//! The unit throughout is *half-hours* (u32) so the bucket math stays in
//! integers; only [`Money::multiply_half_hours`] divides by two, rounding a
//! half-fen up exactly once.

use serde::{Deserialize, Serialize};

use crate::config::StudioConfig;
use crate::money::{Money, Rate};
use crate::types::{ChargeType, CustomerType};

/// Milliseconds per minute.
const MINUTE_MS: i64 = 60 * 1000;

// =============================================================================
// Billable Duration
// =============================================================================

/// Number of billable half-hour units for an elapsed duration.
///
/// - negative or missing durations count as zero
/// - full hours contribute two units each
/// - a remainder of 1-30 minutes adds one unit, 31-59 adds two
///
/// Monotonically non-decreasing in the duration.
///
/// ## Example
/// ```rust
/// use perla_core::pricing::billable_half_hours;
///
/// assert_eq!(billable_half_hours(90 * 60 * 1000), 3);  // 1.5 h
/// assert_eq!(billable_half_hours(121 * 60 * 1000), 5); // 2.5 h
/// ```
pub fn billable_half_hours(duration_ms: i64) -> u32 {
    let total_minutes = duration_ms.max(0) / MINUTE_MS;
    let full_hours = total_minutes / 60;
    let remaining_minutes = total_minutes % 60;

    let mut units = (full_hours * 2) as u32;
    if remaining_minutes > 0 {
        if remaining_minutes <= 30 {
            units += 1;
        } else {
            units += 2;
        }
    }
    units
}

// =============================================================================
// Price Quote
// =============================================================================

/// The money fields of a priced session, ready to drop into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Price before discount.
    pub original_price: Money,

    /// The single discount that applied.
    pub discount: Rate,

    /// What the customer pays (discounted price).
    pub actual_payment: Money,

    /// Commission withheld by the originating platform.
    pub platform_fee: Money,

    /// What reaches the till: `actual_payment - platform_fee`.
    pub net_income: Money,
}

/// Prices a session.
///
/// Daily mode ignores the duration (it is still recorded on the order);
/// hourly mode bills half-hour buckets. Exactly one discount applies, then
/// the platform fee of a group-buy customer type is carved out of the
/// payment. Rounding happens once per stage, in whole fen.
///
/// ## Example
/// ```rust
/// use perla_core::config::StudioConfig;
/// use perla_core::pricing::quote;
/// use perla_core::types::{ChargeType, CustomerType};
///
/// let config = StudioConfig::default();
/// let q = quote(90 * 60 * 1000, ChargeType::Hourly, CustomerType::Member, &config);
/// assert_eq!(q.actual_payment.cents(), 2025); // 1.5h × ¥15 × 90%
/// ```
pub fn quote(
    duration_ms: i64,
    charge_type: ChargeType,
    customer_type: CustomerType,
    config: &StudioConfig,
) -> PriceQuote {
    let discount = config.discount_for(customer_type);

    let original_price = match charge_type {
        ChargeType::Daily => config.price_per_day,
        ChargeType::Hourly => config
            .price_per_hour
            .multiply_half_hours(billable_half_hours(duration_ms)),
    };

    let actual_payment = original_price.apply_discount(discount);

    let fee_rate = config.platform_fee_for(customer_type);
    let platform_fee = actual_payment.portion(fee_rate);
    let net_income = actual_payment - platform_fee;

    PriceQuote {
        original_price,
        discount,
        actual_payment,
        platform_fee,
        net_income,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformFee;

    fn minutes(m: i64) -> i64 {
        m * MINUTE_MS
    }

    #[test]
    fn test_half_hour_buckets() {
        assert_eq!(billable_half_hours(0), 0);
        assert_eq!(billable_half_hours(minutes(1)), 1);
        assert_eq!(billable_half_hours(minutes(30)), 1);
        assert_eq!(billable_half_hours(minutes(31)), 2);
        assert_eq!(billable_half_hours(minutes(59)), 2);
        assert_eq!(billable_half_hours(minutes(60)), 2);
        assert_eq!(billable_half_hours(minutes(61)), 3);
        assert_eq!(billable_half_hours(minutes(90)), 3);
        assert_eq!(billable_half_hours(minutes(120)), 4);
        assert_eq!(billable_half_hours(minutes(121)), 5);
        assert_eq!(billable_half_hours(minutes(125)), 5);
    }

    #[test]
    fn test_sub_minute_remainder_is_free() {
        // 59 seconds never reaches a whole minute
        assert_eq!(billable_half_hours(59_999), 0);
        assert_eq!(billable_half_hours(minutes(60) + 59_999), 2);
    }

    #[test]
    fn test_negative_duration_counts_as_zero() {
        assert_eq!(billable_half_hours(-minutes(90)), 0);
    }

    #[test]
    fn test_monotone_in_duration() {
        let mut prev = 0;
        for m in 0..=300 {
            let units = billable_half_hours(minutes(m));
            assert!(units >= prev, "decreased at {} minutes", m);
            prev = units;
        }
    }

    #[test]
    fn test_hourly_member_quote() {
        let config = StudioConfig::default();
        let q = quote(
            minutes(90),
            ChargeType::Hourly,
            CustomerType::Member,
            &config,
        );
        // 1.5h × ¥15.00 = ¥22.50, member 10% off → ¥20.25
        assert_eq!(q.original_price.cents(), 2250);
        assert_eq!(q.discount.bps(), 1000);
        assert_eq!(q.actual_payment.cents(), 2025);
        assert!(q.platform_fee.is_zero());
        assert_eq!(q.net_income, q.actual_payment);
    }

    #[test]
    fn test_daily_vip_quote_ignores_duration() {
        let config = StudioConfig::default();
        for duration in [0, minutes(10), minutes(600), minutes(60 * 24)] {
            let q = quote(duration, ChargeType::Daily, CustomerType::Vip, &config);
            // ¥50.00 × 80% → ¥40.00
            assert_eq!(q.original_price.cents(), 5000);
            assert_eq!(q.actual_payment.cents(), 4000);
        }
    }

    #[test]
    fn test_unrecognized_customer_pays_full_price() {
        let config = StudioConfig::default();
        let q = quote(
            minutes(60),
            ChargeType::Hourly,
            CustomerType::Normal,
            &config,
        );
        assert_eq!(q.actual_payment.cents(), 1500);
        assert!(q.discount.is_zero());
    }

    #[test]
    fn test_platform_fee_comes_out_of_net_income() {
        let mut config = StudioConfig::default();
        config
            .platform_fees
            .insert("meituan".to_string(), PlatformFee { fee_rate: 6 });

        let q = quote(
            minutes(60),
            ChargeType::Hourly,
            CustomerType::Meituan,
            &config,
        );
        // The customer still pays the full ¥15.00; the platform keeps 6%
        assert_eq!(q.actual_payment.cents(), 1500);
        assert_eq!(q.platform_fee.cents(), 90);
        assert_eq!(q.net_income.cents(), 1410);
    }

    #[test]
    fn test_unconfigured_platform_charges_no_fee() {
        let config = StudioConfig::default();
        let q = quote(
            minutes(60),
            ChargeType::Hourly,
            CustomerType::Douyin,
            &config,
        );
        assert!(q.platform_fee.is_zero());
        assert_eq!(q.net_income, q.actual_payment);
    }
}
