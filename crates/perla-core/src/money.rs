//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A bill passes through up to two rate stages (discount, platform fee). │
//! │  Floating point drifts a little at every stage; integer fen drift is   │
//! │  at most half a fen per stage and is applied exactly once per stage.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Fen                                              │
//! │    ¥20.25 = 2025 fen, ¥15.00/h × 1.5h × 90% = 2025 fen exactly         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use perla_core::money::{Money, Rate};
//!
//! // Create from fen (preferred)
//! let hourly = Money::from_cents(1500); // ¥15.00
//!
//! // Apply a 10% member discount
//! let discounted = hourly.apply_discount(Rate::from_percent(10)); // ¥13.50
//! assert_eq!(discounted.cents(), 1350);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (fen for CNY).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and profit math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON document serialization
///
/// Every monetary value in the system flows through this type: hourly and
/// daily rates, order prices, platform fees, expenses and partner shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from fen (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use perla_core::money::Money;
    ///
    /// let price = Money::from_cents(2025); // Represents ¥20.25
    /// assert_eq!(price.cents(), 2025);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole yuan.
    ///
    /// ## Example
    /// ```rust
    /// use perla_core::money::Money;
    ///
    /// let daily = Money::from_yuan(50); // ¥50.00
    /// assert_eq!(daily.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_yuan(yuan: i64) -> Self {
        Money(yuan * 100)
    }

    /// Returns the value in fen (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (yuan) portion.
    #[inline]
    pub const fn yuan(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (fen) portion (always 0-99).
    #[inline]
    pub const fn fen_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage rate and returns the resulting portion.
    ///
    /// Rounds half-up once, at this stage only. Used for platform fees and
    /// partner shares.
    ///
    /// ## Example
    /// ```rust
    /// use perla_core::money::{Money, Rate};
    ///
    /// let price = Money::from_cents(2025);          // ¥20.25
    /// let fee = price.portion(Rate::from_percent(6)); // 6% platform fee
    /// assert_eq!(fee.cents(), 122);                 // ¥1.215 → ¥1.22
    /// ```
    pub fn portion(&self, rate: Rate) -> Money {
        // i128 prevents overflow on large amounts
        // Formula: amount_cents * bps / 10000, rounded half-up via +5000
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount amount is computed with [`Money::portion`] and then
    /// subtracted, so `apply_discount(r) + portion(r) == self` always holds.
    ///
    /// ## Example
    /// ```rust
    /// use perla_core::money::{Money, Rate};
    ///
    /// let original = Money::from_cents(5000);              // ¥50.00
    /// let vip = original.apply_discount(Rate::from_percent(20));
    /// assert_eq!(vip.cents(), 4000);                       // ¥40.00
    /// ```
    pub fn apply_discount(&self, discount: Rate) -> Money {
        *self - self.portion(discount)
    }

    /// Multiplies an hourly rate by a number of billable half-hour units.
    ///
    /// Half-fen results round half-up, once.
    ///
    /// ## Example
    /// ```rust
    /// use perla_core::money::Money;
    ///
    /// let hourly = Money::from_cents(1500);       // ¥15.00 per hour
    /// let total = hourly.multiply_half_hours(3);  // 1.5 billable hours
    /// assert_eq!(total.cents(), 2250);            // ¥22.50
    /// ```
    pub fn multiply_half_hours(&self, half_hours: u32) -> Money {
        let doubled = self.0 as i128 * half_hours as i128;
        Money::from_cents(((doubled + 1) / 2) as i64)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Discounts and platform fees are configured as whole percents (member 10%,
/// vip 20%, a 6.8% platform fee), but stored in bps so fractional-percent
/// fees stay exact integers: 680 bps = 6.8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a whole percentage (10 = 10%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Rate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a whole percent, rounded (for display: "10%").
    #[inline]
    pub const fn percent_rounded(&self) -> u32 {
        (self.0 + 50) / 100
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is the presentation boundary: the only place an amount is rendered
/// with two decimals. Intermediate math stays in whole fen.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}¥{}.{:02}", sign, self.yuan().abs(), self.fen_part())
    }
}

impl Money {
    /// Renders the amount as a plain two-decimal string ("20.25").
    ///
    /// Used by the CSV export boundary, which carries no currency symbol.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.yuan().abs(), self.fen_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(2025);
        assert_eq!(money.cents(), 2025);
        assert_eq!(money.yuan(), 20);
        assert_eq!(money.fen_part(), 25);
    }

    #[test]
    fn test_from_yuan() {
        assert_eq!(Money::from_yuan(50).cents(), 5000);
        assert_eq!(Money::from_yuan(-5).cents(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(2025)), "¥20.25");
        assert_eq!(format!("{}", Money::from_cents(500)), "¥5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-¥5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "¥0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(2025).to_decimal_string(), "20.25");
        assert_eq!(Money::from_cents(0).to_decimal_string(), "0.00");
        assert_eq!(Money::from_cents(-7).to_decimal_string(), "-0.07");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_portion_rounds_half_up() {
        // ¥20.25 at 6% = ¥1.215 → ¥1.22
        let fee = Money::from_cents(2025).portion(Rate::from_percent(6));
        assert_eq!(fee.cents(), 122);

        // Fractional-percent rate: ¥100.00 at 6.8% = ¥6.80 exactly
        let fee = Money::from_cents(10000).portion(Rate::from_bps(680));
        assert_eq!(fee.cents(), 680);
    }

    #[test]
    fn test_discount_and_portion_partition() {
        // The discounted amount and the discount portion always recompose
        let original = Money::from_cents(3333);
        let rate = Rate::from_percent(15);
        assert_eq!(original.apply_discount(rate) + original.portion(rate), original);
    }

    #[test]
    fn test_multiply_half_hours() {
        let hourly = Money::from_cents(1500);
        assert_eq!(hourly.multiply_half_hours(0).cents(), 0);
        assert_eq!(hourly.multiply_half_hours(1).cents(), 750);
        assert_eq!(hourly.multiply_half_hours(3).cents(), 2250);

        // Odd rate: ¥15.55 × 1.5h = ¥23.325 → ¥23.33
        let odd = Money::from_cents(1555);
        assert_eq!(odd.multiply_half_hours(3).cents(), 2333);
    }

    #[test]
    fn test_rate_percent_display() {
        assert_eq!(Rate::from_percent(10).percent_rounded(), 10);
        assert_eq!(Rate::from_bps(680).percent_rounded(), 7);
        assert!(Rate::zero().is_zero());
    }
}
