//! # Studio Configuration
//!
//! The configuration singleton: pricing constants, discount and platform-fee
//! rates, stock thresholds, staff accounts and cost-sharing rules.
//!
//! ## Merge-Over-Defaults Loading
//! The persisted config document may predate newer fields (the studio has
//! upgraded through several versions). Deserialization therefore fills every
//! missing field from [`StudioConfig::default`], so an old document loads
//! cleanly and an absent or corrupt one yields pure defaults.
//!
//! ## Thread Safety
//! Configuration is plain data; the owning service decides how to share it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};
use crate::types::{CustomerType, Role, User};

/// Studio-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// Shop name shown in the UI header.
    pub shop_name: String,

    /// Contact phone printed on reports.
    pub shop_phone: String,

    /// Street address printed on reports.
    pub shop_address: String,

    /// Hourly table rate.
    pub price_per_hour: Money,

    /// Flat day rate.
    pub price_per_day: Money,

    /// Number of tables seeded into the registry.
    pub table_count: u32,

    /// Member discount, whole percent (10 = 10% off).
    pub member_discount: u32,

    /// VIP discount, whole percent.
    pub vip_discount: u32,

    /// Student discount, whole percent.
    pub student_discount: u32,

    /// Low-stock threshold in grams; colors below it get restock suggestions.
    pub low_stock_threshold_gram: i64,

    /// Per-platform commission rates, keyed by the customer-type key
    /// ("meituan", "douyin", ...). Unconfigured platforms charge nothing.
    pub platform_fees: BTreeMap<String, PlatformFee>,

    /// Partner cost-sharing rules.
    pub cost_sharing: CostSharing,

    /// Staff accounts.
    pub users: Vec<User>,
}

/// Commission configuration for one group-buy platform.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformFee {
    /// Commission rate, whole percent (6 = 6% of the payment).
    pub fee_rate: u32,
}

/// What the partner split is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SharingScope {
    /// Split revenue minus expenses.
    Profit,
    /// Split gross revenue.
    #[default]
    #[serde(other)]
    Revenue,
}

/// Partner cost-sharing rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CostSharing {
    /// Master switch; disabled yields no shares at all.
    pub enabled: bool,

    /// Whether shares come out of revenue or profit.
    pub sharing_scope: SharingScope,

    /// The partners and their ratios.
    pub partners: Vec<Partner>,
}

/// One cost-sharing partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// Partner display name.
    pub name: String,

    /// Relative share weight; normalized against the enabled sum.
    pub share_ratio: u32,

    /// Disabled partners are skipped entirely.
    pub enabled: bool,
}

impl Default for StudioConfig {
    /// Factory defaults for a fresh studio.
    fn default() -> Self {
        StudioConfig {
            shop_name: "拼豆工作室".to_string(),
            shop_phone: String::new(),
            shop_address: String::new(),
            price_per_hour: Money::from_yuan(15),
            price_per_day: Money::from_yuan(50),
            table_count: 30,
            member_discount: 10,
            vip_discount: 20,
            student_discount: 15,
            low_stock_threshold_gram: 250,
            platform_fees: BTreeMap::new(),
            cost_sharing: CostSharing::default(),
            users: vec![
                User {
                    username: "admin".to_string(),
                    password: "admin123".to_string(),
                    role: Role::Admin,
                    name: "管理员".to_string(),
                },
                User {
                    username: "user".to_string(),
                    password: "user123".to_string(),
                    role: Role::User,
                    name: "普通员工".to_string(),
                },
            ],
        }
    }
}

impl StudioConfig {
    /// The discount for a customer type. Exactly one discount applies per
    /// order; anything outside the three discounted types gets zero.
    pub fn discount_for(&self, customer_type: CustomerType) -> Rate {
        match customer_type {
            CustomerType::Member => Rate::from_percent(self.member_discount),
            CustomerType::Vip => Rate::from_percent(self.vip_discount),
            CustomerType::Student => Rate::from_percent(self.student_discount),
            _ => Rate::zero(),
        }
    }

    /// The commission rate for a customer type's platform; zero when the
    /// platform has no fee configuration.
    pub fn platform_fee_for(&self, customer_type: CustomerType) -> Rate {
        self.platform_fees
            .get(customer_type.as_str())
            .map(|fee| Rate::from_percent(fee.fee_rate))
            .unwrap_or_else(Rate::zero)
    }

    /// Looks up a user account by username.
    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.price_per_hour.cents(), 1500);
        assert_eq!(config.price_per_day.cents(), 5000);
        assert_eq!(config.table_count, 30);
        assert_eq!(config.low_stock_threshold_gram, 250);
        assert_eq!(config.users.len(), 2);
        assert!(config.find_user("admin").unwrap().is_admin());
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        // A config persisted by an older version: only two fields present
        let json = r#"{"shopName":"豆豆屋","vipDiscount":25}"#;
        let config: StudioConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.shop_name, "豆豆屋");
        assert_eq!(config.vip_discount, 25);
        // Everything else fell back to defaults
        assert_eq!(config.member_discount, 10);
        assert_eq!(config.price_per_hour.cents(), 1500);
        assert_eq!(config.users.len(), 2);
    }

    #[test]
    fn test_discount_lookup() {
        let config = StudioConfig::default();
        assert_eq!(config.discount_for(CustomerType::Member).bps(), 1000);
        assert_eq!(config.discount_for(CustomerType::Vip).bps(), 2000);
        assert_eq!(config.discount_for(CustomerType::Student).bps(), 1500);
        assert!(config.discount_for(CustomerType::Normal).is_zero());
        // Platforms never stack a discount on top of their fee
        assert!(config.discount_for(CustomerType::Meituan).is_zero());
    }

    #[test]
    fn test_platform_fee_lookup() {
        let mut config = StudioConfig::default();
        config
            .platform_fees
            .insert("meituan".to_string(), PlatformFee { fee_rate: 6 });

        assert_eq!(config.platform_fee_for(CustomerType::Meituan).bps(), 600);
        // Unconfigured platform charges nothing
        assert!(config.platform_fee_for(CustomerType::Douyin).is_zero());
        assert!(config.platform_fee_for(CustomerType::Normal).is_zero());
    }

    #[test]
    fn test_sharing_scope_unknown_falls_back_to_revenue() {
        let parsed: SharingScope = serde_json::from_str(r#""everything""#).unwrap();
        assert_eq!(parsed, SharingScope::Revenue);
        let parsed: SharingScope = serde_json::from_str(r#""profit""#).unwrap();
        assert_eq!(parsed, SharingScope::Profit);
    }
}
