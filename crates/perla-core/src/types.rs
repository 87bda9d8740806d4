//! # Domain Types
//!
//! Core domain types used throughout Perla POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │     Order       │   │   BeadColor     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  id (UUID)      │   │  code (business)│       │
//! │  │  status         │   │  table_name     │   │  name, color    │       │
//! │  │  start_time     │   │  duration_ms    │   │  stock_gram     │       │
//! │  │  paused         │   │  money fields   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ChargeType    │   │  CustomerType   │   │      User       │       │
//! │  │  Hourly, Daily  │   │  Normal, Member │   │  username, role │       │
//! │  └─────────────────┘   │  Vip, Student,  │   └─────────────────┘       │
//! │                        │  platforms...   │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timestamps
//! Instants are epoch milliseconds (i64), matching the persisted documents.
//! Business dates ("2026-08-06") are plain strings derived once at order or
//! expense creation.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};

// =============================================================================
// Table (session registry entry)
// =============================================================================

/// The occupancy status of a studio table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableStatus {
    /// Nobody is seated; no timing state.
    Free,
    /// A session is running (possibly paused).
    InUse,
}

/// A studio table with its session/timing state.
///
/// ## Invariants
/// - `start_time` is `Some` iff `status == InUse`
/// - `paused == true` implies `pause_time` is `Some`; while paused, elapsed
///   time is frozen at `pause_time - start_time`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Stable identifier ("table_1").
    pub id: String,

    /// Display name shown on the floor plan ("1号桌").
    pub name: String,

    /// Occupancy status.
    pub status: TableStatus,

    /// Session start, epoch ms. Shifted forward by pause/suspension gaps so
    /// `now - start_time` is always the billable elapsed time.
    pub start_time: Option<i64>,

    /// When the session was paused, epoch ms.
    pub pause_time: Option<i64>,

    /// Whether elapsed-time accrual is currently frozen.
    pub paused: bool,

    /// Charge mode chosen when the session opened.
    pub charge_type: Option<ChargeType>,

    /// Customer type chosen when the session opened.
    pub customer_type: Option<CustomerType>,

    /// Contact phone, if taken at the door.
    pub customer_phone: Option<String>,

    /// Free-form note.
    pub note: Option<String>,
}

impl Table {
    /// Creates a free table with no session state.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Table {
            id: id.into(),
            name: name.into(),
            status: TableStatus::Free,
            start_time: None,
            pause_time: None,
            paused: false,
            charge_type: None,
            customer_type: None,
            customer_phone: None,
            note: None,
        }
    }

    /// Whether the table currently hosts a session.
    #[inline]
    pub fn is_in_use(&self) -> bool {
        self.status == TableStatus::InUse
    }

    /// Whether the table is accruing billable time right now.
    pub fn is_running(&self) -> bool {
        self.is_in_use() && !self.paused && self.start_time.is_some()
    }

    /// Billable elapsed time at `now_ms`, honoring the paused freeze.
    ///
    /// Negative results (clock skew) floor at zero.
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        let Some(start) = self.start_time else {
            return 0;
        };
        let end = if self.paused {
            self.pause_time.unwrap_or(now_ms)
        } else {
            now_ms
        };
        (end - start).max(0)
    }

    /// Clears all session fields, returning the table to `Free`.
    pub fn reset(&mut self) {
        self.status = TableStatus::Free;
        self.start_time = None;
        self.pause_time = None;
        self.paused = false;
        self.charge_type = None;
        self.customer_type = None;
        self.customer_phone = None;
        self.note = None;
    }
}

// =============================================================================
// Charge Type
// =============================================================================

/// How a session is billed.
///
/// Unrecognized values in stored documents fall back to `Hourly`, which is
/// also the billing default for orders with no recorded mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChargeType {
    /// Flat day price; duration recorded but not priced.
    Daily,
    /// Billed by half-hour buckets of elapsed time.
    #[default]
    #[serde(other)]
    Hourly,
}

impl ChargeType {
    /// Chinese display label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeType::Hourly => "按时",
            ChargeType::Daily => "包日",
        }
    }
}

// =============================================================================
// Customer Type
// =============================================================================

/// Customer classification.
///
/// The first four types drive the discount lookup. The group-buy platforms
/// double as the platform-fee key: an order from one of them keeps its full
/// price as `actual_payment` but loses the configured fee from `net_income`.
///
/// Unrecognized values fall back to `Normal` (zero discount, zero fee).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Member,
    Vip,
    Student,
    Meituan,
    Douyin,
    Dianping,
    Xiaohongshu,
    Custom,
    #[default]
    #[serde(other)]
    Normal,
}

impl CustomerType {
    /// The stable key used in stored documents and the platform-fee table.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Normal => "normal",
            CustomerType::Member => "member",
            CustomerType::Vip => "vip",
            CustomerType::Student => "student",
            CustomerType::Meituan => "meituan",
            CustomerType::Douyin => "douyin",
            CustomerType::Dianping => "dianping",
            CustomerType::Xiaohongshu => "xiaohongshu",
            CustomerType::Custom => "custom",
        }
    }

    /// Chinese display label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerType::Normal => "普通客户",
            CustomerType::Member => "会员",
            CustomerType::Vip => "VIP",
            CustomerType::Student => "学生",
            CustomerType::Meituan => "美团团购",
            CustomerType::Douyin => "抖音团购",
            CustomerType::Dianping => "大众点评",
            CustomerType::Xiaohongshu => "小红书",
            CustomerType::Custom => "其他平台",
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable billing record, created when a session closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business date of the close ("2026-08-06").
    pub date: String,

    /// Name of the table the session ran on.
    pub table_name: String,

    /// Billing mode the session used.
    pub charge_type: ChargeType,

    /// Customer classification at close.
    pub customer_type: CustomerType,

    /// Session start, epoch ms (post-compensation).
    pub start_time: i64,

    /// Session end, epoch ms.
    pub end_time: i64,

    /// Billable duration in milliseconds.
    pub duration_ms: i64,

    /// Price before discount.
    pub original_price: Money,

    /// Discount applied (exactly one per order).
    pub discount: Rate,

    /// What the customer paid.
    pub actual_payment: Money,

    /// Platform commission withheld, if any.
    pub platform_fee: Money,

    /// What actually reaches the till after the platform fee.
    pub net_income: Money,

    /// Free-form note carried over from the table.
    pub note: Option<String>,
}

// =============================================================================
// Bead Stock
// =============================================================================

/// A bead color with its gram-denominated stock.
///
/// Unique by `code`. Bottle counts are always derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeadColor {
    /// Color code, the business key ("A01").
    pub code: String,

    /// Color name ("樱花粉").
    pub name: String,

    /// CSS-ish color swatch value ("#ffb7c5").
    pub color: String,

    /// Stock on hand, in grams.
    pub stock_gram: i64,

    /// Free-form note.
    pub note: Option<String>,
}

// =============================================================================
// Inventory Log
// =============================================================================

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLogKind {
    /// Stock received.
    In,
    /// Stock consumed.
    Out,
}

impl InventoryLogKind {
    /// Chinese display label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryLogKind::In => "入库",
            InventoryLogKind::Out => "出库",
        }
    }
}

/// One color line within an inventory movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAmount {
    /// Color code moved.
    pub code: String,

    /// Grams moved (always positive; direction lives on the log entry).
    pub gram: i64,
}

/// An inventory movement record, appended by every stock mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the movement happened, epoch ms.
    pub timestamp: i64,

    /// Movement direction.
    pub kind: InventoryLogKind,

    /// Colors and amounts moved together.
    pub colors: Vec<ColorAmount>,

    /// Free-form note.
    pub note: Option<String>,
}

impl InventoryLog {
    /// Total grams across all color lines.
    pub fn total_gram(&self) -> i64 {
        self.colors.iter().map(|c| c.gram).sum()
    }

    /// Color codes joined for display ("A01; B03").
    pub fn codes_joined(&self) -> String {
        self.colors
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Rent,
    Purchase,
    Utilities,
    Salary,
    #[default]
    #[serde(other)]
    Other,
}

impl ExpenseKind {
    /// Chinese display label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseKind::Rent => "房租",
            ExpenseKind::Purchase => "进货",
            ExpenseKind::Utilities => "水电",
            ExpenseKind::Salary => "人工",
            ExpenseKind::Other => "其他",
        }
    }
}

/// An operating expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business date ("2026-08-06").
    pub date: String,

    /// Expense classification.
    pub kind: ExpenseKind,

    /// What the money went to ("6月房租").
    pub name: String,

    /// Amount spent.
    pub amount: Money,

    /// Free-form note.
    pub note: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management and config mutation.
    Admin,
    /// Day-to-day operations only.
    User,
}

/// A staff account.
///
/// Credentials are compared in plaintext; the deployment model is a single
/// trusted device inside the studio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login name, unique within the config.
    pub username: String,

    /// Plaintext password.
    pub password: String,

    /// Account role.
    pub role: Role,

    /// Display name ("管理员").
    pub name: String,
}

impl User {
    /// Whether this account may perform admin-only mutations.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
