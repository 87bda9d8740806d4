//! # Report Builders
//!
//! Read-only projections of the domain collections into the six export
//! schemas. Each builder renders a complete BOM-prefixed CSV document with
//! the fixed Chinese header row the studio's spreadsheets expect.
//!
//! Money renders with two decimals here and nowhere earlier; durations
//! render as whole minutes (rounded).

use crate::csv;
use crate::format::{date_string, format_date_time, time_string};
use crate::money::Money;
use crate::types::{BeadColor, Expense, InventoryLog, Order};
use crate::{BEADS_PER_GRAM, GRAMS_PER_BOTTLE};

/// Rounded whole minutes for an order duration.
fn duration_minutes(duration_ms: i64) -> i64 {
    (duration_ms.max(0) + 30_000) / 60_000
}

/// 拼豆库存: current stock per color, with derived bottle and bead counts.
pub fn stock_report(beads: &[BeadColor]) -> String {
    let headers = [
        "色号",
        "名称",
        "颜色",
        "库存(克)",
        "库存(瓶)",
        "拼豆数(估算)",
        "备注",
    ];
    let rows: Vec<Vec<String>> = beads
        .iter()
        .map(|b| {
            vec![
                b.code.clone(),
                b.name.clone(),
                b.color.clone(),
                b.stock_gram.to_string(),
                (b.stock_gram / GRAMS_PER_BOTTLE).to_string(),
                (b.stock_gram * BEADS_PER_GRAM).to_string(),
                b.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv::render(&headers, &rows)
}

/// 订单记录: the full order log.
pub fn orders_report(orders: &[Order]) -> String {
    let headers = [
        "日期",
        "桌位",
        "客户类型",
        "计费方式",
        "开始时间",
        "结束时间",
        "时长(分钟)",
        "原价",
        "折扣",
        "实收金额",
        "平台费用",
        "实际到账",
        "备注",
    ];
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                o.date.clone(),
                o.table_name.clone(),
                o.customer_type.label().to_string(),
                o.charge_type.label().to_string(),
                format_date_time(o.start_time),
                format_date_time(o.end_time),
                duration_minutes(o.duration_ms).to_string(),
                o.original_price.to_decimal_string(),
                format!("{}%", o.discount.percent_rounded()),
                o.actual_payment.to_decimal_string(),
                o.platform_fee.to_decimal_string(),
                o.net_income.to_decimal_string(),
                o.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv::render(&headers, &rows)
}

/// 费用记录: the expense log.
pub fn expenses_report(expenses: &[Expense]) -> String {
    let headers = ["日期", "类型", "名称", "金额", "备注"];
    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.date.clone(),
                e.kind.label().to_string(),
                e.name.clone(),
                e.amount.to_decimal_string(),
                e.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv::render(&headers, &rows)
}

/// 库存日志: every stock movement, one row per entry.
pub fn inventory_log_report(logs: &[InventoryLog]) -> String {
    let headers = ["日期", "时间", "类型", "色号", "数量(克)", "备注"];
    let rows: Vec<Vec<String>> = logs
        .iter()
        .map(|l| {
            vec![
                date_string(l.timestamp),
                time_string(l.timestamp),
                l.kind.label().to_string(),
                l.codes_joined(),
                l.total_gram().to_string(),
                l.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv::render(&headers, &rows)
}

/// 日报表: a one-day summary in 项目/数值 rows.
pub fn daily_report(date: &str, orders: &[Order], expenses: &[Expense]) -> String {
    let day_orders: Vec<&Order> = orders.iter().filter(|o| o.date == date).collect();
    let day_expenses: Vec<&Expense> = expenses.iter().filter(|e| e.date == date).collect();

    let income = day_orders
        .iter()
        .fold(Money::zero(), |sum, o| sum + o.actual_payment);
    let outgo = day_expenses
        .iter()
        .fold(Money::zero(), |sum, e| sum + e.amount);
    let profit = income - outgo;

    let headers = ["项目", "数值"];
    let rows = vec![
        vec!["日期".to_string(), date.to_string()],
        vec!["订单数".to_string(), day_orders.len().to_string()],
        vec!["总收入".to_string(), income.to_decimal_string()],
        vec!["总支出".to_string(), outgo.to_decimal_string()],
        vec!["净利润".to_string(), profit.to_decimal_string()],
    ];
    csv::render(&headers, &rows)
}

/// 色号清单: the color catalog with its shelf group (first code character).
pub fn color_list_report(beads: &[BeadColor]) -> String {
    let headers = ["色号", "名称", "颜色", "分组"];
    let rows: Vec<Vec<String>> = beads
        .iter()
        .map(|b| {
            let group = b
                .code
                .chars()
                .next()
                .map(|c| format!("{}组", c))
                .unwrap_or_default();
            vec![b.code.clone(), b.name.clone(), b.color.clone(), group]
        })
        .collect();
    csv::render(&headers, &rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::{ChargeType, ColorAmount, CustomerType, ExpenseKind, InventoryLogKind};

    fn bead(code: &str, gram: i64) -> BeadColor {
        BeadColor {
            code: code.to_string(),
            name: "樱花粉".to_string(),
            color: "#ffb7c5".to_string(),
            stock_gram: gram,
            note: None,
        }
    }

    fn order(date: &str, payment_cents: i64) -> Order {
        Order {
            id: "o1".to_string(),
            date: date.to_string(),
            table_name: "3号桌".to_string(),
            charge_type: ChargeType::Hourly,
            customer_type: CustomerType::Member,
            start_time: 1_754_455_800_000,
            end_time: 1_754_461_200_000,
            duration_ms: 90 * 60_000,
            original_price: Money::from_cents(2250),
            discount: Rate::from_percent(10),
            actual_payment: Money::from_cents(payment_cents),
            platform_fee: Money::zero(),
            net_income: Money::from_cents(payment_cents),
            note: Some("带小孩".to_string()),
        }
    }

    fn expense(date: &str, amount_cents: i64) -> Expense {
        Expense {
            id: "e1".to_string(),
            date: date.to_string(),
            kind: ExpenseKind::Rent,
            name: "8月房租".to_string(),
            amount: Money::from_cents(amount_cents),
            note: None,
        }
    }

    #[test]
    fn test_stock_report_derives_bottles_and_beads() {
        let csv = stock_report(&[bead("A01", 135)]);
        assert!(csv.starts_with('\u{feff}'));
        assert!(csv.contains("色号,名称,颜色,库存(克),库存(瓶),拼豆数(估算),备注"));
        // 135 g = 10 bottles, ≈ 40500 beads
        assert!(csv.contains("A01,樱花粉,#ffb7c5,135,10,40500,"));
    }

    #[test]
    fn test_orders_report_renders_money_and_discount() {
        let csv = orders_report(&[order("2026-08-06", 2025)]);
        assert!(csv.contains("3号桌,会员,按时"));
        assert!(csv.contains(",90,22.50,10%,20.25,0.00,20.25,带小孩"));
    }

    #[test]
    fn test_duration_minutes_rounds() {
        assert_eq!(duration_minutes(90 * 60_000), 90);
        assert_eq!(duration_minutes(89 * 60_000 + 31_000), 90);
        assert_eq!(duration_minutes(29_000), 0);
        assert_eq!(duration_minutes(-1), 0);
    }

    #[test]
    fn test_expenses_report() {
        let csv = expenses_report(&[expense("2026-08-06", 120_000)]);
        assert!(csv.contains("日期,类型,名称,金额,备注"));
        assert!(csv.contains("2026-08-06,房租,8月房租,1200.00,"));
    }

    #[test]
    fn test_inventory_log_report_sums_lines() {
        let log = InventoryLog {
            id: "l1".to_string(),
            timestamp: 1_786_343_400_000,
            kind: InventoryLogKind::In,
            colors: vec![
                ColorAmount {
                    code: "A01".to_string(),
                    gram: 26,
                },
                ColorAmount {
                    code: "B03".to_string(),
                    gram: 13,
                },
            ],
            note: None,
        };
        let csv = inventory_log_report(&[log]);
        assert!(csv.contains("入库,A01; B03,39,"));
    }

    #[test]
    fn test_daily_report_filters_by_date() {
        let orders = [order("2026-08-06", 2025), order("2026-08-05", 9999)];
        let expenses = [expense("2026-08-06", 1000), expense("2026-07-01", 5000)];
        let csv = daily_report("2026-08-06", &orders, &expenses);

        assert!(csv.contains("订单数,1"));
        assert!(csv.contains("总收入,20.25"));
        assert!(csv.contains("总支出,10.00"));
        assert!(csv.contains("净利润,10.25"));
    }

    #[test]
    fn test_color_list_groups_by_first_character() {
        let csv = color_list_report(&[bead("A01", 0), bead("B12", 0)]);
        assert!(csv.contains("A01,樱花粉,#ffb7c5,A组"));
        assert!(csv.contains("B12,樱花粉,#ffb7c5,B组"));
    }
}
