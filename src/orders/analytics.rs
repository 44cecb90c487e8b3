//! Simple sales aggregations for the restaurant dashboard.

use crate::model::{Order, OrderStatus};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Headline numbers over a set of orders.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    /// Sum of totals, cancelled orders excluded.
    pub revenue: Decimal,
    /// Every order, whatever its status.
    pub order_count: usize,
    /// Distinct customer names.
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

pub const SALES_WINDOW_DAYS: i64 = 7;

pub fn summarize(orders: &[Order]) -> SalesSummary {
    let customers: HashSet<&str> = orders.iter().map(|o| o.customer_name.as_str()).collect();
    SalesSummary {
        revenue: orders.iter().filter(|o| counts_as_sale(o)).map(|o| o.total).sum(),
        order_count: orders.len(),
        unique_customers: customers.len(),
    }
}

/// Revenue per UTC day for the week ending on `last_day`, oldest first.
/// Days without sales are present with zero revenue.
pub fn daily_sales(orders: &[Order], last_day: NaiveDate) -> Vec<DailySales> {
    (0..SALES_WINDOW_DAYS)
        .rev()
        .map(|back| {
            let date = last_day - Duration::days(back);
            let revenue = orders
                .iter()
                .filter(|o| counts_as_sale(o) && o.created_at.date_naive() == date)
                .map(|o| o.total)
                .sum();
            DailySales { date, revenue }
        })
        .collect()
}

fn counts_as_sale(order: &Order) -> bool {
    order.status != OrderStatus::Cancelled
}
