use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::{Account, Bill, Purchase};

/// Spending total for one category, with its share of total spend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
    pub percent: Decimal,
}

/// Spending total for one calendar month of the fixed Jan-Dec series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpending {
    pub month: String,
    pub amount: Decimal,
}

/// One side of the wants-vs-needs partition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendSplit {
    pub name: String,
    pub value: Decimal,
}

/// Derived, presentation-ready output of the aggregation engine.
/// Recomputed on every load; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub customer_id: String,
    pub total_spend: Decimal,
    pub categories: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlySpending>,
    pub split: Vec<SpendSplit>,
    pub round_up_total: Decimal,
    pub current_month_total: Decimal,
    pub recent_purchases: Vec<Purchase>,
    pub accounts: Vec<Account>,
    pub total_balance: Decimal,
    pub total_rewards: i64,
    pub bill_count: usize,
    pub next_bill: Option<Bill>,
}
