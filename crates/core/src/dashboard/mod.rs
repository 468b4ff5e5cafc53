//! Dashboard module - aggregation engine and view-model orchestration.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::{
    CategoryTotal, DashboardSummary, MonthlySpending, SpendSplit,
};
pub use dashboard_service::{
    build_summary, category_spending, current_month_total, monthly_series, next_bill,
    recent_purchases, round_up_total, total_balance, total_rewards, total_spend, wants_by_day,
    wants_vs_needs, DashboardService, DashboardServiceTrait,
};
