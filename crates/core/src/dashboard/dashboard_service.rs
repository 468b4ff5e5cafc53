use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::dashboard_model::{CategoryTotal, DashboardSummary, MonthlySpending, SpendSplit};
use crate::categories::{normalize, Category};
use crate::client::{Account, Bill, FinancialDataClientTrait, Purchase};
use crate::constants::{
    DISPLAY_DECIMAL_PRECISION, MONTH_LABELS, PERCENT_DECIMAL_PRECISION, RECENT_PURCHASES_LIMIT,
};
use crate::errors::Result;

fn purchase_category(purchase: &Purchase) -> Category {
    normalize(
        purchase.category.as_deref(),
        purchase.description.as_deref(),
        None,
    )
}

/// Total spend across all purchases, rounded for display
pub fn total_spend(purchases: &[Purchase]) -> Decimal {
    purchases
        .iter()
        .map(|p| p.amount)
        .sum::<Decimal>()
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Groups purchase amounts by normalized category.
///
/// Returns `{name, value, percent}` sorted by value descending; percents
/// are computed from the unrounded totals so they sum to ~100. Empty when
/// there is no spend at all.
pub fn category_spending(purchases: &[Purchase]) -> Vec<CategoryTotal> {
    let total: Decimal = purchases.iter().map(|p| p.amount).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut by_category: HashMap<Category, Decimal> = HashMap::new();
    for purchase in purchases {
        *by_category
            .entry(purchase_category(purchase))
            .or_insert(Decimal::ZERO) += purchase.amount;
    }

    let mut totals: Vec<(Category, Decimal)> = by_category.into_iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));

    totals
        .into_iter()
        .map(|(category, value)| {
            let percent = if total > Decimal::ZERO {
                (value / total * Decimal::from(100)).round_dp(PERCENT_DECIMAL_PRECISION)
            } else {
                Decimal::ZERO
            };
            CategoryTotal {
                name: category.label().to_string(),
                value: value.round_dp(DISPLAY_DECIMAL_PRECISION),
                percent,
            }
        })
        .collect()
}

/// Buckets purchase amounts into the 12 calendar months, independent of
/// year. Purchases with no parseable date are skipped silently.
pub fn monthly_series(purchases: &[Purchase]) -> Vec<MonthlySpending> {
    let mut totals = [Decimal::ZERO; 12];
    for purchase in purchases {
        if let Some(date) = purchase.purchase_date {
            totals[date.month0() as usize] += purchase.amount;
        }
    }
    MONTH_LABELS
        .iter()
        .zip(totals)
        .map(|(month, amount)| MonthlySpending {
            month: (*month).to_string(),
            amount: amount.round_dp(DISPLAY_DECIMAL_PRECISION),
        })
        .collect()
}

/// Partitions purchases into needs and wants by normalized category
pub fn wants_vs_needs(purchases: &[Purchase]) -> Vec<SpendSplit> {
    let mut needs = Decimal::ZERO;
    let mut wants = Decimal::ZERO;
    for purchase in purchases {
        if purchase_category(purchase).is_need() {
            needs += purchase.amount;
        } else {
            wants += purchase.amount;
        }
    }
    vec![
        SpendSplit {
            name: "Needs".to_string(),
            value: needs.round_dp(DISPLAY_DECIMAL_PRECISION),
        },
        SpendSplit {
            name: "Wants".to_string(),
            value: wants.round_dp(DISPLAY_DECIMAL_PRECISION),
        },
    ]
}

/// Sums the round-up to the next whole unit across all purchases.
/// Purchases with a non-positive amount contribute nothing.
pub fn round_up_total(purchases: &[Purchase]) -> Decimal {
    let mut total = Decimal::ZERO;
    for purchase in purchases {
        if purchase.amount > Decimal::ZERO {
            let fraction = purchase.amount.fract();
            if fraction > Decimal::ZERO {
                total += Decimal::ONE - fraction;
            }
        }
    }
    total.round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Sum of purchases falling in the same calendar month and year as `today`
pub fn current_month_total(purchases: &[Purchase], today: NaiveDate) -> Decimal {
    purchases
        .iter()
        .filter(|p| {
            p.purchase_date
                .map(|d| d.month() == today.month() && d.year() == today.year())
                .unwrap_or(false)
        })
        .map(|p| p.amount)
        .sum::<Decimal>()
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// The most recent purchases, newest first; undated purchases sort oldest
pub fn recent_purchases(purchases: &[Purchase]) -> Vec<Purchase> {
    let mut sorted = purchases.to_vec();
    sorted.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
    sorted.truncate(RECENT_PURCHASES_LIMIT);
    sorted
}

/// Total balance across accounts
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .map(|a| a.balance)
        .sum::<Decimal>()
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Total rewards points across accounts
pub fn total_rewards(accounts: &[Account]) -> i64 {
    accounts.iter().map(|a| a.rewards).sum()
}

/// The bill with the earliest payment date on or after `today`
pub fn next_bill(bills: &[Bill], today: NaiveDate) -> Option<Bill> {
    bills
        .iter()
        .filter(|b| b.payment_date.map(|d| d >= today).unwrap_or(false))
        .min_by_key(|b| b.payment_date)
        .cloned()
}

/// Wants spending bucketed per calendar day; feeds the no-spend streak
/// derivation. Undated purchases are skipped.
pub fn wants_by_day(purchases: &[Purchase]) -> BTreeMap<NaiveDate, Decimal> {
    let mut by_day = BTreeMap::new();
    for purchase in purchases {
        if let Some(date) = purchase.purchase_date {
            if !purchase_category(purchase).is_need() {
                *by_day.entry(date).or_insert(Decimal::ZERO) += purchase.amount;
            }
        }
    }
    by_day
}

/// Assembles the full dashboard view-model from fetched records.
/// Pure given its inputs and the reference date.
pub fn build_summary(
    customer_id: &str,
    accounts: Vec<Account>,
    purchases: Vec<Purchase>,
    bills: Vec<Bill>,
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        customer_id: customer_id.to_string(),
        total_spend: total_spend(&purchases),
        categories: category_spending(&purchases),
        monthly: monthly_series(&purchases),
        split: wants_vs_needs(&purchases),
        round_up_total: round_up_total(&purchases),
        current_month_total: current_month_total(&purchases, today),
        recent_purchases: recent_purchases(&purchases),
        total_balance: total_balance(&accounts),
        total_rewards: total_rewards(&accounts),
        bill_count: bills.len(),
        next_bill: next_bill(&bills, today),
        accounts,
    }
}

/// Trait defining the contract for the dashboard service
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Fetches a customer's records and computes the dashboard view-model.
    /// Returns `Ok(None)` when a newer load started while this one was in
    /// flight, so a stale result never overwrites a fresher one.
    async fn load(&self, customer_id: &str, today: NaiveDate)
        -> Result<Option<DashboardSummary>>;
}

pub struct DashboardService<C: FinancialDataClientTrait> {
    client: Arc<C>,
    generation: AtomicU64,
}

impl<C: FinancialDataClientTrait> DashboardService<C> {
    pub fn new(client: Arc<C>) -> Self {
        DashboardService {
            client,
            generation: AtomicU64::new(0),
        }
    }

    /// Looks up merchant categories for purchases that lack one.
    /// Lookups are deduplicated per merchant and run concurrently; a
    /// failed lookup leaves the category absent for the normalizer to
    /// fall back on.
    async fn enrich_categories(&self, purchases: Vec<Purchase>) -> Vec<Purchase> {
        let missing: BTreeSet<String> = purchases
            .iter()
            .filter(|p| p.category.is_none())
            .filter_map(|p| p.merchant_id.clone())
            .collect();
        if missing.is_empty() {
            return purchases;
        }

        let lookups = missing.into_iter().map(|merchant_id| {
            let client = self.client.clone();
            async move {
                let result = client.get_merchant(&merchant_id).await;
                (merchant_id, result)
            }
        });

        let mut merchant_categories: HashMap<String, String> = HashMap::new();
        for (merchant_id, result) in join_all(lookups).await {
            match result {
                Ok(merchant) => {
                    if let Some(first) = merchant.category.into_iter().next() {
                        merchant_categories.insert(merchant_id, first);
                    }
                }
                Err(err) => warn!("Merchant lookup failed for {}: {}", merchant_id, err),
            }
        }

        purchases
            .into_iter()
            .map(|mut purchase| {
                if purchase.category.is_none() {
                    purchase.category = purchase
                        .merchant_id
                        .as_ref()
                        .and_then(|id| merchant_categories.get(id))
                        .cloned();
                }
                purchase
            })
            .collect()
    }
}

#[async_trait]
impl<C: FinancialDataClientTrait> DashboardServiceTrait for DashboardService<C> {
    async fn load(
        &self,
        customer_id: &str,
        today: NaiveDate,
    ) -> Result<Option<DashboardSummary>> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Loading dashboard for customer {}", customer_id);

        let accounts = match self.client.get_customer_accounts(customer_id).await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!("Account fetch failed for {}: {}", customer_id, err);
                Vec::new()
            }
        };

        let fetches = accounts.iter().map(|account| {
            let client = self.client.clone();
            let account_id = account.id.clone();
            async move {
                let result = client.get_account_purchases(&account_id).await;
                (account_id, result)
            }
        });

        let mut purchases = Vec::new();
        for (account_id, result) in join_all(fetches).await {
            match result {
                Ok(batch) => purchases.extend(batch),
                Err(err) => warn!("Purchase fetch failed for account {}: {}", account_id, err),
            }
        }

        let purchases = self.enrich_categories(purchases).await;

        let bills = match self.client.get_customer_bills(customer_id).await {
            Ok(bills) => bills,
            Err(err) => {
                warn!("Bill fetch failed for {}: {}", customer_id, err);
                Vec::new()
            }
        };

        if self.generation.load(Ordering::SeqCst) != token {
            debug!("Dashboard load for {} superseded, dropping result", customer_id);
            return Ok(None);
        }

        Ok(Some(build_summary(
            customer_id,
            accounts,
            purchases,
            bills,
            today,
        )))
    }
}
