//! Integration tests for the dashboard orchestration against an
//! in-process fake of the sandbox client.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Notify;

use lumo_core::errors::Result;
use lumo_core::{
    Account, Bill, ClientError, Customer, DashboardService, DashboardServiceTrait,
    FinancialDataClientTrait, Merchant, NewAccount, NewCustomer, NewMerchant, NewPurchase,
    Purchase,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn account(id: &str, balance: Decimal, rewards: i64) -> Account {
    Account {
        id: id.to_string(),
        balance,
        rewards,
        ..Account::default()
    }
}

fn purchase(id: &str, amount: Decimal, day: &str, category: Option<&str>) -> Purchase {
    Purchase {
        id: id.to_string(),
        amount,
        purchase_date: Some(date(day)),
        category: category.map(str::to_string),
        ..Purchase::default()
    }
}

/// Blocks the first bills fetch until released, so a second load can
/// overtake the first one deterministically
struct BillsGate {
    release: Arc<Notify>,
    entered: Arc<Notify>,
    calls: AtomicUsize,
}

#[derive(Default)]
struct MockClient {
    accounts: Vec<Account>,
    purchases: HashMap<String, Vec<Purchase>>,
    failing_accounts: HashSet<String>,
    merchants: HashMap<String, Merchant>,
    bills: Vec<Bill>,
    bills_gate: Option<BillsGate>,
}

#[async_trait]
impl FinancialDataClientTrait for MockClient {
    async fn get_customers(&self) -> Result<Vec<Customer>> {
        Ok(Vec::new())
    }

    async fn get_customer_accounts(&self, _customer_id: &str) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn get_account_purchases(&self, account_id: &str) -> Result<Vec<Purchase>> {
        if self.failing_accounts.contains(account_id) {
            return Err(ClientError::Network("connection reset".to_string()).into());
        }
        Ok(self.purchases.get(account_id).cloned().unwrap_or_default())
    }

    async fn get_customer_bills(&self, _customer_id: &str) -> Result<Vec<Bill>> {
        if let Some(gate) = &self.bills_gate {
            if gate.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        Ok(self.bills.clone())
    }

    async fn get_merchant(&self, merchant_id: &str) -> Result<Merchant> {
        self.merchants.get(merchant_id).cloned().ok_or_else(|| {
            ClientError::UnexpectedResponse(format!("no merchant {}", merchant_id)).into()
        })
    }

    async fn get_merchants(&self) -> Result<Vec<Merchant>> {
        Ok(self.merchants.values().cloned().collect())
    }

    async fn get_merchants_nearby(
        &self,
        _lat: f64,
        _lng: f64,
        _radius: f64,
    ) -> Result<Vec<Merchant>> {
        Ok(Vec::new())
    }

    async fn create_customer(&self, _new_customer: NewCustomer) -> Result<String> {
        Ok("created".to_string())
    }

    async fn create_merchant(&self, _new_merchant: NewMerchant) -> Result<String> {
        Ok("created".to_string())
    }

    async fn create_account(&self, _customer_id: &str, _new: NewAccount) -> Result<String> {
        Ok("created".to_string())
    }

    async fn create_purchase(
        &self,
        _account_id: &str,
        _new: NewPurchase,
        _today: NaiveDate,
    ) -> Result<String> {
        Ok("created".to_string())
    }

    async fn delete_customer(&self, _customer_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_account(&self, _account_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_merchant(&self, _merchant_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_purchase(&self, _purchase_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_bill(&self, _bill_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_all_data(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn load_aggregates_across_accounts_and_tolerates_a_failing_one() {
    let mut client = MockClient::default();
    client.accounts = vec![
        account("a1", dec!(100.00), 5),
        account("a2", dec!(50.00), 2),
        account("broken", dec!(25.00), 0),
    ];
    client.purchases.insert(
        "a1".to_string(),
        vec![purchase("p1", dec!(10.50), "2024-06-01", Some("Groceries"))],
    );
    client.purchases.insert(
        "a2".to_string(),
        vec![purchase("p2", dec!(4.25), "2024-06-02", Some("Dining"))],
    );
    client.failing_accounts.insert("broken".to_string());
    client.bills = vec![Bill {
        id: "b1".to_string(),
        payment_date: Some(date("2024-06-20")),
        payment_amount: dec!(80.00),
        ..Bill::default()
    }];

    let service = DashboardService::new(Arc::new(client));
    let summary = service
        .load("cust-1", date("2024-06-15"))
        .await
        .unwrap()
        .expect("fresh load must produce a summary");

    // the failing account's purchases are skipped, its balance is not
    assert_eq!(summary.total_spend, dec!(14.75));
    assert_eq!(summary.total_balance, dec!(175.00));
    assert_eq!(summary.total_rewards, 7);
    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.bill_count, 1);
    assert_eq!(summary.next_bill.as_ref().unwrap().id, "b1");
}

#[tokio::test]
async fn merchant_enrichment_fills_only_missing_categories() {
    let mut client = MockClient::default();
    client.accounts = vec![account("a1", dec!(0), 0)];
    client.purchases.insert(
        "a1".to_string(),
        vec![
            Purchase {
                id: "needs-lookup".to_string(),
                amount: dec!(5.00),
                purchase_date: Some(date("2024-06-01")),
                merchant_id: Some("m1".to_string()),
                ..Purchase::default()
            },
            Purchase {
                id: "already-set".to_string(),
                amount: dec!(7.00),
                purchase_date: Some(date("2024-06-02")),
                category: Some("Groceries".to_string()),
                merchant_id: Some("m1".to_string()),
                ..Purchase::default()
            },
            Purchase {
                id: "lookup-fails".to_string(),
                amount: dec!(3.00),
                purchase_date: Some(date("2024-06-03")),
                merchant_id: Some("unknown".to_string()),
                ..Purchase::default()
            },
        ],
    );
    client.merchants.insert(
        "m1".to_string(),
        Merchant {
            id: "m1".to_string(),
            name: Some("Corner Cafe".to_string()),
            category: vec!["Dining".to_string()],
        },
    );

    let service = DashboardService::new(Arc::new(client));
    let summary = service
        .load("cust-1", date("2024-06-15"))
        .await
        .unwrap()
        .unwrap();

    let value_of = |name: &str| {
        summary
            .categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    };
    // the missing category came from the merchant, the set one stayed,
    // and the failed lookup fell through to the default bucket
    assert_eq!(value_of("Dining"), Some(dec!(5.00)));
    assert_eq!(value_of("Groceries"), Some(dec!(7.00)));
    assert_eq!(value_of("Shopping"), Some(dec!(3.00)));
}

#[tokio::test(flavor = "multi_thread")]
async fn a_superseded_load_resolves_to_none() {
    let release = Arc::new(Notify::new());
    let entered = Arc::new(Notify::new());

    let mut client = MockClient::default();
    client.accounts = vec![account("a1", dec!(10.00), 0)];
    client.bills_gate = Some(BillsGate {
        release: release.clone(),
        entered: entered.clone(),
        calls: AtomicUsize::new(0),
    });

    let service = Arc::new(DashboardService::new(Arc::new(client)));
    let today = date("2024-06-15");

    let first = tokio::spawn({
        let service = service.clone();
        async move { service.load("cust-1", today).await }
    });

    // wait until the first load is parked inside the bills fetch, then
    // let a second load run to completion
    entered.notified().await;
    let second = service.load("cust-1", today).await.unwrap();
    assert!(second.is_some());

    release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert!(first.is_none(), "stale load must not produce a summary");
}
