use async_trait::async_trait;
use chrono::NaiveDate;

use super::client_model::{
    Account, Bill, Customer, Merchant, NewAccount, NewCustomer, NewMerchant, NewPurchase, Purchase,
};
use crate::errors::Result;

/// Trait defining the contract for the banking sandbox client.
///
/// The dashboard orchestration depends on this seam so it can be exercised
/// against an in-process fake in tests. Each list operation returns a
/// possibly empty vector; create operations return the created entity id.
#[async_trait]
pub trait FinancialDataClientTrait: Send + Sync {
    async fn get_customers(&self) -> Result<Vec<Customer>>;
    async fn get_customer_accounts(&self, customer_id: &str) -> Result<Vec<Account>>;
    async fn get_account_purchases(&self, account_id: &str) -> Result<Vec<Purchase>>;
    async fn get_customer_bills(&self, customer_id: &str) -> Result<Vec<Bill>>;
    async fn get_merchant(&self, merchant_id: &str) -> Result<Merchant>;
    async fn get_merchants(&self) -> Result<Vec<Merchant>>;
    async fn get_merchants_nearby(&self, lat: f64, lng: f64, radius: f64)
        -> Result<Vec<Merchant>>;

    async fn create_customer(&self, new_customer: NewCustomer) -> Result<String>;
    async fn create_merchant(&self, new_merchant: NewMerchant) -> Result<String>;
    async fn create_account(&self, customer_id: &str, new_account: NewAccount) -> Result<String>;
    async fn create_purchase(
        &self,
        account_id: &str,
        new_purchase: NewPurchase,
        today: NaiveDate,
    ) -> Result<String>;

    async fn delete_customer(&self, customer_id: &str) -> Result<()>;
    async fn delete_account(&self, account_id: &str) -> Result<()>;
    async fn delete_merchant(&self, merchant_id: &str) -> Result<()>;
    async fn delete_purchase(&self, purchase_id: &str) -> Result<()>;
    async fn delete_bill(&self, bill_id: &str) -> Result<()>;
    async fn delete_all_data(&self) -> Result<()>;
}
