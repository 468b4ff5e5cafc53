use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::client_errors::ClientError;
use super::client_model::{
    Account, Bill, Customer, Merchant, NewAccount, NewCustomer, NewMerchant, NewPurchase, Purchase,
    RawAccount, RawBill, RawCustomer, RawMerchant, RawPurchase,
};
use super::client_traits::FinancialDataClientTrait;
use crate::errors::Result;

/// HTTP client for the banking sandbox API.
///
/// The API key is appended to every request as the `key` query parameter.
/// List responses are parsed record by record so one malformed entry does
/// not discard the rest of the batch.
pub struct SandboxClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        SandboxClient {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Value, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn post_value<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Value, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn post_empty(&self, path: &str) -> std::result::Result<Value, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn delete_value(&self, path: &str) -> std::result::Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(path))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        Self::read_body(response).await.map(|_| ())
    }

    async fn read_body(response: reqwest::Response) -> std::result::Result<Value, ClientError> {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        // Delete endpoints respond with an empty body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Deletes an entity, falling back to the legacy `POST …/delete` form
    /// when the sandbox rejects the plain DELETE.
    async fn delete_with_fallback(&self, path: &str) -> std::result::Result<(), ClientError> {
        match self.delete_value(path).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("DELETE {} failed ({}), trying legacy delete", path, err);
                self.post_empty(&format!("{}/delete", path)).await.map(|_| ())
            }
        }
    }

    /// Parses a list response, skipping individual malformed records.
    fn parse_list<R, T>(value: Value, what: &str) -> Vec<T>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => return Vec::new(),
            other => {
                warn!("Expected a list of {} records, got: {}", what, other);
                return Vec::new();
            }
        };
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<R>(item) {
                Ok(raw) => Some(T::from(raw)),
                Err(err) => {
                    warn!("Skipping malformed {} record: {}", what, err);
                    None
                }
            })
            .collect()
    }

    /// Extracts the created entity id from any of the response shapes the
    /// sandbox is known to produce: a bare object, an `objectCreated`
    /// wrapper, or a one-element array.
    fn extract_created_id(value: &Value) -> std::result::Result<String, ClientError> {
        value
            .get("_id")
            .and_then(Value::as_str)
            .or_else(|| value.pointer("/objectCreated/_id").and_then(Value::as_str))
            .or_else(|| {
                value
                    .get(0)
                    .and_then(|first| first.get("_id"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::UnexpectedResponse(format!("no created id in response: {}", value))
            })
    }
}

#[async_trait]
impl FinancialDataClientTrait for SandboxClient {
    async fn get_customers(&self) -> Result<Vec<Customer>> {
        let value = self.get_value("/customers", &[]).await?;
        Ok(Self::parse_list::<RawCustomer, Customer>(value, "customer"))
    }

    async fn get_customer_accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        let value = self
            .get_value(&format!("/customers/{}/accounts", customer_id), &[])
            .await?;
        Ok(Self::parse_list::<RawAccount, Account>(value, "account"))
    }

    async fn get_account_purchases(&self, account_id: &str) -> Result<Vec<Purchase>> {
        let value = self
            .get_value(&format!("/accounts/{}/purchases", account_id), &[])
            .await?;
        Ok(Self::parse_list::<RawPurchase, Purchase>(value, "purchase"))
    }

    async fn get_customer_bills(&self, customer_id: &str) -> Result<Vec<Bill>> {
        let value = self
            .get_value(&format!("/customers/{}/bills", customer_id), &[])
            .await?;
        Ok(Self::parse_list::<RawBill, Bill>(value, "bill"))
    }

    async fn get_merchant(&self, merchant_id: &str) -> Result<Merchant> {
        let value = self
            .get_value(&format!("/merchants/{}", merchant_id), &[])
            .await?;
        let raw: RawMerchant = serde_json::from_value(value).map_err(ClientError::from)?;
        Ok(Merchant::from(raw))
    }

    async fn get_merchants(&self) -> Result<Vec<Merchant>> {
        let value = self.get_value("/merchants", &[]).await?;
        Ok(Self::parse_list::<RawMerchant, Merchant>(value, "merchant"))
    }

    async fn get_merchants_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius: f64,
    ) -> Result<Vec<Merchant>> {
        let query = [
            ("lat", lat.to_string()),
            ("lng", lng.to_string()),
            ("rad", radius.to_string()),
        ];
        let value = self.get_value("/merchants", &query).await?;
        Ok(Self::parse_list::<RawMerchant, Merchant>(value, "merchant"))
    }

    async fn create_customer(&self, new_customer: NewCustomer) -> Result<String> {
        new_customer.validate()?;
        debug!("Creating sandbox customer {}", new_customer.last_name);
        let value = self.post_value("/customers", &new_customer).await?;
        Ok(Self::extract_created_id(&value)?)
    }

    async fn create_merchant(&self, new_merchant: NewMerchant) -> Result<String> {
        new_merchant.validate()?;
        let value = self.post_value("/merchants", &new_merchant).await?;
        Ok(Self::extract_created_id(&value)?)
    }

    async fn create_account(&self, customer_id: &str, new_account: NewAccount) -> Result<String> {
        new_account.validate()?;
        let value = self
            .post_value(&format!("/customers/{}/accounts", customer_id), &new_account)
            .await?;
        Ok(Self::extract_created_id(&value)?)
    }

    async fn create_purchase(
        &self,
        account_id: &str,
        new_purchase: NewPurchase,
        today: NaiveDate,
    ) -> Result<String> {
        new_purchase.validate(today)?;
        let value = self
            .post_value(&format!("/accounts/{}/purchases", account_id), &new_purchase)
            .await?;
        Ok(Self::extract_created_id(&value)?)
    }

    async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        Ok(self
            .delete_with_fallback(&format!("/customers/{}", customer_id))
            .await?)
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        Ok(self
            .delete_with_fallback(&format!("/accounts/{}", account_id))
            .await?)
    }

    async fn delete_merchant(&self, merchant_id: &str) -> Result<()> {
        Ok(self
            .delete_with_fallback(&format!("/merchants/{}", merchant_id))
            .await?)
    }

    async fn delete_purchase(&self, purchase_id: &str) -> Result<()> {
        Ok(self
            .delete_with_fallback(&format!("/purchases/{}", purchase_id))
            .await?)
    }

    async fn delete_bill(&self, bill_id: &str) -> Result<()> {
        Ok(self
            .delete_with_fallback(&format!("/bills/{}", bill_id))
            .await?)
    }

    async fn delete_all_data(&self) -> Result<()> {
        Ok(self.delete_value("/data").await?)
    }
}
