use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model for a sandbox account
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub nickname: Option<String>,
    pub account_type: Option<String>,
    pub balance: Decimal,
    pub rewards: i64,
}

impl Account {
    /// Display label for the account, falling back through nickname and type
    pub fn label(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.account_type.as_deref())
            .unwrap_or("Account")
    }
}

/// Domain model for a purchase record
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub status: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub merchant_id: Option<String>,
}

/// Domain model for a bill
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub status: Option<String>,
    pub payee: Option<String>,
    pub nickname: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub payment_amount: Decimal,
}

impl Bill {
    pub fn label(&self) -> &str {
        self.payee
            .as_deref()
            .or(self.nickname.as_deref())
            .unwrap_or("Bill")
    }
}

/// Domain model for a merchant. The sandbox returns `category` either as a
/// single string or as a list; both shapes are coerced to a list here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: String,
    pub name: Option<String>,
    pub category: Vec<String>,
}

/// Domain model for a customer
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
}

/// Mailing address as the sandbox expects it
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Address {
    pub street_number: String,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// Validates that every address field is present
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("street_number", &self.street_number),
            ("street_name", &self.street_name),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    name.to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Geographic coordinates for a merchant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Geocode {
    pub lat: f64,
    pub lng: f64,
}

/// Input model for creating a new customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
}

impl NewCustomer {
    /// Validates the new customer data
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "First name cannot be empty".to_string(),
            )));
        }
        if self.last_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Last name cannot be empty".to_string(),
            )));
        }
        self.address.validate()
    }
}

/// Input model for creating a new merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMerchant {
    pub name: String,
    pub category: Vec<String>,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geocode: Option<Geocode>,
}

impl NewMerchant {
    /// Validates the new merchant data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Merchant name cannot be empty".to_string(),
            )));
        }
        self.address.validate()
    }
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    #[serde(rename = "type")]
    pub account_type: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        if self.account_type.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account type cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for creating a new purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchase {
    pub merchant_id: String,
    pub medium: String,
    pub purchase_date: NaiveDate,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewPurchase {
    /// Validates the new purchase data against the reference date.
    /// Future-dated purchases and non-positive amounts are rejected
    /// before any network call is made.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "merchant_id".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Purchase amount must be positive".to_string(),
            )));
        }
        if self.purchase_date > today {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Purchase date must be today or earlier".to_string(),
            )));
        }
        Ok(())
    }
}

// === Wire-format records as the sandbox returns them ===
//
// All fields beyond the id are optional on the wire; the conversions below
// zero-fill missing numbers and drop unparseable dates so the aggregation
// layer never has to branch on field presence.

#[derive(Debug, Deserialize)]
pub(crate) struct RawAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub nickname: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub balance: Option<Decimal>,
    pub rewards: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPurchase {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
    pub purchase_date: Option<String>,
    pub category: Option<String>,
    pub merchant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBill {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: Option<String>,
    pub payee: Option<String>,
    pub nickname: Option<String>,
    pub payment_date: Option<String>,
    pub payment_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMerchant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub category: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCustomer {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

pub(crate) fn parse_wire_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), "%Y-%m-%d").ok()
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Self {
            id: raw.id,
            nickname: raw.nickname,
            account_type: raw.account_type,
            balance: raw.balance.unwrap_or_default(),
            rewards: raw.rewards.unwrap_or_default(),
        }
    }
}

impl From<RawPurchase> for Purchase {
    fn from(raw: RawPurchase) -> Self {
        Self {
            id: raw.id,
            description: raw.description,
            amount: raw.amount.unwrap_or_default(),
            status: raw.status,
            purchase_date: parse_wire_date(raw.purchase_date.as_deref()),
            category: raw.category.filter(|c| !c.trim().is_empty()),
            merchant_id: raw.merchant_id.filter(|m| !m.trim().is_empty()),
        }
    }
}

impl From<RawBill> for Bill {
    fn from(raw: RawBill) -> Self {
        Self {
            id: raw.id,
            status: raw.status,
            payee: raw.payee,
            nickname: raw.nickname,
            payment_date: parse_wire_date(raw.payment_date.as_deref()),
            payment_amount: raw.payment_amount.unwrap_or_default(),
        }
    }
}

impl From<RawMerchant> for Merchant {
    fn from(raw: RawMerchant) -> Self {
        let category = match raw.category {
            Some(OneOrMany::One(c)) => vec![c],
            Some(OneOrMany::Many(cs)) => cs,
            None => Vec::new(),
        };
        Self {
            id: raw.id,
            name: raw.name,
            category,
        }
    }
}

impl From<RawCustomer> for Customer {
    fn from(raw: RawCustomer) -> Self {
        Self {
            id: raw.id,
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
        }
    }
}
