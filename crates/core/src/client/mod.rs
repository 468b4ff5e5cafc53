//! Sandbox client module - typed boundary to the banking sandbox API.

mod client_errors;
mod client_model;
mod client_traits;
mod sandbox_client;

pub use client_errors::ClientError;
pub use client_model::{
    Account, Address, Bill, Customer, Geocode, Merchant, NewAccount, NewCustomer, NewMerchant,
    NewPurchase, Purchase,
};
pub use client_traits::FinancialDataClientTrait;
pub use sandbox_client::SandboxClient;
