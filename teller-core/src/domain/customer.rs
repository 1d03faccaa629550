//! Customer domain model

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::account::Account;
use super::ids::{AccountId, CustomerId};

/// Accounts held by one customer, keyed by account id
pub type Accounts = BTreeMap<AccountId, Account>;

/// A registered bank customer
#[derive(Debug, Clone)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub address: String,
    pub dob: NaiveDate,
    accounts: Accounts,
}

impl Customer {
    pub fn new(
        customer_id: CustomerId,
        name: impl Into<String>,
        address: impl Into<String>,
        dob: NaiveDate,
    ) -> Self {
        Self {
            customer_id,
            name: name.into(),
            address: address.into(),
            dob,
            accounts: Accounts::new(),
        }
    }

    pub(crate) fn add_account(&mut self, account: Account) {
        self.accounts.insert(account.account_id.clone(), account);
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn account_mut(&mut self, account_id: &AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(account_id)
    }
}
