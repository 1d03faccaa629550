//! Bank service - the branch registry
//!
//! Owns every customer, account and card of one branch, issues their
//! identifiers, and validates cardholder credentials.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ids::generate_short_id;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountId, Accounts, Branch, CardId, Customer, CustomerId,
};

/// Branch registry
pub struct Bank {
    branch: Branch,
    customers: HashMap<CustomerId, Customer>,
    issued_ids: HashSet<String>,
}

impl Bank {
    pub fn new(branch: Branch) -> Self {
        Self {
            branch,
            customers: HashMap::new(),
            issued_ids: HashSet::new(),
        }
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    /// Issue an identifier never handed out by this registry before
    ///
    /// Customer, account and card ids share one pool, so an id is unique
    /// across all three kinds.
    fn fresh_id(&mut self) -> String {
        loop {
            let id = generate_short_id();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Register a new customer and return their id
    ///
    /// No duplicate detection: registering the same person twice yields two
    /// customers.
    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        dob: NaiveDate,
    ) -> CustomerId {
        let customer_id = CustomerId::new(self.fresh_id());
        let customer = Customer::new(customer_id.clone(), name, address, dob);
        self.customers.insert(customer_id.clone(), customer);
        customer_id
    }

    /// Open an account (with its card) for an existing customer
    ///
    /// Returns `None` and leaves the registry untouched when the customer is
    /// unknown.
    pub fn open_account(
        &mut self,
        customer_id: &CustomerId,
        initial_balance: u64,
    ) -> Option<(AccountId, CardId)> {
        if !self.customers.contains_key(customer_id) {
            return None;
        }

        let account_id = AccountId::new(self.fresh_id());
        let card_id = CardId::new(self.fresh_id());
        let account = Account::open(
            account_id.clone(),
            customer_id.clone(),
            self.branch.branch_code.clone(),
            card_id.clone(),
            initial_balance,
        );

        let customer = self.customers.get_mut(customer_id)?;
        customer.add_account(account);
        Some((account_id, card_id))
    }

    /// Validate a card id and PIN for a customer
    ///
    /// Any one matching card unlocks every account the customer holds. An
    /// unknown customer id is an error; a wrong card or PIN is `Ok(None)`.
    pub fn validate_user(
        &self,
        card_id: &CardId,
        customer_id: &CustomerId,
        pin: &str,
    ) -> Result<Option<&Accounts>> {
        let customer = self
            .customers
            .get(customer_id)
            .ok_or_else(|| Error::UnknownCustomer(customer_id.to_string()))?;

        let accounts = customer.accounts();
        let verified = accounts
            .values()
            .any(|account| account.card().matches(card_id, pin));

        Ok(verified.then_some(accounts))
    }

    pub fn customer(&self, customer_id: &CustomerId) -> Option<&Customer> {
        self.customers.get(customer_id)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn account_count(&self) -> usize {
        self.customers.values().map(|c| c.accounts().len()).sum()
    }

    /// Mutable access to one of a customer's accounts
    pub fn account_mut(
        &mut self,
        customer_id: &CustomerId,
        account_id: &AccountId,
    ) -> Option<&mut Account> {
        self.customers.get_mut(customer_id)?.account_mut(account_id)
    }

    /// Enumerate every customer and their accounts, for diagnostics
    ///
    /// Customers are ordered by name, then id, so listings are stable.
    pub fn show_accounts(&self) -> Vec<CustomerListing> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });

        customers
            .into_iter()
            .map(|customer| CustomerListing {
                customer_id: customer.customer_id.to_string(),
                name: customer.name.clone(),
                accounts: customer
                    .accounts()
                    .values()
                    .map(|account| AccountListing {
                        account_id: account.account_id.to_string(),
                        balance: account.show_balance(),
                        card_id: account.card().card_id.to_string(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerListing {
    pub customer_id: String,
    pub name: String,
    pub accounts: Vec<AccountListing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountListing {
    pub account_id: String,
    pub balance: u64,
    pub card_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_PIN;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1997, 7, 17).unwrap()
    }

    fn bank_with_client(initial_balance: u64) -> (Bank, CustomerId, AccountId, CardId) {
        let mut bank = Bank::new(Branch::default());
        let customer_id = bank.add_client("A Client", "1 Main St", dob());
        let (account_id, card_id) = bank.open_account(&customer_id, initial_balance).unwrap();
        (bank, customer_id, account_id, card_id)
    }

    #[test]
    fn test_add_client_allows_duplicates() {
        let mut bank = Bank::new(Branch::default());
        let first = bank.add_client("Same Name", "Same St", dob());
        let second = bank.add_client("Same Name", "Same St", dob());
        assert_ne!(first, second);
        assert_eq!(bank.customer_count(), 2);
    }

    #[test]
    fn test_open_account_issues_card_with_default_pin() {
        let (bank, customer_id, account_id, card_id) = bank_with_client(10);
        let customer = bank.customer(&customer_id).unwrap();
        let account = &customer.accounts()[&account_id];

        assert_eq!(account.customer_id, customer_id);
        assert_eq!(account.branch_code, "SBI001");
        assert_eq!(account.card().card_id, card_id);
        assert_eq!(account.card().account_id, account_id);
        assert!(account.card().matches(&card_id, DEFAULT_PIN));
    }

    #[test]
    fn test_open_account_for_unknown_customer() {
        let (mut bank, _, _, _) = bank_with_client(10);
        let result = bank.open_account(&CustomerId::from("missing"), 50);
        assert!(result.is_none());
        assert_eq!(bank.account_count(), 1);
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let mut bank = Bank::new(Branch::default());
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let customer_id = bank.add_client("C", "A", dob());
            let (account_id, card_id) = bank.open_account(&customer_id, 0).unwrap();
            assert!(seen.insert(customer_id.to_string()));
            assert!(seen.insert(account_id.to_string()));
            assert!(seen.insert(card_id.to_string()));
        }
    }

    #[test]
    fn test_validate_user() {
        let (bank, customer_id, account_id, card_id) = bank_with_client(10);

        let accounts = bank
            .validate_user(&card_id, &customer_id, "0000")
            .unwrap()
            .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[&account_id].show_balance(), 10);

        assert!(bank
            .validate_user(&card_id, &customer_id, "9999")
            .unwrap()
            .is_none());
        assert!(bank
            .validate_user(&CardId::from("other"), &customer_id, "0000")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_validate_unknown_customer_is_error() {
        let (bank, _, _, card_id) = bank_with_client(10);
        let err = bank
            .validate_user(&card_id, &CustomerId::from("nobody"), "0000")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCustomer(id) if id == "nobody"));
    }

    #[test]
    fn test_one_card_unlocks_all_customer_accounts() {
        let (mut bank, customer_id, _, card_id) = bank_with_client(10);
        let (second_account, _) = bank.open_account(&customer_id, 20).unwrap();

        let accounts = bank
            .validate_user(&card_id, &customer_id, "0000")
            .unwrap()
            .unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts.contains_key(&second_account));
    }

    #[test]
    fn test_card_of_other_customer_does_not_validate() {
        let (mut bank, _, _, card_id) = bank_with_client(10);
        let other = bank.add_client("B Client", "2 Main St", dob());
        bank.open_account(&other, 5).unwrap();

        assert!(bank.validate_user(&card_id, &other, "0000").unwrap().is_none());
    }

    #[test]
    fn test_show_accounts() {
        let (mut bank, _, account_id, card_id) = bank_with_client(10);
        let other = bank.add_client("B Client", "2 Main St", dob());
        bank.open_account(&other, 100).unwrap();

        let listing = bank.show_accounts();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "A Client");
        assert_eq!(listing[0].accounts[0].account_id, account_id.to_string());
        assert_eq!(listing[0].accounts[0].card_id, card_id.to_string());
        assert_eq!(listing[0].accounts[0].balance, 10);
        assert_eq!(listing[1].accounts[0].balance, 100);
    }
}
