//! Account domain model

use super::card::Card;
use super::ids::{AccountId, CardId, CustomerId};
use super::result::{Error, Result};

/// A bank account held at one branch
///
/// The balance is counted in whole currency units and can never go below
/// zero: it is unsigned, and withdrawals larger than the balance are refused.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub branch_code: String,
    balance: u64,
    card: Card,
}

impl Account {
    /// Open an account and issue its card in one step
    pub(crate) fn open(
        account_id: AccountId,
        customer_id: CustomerId,
        branch_code: impl Into<String>,
        card_id: CardId,
        initial_balance: u64,
    ) -> Self {
        let card = Card::issue(card_id, account_id.clone());
        Self {
            account_id,
            customer_id,
            branch_code: branch_code.into(),
            balance: initial_balance,
            card,
        }
    }

    /// The card issued for this account
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Current balance
    pub fn show_balance(&self) -> u64 {
        self.balance
    }

    /// Deposit `amount` and return the new balance
    pub fn deposit(&mut self, amount: i64) -> Result<u64> {
        let amount = Self::checked_amount(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount(amount as i64))?;
        Ok(self.balance)
    }

    /// Withdraw `amount` and return the new balance
    ///
    /// On failure the balance is left untouched.
    pub fn withdraw(&mut self, amount: i64) -> Result<u64> {
        let amount = Self::checked_amount(amount)?;
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    fn checked_amount(amount: i64) -> Result<u64> {
        if amount < 1 {
            return Err(Error::InvalidAmount(amount));
        }
        Ok(amount as u64)
    }
}
