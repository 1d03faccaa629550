//! Demo service - bootstrap a branch with sample clients
//!
//! The registry is not persisted; every run rebuilds it from the demo
//! clients so an operator has cards to try at the ATM.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::adapters::demo::generate_demo_clients;
use crate::domain::{AccountId, Branch, CardId, CustomerId};
use crate::services::bank::Bank;

/// Identifiers handed out while onboarding one demo client
#[derive(Debug, Clone, Serialize)]
pub struct OnboardedClient {
    pub name: String,
    pub customer_id: CustomerId,
    pub account_id: AccountId,
    pub card_id: CardId,
}

/// A freshly bootstrapped branch
pub struct DemoSetup {
    pub bank: Bank,
    pub clients: Vec<OnboardedClient>,
}

/// Demo service for bootstrapping a branch
pub struct DemoService {
    branch: Branch,
}

impl DemoService {
    pub fn new(branch: Branch) -> Self {
        Self { branch }
    }

    /// Create the branch, register each demo client and open their account
    pub fn bootstrap(&self) -> Result<DemoSetup> {
        self.branch
            .validate()
            .map_err(|e| anyhow!("Invalid branch settings: {}", e))?;

        let mut bank = Bank::new(self.branch.clone());
        let mut clients = Vec::new();

        for client in generate_demo_clients() {
            let customer_id = bank.add_client(client.name, client.address, client.dob);
            let (account_id, card_id) = bank
                .open_account(&customer_id, client.initial_balance)
                .ok_or_else(|| anyhow!("Failed to open account for {}", client.name))?;

            clients.push(OnboardedClient {
                name: client.name.to_string(),
                customer_id,
                account_id,
                card_id,
            });
        }

        Ok(DemoSetup { bank, clients })
    }
}
