//! ATM card domain model

use super::ids::{AccountId, CardId};

/// PIN assigned to every newly issued card
pub const DEFAULT_PIN: &str = "0000";

/// An ATM card, bound to exactly one account
///
/// Cards are only ever created together with their account; there is no
/// public way to issue a standalone card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub card_id: CardId,
    pub account_id: AccountId,
    pin: String,
}

impl Card {
    pub(crate) fn issue(card_id: CardId, account_id: AccountId) -> Self {
        Self {
            card_id,
            account_id,
            pin: DEFAULT_PIN.to_string(),
        }
    }

    /// Check a presented card id and PIN
    ///
    /// The PIN is compared as an opaque string; no format rules apply.
    pub fn matches(&self, card_id: &CardId, pin: &str) -> bool {
        self.card_id == *card_id && self.pin == pin
    }
}
