//! Identifier types for customers, accounts and cards
//!
//! Identifiers are short opaque strings (8 lowercase hex characters), short
//! enough for an operator to type at the ATM prompt. Uniqueness within a
//! registry is enforced by the registry, not by the generator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a generated identifier
pub const ID_LEN: usize = 8;

/// Generate a short random identifier (the first segment of a v4 UUID)
pub fn generate_short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

macro_rules! short_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

short_id!(
    /// Identifies a registered customer
    CustomerId
);
short_id!(
    /// Identifies an account within the branch
    AccountId
);
short_id!(
    /// Identifies the ATM card issued for an account
    CardId
);
