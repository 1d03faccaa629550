//! Core domain entities
//!
//! Ledger entities (customers, accounts, cards) and the branch identity.
//! These are plain data structures with their balance rules; no I/O.

mod account;
mod branch;
mod card;
mod customer;
pub mod ids;
pub mod result;

pub use account::Account;
pub use branch::Branch;
pub use card::{Card, DEFAULT_PIN};
pub use customer::{Accounts, Customer};
pub use ids::{AccountId, CardId, CustomerId};
