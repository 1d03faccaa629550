//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The session
//! controller depends only on these traits, not on concrete implementations.

mod terminal;

pub use terminal::Terminal;
