//! Database-free building blocks shared by the persistence and HTTP layers.
//!
//! Nothing in here touches the network or the database, so everything is
//! covered by plain unit tests.

pub mod error;
pub mod listing;
pub mod relations;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
