//! Business-logic services over [`AppState`](crate::state::AppState).
//!
//! Each service is a set of plain functions: validate, mutate under the
//! state's locks, and return either a value or a serde-tagged outcome the
//! presentation layer can render directly.

pub mod board;
pub mod clients;
pub mod dashboard;
pub mod people;
pub mod rebalance;
pub mod reports;
pub mod workspace;
