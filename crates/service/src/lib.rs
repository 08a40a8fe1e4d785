//! Service layer providing the worker portal's business operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every repository has a SeaORM implementation and an in-memory `mock`.

pub mod errors;
pub mod auth;
pub mod mail;
pub mod worker;
pub mod catalog;
pub mod requests;
pub mod repos;

pub use repos::{InMemory, Repositories};
