//! Worker accounts: profile reads and edits, admin approval. Signup and login
//! live in [`crate::auth`] but share [`repository::WorkerRepository`].

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::WorkerService;
