//! Worker service listings and the admin-curated sub-service catalog.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::CatalogService;
