//! Customer service requests seen from the worker side: notifications,
//! accepting, the schedule and completion.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::RequestService;
