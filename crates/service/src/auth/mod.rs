//! Auth module: signup with emailed OTP, verification, login and token checks.
//!
//! Workers are persisted through [`crate::worker::repository::WorkerRepository`];
//! this module owns hashing, OTP generation and token signing.

pub mod domain;
pub mod errors;
pub mod otp;
pub mod password;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::{Claims, TokenKeys};
