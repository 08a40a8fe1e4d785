pub mod errors;
pub mod db;
pub mod validate;
pub mod worker;
pub mod user;
pub mod listing;
pub mod sub_service;
pub mod service_request;
pub mod service_completion;

#[cfg(test)]
mod tests;
