//! Collaborator traits with in-memory and HTTP implementations.

pub mod payment;
pub mod user_directory;

use std::time::Duration;

pub use payment::{HttpPaymentProcessor, InMemoryPaymentProcessor, PaymentProcessor};
pub use user_directory::{HttpUserDirectory, InMemoryUserDirectory, UserDirectory};

/// Builds the HTTP client shared by the outbound collaborators.
///
/// Every request made through it is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
