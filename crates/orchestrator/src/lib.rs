//! Order creation workflow.
//!
//! [`OrderOrchestrator::create_order`] runs four steps in order:
//! 1. Validate the user against the user directory
//! 2. Persist the order as `pending`
//! 3. Charge the payment processor
//! 4. Record the terminal status (`completed` or `payment_failed`)
//!
//! Validation and persistence failures abort the workflow. A payment
//! failure does not: it becomes the order's terminal status. No step is
//! retried.

pub mod coordinator;
pub mod error;
pub mod services;

pub use coordinator::OrderOrchestrator;
pub use error::{OrchestratorError, PaymentError, Result, UserDirectoryError};
pub use services::{
    HttpPaymentProcessor, HttpUserDirectory, InMemoryPaymentProcessor, InMemoryUserDirectory,
    PaymentProcessor, UserDirectory, http_client,
};
