//! Payment processor trait, in-memory and HTTP implementations.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::Money;
use serde::Serialize;

use crate::error::PaymentError;

/// Trait for charging an order's amount.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charges `amount` against `order_id`. One attempt, no retries.
    async fn charge(&self, order_id: OrderId, amount: Money) -> Result<(), PaymentError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: Vec<(OrderId, Money)>,
    charge_calls: usize,
    fail_on_charge: bool,
    unavailable: bool,
}

/// In-memory payment processor for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProcessor {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentProcessor {
    /// Creates a new in-memory payment processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the processor to decline every charge.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Makes every charge fail as if the processor were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Returns the number of charge attempts, including failed ones.
    pub fn charge_count(&self) -> usize {
        self.state.read().unwrap().charge_calls
    }

    /// Returns the number of accepted payments.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns accepted payments in the order they were made.
    pub fn payments(&self) -> Vec<(OrderId, Money)> {
        self.state.read().unwrap().payments.clone()
    }
}

#[async_trait]
impl PaymentProcessor for InMemoryPaymentProcessor {
    async fn charge(&self, order_id: OrderId, amount: Money) -> Result<(), PaymentError> {
        let mut state = self.state.write().unwrap();
        state.charge_calls += 1;

        if state.unavailable {
            return Err(PaymentError::Unavailable("connection refused".to_string()));
        }

        if state.fail_on_charge {
            return Err(PaymentError::Rejected {
                order_id,
                status: 402,
            });
        }

        state.payments.push((order_id, amount));
        Ok(())
    }
}

/// Body of `POST /payments`.
#[derive(Debug, Serialize)]
struct PaymentRequest {
    order_id: OrderId,
    amount: Money,
}

/// Payment processor reached over HTTP at `POST {base_url}/payments`.
#[derive(Debug, Clone)]
pub struct HttpPaymentProcessor {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPaymentProcessor {
    /// Creates a client for the payment service at `base_url`.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: super::trim_base_url(base_url),
            client,
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PaymentProcessor for HttpPaymentProcessor {
    #[tracing::instrument(skip(self))]
    async fn charge(&self, order_id: OrderId, amount: Money) -> Result<(), PaymentError> {
        let url = format!("{}/payments", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&PaymentRequest { order_id, amount })
            .send()
            .await
            .map_err(|e| PaymentError::Unavailable(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(()),
            status => Err(PaymentError::Rejected {
                order_id,
                status: status.as_u16(),
            }),
        }
    }
}
