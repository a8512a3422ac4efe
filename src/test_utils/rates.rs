//! Rate sources for tests that never touch the network.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::{
    Error,
    currency::{CurrencyCode, RateSource, RateTable},
};

/// Always answers with the same rate table and counts how often it was asked.
#[derive(Debug, Clone)]
pub(crate) struct FixedRates {
    table: RateTable,
    calls: Arc<AtomicUsize>,
}

impl FixedRates {
    pub(crate) fn new(table: RateTable) -> Self {
        Self {
            table,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl RateSource for FixedRates {
    async fn latest_rates(&self, _base: &CurrencyCode) -> Result<RateTable, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.table.clone())
    }
}

/// Fails every lookup with the error made by `make_error`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingRates {
    make_error: fn() -> Error,
}

impl FailingRates {
    pub(crate) fn new(make_error: fn() -> Error) -> Self {
        Self { make_error }
    }
}

#[async_trait]
impl RateSource for FailingRates {
    async fn latest_rates(&self, _base: &CurrencyCode) -> Result<RateTable, Error> {
        Err((self.make_error)())
    }
}

/// Holds every lookup until the test opens its gate.
///
/// Each lookup sends a gate through the channel returned by [GatedRates::new]
/// in the order the lookups were made. Sending `()` on a gate lets that lookup
/// answer with the rate table.
#[derive(Debug, Clone)]
pub(crate) struct GatedRates {
    table: RateTable,
    requests: mpsc::UnboundedSender<oneshot::Sender<()>>,
}

impl GatedRates {
    pub(crate) fn new(table: RateTable) -> (Self, mpsc::UnboundedReceiver<oneshot::Sender<()>>) {
        let (requests, receiver) = mpsc::unbounded_channel();

        (Self { table, requests }, receiver)
    }
}

#[async_trait]
impl RateSource for GatedRates {
    async fn latest_rates(&self, _base: &CurrencyCode) -> Result<RateTable, Error> {
        let (gate, opened) = oneshot::channel();

        self.requests
            .send(gate)
            .map_err(|_| Error::RateRequest("test finished".to_owned()))?;
        opened
            .await
            .map_err(|_| Error::RateRequest("gate dropped".to_owned()))?;

        Ok(self.table.clone())
    }
}
