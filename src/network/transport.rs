//! Transport boundary - how a test attempt is carried out
//!
//! An attempt is a boxed future so the network actor can race it against a
//! cancel signal; dropping the future abandons the attempt.

use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::Result;
use crate::models::{TestRequest, TransportResponse};

pub type AttemptFuture = BoxFuture<'static, Result<TransportResponse>>;

pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, request: TestRequest) -> AttemptFuture;
}

/// Waits a fixed delay, then reports success without touching the network
#[derive(Clone, Debug)]
pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        SimulatedTransport { latency }
    }
}

impl Transport for SimulatedTransport {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn execute(&self, request: TestRequest) -> AttemptFuture {
        let latency = self.latency;
        async move {
            tracing::debug!(url = %request.url, latency_ms = latency.as_millis() as u64, "Simulating test attempt");
            tokio::time::sleep(latency).await;
            Ok(TransportResponse::default())
        }
        .boxed()
    }
}
