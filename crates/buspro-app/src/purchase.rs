//! Pro upgrade purchase

use std::time::Duration;

use async_trait::async_trait;

/// Result of one purchase attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Success,
    Failed(String),
}

/// Billing integration that can unlock Pro
#[async_trait]
pub trait PurchaseProvider: Send + Sync {
    async fn purchase(&self) -> PurchaseOutcome;
}

/// Stand-in billing flow: waits, then always succeeds
///
/// There is no payment verification; a store integration replaces this.
pub struct SimulatedPurchase {
    delay: Duration,
}

impl SimulatedPurchase {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedPurchase {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500))
    }
}

#[async_trait]
impl PurchaseProvider for SimulatedPurchase {
    async fn purchase(&self) -> PurchaseOutcome {
        tracing::info!(delay_ms = self.delay.as_millis() as u64, "simulating store purchase");
        tokio::time::sleep(self.delay).await;
        PurchaseOutcome::Success
    }
}
