//! Status polling for bank-redirect orders.
//!
//! After the user returns from the bank, the order status is requested
//! immediately and then once per interval until it is no longer pending or
//! the time budget runs out. Once half the budget is spent the caller is told
//! the order is delayed, exactly once.

use std::time::Duration;

use bon::Builder;
use judokit_core::types::OrderStatus;

use crate::gateway::{BankApi, BankSaleStatusResponse};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(130);

/// Observable states of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Delayed,
    Succeeded,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded(BankSaleStatusResponse),
    /// Any status other than pending or succeeded.
    Failed(BankSaleStatusResponse),
    /// Still pending when the budget ran out; holds the last response.
    TimedOut(BankSaleStatusResponse),
}

impl PollOutcome {
    pub fn state(&self) -> PollState {
        match self {
            PollOutcome::Succeeded(_) => PollState::Succeeded,
            PollOutcome::Failed(_) => PollState::Failed,
            PollOutcome::TimedOut(_) => PollState::TimedOut,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Succeeded(_))
    }

    pub fn response(&self) -> &BankSaleStatusResponse {
        match self {
            PollOutcome::Succeeded(r) | PollOutcome::Failed(r) | PollOutcome::TimedOut(r) => r,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    #[error("Status request failed: {0}")]
    Request(#[source] E),
}

#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPoller {
    #[builder(default = DEFAULT_INTERVAL)]
    pub interval: Duration,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for StatusPoller {
    fn default() -> Self {
        StatusPoller::builder().build()
    }
}

impl StatusPoller {
    /// Most status requests a poll can make.
    pub fn max_requests(&self) -> u32 {
        let step = self.step().as_millis();
        self.timeout.as_millis().div_ceil(step).max(1) as u32
    }

    /// Poll `order_id` until a terminal status or the timeout.
    ///
    /// `on_state` sees `Polling` first, `Delayed` at most once, then the
    /// final state. A failed request ends the poll with an error and is not
    /// retried. Dropping the future cancels the poll.
    pub async fn poll<B: BankApi>(
        &self,
        api: &B,
        order_id: &str,
        mut on_state: impl FnMut(PollState),
    ) -> Result<PollOutcome, PollError<B::Error>> {
        let step = self.step();
        let half = self.timeout / 2;
        let mut remaining = self.timeout;
        let mut delayed = false;

        on_state(PollState::Polling);

        let mut attempt = 0u32;
        loop {
            if attempt > 0 {
                tokio::time::sleep(self.interval).await;
            }
            attempt += 1;

            let response = api.status(order_id).await.map_err(PollError::Request)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Order status polled: order='{order_id}', attempt={}, status={}",
                attempt,
                response.status().as_str()
            );

            let outcome = match response.status() {
                OrderStatus::Succeeded => PollOutcome::Succeeded(response),
                OrderStatus::Pending => {
                    remaining = remaining.saturating_sub(step);
                    if !delayed && remaining <= half {
                        delayed = true;
                        on_state(PollState::Delayed);
                    }
                    if !remaining.is_zero() {
                        continue;
                    }
                    PollOutcome::TimedOut(response)
                }
                _ => PollOutcome::Failed(response),
            };

            on_state(outcome.state());
            return Ok(outcome);
        }
    }

    fn step(&self) -> Duration {
        self.interval.max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let poller = StatusPoller::default();
        assert_eq!(poller.interval, Duration::from_secs(5));
        assert_eq!(poller.timeout, Duration::from_secs(130));
        assert_eq!(poller.max_requests(), 26);
    }

    #[test]
    fn test_max_requests_rounds_up() {
        let poller = StatusPoller::builder()
            .interval(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build();
        assert_eq!(poller.max_requests(), 3);
    }
}
