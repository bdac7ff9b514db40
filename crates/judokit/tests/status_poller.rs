use std::{cell::RefCell, collections::VecDeque, time::Duration};

use judokit::{
    flow,
    gateway::{BankApi, BankSaleStatusResponse, IdealSaleRequest, IdealSaleResponse, OrderDetails},
    poller::{PollError, PollOutcome, PollState, StatusPoller},
};
use judokit_core::{
    result::{JudoError, codes},
    types::OrderStatus,
};
use tokio::time::Instant;

#[derive(Debug, Clone, thiserror::Error)]
#[error("connection reset")]
struct ConnectionReset;

impl From<ConnectionReset> for JudoError {
    fn from(err: ConnectionReset) -> Self {
        JudoError::request_failed(err.to_string())
    }
}

/// Answers status requests from a script; pending once the script runs out.
struct ScriptedBank {
    script: RefCell<VecDeque<Result<OrderStatus, ConnectionReset>>>,
    requests: RefCell<Vec<Instant>>,
    started: Instant,
}

impl ScriptedBank {
    fn new(script: impl IntoIterator<Item = Result<OrderStatus, ConnectionReset>>) -> Self {
        ScriptedBank {
            script: RefCell::new(script.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
            started: Instant::now(),
        }
    }

    fn pending_then(count: usize, last: OrderStatus) -> Self {
        ScriptedBank::new(
            std::iter::repeat_n(Ok(OrderStatus::Pending), count).chain([Ok(last)]),
        )
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn elapsed_at(&self, request: usize) -> Duration {
        self.requests.borrow()[request] - self.started
    }
}

impl BankApi for ScriptedBank {
    type Error = ConnectionReset;

    async fn sale(&self, request: &IdealSaleRequest) -> Result<IdealSaleResponse, Self::Error> {
        Ok(IdealSaleResponse {
            order_id: "ord-1".into(),
            redirect_url: format!("https://bank.example/{}", request.bic),
            merchant_payment_reference: Some(request.merchant_payment_reference.clone()),
            site_id: None,
        })
    }

    async fn status(&self, order_id: &str) -> Result<BankSaleStatusResponse, Self::Error> {
        self.requests.borrow_mut().push(Instant::now());
        let status = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(OrderStatus::Pending))?;

        Ok(BankSaleStatusResponse {
            merchant_payment_reference: Some("payment".into()),
            merchant_consumer_reference: Some("consumer".into()),
            order_details: OrderDetails {
                order_id: order_id.to_string(),
                order_status: status,
                order_failure_reason: None,
                timestamp: None,
                amount: None,
            },
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_immediate_success() {
    let bank = ScriptedBank::new([Ok(OrderStatus::Succeeded)]);
    let mut states = Vec::new();

    let outcome = StatusPoller::default()
        .poll(&bank, "ord-1", |state| states.push(state))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(bank.request_count(), 1);
    assert_eq!(bank.elapsed_at(0), Duration::ZERO);
    assert_eq!(states, vec![PollState::Polling, PollState::Succeeded]);
}

#[tokio::test(start_paused = true)]
async fn test_requests_are_spaced_by_interval() {
    let bank = ScriptedBank::pending_then(3, OrderStatus::Succeeded);

    StatusPoller::default()
        .poll(&bank, "ord-1", |_| {})
        .await
        .unwrap();

    assert_eq!(bank.request_count(), 4);
    for request in 0..4 {
        assert_eq!(bank.elapsed_at(request), Duration::from_secs(5 * request as u64));
    }
}

#[tokio::test(start_paused = true)]
async fn test_delayed_fires_once_before_late_success() {
    // Pending for 70 seconds, then succeeded.
    let bank = ScriptedBank::pending_then(14, OrderStatus::Succeeded);
    let mut states = Vec::new();

    let outcome = StatusPoller::default()
        .poll(&bank, "ord-1", |state| states.push(state))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        states,
        vec![PollState::Polling, PollState::Delayed, PollState::Succeeded]
    );
    assert_eq!(bank.elapsed_at(14), Duration::from_secs(70));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_stops_requests() {
    let bank = ScriptedBank::new([]);
    let mut states = Vec::new();

    let outcome = StatusPoller::default()
        .poll(&bank, "ord-1", |state| states.push(state))
        .await
        .unwrap();

    assert!(matches!(outcome, PollOutcome::TimedOut(_)));
    assert_eq!(bank.request_count(), 26);
    assert_eq!(bank.elapsed_at(25), Duration::from_secs(125));
    assert_eq!(
        states,
        vec![PollState::Polling, PollState::Delayed, PollState::TimedOut]
    );
}

#[tokio::test(start_paused = true)]
async fn test_other_status_is_a_failure() {
    let bank = ScriptedBank::pending_then(2, OrderStatus::Failed);

    let outcome = StatusPoller::default()
        .poll(&bank, "ord-1", |_| {})
        .await
        .unwrap();

    assert!(matches!(outcome, PollOutcome::Failed(_)));
    assert_eq!(outcome.response().status(), OrderStatus::Failed);
    assert_eq!(bank.request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_request_failure_ends_the_poll() {
    let bank = ScriptedBank::new([Ok(OrderStatus::Pending), Err(ConnectionReset)]);

    let result = StatusPoller::default().poll(&bank, "ord-1", |_| {}).await;

    assert!(matches!(result, Err(PollError::Request(ConnectionReset))));
    assert_eq!(bank.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_custom_budget() {
    let bank = ScriptedBank::new([]);
    let poller = StatusPoller::builder()
        .interval(Duration::from_secs(1))
        .timeout(Duration::from_secs(4))
        .build();

    let outcome = poller.poll(&bank, "ord-1", |_| {}).await.unwrap();

    assert!(matches!(outcome, PollOutcome::TimedOut(_)));
    assert_eq!(bank.request_count(), poller.max_requests() as usize);
}

#[tokio::test(start_paused = true)]
async fn test_ideal_flow_results() {
    let poller = StatusPoller::default();

    let bank = ScriptedBank::pending_then(1, OrderStatus::Succeeded);
    let request = IdealSaleRequest::builder()
        .judo_id("100200300")
        .amount(judokit_core::types::AmountValue::from(10u32))
        .bic("RABONL2U")
        .merchant_payment_reference("payment")
        .merchant_consumer_reference("consumer")
        .build();
    let sale = flow::start_ideal_sale(&bank, &request).await.unwrap();
    assert_eq!(sale.redirect_url, "https://bank.example/RABONL2U");

    let result = flow::complete_ideal_payment(&bank, &poller, &sale.order_id, |_| {}).await;
    let success = result.as_success().unwrap();
    assert_eq!(success.receipt_id.as_deref(), Some("ord-1"));
    assert_eq!(success.result.as_deref(), Some("SUCCEEDED"));

    let bank = ScriptedBank::new([]);
    let result = flow::complete_ideal_payment(&bank, &poller, "ord-2", |_| {}).await;
    assert_eq!(result.as_error().unwrap().code, codes::ORDER_TIMEOUT);

    let bank = ScriptedBank::new([Ok(OrderStatus::Failed)]);
    let result = flow::complete_ideal_payment(&bank, &poller, "ord-3", |_| {}).await;
    assert_eq!(result.as_error().unwrap().code, codes::ORDER_FAILED);

    let bank = ScriptedBank::new([Err(ConnectionReset)]);
    let result = flow::complete_ideal_payment(&bank, &poller, "ord-4", |_| {}).await;
    assert_eq!(result.as_error().unwrap().code, codes::REQUEST_FAILED);
}
