use crate::app::state::{GenerationState, SettlementPolicy};
use crate::domain::errors::GenerationError;
use crate::domain::generation::{GenerationProvider, ProviderResponse};
use crate::domain::models::RequestId;

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;

/// Runs generations against one provider and publishes their state.
///
/// Every `generate` call is both observable through [`subscribe`] and
/// returned to its caller: a failure is stored in the state *and* returned
/// as `Err`, with the same normalized value on both channels.
///
/// Overlapping calls are not serialized. Which settlement ends up in the
/// state is decided by the [`SettlementPolicy`].
///
/// [`subscribe`]: GenerationController::subscribe
pub struct GenerationController {
    provider: Arc<dyn GenerationProvider>,
    state: watch::Sender<GenerationState>,
}

impl GenerationController {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self::with_policy(provider, SettlementPolicy::default())
    }

    pub fn with_policy(provider: Arc<dyn GenerationProvider>, policy: SettlementPolicy) -> Self {
        let (state, _) = watch::channel(GenerationState::new(policy));
        Self { provider, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn data(&self) -> Option<String> {
        self.state.borrow().data().map(str::to_owned)
    }

    pub fn error(&self) -> Option<GenerationError> {
        self.state.borrow().error().cloned()
    }

    pub async fn generate(&self, prompt: impl Into<String>) -> Result<String, GenerationError> {
        let prompt = prompt.into();
        let mut request = RequestId::default();
        self.state.send_modify(|state| request = state.begin(prompt.clone()));
        tracing::debug!(%request, prompt_len = prompt.len(), "generation started");

        let mut pending = PendingGuard {
            state: &self.state,
            request,
            armed: true,
        };

        // The call itself sits inside the async block so a provider that
        // panics before returning its future is caught as well.
        let outcome = AssertUnwindSafe(async { self.provider.get_response(&prompt).await })
            .catch_unwind()
            .await;
        pending.armed = false;

        let settled = match outcome {
            Ok(Ok(ProviderResponse::Text(text))) => Ok(text),
            Ok(Ok(ProviderResponse::Failure { error })) => Err(GenerationError::reported(error)),
            Ok(Err(err)) => Err(GenerationError::from_rejection(&err)),
            Err(_) => {
                tracing::error!(%request, "generation provider panicked");
                Err(GenerationError::unexpected())
            }
        };

        let applied = match &settled {
            Ok(text) => self
                .state
                .send_if_modified(|state| state.succeed(request, text.clone())),
            Err(err) => self
                .state
                .send_if_modified(|state| state.fail(request, err.clone())),
        };

        if applied {
            tracing::debug!(%request, ok = settled.is_ok(), "generation settled");
        } else {
            tracing::debug!(%request, "discarding stale generation result");
        }

        settled
    }
}

/// Sends the state back to idle when a `generate` future is dropped before
/// its provider call settles.
struct PendingGuard<'a> {
    state: &'a watch::Sender<GenerationState>,
    request: RequestId,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let request = self.request;
        if self.state.send_if_modified(|state| state.abandon(request)) {
            tracing::debug!(%request, "generation abandoned before settling");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{
        Unreachable, CONNECTIVITY_MESSAGE, MISSING_ERROR_MESSAGE, UNEXPECTED_MESSAGE,
    };
    use crate::domain::generation::MockGenerationProvider;
    use crate::domain::models::GenerationStatus;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::oneshot;

    type Gate = oneshot::Sender<Result<ProviderResponse>>;

    /// Each call waits until the test releases its gate.
    struct GatedProvider {
        gates: Mutex<VecDeque<oneshot::Receiver<Result<ProviderResponse>>>>,
    }

    impl GatedProvider {
        fn new(calls: usize) -> (Vec<Gate>, Self) {
            let mut senders = Vec::new();
            let mut receivers = VecDeque::new();
            for _ in 0..calls {
                let (tx, rx) = oneshot::channel();
                senders.push(tx);
                receivers.push_back(rx);
            }
            (
                senders,
                Self {
                    gates: Mutex::new(receivers),
                },
            )
        }
    }

    #[async_trait]
    impl GenerationProvider for GatedProvider {
        async fn get_response(&self, _prompt: &str) -> Result<ProviderResponse> {
            let gate = self
                .gates
                .lock()
                .pop_front()
                .ok_or_else(|| anyhow!("no gate left"))?;
            gate.await.map_err(|_| anyhow!("gate dropped"))?
        }
    }

    struct PanickingProvider;

    #[async_trait]
    impl GenerationProvider for PanickingProvider {
        async fn get_response(&self, _prompt: &str) -> Result<ProviderResponse> {
            panic!("provider blew up")
        }
    }

    fn controller_with(mock: MockGenerationProvider) -> GenerationController {
        GenerationController::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut mock = MockGenerationProvider::new();
        mock.expect_get_response()
            .with(mockall::predicate::eq("hello"))
            .times(1)
            .returning(|_| Ok(ProviderResponse::text("world")));
        let controller = controller_with(mock);

        let out = controller.generate("hello").await;

        assert_eq!(out, Ok("world".to_string()));
        assert_eq!(controller.data().as_deref(), Some("world"));
        assert!(controller.error().is_none());
        assert!(!controller.loading());
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status(), GenerationStatus::Succeeded);
        assert_eq!(snapshot.prompt(), Some("hello"));
    }

    #[tokio::test]
    async fn test_reported_failure_is_stored_and_returned() {
        let mut mock = MockGenerationProvider::new();
        mock.expect_get_response()
            .returning(|_| Ok(ProviderResponse::failure("X")));
        let controller = controller_with(mock);

        let err = controller.generate("hello").await.unwrap_err();

        assert_eq!(err.message(), "X");
        assert_eq!(controller.error(), Some(err));
        assert!(controller.data().is_none());
        assert_eq!(controller.snapshot().status(), GenerationStatus::Failed);
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn test_reported_failure_without_message() {
        let mut mock = MockGenerationProvider::new();
        mock.expect_get_response()
            .returning(|_| Ok(ProviderResponse::Failure { error: None }));
        let controller = controller_with(mock);

        let err = controller.generate("hello").await.unwrap_err();
        assert_eq!(err.message(), MISSING_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_connectivity_rejection_uses_dedicated_message() {
        let mut mock = MockGenerationProvider::new();
        mock.expect_get_response()
            .returning(|_| Err(anyhow!("fetch failed")));
        let controller = controller_with(mock);

        let err = controller.generate("hello").await.unwrap_err();
        assert_eq!(err.message(), CONNECTIVITY_MESSAGE);
        assert_ne!(err.message(), "fetch failed");
        assert_eq!(controller.error().unwrap().message(), CONNECTIVITY_MESSAGE);
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn test_unreachable_rejection() {
        let mut mock = MockGenerationProvider::new();
        mock.expect_get_response()
            .returning(|_| Err(Unreachable::new("connection refused").into()));
        let controller = controller_with(mock);

        let err = controller.generate("hello").await.unwrap_err();
        assert_eq!(err.message(), CONNECTIVITY_MESSAGE);
    }

    #[tokio::test]
    async fn test_panicking_provider_yields_generic_error() {
        let controller = GenerationController::new(Arc::new(PanickingProvider));

        let err = controller.generate("hello").await.unwrap_err();
        assert_eq!(err.message(), UNEXPECTED_MESSAGE);
        assert!(!controller.loading());
        assert_eq!(controller.snapshot().status(), GenerationStatus::Failed);
    }

    #[tokio::test]
    async fn test_loading_only_between_invocation_and_settlement() {
        let (mut gates, provider) = GatedProvider::new(1);
        let controller = Arc::new(GenerationController::new(Arc::new(provider)));
        let mut rx = controller.subscribe();
        assert!(!controller.loading());

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate("hello").await }
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading());
        assert!(controller.data().is_none());

        gates.remove(0).send(Ok(ProviderResponse::text("world"))).unwrap();
        let out = task.await.unwrap();

        assert_eq!(out.as_deref(), Ok("world"));
        assert!(!controller.loading());
        assert!(!rx.borrow_and_update().loading());
    }

    #[tokio::test]
    async fn test_new_call_clears_previous_result_while_pending() {
        let (mut gates, provider) = GatedProvider::new(2);
        let controller = Arc::new(GenerationController::new(Arc::new(provider)));

        gates.remove(0).send(Ok(ProviderResponse::text("first"))).unwrap();
        controller.generate("one").await.unwrap();
        assert_eq!(controller.data().as_deref(), Some("first"));

        let mut rx = controller.subscribe();
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate("two").await }
        });
        rx.changed().await.unwrap();
        assert!(controller.loading());
        assert!(controller.data().is_none());
        assert!(controller.error().is_none());

        gates.remove(0).send(Err(anyhow!("model overloaded"))).unwrap();
        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.message(), "model overloaded");
        assert!(!controller.loading());
    }

    async fn run_overlapping(
        policy: SettlementPolicy,
    ) -> (Arc<GenerationController>, String, String) {
        let (mut gates, provider) = GatedProvider::new(2);
        let controller = Arc::new(GenerationController::with_policy(Arc::new(provider), policy));
        let mut rx = controller.subscribe();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate("a").await }
        });
        rx.changed().await.unwrap();
        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate("b").await }
        });
        rx.changed().await.unwrap();
        assert_eq!(controller.snapshot().latest_request(), RequestId(2));

        // Settle out of call order.
        let gate_a = gates.remove(0);
        let gate_b = gates.remove(0);
        gate_b.send(Ok(ProviderResponse::text("from b"))).unwrap();
        let b = second.await.unwrap().unwrap();
        gate_a.send(Ok(ProviderResponse::text("from a"))).unwrap();
        let a = first.await.unwrap().unwrap();

        (controller, a, b)
    }

    #[tokio::test]
    async fn test_overlapping_last_settled_wins() {
        let (controller, a, b) = run_overlapping(SettlementPolicy::LastSettled).await;
        assert_eq!((a.as_str(), b.as_str()), ("from a", "from b"));
        assert_eq!(controller.data().as_deref(), Some("from a"));
    }

    #[tokio::test]
    async fn test_overlapping_latest_request_discards_stale() {
        let (controller, a, _) = run_overlapping(SettlementPolicy::LatestRequest).await;
        assert_eq!(a, "from a");
        assert_eq!(controller.data().as_deref(), Some("from b"));
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn test_dropped_call_does_not_leave_loading_stuck() {
        let (_gates, provider) = GatedProvider::new(1);
        let controller = GenerationController::new(Arc::new(provider));

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), controller.generate("hello")).await;

        assert!(timed_out.is_err());
        assert!(!controller.loading());
        assert_eq!(controller.snapshot().status(), GenerationStatus::Idle);
    }
}
