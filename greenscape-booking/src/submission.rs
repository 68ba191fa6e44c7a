use crate::models::{SubmissionRequest, SubmissionResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// The external submission collaborator. One request per call; transport
/// and serialization details are the adapter's problem.
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResponse, Box<dyn std::error::Error + Send + Sync>>;
}

/// What the mock adapter should do with the next request
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Accept,
    /// success=false with this message
    Decline(String),
    /// Transport-level failure
    TransportError,
    /// Never completes; exercises the caller's timeout path
    Hang,
}

/// Simulated submission endpoint. The site has no backend transaction, so
/// this is also the production default: accept, return a reference.
pub struct MockSubmissionAdapter {
    behavior: MockBehavior,
    latency: Duration,
    calls: AtomicUsize,
}

impl MockSubmissionAdapter {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            latency: Duration::from_millis(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::new(MockBehavior::Accept)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// How many requests actually reached the "network".
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionAdapter for MockSubmissionAdapter {
    async fn submit(
        &self,
        _request: &SubmissionRequest,
    ) -> Result<SubmissionResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match &self.behavior {
            MockBehavior::Accept => Ok(SubmissionResponse {
                success: true,
                message: None,
                reference: Some(Uuid::new_v4().to_string()),
            }),
            MockBehavior::Decline(message) => Ok(SubmissionResponse {
                success: false,
                message: Some(message.clone()),
                reference: None,
            }),
            MockBehavior::TransportError => Err("simulated connection reset".into()),
            MockBehavior::Hang => {
                // Far beyond any configured submission timeout
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("hung submission should be timed out by the caller")
            }
        }
    }
}
