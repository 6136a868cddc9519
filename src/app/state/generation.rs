use crate::domain::errors::GenerationError;
use crate::domain::models::{GenerationStatus, RequestId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// How settlements of overlapping `generate` calls are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Every settlement is applied; whichever call settles last wins.
    #[default]
    LastSettled,
    /// Only the most recently issued request may settle the state. Earlier
    /// requests still resolve for their own callers.
    LatestRequest,
}

/// One controller's view of its requests.
///
/// `result` is populated only when `Succeeded`, `error` only when `Failed`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationState {
    policy: SettlementPolicy,
    status: GenerationStatus,
    prompt: Option<String>,
    result: Option<String>,
    error: Option<GenerationError>,
    latest: RequestId,
    settled_at: Option<DateTime<Local>>,
}

impl GenerationState {
    #[must_use]
    pub fn new(policy: SettlementPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn loading(&self) -> bool {
        self.status == GenerationStatus::Pending
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&GenerationError> {
        self.error.as_ref()
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest
    }

    pub fn settled_at(&self) -> Option<DateTime<Local>> {
        self.settled_at
    }

    /// Starts a new request: pending, with no stale result or error left.
    pub fn begin(&mut self, prompt: String) -> RequestId {
        self.latest = self.latest.next();
        self.status = GenerationStatus::Pending;
        self.prompt = Some(prompt);
        self.result = None;
        self.error = None;
        self.latest
    }

    /// Returns false when the policy discarded the settlement.
    pub fn succeed(&mut self, request: RequestId, text: String) -> bool {
        if !self.accepts(request) {
            return false;
        }
        self.status = GenerationStatus::Succeeded;
        self.result = Some(text);
        self.error = None;
        self.settled_at = Some(Local::now());
        true
    }

    /// Returns false when the policy discarded the settlement.
    pub fn fail(&mut self, request: RequestId, error: GenerationError) -> bool {
        if !self.accepts(request) {
            return false;
        }
        self.status = GenerationStatus::Failed;
        self.result = None;
        self.error = Some(error);
        self.settled_at = Some(Local::now());
        true
    }

    /// A request dropped before it settled. Only the latest pending request
    /// can send the state back to idle.
    pub fn abandon(&mut self, request: RequestId) -> bool {
        if request != self.latest || self.status != GenerationStatus::Pending {
            return false;
        }
        self.status = GenerationStatus::Idle;
        true
    }

    fn accepts(&self, request: RequestId) -> bool {
        match self.policy {
            SettlementPolicy::LastSettled => true,
            SettlementPolicy::LatestRequest => request == self.latest,
        }
    }
}
