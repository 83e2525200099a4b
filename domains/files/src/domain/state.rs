//! State machine for a single derivation request
//!
//! Received → Validated → Persisted → Derived → Completed.
//! Any non-terminal state may fail. Completed and Failed are terminal; a
//! failed request is resubmitted from Received, never resumed.

use filechat_common::StateError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationState {
    Received,
    Validated,
    Persisted,
    Derived,
    Completed,
    Failed,
}

impl DerivationState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [DerivationState] {
        match self {
            Self::Received => &[Self::Validated, Self::Failed],
            Self::Validated => &[Self::Persisted, Self::Failed],
            Self::Persisted => &[Self::Derived, Self::Completed, Self::Failed],
            Self::Derived => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }
}

impl std::fmt::Display for DerivationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Validated => write!(f, "validated"),
            Self::Persisted => write!(f, "persisted"),
            Self::Derived => write!(f, "derived"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Events that trigger derivation state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivationEvent {
    /// Candidate passed the validator
    Validate,
    /// Original content written to the store
    Persist,
    /// Model returned a completion
    Derive,
    /// Result descriptor ready (derived artifact written, or upload-only)
    Complete,
    Fail,
}

impl std::fmt::Display for DerivationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validate => write!(f, "validate"),
            Self::Persist => write!(f, "persist"),
            Self::Derive => write!(f, "derive"),
            Self::Complete => write!(f, "complete"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Derivation state machine
pub struct DerivationStateMachine;

impl DerivationStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: DerivationState,
        event: DerivationEvent,
    ) -> Result<DerivationState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (_, DerivationEvent::Fail) => DerivationState::Failed,
            (DerivationState::Received, DerivationEvent::Validate) => DerivationState::Validated,
            (DerivationState::Validated, DerivationEvent::Persist) => DerivationState::Persisted,
            (DerivationState::Persisted, DerivationEvent::Derive) => DerivationState::Derived,
            (DerivationState::Persisted, DerivationEvent::Complete)
            | (DerivationState::Derived, DerivationEvent::Complete) => DerivationState::Completed,
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: DerivationState, event: &DerivationEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}

/// Tracks one request through the state machine and logs each step
#[derive(Debug)]
pub struct DerivationTracker {
    pub id: Uuid,
    state: DerivationState,
    failure: Option<String>,
}

impl DerivationTracker {
    /// New request carrying fresh content
    pub fn received() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DerivationState::Received,
            failure: None,
        }
    }

    /// Request naming content that was validated and stored earlier
    pub fn from_stored() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DerivationState::Persisted,
            failure: None,
        }
    }

    pub fn state(&self) -> DerivationState {
        self.state
    }

    /// Failure reason once the request reached `Failed`
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn advance(&mut self, event: DerivationEvent) -> Result<DerivationState, StateError> {
        let next = DerivationStateMachine::transition(self.state, event)?;
        tracing::debug!(request_id = %self.id, from = %self.state, to = %next, "Derivation transition");
        self.state = next;
        Ok(next)
    }

    /// Move to `Failed`, remembering why. A no-op on terminal states.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        let reason = reason.into();
        tracing::debug!(request_id = %self.id, from = %self.state, reason = %reason, "Derivation failed");
        self.state = DerivationState::Failed;
        self.failure = Some(reason);
    }
}
