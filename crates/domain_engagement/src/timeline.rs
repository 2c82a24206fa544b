//! Audit timeline entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActorRole, CaseId, PartyId, TimelineEventId};

/// What happened on a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineAction {
    CaseOpened,
    ApplicationSubmitted,
    ApplicationRejected,
    LawyerAssigned,
    CaseFiled,
    CaseClosed,
}

/// One append-only audit log entry
///
/// Timeline events live in their own child collection keyed by case id, so
/// appending one never rewrites the engagement record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Unique identifier (time-ordered)
    pub id: TimelineEventId,
    /// The case this event belongs to
    pub case_id: CaseId,
    /// What happened
    pub action: TimelineAction,
    /// Who did it
    pub actor_id: PartyId,
    /// In which role
    pub actor_role: ActorRole,
    /// When
    pub timestamp: DateTime<Utc>,
}

impl TimelineEvent {
    pub fn record(
        case_id: CaseId,
        action: TimelineAction,
        actor_id: PartyId,
        actor_role: ActorRole,
    ) -> Self {
        Self {
            id: TimelineEventId::new_v7(),
            case_id,
            action,
            actor_id,
            actor_role,
            timestamp: Utc::now(),
        }
    }
}
