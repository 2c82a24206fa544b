//! Case messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActorRole, CaseId, MessageId, PartyId};

/// A message between the client and the assigned lawyer
///
/// Append-only, stored in a child collection keyed by case id, readable
/// only once the case has an assigned lawyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier (time-ordered)
    pub id: MessageId,
    /// The case this message belongs to
    pub case_id: CaseId,
    /// Message body
    pub text: String,
    /// Who sent it
    pub sender_id: PartyId,
    /// In which role
    pub sender_role: ActorRole,
    /// When
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn send(
        case_id: CaseId,
        text: impl Into<String>,
        sender_id: PartyId,
        sender_role: ActorRole,
    ) -> Self {
        Self {
            id: MessageId::new_v7(),
            case_id,
            text: text.into(),
            sender_id,
            sender_role,
            timestamp: Utc::now(),
        }
    }
}
