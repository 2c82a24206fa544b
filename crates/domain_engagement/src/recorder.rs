//! Timeline recorder
//!
//! Pure append into the timeline child collection. The only way this can
//! fail is a persistence error; there is nothing to validate.

use std::sync::Arc;

use core_kernel::{ActorContext, CaseId};

use crate::error::EngagementError;
use crate::ports::EngagementStorePort;
use crate::timeline::{TimelineAction, TimelineEvent};

/// Append-only audit log for case activity
pub struct TimelineRecorder {
    store: Arc<dyn EngagementStorePort>,
}

impl TimelineRecorder {
    pub fn new(store: Arc<dyn EngagementStorePort>) -> Self {
        Self { store }
    }

    /// Appends one audit entry
    pub async fn append(
        &self,
        case_id: CaseId,
        action: TimelineAction,
        actor: ActorContext,
    ) -> Result<TimelineEvent, EngagementError> {
        let event = TimelineEvent::record(case_id, action, actor.actor_id, actor.role);
        self.store.append_event(&event, None).await?;
        tracing::debug!(
            case_id = %case_id,
            action = ?action,
            actor_id = %actor.actor_id,
            "timeline event recorded"
        );
        Ok(event)
    }

    /// Lists a case's timeline, oldest first
    pub async fn list_timeline(&self, case_id: CaseId) -> Result<Vec<TimelineEvent>, EngagementError> {
        Ok(self.store.list_events(case_id, None).await?)
    }
}
