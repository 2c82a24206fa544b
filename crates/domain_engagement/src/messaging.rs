//! Case messaging
//!
//! The message channel between the client and the assigned lawyer. The
//! channel stays locked until an application has been accepted; from then
//! on exactly those two parties can write and read.

use std::sync::Arc;

use core_kernel::{ActorContext, CaseId};
use domain_case::CasePort;

use crate::error::EngagementError;
use crate::message::Message;
use crate::ports::EngagementStorePort;

/// Service for the per-case message channel
pub struct MessagingChannel {
    case_port: Arc<dyn CasePort>,
    store: Arc<dyn EngagementStorePort>,
}

impl MessagingChannel {
    pub fn new(case_port: Arc<dyn CasePort>, store: Arc<dyn EngagementStorePort>) -> Self {
        Self { case_port, store }
    }

    /// Appends a message to the case's channel
    pub async fn send_message(
        &self,
        actor: ActorContext,
        case_id: CaseId,
        text: &str,
    ) -> Result<Message, EngagementError> {
        if text.trim().is_empty() {
            return Err(EngagementError::Validation(
                "message text is required".to_string(),
            ));
        }

        self.authorize(actor, case_id).await?;

        let message = Message::send(case_id, text, actor.actor_id, actor.role);
        self.store.append_message(&message, None).await?;

        tracing::debug!(case_id = %case_id, sender_id = %actor.actor_id, "message sent");
        Ok(message)
    }

    /// Lists the case's messages, oldest first
    pub async fn list_messages(
        &self,
        actor: ActorContext,
        case_id: CaseId,
    ) -> Result<Vec<Message>, EngagementError> {
        self.authorize(actor, case_id).await?;
        Ok(self.store.list_messages(case_id, None).await?)
    }

    /// Channel access check: the channel exists once a lawyer is
    /// assigned, and only the owner and that lawyer may use it
    async fn authorize(&self, actor: ActorContext, case_id: CaseId) -> Result<(), EngagementError> {
        let engagement = self.store.get_engagement(case_id, None).await?;
        if !engagement.channel_open() {
            return Err(EngagementError::ChannelLocked {
                case_id: case_id.to_string(),
            });
        }

        let case = self.case_port.get_case(case_id, None).await?;
        let is_participant = case.is_owned_by(actor.actor_id)
            || engagement.lawyer_assigned == Some(actor.actor_id);
        if !is_participant {
            return Err(EngagementError::Unauthorized(
                "only the client and the assigned lawyer may use the channel".to_string(),
            ));
        }
        Ok(())
    }
}
