//! Application and messaging DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ActorRole, ApplicationId, CaseId, MessageId, PartyId};
use domain_engagement::{ApplicationStatus, ApplicationView, Message};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitApplicationRequest {
    #[validate(length(min = 1, max = 4000))]
    pub cover_letter: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub lawyer_id: PartyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lawyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl From<ApplicationView> for ApplicationResponse {
    fn from(view: ApplicationView) -> Self {
        let (lawyer_name, firm) = match view.lawyer {
            Some(profile) => (Some(profile.display_name), profile.firm),
            None => (None, None),
        };
        Self {
            id: view.application.id,
            lawyer_id: view.application.lawyer_id,
            lawyer_name,
            firm,
            cover_letter: view.application.cover_letter,
            status: view.application.status,
            submitted_at: view.application.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 8000))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: MessageId,
    pub case_id: CaseId,
    pub text: String,
    pub sender_id: PartyId,
    pub sender_role: ActorRole,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            case_id: message.case_id,
            text: message.text,
            sender_id: message.sender_id,
            sender_role: message.sender_role,
            timestamp: message.timestamp,
        }
    }
}
